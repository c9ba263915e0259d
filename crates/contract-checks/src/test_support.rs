//! Handler binding for this crate's own unit tests.
//!
//! Failures unwind with the record as payload and bump a per-thread counter,
//! so tests can assert both what was reported and how many times.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use crate::handler;
use crate::violation::ContractViolation;

thread_local! {
    static DISPATCHED: Cell<usize> = const { Cell::new(0) };
}

fn counting_handle(violation: &ContractViolation<'_>) -> ! {
    DISPATCHED.with(|count| count.set(count.get() + 1));
    handler::unwind_handle(violation)
}

crate::bind_handler!(counting_handle);

pub fn dispatch_count() -> usize {
    DISPATCHED.with(Cell::get)
}

pub fn reset_dispatch_count() {
    DISPATCHED.with(|count| count.set(0));
}

/// Runs `f` and returns the violation it raised, if any.
pub fn catch_violation<F: FnOnce()>(f: F) -> Option<ContractViolation<'static>> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<ContractViolation<'static>>() {
            Ok(violation) => Some(*violation),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
