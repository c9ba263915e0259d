//! The link-time handler binding.
//!
//! The embedding program defines exactly one handler symbol with
//! [`bind_handler!`](crate::bind_handler). This module declares that symbol
//! and calls it directly: there is no registration step and nothing to
//! reassign at runtime. A program that never binds a handler fails to link,
//! and a program that binds two fails with a duplicate symbol.
//!
//! Trapping profiles (`minimal`, `unchecked`) never reference the symbol, so
//! programs built with them need no binding.

use crate::violation::ContractViolation;

#[cfg(not(any(feature = "minimal", feature = "unchecked")))]
extern "Rust" {
    /// Defined by `bind_handler!` in the embedding crate. The definition
    /// wraps a `fn(&ContractViolation<'_>) -> !`, so it does not return.
    fn __contract_checks_violated(violation: &ContractViolation<'_>);
}

/// Hands a violation to the bound handler.
#[cfg(not(any(feature = "minimal", feature = "unchecked")))]
#[cold]
#[inline(never)]
pub fn violated(violation: &ContractViolation<'_>) -> ! {
    // SAFETY: the symbol is defined by `bind_handler!` with exactly this
    // signature. Linking fails when it is missing.
    unsafe { __contract_checks_violated(violation) };
    handler_returned(violation)
}

/// Trapping builds stop in place.
#[cfg(any(feature = "minimal", feature = "unchecked"))]
#[cold]
#[inline(never)]
pub fn violated(violation: &ContractViolation<'_>) -> ! {
    crate::handler::minimal_handle(violation)
}

/// Reached only when a hand-written handler symbol returns, which would
/// otherwise let the failed check carry on as if it had passed.
#[cfg(not(any(feature = "minimal", feature = "unchecked")))]
#[cold]
fn handler_returned(violation: &ContractViolation<'_>) -> ! {
    use std::io::Write;

    tracing::error!(
        kind = %violation.kind(),
        file = violation.file(),
        line = violation.line(),
        "contract violation handler returned; aborting"
    );
    let _ = writeln!(
        std::io::stderr(),
        "{}:{}: contract violation handler returned instead of diverging",
        violation.file(),
        violation.line()
    );
    crate::handler::trap()
}

#[cfg(all(test, not(any(feature = "minimal", feature = "unchecked"))))]
mod tests {
    use std::panic;

    use super::*;
    use crate::kind::ViolationKind;
    use crate::test_support::{dispatch_count, reset_dispatch_count};

    #[test]
    fn violated_reaches_the_bound_handler_once() {
        reset_dispatch_count();
        let record = ContractViolation::new(ViolationKind::INVARIANT, "x.rs", 4)
            .with_message("bound");

        let payload = panic::catch_unwind(|| violated(&record)).unwrap_err();
        let caught = payload.downcast::<ContractViolation<'static>>().unwrap();

        assert_eq!(caught.message(), "bound");
        assert_eq!(dispatch_count(), 1);
    }
}
