//! Reference handler implementations.
//!
//! Every handler has the shape `fn(&ContractViolation<'_>) -> !`. Bind one
//! with [`bind_handler!`](crate::bind_handler) or the shorthand binding
//! macros. A handler either stops the process or unwinds; it never hands
//! control back to the failed check.

use std::io;
use std::panic;
use std::process;

use crate::violation::{write_report, ContractViolation};

/// Logs the violation, writes its report to stderr, and aborts.
///
/// The report is flushed before aborting so it survives abnormal
/// termination. On Unix the process dies with `SIGABRT`, which keeps the
/// failure visible to crash reporters and debuggers.
#[cold]
pub fn default_handle(violation: &ContractViolation<'_>) -> ! {
    tracing::error!(
        kind = %violation.kind(),
        file = violation.file(),
        line = violation.line(),
        condition = violation.condition(),
        detail = violation.message(),
        "contract violated"
    );
    // Nothing useful can be done if stderr is gone; abort regardless.
    let _ = write_report(violation, io::stderr().lock());
    process::abort()
}

/// Aborts immediately with no output and no unwinding.
#[cold]
pub fn minimal_handle(_violation: &ContractViolation<'_>) -> ! {
    trap()
}

/// Unwinds with an owned copy of the violation as the panic payload.
///
/// Recover it at a boundary with [`std::panic::catch_unwind`] and
/// `downcast::<ContractViolation<'static>>()`.
#[cold]
pub fn unwind_handle(violation: &ContractViolation<'_>) -> ! {
    panic::panic_any(violation.to_static())
}

/// The fastest unconditional stop available.
#[cold]
#[inline(never)]
pub fn trap() -> ! {
    process::abort()
}
