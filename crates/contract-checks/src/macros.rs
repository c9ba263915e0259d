//! Check and binding macros.
//!
//! Each check macro takes a condition and an optional message. The message
//! can be any expression convertible into `Cow<str>`, or a format string
//! followed by its arguments. A message literal is always a format string,
//! so inline captures such as `"x={x}"` are formatted the way `assert!`
//! formats them. Messages are only built on the failing path.
//!
//! ```ignore
//! contract_checks::bind_default_handler!();
//!
//! fn pop(stack: &mut Vec<u32>) -> u32 {
//!     contract_checks::precondition!(!stack.is_empty());
//!     let len = stack.len();
//!     let top = stack.pop().unwrap_or_default();
//!     contract_checks::postcondition!(stack.len() == len - 1, "pop removed {} items", len - stack.len());
//!     top
//! }
//! ```
//!
//! Arguments after a message literal are format arguments, so a stray extra
//! argument is rejected at compile time as an unused format argument.

/// Expands one check under the active profile.
#[doc(hidden)]
#[macro_export]
macro_rules! __contract_check {
    ($kind:expr, $cond:expr, $msg:expr) => {
        match $crate::Profile::ACTIVE.mode($kind) {
            $crate::CheckMode::Active => {
                if !$cond {
                    $crate::check::fail(
                        $crate::Profile::ACTIVE,
                        &$crate::ContractViolation::new($kind, ::core::file!(), ::core::line!())
                            .with_condition(
                                $crate::Profile::ACTIVE.condition_text(::core::stringify!($cond)),
                            )
                            .with_message($msg),
                    )
                }
            }
            $crate::CheckMode::Disabled | $crate::CheckMode::Unchecked => {
                // Type-checked, never evaluated.
                if false {
                    let _ = $cond;
                }
            }
        }
    };
}

/// Checks a condition the caller must ensure.
///
/// ```ignore
/// precondition!(index < len);
/// precondition!(index < len, "index out of range");
/// precondition!(index < len, "index {} out of range for {}", index, len);
/// precondition!(index < len, "index {index} out of range for {len}");
/// ```
///
/// An argument the message does not use is rejected:
///
/// ```compile_fail
/// contract_checks::bind_unwinding_handler!();
///
/// fn main() {
///     let extra = 1;
///     contract_checks::precondition!(true, "message", extra);
/// }
/// ```
///
/// A message expression takes no further arguments:
///
/// ```compile_fail
/// contract_checks::bind_unwinding_handler!();
///
/// fn main() {
///     let msg_var = "message";
///     let extra = 1;
///     contract_checks::precondition!(true, msg_var, extra);
/// }
/// ```
#[macro_export]
macro_rules! precondition {
    ($cond:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::PRECONDITION, $cond, "")
    };
    ($cond:expr, $fmt:literal $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::PRECONDITION, $cond, ::std::format!($fmt))
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::PRECONDITION, $cond, $msg)
    };
    ($cond:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::__contract_check!(
            $crate::ViolationKind::PRECONDITION,
            $cond,
            ::std::format!($fmt, $($arg)+)
        )
    };
}

/// Checks a precondition whose failure would lead to undefined behavior.
/// Enforced under every profile, including `unchecked`.
#[macro_export]
macro_rules! safety_precondition {
    ($cond:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::SAFETY_PRECONDITION, $cond, "")
    };
    ($cond:expr, $fmt:literal $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::SAFETY_PRECONDITION, $cond, ::std::format!($fmt))
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::SAFETY_PRECONDITION, $cond, $msg)
    };
    ($cond:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::__contract_check!(
            $crate::ViolationKind::SAFETY_PRECONDITION,
            $cond,
            ::std::format!($fmt, $($arg)+)
        )
    };
}

/// Checks a condition an operation guarantees on return.
#[macro_export]
macro_rules! postcondition {
    ($cond:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::POSTCONDITION, $cond, "")
    };
    ($cond:expr, $fmt:literal $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::POSTCONDITION, $cond, ::std::format!($fmt))
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::POSTCONDITION, $cond, $msg)
    };
    ($cond:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::__contract_check!(
            $crate::ViolationKind::POSTCONDITION,
            $cond,
            ::std::format!($fmt, $($arg)+)
        )
    };
}

/// Checks a condition that must hold at this point of a value's lifetime.
#[macro_export]
macro_rules! invariant {
    ($cond:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::INVARIANT, $cond, "")
    };
    ($cond:expr, $fmt:literal $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::INVARIANT, $cond, ::std::format!($fmt))
    };
    ($cond:expr, $msg:expr $(,)?) => {
        $crate::__contract_check!($crate::ViolationKind::INVARIANT, $cond, $msg)
    };
    ($cond:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::__contract_check!(
            $crate::ViolationKind::INVARIANT,
            $cond,
            ::std::format!($fmt, $($arg)+)
        )
    };
}

/// Reports a failure with no condition. Evaluates to `!`.
#[macro_export]
macro_rules! unconditional_fatal_error {
    () => {
        $crate::unconditional_fatal_error!("")
    };
    ($fmt:literal $(,)?) => {
        $crate::unconditional_fatal_error!(::std::format!($fmt))
    };
    ($msg:expr $(,)?) => {
        $crate::check::fail(
            $crate::Profile::ACTIVE,
            &$crate::ContractViolation::new(
                $crate::ViolationKind::UNCONDITIONAL_FATAL_ERROR,
                ::core::file!(),
                ::core::line!(),
            )
            .with_message($msg),
        )
    };
    ($fmt:literal, $($arg:tt)+) => {
        $crate::unconditional_fatal_error!(::std::format!($fmt, $($arg)+))
    };
}

/// Binds the program's violation handler.
///
/// Invoke once, in the final binary (or in each test binary). The handler
/// must be a `fn(&ContractViolation<'_>) -> !`; anything that can return is
/// rejected at compile time.
///
/// ```ignore
/// fn report_and_exit(violation: &contract_checks::ContractViolation<'_>) -> ! {
///     eprint!("{}", violation.display_report());
///     std::process::exit(70)
/// }
///
/// contract_checks::bind_handler!(report_and_exit);
/// ```
#[macro_export]
macro_rules! bind_handler {
    ($handler:expr) => {
        #[doc(hidden)]
        #[no_mangle]
        fn __contract_checks_violated(violation: &$crate::ContractViolation<'_>) {
            let handler: fn(&$crate::ContractViolation<'_>) -> ! = $handler;
            handler(violation)
        }
    };
}

/// Binds [`default_handle`](crate::handler::default_handle): report to
/// stderr, then abort.
#[macro_export]
macro_rules! bind_default_handler {
    () => {
        $crate::bind_handler!($crate::handler::default_handle);
    };
}

/// Binds [`minimal_handle`](crate::handler::minimal_handle): abort silently.
#[macro_export]
macro_rules! bind_minimal_handler {
    () => {
        $crate::bind_handler!($crate::handler::minimal_handle);
    };
}

/// Binds [`unwind_handle`](crate::handler::unwind_handle): panic with the
/// record as payload.
#[macro_export]
macro_rules! bind_unwinding_handler {
    () => {
        $crate::bind_handler!($crate::handler::unwind_handle);
    };
}
