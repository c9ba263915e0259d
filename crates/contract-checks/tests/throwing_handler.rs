//! A custom handler that turns violations into catchable errors.
//!
//! Binds a handler that unwinds with its own error type wrapping the record,
//! the way an application would convert contract failures into structured
//! errors at a top-level boundary.

use std::panic::{self, AssertUnwindSafe};

use contract_checks::{ContractViolation, Profile, ViolationKind};

/// The error value the custom handler throws.
#[derive(Debug, thiserror::Error)]
#[error("contract failure: {0}")]
struct ContractFailure(ContractViolation<'static>);

fn throwing_handle(violation: &ContractViolation<'_>) -> ! {
    panic::panic_any(ContractFailure(violation.to_static()))
}

contract_checks::bind_handler!(throwing_handle);

fn catch_failure<F: FnOnce()>(f: F) -> Option<ContractFailure> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => Some(
            *payload
                .downcast::<ContractFailure>()
                .expect("payload should be the custom error"),
        ),
    }
}

#[test]
fn passing_checks_do_not_throw() {
    let caught = catch_failure(|| {
        contract_checks::precondition!(true);
        contract_checks::precondition!(true, "##########");
        contract_checks::invariant!(true);
        contract_checks::invariant!(true, "#########");
        contract_checks::postcondition!(true);
    });
    assert!(caught.is_none());
}

#[cfg(not(any(feature = "lightweight", feature = "minimal", feature = "unchecked")))]
mod full_profiles {
    use super::*;

    #[test]
    fn invariant_failure_is_caught_with_all_fields() {
        let mut expected_line = 0;
        let failure = catch_failure(|| {
            expected_line = line!() + 1;
            contract_checks::invariant!(false, "msg");
        })
        .expect("invariant should throw");

        let violation = &failure.0;
        assert_eq!(violation.kind(), ViolationKind::INVARIANT);
        assert_eq!(violation.condition(), Some("false"));
        assert_eq!(violation.message(), "msg");
        assert_eq!(violation.file(), file!());
        assert_eq!(violation.line(), expected_line);
        assert_eq!(
            failure.to_string(),
            format!("contract failure: {}:{}: Invariant violated (false). msg", file!(), expected_line)
        );
    }

    #[test]
    fn precondition_encodes_expected_info() {
        let mut expected_line = 0;
        let failure = catch_failure(|| {
            expected_line = line!() + 1;
            contract_checks::precondition!(false);
        })
        .expect("precondition should throw");

        assert_eq!(failure.0.line(), expected_line);
        assert_eq!(failure.0.file(), file!());
        assert_eq!(failure.0.condition(), Some("false"));
    }

    #[test]
    fn message_is_carried() {
        let failure = catch_failure(|| contract_checks::precondition!(false, "expected message"))
            .expect("precondition should throw");
        assert_eq!(failure.0.message(), "expected message");
    }

    #[test]
    fn every_check_kind_throws() {
        let checks: [(ViolationKind, fn()); 4] = [
            (ViolationKind::PRECONDITION, || contract_checks::precondition!(false)),
            (ViolationKind::SAFETY_PRECONDITION, || {
                contract_checks::safety_precondition!(false)
            }),
            (ViolationKind::POSTCONDITION, || contract_checks::postcondition!(false)),
            (ViolationKind::INVARIANT, || contract_checks::invariant!(false)),
        ];
        for (kind, check) in checks {
            let failure = catch_failure(check).expect("check should throw");
            assert_eq!(failure.0.kind(), kind);
        }
    }

    #[test]
    fn function_forms_report_the_caller() {
        let mut expected_line = 0;
        let failure = catch_failure(|| {
            expected_line = line!() + 1;
            contract_checks::check::postcondition_with(false, "function form");
        })
        .expect("postcondition should throw");

        assert_eq!(failure.0.line(), expected_line);
        assert_eq!(failure.0.file(), file!());
        assert_eq!(failure.0.condition(), None);
        assert_eq!(
            failure.0.report(),
            format!("{}:{}: Postcondition violated: function form\n", file!(), expected_line)
        );
    }
}

#[cfg(feature = "unchecked")]
#[test]
fn unchecked_profile_ignores_ordinary_checks() {
    let evaluated = std::cell::Cell::new(false);
    let caught = catch_failure(|| {
        contract_checks::precondition!({
            evaluated.set(true);
            false
        });
        contract_checks::invariant!(false, "here");
        contract_checks::postcondition!(false, "string");
    });
    assert!(caught.is_none());
    assert!(!evaluated.get());
    assert_eq!(Profile::ACTIVE, Profile::Unchecked);
}

#[test]
fn active_profile_matches_build_features() {
    let expected = if cfg!(feature = "verbose") {
        Profile::Verbose
    } else if cfg!(feature = "lightweight") {
        Profile::Lightweight
    } else if cfg!(feature = "minimal") {
        Profile::Minimal
    } else if cfg!(feature = "unchecked") {
        Profile::Unchecked
    } else {
        Profile::Default
    };
    assert_eq!(Profile::ACTIVE, expected);
}
