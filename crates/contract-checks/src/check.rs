//! Function forms of the check entry points.
//!
//! These evaluate an already computed `bool`, so they always pay for the
//! condition and record no condition text. The macros in the crate root
//! (`precondition!` and friends) are the zero-cost forms: they skip the
//! condition entirely when the active profile does not check that kind, and
//! they capture the condition's source text.
//!
//! Every function here is `#[track_caller]`, so the record points at the
//! code that called the check, not at this module.

use crate::dispatch;
use crate::handler;
use crate::kind::ViolationKind;
use crate::profile::{CheckMode, Profile};
use crate::violation::ContractViolation;

#[track_caller]
#[inline]
pub fn precondition(condition: bool) {
    enforce(Profile::ACTIVE, ViolationKind::PRECONDITION, condition, "")
}

#[track_caller]
#[inline]
pub fn precondition_with(condition: bool, message: &str) {
    enforce(Profile::ACTIVE, ViolationKind::PRECONDITION, condition, message)
}

/// A precondition guarding memory safety. Checked under every profile.
#[track_caller]
#[inline]
pub fn safety_precondition(condition: bool) {
    enforce(Profile::ACTIVE, ViolationKind::SAFETY_PRECONDITION, condition, "")
}

#[track_caller]
#[inline]
pub fn safety_precondition_with(condition: bool, message: &str) {
    enforce(Profile::ACTIVE, ViolationKind::SAFETY_PRECONDITION, condition, message)
}

#[track_caller]
#[inline]
pub fn postcondition(condition: bool) {
    enforce(Profile::ACTIVE, ViolationKind::POSTCONDITION, condition, "")
}

#[track_caller]
#[inline]
pub fn postcondition_with(condition: bool, message: &str) {
    enforce(Profile::ACTIVE, ViolationKind::POSTCONDITION, condition, message)
}

#[track_caller]
#[inline]
pub fn invariant(condition: bool) {
    enforce(Profile::ACTIVE, ViolationKind::INVARIANT, condition, "")
}

#[track_caller]
#[inline]
pub fn invariant_with(condition: bool, message: &str) {
    enforce(Profile::ACTIVE, ViolationKind::INVARIANT, condition, message)
}

/// Reports a failure with no condition attached. Never returns.
#[track_caller]
pub fn unconditional_fatal_error(message: &str) -> ! {
    fail_at_caller(Profile::ACTIVE, ViolationKind::UNCONDITIONAL_FATAL_ERROR, message)
}

/// Checks `condition` as a `kind` check under `profile`.
///
/// Does nothing when the condition holds or the profile does not check
/// `kind`. Custom kinds go through here.
#[track_caller]
#[inline]
pub fn enforce(profile: Profile, kind: ViolationKind, condition: bool, message: &str) {
    if !condition && profile.mode(kind) == CheckMode::Active {
        fail_at_caller(profile, kind, message)
    }
}

/// Sends a failed check to wherever `profile` sends failures: the trap for
/// trapping profiles, the bound handler otherwise.
#[cold]
#[inline(never)]
pub fn fail(profile: Profile, violation: &ContractViolation<'_>) -> ! {
    if profile.traps() {
        handler::minimal_handle(violation)
    }
    dispatch::violated(violation)
}

#[cold]
#[inline(never)]
#[track_caller]
fn fail_at_caller(profile: Profile, kind: ViolationKind, message: &str) -> ! {
    fail(profile, &ContractViolation::caller(kind).with_message(message))
}
