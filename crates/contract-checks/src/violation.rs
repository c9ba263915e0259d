//! The contract violation record and its report format.
//!
//! A [`ContractViolation`] is built at the moment a check fails, handed to the
//! bound handler, and then either dropped (the handler terminates) or carried
//! up the stack as a panic payload (the handler unwinds).
//!
//! The report line is matched by external tooling, so its field order and
//! punctuation are fixed:
//!
//! ```text
//! <file>:<line>: <description> (<condition>). <message>
//! <file>:<line>: <description>: <message>
//! ```
//!
//! The second form is used when no condition text was captured and for
//! unconditional fatal errors.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;

use serde::Serialize;

use crate::kind::ViolationKind;

/// One detected contract failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractViolation<'a> {
    kind: ViolationKind,
    condition: Option<&'static str>,
    file: &'static str,
    line: u32,
    message: Cow<'a, str>,
}

impl<'a> ContractViolation<'a> {
    /// A record with an empty message and no condition text.
    pub const fn new(kind: ViolationKind, file: &'static str, line: u32) -> Self {
        ContractViolation {
            kind,
            condition: None,
            file,
            line,
            message: Cow::Borrowed(""),
        }
    }

    /// A record located at the caller of the enclosing `#[track_caller]` chain.
    #[track_caller]
    pub fn caller(kind: ViolationKind) -> Self {
        let location = Location::caller();
        Self::new(kind, location.file(), location.line())
    }

    pub fn with_condition(mut self, condition: impl Into<Option<&'static str>>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// The source text of the condition that evaluated to false, when the
    /// active profile captures it.
    pub fn condition(&self) -> Option<&'static str> {
        self.condition
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Copies a borrowed message so the record can outlive the check site.
    pub fn to_static(&self) -> ContractViolation<'static> {
        ContractViolation {
            kind: self.kind,
            condition: self.condition,
            file: self.file,
            line: self.line,
            message: Cow::Owned(self.message.clone().into_owned()),
        }
    }

    /// The full report line, trailing newline included.
    pub fn report(&self) -> String {
        self.display_report().to_string()
    }

    /// Formats the report without allocating.
    pub fn display_report(&self) -> Report<'_, 'a> {
        Report(self)
    }

    fn uses_condition_form(&self) -> bool {
        self.condition.is_some() && self.kind != ViolationKind::UNCONDITIONAL_FATAL_ERROR
    }
}

impl fmt::Display for ContractViolation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self.kind.describe();
        match self.condition {
            Some(condition) if self.uses_condition_form() => write!(
                f,
                "{}:{}: {} ({}). {}",
                self.file, self.line, description, condition, self.message
            ),
            _ => write!(
                f,
                "{}:{}: {}: {}",
                self.file, self.line, description, self.message
            ),
        }
    }
}

impl std::error::Error for ContractViolation<'_> {}

/// [`Display`](fmt::Display) adapter for the newline-terminated report.
pub struct Report<'r, 'a>(&'r ContractViolation<'a>);

impl fmt::Display for Report<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0)
    }
}

/// Writes the report to `out` and flushes it.
pub fn write_report<W: Write>(violation: &ContractViolation<'_>, mut out: W) -> io::Result<()> {
    write!(out, "{}", violation.display_report())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> ContractViolation<'static> {
        ContractViolation::new(ViolationKind::PRECONDITION, "src/lib.rs", 12)
            .with_condition("x > 0")
            .with_message("x must be positive")
    }

    #[test]
    fn message_defaults_to_empty() {
        let v = ContractViolation::new(ViolationKind::INVARIANT, "a.rs", 1);
        assert_eq!(v.message(), "");
        assert_eq!(v.condition(), None);
    }

    #[test]
    fn report_with_condition() {
        assert_eq!(
            sample().report(),
            "src/lib.rs:12: Precondition violated (x > 0). x must be positive\n"
        );
    }

    #[test]
    fn report_with_condition_and_empty_message_keeps_trailing_space() {
        let v = ContractViolation::new(ViolationKind::PRECONDITION, "tests.rs", 7)
            .with_condition("false");
        assert_eq!(v.report(), "tests.rs:7: Precondition violated (false). \n");
    }

    #[test]
    fn report_without_condition() {
        let v = ContractViolation::new(ViolationKind::POSTCONDITION, "b.rs", 3)
            .with_message("result out of range");
        assert_eq!(v.report(), "b.rs:3: Postcondition violated: result out of range\n");
    }

    #[test]
    fn unconditional_fatal_error_ignores_condition_text() {
        let v = ContractViolation::new(ViolationKind::UNCONDITIONAL_FATAL_ERROR, "c.rs", 9)
            .with_condition("unused")
            .with_message("unreachable state");
        assert_eq!(v.report(), "c.rs:9: Unconditional fatal error: unreachable state\n");
    }

    #[test]
    fn unknown_kind_reports_fallback_description() {
        let v = ContractViolation::new(ViolationKind(99), "d.rs", 1).with_condition("ok");
        assert_eq!(v.report(), "d.rs:1: Unknown category kind (ok). \n");
    }

    #[test]
    fn display_is_report_without_newline() {
        let v = sample();
        assert_eq!(format!("{v}\n"), v.report());
    }

    #[test]
    fn write_report_writes_exact_bytes() {
        let mut out = Vec::new();
        write_report(&sample(), &mut out).unwrap();
        assert_eq!(out, sample().report().into_bytes());
    }

    #[test]
    fn caller_records_this_line() {
        let expected = line!() + 1;
        let v = ContractViolation::caller(ViolationKind::INVARIANT);
        assert_eq!(v.line(), expected);
        assert_eq!(v.file(), file!());
    }

    #[test]
    fn to_static_detaches_borrowed_message() {
        let owned_text = String::from("borrowed buffer");
        let detached = {
            let v = ContractViolation::new(ViolationKind::INVARIANT, "e.rs", 2)
                .with_message(owned_text.as_str());
            v.to_static()
        };
        drop(owned_text);
        assert_eq!(detached.message(), "borrowed buffer");
    }

    #[test]
    fn serializes_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["kind"], 1);
        assert_eq!(json["condition"], "x > 0");
        assert_eq!(json["file"], "src/lib.rs");
        assert_eq!(json["line"], 12);
        assert_eq!(json["message"], "x must be positive");
    }

    proptest! {
        #[test]
        fn fields_read_back_unchanged(
            raw_kind in any::<u32>(),
            line in any::<u32>(),
            with_condition in any::<bool>(),
            message in ".*",
        ) {
            let kind = ViolationKind(raw_kind);
            let condition = with_condition.then_some("a == b");
            let v = ContractViolation::new(kind, "prop.rs", line)
                .with_condition(condition)
                .with_message(message.clone());
            prop_assert_eq!(v.kind(), kind);
            prop_assert_eq!(v.file(), "prop.rs");
            prop_assert_eq!(v.line(), line);
            prop_assert_eq!(v.condition(), condition);
            prop_assert_eq!(v.message(), message.as_str());
        }

        #[test]
        fn report_is_pure(raw_kind in 0u32..8, line in any::<u32>(), message in ".*") {
            let v = ContractViolation::new(ViolationKind(raw_kind), "pure.rs", line)
                .with_condition("cond")
                .with_message(message);
            let first = v.report();
            prop_assert_eq!(&first, &v.report());
            prop_assert_eq!(&first, &v.clone().report());
            prop_assert!(first.ends_with('\n'));
            let prefix = format!("pure.rs:{}: ", line);
            prop_assert!(first.starts_with(&prefix));
        }
    }
}
