//! Contract violation categories.
//!
//! [`ViolationKind`] is an integer-backed newtype rather than a closed enum so
//! embedding code can define its own categories next to the predefined ones.
//! The predefined values are stable: harnesses match on the number, not just
//! on the report text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The category of a detected contract failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationKind(pub u32);

impl ViolationKind {
    /// A condition the caller must ensure before calling an operation.
    pub const PRECONDITION: Self = Self(1);
    /// A precondition whose failure would lead to undefined behavior if unchecked.
    pub const SAFETY_PRECONDITION: Self = Self(2);
    /// A condition an operation guarantees on normal return.
    pub const POSTCONDITION: Self = Self(3);
    /// A condition that must hold at specific points in a value's lifetime.
    pub const INVARIANT: Self = Self(4);
    /// A failure that is reported unconditionally, with no condition attached.
    pub const UNCONDITIONAL_FATAL_ERROR: Self = Self(5);

    /// The predefined kinds, in numeric order.
    pub const PREDEFINED: [Self; 5] = [
        Self::PRECONDITION,
        Self::SAFETY_PRECONDITION,
        Self::POSTCONDITION,
        Self::INVARIANT,
        Self::UNCONDITIONAL_FATAL_ERROR,
    ];

    /// The description used in reports.
    ///
    /// Total over all values: anything outside the predefined set yields
    /// `"Unknown category kind"`, because this runs inside the failure path
    /// and must not fail itself.
    pub const fn describe(self) -> &'static str {
        match self.0 {
            1 | 2 => "Precondition violated",
            3 => "Postcondition violated",
            4 => "Invariant violated",
            5 => "Unconditional fatal error",
            _ => "Unknown category kind",
        }
    }

    /// The snake_case identifier of a predefined kind.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("precondition"),
            2 => Some("safety_precondition"),
            3 => Some("postcondition"),
            4 => Some("invariant"),
            5 => Some("unconditional_fatal_error"),
            _ => None,
        }
    }

    pub const fn is_predefined(self) -> bool {
        self.name().is_some()
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "kind({})", self.0),
        }
    }
}

impl FromStr for ViolationKind {
    type Err = ConfigError;

    /// Accepts a predefined name (`-` and `_` are interchangeable) or a raw
    /// integer value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(kind) = Self::PREDEFINED
            .into_iter()
            .find(|kind| kind.name() == Some(normalized.as_str()))
        {
            return Ok(kind);
        }
        normalized
            .parse::<u32>()
            .map(ViolationKind)
            .map_err(|_| ConfigError::UnknownKind { name: s.to_string() })
    }
}
