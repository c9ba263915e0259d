//! Build-time check profiles.
//!
//! A profile decides, per kind, whether a check is performed and what the
//! resulting record carries. The active profile is fixed at compile time by
//! the crate's Cargo features, so the check macros fold to either a direct
//! call or nothing at all.
//!
//! | Profile | Pre | Post / Invariant | Safety | Condition text | On failure |
//! |---------|-----|------------------|--------|----------------|------------|
//! | `Default` | active | active | active | yes | bound handler |
//! | `Verbose` | active | active | active | yes | bound handler |
//! | `Lightweight` | active | disabled | active | no | bound handler |
//! | `Minimal` | active | active | active | no | trap |
//! | `Unchecked` | unchecked | unchecked | active | no | trap |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kind::ViolationKind;

#[cfg(any(
    all(feature = "verbose", feature = "lightweight"),
    all(feature = "verbose", feature = "minimal"),
    all(feature = "verbose", feature = "unchecked"),
    all(feature = "lightweight", feature = "minimal"),
    all(feature = "lightweight", feature = "unchecked"),
    all(feature = "minimal", feature = "unchecked"),
))]
compile_error!(
    "contract-checks profiles are mutually exclusive: enable at most one of \
     `verbose`, `lightweight`, `minimal`, `unchecked`"
);

/// A build configuration for contract checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Default,
    Verbose,
    /// Only preconditions are checked and condition text is dropped.
    Lightweight,
    /// Every check is performed; failures trap with no output.
    Minimal,
    /// Ordinary checks compile to nothing. Safety preconditions still trap.
    Unchecked,
}

/// What a profile does with one kind of check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// The condition is evaluated and a false result is dispatched.
    Active,
    /// The profile leaves this kind out. The condition is not evaluated.
    Disabled,
    /// Checking was switched off for the whole build. The condition is not
    /// evaluated and nothing is dispatched.
    Unchecked,
}

impl Profile {
    #[cfg(not(any(
        feature = "verbose",
        feature = "lightweight",
        feature = "minimal",
        feature = "unchecked"
    )))]
    pub const ACTIVE: Profile = Profile::Default;
    #[cfg(feature = "verbose")]
    pub const ACTIVE: Profile = Profile::Verbose;
    #[cfg(feature = "lightweight")]
    pub const ACTIVE: Profile = Profile::Lightweight;
    #[cfg(feature = "minimal")]
    pub const ACTIVE: Profile = Profile::Minimal;
    #[cfg(feature = "unchecked")]
    pub const ACTIVE: Profile = Profile::Unchecked;

    pub const ALL: [Profile; 5] = [
        Profile::Default,
        Profile::Verbose,
        Profile::Lightweight,
        Profile::Minimal,
        Profile::Unchecked,
    ];

    pub const fn mode(self, kind: ViolationKind) -> CheckMode {
        if kind.0 == ViolationKind::SAFETY_PRECONDITION.0
            || kind.0 == ViolationKind::UNCONDITIONAL_FATAL_ERROR.0
        {
            return CheckMode::Active;
        }
        match self {
            Profile::Default | Profile::Verbose | Profile::Minimal => CheckMode::Active,
            Profile::Lightweight => {
                if kind.0 == ViolationKind::POSTCONDITION.0 || kind.0 == ViolationKind::INVARIANT.0 {
                    CheckMode::Disabled
                } else {
                    CheckMode::Active
                }
            }
            Profile::Unchecked => CheckMode::Unchecked,
        }
    }

    pub const fn captures_condition(self) -> bool {
        matches!(self, Profile::Default | Profile::Verbose)
    }

    /// Whether failures stop the process directly instead of calling the
    /// bound handler. Trapping profiles need no handler binding.
    pub const fn traps(self) -> bool {
        matches!(self, Profile::Minimal | Profile::Unchecked)
    }

    /// The condition text to record for `text` under this profile.
    pub const fn condition_text(self, text: &'static str) -> Option<&'static str> {
        if self.captures_condition() {
            Some(text)
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Verbose => "verbose",
            Profile::Lightweight => "lightweight",
            Profile::Minimal => "minimal",
            Profile::Unchecked => "unchecked",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Profile::Default),
            "verbose" => Ok(Profile::Verbose),
            "lightweight" => Ok(Profile::Lightweight),
            "minimal" => Ok(Profile::Minimal),
            "unchecked" | "unsafe" => Ok(Profile::Unchecked),
            _ => Err(ConfigError::UnknownProfile { name: s.to_string() }),
        }
    }
}
