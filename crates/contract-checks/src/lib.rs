//! Contract checks with a single, link-time bound violation handler.
//!
//! Preconditions, postconditions, and invariants are written with the check
//! macros. When a condition is false the check builds a
//! [`ContractViolation`] and hands it to the one handler the program bound
//! with [`bind_handler!`]. The handler decides the program's fate: abort
//! with a report, abort silently, or unwind with the record as payload.
//!
//! # Modules
//!
//! - [`kind`] -- violation categories and their report descriptions
//! - [`violation`] -- the violation record and report format
//! - [`profile`] -- build-time profiles selecting which checks run
//! - [`handler`] -- reference handlers
//! - [`dispatch`] -- the handler binding
//! - [`check`] -- function forms of the checks

pub mod check;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod kind;
pub mod profile;
pub mod violation;

mod macros;

#[cfg(test)]
mod test_support;

pub use error::ConfigError;
pub use kind::ViolationKind;
pub use profile::{CheckMode, Profile};
pub use violation::{write_report, ContractViolation, Report};
