//! Error types for the fallible configuration surfaces.
//!
//! Contract violations are never reported through these; they go to the
//! bound handler. [`ConfigError`] only covers parsing profile and kind names
//! supplied by build scripts, harnesses, or command lines.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A profile name that is not one of the known build profiles.
    #[error("unknown contract profile: '{name}'")]
    UnknownProfile { name: String },

    /// A kind that is neither a predefined name nor an integer.
    #[error("unknown violation kind: '{name}'")]
    UnknownKind { name: String },
}
