// src/error.rs

//! Error types for configuration resolution
//!
//! Every failure is deterministic: either bad input (a version string or
//! selection the caller can fix) or an inconsistent declaration (a bug in
//! the package definition, fatal to registration). There are no transient
//! conditions and no retries.

use thiserror::Error;

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during declaration or resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A version string could not be decomposed into comparable components
    #[error("Malformed version '{input}': {reason}")]
    MalformedVersion { input: String, reason: String },

    /// Variant metadata is inconsistent at declaration time
    #[error("Invalid declaration for variant '{variant}': {reason}")]
    InvalidVariantDeclaration { variant: String, reason: String },

    /// A selection or condition references a variant that was never declared
    #[error("Unknown variant '{0}'")]
    UnknownVariant(String),

    /// A selection supplies a value outside a variant's legal set
    #[error("Illegal value '{value}' for variant '{variant}' (allowed: {allowed})")]
    IllegalVariantValue {
        variant: String,
        value: String,
        allowed: String,
    },

    /// Two fired dependency clauses disagree on one dependency's spec
    #[error("Conflicting specs for dependency '{dependency}': '{first}' vs '{second}'")]
    ConflictingDependencyConstraints {
        dependency: String,
        first: String,
        second: String,
    },

    /// Definition, condition, or constraint text that does not parse
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to read a definition file
    #[error("I/O error: {0}")]
    IoError(String),
}
