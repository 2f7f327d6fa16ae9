//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout pzod. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Per-field and per-model anomalies never surface here: the compiler
//!   degrades them to valid output.
//! - Configuration errors carry the offending key, the rejected value, and
//!   the accepted values. They abort a run before anything is emitted.
//! - Datamodel errors wrap the underlying deserialization failure.

use thiserror::Error;

/// Top-level error type for pzod.
#[derive(Error, Debug)]
pub enum PzodError {
    /// The generator configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The datamodel document could not be read.
    #[error("invalid datamodel: {0}")]
    Datamodel(#[from] DatamodelError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised while validating the raw generator configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A key carried a value outside its accepted set.
    #[error("{key}: expected {expected}, got {value:?}")]
    InvalidValue {
        /// The configuration key.
        key: String,
        /// The rejected raw value.
        value: String,
        /// Human-readable description of the accepted values.
        expected: &'static str,
    },
}

/// Error raised while decoding a DMMF datamodel document.
#[derive(Error, Debug)]
pub enum DatamodelError {
    /// The document is not valid DMMF JSON.
    #[error("failed to parse datamodel: {0}")]
    Parse(#[from] serde_json::Error),
}
