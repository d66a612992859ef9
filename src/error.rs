//! Error types for setguard

use crate::config::Namespace;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for setguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for setguard
///
/// Rejected restore values are never reported through this type. A value
/// that fails its validator is a [`Diagnostic`](crate::Diagnostic), not an
/// error.
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Registry Construction Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate validator for '{key}' in {namespace} settings")]
    DuplicateValidator { namespace: Namespace, key: String },

    #[error("Invalid validator definition for {key}: {reason}")]
    InvalidValidatorDefinition { key: String, reason: String },

    #[error("Registry for {found} settings cannot be used as {expected} registry")]
    NamespaceMismatch {
        expected: Namespace,
        found: Namespace,
    },

    // -------------------------------------------------------------------------
    // Completeness Errors
    // -------------------------------------------------------------------------
    #[error(
        "All {namespace} settings that are backed up have to have a validator, but those don't: {}",
        .offenders.join(" ")
    )]
    MissingValidators {
        namespace: Namespace,
        offenders: Vec<String>,
    },

    // -------------------------------------------------------------------------
    // Definition Loading Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse definitions: {0}")]
    Parse(String),

    #[error("Unsupported definition format: {0}")]
    UnsupportedFormat(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Settings store rejected restored value: {0}")]
    Sink(String),
}

impl Error {
    /// Check if this error comes from building a registry
    #[must_use]
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateValidator { .. }
                | Error::InvalidValidatorDefinition { .. }
                | Error::NamespaceMismatch { .. }
        )
    }

    /// Check if this error comes from reading a definition file
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. }
                | Error::Serialize(_)
                | Error::Parse(_)
                | Error::UnsupportedFormat(_)
        )
    }
}
