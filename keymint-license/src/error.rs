//! Error types for the licensing core.

use thiserror::Error;

/// Licensing-specific errors.
///
/// A key mismatch is deliberately not represented here: validation returns a
/// negative [`crate::ValidationResult`] so callers branch on the outcome
/// instead of catching errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Username or product version failed validation.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// An activation-code argument was empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The store file could not be read, written, or parsed.
    #[error("license store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
