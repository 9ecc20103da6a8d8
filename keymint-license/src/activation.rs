//! Activation code generation.
//!
//! The activation code is a secondary proof binding a license key to a
//! username: SHA-256 over `username:license_key`, first 16 hex digits
//! upper-cased.

use crate::error::{LicenseError, LicenseResult};
use sha2::{Digest, Sha256};

/// Activation code length in hex digits.
pub const ACTIVATION_CODE_LEN: usize = 16;

/// Derives the activation code for a username and license key.
///
/// Deterministic and pure; stable across calls with the same arguments.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidInput`] if either argument is empty after
/// trimming.
pub fn activation_code(username: &str, license_key: &str) -> LicenseResult<String> {
    let username = username.trim();
    let license_key = license_key.trim();

    if username.is_empty() {
        return Err(LicenseError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }
    if license_key.is_empty() {
        return Err(LicenseError::InvalidInput(
            "license key must not be empty".to_string(),
        ));
    }

    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(license_key.as_bytes());
    let digest = hasher.finalize();

    Ok(hex::encode(&digest[..ACTIVATION_CODE_LEN / 2]).to_uppercase())
}
