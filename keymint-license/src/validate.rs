//! License key validation.
//!
//! Validation is a pure recomputation: the claimed identity fully determines
//! the expected key, so no stored state is required. A stored record, when
//! available, contributes only the expiry state.

use crate::activation::activation_code;
use crate::identity::Identity;
use crate::key::derive_license_key;
use crate::record::{LicenseRecord, LicenseStatus};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Outcome of validating a presented license key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the presented key matches the recomputed key.
    pub ok: bool,
    /// Recomputed activation code. Populated only on a match, so a failed
    /// validation leaks nothing derived from the correct key.
    pub activation_code: Option<String>,
    /// Expiry state from a stored record, when one was supplied.
    pub expiry: Option<LicenseStatus>,
}

impl ValidationResult {
    fn mismatch() -> Self {
        Self {
            ok: false,
            activation_code: None,
            expiry: None,
        }
    }
}

/// Validates a presented key against the identity it claims to belong to.
///
/// `stored` supplies the validity window when a matching record exists;
/// validation itself never consults the store. When several stored records
/// match the identity, callers should pass the most recently created one
/// (see [`crate::LicenseStore::latest_for`]).
#[must_use]
pub fn validate(
    identity: &Identity,
    presented_key: &str,
    stored: Option<&LicenseRecord>,
) -> ValidationResult {
    let expected = derive_license_key(identity);
    let presented = presented_key.trim();

    // Constant-time comparison; slices of unequal length compare unequal.
    if !bool::from(expected.as_bytes().ct_eq(presented.as_bytes())) {
        return ValidationResult::mismatch();
    }

    // The identity was validated at construction and the derived key is
    // non-empty, so the activation code always derives.
    let activation_code = activation_code(identity.username(), &expected).ok();
    let expiry = stored
        .filter(|record| record.matches(identity))
        .map(LicenseRecord::status);

    ValidationResult {
        ok: true,
        activation_code,
        expiry,
    }
}
