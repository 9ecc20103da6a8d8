//! License records and their lifecycle.
//!
//! A record is created only by issuance, never mutated in place (re-issuing
//! for the same identity creates a sibling record), and destroyed only by
//! removal from the store.

use crate::activation::activation_code;
use crate::error::LicenseResult;
use crate::identity::{Edition, Identity};
use crate::key::derive_license_key;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validity horizon: ten years from creation, fixed at issue time.
pub const VALIDITY_HORIZON_DAYS: i64 = 3650;

/// The computed status of a record at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    /// Within the validity horizon.
    Valid,
    /// Past the validity horizon.
    Expired,
    /// Reserved. Removal deletes records instead of flagging them, so this
    /// status is never computed from stored state.
    Revoked,
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        })
    }
}

/// A generated license: key, activation code, and validity window.
///
/// Status is intentionally not a field. It is computed from `expires_at` at
/// read time, so a stored record can never go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Username the license was issued to. Partition key within the store;
    /// one username may own multiple records.
    pub username: String,
    /// Product version the key was derived for.
    pub version: String,
    /// Product edition the key was derived for.
    pub edition: Edition,
    /// Canonical derived key, dash-grouped for display.
    pub license_key: String,
    /// 16 uppercase hex characters binding the key to the username.
    pub activation_code: String,
    /// When the record was issued.
    pub created_at: DateTime<Utc>,
    /// `created_at` plus the validity horizon. Never recomputed.
    pub expires_at: DateTime<Utc>,
}

impl LicenseRecord {
    /// Issues a new record for an identity: derives the license key and
    /// activation code and stamps the validity window.
    ///
    /// # Errors
    ///
    /// Propagates activation-code derivation failures; these cannot occur
    /// for a constructed [`Identity`], but the signature keeps the invariant
    /// explicit rather than panicking.
    pub fn issue(identity: &Identity) -> LicenseResult<Self> {
        Self::issue_at(identity, Utc::now())
    }

    /// Issues a record with an explicit creation instant.
    pub fn issue_at(identity: &Identity, created_at: DateTime<Utc>) -> LicenseResult<Self> {
        let license_key = derive_license_key(identity);
        let activation_code = activation_code(identity.username(), &license_key)?;

        Ok(Self {
            username: identity.username().to_string(),
            version: identity.version().to_string(),
            edition: identity.edition(),
            license_key,
            activation_code,
            created_at,
            expires_at: created_at + Duration::days(VALIDITY_HORIZON_DAYS),
        })
    }

    /// Returns the status as of now.
    #[must_use]
    pub fn status(&self) -> LicenseStatus {
        self.status_at(Utc::now())
    }

    /// Returns the status at a given instant: `Valid` strictly before
    /// `expires_at`, `Expired` from that exact instant on.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> LicenseStatus {
        if now < self.expires_at {
            LicenseStatus::Valid
        } else {
            LicenseStatus::Expired
        }
    }

    /// Returns true if this record was issued for the given identity.
    #[must_use]
    pub fn matches(&self, identity: &Identity) -> bool {
        self.username == identity.username()
            && self.version == identity.version()
            && self.edition == identity.edition()
    }
}
