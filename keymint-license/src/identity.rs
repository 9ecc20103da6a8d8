//! Identity attributes a license is derived from.
//!
//! Construction is the validation boundary: a constructed [`Identity`] is
//! always safe to derive from, so derivation itself never fails.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The product edition a license targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Free home edition.
    Home,
    /// Paid professional edition.
    Professional,
}

impl Edition {
    /// Returns the stable tag used in key derivation and display.
    ///
    /// Changing a tag changes every key derived for that edition, so tags
    /// are part of the derivation contract.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Professional => "professional",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Validated identity attributes: username, product version, edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    username: String,
    version: String,
    edition: Edition,
}

impl Identity {
    /// Builds an identity, trimming the username and version.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidIdentity`] if the username is empty
    /// after trimming or the version is not dotted numeric (e.g. `22.0`).
    pub fn new(username: &str, version: &str, edition: Edition) -> LicenseResult<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LicenseError::InvalidIdentity(
                "username must not be empty".to_string(),
            ));
        }

        let version = version.trim();
        if !is_dotted_numeric(version) {
            return Err(LicenseError::InvalidIdentity(format!(
                "version must be dotted numeric (e.g. 22.0), got {version:?}"
            )));
        }

        Ok(Self {
            username: username.to_string(),
            version: version.to_string(),
            edition,
        })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the product version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the edition.
    #[must_use]
    pub fn edition(&self) -> Edition {
        self.edition
    }
}

/// One or more digit runs separated by single dots: `22`, `22.0`, `1.2.3`.
fn is_dotted_numeric(s: &str) -> bool {
    !s.is_empty()
        && s.split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
