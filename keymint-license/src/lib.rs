//! License key derivation, validation, and lifecycle store for keymint.
//!
//! This crate is the algorithmic core of the keymint key-generation tool:
//! - Deterministic license key derivation (PBKDF2-HMAC-SHA256 over identity attributes)
//! - Activation codes binding a license key to a username
//! - Tamper-rejecting validation by pure recomputation
//! - A JSON-backed multi-record store with add/list/remove semantics
//!
//! # Design Principles
//!
//! - **Determinism**: a license key is a pure function of
//!   `(username, version, edition)` plus a constant application label.
//!   What the engine derives, it validates, forever.
//! - **Validation without state**: the validator recomputes the expected key
//!   rather than looking it up; a stored record only contributes expiry state.
//! - **Append-only lifecycle**: records are created by generation, never
//!   mutated in place, and destroyed only by removal.
//!
//! # License Key Format
//!
//! 32 bytes of PBKDF2 output, standard base64 (the `+`/`/` alphabet, `=`
//! padding kept as literal characters), regrouped into 4-character segments
//! joined by `-`: 44 base64 characters, 11 display groups.

mod activation;
mod error;
mod identity;
mod key;
mod probe;
mod record;
mod store;
mod validate;

pub use activation::{ACTIVATION_CODE_LEN, activation_code};
pub use error::{LicenseError, LicenseResult};
pub use identity::{Edition, Identity};
pub use key::derive_license_key;
pub use probe::{DetectedInstall, InstallProbe};
pub use record::{LicenseRecord, LicenseStatus, VALIDITY_HORIZON_DAYS};
pub use store::{LicenseStore, StorageLocation};
pub use validate::{ValidationResult, validate};
