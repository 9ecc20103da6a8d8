//! License key derivation.
//!
//! A license key is a pure function of the identity attributes:
//!
//! 1. Seed: `username`, `version`, and the edition tag joined with `:`.
//! 2. PBKDF2-HMAC-SHA256 over the seed with a constant application-label
//!    salt, 100 000 rounds, 32-byte output.
//! 3. Standard base64 (padding kept as literal characters), regrouped into
//!    4-character segments joined by `-`.
//!
//! There is no random or time-varying component, so a key derived today
//! validates forever.

use crate::identity::Identity;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Constant salt identifying this product's keyspace. Distinguishes keymint
/// keys from any other use of the same primitive.
const KEY_SALT: &[u8] = b"keymint/license/v1";

/// PBKDF2 round count. Slow by design.
const PBKDF2_ROUNDS: u32 = 100_000;

/// Raw derived key length in bytes (44 base64 characters, 11 display groups).
const KEY_LEN: usize = 32;

/// Display group width.
const GROUP_LEN: usize = 4;

/// Derives the canonical license key for an identity.
///
/// Total and deterministic: [`Identity`] construction already rejected
/// malformed input, so derivation itself cannot fail.
#[must_use]
pub fn derive_license_key(identity: &Identity) -> String {
    let seed = format!(
        "{}:{}:{}",
        identity.username(),
        identity.version(),
        identity.edition().tag()
    );

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(seed.as_bytes(), KEY_SALT, PBKDF2_ROUNDS, &mut key);

    group(&BASE64.encode(key))
}

/// Regroups a character stream into dash-joined fixed-width segments.
fn group(s: &str) -> String {
    s.as_bytes()
        .chunks(GROUP_LEN)
        .map(|chunk| std::str::from_utf8(chunk).expect("base64 output is ASCII"))
        .collect::<Vec<_>>()
        .join("-")
}
