//! Detection probe interface.
//!
//! The keygen consumes `{installed version, edition}` from whatever probe
//! the caller wires in; the probing itself (registry lookups, known install
//! paths, PATH scanning) lives outside this crate. Probes must be read-only
//! and side-effect-free.

use crate::identity::Edition;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a probe found out about the installed target application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedInstall {
    /// Installed product version, when determinable.
    pub version: String,
    /// Detected edition.
    pub edition: Edition,
    /// Where the installation lives.
    pub install_path: PathBuf,
    /// Human-readable detection method, for diagnostics.
    pub method: String,
}

/// A read-only probe for an installed target application.
pub trait InstallProbe {
    /// Returns the detected installation, or `None` when the product was
    /// not found. Must not mutate any state.
    fn detect(&self) -> Option<DetectedInstall>;
}
