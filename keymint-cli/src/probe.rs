//! PATH and known-directory installation probe.
//!
//! Cross-platform stand-in for platform-specific install probing: looks for
//! the product executable in a caller-supplied list of install directories,
//! then on `PATH`. Read-only; never touches the store.

use keymint_license::{DetectedInstall, Edition, InstallProbe};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Probes for an installed product by executable name.
pub struct PathProbe {
    executable: String,
    known_dirs: Vec<PathBuf>,
}

impl PathProbe {
    /// Creates a probe looking for the given executable name.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            known_dirs: Vec::new(),
        }
    }

    /// Sets install directories to check before falling back to `PATH`.
    #[must_use]
    pub fn with_known_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.known_dirs = dirs;
        self
    }

    fn probe_known_dirs(&self) -> Option<DetectedInstall> {
        self.known_dirs
            .iter()
            .find(|dir| dir.join(&self.executable).is_file())
            .map(|dir| describe(dir, "known_paths"))
    }

    fn probe_path_env(&self) -> Option<DetectedInstall> {
        let path = env::var_os("PATH")?;
        env::split_paths(&path)
            .find(|dir| dir.join(&self.executable).is_file())
            .map(|dir| describe(&dir, "environment"))
    }
}

impl InstallProbe for PathProbe {
    fn detect(&self) -> Option<DetectedInstall> {
        self.probe_known_dirs().or_else(|| self.probe_path_env())
    }
}

fn describe(dir: &Path, method: &str) -> DetectedInstall {
    DetectedInstall {
        version: read_version(dir).unwrap_or_else(|| "unknown".to_string()),
        edition: guess_edition(dir),
        install_path: dir.to_path_buf(),
        method: method.to_string(),
    }
}

/// Reads a sibling `VERSION` file, the portable analog of executable
/// version metadata.
fn read_version(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join("VERSION"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Home installs conventionally live under a directory naming the edition;
/// anything else is assumed professional.
fn guess_edition(dir: &Path) -> Edition {
    if dir.to_string_lossy().to_ascii_lowercase().contains("home") {
        Edition::Home
    } else {
        Edition::Professional
    }
}
