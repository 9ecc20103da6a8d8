//! keymint CLI - generate and manage deterministic license keys.
//!
//! Subcommands form a closed set dispatched by an explicit match: generate,
//! validate, activate, list, remove, detect. All rendering (text block or
//! JSON) and store-path resolution live here; the `keymint-license` crate
//! owns the algorithmic core.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use keymint_license::{
    Edition, Identity, InstallProbe, LicenseRecord, LicenseStatus, LicenseStore, StorageLocation,
    activation_code, validate,
};
use serde::Serialize;

mod probe;

use probe::PathProbe;

/// keymint - deterministic license key generation and management
#[derive(Parser)]
#[command(name = "keymint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the license store file (defaults to the user data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a license key and persist the record
    Generate {
        /// Username the license is issued to
        #[arg(long)]
        username: String,
        /// Product version (dotted numeric)
        #[arg(long, default_value = "22.0")]
        version: String,
        /// Product edition
        #[arg(long, value_enum, default_value_t = EditionArg::Professional)]
        edition: EditionArg,
        /// Write the rendered output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Emit JSON instead of a text block
        #[arg(long)]
        json: bool,
    },
    /// Validate a license key against the identity it claims
    Validate {
        /// Username the key was issued to
        #[arg(long)]
        username: String,
        /// Product version the key was derived for
        #[arg(long, default_value = "22.0")]
        version: String,
        /// Product edition the key was derived for
        #[arg(long, value_enum, default_value_t = EditionArg::Professional)]
        edition: EditionArg,
        /// License key to validate
        #[arg(long)]
        license_key: String,
    },
    /// Derive the activation code for a username and license key
    Activate {
        /// Username bound to the license
        #[arg(long)]
        username: String,
        /// License key the code is derived from
        #[arg(long)]
        license_key: String,
    },
    /// List stored license records
    List {
        /// Filter by username
        #[arg(long)]
        username: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Remove stored license records
    Remove {
        /// Username whose records are removed
        #[arg(long)]
        username: String,
        /// Narrow to a specific version
        #[arg(long)]
        version: Option<String>,
        /// Narrow to a specific edition
        #[arg(long, value_enum)]
        edition: Option<EditionArg>,
    },
    /// Detect an installed target application
    Detect {
        /// Executable name to look for
        #[arg(long)]
        executable: String,
        /// Install directories to check before scanning PATH
        #[arg(long = "dir")]
        dirs: Vec<PathBuf>,
    },
}

/// CLI-side mirror of [`Edition`] so the core crate stays clap-free.
#[derive(Clone, Copy, ValueEnum)]
enum EditionArg {
    Home,
    Professional,
}

impl From<EditionArg> for Edition {
    fn from(arg: EditionArg) -> Self {
        match arg {
            EditionArg::Home => Edition::Home,
            EditionArg::Professional => Edition::Professional,
        }
    }
}

/// Record plus its read-time status, for JSON output.
#[derive(Serialize)]
struct RecordView<'a> {
    #[serde(flatten)]
    record: &'a LicenseRecord,
    status: LicenseStatus,
}

impl<'a> From<&'a LicenseRecord> for RecordView<'a> {
    fn from(record: &'a LicenseRecord) -> Self {
        Self {
            record,
            status: record.status(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let path = store_path(cli.store)?;
    tracing::debug!(store = %path.display(), "using license store");
    let store = LicenseStore::open(StorageLocation::new(path));

    match cli.command {
        Commands::Generate {
            username,
            version,
            edition,
            output,
            json,
        } => {
            let identity = Identity::new(&username, &version, edition.into())?;
            let record = LicenseRecord::issue(&identity)?;
            store.add(&record)?;

            let rendered = if json {
                serde_json::to_string_pretty(&RecordView::from(&record))?
            } else {
                render_record(&record)
            };
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("license information saved to {}", path.display());
                }
                None => println!("{rendered}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            username,
            version,
            edition,
            license_key,
        } => {
            let identity = Identity::new(&username, &version, edition.into())?;
            let stored = store.latest_for(&identity)?;
            let result = validate(&identity, &license_key, stored.as_ref());

            if result.ok {
                println!("license key is valid for {username}");
                if let Some(code) = &result.activation_code {
                    println!("  Activation Code: {code}");
                }
                if let Some(status) = result.expiry {
                    println!("  Status: {status}");
                }
                Ok(ExitCode::SUCCESS)
            } else {
                // A mismatch is an outcome, not an error; signal via exit code.
                println!("license key is INVALID for {username}");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Activate {
            username,
            license_key,
        } => {
            let code = activation_code(&username, &license_key)?;
            println!("  Username: {username}");
            println!("  Activation Code: {code}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { username, json } => {
            let records = store.list(username.as_deref())?;
            if json {
                let views: Vec<RecordView<'_>> = records.iter().map(RecordView::from).collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else if records.is_empty() {
                println!("no saved licenses found");
            } else {
                println!("found {} saved license(s):", records.len());
                for record in &records {
                    println!("{}", render_record(record));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Remove {
            username,
            version,
            edition,
        } => {
            let removed = store.remove(&username, version.as_deref(), edition.map(Into::into))?;
            if removed == 0 {
                println!("no license found for username: {username}");
            } else {
                println!("removed {removed} license(s) for username: {username}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Detect { executable, dirs } => {
            let probe = PathProbe::new(executable).with_known_dirs(dirs);
            match probe.detect() {
                Some(install) => {
                    println!("found installation");
                    println!("  Install Path: {}", install.install_path.display());
                    println!("  Version: {}", install.version);
                    println!("  Edition: {}", install.edition);
                    println!("  Detection Method: {}", install.method);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    println!("no installation found");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Resolves the store path: explicit flag, else `<data dir>/keymint/licenses.json`.
fn store_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let data =
        dirs::data_dir().context("could not resolve the user data directory; pass --store")?;
    Ok(data.join("keymint").join("licenses.json"))
}

/// Renders a record as the text block shown after generation.
fn render_record(record: &LicenseRecord) -> String {
    let sep = "=".repeat(60);
    format!(
        "{sep}\n\
         License Information\n\
         {sep}\n\
         Username: {}\n\
         Version: {}\n\
         Edition: {}\n\
         Status: {}\n\
         Created: {}\n\
         Expires: {}\n\
         \n\
         License Key:\n\
         {}\n\
         \n\
         Activation Code:\n\
         {}\n\
         {sep}",
        record.username,
        record.version,
        record.edition,
        record.status(),
        record.created_at.to_rfc3339(),
        record.expires_at.to_rfc3339(),
        record.license_key,
        record.activation_code,
    )
}
