//! CLI configuration handling.

use std::path::{Path, PathBuf};

use tblsgen_tbls::TblsConfig;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Default config file name (lives in project root)
pub const CONFIG_FILE_NAME: &str = "tblsgen.toml";

/// Load the configuration.
///
/// An explicit path must exist. Without one, `tblsgen.toml` in the working
/// directory is used when present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>) -> CliResult<TblsConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = std::env::current_dir()?.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                debug!("no {CONFIG_FILE_NAME} found, using defaults");
                return Ok(TblsConfig::default());
            }
            candidate
        }
    };

    debug!(path = %path.display(), "loading configuration");
    Ok(TblsConfig::from_file(&path)?)
}

/// Resolve a path from the command line or the configuration.
pub fn resolve_path(arg: Option<PathBuf>, configured: &str) -> PathBuf {
    arg.unwrap_or_else(|| PathBuf::from(configured))
}
