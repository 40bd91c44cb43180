//! File logging.
//!
//! The terminal belongs to the rain, so log output goes to a file and only
//! when `RUST_LOG` asks for it.

use std::fs::{self, File};

use color_eyre::eyre::{Result, WrapErr, eyre};
use env_logger::{Builder, Target};

/// Log file name inside the local data directory.
const LOG_FILE: &str = "glyphfall.log";

/// Install the logger if `RUST_LOG` is set.
pub fn init() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let dirs = glyphfall_config::project_dirs()
        .ok_or_else(|| eyre!("could not determine a data directory for the log file"))?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file =
        File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("logger already installed")?;

    log::info!("logging to {}", path.display());
    Ok(())
}
