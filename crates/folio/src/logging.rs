//! Log output. The terminal belongs to the UI, so records go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use env_logger::{Env, Target};
use folio_config::Config;

/// Where log records should be written, if anywhere.
pub fn log_path(config: &Config) -> Option<PathBuf> {
    config.log_file.clone().or_else(Config::default_log_path)
}

/// Install the global logger. Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init(config: &Config) -> color_eyre::Result<Option<PathBuf>> {
    let Some(path) = log_path(config) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("installing logger")?;
    Ok(Some(path))
}
