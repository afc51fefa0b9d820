//! Configuration for the folio backdrop.
//!
//! Settings live in `config.toml` under the platform config directory.
//! Every field is optional; a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use folio_core::Theme;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Log file name inside the cache directory.
pub const LOG_FILE: &str = "folio.log";

/// Default particle population.
pub const DEFAULT_PARTICLE_COUNT: usize = 150;

/// Default floating shape population.
pub const DEFAULT_SHAPE_COUNT: usize = 10;

/// Upper bound on the particle population. Linking every pair is quadratic,
/// so larger populations no longer fit in a frame.
pub const MAX_PARTICLE_COUNT: usize = 1000;

/// Upper bound on the floating shape population.
pub const MAX_SHAPE_COUNT: usize = 100;

/// Frame rate bounds.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme applied at startup.
    pub theme: Theme,
    /// Target frame rate of both animation loops.
    pub fps: u32,
    /// Number of particles in the network layer.
    pub particle_count: usize,
    /// Number of floating shapes in the hero layer.
    pub shape_count: usize,
    /// Seed for entity placement. Time derived when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Logical pixels per terminal column. Rows are twice as tall.
    pub cell_px: f32,
    /// Draw the particle network layer.
    pub show_particles: bool,
    /// Draw the floating shape layer.
    pub show_shapes: bool,
    /// Where log output goes. Defaults to the cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            fps: 60,
            particle_count: DEFAULT_PARTICLE_COUNT,
            shape_count: DEFAULT_SHAPE_COUNT,
            seed: None,
            cell_px: 8.0,
            show_particles: true,
            show_shapes: true,
            log_file: None,
        }
    }
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "folio")
    }

    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Default location of the log file, if the platform has a cache dir.
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.cache_dir().join(LOG_FILE))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validated()
    }

    /// Check field ranges, clamping the frame rate into bounds.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !(self.cell_px.is_finite() && self.cell_px > 0.0) {
            return Err(ConfigError::Invalid {
                field: "cell_px",
                reason: format!("must be a positive number, got {}", self.cell_px),
            });
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::Invalid {
                field: "particle_count",
                reason: format!("at most {MAX_PARTICLE_COUNT}, got {}", self.particle_count),
            });
        }
        if self.shape_count > MAX_SHAPE_COUNT {
            return Err(ConfigError::Invalid {
                field: "shape_count",
                reason: format!("at most {MAX_SHAPE_COUNT}, got {}", self.shape_count),
            });
        }
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        Ok(self)
    }

    /// Render as TOML, as it would appear in a config file.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
