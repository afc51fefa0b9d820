//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use folio_config::{Config, ConfigError};
use folio_core::Theme;

/// Animated portfolio backdrop for the terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Read settings from this file instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with this theme (dark or light).
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Seed entity placement for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frame rate.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Hide the particle network layer.
    #[arg(long)]
    pub no_particles: bool,

    /// Hide the floating shape layer.
    #[arg(long)]
    pub no_shapes: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Load the config file and apply overrides.
    ///
    /// An explicit `--config` must load. Problems with the default file are
    /// returned alongside the defaults so the caller can report them.
    pub fn load_config(&self) -> Result<(Config, Option<ConfigError>), ConfigError> {
        let (config, warning) = match &self.config {
            Some(path) => (Config::load_from(path)?, None),
            None => match Config::load() {
                Ok(config) => (config, None),
                Err(e) => (Config::default(), Some(e)),
            },
        };
        Ok((self.apply(config)?, warning))
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.no_particles {
            config.show_particles = false;
        }
        if self.no_shapes {
            config.show_shapes = false;
        }
        config.validated()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "folio",
            "--theme",
            "light",
            "--seed",
            "5",
            "--fps",
            "500",
            "--no-shapes",
        ])
        .unwrap();
        let config = args.apply(Config::default()).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.fps, folio_config::MAX_FPS);
        assert!(!config.show_shapes);
        assert!(config.show_particles);
    }

    #[test]
    fn test_bad_theme_is_rejected() {
        assert!(Args::try_parse_from(["folio", "--theme", "neon"]).is_err());
    }

    #[test]
    fn test_explicit_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"light\"\nshape_count = 4").unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        let (config, warning) = args.load_config().unwrap();
        assert!(warning.is_none());
        assert_eq!(config.shape_count, 4);
        // The flag beats the file.
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_missing_explicit_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            config: Some(dir.path().join("missing.toml")),
            ..Default::default()
        };
        assert!(args.load_config().is_err());
    }
}
