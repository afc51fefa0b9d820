//! The two named color themes and their fixed palettes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;

/// Color theme for every layer of the backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Switch to the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// The lowercase name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Fixed palette for this theme.
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a theme name is neither "dark" nor "light".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{0}' (expected 'dark' or 'light')")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Colors used by the particle network, the floating shapes and the help bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Particle fill, also used for the particle glow.
    pub particle: Rgb,
    /// Stroke color of the proximity links.
    pub link: Rgb,
    /// Opacity of a link between coincident particles, before the link fade factor.
    pub link_max_opacity: f32,
    /// Three gradient stops (offsets 0, 0.5 and 1) filling each floating shape.
    pub shape_stops: [Rgb; 3],
    /// Page background behind both animation layers.
    pub background: Rgb,
    /// Help bar labels.
    pub muted: Rgb,
    /// Highlighted text such as key hints.
    pub accent: Rgb,
}

/// Palette of the dark theme.
pub static DARK: Palette = Palette {
    particle: Rgb::new(96, 165, 250),
    link: Rgb::new(96, 165, 250),
    link_max_opacity: 1.0,
    shape_stops: [
        Rgb::new(96, 165, 250),
        Rgb::new(168, 85, 247),
        Rgb::new(59, 130, 246),
    ],
    background: Rgb::new(2, 6, 23),
    muted: Rgb::new(148, 163, 184),
    accent: Rgb::new(96, 165, 250),
};

/// Palette of the light theme.
pub static LIGHT: Palette = Palette {
    particle: Rgb::new(59, 130, 246),
    link: Rgb::new(59, 130, 246),
    link_max_opacity: 1.0,
    shape_stops: [
        Rgb::new(59, 130, 246),
        Rgb::new(147, 51, 234),
        Rgb::new(37, 99, 235),
    ],
    background: Rgb::new(249, 250, 251),
    muted: Rgb::new(75, 85, 99),
    accent: Rgb::new(37, 99, 235),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        assert!("solarized".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_palettes_differ_per_theme() {
        assert_eq!(Theme::Dark.palette().particle, Rgb::new(96, 165, 250));
        assert_eq!(Theme::Light.palette().particle, Rgb::new(59, 130, 246));
        assert_ne!(
            Theme::Dark.palette().shape_stops,
            Theme::Light.palette().shape_stops
        );
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(theme.palette().link_max_opacity, 1.0);
        }
    }
}
