//! Color types used by palettes and drawing surfaces.

use ratatui::style::Color;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an opacity, producing the equivalent of CSS `rgba(r, g, b, a)`.
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Convert to a Ratatui color.
    pub fn color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// An 8-bit RGB color with a floating point opacity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Drop the opacity.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Same color with a different opacity.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied channels in `0.0..=1.0`, ordered r, g, b, a.
    pub fn premultiplied(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r as f32 / 255.0 * a,
            self.g as f32 / 255.0 * a,
            self.b as f32 / 255.0 * a,
            a,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_keeps_channels() {
        let c = Rgb::new(96, 165, 250).with_alpha(0.5);
        assert_eq!(c.rgb(), Rgb::new(96, 165, 250));
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn test_premultiplied_clamps_alpha() {
        let [r, g, b, a] = Rgb::new(255, 0, 255).with_alpha(1.5).premultiplied();
        assert_eq!((r, g, b, a), (1.0, 0.0, 1.0, 1.0));

        let [r, _, _, a] = Rgb::new(255, 255, 255).with_alpha(0.25).premultiplied();
        assert_eq!(a, 0.25);
        assert!((r - 0.25).abs() < 1e-6);

        assert_eq!(Rgba::TRANSPARENT.premultiplied(), [0.0; 4]);
    }
}
