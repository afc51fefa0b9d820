//! Compositing rasterized layers into terminal colors.

use folio_core::Rgb;
use ratatui::style::Color;

use crate::surface::Pixel;

/// Composite premultiplied layers, bottom first, over an opaque background.
pub fn composite(background: Rgb, layers: &[Pixel]) -> Rgb {
    let mut out = [
        background.r as f32 / 255.0,
        background.g as f32 / 255.0,
        background.b as f32 / 255.0,
    ];
    for layer in layers {
        let keep = 1.0 - layer[3].clamp(0.0, 1.0);
        for (channel, src) in out.iter_mut().zip(layer) {
            *channel = src + *channel * keep;
        }
    }
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(to_u8(out[0]), to_u8(out[1]), to_u8(out[2]))
}

/// Composite and convert to a Ratatui color.
pub fn composite_color(background: Rgb, layers: &[Pixel]) -> Color {
    composite(background, layers).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_layers_is_background() {
        let bg = Rgb::new(2, 6, 23);
        assert_eq!(composite(bg, &[]), bg);
        assert_eq!(composite(bg, &[[0.0; 4]]), bg);
    }

    #[test]
    fn test_opaque_layer_wins() {
        let bg = Rgb::new(2, 6, 23);
        assert_eq!(composite(bg, &[[1.0, 0.0, 0.0, 1.0]]), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_layers_stack_in_order() {
        let bg = Rgb::new(0, 0, 0);
        let red = [1.0, 0.0, 0.0, 1.0];
        let half_blue = [0.0, 0.0, 0.5, 0.5];
        assert_eq!(composite(bg, &[red, half_blue]), Rgb::new(128, 0, 128));
        assert_eq!(composite(bg, &[half_blue, red]), Rgb::new(255, 0, 0));
    }
}
