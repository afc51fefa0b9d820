//! Drawing surfaces.
//!
//! A [`Surface`] offers the small slice of a 2D canvas API the animations
//! need. Fill, stroke and shadow settings are sticky: they stay in effect
//! until the next setter call, a [`Surface::restore`], or a resize.

mod raster;
mod record;
mod transform;

use folio_core::{Rgba, Viewport};

pub use raster::{Pixel, PixelSurface};
pub use record::{DrawCommand, DrawList};
pub use transform::Transform;

/// A 2D drawing surface.
pub trait Surface {
    /// Logical size of the surface.
    fn viewport(&self) -> Viewport;
    /// Change the size in place. Clears the contents and resets all state.
    fn resize(&mut self, viewport: Viewport);
    /// Clear the whole surface to transparent.
    fn clear(&mut self);
    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, color: Rgba, line_width: f32);
    fn set_shadow(&mut self, blur: f32, color: Rgba);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32);
    /// Push the current state (transform, fill, stroke, shadow).
    fn save(&mut self);
    /// Pop the last saved state. Does nothing when the stack is empty.
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, radians: f32);
}

/// How a filled area is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Rgba::TRANSPARENT.with_alpha(1.0))
    }
}

impl Paint {
    /// Premultiplied color of the paint at a point in user space.
    pub fn sample(&self, x: f32, y: f32) -> [f32; 4] {
        match self {
            Paint::Solid(color) => color.premultiplied(),
            Paint::Linear(gradient) => gradient.sample(x, y),
        }
    }

    /// Highest opacity the paint reaches anywhere.
    pub fn max_alpha(&self) -> f32 {
        match self {
            Paint::Solid(color) => color.a.clamp(0.0, 1.0),
            Paint::Linear(gradient) => gradient
                .stops
                .iter()
                .map(|stop| stop.color.a.clamp(0.0, 1.0))
                .fold(0.0, f32::max),
        }
    }
}

/// A color at a position along a gradient, with `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Linear gradient between two points in the user space active at fill time.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            start: (x0, y0),
            end: (x1, y1),
            stops: Vec::new(),
        }
    }

    /// Add a stop. Stops must be added in increasing offset order.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }

    /// Premultiplied color at a point. A zero-length gradient paints nothing.
    pub fn sample(&self, x: f32, y: f32) -> [f32; 4] {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let len_sq = dx * dx + dy * dy;
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0; 4];
        };
        if len_sq == 0.0 {
            return [0.0; 4];
        }

        let t = (((x - self.start.0) * dx + (y - self.start.1) * dy) / len_sq).clamp(0.0, 1.0);
        if t <= first.offset {
            return first.color.premultiplied();
        }
        if t >= last.offset {
            return last.color.premultiplied();
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                let k = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
                let (a, b) = (lo.color.premultiplied(), hi.color.premultiplied());
                return std::array::from_fn(|i| a[i] + (b[i] - a[i]) * k);
            }
        }
        last.color.premultiplied()
    }
}

/// Soft glow drawn beneath every fill and stroke while active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Rgba,
}

impl Shadow {
    pub const NONE: Shadow = Shadow {
        blur: 0.0,
        color: Rgba::TRANSPARENT,
    };

    /// True when drawing the shadow would change any pixel.
    pub fn is_visible(&self) -> bool {
        self.blur > 0.0 && self.color.a > 0.0
    }
}

/// Everything `save`/`restore` captures.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrawState {
    pub transform: Transform,
    pub fill: Paint,
    pub stroke: Rgba,
    pub line_width: f32,
    pub shadow: Shadow,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            fill: Paint::default(),
            stroke: Rgba::TRANSPARENT.with_alpha(1.0),
            line_width: 1.0,
            shadow: Shadow::NONE,
        }
    }
}

/// Current drawing state plus the saved stack.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.current.transform = self.current.transform.translated(dx, dy);
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current.transform = self.current.transform.rotated(radians);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
mod tests {
    use folio_core::Rgb;

    use super::*;

    fn gradient() -> LinearGradient {
        LinearGradient::new(0.0, 0.0, 10.0, 0.0)
            .with_stop(0.0, Rgb::new(255, 0, 0).with_alpha(1.0))
            .with_stop(0.5, Rgb::new(0, 255, 0).with_alpha(1.0))
            .with_stop(1.0, Rgb::new(0, 0, 255).with_alpha(1.0))
    }

    #[test]
    fn test_gradient_hits_stops() {
        let g = gradient();
        assert_eq!(g.sample(0.0, 3.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.sample(5.0, -2.0), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(g.sample(10.0, 0.0), [0.0, 0.0, 1.0, 1.0]);
        // Clamped past either end.
        assert_eq!(g.sample(-4.0, 0.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(g.sample(40.0, 0.0), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_gradient_interpolates_between_stops() {
        let [r, g, b, a] = gradient().sample(2.5, 0.0);
        assert!((r - 0.5).abs() < 1e-6);
        assert!((g - 0.5).abs() < 1e-6);
        assert_eq!(b, 0.0);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_degenerate_gradient_is_transparent() {
        let g = LinearGradient::new(1.0, 1.0, 1.0, 1.0)
            .with_stop(0.0, Rgb::new(255, 255, 255).with_alpha(1.0));
        assert_eq!(g.sample(1.0, 1.0), [0.0; 4]);
        assert_eq!(LinearGradient::new(0.0, 0.0, 1.0, 0.0).sample(0.5, 0.0), [0.0; 4]);
    }

    #[test]
    fn test_max_alpha() {
        let faint = LinearGradient::new(0.0, 0.0, 1.0, 0.0)
            .with_stop(0.0, Rgb::new(255, 0, 0).with_alpha(0.05))
            .with_stop(1.0, Rgb::new(0, 0, 255).with_alpha(0.15));
        assert_eq!(Paint::Linear(faint).max_alpha(), 0.15);
        assert_eq!(Paint::Solid(Rgb::new(1, 2, 3).with_alpha(2.0)).max_alpha(), 1.0);
        assert_eq!(Paint::Linear(LinearGradient::new(0.0, 0.0, 1.0, 0.0)).max_alpha(), 0.0);
    }

    #[test]
    fn test_state_stack_restore() {
        let mut stack = StateStack::default();
        stack.save();
        stack.translate(5.0, 5.0);
        stack.current_mut().line_width = 3.0;
        assert_eq!(stack.depth(), 1);

        stack.restore();
        assert_eq!(stack.current().transform, Transform::IDENTITY);
        assert_eq!(stack.current().line_width, 1.0);

        // Unbalanced restore is ignored.
        stack.restore();
        assert_eq!(stack.depth(), 0);
    }
}
