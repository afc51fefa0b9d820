//! Floating shapes animation (stateful).

use std::f32::consts::TAU;

use fastrand::Rng;
use folio_core::{Theme, Viewport};

use super::wrap;
use crate::driver::Scene;
use crate::surface::{LinearGradient, Paint, Surface};

/// Population created on every mount and theme change.
pub const SHAPE_COUNT: usize = 10;

/// Outline of a floating shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
}

/// State for a single floating shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingShape {
    pub x: f32,
    pub y: f32,
    /// Diameter of a circle, side length of a square.
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    /// Current rotation in radians.
    pub rotation: f32,
    /// Radians added to the rotation every frame.
    pub rotation_speed: f32,
    pub opacity: f32,
    pub kind: ShapeKind,
}

impl FloatingShape {
    /// Place a shape at random inside `viewport`.
    pub fn random(rng: &mut Rng, viewport: Viewport) -> Self {
        let x = rng.f32() * viewport.width;
        let y = rng.f32() * viewport.height;
        let size = rng.f32() * 120.0 + 60.0;
        let vx = rng.f32() * 0.4 - 0.2;
        let vy = rng.f32() * 0.4 - 0.2;
        let rotation = rng.f32() * TAU;
        let rotation_speed = rng.f32() * 0.008 - 0.004;
        let opacity = rng.f32() * 0.12 + 0.03;
        let kind = if rng.f32() > 0.5 {
            ShapeKind::Circle
        } else {
            ShapeKind::Square
        };
        Self {
            x,
            y,
            size,
            vx,
            vy,
            rotation,
            rotation_speed,
            opacity,
            kind,
        }
    }
}

/// Create `count` shapes spread over `viewport`.
pub fn init_shapes(count: usize, viewport: Viewport, rng: &mut Rng) -> Vec<FloatingShape> {
    (0..count)
        .map(|_| FloatingShape::random(rng, viewport))
        .collect()
}

/// Move and spin a shape.
///
/// Shapes wrap one `size` beyond each edge, so a shape has left the visible
/// area entirely before it reappears on the other side.
pub fn advance(shape: &mut FloatingShape, viewport: Viewport) {
    let margin = shape.size;
    shape.x = wrap(shape.x + shape.vx, -margin, viewport.width + margin);
    shape.y = wrap(shape.y + shape.vy, -margin, viewport.height + margin);
    shape.rotation += shape.rotation_speed;
}

/// Gradient running corner to corner across a shape of `size`, centered on the origin.
pub fn shape_gradient(size: f32, opacity: f32, theme: Theme) -> LinearGradient {
    let half = size / 2.0;
    let [start, middle, end] = theme.palette().shape_stops;
    LinearGradient::new(-half, -half, half, half)
        .with_stop(0.0, start.with_alpha(opacity))
        .with_stop(0.5, middle.with_alpha(opacity))
        .with_stop(1.0, end.with_alpha(opacity))
}

/// Draw a shape translated to its position and rotated about its center.
///
/// The transform is saved before and restored after, so it never leaks into
/// later draws.
pub fn paint<S: Surface + ?Sized>(shape: &FloatingShape, surface: &mut S, theme: Theme) {
    let half = shape.size / 2.0;
    surface.save();
    surface.translate(shape.x, shape.y);
    surface.rotate(shape.rotation);
    let gradient = shape_gradient(shape.size, shape.opacity, theme);
    surface.set_fill(Paint::Linear(gradient));
    match shape.kind {
        ShapeKind::Circle => surface.fill_circle(0.0, 0.0, half),
        ShapeKind::Square => surface.fill_rect(-half, -half, shape.size, shape.size),
    }
    surface.restore();
}

/// The hero layer's population.
#[derive(Debug, Clone)]
pub struct ShapeField {
    count: usize,
    shapes: Vec<FloatingShape>,
}

impl Default for ShapeField {
    fn default() -> Self {
        Self::new(SHAPE_COUNT)
    }
}

impl ShapeField {
    /// An empty field that creates `count` shapes when populated.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[FloatingShape] {
        &self.shapes
    }
}

impl Scene for ShapeField {
    const NAME: &'static str = "shapes";

    fn populate(&mut self, viewport: Viewport, rng: &mut Rng) {
        self.shapes = init_shapes(self.count, viewport, rng);
    }

    fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport, theme: Theme) {
        for shape in &mut self.shapes {
            advance(shape, viewport);
            paint(shape, surface, theme);
        }
    }

    fn redraw<S: Surface + ?Sized>(&self, surface: &mut S, theme: Theme) {
        for shape in &self.shapes {
            paint(shape, surface, theme);
        }
    }

    fn population(&self) -> usize {
        self.shapes.len()
    }
}
