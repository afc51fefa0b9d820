//! Software rasterizer backing the terminal renderer.

use folio_core::{Rgba, Viewport};

use super::{Paint, Shadow, StateStack, Surface, Transform};

/// Premultiplied RGBA pixel.
pub type Pixel = [f32; 4];

/// Device-space bounding box, `[min_x, min_y, max_x, max_y]`.
type Bounds = [f32; 4];

/// Glow below one 8-bit step is not drawn.
const MIN_VISIBLE_ALPHA: f32 = 1.0 / 255.0;

/// Entries in a glow falloff table, spanning four standard deviations.
const GLOW_STEPS: usize = 128;

/// Gaussian falloff `exp(-d² / 2σ²)` sampled over `[0, 4σ]`.
#[derive(Debug, Clone)]
struct GlowTable {
    sigma: f32,
    step: f32,
    values: Vec<f32>,
}

impl GlowTable {
    fn new(sigma: f32) -> Self {
        let step = 4.0 * sigma / (GLOW_STEPS - 1) as f32;
        let values = (0..GLOW_STEPS)
            .map(|i| {
                let d = i as f32 * step;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            })
            .collect();
        Self {
            sigma,
            step,
            values,
        }
    }

    /// Falloff at distance `d` outside the shape edge.
    fn falloff(&self, d: f32) -> f32 {
        if d <= 0.0 {
            return 1.0;
        }
        let i = (d / self.step).round() as usize;
        self.values.get(i).copied().unwrap_or(0.0)
    }

    /// Distance at which a glow of opacity `peak` fades below one 8-bit step.
    fn reach(&self, peak: f32) -> f32 {
        if peak <= MIN_VISIBLE_ALPHA {
            return 0.0;
        }
        self.sigma * (2.0 * (peak / MIN_VISIBLE_ALPHA).ln()).sqrt()
    }
}

/// Device-space area a draw can touch, before anti-aliasing and glow.
#[derive(Debug, Clone, Copy)]
enum Footprint {
    /// Points within `radius` of the segment `a`-`b`.
    Capsule {
        a: (f32, f32),
        b: (f32, f32),
        radius: f32,
    },
    Rect(Bounds),
}

impl Footprint {
    /// Vertical extent when grown by `pad`.
    fn rows(&self, pad: f32) -> (f32, f32) {
        match *self {
            Footprint::Capsule { a, b, radius } => {
                let r = radius + pad;
                (a.1.min(b.1) - r, a.1.max(b.1) + r)
            }
            Footprint::Rect(bounds) => (bounds[1] - pad, bounds[3] + pad),
        }
    }

    /// Horizontal extent of the row at height `y` when grown by `pad`.
    fn span(&self, y: f32, pad: f32) -> Option<(f32, f32)> {
        match *self {
            Footprint::Capsule { a, b, radius } => capsule_span(a, b, radius + pad, y),
            Footprint::Rect(bounds) => Some((bounds[0] - pad, bounds[2] + pad)),
        }
    }
}

/// An anti-aliased RGBA pixel buffer.
///
/// Drawing coordinates are logical pixels; the buffer holds `scale` device
/// pixels per logical pixel. Pixels are premultiplied and composited with
/// source-over.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    viewport: Viewport,
    scale: f32,
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
    state: StateStack,
    glow: Option<GlowTable>,
    visited: u64,
}

impl PixelSurface {
    /// Create a surface for `viewport` with `scale` device pixels per logical pixel.
    pub fn new(viewport: Viewport, scale: f32) -> Self {
        let mut surface = Self {
            viewport: Viewport::default(),
            scale,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            state: StateStack::default(),
            glow: None,
            visited: 0,
        };
        surface.resize(viewport);
        surface
    }

    /// Buffer width in device pixels.
    pub fn device_width(&self) -> usize {
        self.width
    }

    /// Buffer height in device pixels.
    pub fn device_height(&self) -> usize {
        self.height
    }

    /// Premultiplied pixel at a device position, transparent when out of range.
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        if x >= self.width || y >= self.height {
            return [0.0; 4];
        }
        self.pixels[y * self.width + x]
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixels examined by draw calls since the last clear.
    pub fn pixels_visited(&self) -> u64 {
        self.visited
    }

    fn device_transform(&self) -> Transform {
        Transform::scale(self.scale).then(self.state.current().transform)
    }

    /// Rasterize one shape.
    ///
    /// `distance` maps a user-space point to the signed distance from the
    /// shape's edge in device pixels (negative inside). `weight` scales the
    /// coverage of features thinner than a device pixel. Only pixels inside
    /// `footprint`, grown by the anti-aliasing and glow reach, are examined.
    fn fill_region<F>(&mut self, footprint: Footprint, paint: &Paint, weight: f32, distance: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some(inverse) = self.device_transform().invert() else {
            return;
        };

        let shadow = self.state.current().shadow;
        let sigma = shadow.blur * self.scale / 2.0;
        let peak = shadow.color.a.clamp(0.0, 1.0) * paint.max_alpha() * weight;
        let glow = if shadow.is_visible() && sigma > 0.0 && peak > MIN_VISIBLE_ALPHA {
            if self.glow.as_ref().is_none_or(|t| t.sigma != sigma) {
                self.glow = Some(GlowTable::new(sigma));
            }
            self.glow.as_ref()
        } else {
            None
        };
        // Coverage reaches half a pixel past the edge.
        let extent = glow.map_or(0.0, |t| t.reach(peak)).max(0.5);
        let shadow_color = shadow.color.premultiplied();
        let solid = match paint {
            Paint::Solid(color) => Some(color.premultiplied()),
            Paint::Linear(_) => None,
        };

        let (top, bottom) = footprint.rows(extent);
        let y0 = top.floor().max(0.0) as usize;
        let y1 = (bottom.ceil().max(0.0) as usize).min(self.height);
        for py in y0..y1 {
            let cy = py as f32 + 0.5;
            let Some((left, right)) = footprint.span(cy, extent) else {
                continue;
            };
            let x0 = (left - 0.5).floor().max(0.0) as usize;
            let x1 = ((right + 0.5).ceil().max(0.0) as usize).min(self.width);
            for px in x0..x1 {
                self.visited += 1;
                let (ux, uy) = inverse.apply(px as f32 + 0.5, cy);
                let d = distance(ux, uy);
                if d >= extent {
                    continue;
                }
                let color = solid.unwrap_or_else(|| paint.sample(ux, uy));
                let pixel = &mut self.pixels[py * self.width + px];

                if let Some(table) = glow {
                    let alpha = table.falloff(d) * color[3] * weight;
                    if alpha > 0.0 {
                        blend(pixel, shadow_color, alpha);
                    }
                }

                let coverage = (0.5 - d).clamp(0.0, 1.0) * weight;
                if coverage > 0.0 {
                    blend(pixel, color, coverage);
                }
            }
        }
    }

    fn device_bounds(&self, points: &[(f32, f32)]) -> Bounds {
        let device = self.device_transform();
        let mut bounds = [f32::MAX, f32::MAX, f32::MIN, f32::MIN];
        for &(x, y) in points {
            let (dx, dy) = device.apply(x, y);
            bounds[0] = bounds[0].min(dx);
            bounds[1] = bounds[1].min(dy);
            bounds[2] = bounds[2].max(dx);
            bounds[3] = bounds[3].max(dy);
        }
        bounds
    }
}

/// Source-over a premultiplied color onto `dst`, scaled by `coverage`.
fn blend(dst: &mut Pixel, src: Pixel, coverage: f32) {
    let keep = 1.0 - src[3] * coverage;
    for i in 0..4 {
        dst[i] = src[i] * coverage + dst[i] * keep;
    }
}

/// Distance from a point to the segment `a`-`b`.
fn segment_distance(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (px - (a.0 + t * dx)).hypot(py - (a.1 + t * dy))
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// The interval of `x` where `(x, y)` lies within `r` of the segment `a`-`b`.
fn capsule_span(a: (f32, f32), b: (f32, f32), r: f32, y: f32) -> Option<(f32, f32)> {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;

    // End caps.
    for p in [a, b] {
        let h_sq = r * r - (y - p.1) * (y - p.1);
        if h_sq >= 0.0 {
            let h = h_sq.sqrt();
            lo = lo.min(p.0 - h);
            hi = hi.max(p.0 + h);
        }
    }

    // The band around the segment between the caps.
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let oy = y - a.1;
    if dy != 0.0 {
        let len_sq = dx * dx + dy * dy;
        let len = len_sq.sqrt();
        let (mut left, mut right) = ordered(
            a.0 + (oy * dx - r * len) / dy,
            a.0 + (oy * dx + r * len) / dy,
        );
        if dx != 0.0 {
            let (s0, s1) = ordered(a.0 - oy * dy / dx, a.0 + (len_sq - oy * dy) / dx);
            left = left.max(s0);
            right = right.min(s1);
        } else if !(0.0..=1.0).contains(&(oy * dy / len_sq)) {
            right = f32::NEG_INFINITY;
        }
        if left <= right {
            lo = lo.min(left);
            hi = hi.max(right);
        }
    } else if dx != 0.0 && oy.abs() <= r {
        lo = lo.min(a.0.min(b.0));
        hi = hi.max(a.0.max(b.0));
    }

    (lo <= hi).then_some((lo, hi))
}

impl Surface for PixelSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        let device = |v: f32| {
            if v.is_finite() && v > 0.0 {
                (v * self.scale).round() as usize
            } else {
                0
            }
        };
        self.viewport = viewport;
        self.width = device(viewport.width);
        self.height = device(viewport.height);
        self.pixels = vec![[0.0; 4]; self.width * self.height];
        self.state.reset();
        self.visited = 0;
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
        self.visited = 0;
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.current_mut().fill = paint;
    }

    fn set_stroke(&mut self, color: Rgba, line_width: f32) {
        let state = self.state.current_mut();
        state.stroke = color;
        state.line_width = line_width;
    }

    fn set_shadow(&mut self, blur: f32, color: Rgba) {
        self.state.current_mut().shadow = Shadow { blur, color };
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if !(radius > 0.0) {
            return;
        }
        let device = self.device_transform();
        let k = device.scale_factor();
        let device_radius = radius * k;
        // Sub-pixel dots keep a half-pixel footprint and fade instead.
        let effective = device_radius.max(0.5);
        let weight = (device_radius / effective).powi(2);
        let center = device.apply(cx, cy);
        let footprint = Footprint::Capsule {
            a: center,
            b: center,
            radius: effective,
        };
        let paint = self.state.current().fill.clone();
        self.fill_region(footprint, &paint, weight, |x, y| {
            (x - cx).hypot(y - cy) * k - effective
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let k = self.device_transform().scale_factor();
        let (hw, hh) = (width / 2.0, height / 2.0);
        let (mx, my) = (x + hw, y + hh);
        let corners = [(x, y), (x + width, y), (x, y + height), (x + width, y + height)];
        let footprint = Footprint::Rect(self.device_bounds(&corners));
        let paint = self.state.current().fill.clone();
        self.fill_region(footprint, &paint, 1.0, |px, py| {
            let qx = (px - mx).abs() - hw;
            let qy = (py - my).abs() - hh;
            let outside = qx.max(0.0).hypot(qy.max(0.0));
            let inside = qx.max(qy).min(0.0);
            (outside + inside) * k
        });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        // Butt caps: a zero-length line covers nothing.
        if x0 == x1 && y0 == y1 {
            return;
        }
        let state = self.state.current();
        let (color, line_width) = (state.stroke, state.line_width);
        if !(line_width > 0.0) {
            return;
        }
        let device = self.device_transform();
        let k = device.scale_factor();
        let device_width = line_width * k;
        let effective = device_width.max(1.0);
        let weight = device_width / effective;
        let footprint = Footprint::Capsule {
            a: device.apply(x0, y0),
            b: device.apply(x1, y1),
            radius: effective / 2.0,
        };
        self.fill_region(footprint, &Paint::Solid(color), weight, |px, py| {
            segment_distance(px, py, (x0, y0), (x1, y1)) * k - effective / 2.0
        });
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.rotate(radians);
    }
}
