//! Particle network animation (stateful).
//!
//! Small glowing dots drift across the surface and wrap at its edges. After
//! every dot has moved and been painted, each pair closer than
//! [`LINK_DISTANCE`] is joined by a line that fades out with distance.
//! Linking checks every pair, so the population has to stay small.

use fastrand::Rng;
use folio_core::{Theme, Viewport};

use super::wrap;
use crate::driver::Scene;
use crate::surface::{Paint, Surface};

/// Population created on every mount and theme change.
pub const PARTICLE_COUNT: usize = 150;

/// Pairs at or beyond this distance are not linked.
pub const LINK_DISTANCE: f32 = 120.0;

/// Scales the opacity of every link.
pub const LINK_FADE: f32 = 0.25;

/// Stroke width of a link.
pub const LINK_WIDTH: f32 = 1.0;

/// Blur radius of the glow around each dot.
pub const GLOW_BLUR: f32 = 10.0;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Radius, fixed at creation.
    pub size: f32,
    pub vx: f32,
    pub vy: f32,
    /// Fill opacity, fixed at creation.
    pub opacity: f32,
}

impl Particle {
    /// Place a particle at random inside `viewport`.
    pub fn random(rng: &mut Rng, viewport: Viewport) -> Self {
        Self {
            x: wrap(rng.f32() * viewport.width, 0.0, viewport.width),
            y: wrap(rng.f32() * viewport.height, 0.0, viewport.height),
            size: rng.f32() * 2.5 + 0.5,
            vx: rng.f32() * 0.6 - 0.3,
            vy: rng.f32() * 0.6 - 0.3,
            opacity: rng.f32() * 0.6 + 0.2,
        }
    }
}

/// Create `count` particles spread over `viewport`.
pub fn init_particles(count: usize, viewport: Viewport, rng: &mut Rng) -> Vec<Particle> {
    (0..count).map(|_| Particle::random(rng, viewport)).collect()
}

/// Move a particle by its velocity, wrapping to the opposite edge.
pub fn advance(particle: &mut Particle, viewport: Viewport) {
    particle.x = wrap(particle.x + particle.vx, 0.0, viewport.width);
    particle.y = wrap(particle.y + particle.vy, 0.0, viewport.height);
}

/// Draw a particle as a glowing dot.
///
/// Leaves the glow set on the surface, so strokes that follow glow as well.
pub fn paint<S: Surface + ?Sized>(particle: &Particle, surface: &mut S, theme: Theme) {
    let color = theme.palette().particle;
    surface.set_shadow(GLOW_BLUR, color.with_alpha(1.0));
    surface.set_fill(Paint::Solid(color.with_alpha(particle.opacity)));
    surface.fill_circle(particle.x, particle.y, particle.size);
}

/// Opacity of the link between two particles `distance` apart, or `None`
/// when they are too far apart to be linked.
pub fn link_opacity(distance: f32, theme: Theme) -> Option<f32> {
    (distance < LINK_DISTANCE)
        .then(|| (1.0 - distance / LINK_DISTANCE) * theme.palette().link_max_opacity * LINK_FADE)
}

/// Draw a line between every pair of particles closer than [`LINK_DISTANCE`].
pub fn connect<S: Surface + ?Sized>(particles: &[Particle], surface: &mut S, theme: Theme) {
    let link = theme.palette().link;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = (b.x - a.x).hypot(b.y - a.y);
            if let Some(opacity) = link_opacity(distance, theme) {
                surface.set_stroke(link.with_alpha(opacity), LINK_WIDTH);
                surface.stroke_line(a.x, a.y, b.x, b.y);
            }
        }
    }
}

/// The particle layer's population.
#[derive(Debug, Clone)]
pub struct ParticleField {
    count: usize,
    particles: Vec<Particle>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(PARTICLE_COUNT)
    }
}

impl ParticleField {
    /// An empty field that creates `count` particles when populated.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            particles: Vec::new(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Scene for ParticleField {
    const NAME: &'static str = "particles";

    fn populate(&mut self, viewport: Viewport, rng: &mut Rng) {
        self.particles = init_particles(self.count, viewport, rng);
    }

    fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport, theme: Theme) {
        for particle in &mut self.particles {
            advance(particle, viewport);
            paint(particle, surface, theme);
        }
        connect(&self.particles, surface, theme);
    }

    fn redraw<S: Surface + ?Sized>(&self, surface: &mut S, theme: Theme) {
        for particle in &self.particles {
            paint(particle, surface, theme);
        }
        connect(&self.particles, surface, theme);
    }

    fn population(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList, PixelSurface};

    fn particle(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            size: 2.0,
            vx: 0.0,
            vy: 0.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_random_particles_within_ranges() {
        let mut rng = Rng::with_seed(7);
        let vp = Viewport::new(1920.0, 1080.0);
        for p in init_particles(500, vp, &mut rng) {
            assert!((0.0..1920.0).contains(&p.x));
            assert!((0.0..1080.0).contains(&p.y));
            assert!((0.5..3.0).contains(&p.size));
            assert!((-0.3..0.3).contains(&p.vx));
            assert!((-0.3..0.3).contains(&p.vy));
            assert!((0.2..0.8).contains(&p.opacity));
        }
    }

    #[test]
    fn test_advance_stays_in_bounds_over_many_steps() {
        let mut rng = Rng::with_seed(99);
        let vp = Viewport::new(300.0, 200.0);
        let mut particles = init_particles(150, vp, &mut rng);
        // Exaggerate velocities so every particle wraps many times.
        for p in &mut particles {
            p.vx *= 40.0;
            p.vy *= 40.0;
        }
        for _ in 0..2000 {
            for p in &mut particles {
                advance(p, vp);
                assert!(p.x >= 0.0 && p.x < vp.width, "x out of range: {}", p.x);
                assert!(p.y >= 0.0 && p.y < vp.height, "y out of range: {}", p.y);
            }
        }
    }

    #[test]
    fn test_advance_wraps_to_opposite_edge() {
        let vp = Viewport::new(100.0, 100.0);
        let mut p = Particle {
            vx: 0.3,
            vy: -0.3,
            ..particle(99.9, 0.1)
        };
        advance(&mut p, vp);
        assert!(p.x < 1.0, "wrapped x: {}", p.x);
        assert!(p.y > 99.0, "wrapped y: {}", p.y);
    }

    #[test]
    fn test_advance_never_touches_size_or_opacity() {
        let vp = Viewport::new(100.0, 100.0);
        let mut p = Particle {
            vx: 0.2,
            vy: 0.1,
            ..particle(50.0, 50.0)
        };
        advance(&mut p, vp);
        assert_eq!(p.size, 2.0);
        assert_eq!(p.opacity, 0.5);
    }

    #[test]
    fn test_paint_uses_theme_color_and_glow() {
        let mut list = DrawList::new(Viewport::new(100.0, 100.0));
        paint(&particle(10.0, 20.0), &mut list, Theme::Dark);
        match &list.commands()[0] {
            DrawCommand::FillCircle {
                cx,
                cy,
                radius,
                paint,
                shadow,
                ..
            } => {
                assert_eq!((*cx, *cy, *radius), (10.0, 20.0, 2.0));
                assert_eq!(
                    *paint,
                    Paint::Solid(Theme::Dark.palette().particle.with_alpha(0.5))
                );
                assert_eq!(shadow.blur, GLOW_BLUR);
                assert_eq!(shadow.color.rgb(), Theme::Dark.palette().particle);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_paint_is_deterministic() {
        let vp = Viewport::new(200.0, 100.0);
        let p = particle(57.3, 41.9);
        let mut first = PixelSurface::new(vp, 1.0);
        paint(&p, &mut first, Theme::Light);
        let mut second = PixelSurface::new(vp, 1.0);
        paint(&p, &mut second, Theme::Light);
        paint(&p, &mut second, Theme::Light);
        second.clear();
        paint(&p, &mut second, Theme::Light);
        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn test_link_opacity_bounds() {
        for theme in [Theme::Dark, Theme::Light] {
            let max = theme.palette().link_max_opacity * LINK_FADE;
            assert_eq!(link_opacity(0.0, theme), Some(max));
            assert_eq!(link_opacity(LINK_DISTANCE, theme), None);
            assert_eq!(link_opacity(500.0, theme), None);
        }
    }

    #[test]
    fn test_connect_two_particles_fifty_apart() {
        let mut list = DrawList::new(Viewport::new(400.0, 400.0));
        let pair = [particle(100.0, 100.0), particle(100.0, 150.0)];
        connect(&pair, &mut list, Theme::Light);

        let lines: Vec<_> = list.lines().collect();
        assert_eq!(lines.len(), 1);
        let (from, to, color) = lines[0];
        assert_eq!(from, (100.0, 100.0));
        assert_eq!(to, (100.0, 150.0));
        assert_eq!(color.rgb(), Theme::Light.palette().link);
        let expected = (1.0 - 50.0 / 120.0) * 0.25;
        assert!((color.a - expected).abs() < 1e-6);
        assert!((color.a - 0.1458).abs() < 1e-4);
    }

    #[test]
    fn test_connect_skips_distant_pairs() {
        let mut list = DrawList::new(Viewport::new(400.0, 400.0));
        let pair = [particle(0.0, 0.0), particle(120.0, 0.0)];
        connect(&pair, &mut list, Theme::Dark);
        assert_eq!(list.lines().count(), 0);
    }

    #[test]
    fn test_connect_visits_each_pair_once() {
        let mut list = DrawList::new(Viewport::new(400.0, 400.0));
        let cluster: Vec<_> = (0..5).map(|i| particle(10.0 + i as f32, 10.0)).collect();
        connect(&cluster, &mut list, Theme::Dark);
        assert_eq!(list.lines().count(), 10);
    }

    #[test]
    fn test_coincident_particles_get_max_opacity() {
        let mut list = DrawList::new(Viewport::new(400.0, 400.0));
        connect(&[particle(5.0, 5.0), particle(5.0, 5.0)], &mut list, Theme::Dark);
        let (_, _, color) = list.lines().next().unwrap();
        assert_eq!(color.a, Theme::Dark.palette().link_max_opacity * LINK_FADE);
    }
}
