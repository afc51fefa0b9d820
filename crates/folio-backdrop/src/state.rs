//! Backdrop state: both animation loops and how they reach the terminal.

use fastrand::Rng;
use folio_core::{Theme, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::animations::particles::{PARTICLE_COUNT, ParticleField};
use crate::animations::shapes::{SHAPE_COUNT, ShapeField};
use crate::color::composite_color;
use crate::driver::AnimationLoop;
use crate::surface::{Pixel, PixelSurface};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Settings the backdrop is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropOptions {
    pub theme: Theme,
    pub particle_count: usize,
    pub shape_count: usize,
    pub seed: u64,
    /// Logical pixels per terminal column.
    pub cell_px: f32,
    pub show_particles: bool,
    pub show_shapes: bool,
}

impl Default for BackdropOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            particle_count: PARTICLE_COUNT,
            shape_count: SHAPE_COUNT,
            seed: 0,
            cell_px: 8.0,
            show_particles: true,
            show_shapes: true,
        }
    }
}

/// Both animated layers of the backdrop.
///
/// The particle network sits directly on the page background and the
/// floating shapes are painted over it.
#[derive(Debug)]
pub struct BackdropState {
    particles: AnimationLoop<ParticleField, PixelSurface>,
    shapes: AnimationLoop<ShapeField, PixelSurface>,
    theme: Theme,
    cell_px: f32,
    show_particles: bool,
    show_shapes: bool,
    paused: bool,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
}

impl BackdropState {
    /// Create the backdrop. Both loops stay unmounted until the first
    /// [`Self::resize`] with a non-empty area.
    pub fn new(options: BackdropOptions) -> Self {
        let mut rng = Rng::with_seed(options.seed);
        let shape_rng = rng.fork();
        let scale = 1.0 / options.cell_px;

        let particles = AnimationLoop::new(
            ParticleField::new(options.particle_count),
            PixelSurface::new(Viewport::default(), scale),
            options.theme,
            rng,
        );
        let shapes = AnimationLoop::new(
            ShapeField::new(options.shape_count),
            PixelSurface::new(Viewport::default(), scale),
            options.theme,
            shape_rng,
        );

        Self {
            particles,
            shapes,
            theme: options.theme,
            cell_px: options.cell_px,
            show_particles: options.show_particles,
            show_shapes: options.show_shapes,
            paused: false,
            last_width: 0,
            last_height: 0,
        }
    }

    /// Fit both layers to a terminal area of `width` x `height` cells.
    /// The first non-empty area mounts the loops.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.last_width && height == self.last_height {
            return;
        }
        self.last_width = width;
        self.last_height = height;

        let viewport = Viewport::from_cells(width, height, self.cell_px);
        self.particles.resize(viewport);
        self.shapes.resize(viewport);
        self.sync_running();
    }

    /// Advance both layers by one frame. Returns whether anything was drawn.
    pub fn tick(&mut self) -> bool {
        let particles = self.particles.tick();
        let shapes = self.shapes.tick();
        log::trace!(
            "frame cost: {} px particles, {} px shapes",
            self.particles.surface().pixels_visited(),
            self.shapes.surface().pixels_visited()
        );
        particles || shapes
    }

    /// Switch theme, reseeding both populations.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.particles.set_theme(theme);
        self.shapes.set_theme(theme);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggle());
    }

    pub fn toggle_particles(&mut self) {
        self.show_particles = !self.show_particles;
        self.sync_running();
    }

    pub fn toggle_shapes(&mut self) {
        self.show_shapes = !self.show_shapes;
        self.sync_running();
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.sync_running();
    }

    /// Tear both loops down.
    pub fn stop(&mut self) {
        self.particles.stop();
        self.shapes.stop();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn shows_particles(&self) -> bool {
        self.show_particles
    }

    pub fn shows_shapes(&self) -> bool {
        self.show_shapes
    }

    pub fn particles(&self) -> &AnimationLoop<ParticleField, PixelSurface> {
        &self.particles
    }

    pub fn shapes(&self) -> &AnimationLoop<ShapeField, PixelSurface> {
        &self.shapes
    }

    /// Hidden or paused layers stop requesting frames.
    fn sync_running(&mut self) {
        if self.paused || !self.show_particles {
            self.particles.pause();
        } else {
            self.particles.resume();
        }
        if self.paused || !self.show_shapes {
            self.shapes.pause();
        } else {
            self.shapes.resume();
        }
    }

    /// Visible layer pixels at a device position, bottom first.
    fn layers_at(&self, x: usize, y: usize) -> [Pixel; 2] {
        let particle = if self.show_particles {
            self.particles.surface().pixel(x, y)
        } else {
            [0.0; 4]
        };
        let shape = if self.show_shapes {
            self.shapes.surface().pixel(x, y)
        } else {
            [0.0; 4]
        };
        [particle, shape]
    }
}

impl Widget for &BackdropState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = self.theme.palette().background;
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as usize, row as usize * 2);
                let top = composite_color(background, &self.layers_at(x, y));
                let bottom = composite_color(background, &self.layers_at(x, y + 1));
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(HALF_BLOCK).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
