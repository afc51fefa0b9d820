//! Self-rescheduling animation loops and their frame clock.

use std::time::{Duration, Instant};

use fastrand::Rng;
use folio_core::{Theme, Viewport};

use crate::surface::Surface;

/// A population of entities that can seed itself and draw a frame.
pub trait Scene {
    /// Name used in log output.
    const NAME: &'static str;

    /// Discard the current population and create a fresh one.
    fn populate(&mut self, viewport: Viewport, rng: &mut Rng);

    /// Advance and paint every entity once. The surface is already cleared.
    fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport, theme: Theme);

    /// Paint every entity where it stands, without advancing. The surface is
    /// already cleared.
    fn redraw<S: Surface + ?Sized>(&self, surface: &mut S, theme: Theme);

    /// Current number of entities.
    fn population(&self) -> usize;
}

/// Lifecycle of an [`AnimationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// No usable surface yet. The next mount or resize retries.
    Unmounted,
    /// Producing a frame on every tick.
    Running,
    /// Mounted, but not producing frames.
    Paused,
    /// Torn down. Never produces another frame.
    Stopped,
}

/// Drives one scene on its own surface.
///
/// A frame is produced only while the loop is [`LoopPhase::Running`];
/// [`AnimationLoop::stop`] ends the chain for good.
#[derive(Debug)]
pub struct AnimationLoop<S, T> {
    scene: S,
    surface: T,
    theme: Theme,
    viewport: Viewport,
    rng: Rng,
    phase: LoopPhase,
    frames: u64,
}

impl<S: Scene, T: Surface> AnimationLoop<S, T> {
    /// Create an unmounted loop. Nothing is drawn until [`Self::mount`] succeeds.
    pub fn new(scene: S, surface: T, theme: Theme, rng: Rng) -> Self {
        Self {
            scene,
            surface,
            theme,
            viewport: Viewport::default(),
            rng,
            phase: LoopPhase::Unmounted,
            frames: 0,
        }
    }

    /// Attach to a viewport: size the surface, seed a fresh population and
    /// start running. Returns false, leaving the loop unmounted, when the
    /// viewport is empty.
    pub fn mount(&mut self, viewport: Viewport) -> bool {
        if self.phase == LoopPhase::Stopped {
            return false;
        }
        if viewport.is_empty() {
            log::debug!("{}: surface unavailable, not starting", S::NAME);
            return false;
        }
        self.viewport = viewport;
        self.reseed();
        if self.phase != LoopPhase::Paused {
            self.phase = LoopPhase::Running;
        }
        log::info!(
            "{}: mounted at {}x{} with {} entities",
            S::NAME,
            viewport.width,
            viewport.height,
            self.scene.population()
        );
        true
    }

    /// Switch theme. A mounted loop resizes its surface and reseeds its
    /// population from scratch. A paused loop shows the new population at
    /// once.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if self.is_mounted() {
            self.reseed();
            self.redraw_if_paused();
            log::debug!("{}: reseeded for {} theme", S::NAME, theme);
        }
    }

    /// Apply a viewport resize. Entities keep their coordinates; anything
    /// now outside the surface comes back at its next wrap. An unmounted
    /// loop treats this as another mount attempt.
    pub fn resize(&mut self, viewport: Viewport) {
        match self.phase {
            LoopPhase::Stopped => {}
            LoopPhase::Unmounted => {
                self.mount(viewport);
            }
            LoopPhase::Running | LoopPhase::Paused => {
                if viewport.is_empty() {
                    log::debug!("{}: ignoring resize to empty viewport", S::NAME);
                    return;
                }
                if viewport != self.viewport {
                    self.viewport = viewport;
                    self.surface.resize(viewport);
                    self.redraw_if_paused();
                    log::debug!(
                        "{}: resized to {}x{}",
                        S::NAME,
                        viewport.width,
                        viewport.height
                    );
                }
            }
        }
    }

    /// Produce one frame: clear, then advance and paint every entity.
    /// Returns whether another frame should be scheduled.
    pub fn tick(&mut self) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        self.surface.clear();
        self.scene.frame(&mut self.surface, self.viewport, self.theme);
        self.frames += 1;
        true
    }

    /// Stop producing frames without discarding anything. The surface keeps
    /// showing the population where it stands.
    pub fn pause(&mut self) {
        if self.phase == LoopPhase::Running {
            self.phase = LoopPhase::Paused;
            self.redraw_if_paused();
        }
    }

    /// Continue after [`Self::pause`].
    pub fn resume(&mut self) {
        if self.phase == LoopPhase::Paused {
            self.phase = LoopPhase::Running;
        }
    }

    /// Tear the loop down. No frame is produced afterwards.
    pub fn stop(&mut self) {
        if self.phase != LoopPhase::Stopped {
            log::info!("{}: stopped after {} frames", S::NAME, self.frames);
            self.phase = LoopPhase::Stopped;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, LoopPhase::Running | LoopPhase::Paused)
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames produced since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn surface(&self) -> &T {
        &self.surface
    }

    fn reseed(&mut self) {
        self.surface.resize(self.viewport);
        self.scene.populate(self.viewport, &mut self.rng);
    }

    /// A paused loop never ticks, so anything that wipes its surface has to
    /// paint the population back.
    fn redraw_if_paused(&mut self) {
        if self.phase == LoopPhase::Paused {
            self.surface.clear();
            self.scene.redraw(&mut self.surface, self.theme);
        }
    }
}

/// Paces frames at a fixed rate, standing in for the display refresh signal.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    /// A clock ticking `fps` times per second, with the first frame due at `now`.
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next frame is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Returns true and schedules the following frame when a frame is due.
    /// A clock that fell behind skips the missed frames rather than bursting.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}
