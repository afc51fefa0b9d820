//! Animated backdrop for the folio portfolio.
//!
//! Two independent animation loops, each on its own drawing surface: a
//! particle network whose nearby dots are joined by fading lines, and a
//! handful of large translucent shapes that drift and spin. Both loops are
//! reseeded when the theme changes and keep their entities across resizes.
//! [`BackdropState`] rasterizes them and composites the result into a
//! Ratatui buffer.

pub mod animations;
mod color;
pub mod driver;
mod state;
pub mod surface;

pub use color::{composite, composite_color};
pub use driver::{AnimationLoop, FrameClock, LoopPhase, Scene};
pub use state::{BackdropOptions, BackdropState};
