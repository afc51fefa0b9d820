//! Core types shared across the folio crates.
//!
//! Holds the two named themes and their fixed palettes, the RGBA color
//! types the surfaces draw with, the viewport measured in logical pixels,
//! and the contact-form seam used by the page's message collaborator.

mod color;
pub mod contact;
mod theme;
mod viewport;

pub use color::{Rgb, Rgba};
pub use theme::{DARK, LIGHT, Palette, ParseThemeError, Theme};
pub use viewport::Viewport;
