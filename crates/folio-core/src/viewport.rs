//! Viewport dimensions in logical pixels.

/// Size of the area a drawing surface covers, in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport covering a terminal area where each cell is `cell_px` logical
    /// pixels wide and twice that tall.
    pub fn from_cells(columns: u16, rows: u16, cell_px: f32) -> Self {
        Self {
            width: columns as f32 * cell_px,
            height: rows as f32 * 2.0 * cell_px,
        }
    }

    /// True when there is nothing to draw on. NaN sizes count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
