use super::rules::{SpriteIndex, SHEET_COLUMNS};
use crate::error::{AutotileError, Result};

/// Splits a linear index into `(row, column)` for a grid `width` cells wide.
pub fn index_to_row_column(index: usize, width: usize) -> (usize, usize) {
    (index % width, index / width)
}

pub fn row_column_to_index(row: usize, column: usize, width: usize) -> usize {
    column * width + row
}

/// Number of cells in a `width` x `height` grid. Zero-sized or overflowing
/// dimensions are rejected.
pub fn cell_count(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(AutotileError::InvalidDimensions { width, height }),
    }
}

/// Position of a sprite inside the sheet, in whole sprite cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpriteCoord {
    pub offset_x: u32,
    pub offset_y: u32,
}

impl SpriteCoord {
    pub fn from_index(sprite: SpriteIndex) -> Self {
        let (x, y) = index_to_row_column(sprite as usize, SHEET_COLUMNS);
        Self { offset_x: x as u32, offset_y: y as u32 }
    }

    pub fn index(&self) -> SpriteIndex {
        row_column_to_index(self.offset_x as usize, self.offset_y as usize, SHEET_COLUMNS) as SpriteIndex
    }

    /// Top-left pixel of the sprite for a sheet drawn at `tile_size` pixels per cell.
    pub fn pixel_offset(&self, tile_size: f32) -> (f32, f32) {
        (self.offset_x as f32 * tile_size, self.offset_y as f32 * tile_size)
    }
}

impl From<SpriteCoord> for (u32, u32) {
    fn from(coord: SpriteCoord) -> Self {
        (coord.offset_x, coord.offset_y)
    }
}
