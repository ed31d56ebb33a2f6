use egui::{Pos2, Rect, Vec2};
use log::{debug, warn};

use crate::map::grid::TileGrid;

/// Where the grid sits on screen and how large each cell is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    pub origin: Pos2,
    pub tile_size: f32,
}

impl MapView {
    pub fn new(origin: Pos2, tile_size: f32) -> Self {
        Self { origin, tile_size }
    }

    /// Screen rectangle of the cell at `(row, column)`. Rows run along x.
    pub fn cell_rect(&self, row: usize, column: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                self.origin.x + row as f32 * self.tile_size,
                self.origin.y + column as f32 * self.tile_size,
            ),
            Vec2::splat(self.tile_size),
        )
    }

    pub fn grid_rect(&self, grid: &TileGrid) -> Rect {
        Rect::from_min_size(
            self.origin,
            Vec2::new(grid.width() as f32 * self.tile_size, grid.height() as f32 * self.tile_size),
        )
    }

    /// Cell index under a screen position, `None` outside the grid.
    pub fn screen_to_cell(&self, grid: &TileGrid, pos: Pos2) -> Option<usize> {
        if self.tile_size <= 0.0 {
            return None;
        }
        let x = ((pos.x - self.origin.x) / self.tile_size).floor();
        let y = ((pos.y - self.origin.y) / self.tile_size).floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        grid.index_of(x as usize, y as usize)
    }
}

/// Flip the cell under `pos`. Returns the new state of the cell, if one was hit.
pub fn toggle_tile_at(grid: &mut TileGrid, view: &MapView, pos: Pos2) -> Option<bool> {
    let index = match view.screen_to_cell(grid, pos) {
        Some(index) => index,
        None => {
            debug!("Click at ({:.1}, {:.1}) is outside the grid", pos.x, pos.y);
            return None;
        }
    };
    match grid.toggle(index) {
        Ok(filled) => {
            debug!("Toggled cell {} -> {}", index, if filled { "filled" } else { "empty" });
            Some(filled)
        }
        Err(e) => {
            warn!("Failed to toggle cell {}: {}", index, e);
            None
        }
    }
}

/// Force the cell under `pos` to `filled`, used while dragging with a button held.
pub fn set_tile_at(grid: &mut TileGrid, view: &MapView, pos: Pos2, filled: bool) -> bool {
    match view.screen_to_cell(grid, pos) {
        Some(index) if grid.is_filled(index) != filled => grid.set(index, filled).is_ok(),
        _ => false,
    }
}
