use rand::Rng;

use crate::error::{AutotileError, Result};
use crate::tiles::coords::{cell_count, index_to_row_column, row_column_to_index};

pub const DEFAULT_WIDTH: usize = 15;
pub const DEFAULT_HEIGHT: usize = 15;

/// Fixed-size occupancy grid, one fill value per cell.
///
/// Cells are addressed column-major: `index = column * width + row`. The grid
/// is never resized once built. Resolution only borrows it, so the owner
/// decides how toggles are serialized against resolution passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![1; DEFAULT_WIDTH * DEFAULT_HEIGHT],
        }
    }
}

impl TileGrid {
    /// A grid with every cell filled.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_value(width, height, 1)
    }

    pub fn empty(width: usize, height: usize) -> Result<Self> {
        Self::with_value(width, height, 0)
    }

    fn with_value(width: usize, height: usize, value: u8) -> Result<Self> {
        let count = cell_count(width, height)?;
        Ok(Self { width, height, cells: vec![value; count] })
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(AutotileError::CellCountMismatch { expected, actual: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    /// Out of range reads as empty, like the border around the map.
    pub fn is_filled(&self, index: usize) -> bool {
        self.get(index).map_or(false, |v| v != 0)
    }

    pub fn row_column(&self, index: usize) -> (usize, usize) {
        index_to_row_column(index, self.width)
    }

    pub fn index_of(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.width && column < self.height {
            Some(row_column_to_index(row, column, self.width))
        } else {
            None
        }
    }

    /// Flip a cell between empty and filled, returning its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let len = self.cells.len();
        let cell = self.cells.get_mut(index).ok_or(AutotileError::CellOutOfRange { index, len })?;
        *cell = if *cell != 0 { 0 } else { 1 };
        Ok(*cell != 0)
    }

    pub fn set(&mut self, index: usize, filled: bool) -> Result<()> {
        let len = self.cells.len();
        let cell = self.cells.get_mut(index).ok_or(AutotileError::CellOutOfRange { index, len })?;
        *cell = filled as u8;
        Ok(())
    }

    pub fn fill(&mut self, filled: bool) {
        self.cells.fill(filled as u8);
    }

    /// Fill each cell independently with probability `density`.
    pub fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_finite() { density.clamp(0.0, 1.0) } else { 0.0 };
        for cell in &mut self.cells {
            *cell = rng.random_bool(density) as u8;
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starts_fully_filled() {
        let grid = TileGrid::default();
        assert_eq!((grid.width(), grid.height()), (15, 15));
        assert_eq!(grid.filled_count(), 225);
        assert_eq!(TileGrid::new(4, 3).unwrap().filled_count(), 12);
        assert_eq!(TileGrid::empty(4, 3).unwrap().filled_count(), 0);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(TileGrid::new(0, 5), Err(AutotileError::InvalidDimensions { .. })));
        assert!(matches!(
            TileGrid::from_cells(2, 2, vec![1; 3]),
            Err(AutotileError::CellCountMismatch { expected: 4, actual: 3 })
        ));
        assert!(matches!(
            TileGrid::from_cells(usize::MAX, 2, vec![1; 4]),
            Err(AutotileError::InvalidDimensions { width: usize::MAX, height: 2 })
        ));
        assert!(matches!(TileGrid::empty(2, usize::MAX), Err(AutotileError::InvalidDimensions { .. })));
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        assert_eq!(grid.toggle(4).unwrap(), false);
        assert!(!grid.is_filled(4));
        assert_eq!(grid.toggle(4).unwrap(), true);
        assert!(matches!(grid.toggle(9), Err(AutotileError::CellOutOfRange { index: 9, len: 9 })));
    }

    #[test]
    fn nonzero_values_toggle_to_empty() {
        let mut grid = TileGrid::from_cells(2, 1, vec![7, 0]).unwrap();
        assert!(grid.is_filled(0));
        assert_eq!(grid.toggle(0).unwrap(), false);
        assert_eq!(grid.get(0), Some(0));
        assert!(!grid.is_filled(5));
    }

    #[test]
    fn index_of_respects_column_major_layout() {
        let grid = TileGrid::new(4, 2).unwrap();
        assert_eq!(grid.index_of(3, 1), Some(7));
        assert_eq!(grid.row_column(7), (3, 1));
        assert_eq!(grid.index_of(4, 0), None);
        assert_eq!(grid.index_of(0, 2), None);
    }

    #[test]
    fn scatter_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = TileGrid::default();
        grid.scatter(&mut rng, 0.0);
        assert_eq!(grid.filled_count(), 0);
        grid.scatter(&mut rng, 1.0);
        assert_eq!(grid.filled_count(), grid.len());
        grid.fill(false);
        grid.set(3, true).unwrap();
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn scatter_with_nan_density_clears() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = TileGrid::default();
        grid.scatter(&mut rng, f64::NAN);
        assert_eq!(grid.filled_count(), 0);
        grid.scatter(&mut rng, f64::INFINITY);
        assert_eq!(grid.filled_count(), 0);
    }
}
