use rayon::prelude::*;

use super::coords::{cell_count, index_to_row_column, SpriteCoord};
use super::rules::RuleTable;
use super::tile_neighbors::TileNeighbors;
use crate::error::{AutotileError, Result};
use crate::map::grid::TileGrid;

/// Picks sprites for grid cells using a borrowed rule table.
///
/// Holds no state besides the table, so one resolver can be shared between
/// threads and called for cells in any order.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    rules: &'a RuleTable,
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self::new(RuleTable::builtin())
    }
}

impl<'a> Resolver<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a RuleTable {
        self.rules
    }

    /// Neighbor mask of `index` in a raw column-major `cells` slice.
    pub fn neighbor_mask(&self, cells: &[u8], width: usize, height: usize, index: usize) -> Result<TileNeighbors> {
        check_cell(cells, width, height, index)?;
        Ok(mask_unchecked(cells, width, height, index))
    }

    /// Sprite coordinate for `index` in a raw column-major `cells` slice.
    pub fn resolve_sprite(&self, cells: &[u8], width: usize, height: usize, index: usize) -> Result<SpriteCoord> {
        check_cell(cells, width, height, index)?;
        Ok(self.resolve_unchecked(cells, width, height, index))
    }

    pub fn resolve_cell(&self, grid: &TileGrid, index: usize) -> Result<SpriteCoord> {
        if index >= grid.len() {
            return Err(AutotileError::CellOutOfRange { index, len: grid.len() });
        }
        Ok(self.resolve_unchecked(grid.cells(), grid.width(), grid.height(), index))
    }

    /// Every cell of `grid`, in cell index order.
    pub fn resolve_all(&self, grid: &TileGrid) -> Vec<SpriteCoord> {
        (0..grid.len())
            .map(|i| self.resolve_unchecked(grid.cells(), grid.width(), grid.height(), i))
            .collect()
    }

    /// Same result as [`Resolver::resolve_all`], spread over the rayon pool.
    pub fn resolve_all_par(&self, grid: &TileGrid) -> Vec<SpriteCoord> {
        let (cells, width, height) = (grid.cells(), grid.width(), grid.height());
        (0..grid.len())
            .into_par_iter()
            .map(|i| self.resolve_unchecked(cells, width, height, i))
            .collect()
    }

    fn resolve_unchecked(&self, cells: &[u8], width: usize, height: usize, index: usize) -> SpriteCoord {
        let mask = mask_unchecked(cells, width, height, index);
        SpriteCoord::from_index(self.rules.sprite_for(mask.0))
    }
}

/// Resolve one cell against the built-in rule table.
pub fn resolve_sprite(cells: &[u8], width: usize, height: usize, index: usize) -> Result<SpriteCoord> {
    Resolver::default().resolve_sprite(cells, width, height, index)
}

fn mask_unchecked(cells: &[u8], width: usize, height: usize, index: usize) -> TileNeighbors {
    let (row, column) = index_to_row_column(index, width);
    TileNeighbors::from_grid(cells, width, height, row, column, |v| v != 0)
}

fn check_cell(cells: &[u8], width: usize, height: usize, index: usize) -> Result<()> {
    let expected = cell_count(width, height)?;
    if cells.len() != expected {
        return Err(AutotileError::CellCountMismatch { expected, actual: cells.len() });
    }
    if index >= expected {
        return Err(AutotileError::CellOutOfRange { index, len: expected });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::tile_neighbors::Direction;

    #[test]
    fn isolated_cell_uses_first_sprite() {
        let mut cells = vec![0u8; 15 * 15];
        cells[112] = 1;
        assert_eq!(resolve_sprite(&cells, 15, 15, 112).unwrap(), SpriteCoord::default());
        // the empty cell east of it sees one western neighbor, still a valid sprite
        assert_eq!(resolve_sprite(&cells, 15, 15, 113).unwrap(), SpriteCoord::from_index(2));
    }

    #[test]
    fn surrounded_cell_is_internal() {
        let cells = vec![1u8; 9];
        let resolver = Resolver::default();
        assert!(resolver.neighbor_mask(&cells, 3, 3, 4).unwrap().is_internal());
        assert_eq!(
            resolver.resolve_sprite(&cells, 3, 3, 4).unwrap(),
            SpriteCoord::from_index(46)
        );
    }

    #[test]
    fn hollow_center_and_corner() {
        let mut cells = vec![1u8; 9];
        cells[4] = 0;
        let resolver = Resolver::default();

        // the mask ignores the cell's own value: the hole is fully surrounded
        assert!(resolver.neighbor_mask(&cells, 3, 3, 4).unwrap().is_internal());

        // top-left corner: south and east filled, the south-east diagonal is the hole
        let corner = resolver.neighbor_mask(&cells, 3, 3, 0).unwrap();
        assert_eq!(corner.0, Direction::South.bit() | Direction::East.bit());
    }

    #[test]
    fn lone_center_sees_nothing() {
        let mut cells = vec![0u8; 9];
        cells[4] = 1;
        let resolver = Resolver::default();
        assert!(resolver.neighbor_mask(&cells, 3, 3, 4).unwrap().is_isolated());
        assert_eq!(resolver.resolve_sprite(&cells, 3, 3, 4).unwrap(), SpriteCoord::default());
    }

    #[test]
    fn unknown_mask_falls_back_to_sprite_zero() {
        let rules = RuleTable::from_entries([(0b1111_1111, 9)]).unwrap();
        let resolver = Resolver::new(&rules);
        let cells = vec![1u8; 9];
        assert_eq!(resolver.resolve_sprite(&cells, 3, 3, 4).unwrap(), SpriteCoord::from_index(9));
        assert_eq!(resolver.resolve_sprite(&cells, 3, 3, 0).unwrap(), SpriteCoord::default());
    }

    #[test]
    fn bad_arguments_fail_fast() {
        let cells = vec![1u8; 9];
        assert!(matches!(
            resolve_sprite(&cells, 0, 3, 0),
            Err(AutotileError::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(matches!(
            resolve_sprite(&cells, 2, 2, 0),
            Err(AutotileError::CellCountMismatch { expected: 4, actual: 9 })
        ));
        assert!(matches!(
            resolve_sprite(&cells, 3, 3, 9),
            Err(AutotileError::CellOutOfRange { index: 9, len: 9 })
        ));
        // width * height would overflow
        assert!(matches!(
            resolve_sprite(&[1; 4], usize::MAX, 2, 0),
            Err(AutotileError::InvalidDimensions { width: usize::MAX, height: 2 })
        ));
    }

    #[test]
    fn parallel_pass_matches_sequential() {
        let mut grid = TileGrid::new(15, 15).unwrap();
        for i in (0..grid.len()).step_by(7) {
            grid.toggle(i).unwrap();
        }
        let resolver = Resolver::default();
        let sequential = resolver.resolve_all(&grid);
        assert_eq!(sequential, resolver.resolve_all_par(&grid));
        assert_eq!(sequential, resolver.resolve_all(&grid));
    }
}
