use std::thread;

use autotile::tiles::{Direction, TileNeighbors};
use autotile::{resolve_sprite, AutotileError, Resolver, RuleTable, SpriteCoord, TileGrid};

fn mask_of(grid: &TileGrid, index: usize) -> TileNeighbors {
    Resolver::default()
        .neighbor_mask(grid.cells(), grid.width(), grid.height(), index)
        .unwrap()
}

#[test]
fn cells_without_filled_neighbors_use_first_sprite() {
    let mut grid = TileGrid::empty(15, 15).unwrap();
    for index in [0, 32, 100, 224] {
        grid.set(index, true).unwrap();
    }
    for index in [0, 32, 100, 224] {
        assert_eq!(Resolver::default().resolve_cell(&grid, index).unwrap(), SpriteCoord { offset_x: 0, offset_y: 0 });
    }
}

#[test]
fn full_grid_center_and_borders() {
    let grid = TileGrid::new(5, 5).unwrap();
    let resolver = Resolver::default();
    let center = grid.index_of(2, 2).unwrap();
    assert_eq!(mask_of(&grid, center).0, 0b1111_1111);
    assert_eq!(
        resolver.resolve_cell(&grid, center).unwrap(),
        SpriteCoord::from_index(RuleTable::builtin().lookup(0xFF).unwrap())
    );

    // top edge (column 0): nothing to the north
    let top = mask_of(&grid, grid.index_of(2, 0).unwrap());
    assert_eq!(
        top.0,
        Direction::West.bit() | Direction::East.bit() | Direction::South.bit()
            | Direction::WestSouth.bit() | Direction::EastSouth.bit()
    );

    // bottom-right corner: only west, north and the diagonal between them
    let corner = mask_of(&grid, grid.index_of(4, 4).unwrap());
    assert_eq!(corner.0, Direction::West.bit() | Direction::North.bit() | Direction::WestNorth.bit());
}

#[test]
fn non_square_grid_bounds_rows_by_width() {
    // 4 wide, 2 tall: index = column * 4 + row
    let grid = TileGrid::new(4, 2).unwrap();
    let last_row = mask_of(&grid, grid.index_of(3, 0).unwrap());
    assert!(!last_row.has(Direction::East));
    assert!(last_row.has(Direction::South));
    let bottom = mask_of(&grid, grid.index_of(1, 1).unwrap());
    assert!(!bottom.has(Direction::South));
    assert!(bottom.has(Direction::North) && bottom.has(Direction::East) && bottom.has(Direction::West));
}

#[test]
fn every_resolved_mask_has_a_rule() {
    let mut grid = TileGrid::new(9, 7).unwrap();
    for index in (0..grid.len()).filter(|i| i % 3 == 0 || i % 5 == 0) {
        grid.toggle(index).unwrap();
    }
    for index in 0..grid.len() {
        let mask = mask_of(&grid, index);
        assert!(RuleTable::builtin().lookup(mask.0).is_some(), "mask {:08b} has no rule", mask.0);
    }
}

#[test]
fn diagonal_hidden_without_both_flanks() {
    // 3x3, center plus north-west corner plus north only
    let mut cells = vec![0u8; 9];
    cells[4] = 1;
    cells[0] = 1;
    cells[1] = 1;
    let resolver = Resolver::default();
    let mask = resolver.neighbor_mask(&cells, 3, 3, 4).unwrap();
    assert!(mask.has(Direction::North));
    assert!(!mask.has(Direction::WestNorth));

    cells[3] = 1;
    let mask = resolver.neighbor_mask(&cells, 3, 3, 4).unwrap();
    assert!(mask.has(Direction::WestNorth));
}

#[test]
fn resolving_twice_gives_the_same_answer() {
    let mut cells = vec![1u8; 9];
    cells[4] = 0;
    let first: Vec<_> = (0..9).map(|i| resolve_sprite(&cells, 3, 3, i).unwrap()).collect();
    let second: Vec<_> = (0..9).map(|i| resolve_sprite(&cells, 3, 3, i).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn threads_agree_with_a_sequential_pass() {
    let mut grid = TileGrid::default();
    for index in (0..grid.len()).filter(|i| (i * 7) % 11 < 4) {
        grid.toggle(index).unwrap();
    }
    let resolver = Resolver::default();
    let expected = resolver.resolve_all(&grid);

    let reversed: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..grid.len())
            .rev()
            .map(|i| {
                let grid = &grid;
                s.spawn(move || (i, Resolver::default().resolve_cell(grid, i).unwrap()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (index, coord) in reversed {
        assert_eq!(coord, expected[index]);
    }
    assert_eq!(resolver.resolve_all_par(&grid), expected);
}

#[test]
fn hollow_three_by_three() {
    let mut cells = vec![1u8; 9];
    cells[4] = 0;
    // only the south and east sides are inside the grid for the top-left corner,
    // and the south-east diagonal is the hole
    let corner = Resolver::default().neighbor_mask(&cells, 3, 3, 0).unwrap();
    assert_eq!(corner.0, Direction::South.bit() | Direction::East.bit());
    assert_eq!(
        resolve_sprite(&cells, 3, 3, 0).unwrap(),
        SpriteCoord::from_index(RuleTable::builtin().sprite_for(corner.0))
    );
}

#[test]
fn single_filled_cell_in_default_grid() {
    let mut grid = TileGrid::empty(15, 15).unwrap();
    grid.set(7 * 15 + 7, true).unwrap();
    let resolver = Resolver::default();
    assert_eq!(resolver.resolve_cell(&grid, 7 * 15 + 7).unwrap(), SpriteCoord::default());
    for coord in resolver.resolve_all(&grid) {
        assert!(coord.offset_x < 8 && coord.offset_y < 8);
    }
}

#[test]
fn out_of_range_index_is_rejected() {
    let grid = TileGrid::default();
    assert!(matches!(
        Resolver::default().resolve_cell(&grid, 225),
        Err(AutotileError::CellOutOfRange { index: 225, len: 225 })
    ));
}
