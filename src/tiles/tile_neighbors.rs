// For each tile, a bitmask of 8 bits for neighbor occupancy.
// 1 = filled, 0 = empty/off the map

/// Compass directions around a cell, valued by their bit in the mask.
///
/// North/South step along the column axis and East/West along the row axis,
/// matching the `column * width + row` cell addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    WestNorth = 0b0000_0001,
    North = 0b0000_0010,
    EastNorth = 0b0000_0100,
    West = 0b0000_1000,
    East = 0b0001_0000,
    WestSouth = 0b0010_0000,
    South = 0b0100_0000,
    EastSouth = 0b1000_0000,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::WestNorth,
        Direction::North,
        Direction::EastNorth,
        Direction::West,
        Direction::East,
        Direction::WestSouth,
        Direction::South,
        Direction::EastSouth,
    ];

    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// `(row, column)` step to the neighbor in this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::WestNorth => (-1, -1),
            Direction::North => (0, -1),
            Direction::EastNorth => (1, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::WestSouth => (-1, 1),
            Direction::South => (0, 1),
            Direction::EastSouth => (1, 1),
        }
    }

    /// The two axis directions a diagonal sits between, `None` for axis directions.
    pub const fn flanks(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::WestNorth => Some((Direction::West, Direction::North)),
            Direction::EastNorth => Some((Direction::East, Direction::North)),
            Direction::WestSouth => Some((Direction::West, Direction::South)),
            Direction::EastSouth => Some((Direction::East, Direction::South)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileNeighbors(pub u8);

impl TileNeighbors {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111_1111);

    pub fn is_internal(&self) -> bool {
        self.0 == 0b1111_1111
    }

    pub fn is_isolated(&self) -> bool {
        self.0 == 0
    }

    pub fn has(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// True when no diagonal bit is set without both of its flanking axis bits.
    /// Masks built by [`TileNeighbors::from_grid`] are always visible.
    pub fn is_visible(&self) -> bool {
        Direction::ALL.iter().all(|&d| match d.flanks() {
            Some((a, b)) => !self.has(d) || (self.has(a) && self.has(b)),
            None => true,
        })
    }

    /// Samples the 8 neighbors of `(row, column)` in a column-major grid.
    ///
    /// Rows are bounded by `width` and columns by `height`; anything outside
    /// reads as empty. A diagonal only counts when both flanking axis
    /// neighbors are filled too, since the artwork has no tile for a
    /// diagonal-only connection.
    pub fn from_grid<T, F: Fn(T) -> bool>(cells: &[T], width: usize, height: usize, row: usize, column: usize, is_filled: F) -> Self
    where T: Copy {
        let sample = |direction: Direction| -> bool {
            let (dr, dc) = direction.offset();
            let nr = row as isize + dr;
            let nc = column as isize + dc;
            if nr < 0 || nc < 0 || nr as usize >= width || nc as usize >= height {
                return false;
            }
            cells
                .get(nc as usize * width + nr as usize)
                .map_or(false, |&v| is_filled(v))
        };

        let mut mask = 0u8;
        for direction in [Direction::North, Direction::South, Direction::East, Direction::West] {
            if sample(direction) {
                mask |= direction.bit();
            }
        }
        for direction in [Direction::EastNorth, Direction::WestNorth, Direction::EastSouth, Direction::WestSouth] {
            if let Some((a, b)) = direction.flanks() {
                if mask & a.bit() != 0 && mask & b.bit() != 0 && sample(direction) {
                    mask |= direction.bit();
                }
            }
        }
        TileNeighbors(mask)
    }
}
