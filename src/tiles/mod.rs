//! Autotiling: from an occupancy grid to sprite sheet coordinates.
//!
//! [`tile_neighbors`] builds the 8-bit neighbor mask of a cell, [`rules`]
//! maps masks to sprites and [`resolver`] ties both together per cell.

pub mod coords;
pub mod resolver;
pub mod rules;
pub mod tile_neighbors;

pub use coords::{index_to_row_column, row_column_to_index, SpriteCoord};
pub use resolver::{resolve_sprite, Resolver};
pub use rules::{RuleTable, SpriteIndex, FALLBACK_SPRITE, SHEET_COLUMNS};
pub use tile_neighbors::{Direction, TileNeighbors};
