pub mod error;
pub mod map;
pub mod tiles;

pub use error::{AutotileError, Result};
pub use map::grid::TileGrid;
pub use tiles::{resolve_sprite, Resolver, RuleTable, SpriteCoord};
