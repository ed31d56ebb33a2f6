use thiserror::Error;

/// Errors raised by the grid, the rule table loaders and the viewer assets.
///
/// The resolver itself never fails on grid contents: off-grid neighbors read
/// as empty and unknown masks fall back to sprite 0. Everything here is a
/// caller mistake or a bad file.
#[derive(Debug, Error)]
pub enum AutotileError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("grid has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("cell index {index} is outside a grid of {len} cells")]
    CellOutOfRange { index: usize, len: usize },

    #[error("rule for mask {mask:#010b} points at sprite {sprite}, sheet only has 64")]
    SpriteOutOfRange { mask: u8, sprite: u8 },

    #[error("mask {mask:#010b} has more than one rule")]
    DuplicateRule { mask: u8 },

    #[error("unsupported rule table version {0}")]
    UnsupportedRuleVersion(u32),

    #[error("rule table targets a sheet {0} columns wide, expected 8")]
    SheetColumnsMismatch(u32),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AutotileError>;
