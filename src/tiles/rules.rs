use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::tile_neighbors::TileNeighbors;
use crate::error::{AutotileError, Result};

/// Position of a sprite in the sheet, counted left to right, top to bottom.
pub type SpriteIndex = u8;

/// The sprite sheet is 8 sprites wide and 8 tall.
pub const SHEET_COLUMNS: usize = 8;
pub const SHEET_CAPACITY: usize = SHEET_COLUMNS * SHEET_COLUMNS;

/// Sprite drawn for masks the table has no rule for.
pub const FALLBACK_SPRITE: SpriteIndex = 0;

pub const RULE_FILE_VERSION: u32 = 1;

static BUILTIN_RULES: Lazy<RuleTable> = Lazy::new(|| {
    let table = RuleTable::blob();
    debug!("Built default rule table with {} entries", table.len());
    table
});

/// On-disk form of a rule table. Ships next to the sprite sheet it describes.
#[derive(Serialize, Deserialize)]
struct RuleFile {
    version: u32,
    sheet_columns: u32,
    rules: Vec<(u8, u8)>,
}

/// Mapping from neighbor mask to sprite index.
///
/// Stored as one slot per possible mask; empty slots are masks the artwork
/// does not cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    sprites: [Option<SpriteIndex>; 256],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self { sprites: [None; 256] }
    }
}

impl RuleTable {
    /// The table matching the bundled 47-tile blob sheet.
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN_RULES
    }

    /// Numbers every visible mask in ascending order: mask 0 is sprite 0,
    /// the fully surrounded mask is sprite 46.
    fn blob() -> Self {
        let mut table = Self::default();
        let mut next: SpriteIndex = 0;
        for mask in 0..=u8::MAX {
            if TileNeighbors(mask).is_visible() {
                table.sprites[mask as usize] = Some(next);
                next += 1;
            }
        }
        table
    }

    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, SpriteIndex)>,
    {
        let mut table = Self::default();
        for (mask, sprite) in entries {
            if sprite as usize >= SHEET_CAPACITY {
                return Err(AutotileError::SpriteOutOfRange { mask, sprite });
            }
            let slot = &mut table.sprites[mask as usize];
            if slot.is_some() {
                return Err(AutotileError::DuplicateRule { mask });
            }
            *slot = Some(sprite);
        }
        Ok(table)
    }

    pub fn lookup(&self, mask: u8) -> Option<SpriteIndex> {
        self.sprites[mask as usize]
    }

    /// Like [`RuleTable::lookup`] but falls back to the blank sprite.
    pub fn sprite_for(&self, mask: u8) -> SpriteIndex {
        self.lookup(mask).unwrap_or(FALLBACK_SPRITE)
    }

    /// Populated `(mask, sprite)` pairs in mask order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, SpriteIndex)> + '_ {
        self.sprites
            .iter()
            .enumerate()
            .filter_map(|(mask, sprite)| sprite.map(|s| (mask as u8, s)))
    }

    pub fn len(&self) -> usize {
        self.sprites.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.iter().all(Option::is_none)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: RuleFile = serde_json::from_str(json)?;
        Self::from_rule_file(file)
    }

    /// Load a rule table file written by [`RuleTable::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let file: RuleFile = serde_json::from_reader(reader)?;
        let table = Self::from_rule_file(file)?;
        info!("Loaded {} rules from {}", table.len(), path.display());
        Ok(table)
    }

    fn from_rule_file(file: RuleFile) -> Result<Self> {
        if file.version != RULE_FILE_VERSION {
            return Err(AutotileError::UnsupportedRuleVersion(file.version));
        }
        if file.sheet_columns as usize != SHEET_COLUMNS {
            return Err(AutotileError::SheetColumnsMismatch(file.sheet_columns));
        }
        Self::from_entries(file.rules)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let file = RuleFile {
            version: RULE_FILE_VERSION,
            sheet_columns: SHEET_COLUMNS as u32,
            rules: self.entries().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
