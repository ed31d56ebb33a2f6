use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use autotile::map::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use autotile::Result;

use super::keybindings::{KeyBindings, SerializableKeyBindings};

const SETTINGS_FILE: &str = "autotile_viewer.json";

/// Viewer preferences, stored as JSON in the user's config directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Size of one sprite in the sheet, and of one cell on screen.
    pub tile_size: f32,
    pub sprite_sheet: Option<PathBuf>,
    pub rule_table: Option<PathBuf>,
    pub show_grid: bool,
    pub show_masks: bool,
    pub scatter_density: f64,
    pub keys: SerializableKeyBindings,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_WIDTH,
            grid_height: DEFAULT_HEIGHT,
            tile_size: 48.0,
            sprite_sheet: None,
            rule_table: None,
            show_grid: false,
            show_masks: false,
            scatter_density: 0.6,
            keys: SerializableKeyBindings::default(),
        }
    }
}

impl ViewerSettings {
    pub fn settings_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join(SETTINGS_FILE)
    }

    /// Settings from the default location, or defaults if missing or unreadable.
    pub fn load() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::from_serializable(&self.keys)
    }

    pub fn set_key_bindings(&mut self, bindings: &KeyBindings) {
        self.keys = bindings.to_serializable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_map() {
        let settings = ViewerSettings::default();
        assert_eq!((settings.grid_width, settings.grid_height), (15, 15));
        assert_eq!(settings.tile_size, 48.0);
        assert!(settings.sprite_sheet.is_none());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let settings: ViewerSettings =
            serde_json::from_str(r#"{"grid_width": 20, "keys": {"fill": "Q"}}"#).unwrap();
        assert_eq!(settings.grid_width, 20);
        assert_eq!(settings.grid_height, 15);
        assert_eq!(settings.keys.fill, "Q");
        assert_eq!(settings.keys.clear, "C");
        assert_eq!(settings.key_bindings().fill, eframe::egui::Key::Q);
    }

    #[test]
    fn save_and_load_through_a_file() {
        let path = std::env::temp_dir().join(format!("autotile_settings_{}.json", std::process::id()));
        let mut settings = ViewerSettings::default();
        settings.sprite_sheet = Some(PathBuf::from("tiles.png"));
        settings.show_grid = true;
        settings.save_to(&path).unwrap();
        let loaded = ViewerSettings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
