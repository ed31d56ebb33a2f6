use std::path::{Path, PathBuf};

use eframe::egui;
use log::{debug, error, info, warn};

use autotile::tiles::TileNeighbors;
use autotile::{AutotileError, Resolver, RuleTable, SpriteCoord, TileGrid};

use crate::config::keybindings::KeyBindings;
use crate::config::settings::ViewerSettings;
use crate::data::sprite_sheet::SpriteSheet;
use crate::ui::dialogs::show_key_bindings_dialog;
use crate::ui::input::handle_input;
use crate::ui::render::render_app;

/// The viewer owns the grid and mutates it between frames; resolution only
/// ever sees a grid nobody is writing to.
pub struct AutotileViewer {
    pub grid: TileGrid,
    pub rules: RuleTable,
    /// Resolved sprite per cell, rebuilt whenever `sprites_dirty` is set.
    pub sprites: Vec<SpriteCoord>,
    pub sprites_dirty: bool,
    pub sprite_sheet: Option<SpriteSheet>,
    pub settings: ViewerSettings,
    pub key_bindings: KeyBindings,
    pub status_message: Option<String>,
    pub hovered_cell: Option<usize>,
    /// Fill state being painted while the primary button is dragged.
    pub drag_fill: Option<bool>,
    pub show_key_bindings_dialog: bool,
}

impl Default for AutotileViewer {
    fn default() -> Self {
        Self::from_settings(ViewerSettings::default())
    }
}

impl AutotileViewer {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut viewer = Self::from_settings(ViewerSettings::load());
        if let Some(path) = viewer.settings.rule_table.clone() {
            viewer.load_rule_table(&path);
        }
        if let Some(path) = viewer.settings.sprite_sheet.clone() {
            viewer.load_sprite_sheet(&path, &cc.egui_ctx);
        }
        viewer
    }

    fn from_settings(settings: ViewerSettings) -> Self {
        let grid = match TileGrid::new(settings.grid_width, settings.grid_height) {
            Ok(grid) => grid,
            Err(e) => {
                warn!("{}, falling back to the default grid", e);
                TileGrid::default()
            }
        };
        info!("Created {}x{} grid", grid.width(), grid.height());
        Self {
            grid,
            rules: RuleTable::builtin().clone(),
            sprites: Vec::new(),
            sprites_dirty: true,
            sprite_sheet: None,
            key_bindings: settings.key_bindings(),
            settings,
            status_message: None,
            hovered_cell: None,
            drag_fill: None,
            show_key_bindings_dialog: false,
        }
    }

    /// Re-resolve every cell if the grid or the rules changed since last frame.
    pub fn refresh_sprites(&mut self) {
        if !self.sprites_dirty && self.sprites.len() == self.grid.len() {
            return;
        }
        self.sprites = Resolver::new(&self.rules).resolve_all_par(&self.grid);
        self.sprites_dirty = false;
        debug!("Resolved {} cells ({} filled)", self.sprites.len(), self.grid.filled_count());
    }

    pub fn mask_at(&self, index: usize) -> Option<TileNeighbors> {
        Resolver::new(&self.rules)
            .neighbor_mask(self.grid.cells(), self.grid.width(), self.grid.height(), index)
            .ok()
    }

    pub fn fill(&mut self, filled: bool) {
        self.grid.fill(filled);
        self.sprites_dirty = true;
    }

    pub fn scatter(&mut self) {
        let mut rng = rand::rng();
        self.grid.scatter(&mut rng, self.settings.scatter_density);
        self.sprites_dirty = true;
    }

    pub fn load_sprite_sheet(&mut self, path: &Path, ctx: &egui::Context) {
        match SpriteSheet::load(path, ctx) {
            Ok(sheet) => {
                self.sprite_sheet = Some(sheet);
                self.settings.sprite_sheet = Some(path.to_path_buf());
                self.status_message = None;
            }
            Err(e) => self.report_error("Failed to load sprite sheet", &e),
        }
    }

    pub fn load_rule_table(&mut self, path: &Path) {
        match RuleTable::load(path) {
            Ok(rules) => {
                self.rules = rules;
                self.settings.rule_table = Some(path.to_path_buf());
                self.sprites_dirty = true;
                self.status_message = None;
            }
            Err(e) => self.report_error("Failed to load rule table", &e),
        }
    }

    pub fn reset_rule_table(&mut self) {
        self.rules = RuleTable::builtin().clone();
        self.settings.rule_table = None;
        self.sprites_dirty = true;
    }

    pub fn export_rule_table(&mut self, path: &Path) {
        match self.rules.save(path) {
            Ok(()) => {
                info!("Rule table written to {}", path.display());
                self.status_message = Some(format!("Saved rules to {}", path.display()));
            }
            Err(e) => self.report_error("Failed to save rule table", &e),
        }
    }

    pub fn pick_sprite_sheet(&mut self, ctx: &egui::Context) {
        if let Some(path) = pick_file("Images", &["png", "bmp", "gif"]) {
            self.load_sprite_sheet(&path, ctx);
            self.save_settings();
        }
    }

    pub fn pick_rule_table(&mut self) {
        if let Some(path) = pick_file("Rule table", &["json"]) {
            self.load_rule_table(&path);
            self.save_settings();
        }
    }

    pub fn pick_rule_table_export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Rule table", &["json"])
            .set_file_name("rules.json")
            .save_file()
        {
            self.export_rule_table(&path);
        }
    }

    pub fn save_settings(&mut self) {
        self.settings.set_key_bindings(&self.key_bindings);
        if let Err(e) = self.settings.save() {
            self.report_error("Failed to save settings", &e);
        }
    }

    fn report_error(&mut self, context: &str, e: &AutotileError) {
        error!("{}: {}", context, e);
        self.status_message = Some(format!("{}: {}", context, e));
    }
}

fn pick_file(filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new().add_filter(filter_name, extensions).pick_file()
}

impl eframe::App for AutotileViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        handle_input(self, ctx);
        self.refresh_sprites();
        render_app(self, ctx);
        if self.show_key_bindings_dialog {
            show_key_bindings_dialog(self, ctx);
        }
    }
}
