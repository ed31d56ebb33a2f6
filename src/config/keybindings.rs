use eframe::egui;
use std::fmt;
use serde::{Serialize, Deserialize};
use log::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    pub fill: egui::Key,
    pub clear: egui::Key,
    pub scatter: egui::Key,
    pub toggle_grid: egui::Key,
    pub toggle_masks: egui::Key,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BindingType {
    Fill,
    Clear,
    Scatter,
    ToggleGrid,
    ToggleMasks,
}

impl BindingType {
    pub const ALL: [BindingType; 5] = [
        BindingType::Fill,
        BindingType::Clear,
        BindingType::Scatter,
        BindingType::ToggleGrid,
        BindingType::ToggleMasks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BindingType::Fill => "Fill all",
            BindingType::Clear => "Clear all",
            BindingType::Scatter => "Scatter",
            BindingType::ToggleGrid => "Grid lines",
            BindingType::ToggleMasks => "Mask labels",
        }
    }
}

/// Key names as stored in the settings file, e.g. `"F"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializableKeyBindings {
    pub fill: String,
    pub clear: String,
    pub scatter: String,
    pub toggle_grid: String,
    pub toggle_masks: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fill: egui::Key::F,
            clear: egui::Key::C,
            scatter: egui::Key::R,
            toggle_grid: egui::Key::G,
            toggle_masks: egui::Key::M,
        }
    }
}

impl Default for SerializableKeyBindings {
    fn default() -> Self {
        KeyBindings::default().to_serializable()
    }
}

impl fmt::Display for KeyBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = BindingType::ALL
            .iter()
            .map(|&b| format!("{} [{:?}]", b.label(), self.get(b)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl KeyBindings {
    pub fn to_serializable(&self) -> SerializableKeyBindings {
        SerializableKeyBindings {
            fill: Self::key_to_string(self.fill),
            clear: Self::key_to_string(self.clear),
            scatter: Self::key_to_string(self.scatter),
            toggle_grid: Self::key_to_string(self.toggle_grid),
            toggle_masks: Self::key_to_string(self.toggle_masks),
        }
    }

    fn key_to_string(key: egui::Key) -> String {
        format!("{:?}", key)
    }

    /// Unknown key names keep the default for that binding.
    pub fn from_serializable(serial: &SerializableKeyBindings) -> Self {
        let mut bindings = Self::default();
        bindings.fill = Self::parse_key(&serial.fill, bindings.fill);
        bindings.clear = Self::parse_key(&serial.clear, bindings.clear);
        bindings.scatter = Self::parse_key(&serial.scatter, bindings.scatter);
        bindings.toggle_grid = Self::parse_key(&serial.toggle_grid, bindings.toggle_grid);
        bindings.toggle_masks = Self::parse_key(&serial.toggle_masks, bindings.toggle_masks);
        bindings
    }

    fn parse_key(name: &str, default: egui::Key) -> egui::Key {
        let name = name.trim();
        match Self::get_all_available_keys()
            .into_iter()
            .find(|k| format!("{:?}", k).eq_ignore_ascii_case(name))
        {
            Some(key) => key,
            None => {
                debug!("Unknown key '{}', keeping {:?}", name, default);
                default
            }
        }
    }

    pub fn get_all_available_keys() -> Vec<egui::Key> {
        vec![
            egui::Key::Space,
            egui::Key::A, egui::Key::B, egui::Key::C, egui::Key::D, egui::Key::E,
            egui::Key::F, egui::Key::G, egui::Key::H, egui::Key::I, egui::Key::J,
            egui::Key::K, egui::Key::L, egui::Key::M, egui::Key::N, egui::Key::O,
            egui::Key::P, egui::Key::Q, egui::Key::R, egui::Key::S, egui::Key::T,
            egui::Key::U, egui::Key::V, egui::Key::W, egui::Key::X, egui::Key::Y,
            egui::Key::Z,
        ]
    }

    pub fn get(&self, binding_type: BindingType) -> egui::Key {
        match binding_type {
            BindingType::Fill => self.fill,
            BindingType::Clear => self.clear,
            BindingType::Scatter => self.scatter,
            BindingType::ToggleGrid => self.toggle_grid,
            BindingType::ToggleMasks => self.toggle_masks,
        }
    }

    pub fn update_binding(&mut self, binding_type: BindingType, key: egui::Key) {
        match binding_type {
            BindingType::Fill => self.fill = key,
            BindingType::Clear => self.clear = key,
            BindingType::Scatter => self.scatter = key,
            BindingType::ToggleGrid => self.toggle_grid = key,
            BindingType::ToggleMasks => self.toggle_masks = key,
        }
    }
}
