pub mod keybindings;
pub mod settings;
