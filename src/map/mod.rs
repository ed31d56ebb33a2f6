pub mod editor;
pub mod grid;
