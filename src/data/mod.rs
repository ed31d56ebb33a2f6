pub mod sprite_sheet;
