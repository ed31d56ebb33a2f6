use std::path::{Path, PathBuf};

use eframe::egui;
use image::RgbaImage;
use log::{info, warn};

use autotile::tiles::SHEET_COLUMNS;
use autotile::{Result, SpriteCoord};

/// The 8x8 tile sheet uploaded to egui.
pub struct SpriteSheet {
    pub path: PathBuf,
    pub texture: egui::TextureHandle,
    pub pixel_size: [usize; 2],
}

impl SpriteSheet {
    pub fn load(path: &Path, ctx: &egui::Context) -> Result<Self> {
        let image = load_texture_from_path(path)?;
        let pixel_size = [image.width() as usize, image.height() as usize];
        if pixel_size[0] % SHEET_COLUMNS != 0 || pixel_size[1] % SHEET_COLUMNS != 0 {
            warn!(
                "Sprite sheet {} is {}x{}, not a multiple of {} sprites; tiles may bleed",
                path.display(), pixel_size[0], pixel_size[1], SHEET_COLUMNS
            );
        }
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| "sprite_sheet".to_string());
        let texture = add_image_to_egui(ctx, &image, &name);
        info!("Loaded sprite sheet {} ({}x{})", path.display(), pixel_size[0], pixel_size[1]);
        Ok(Self { path: path.to_path_buf(), texture, pixel_size })
    }

    pub fn draw(&self, painter: &egui::Painter, rect: egui::Rect, coord: SpriteCoord) {
        painter.add(egui::Shape::image(self.texture.id(), rect, sprite_uv_rect(coord), egui::Color32::WHITE));
    }
}

/// UV rectangle of a sprite, the sheet being 8 sprites along each side.
pub fn sprite_uv_rect(coord: SpriteCoord) -> egui::Rect {
    let step = 1.0 / SHEET_COLUMNS as f32;
    let min = egui::pos2(coord.offset_x as f32 * step, coord.offset_y as f32 * step);
    egui::Rect::from_min_size(min, egui::vec2(step, step))
}

fn load_texture_from_path(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

fn add_image_to_egui(ctx: &egui::Context, image: &RgbaImage, name: &str) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.as_flat_samples();

    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        size,
        pixels.as_slice()
    );

    ctx.load_texture(name, color_image, Default::default())
}
