use eframe::egui;
use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use autotile::map::editor::MapView;
use autotile::tiles::{Direction, TileNeighbors};

use crate::app::AutotileViewer;
use crate::ui::input::handle_pointer;

// Constants
pub const GRID_PADDING: f32 = 16.0;
pub const GRID_COLOR: Color32 = Color32::from_rgb(70, 70, 70);
pub const SOLID_TILE_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
pub const EDGE_COLOR: Color32 = Color32::from_rgb(90, 60, 40);
pub const HOVER_COLOR: Color32 = Color32::from_rgb(135, 206, 250);
pub const BG_COLOR: Color32 = Color32::from_rgb(30, 30, 30);

pub fn render_app(viewer: &mut AutotileViewer, ctx: &egui::Context) {
    render_top_panel(viewer, ctx);
    render_bottom_panel(viewer, ctx);
    render_central_panel(viewer, ctx);
}

fn render_top_panel(viewer: &mut AutotileViewer, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Sprite Sheet...").clicked() {
                    viewer.pick_sprite_sheet(ctx);
                    ui.close_menu();
                }
                if ui.button("Open Rule Table...").clicked() {
                    viewer.pick_rule_table();
                    ui.close_menu();
                }
                if ui.button("Export Rule Table...").clicked() {
                    viewer.pick_rule_table_export();
                    ui.close_menu();
                }
                if ui.button("Use Built-in Rules").clicked() {
                    viewer.reset_rule_table();
                    viewer.save_settings();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    viewer.save_settings();
                    std::process::exit(0);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Fill").clicked() {
                    viewer.fill(true);
                    ui.close_menu();
                }
                if ui.button("Clear").clicked() {
                    viewer.fill(false);
                    ui.close_menu();
                }
                if ui.button("Scatter").clicked() {
                    viewer.scatter();
                    ui.close_menu();
                }
                ui.add(egui::Slider::new(&mut viewer.settings.scatter_density, 0.0..=1.0).text("density"));
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut viewer.settings.show_grid, "Show Grid");
                ui.checkbox(&mut viewer.settings.show_masks, "Show Masks");

                ui.separator();

                if ui.button("Key Bindings...").clicked() {
                    viewer.show_key_bindings_dialog = true;
                    ui.close_menu();
                }
            });

            ui.separator();
            ui.label(format!("{} rules", viewer.rules.len()));
            if let Some(sheet) = &viewer.sprite_sheet {
                ui.label(format!("Sheet: {}", sheet.path.display()));
            }
        });
    });
}

fn render_bottom_panel(viewer: &mut AutotileViewer, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Filled: {}/{}", viewer.grid.filled_count(), viewer.grid.len()));

            if let Some(index) = viewer.hovered_cell {
                let (row, column) = viewer.grid.row_column(index);
                ui.label(format!("Cell {} (row {}, column {})", index, row, column));
                if let Some(mask) = viewer.mask_at(index) {
                    ui.label(format!("Mask: {:08b}", mask.0));
                }
                if let Some(coord) = viewer.sprites.get(index) {
                    ui.label(format!("Sprite: {} ({}, {})", coord.index(), coord.offset_x, coord.offset_y));
                }
            }

            if let Some(message) = &viewer.status_message {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.colored_label(Color32::from_rgb(230, 120, 120), message.as_str());
                });
            }
        });
    });
}

fn render_central_panel(viewer: &mut AutotileViewer, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(
            ui.available_size(),
            Sense::click_and_drag(),
        );

        painter.rect_filled(response.rect, 0.0, BG_COLOR);

        let view = MapView::new(
            response.rect.min + Vec2::splat(GRID_PADDING),
            viewer.settings.tile_size,
        );

        handle_pointer(viewer, &response, &view);
        viewer.refresh_sprites();

        render_tiles(viewer, &painter, &view);

        if viewer.settings.show_grid {
            render_grid_lines(viewer, &painter, &view);
        }

        if let Some(index) = viewer.hovered_cell {
            let (row, column) = viewer.grid.row_column(index);
            painter.rect_stroke(view.cell_rect(row, column), 0.0, Stroke::new(2.0, HOVER_COLOR));
        }
    });
}

fn render_tiles(viewer: &AutotileViewer, painter: &egui::Painter, view: &MapView) {
    let grid = &viewer.grid;

    for (index, coord) in viewer.sprites.iter().enumerate() {
        // empty cells stay hidden
        if !grid.is_filled(index) {
            continue;
        }
        let (row, column) = grid.row_column(index);
        let rect = view.cell_rect(row, column);

        let mask = viewer.mask_at(index).unwrap_or(TileNeighbors::NONE);

        match &viewer.sprite_sheet {
            Some(sheet) => sheet.draw(painter, rect, *coord),
            None => render_placeholder_tile(painter, rect, mask),
        }

        if viewer.settings.show_masks {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("{}", mask.0),
                FontId::monospace(rect.height() * 0.3),
                Color32::BLACK,
            );
        }
    }
}

/// Stand-in when no sheet is loaded: a border on every open side and a notch
/// on every inside corner, which is what the blob artwork depicts.
fn render_placeholder_tile(painter: &egui::Painter, rect: Rect, mask: TileNeighbors) {
    painter.rect_filled(rect, 0.0, SOLID_TILE_COLOR);

    let edge = (rect.width() * 0.12).max(1.0);
    let sides = [
        (Direction::North, Rect::from_min_max(rect.min, Pos2::new(rect.max.x, rect.min.y + edge))),
        (Direction::South, Rect::from_min_max(Pos2::new(rect.min.x, rect.max.y - edge), rect.max)),
        (Direction::West, Rect::from_min_max(rect.min, Pos2::new(rect.min.x + edge, rect.max.y))),
        (Direction::East, Rect::from_min_max(Pos2::new(rect.max.x - edge, rect.min.y), rect.max)),
    ];
    for (direction, side) in sides {
        if !mask.has(direction) {
            painter.rect_filled(side, 0.0, EDGE_COLOR);
        }
    }

    let corners = [
        (Direction::WestNorth, rect.left_top()),
        (Direction::EastNorth, Pos2::new(rect.max.x - edge, rect.min.y)),
        (Direction::WestSouth, Pos2::new(rect.min.x, rect.max.y - edge)),
        (Direction::EastSouth, rect.max - Vec2::splat(edge)),
    ];
    for (direction, min) in corners {
        if let Some((a, b)) = direction.flanks() {
            if mask.has(a) && mask.has(b) && !mask.has(direction) {
                painter.rect_filled(Rect::from_min_size(min, Vec2::splat(edge)), 0.0, EDGE_COLOR);
            }
        }
    }
}

fn render_grid_lines(viewer: &AutotileViewer, painter: &egui::Painter, view: &MapView) {
    let bounds = view.grid_rect(&viewer.grid);
    for i in 0..=viewer.grid.width() {
        let x = bounds.min.x + i as f32 * view.tile_size;
        painter.line_segment(
            [Pos2::new(x, bounds.min.y), Pos2::new(x, bounds.max.y)],
            Stroke::new(1.0, GRID_COLOR),
        );
    }
    for i in 0..=viewer.grid.height() {
        let y = bounds.min.y + i as f32 * view.tile_size;
        painter.line_segment(
            [Pos2::new(bounds.min.x, y), Pos2::new(bounds.max.x, y)],
            Stroke::new(1.0, GRID_COLOR),
        );
    }
}
