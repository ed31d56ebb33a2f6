use eframe::egui;

use autotile::map::editor::{set_tile_at, toggle_tile_at, MapView};

use crate::app::AutotileViewer;
use crate::config::keybindings::BindingType;

/// Keyboard shortcuts. Pointer editing lives in [`handle_pointer`], which
/// needs the central panel's response.
pub fn handle_input(viewer: &mut AutotileViewer, ctx: &egui::Context) {
    if ctx.wants_keyboard_input() {
        return;
    }
    // Collect first: the input lock must not be held while the viewer
    // loads textures through the same context.
    let (pressed, open_pressed) = {
        let input = ctx.input();
        let pressed: Vec<BindingType> = BindingType::ALL
            .iter()
            .copied()
            .filter(|&b| input.key_pressed(viewer.key_bindings.get(b)) && !input.modifiers.ctrl)
            .collect();
        (pressed, input.modifiers.ctrl && input.key_pressed(egui::Key::O))
    };

    for binding in pressed {
        match binding {
            BindingType::Fill => viewer.fill(true),
            BindingType::Clear => viewer.fill(false),
            BindingType::Scatter => viewer.scatter(),
            BindingType::ToggleGrid => viewer.settings.show_grid = !viewer.settings.show_grid,
            BindingType::ToggleMasks => viewer.settings.show_masks = !viewer.settings.show_masks,
        }
    }

    if open_pressed {
        viewer.pick_sprite_sheet(ctx);
    }
}

/// Click toggles a cell; dragging with the primary button paints the state
/// the first cell was toggled to.
pub fn handle_pointer(viewer: &mut AutotileViewer, response: &egui::Response, view: &MapView) {
    viewer.hovered_cell = response.hover_pos().and_then(|pos| view.screen_to_cell(&viewer.grid, pos));

    let pos = match response.interact_pointer_pos() {
        Some(pos) => pos,
        None => {
            viewer.drag_fill = None;
            return;
        }
    };

    if response.clicked() {
        if toggle_tile_at(&mut viewer.grid, view, pos).is_some() {
            viewer.sprites_dirty = true;
        }
        viewer.drag_fill = None;
    } else if response.drag_started() {
        viewer.drag_fill = toggle_tile_at(&mut viewer.grid, view, pos);
        viewer.sprites_dirty |= viewer.drag_fill.is_some();
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(filled) = viewer.drag_fill {
            if set_tile_at(&mut viewer.grid, view, pos, filled) {
                viewer.sprites_dirty = true;
            }
        }
    }

    if response.drag_released() {
        viewer.drag_fill = None;
    }
}
