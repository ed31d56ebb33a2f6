use eframe::egui;

use crate::app::AutotileViewer;
use crate::config::keybindings::{BindingType, KeyBindings};

pub fn show_key_bindings_dialog(viewer: &mut AutotileViewer, ctx: &egui::Context) {
    egui::Window::new("Key Bindings")
        .collapsible(false)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Key Bindings");
            ui.add_space(10.0);

            ui.label("Note: Changes take effect immediately.");
            ui.add_space(10.0);

            for binding_type in BindingType::ALL {
                render_binding_selector(viewer, ui, binding_type);
            }

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui.button("Reset to Default").clicked() {
                    viewer.key_bindings = KeyBindings::default();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save & Close").clicked() {
                        viewer.save_settings();
                        viewer.show_key_bindings_dialog = false;
                    }

                    if ui.button("Cancel").clicked() {
                        // Discard changes
                        viewer.key_bindings = viewer.settings.key_bindings();
                        viewer.show_key_bindings_dialog = false;
                    }
                });
            });
        });
}

fn render_binding_selector(viewer: &mut AutotileViewer, ui: &mut egui::Ui, binding_type: BindingType) {
    ui.horizontal(|ui| {
        ui.label(format!("{}:", binding_type.label()));

        let current_key = viewer.key_bindings.get(binding_type);
        egui::ComboBox::from_id_source(format!("{}_key", binding_type.label()))
            .selected_text(format!("{:?}", current_key))
            .show_ui(ui, |ui| {
                for key in KeyBindings::get_all_available_keys() {
                    if ui.selectable_label(current_key == key, format!("{:?}", key)).clicked() {
                        viewer.key_bindings.update_binding(binding_type, key);
                    }
                }
            });
    });
}
