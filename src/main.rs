use eframe;

mod app;
mod config;
mod data;
mod ui;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Autotile Viewer",
        options,
        Box::new(|cc| Box::new(app::AutotileViewer::new(cc))),
    );
}
