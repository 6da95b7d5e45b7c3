#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod theme;

fn main() -> eframe::Result {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("CueBoard")
            .with_inner_size([860.0, 560.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CueBoard",
        native_options,
        Box::new(|cc| Ok(Box::new(app::CueBoardApp::new(cc)))),
    )
}
