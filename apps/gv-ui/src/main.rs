#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use std::path::PathBuf;

use app::GenVanetApp;
use gv_app::{Dashboard, DashboardConfig};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    // Optional first argument: path to a YAML config file.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration, using defaults");
        DashboardConfig::default()
    });

    let dashboard = match Dashboard::with_http(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!("Failed to start dashboard: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title("genVANET"),
        ..Default::default()
    };

    eframe::run_native(
        "genVANET",
        options,
        Box::new(|cc| Ok(Box::new(GenVanetApp::new(cc, dashboard)))),
    )
}
