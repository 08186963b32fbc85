pub mod network_map;
pub mod prediction_view;
pub mod scenario_form;
pub mod simulation_view;

pub use network_map::NetworkMap;
pub use prediction_view::PredictionView;
pub use scenario_form::{PredictForm, ScenarioForm};
pub use simulation_view::SimulationView;

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
pub const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);
pub const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);

/// Red framed message used for workflow failures and the connectivity banner.
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgb(69, 10, 10))
        .stroke(egui::Stroke::new(1.0, ERROR_COLOR))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(ERROR_COLOR, message);
        });
    ui.add_space(6.0);
}

pub fn loading_indicator(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(message);
    });
}

/// Small titled card with a large value.
pub fn stat_card(ui: &mut egui::Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(140.0);
        ui.vertical(|ui| {
            ui.small(title);
            ui.heading(value);
        });
    });
}

pub fn route_color32(label: gv_core::RouteLabel) -> egui::Color32 {
    let [r, g, b] = gv_core::topology::route_color(label);
    egui::Color32::from_rgb(r, g, b)
}
