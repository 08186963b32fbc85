use gv_app::{Dashboard, LoadedPrediction, PREDICTION_LOADING};
use gv_core::{ValidationStatus, topology};
use gv_views::{RouteComparison, RouteRow};

use super::{
    NetworkMap, SUCCESS_COLOR, WARNING_COLOR, error_banner, loading_indicator, route_color32,
};

#[derive(Default)]
pub struct PredictionView {
    map: NetworkMap,
}

impl PredictionView {
    pub fn show(&mut self, ui: &mut egui::Ui, dashboard: &Dashboard) {
        let workflow = dashboard.prediction();
        if let Some(message) = workflow.error() {
            error_banner(ui, message);
            return;
        }
        if workflow.is_running() {
            loading_indicator(ui, PREDICTION_LOADING);
            return;
        }

        let Some(loaded) = dashboard.loaded_prediction() else {
            ui.label("Pick a vehicle and objective, then ask for a prediction.");
            return;
        };

        show_prediction_panel(ui, loaded);
        ui.add_space(12.0);

        ui.heading("Route Comparison");
        if loaded.comparison.is_empty() {
            ui.label("No route statistics reported");
        } else {
            show_route_cards(ui, &loaded.comparison);
        }
        ui.add_space(12.0);

        ui.heading("Road Network");
        self.map.show(ui, &loaded.comparison);
    }
}

fn show_prediction_panel(ui: &mut egui::Ui, loaded: &LoadedPrediction) {
    let ai = &loaded.response.ai_prediction;
    let validation = &loaded.response.validation;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.heading("AI Prediction");
            let status = validation.status();
            let color = match status {
                ValidationStatus::Validated => SUCCESS_COLOR,
                ValidationStatus::Corrected => WARNING_COLOR,
            };
            ui.colored_label(color, status.label());
            ui.separator();
            ui.small(format!(
                "{} active vehicles sampled",
                loaded.response.traffic_snapshot.active_vehicles
            ));
        });

        egui::Grid::new("prediction_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label("Prediction");
                ui.strong(ai.prediction.as_str());
                ui.end_row();

                ui.label("Recommended route");
                ui.strong(ai.recommended_route.as_str());
                ui.end_row();

                ui.label("Expected delay");
                ui.label(format!("{}s", ai.expected_delay));
                ui.end_row();

                ui.label("Congestion");
                ui.label(ai.congestion.as_str());
                ui.end_row();
            });

        if !ai.explanation.is_empty() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(format!("\"{}\"", ai.explanation)).italics());
        }

        if !validation.errors.is_empty() {
            ui.add_space(4.0);
            ui.label("Validation corrections applied:");
            for err in &validation.errors {
                ui.colored_label(WARNING_COLOR, format!("⚠ {}", err));
            }
        }
    });
}

fn show_route_cards(ui: &mut egui::Ui, comparison: &RouteComparison) {
    ui.horizontal_wrapped(|ui| {
        for row in comparison.rows() {
            route_card(ui, row);
        }
    });
}

fn route_card(ui: &mut egui::Ui, row: &RouteRow) {
    let color = route_color32(row.label);
    let stroke = if row.recommended {
        egui::Stroke::new(2.0, color)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
        ui.set_width(260.0);
        ui.horizontal(|ui| {
            ui.colored_label(color, row.label.as_str());
            ui.strong(topology::route_name(row.label));
        });
        if row.recommended {
            ui.colored_label(color, "★ AI Recommended");
        }
        ui.small(topology::route_description(row.label))
            .on_hover_text(topology::route_edge_ids(row.label).join(", "));
        ui.add_space(4.0);

        metric_bar(
            ui,
            "Avg Speed",
            format!("{:.2} m/s", row.stat.avg_speed),
            row.speed_pct,
            color,
        );
        metric_bar(
            ui,
            "Vehicles",
            row.stat.vehicles.to_string(),
            row.vehicles_pct,
            color,
        );
        metric_bar(
            ui,
            "Wait Time",
            format!("{:.1} s", row.stat.waiting_time),
            row.waiting_pct,
            color,
        );

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(format!("{} edges", row.stat.edge_count));
            ui.separator();
            ui.label(format!("Est. travel time {:.0}s", row.travel_time_s));
        });
    });
}

/// Labelled bar whose fill is a 0..=100 share of the largest route.
fn metric_bar(ui: &mut egui::Ui, title: &str, value: String, pct: f64, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.add_sized([70.0, 16.0], egui::Label::new(title));
        ui.add(
            egui::ProgressBar::new((pct / 100.0) as f32)
                .desired_width(110.0)
                .fill(color),
        );
        ui.label(value);
    });
}
