use egui_plot::{Line, Plot, PlotPoints, VLine};
use gv_app::{Dashboard, LoadedSimulation, SIMULATION_LOADING};
use gv_core::{Choice, display_label};
use gv_views::SnapshotTimeline;

use super::{error_banner, loading_indicator, stat_card};

/// Cursor movement asked for by the step controls.
enum StepRequest {
    Back,
    Forward,
    Seek(i64),
}

pub struct SimulationView {
    show_plot: bool,
}

impl Default for SimulationView {
    fn default() -> Self {
        Self { show_plot: true }
    }
}

impl SimulationView {
    pub fn show(&mut self, ui: &mut egui::Ui, dashboard: &mut Dashboard) {
        let workflow = dashboard.simulation();
        if let Some(message) = workflow.error() {
            error_banner(ui, message);
            return;
        }
        if workflow.is_running() {
            loading_indicator(ui, SIMULATION_LOADING);
            return;
        }

        let Some(loaded) = dashboard.loaded_simulation() else {
            ui.label("Configure a scenario and run a simulation.");
            return;
        };

        show_summary(ui, loaded);
        ui.add_space(8.0);

        match self.show_step_controls(ui, &loaded.timeline) {
            Some(StepRequest::Back) => {
                dashboard.step_back();
            }
            Some(StepRequest::Forward) => {
                dashboard.step_forward();
            }
            Some(StepRequest::Seek(index)) => {
                dashboard.seek(index);
            }
            None => {}
        }

        // Re-borrow after seeking so the tables show the new step.
        let Some(timeline) = dashboard.timeline() else {
            return;
        };

        ui.add_space(8.0);
        show_vehicles(ui, timeline);
        ui.add_space(8.0);
        show_edges(ui, timeline);
    }

    /// Slider, step buttons and the vehicle-count plot.
    fn show_step_controls(
        &mut self,
        ui: &mut egui::Ui,
        timeline: &SnapshotTimeline,
    ) -> Option<StepRequest> {
        let cursor = timeline.cursor();
        let last = timeline.len().saturating_sub(1);
        let mut requested = None;

        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                requested = Some(StepRequest::Back);
            }
            let mut slider_value = cursor;
            let slider = ui.add(
                egui::Slider::new(&mut slider_value, 0..=last)
                    .show_value(false),
            );
            if slider.changed() {
                requested = Some(StepRequest::Seek(slider_value as i64));
            }
            if ui.button("▶").clicked() {
                requested = Some(StepRequest::Forward);
            }
            ui.label(timeline.step_label());
            ui.separator();
            ui.label(timeline.time_label());
            ui.separator();
            ui.checkbox(&mut self.show_plot, "Vehicle count plot");
        });

        if self.show_plot {
            let series: PlotPoints = timeline.vehicle_count_series().into();
            let cursor_x = timeline.current().time;
            Plot::new("vehicle_count_plot")
                .height(160.0)
                .allow_scroll(false)
                .x_axis_label("Time (s)")
                .y_axis_label("Vehicles")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(series).name("Active vehicles"));
                    plot_ui.vline(VLine::new(cursor_x).name("Current step"));
                });
        }

        requested
    }
}

fn show_summary(ui: &mut egui::Ui, loaded: &LoadedSimulation) {
    ui.horizontal_wrapped(|ui| {
        stat_card(
            ui,
            "Total Vehicles",
            &loaded.summary.total_vehicles.to_string(),
        );
        stat_card(
            ui,
            "Simulation Steps",
            &loaded.summary.total_steps.to_string(),
        );
        stat_card(
            ui,
            "Traffic Density",
            display_label(loaded.scenario.density.as_str()),
        );
        stat_card(
            ui,
            "Total CO2 (mg)",
            &format!("{:.2}", loaded.summary.total_co2_mg),
        );
    });
}

fn show_vehicles(ui: &mut egui::Ui, timeline: &SnapshotTimeline) {
    let vehicles = &timeline.current().vehicles;
    ui.heading(format!("Vehicles ({})", vehicles.len()));
    if vehicles.is_empty() {
        ui.label("No active vehicles at this step");
        return;
    }

    ui.push_id("vehicle_table", |ui| {
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                egui::Grid::new("vehicle_grid")
                    .striped(true)
                    .num_columns(6)
                    .show(ui, |ui| {
                        ui.strong("ID");
                        ui.strong("Type");
                        ui.strong("Speed (m/s)");
                        ui.strong("Road");
                        ui.strong("Position");
                        ui.strong("CO2 (mg/s)");
                        ui.end_row();

                        for v in vehicles {
                            ui.monospace(v.id.as_str());
                            ui.label(v.vehicle_type.as_str());
                            ui.label(format!("{:.2}", v.speed));
                            ui.monospace(v.road.as_str());
                            ui.label(format!("({:.2}, {:.2})", v.position.x, v.position.y));
                            ui.label(format!("{:.2}", v.co2_emission));
                            ui.end_row();
                        }
                    });
            });
    });
}

fn show_edges(ui: &mut egui::Ui, timeline: &SnapshotTimeline) {
    let edges = timeline.active_edges();
    ui.heading(format!("Road Traffic ({} active roads)", edges.len()));
    if edges.is_empty() {
        ui.label("No traffic on any edge at this step");
        return;
    }

    ui.push_id("edge_table", |ui| {
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                egui::Grid::new("edge_grid")
                    .striped(true)
                    .num_columns(5)
                    .show(ui, |ui| {
                        ui.strong("Road");
                        ui.strong("Vehicles");
                        ui.strong("Avg Speed (m/s)");
                        ui.strong("Occupancy (%)");
                        ui.strong("Wait Time (s)");
                        ui.end_row();

                        for e in edges {
                            ui.monospace(e.id.as_str());
                            ui.label(e.vehicle_count.to_string());
                            ui.label(format!("{:.2}", e.mean_speed));
                            ui.label(format!("{:.2}", e.occupancy));
                            ui.label(format!("{:.2}", e.waiting_time));
                            ui.end_row();
                        }
                    });
            });
    });
}
