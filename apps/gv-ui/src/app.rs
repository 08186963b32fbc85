use std::time::Duration;

use gv_app::{Dashboard, DashboardMode};

use crate::views::{PredictForm, PredictionView, ScenarioForm, SimulationView};

pub struct GenVanetApp {
    dashboard: Dashboard,
    scenario_form: ScenarioForm,
    predict_form: PredictForm,
    simulation_view: SimulationView,
    prediction_view: PredictionView,
}

impl GenVanetApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, mut dashboard: Dashboard) -> Self {
        dashboard.load_options();

        Self {
            dashboard,
            scenario_form: ScenarioForm::default(),
            predict_form: PredictForm::default(),
            simulation_view: SimulationView::default(),
            prediction_view: PredictionView::default(),
        }
    }
}

impl eframe::App for GenVanetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dashboard.poll();
        if self.dashboard.is_busy() {
            // Keep polling while a worker is out.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("genVANET");
                ui.label("VANET Traffic Simulation Dashboard");
                ui.separator();
                ui.selectable_value(
                    &mut self.dashboard.mode,
                    DashboardMode::Simulation,
                    "Simulation",
                );
                ui.selectable_value(
                    &mut self.dashboard.mode,
                    DashboardMode::Prediction,
                    "AI Prediction",
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(banner) = self.dashboard.connectivity_banner() {
                crate::views::error_banner(ui, &banner);
            }

            egui::ScrollArea::vertical().show(ui, |ui| match self.dashboard.mode {
                DashboardMode::Simulation => {
                    let options = self.dashboard.options().clone();
                    let busy = self.dashboard.simulation().is_running();
                    if let Some(scenario) = self.scenario_form.show(ui, &options, busy) {
                        self.dashboard.submit_simulation(scenario);
                    }
                    ui.add_space(12.0);
                    self.simulation_view.show(ui, &mut self.dashboard);
                }
                DashboardMode::Prediction => {
                    let options = self.dashboard.options().clone();
                    let busy = self.dashboard.prediction().is_running();
                    if let Some(request) = self.predict_form.show(ui, &options, busy) {
                        self.dashboard.submit_prediction(request);
                    }
                    ui.add_space(12.0);
                    self.prediction_view.show(ui, &self.dashboard);
                }
            });
        });
    }
}
