use gv_core::{
    Choice, Density, Objective, Pattern, PredictRequest, ScenarioConfig, ScenarioOptions,
    VehicleMix, VehicleType, display_label,
};

/// Scenario inputs shared by both modes.
#[derive(Default)]
pub struct ScenarioForm {
    scenario: ScenarioConfig,
}

impl ScenarioForm {
    /// Returns the scenario when the user asks for a run.
    ///
    /// The button stays enabled while a run is in flight; resubmitting
    /// supersedes the earlier run.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        options: &ScenarioOptions,
        busy: bool,
    ) -> Option<ScenarioConfig> {
        let mut submitted = None;
        ui.group(|ui| {
            ui.heading("Scenario Configuration");
            scenario_fields(ui, "sim", &mut self.scenario, options);
            ui.horizontal(|ui| {
                let label = if busy { "Running..." } else { "Run Simulation" };
                if ui.button(label).clicked() {
                    submitted = Some(self.scenario);
                }
            });
        });
        submitted
    }
}

/// Scenario inputs plus the routing choices for a prediction.
#[derive(Default)]
pub struct PredictForm {
    request: PredictRequest,
}

impl PredictForm {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        options: &ScenarioOptions,
        busy: bool,
    ) -> Option<PredictRequest> {
        let mut submitted = None;
        ui.group(|ui| {
            ui.heading("AI Route Prediction");
            scenario_fields(ui, "predict", &mut self.request.scenario, options);

            ui.horizontal(|ui| {
                ui.label("Vehicle type:");
                for &vehicle_type in VehicleType::ALL {
                    ui.selectable_value(
                        &mut self.request.vehicle_type,
                        vehicle_type,
                        vehicle_type.label(),
                    );
                }
                ui.separator();
                ui.label("Objective:");
                for &objective in Objective::ALL {
                    ui.selectable_value(&mut self.request.objective, objective, objective.label());
                }
            });

            let label = if busy { "Predicting..." } else { "Get AI Prediction" };
            if ui.button(label).clicked() {
                submitted = Some(self.request);
            }
        });
        submitted
    }
}

fn scenario_fields(
    ui: &mut egui::Ui,
    id_prefix: &str,
    scenario: &mut ScenarioConfig,
    options: &ScenarioOptions,
) {
    egui::Grid::new(format!("{}_scenario_grid", id_prefix))
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Traffic density");
            choice_combo::<Density>(
                ui,
                format!("{}_density", id_prefix),
                &mut scenario.density,
                &options.densities(),
            );
            ui.end_row();

            ui.label("Vehicle mix");
            choice_combo::<VehicleMix>(
                ui,
                format!("{}_vehicle_mix", id_prefix),
                &mut scenario.vehicle_mix,
                &options.vehicle_mixes(),
            );
            ui.end_row();

            ui.label("Departure pattern");
            choice_combo::<Pattern>(
                ui,
                format!("{}_pattern", id_prefix),
                &mut scenario.pattern,
                &options.patterns(),
            );
            ui.end_row();

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut scenario.seed).speed(1.0));
            ui.end_row();
        });
}

/// Combo over the choices the collaborator offered. An empty catalog leaves
/// only the current value visible.
fn choice_combo<C: Choice + PartialEq>(
    ui: &mut egui::Ui,
    id_salt: String,
    current: &mut C,
    choices: &[C],
) {
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(display_label(current.as_str()))
        .show_ui(ui, |ui| {
            for &choice in choices {
                ui.selectable_value(current, choice, display_label(choice.as_str()));
            }
        });
}
