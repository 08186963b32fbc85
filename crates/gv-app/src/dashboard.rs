//! Dashboard state: one workflow per mode plus the startup options load.
//!
//! The simulation and prediction workflows are separate controller instances
//! and share nothing mutable. Each one owns its derived view (timeline or
//! route comparison) inside its success state, so a new submission drops the
//! view together with the result.

use std::sync::Arc;
use std::time::Duration;

use gv_core::{
    PredictRequest, PredictionResponse, ScenarioConfig, ScenarioOptions, SimulationResult,
    SimulationSummary,
};
use gv_views::{RouteComparison, SnapshotTimeline};

use crate::client::{Collaborator, HttpCollaborator};
use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::workflow::{Ticket, WorkflowController};

pub const SIMULATION_FAILED: &str = "Simulation failed";
pub const PREDICTION_FAILED: &str = "Prediction failed";
pub const OPTIONS_FAILED: &str = "Failed to fetch options";
pub const SIMULATION_LOADING: &str = "Running SUMO simulation...";
pub const PREDICTION_LOADING: &str = "Running SUMO + AI...";

static NO_OPTIONS: ScenarioOptions = ScenarioOptions {
    density: Vec::new(),
    vehicle_mix: Vec::new(),
    pattern: Vec::new(),
};

/// A simulation result with its trace loaded into a timeline at step 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSimulation {
    pub scenario: ScenarioConfig,
    pub summary: SimulationSummary,
    pub timeline: SnapshotTimeline,
}

impl LoadedSimulation {
    /// Refuses results without steps.
    pub fn from_result(result: SimulationResult) -> AppResult<Self> {
        let timeline = SnapshotTimeline::from_snapshots(result.steps)?;
        Ok(Self {
            scenario: result.scenario,
            summary: result.summary,
            timeline,
        })
    }
}

/// A prediction together with its normalized route comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPrediction {
    pub response: PredictionResponse,
    pub comparison: RouteComparison,
}

impl LoadedPrediction {
    pub fn from_response(response: PredictionResponse) -> Self {
        let comparison = RouteComparison::from_prediction(&response.ai_prediction);
        Self {
            response,
            comparison,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardMode {
    #[default]
    Simulation,
    Prediction,
}

pub struct Dashboard {
    api_base: String,
    pub mode: DashboardMode,
    options: WorkflowController<(), ScenarioOptions>,
    simulation: WorkflowController<ScenarioConfig, LoadedSimulation>,
    prediction: WorkflowController<PredictRequest, LoadedPrediction>,
}

impl Dashboard {
    pub fn new(collaborator: Arc<dyn Collaborator>, api_base: impl Into<String>) -> Self {
        let for_options = Arc::clone(&collaborator);
        let for_simulation = Arc::clone(&collaborator);
        let for_prediction = collaborator;

        Self {
            api_base: api_base.into(),
            mode: DashboardMode::default(),
            options: WorkflowController::new("options", OPTIONS_FAILED, move |()| {
                for_options.scenario_options()
            }),
            simulation: WorkflowController::new(
                "simulation",
                SIMULATION_FAILED,
                move |scenario: ScenarioConfig| {
                    let result = for_simulation.run_simulation(&scenario)?;
                    LoadedSimulation::from_result(result)
                },
            ),
            prediction: WorkflowController::new(
                "prediction",
                PREDICTION_FAILED,
                move |request: PredictRequest| {
                    let response = for_prediction.run_prediction(&request)?;
                    Ok(LoadedPrediction::from_response(response))
                },
            ),
        }
    }

    pub fn with_http(config: &DashboardConfig) -> AppResult<Self> {
        let collaborator = HttpCollaborator::new(config.clone())?;
        Ok(Self::new(Arc::new(collaborator), config.api_base.clone()))
    }

    /// Fetch the form choices. Failure leaves the catalog empty.
    pub fn load_options(&mut self) -> Ticket {
        self.options.submit(())
    }

    /// Drain all workflows. Returns true if any of them settled.
    pub fn poll(&mut self) -> bool {
        let options = self.options.poll();
        let simulation = self.simulation.poll();
        let prediction = self.prediction.poll();
        options || simulation || prediction
    }

    pub fn is_busy(&self) -> bool {
        self.options.is_running() || self.simulation.is_running() || self.prediction.is_running()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn options(&self) -> &ScenarioOptions {
        self.options.result().unwrap_or(&NO_OPTIONS)
    }

    pub fn options_workflow(&self) -> &WorkflowController<(), ScenarioOptions> {
        &self.options
    }

    /// Banner shown while the collaborator could not be reached at startup.
    pub fn connectivity_banner(&self) -> Option<String> {
        self.options.error().map(|_| {
            format!(
                "Cannot connect to backend. Is the server running at {}?",
                self.api_base
            )
        })
    }

    pub fn wait_options(&mut self, timeout: Duration) -> bool {
        self.options.wait(timeout)
    }

    // Simulation mode

    pub fn submit_simulation(&mut self, scenario: ScenarioConfig) -> Ticket {
        self.mode = DashboardMode::Simulation;
        self.simulation.submit(scenario)
    }

    pub fn simulation(&self) -> &WorkflowController<ScenarioConfig, LoadedSimulation> {
        &self.simulation
    }

    pub fn loaded_simulation(&self) -> Option<&LoadedSimulation> {
        self.simulation.result()
    }

    pub fn timeline(&self) -> Option<&SnapshotTimeline> {
        self.simulation.result().map(|loaded| &loaded.timeline)
    }

    /// Move the simulation cursor. `None` when no trace is loaded.
    pub fn seek(&mut self, index: i64) -> Option<usize> {
        self.simulation
            .result_mut()
            .map(|loaded| loaded.timeline.seek(index))
    }

    /// Advance the cursor by one step, stopping at the last one.
    pub fn step_forward(&mut self) -> Option<usize> {
        self.simulation
            .result_mut()
            .map(|loaded| loaded.timeline.step_forward())
    }

    pub fn step_back(&mut self) -> Option<usize> {
        self.simulation
            .result_mut()
            .map(|loaded| loaded.timeline.step_back())
    }

    pub fn wait_simulation(&mut self, timeout: Duration) -> bool {
        self.simulation.wait(timeout)
    }

    // Prediction mode

    pub fn submit_prediction(&mut self, request: PredictRequest) -> Ticket {
        self.mode = DashboardMode::Prediction;
        self.prediction.submit(request)
    }

    pub fn prediction(&self) -> &WorkflowController<PredictRequest, LoadedPrediction> {
        &self.prediction
    }

    pub fn loaded_prediction(&self) -> Option<&LoadedPrediction> {
        self.prediction.result()
    }

    pub fn comparison(&self) -> Option<&RouteComparison> {
        self.prediction.result().map(|loaded| &loaded.comparison)
    }

    pub fn wait_prediction(&mut self, timeout: Duration) -> bool {
        self.prediction.wait(timeout)
    }
}
