//! Integration tests for the per-mode workflows driven through `Dashboard`.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use gv_app::{
    AppError, AppResult, Collaborator, Dashboard, DashboardMode, PREDICTION_FAILED, Phase,
    SIMULATION_FAILED,
};
use gv_core::{
    AiPrediction, Density, EdgeState, Pattern, PredictRequest, PredictionResponse,
    PredictionValidation, RouteLabel, RouteStat, RouteStats, ScenarioConfig, ScenarioOptions,
    SimulationResult, SimulationSnapshot, SimulationSummary, TrafficSnapshot, VehicleMix,
};

const WAIT: Duration = Duration::from_secs(5);

/// Scripted collaborator. Simulations for a seed with a registered gate block
/// until the gate is released.
#[derive(Default)]
struct FakeCollaborator {
    options_fail: bool,
    simulation_fail: bool,
    empty_trace: bool,
    prediction_fail: bool,
    recommended: String,
    gates: Mutex<HashMap<i64, Receiver<()>>>,
}

impl FakeCollaborator {
    fn gate(&self, seed: i64) -> Sender<()> {
        let (tx, rx) = channel();
        self.gates.lock().unwrap().insert(seed, rx);
        tx
    }
}

fn trace(steps: usize, seed: i64) -> Vec<SimulationSnapshot> {
    (0..steps)
        .map(|i| SimulationSnapshot {
            time: seed as f64 + i as f64,
            vehicles: Vec::new(),
            edges: vec![EdgeState {
                id: "S1_J1".to_string(),
                vehicle_count: i as u32,
                mean_speed: 9.0,
                occupancy: 12.5,
                waiting_time: 0.0,
            }],
        })
        .collect()
}

impl Collaborator for FakeCollaborator {
    fn scenario_options(&self) -> AppResult<ScenarioOptions> {
        if self.options_fail {
            return Err(AppError::Connectivity {
                url: "http://localhost:8000/simulate/options".to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(ScenarioOptions {
            density: ["low", "medium", "high", "rush_hour"].map(String::from).to_vec(),
            vehicle_mix: ["cars_only", "mixed", "heavy_commercial"].map(String::from).to_vec(),
            pattern: ["uniform", "rush_hour", "random"].map(String::from).to_vec(),
        })
    }

    fn run_simulation(&self, scenario: &ScenarioConfig) -> AppResult<SimulationResult> {
        let gate = self.gates.lock().unwrap().remove(&scenario.seed);
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        if self.simulation_fail {
            return Err(AppError::RequestFailure {
                url: "http://localhost:8000/simulate".to_string(),
                status: 500,
            });
        }
        let steps = if self.empty_trace {
            Vec::new()
        } else {
            trace(4, scenario.seed)
        };
        Ok(SimulationResult {
            scenario: *scenario,
            summary: SimulationSummary {
                total_vehicles: 12,
                total_steps: steps.len() as u64,
                total_co2_mg: 1234.5,
            },
            steps,
        })
    }

    fn run_prediction(&self, request: &PredictRequest) -> AppResult<PredictionResponse> {
        if self.prediction_fail {
            return Err(AppError::MalformedPayload {
                url: "http://localhost:8000/predict".to_string(),
                message: "missing field `ai_prediction`".to_string(),
            });
        }
        let route_stats = RouteStats::from([
            (
                RouteLabel::A,
                RouteStat {
                    avg_speed: 10.0,
                    vehicles: 5,
                    waiting_time: 2.0,
                    edge_count: 4,
                },
            ),
            (
                RouteLabel::B,
                RouteStat {
                    avg_speed: 20.0,
                    vehicles: 5,
                    waiting_time: 2.0,
                    edge_count: 7,
                },
            ),
        ]);
        Ok(PredictionResponse {
            scenario: request.scenario,
            traffic_snapshot: TrafficSnapshot { active_vehicles: 9 },
            ai_prediction: AiPrediction {
                prediction: "Light traffic".to_string(),
                recommended_route: self.recommended.clone(),
                expected_delay: 45.0,
                congestion: "none".to_string(),
                explanation: "Route B is clear".to_string(),
                raw_response: String::new(),
                route_stats,
            },
            validation: PredictionValidation {
                is_valid: true,
                errors: Vec::new(),
            },
        })
    }
}

fn dashboard(fake: FakeCollaborator) -> (Dashboard, Arc<FakeCollaborator>) {
    let fake = Arc::new(fake);
    let dash = Dashboard::new(fake.clone(), "http://localhost:8000");
    (dash, fake)
}

fn scenario(seed: i64) -> ScenarioConfig {
    ScenarioConfig {
        density: Density::Medium,
        vehicle_mix: VehicleMix::Mixed,
        pattern: Pattern::Uniform,
        seed,
    }
}

#[test]
fn simulation_success_loads_timeline_at_first_step() {
    let (mut dash, _) = dashboard(FakeCollaborator::default());
    assert!(dash.timeline().is_none());

    dash.submit_simulation(scenario(42));
    assert!(dash.wait_simulation(WAIT));

    let loaded = dash.loaded_simulation().expect("simulation loaded");
    assert_eq!(loaded.scenario.seed, 42);
    assert_eq!(loaded.summary.total_steps, 4);
    let timeline = dash.timeline().unwrap();
    assert_eq!(timeline.cursor(), 0);
    assert_eq!(timeline.current().time, 42.0);

    assert_eq!(dash.seek(-5), Some(0));
    assert_eq!(dash.seek(100), Some(3));
    assert_eq!(dash.timeline().unwrap().active_edges().len(), 1);
}

#[test]
fn single_steps_stay_inside_the_trace() {
    let (mut dash, _) = dashboard(FakeCollaborator::default());
    assert_eq!(dash.step_forward(), None);

    dash.submit_simulation(scenario(42));
    assert!(dash.wait_simulation(WAIT));
    assert_eq!(dash.step_back(), Some(0));
    assert_eq!(dash.step_forward(), Some(1));
    dash.seek(3);
    assert_eq!(dash.step_forward(), Some(3));
    assert_eq!(dash.step_back(), Some(2));
    assert_eq!(dash.timeline().unwrap().current().time, 44.0);
}

#[test]
fn resubmitting_resets_cursor_and_clears_immediately() {
    let (mut dash, fake) = dashboard(FakeCollaborator::default());
    dash.submit_simulation(scenario(1));
    assert!(dash.wait_simulation(WAIT));
    dash.seek(3);

    let release = fake.gate(2);
    dash.submit_simulation(scenario(2));
    assert_eq!(dash.simulation().phase(), Phase::Running);
    assert!(dash.timeline().is_none());
    assert_eq!(dash.seek(1), None);

    release.send(()).unwrap();
    assert!(dash.wait_simulation(WAIT));
    assert_eq!(dash.timeline().unwrap().cursor(), 0);
    assert_eq!(dash.timeline().unwrap().current().time, 2.0);
}

#[test]
fn late_response_from_superseded_request_is_discarded() {
    let (mut dash, fake) = dashboard(FakeCollaborator::default());
    let release_first = fake.gate(1);

    let first = dash.submit_simulation(scenario(1));
    let second = dash.submit_simulation(scenario(2));
    assert!(first < second);

    assert!(dash.wait_simulation(WAIT));
    assert_eq!(dash.loaded_simulation().unwrap().scenario.seed, 2);

    release_first.send(()).unwrap();
    let deadline = Instant::now() + WAIT;
    while dash.simulation().discarded() == 0 && Instant::now() < deadline {
        dash.poll();
        thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(dash.simulation().discarded(), 1);
    assert_eq!(dash.loaded_simulation().unwrap().scenario.seed, 2);
    assert_eq!(dash.simulation().phase(), Phase::Succeeded);
}

#[test]
fn simulation_failure_is_scoped_to_its_mode() {
    let fake = FakeCollaborator {
        simulation_fail: true,
        recommended: "Route B".to_string(),
        ..Default::default()
    };
    let (mut dash, _) = dashboard(fake);

    dash.submit_prediction(PredictRequest::default());
    assert!(dash.wait_prediction(WAIT));
    dash.submit_simulation(scenario(42));
    assert!(dash.wait_simulation(WAIT));

    assert_eq!(dash.simulation().error(), Some(SIMULATION_FAILED));
    assert!(
        dash.simulation()
            .last_error_detail()
            .unwrap()
            .contains("status 500")
    );
    assert!(dash.timeline().is_none());

    assert!(dash.prediction().error().is_none());
    assert!(dash.comparison().is_some());
}

#[test]
fn empty_trace_is_a_request_failure() {
    let fake = FakeCollaborator {
        empty_trace: true,
        ..Default::default()
    };
    let (mut dash, _) = dashboard(fake);
    dash.submit_simulation(scenario(42));
    assert!(dash.wait_simulation(WAIT));

    assert_eq!(dash.simulation().error(), Some(SIMULATION_FAILED));
    assert_eq!(
        dash.simulation().last_error_detail(),
        Some("Simulation result contains no steps")
    );
    assert!(dash.loaded_simulation().is_none());
}

#[test]
fn prediction_feeds_route_comparison() {
    let fake = FakeCollaborator {
        recommended: "Route B".to_string(),
        ..Default::default()
    };
    let (mut dash, _) = dashboard(fake);
    dash.submit_prediction(PredictRequest::default());
    assert_eq!(dash.mode, DashboardMode::Prediction);
    assert!(dash.wait_prediction(WAIT));

    let cmp = dash.comparison().unwrap();
    assert_eq!(cmp.row(RouteLabel::A).unwrap().speed_pct, 50.0);
    assert_eq!(cmp.row(RouteLabel::B).unwrap().speed_pct, 100.0);
    assert!(cmp.is_recommended(RouteLabel::B));
    assert!(dash.simulation().state() == &gv_app::WorkflowState::Idle);
}

#[test]
fn prediction_with_unknown_route_renders_without_highlight() {
    let fake = FakeCollaborator {
        recommended: "Route Z".to_string(),
        ..Default::default()
    };
    let (mut dash, _) = dashboard(fake);
    dash.submit_prediction(PredictRequest::default());
    assert!(dash.wait_prediction(WAIT));

    let cmp = dash.comparison().unwrap();
    assert_eq!(cmp.rows().len(), 2);
    assert_eq!(cmp.recommended(), None);
}

#[test]
fn prediction_failure_uses_generic_message() {
    let fake = FakeCollaborator {
        prediction_fail: true,
        ..Default::default()
    };
    let (mut dash, _) = dashboard(fake);
    dash.submit_prediction(PredictRequest::default());
    assert!(dash.wait_prediction(WAIT));
    assert_eq!(dash.prediction().error(), Some(PREDICTION_FAILED));
    assert!(dash.comparison().is_none());
}

#[test]
fn unreachable_options_degrade_to_empty_catalog() {
    let fake = FakeCollaborator {
        options_fail: true,
        ..Default::default()
    };
    let (mut dash, _) = dashboard(fake);
    assert!(dash.options().is_empty());
    assert!(dash.connectivity_banner().is_none());

    dash.load_options();
    assert!(dash.wait_options(WAIT));
    assert!(dash.options().is_empty());
    let banner = dash.connectivity_banner().unwrap();
    assert!(banner.contains("http://localhost:8000"));

    dash.submit_simulation(scenario(7));
    assert!(dash.wait_simulation(WAIT));
    assert!(dash.timeline().is_some());
}

#[test]
fn options_load_populates_catalog() {
    let (mut dash, _) = dashboard(FakeCollaborator::default());
    dash.load_options();
    assert!(dash.wait_options(WAIT));
    assert_eq!(dash.options().densities().len(), 4);
    assert!(!dash.is_busy());
}
