//! Simulation trace data types.

use serde::{Deserialize, Serialize};

use crate::numeric::Real;
use crate::scenario::ScenarioConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: Real,
    pub y: Real,
}

/// One vehicle at one simulation step.
///
/// `id` is unique within a snapshot only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub id: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub speed: Real,
    pub road: String,
    pub position: Position,
    #[serde(default)]
    pub co2_emission: Real,
}

/// Occupancy of one road segment at one simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeState {
    pub id: String,
    pub vehicle_count: u32,
    pub mean_speed: Real,
    pub occupancy: Real,
    pub waiting_time: Real,
}

impl EdgeState {
    /// Edges without vehicles are left out of active-traffic views.
    pub fn is_active(&self) -> bool {
        self.vehicle_count > 0
    }
}

/// Point-in-time view of the network. Vehicles and edges not listed are
/// inactive at `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub time: Real,
    #[serde(default)]
    pub vehicles: Vec<VehicleState>,
    #[serde(default)]
    pub edges: Vec<EdgeState>,
}

impl SimulationSnapshot {
    /// The view shown when no trace is loaded.
    pub const EMPTY: SimulationSnapshot = SimulationSnapshot {
        time: 0.0,
        vehicles: Vec::new(),
        edges: Vec::new(),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_vehicles: u64,
    pub total_steps: u64,
    pub total_co2_mg: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: ScenarioConfig,
    pub summary: SimulationSummary,
    /// Index is the simulation tick; `time` is strictly increasing.
    pub steps: Vec<SimulationSnapshot>,
}
