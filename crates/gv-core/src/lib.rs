//! gv-core: data contracts and static tables for the genVANET dashboard.
//!
//! Contains:
//! - scenario (scenario configuration, prediction request, options catalog)
//! - snapshot (simulation trace types)
//! - prediction (AI recommendation, route stats, validation)
//! - topology (fixed junction/edge/route tables)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod prediction;
pub mod scenario;
pub mod snapshot;
pub mod topology;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use prediction::{
    AiPrediction, PredictionResponse, PredictionValidation, RouteLabel, RouteStat, RouteStats,
    TrafficSnapshot, ValidationStatus,
};
pub use scenario::{
    Choice, Density, Objective, Pattern, PredictRequest, ScenarioConfig, ScenarioOptions, VehicleMix,
    VehicleType, display_label,
};
pub use snapshot::{
    EdgeState, Position, SimulationResult, SimulationSnapshot, SimulationSummary, VehicleState,
};
