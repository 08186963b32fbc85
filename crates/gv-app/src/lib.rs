//! Shared application service layer for the genVANET dashboard.
//!
//! This crate provides the pieces both the CLI and the GUI frontends drive:
//! collaborator access over HTTP, the generic request workflow, and the
//! dashboard state that ties the two modes to their derived views.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod workflow;

// Re-export key types for convenience
pub use client::{Collaborator, HttpCollaborator};
pub use config::{API_ENV_VAR, DashboardConfig};
pub use dashboard::{
    Dashboard, DashboardMode, LoadedPrediction, LoadedSimulation, PREDICTION_FAILED,
    PREDICTION_LOADING, SIMULATION_FAILED, SIMULATION_LOADING,
};
pub use error::{AppError, AppResult};
pub use workflow::{Phase, Ticket, WorkflowController, WorkflowState};
