//! gv-views: derivation layer between loaded results and what gets drawn.
//!
//! Nothing in here talks to the collaborator or sees its errors; callers hand
//! in results that already arrived.

pub mod comparison;
pub mod timeline;

pub use comparison::{
    RouteComparison, RouteRow, ScaleMaxima, TRAVEL_EDGE_LENGTH, estimated_travel_time_s,
};
pub use timeline::SnapshotTimeline;

pub type ViewResult<T> = Result<T, ViewError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Simulation result contains no steps")]
    EmptySequence,
}
