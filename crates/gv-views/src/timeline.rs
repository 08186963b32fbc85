//! Scrubbable cursor over a simulation trace.

use gv_core::{EdgeState, Real, SimulationSnapshot};

use crate::{ViewError, ViewResult};

static EMPTY_VIEW: SimulationSnapshot = SimulationSnapshot::EMPTY;

/// Ordered, immutable snapshot sequence plus the selected step.
///
/// Invariant: when loaded, `cursor < snapshots.len()`; when not loaded,
/// `cursor == 0` and `current()` is the empty view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotTimeline {
    snapshots: Vec<SimulationSnapshot>,
    cursor: usize,
}

impl SnapshotTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline positioned at the first snapshot.
    pub fn from_snapshots(snapshots: Vec<SimulationSnapshot>) -> ViewResult<Self> {
        let mut timeline = Self::new();
        timeline.reset(snapshots)?;
        Ok(timeline)
    }

    /// Replace the sequence and move the cursor to 0.
    ///
    /// An empty sequence is refused and leaves the timeline untouched.
    pub fn reset(&mut self, snapshots: Vec<SimulationSnapshot>) -> ViewResult<()> {
        if snapshots.is_empty() {
            return Err(ViewError::EmptySequence);
        }
        self.snapshots = snapshots;
        self.cursor = 0;
        Ok(())
    }

    /// Move the cursor, clamping into `[0, len - 1]`. Returns the applied index.
    pub fn seek(&mut self, index: i64) -> usize {
        let last = self.snapshots.len().saturating_sub(1);
        self.cursor = if index <= 0 {
            0
        } else {
            usize::try_from(index).map_or(last, |i| i.min(last))
        };
        self.cursor
    }

    pub fn step_forward(&mut self) -> usize {
        self.seek(self.cursor as i64 + 1)
    }

    pub fn step_back(&mut self) -> usize {
        self.seek(self.cursor as i64 - 1)
    }

    /// Snapshot under the cursor, or the empty view when nothing is loaded.
    pub fn current(&self) -> &SimulationSnapshot {
        self.snapshots.get(self.cursor).unwrap_or(&EMPTY_VIEW)
    }

    /// Edges carrying traffic in the current snapshot, in snapshot order.
    pub fn active_edges(&self) -> Vec<&EdgeState> {
        self.current().edges.iter().filter(|e| e.is_active()).collect()
    }

    pub fn vehicle_count(&self) -> usize {
        self.current().vehicles.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        !self.is_empty()
    }

    pub fn snapshots(&self) -> &[SimulationSnapshot] {
        &self.snapshots
    }

    /// "Step 3 / 120"
    pub fn step_label(&self) -> String {
        if self.is_empty() {
            return "Step 0 / 0".to_string();
        }
        format!("Step {} / {}", self.cursor + 1, self.len())
    }

    /// "t = 2.0s"
    pub fn time_label(&self) -> String {
        format!("t = {:.1}s", self.current().time)
    }

    /// `(time, active vehicles)` for every step, for plotting.
    pub fn vehicle_count_series(&self) -> Vec<[Real; 2]> {
        self.snapshots
            .iter()
            .map(|s| [s.time, s.vehicles.len() as Real])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gv_core::{Position, VehicleState};

    fn edge(id: &str, vehicle_count: u32) -> EdgeState {
        EdgeState {
            id: id.to_string(),
            vehicle_count,
            mean_speed: 10.0,
            occupancy: 5.0,
            waiting_time: 0.0,
        }
    }

    fn vehicle(id: &str) -> VehicleState {
        VehicleState {
            id: id.to_string(),
            vehicle_type: "car".to_string(),
            speed: 12.0,
            road: "J1_J2".to_string(),
            position: Position { x: 1.0, y: 2.0 },
            co2_emission: 100.0,
        }
    }

    fn trace(n: usize) -> Vec<SimulationSnapshot> {
        (0..n)
            .map(|i| SimulationSnapshot {
                time: i as f64,
                vehicles: (0..i).map(|v| vehicle(&format!("veh_{v}"))).collect(),
                edges: vec![edge("S1_J1", i as u32 % 2), edge("J1_J2", 3)],
            })
            .collect()
    }

    #[test]
    fn unloaded_timeline_shows_empty_view() {
        let mut timeline = SnapshotTimeline::new();
        assert!(!timeline.is_loaded());
        assert_eq!(timeline.current(), &SimulationSnapshot::EMPTY);
        assert_eq!(timeline.seek(4), 0);
        assert!(timeline.active_edges().is_empty());
        assert_eq!(timeline.vehicle_count(), 0);
        assert_eq!(timeline.step_label(), "Step 0 / 0");
    }

    #[test]
    fn reset_refuses_empty_sequence_and_keeps_previous() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(3)).unwrap();
        timeline.seek(2);
        assert_eq!(timeline.reset(Vec::new()), Err(ViewError::EmptySequence));
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.cursor(), 2);
        assert_eq!(
            SnapshotTimeline::from_snapshots(Vec::new()),
            Err(ViewError::EmptySequence)
        );
    }

    #[test]
    fn reset_moves_cursor_to_first_step() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(5)).unwrap();
        timeline.seek(4);
        timeline.reset(trace(2)).unwrap();
        assert_eq!(timeline.cursor(), 0);
        assert_eq!(timeline.current().time, 0.0);
    }

    #[test]
    fn seek_clamps_out_of_range() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(10)).unwrap();
        assert_eq!(timeline.seek(-5), 0);
        assert_eq!(timeline.seek(15), 9);
        assert_eq!(timeline.seek(i64::MAX), 9);
        assert_eq!(timeline.seek(i64::MIN), 0);
        assert_eq!(timeline.seek(6), 6);
        assert_eq!(timeline.current().time, 6.0);
    }

    #[test]
    fn stepping_stops_at_the_ends() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(2)).unwrap();
        assert_eq!(timeline.step_back(), 0);
        assert_eq!(timeline.step_forward(), 1);
        assert_eq!(timeline.step_forward(), 1);
    }

    #[test]
    fn active_edges_keep_snapshot_order() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(4)).unwrap();
        timeline.seek(2);
        let ids: Vec<_> = timeline.active_edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["J1_J2"]);
        timeline.seek(3);
        let ids: Vec<_> = timeline.active_edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["S1_J1", "J1_J2"]);
        assert_eq!(timeline.vehicle_count(), 3);
    }

    #[test]
    fn labels_and_series() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(3)).unwrap();
        timeline.seek(1);
        assert_eq!(timeline.step_label(), "Step 2 / 3");
        assert_eq!(timeline.time_label(), "t = 1.0s");
        assert_eq!(
            timeline.vehicle_count_series(),
            vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]
        );
    }

    #[test]
    fn current_is_idempotent() {
        let mut timeline = SnapshotTimeline::from_snapshots(trace(3)).unwrap();
        timeline.seek(2);
        let first = timeline.current().clone();
        assert_eq!(timeline.current(), &first);
    }
}
