//! Side-by-side route comparison.
//!
//! Scales are display heuristics for bar widths: each field is expressed as a
//! percentage of the largest value any route reports for it, with the maximum
//! floored at 1 so all-zero fields come out as 0%.

use gv_core::{AiPrediction, Real, RouteLabel, RouteStat, RouteStats, percent_of};

/// Assumed length of one edge when estimating travel time.
pub const TRAVEL_EDGE_LENGTH: Real = 150.0;

/// Display-only travel time estimate: `edge_count * 150 / max(avg_speed, 1)`.
pub fn estimated_travel_time_s(stat: &RouteStat) -> Real {
    stat.edge_count as Real * TRAVEL_EDGE_LENGTH / stat.avg_speed.max(1.0)
}

/// Per-field normalization denominators, each at least 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMaxima {
    pub avg_speed: Real,
    pub vehicles: Real,
    pub waiting_time: Real,
}

impl Default for ScaleMaxima {
    fn default() -> Self {
        Self {
            avg_speed: 1.0,
            vehicles: 1.0,
            waiting_time: 1.0,
        }
    }
}

impl ScaleMaxima {
    pub fn of(route_stats: &RouteStats) -> Self {
        route_stats
            .values()
            .fold(Self::default(), |acc, stat| Self {
                avg_speed: finite_max(acc.avg_speed, stat.avg_speed),
                vehicles: finite_max(acc.vehicles, stat.vehicles as Real),
                waiting_time: finite_max(acc.waiting_time, stat.waiting_time),
            })
    }
}

fn finite_max(acc: Real, value: Real) -> Real {
    if value.is_finite() { acc.max(value) } else { acc }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub label: RouteLabel,
    pub stat: RouteStat,
    pub speed_pct: Real,
    pub vehicles_pct: Real,
    pub waiting_pct: Real,
    pub recommended: bool,
    pub travel_time_s: Real,
}

/// Normalized view over one prediction's route stats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteComparison {
    maxima: ScaleMaxima,
    rows: Vec<RouteRow>,
    recommended: Option<RouteLabel>,
}

impl RouteComparison {
    /// Build the comparison. A `recommended_route` that is not one of the
    /// reported routes highlights nothing.
    pub fn normalize(route_stats: &RouteStats, recommended_route: &str) -> Self {
        let maxima = ScaleMaxima::of(route_stats);
        let recommended = RouteLabel::parse(recommended_route)
            .ok()
            .filter(|label| route_stats.contains_key(label));

        let rows = route_stats
            .iter()
            .map(|(label, stat)| RouteRow {
                label: *label,
                stat: *stat,
                speed_pct: percent_of(stat.avg_speed, maxima.avg_speed),
                vehicles_pct: percent_of(stat.vehicles as Real, maxima.vehicles),
                waiting_pct: percent_of(stat.waiting_time, maxima.waiting_time),
                recommended: recommended == Some(*label),
                travel_time_s: estimated_travel_time_s(stat),
            })
            .collect();

        Self {
            maxima,
            rows,
            recommended,
        }
    }

    pub fn from_prediction(prediction: &AiPrediction) -> Self {
        Self::normalize(&prediction.route_stats, &prediction.recommended_route)
    }

    /// No stats yet; nothing to compare.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RouteRow] {
        &self.rows
    }

    pub fn row(&self, label: RouteLabel) -> Option<&RouteRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn maxima(&self) -> ScaleMaxima {
        self.maxima
    }

    pub fn recommended(&self) -> Option<RouteLabel> {
        self.recommended
    }

    pub fn is_recommended(&self, label: RouteLabel) -> bool {
        self.recommended == Some(label)
    }

    /// Map legend text: "Route A — 9.5m/s, 12 cars ★".
    pub fn legend_line(&self, label: RouteLabel) -> String {
        let mut line = label.to_string();
        if let Some(row) = self.row(label) {
            line.push_str(&format!(
                " — {}m/s, {} cars",
                row.stat.avg_speed, row.stat.vehicles
            ));
        }
        if self.is_recommended(label) {
            line.push_str(" ★");
        }
        line
    }
}
