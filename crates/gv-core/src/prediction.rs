//! AI routing recommendation returned by the prediction service.

use std::collections::BTreeMap;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::numeric::Real;
use crate::scenario::ScenarioConfig;

/// One of the three predefined routes through the fixed topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RouteLabel {
    #[serde(rename = "Route A")]
    A,
    #[serde(rename = "Route B")]
    B,
    #[serde(rename = "Route C")]
    C,
}

impl RouteLabel {
    pub const ALL: [RouteLabel; 3] = [RouteLabel::A, RouteLabel::B, RouteLabel::C];

    pub fn as_str(self) -> &'static str {
        match self {
            RouteLabel::A => "Route A",
            RouteLabel::B => "Route B",
            RouteLabel::C => "Route C",
        }
    }

    /// Exact match on the wire label.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == value)
            .ok_or_else(|| CoreError::UnknownRoute(value.to_string()))
    }
}

impl fmt::Display for RouteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStat {
    pub avg_speed: Real,
    pub vehicles: u32,
    pub waiting_time: Real,
    pub edge_count: u32,
}

pub type RouteStats = BTreeMap<RouteLabel, RouteStat>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPrediction {
    #[serde(default)]
    pub prediction: String,
    /// Should name a key of `route_stats`, but the service does not guarantee it.
    #[serde(default)]
    pub recommended_route: String,
    #[serde(default)]
    pub expected_delay: Real,
    #[serde(default)]
    pub congestion: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub raw_response: String,
    #[serde(default)]
    pub route_stats: RouteStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Validated,
    Corrected,
}

impl ValidationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ValidationStatus::Validated => "Validated",
            ValidationStatus::Corrected => "Corrected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionValidation {
    pub is_valid: bool,
    /// Corrections applied to the raw model answer, in the order applied.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl PredictionValidation {
    pub fn status(&self) -> ValidationStatus {
        if self.is_valid {
            ValidationStatus::Validated
        } else {
            ValidationStatus::Corrected
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    pub active_vehicles: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub traffic_snapshot: TrafficSnapshot,
    pub ai_prediction: AiPrediction,
    #[serde(default)]
    pub validation: PredictionValidation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(recommended: &str) -> String {
        format!(
            r#"{{
                "scenario": {{"density":"high","vehicle_mix":"mixed","pattern":"uniform","seed":1}},
                "traffic_snapshot": {{"active_vehicles": 37}},
                "ai_prediction": {{
                    "prediction": "Heavy load on the highway",
                    "recommended_route": "{recommended}",
                    "expected_delay": 120,
                    "congestion": "J1_J2",
                    "explanation": "City road is clear",
                    "raw_response": "PREDICTION: ...",
                    "route_stats": {{
                        "Route A": {{"avg_speed": 4.2, "vehicles": 18, "waiting_time": 35.5, "edge_count": 4}},
                        "Route B": {{"avg_speed": 9.8, "vehicles": 6, "waiting_time": 2.0, "edge_count": 6}}
                    }}
                }},
                "validation": {{"is_valid": false, "errors": ["Delay 3s is too low (min 10s)"]}}
            }}"#
        )
    }

    #[test]
    fn decodes_prediction_response() {
        let resp: PredictionResponse = serde_json::from_str(&sample_json("Route B")).unwrap();
        assert_eq!(resp.traffic_snapshot.active_vehicles, 37);
        assert_eq!(resp.ai_prediction.route_stats.len(), 2);
        assert_eq!(resp.ai_prediction.recommended_route, "Route B");
        assert!(resp.ai_prediction.route_stats.contains_key(&RouteLabel::B));
        assert_eq!(resp.validation.status(), ValidationStatus::Corrected);
        assert_eq!(resp.validation.errors.len(), 1);
    }

    #[test]
    fn unparseable_recommended_route_still_decodes() {
        let resp: PredictionResponse =
            serde_json::from_str(&sample_json("Route A (Highway Direct)")).unwrap();
        assert_eq!(resp.ai_prediction.recommended_route, "Route A (Highway Direct)");
        assert!(RouteLabel::parse(&resp.ai_prediction.recommended_route).is_err());
    }

    #[test]
    fn route_label_round_trip_through_display() {
        for label in RouteLabel::ALL {
            assert_eq!(RouteLabel::parse(&label.to_string()).unwrap(), label);
        }
        assert!(RouteLabel::parse("Route D").is_err());
    }
}
