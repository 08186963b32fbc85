//! Scenario configuration and the options catalog used to populate forms.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Closed set of wire values for a form field.
pub trait Choice: Sized + Copy + 'static {
    /// Field name used in error messages.
    const WHAT: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| CoreError::UnknownChoice {
                what: Self::WHAT,
                value: value.to_string(),
            })
    }
}

macro_rules! choice_enum {
    ($name:ident, $what:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl Choice for $name {
            const WHAT: &'static str = $what;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Choice>::parse(s)
            }
        }
    };
}

choice_enum!(Density, "density", {
    Low => "low",
    Medium => "medium",
    High => "high",
    RushHour => "rush_hour",
});

choice_enum!(VehicleMix, "vehicle mix", {
    CarsOnly => "cars_only",
    Mixed => "mixed",
    HeavyCommercial => "heavy_commercial",
});

choice_enum!(Pattern, "departure pattern", {
    Uniform => "uniform",
    RushHour => "rush_hour",
    Random => "random",
});

choice_enum!(VehicleType, "vehicle type", {
    Car => "car",
    Ambulance => "ambulance",
});

choice_enum!(Objective, "objective", {
    Fast => "fast",
    Safe => "safe",
});

/// One simulation/prediction scenario. Immutable once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub density: Density,
    pub vehicle_mix: VehicleMix,
    pub pattern: Pattern,
    pub seed: i64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            density: Density::Medium,
            vehicle_mix: VehicleMix::Mixed,
            pattern: Pattern::Uniform,
            seed: 42,
        }
    }
}

/// Body of a run-prediction request: the scenario plus the routing choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(flatten)]
    pub scenario: ScenarioConfig,
    pub vehicle_type: VehicleType,
    pub objective: Objective,
}

impl Default for VehicleType {
    fn default() -> Self {
        VehicleType::Car
    }
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Fast
    }
}

impl VehicleType {
    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Ambulance => "Ambulance",
        }
    }
}

impl Objective {
    pub fn label(self) -> &'static str {
        match self {
            Objective::Fast => "Fastest",
            Objective::Safe => "Safest",
        }
    }
}

/// Choices offered by the collaborator for the scenario form.
///
/// The empty catalog is the degraded state used when the collaborator cannot
/// be reached at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOptions {
    #[serde(default)]
    pub density: Vec<String>,
    #[serde(default)]
    pub vehicle_mix: Vec<String>,
    #[serde(default)]
    pub pattern: Vec<String>,
}

impl ScenarioOptions {
    pub fn is_empty(&self) -> bool {
        self.density.is_empty() && self.vehicle_mix.is_empty() && self.pattern.is_empty()
    }

    /// Catalog entries this client can submit, in catalog order.
    ///
    /// Values the client has no variant for are skipped.
    pub fn densities(&self) -> Vec<Density> {
        parse_known(&self.density)
    }

    pub fn vehicle_mixes(&self) -> Vec<VehicleMix> {
        parse_known(&self.vehicle_mix)
    }

    pub fn patterns(&self) -> Vec<Pattern> {
        parse_known(&self.pattern)
    }
}

fn parse_known<C: Choice>(values: &[String]) -> Vec<C> {
    values.iter().filter_map(|v| C::parse(v).ok()).collect()
}

/// Human-readable label for a catalog value. Unknown values display as is.
pub fn display_label(value: &str) -> &str {
    match value {
        "low" => "Low",
        "medium" => "Medium",
        "high" => "High",
        "rush_hour" => "Rush Hour",
        "cars_only" => "Cars Only",
        "mixed" => "Mixed",
        "heavy_commercial" => "Heavy Commercial",
        "uniform" => "Uniform",
        "random" => "Random",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_matches_form_defaults() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.density, Density::Medium);
        assert_eq!(cfg.vehicle_mix, VehicleMix::Mixed);
        assert_eq!(cfg.pattern, Pattern::Uniform);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn scenario_serializes_with_wire_names() {
        let cfg = ScenarioConfig {
            density: Density::RushHour,
            vehicle_mix: VehicleMix::HeavyCommercial,
            pattern: Pattern::Random,
            seed: 7,
        };
        let json = serde_json::to_value(cfg).unwrap();
        assert_eq!(json["density"], "rush_hour");
        assert_eq!(json["vehicle_mix"], "heavy_commercial");
        assert_eq!(json["pattern"], "random");
        assert_eq!(json["seed"], 7);
    }

    #[test]
    fn predict_request_is_flat() {
        let req = PredictRequest {
            vehicle_type: VehicleType::Ambulance,
            objective: Objective::Safe,
            ..Default::default()
        };
        let json = serde_json::to_value(req).unwrap();
        assert_eq!(json["density"], "medium");
        assert_eq!(json["seed"], 42);
        assert_eq!(json["vehicle_type"], "ambulance");
        assert_eq!(json["objective"], "safe");
        assert!(json.get("scenario").is_none());
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!("high".parse::<Density>().unwrap(), Density::High);
        let err = "gridlock".parse::<Density>().unwrap_err();
        assert!(err.to_string().contains("gridlock"));
    }

    #[test]
    fn catalog_skips_values_without_a_variant() {
        let options = ScenarioOptions {
            density: vec!["low".into(), "extreme".into(), "rush_hour".into()],
            vehicle_mix: vec![],
            pattern: vec!["random".into()],
        };
        assert_eq!(options.densities(), vec![Density::Low, Density::RushHour]);
        assert!(options.vehicle_mixes().is_empty());
        assert_eq!(options.patterns(), vec![Pattern::Random]);
    }

    #[test]
    fn missing_catalog_fields_default_to_empty() {
        let options: ScenarioOptions = serde_json::from_str(r#"{"density":["low"]}"#).unwrap();
        assert_eq!(options.density, vec!["low".to_string()]);
        assert!(options.pattern.is_empty());
        assert!(ScenarioOptions::default().is_empty());
    }

    #[test]
    fn display_labels() {
        assert_eq!(display_label("rush_hour"), "Rush Hour");
        assert_eq!(display_label("heavy_commercial"), "Heavy Commercial");
        assert_eq!(display_label("unheard_of"), "unheard_of");
    }
}
