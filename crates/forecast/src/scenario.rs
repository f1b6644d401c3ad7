use serde::{Deserialize, Serialize};

use stockcast_core::ValueObject;

/// Key of the unshifted run that every scenario map contains.
pub const BASELINE_SCENARIO: &str = "baseline";

/// A hypothetical uniform change in demand, e.g. `+0.2` for 20% more sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationScenario {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "demandChange", alias = "demandChangeRate")]
    pub demand_change_rate: f64,
    /// Free text, not used computationally.
    #[serde(default)]
    pub description: String,
}

impl SimulationScenario {
    pub fn new(name: impl Into<String>, demand_change_rate: f64) -> Self {
        Self {
            name: name.into(),
            demand_change_rate,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl ValueObject for SimulationScenario {}

/// Scenarios used when the caller supplies none.
pub fn default_scenarios() -> Vec<SimulationScenario> {
    vec![
        SimulationScenario::new("demand_increase_20", 0.2)
            .with_description("Demand grows 20% over current sales velocity"),
        SimulationScenario::new("demand_decrease_20", -0.2)
            .with_description("Demand falls 20% below current sales velocity"),
        SimulationScenario::new("demand_surge_50", 0.5)
            .with_description("Seasonal or promotional surge of 50%"),
        SimulationScenario::new("demand_drop_30", -0.3)
            .with_description("Market slowdown cutting demand by 30%"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_four_distinct_shifts() {
        let defaults = default_scenarios();
        let rates: Vec<f64> = defaults.iter().map(|s| s.demand_change_rate).collect();
        assert_eq!(rates, vec![0.2, -0.2, 0.5, -0.3]);
        assert!(defaults.iter().all(|s| s.name != BASELINE_SCENARIO));
    }

    #[test]
    fn deserializes_wire_shape_with_optional_fields() {
        let s: SimulationScenario =
            serde_json::from_str(r#"{"name": "promo", "demandChange": 0.35}"#).unwrap();
        assert_eq!(s, SimulationScenario::new("promo", 0.35));

        let unnamed: SimulationScenario = serde_json::from_str(r#"{"demandChangeRate": -0.1}"#).unwrap();
        assert!(unnamed.name.is_empty());
        assert_eq!(unnamed.demand_change_rate, -0.1);
    }
}
