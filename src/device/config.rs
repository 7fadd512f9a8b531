use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::inference::MamdaniInference;

pub const ESSENTIAL_CATEGORY: &str = "Essential";

/// Construction-time settings of the usage advisor. Missing sections fall
/// back to the reference system; fields inside a section are all required.
///
/// ```toml
/// essential_category = "Essential"
///
/// [consumption]
/// min = 0.0
/// max = 2500.0
/// step = 1.0
/// low = [0.0, 300.0, 500.0]
/// medium = [400.0, 800.0, 1200.0]
/// high = [1000.0, 1500.0, 2500.0]
///
/// [inference]
/// defuzz_op = "centroid"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Devices of this category bypass inference
    pub essential_category: String,
    /// Weight of the "consumption high or cost high => usage high" rule
    pub priority_rule_weight: f64,
    /// Whether that rule's consequent joins the usage aggregate. Off by
    /// default: the rule is evaluated and reported but does not move the score.
    pub aggregate_priority_rule: bool,
    pub consumption: InputConfig,
    pub cost: InputConfig,
    pub usage: UsageConfig,
    pub inference: MamdaniInference,
}

/// Universe and low / medium / high triangles of an input variable
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InputConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub low: [f64; 3],
    pub medium: [f64; 3],
    pub high: [f64; 3],
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UsageConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub low: [f64; 3],
    pub moderate: [f64; 3],
    pub high: [f64; 3],
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            essential_category: ESSENTIAL_CATEGORY.to_owned(),
            priority_rule_weight: 1.,
            aggregate_priority_rule: false,
            consumption: InputConfig {
                min: 0.,
                max: 2500.,
                step: 1.,
                low: [0., 300., 500.],
                medium: [400., 800., 1200.],
                high: [1000., 1500., 2500.],
            },
            cost: InputConfig {
                min: 0.,
                max: 3.,
                step: 0.1,
                low: [0., 0.5, 1.],
                medium: [0.5, 1.5, 2.],
                high: [1.5, 2.5, 3.],
            },
            usage: UsageConfig {
                min: 0.,
                max: 3.,
                step: 0.1,
                low: [0., 0.5, 1.],
                moderate: [0.5, 1.5, 2.],
                high: [1.5, 2.5, 3.],
            },
            inference: MamdaniInference::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AdvisorError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AdvisorError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AdvisorError::Io {
            path: path.to_owned(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loaded advisor config");

        Self::from_toml_str(&raw)
    }
}
