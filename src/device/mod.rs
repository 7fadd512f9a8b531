//! Usage level advisor for household devices.
//!
//! Power consumption and energy cost go through a small Mamdani system whose
//! crisp output is mapped back to a LOW / MODERATE / HIGH label. Devices of
//! the essential category skip inference altogether.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ConfigError, FuzzyError, Result};
use crate::inputs::Inputs;
use crate::rules::Rules;
use crate::system::FuzzySystem;
use crate::terms::{Term, Terms};
use crate::variable::{Universe, Variable, Variables};

pub mod catalog;
pub mod config;
pub mod terms;

pub use config::{AdvisorConfig, InputConfig, UsageConfig, ESSENTIAL_CATEGORY};
pub use terms::{Consumption, Cost, DeviceTerm, Usage};

/// Informational only, never consulted by the advisor
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub id: String,
    pub category: String,
    /// Same unit as the consumption universe
    pub consumption: f64,
    /// Same unit as the cost universe
    pub cost: f64,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl DeviceRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>, consumption: f64, cost: f64) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            consumption,
            cost,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UsageVerdict {
    Level(Usage),
    /// Essential device, inference skipped
    SpecialPriority,
}

impl fmt::Display for UsageVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(usage) => fmt::Display::fmt(usage, f),
            Self::SpecialPriority => f.write_str("HIGH (Special Priority)"),
        }
    }
}

impl Serialize for UsageVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Assessment {
    pub verdict: UsageVerdict,
    /// Crisp usage score; absent when inference was skipped
    pub score: Option<f64>,
}

/// The consumption / cost => usage fuzzy system
pub struct UsageSystem {
    system: FuzzySystem<DeviceTerm>,
    consumption: Variable<Consumption>,
    cost: Variable<Cost>,
    usage: Variable<Usage>,
}

impl UsageSystem {
    pub fn new(config: &AdvisorConfig) -> std::result::Result<Self, ConfigError> {
        let mut vars = Variables::new();
        let c = &config.consumption;
        let consumption = vars.add(
            "consumption",
            Universe::arange(c.min..=c.max, c.step)?,
            three_terms([Consumption::Low, Consumption::Medium, Consumption::High], [c.low, c.medium, c.high])?,
        )?;
        let c = &config.cost;
        let cost = vars.add(
            "cost",
            Universe::arange(c.min..=c.max, c.step)?,
            three_terms([Cost::Low, Cost::Medium, Cost::High], [c.low, c.medium, c.high])?,
        )?;
        let u = &config.usage;
        let usage = vars.add(
            "usage",
            Universe::arange(u.min..=u.max, u.step)?,
            three_terms([Usage::Low, Usage::Moderate, Usage::High], [u.low, u.moderate, u.high])?,
        )?;

        let mut rules = Rules::with_capacity(6);

        rules.add(
            consumption.is(Consumption::High).and(cost.is(Cost::High)),
            usage.is(Usage::Low),
        );
        rules.add(
            consumption.is(Consumption::Medium).and(cost.is(Cost::Medium)),
            usage.is(Usage::Moderate),
        );
        rules.add(consumption.is(Consumption::Low), usage.is(Usage::High));
        rules.add(
            consumption.is(Consumption::Medium).and(cost.is(Cost::High)),
            usage.is(Usage::Low),
        );
        rules.add(
            consumption.is(Consumption::High).and(cost.is(Cost::Medium)),
            usage.is(Usage::Moderate),
        );
        let priority = rules
            .add(
                consumption.is(Consumption::High).or(cost.is(Cost::High)),
                usage.is(Usage::High),
            )
            .weight(config.priority_rule_weight)
            .label("essential priority");

        if !config.aggregate_priority_rule {
            priority.detach();
        }

        Ok(Self {
            system: FuzzySystem::new(vars, rules, config.inference)?,
            consumption,
            cost,
            usage,
        })
    }

    /// Crisp usage score for a consumption / cost pair
    pub fn score(&self, consumption: f64, cost: f64) -> Result<f64> {
        let mut inputs = Inputs::new();

        inputs.add(self.consumption, consumption);
        inputs.add(self.cost, cost);

        self.system
            .eval(&inputs)?
            .crisp(self.usage)
            .ok_or_else(|| FuzzyError::UndefinedOutput {
                variable: "usage".to_owned(),
            })
    }

    /// Usage level whose own membership function scores highest at `score`
    pub fn classify(&self, score: f64) -> Result<Usage> {
        self.system
            .resolve(self.usage, score)
            .ok_or_else(|| FuzzyError::UndefinedOutput {
                variable: "usage".to_owned(),
            })
    }

    pub fn system(&self) -> &FuzzySystem<DeviceTerm> {
        &self.system
    }

    pub fn consumption(&self) -> Variable<Consumption> {
        self.consumption
    }

    pub fn cost(&self) -> Variable<Cost> {
        self.cost
    }

    pub fn usage(&self) -> Variable<Usage> {
        self.usage
    }
}

fn three_terms<K: Term + fmt::Debug>(keys: [K; 3], shapes: [[f64; 3]; 3]) -> std::result::Result<Terms<K>, ConfigError> {
    let mut terms = Terms::new();

    for (key, [a, b, c]) in keys.into_iter().zip(shapes) {
        terms = terms.triangle(key, a, b, c)?;
    }

    Ok(terms)
}

/// Applies the essential-category override, then the usage system
pub struct DeviceEvaluator {
    usage: UsageSystem,
    essential_category: String,
}

impl DeviceEvaluator {
    pub fn new(usage: UsageSystem, essential_category: impl Into<String>) -> Self {
        Self {
            usage,
            essential_category: essential_category.into(),
        }
    }

    pub fn from_config(config: &AdvisorConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(UsageSystem::new(config)?, config.essential_category.clone()))
    }

    /// Evaluator over the reference variables and rules
    pub fn reference() -> std::result::Result<Self, ConfigError> {
        Self::from_config(&AdvisorConfig::default())
    }

    pub fn usage_system(&self) -> &UsageSystem {
        &self.usage
    }

    pub fn is_essential(&self, device: &DeviceRecord) -> bool {
        device.category == self.essential_category
    }

    pub fn assess(&self, device: &DeviceRecord) -> Result<Assessment> {
        if self.is_essential(device) {
            return Ok(Assessment {
                verdict: UsageVerdict::SpecialPriority,
                score: None,
            });
        }

        let score = self.usage.score(device.consumption, device.cost)?;
        let level = self.usage.classify(score)?;

        tracing::debug!(device = %device.id, score, %level, "assessed device");

        Ok(Assessment {
            verdict: UsageVerdict::Level(level),
            score: Some(score),
        })
    }

    pub fn evaluate(&self, device: &DeviceRecord) -> Result<UsageVerdict> {
        self.assess(device).map(|assessment| assessment.verdict)
    }

    /// Assesses every device; a failure is reported for that device only
    pub fn evaluate_all<'d>(&self, devices: &'d [DeviceRecord]) -> Vec<(&'d DeviceRecord, Result<Assessment>)> {
        devices
            .iter()
            .map(|device| {
                let result = self.assess(device);

                if let Err(err) = &result {
                    tracing::warn!(device = %device.id, error = %err, "device evaluation failed");
                }

                (device, result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_labels() {
        assert_eq!(UsageVerdict::Level(Usage::Low).to_string(), "LOW");
        assert_eq!(UsageVerdict::Level(Usage::Moderate).to_string(), "MODERATE");
        assert_eq!(UsageVerdict::Level(Usage::High).to_string(), "HIGH");
        assert_eq!(UsageVerdict::SpecialPriority.to_string(), "HIGH (Special Priority)");
    }

    #[test]
    fn test_assessment_json() {
        let assessment = Assessment {
            verdict: UsageVerdict::Level(Usage::Moderate),
            score: Some(1.5),
        };

        assert_eq!(
            serde_json::to_value(assessment).unwrap(),
            serde_json::json!({ "verdict": "MODERATE", "score": 1.5 })
        );
    }

    #[test]
    fn test_record_priority_is_optional() {
        let device: DeviceRecord =
            serde_json::from_str(r#"{"id": "Lamp", "category": "Lighting", "consumption": 40, "cost": 0.2}"#).unwrap();

        assert_eq!(device, DeviceRecord::new("Lamp", "Lighting", 40., 0.2));
    }

    #[test]
    fn test_classify_uses_canonical_order() {
        let evaluator = DeviceEvaluator::reference().unwrap();
        let usage = evaluator.usage_system();

        assert_eq!(usage.classify(0.5).unwrap(), Usage::Low);
        assert_eq!(usage.classify(1.5).unwrap(), Usage::Moderate);
        assert_eq!(usage.classify(2.5).unwrap(), Usage::High);
        // Outside every triangle all levels are zero, the first one wins
        assert_eq!(usage.classify(3.0).unwrap(), Usage::Low);
    }

    #[test]
    fn test_invalid_breakpoints_are_fatal() {
        let mut config = AdvisorConfig::default();

        config.cost.medium = [1.5, 0.5, 2.];

        assert_eq!(
            DeviceEvaluator::from_config(&config).err(),
            Some(ConfigError::UnorderedBreakpoints { a: 1.5, b: 0.5, c: 2. })
        );

        let mut config = AdvisorConfig::default();

        config.priority_rule_weight = 0.;

        assert_eq!(
            DeviceEvaluator::from_config(&config).err(),
            Some(ConfigError::InvalidWeight { rule: 5, weight: 0. })
        );

        let mut config = AdvisorConfig::default();

        config.consumption.step = 1e-12;

        assert!(matches!(
            DeviceEvaluator::from_config(&config),
            Err(ConfigError::UniverseTooLarge { .. })
        ));

        let mut config = AdvisorConfig::default();

        config.usage.step = -0.1;

        assert!(matches!(
            DeviceEvaluator::from_config(&config),
            Err(ConfigError::InvalidStep { .. })
        ));
    }
}
