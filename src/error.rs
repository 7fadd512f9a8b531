use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FuzzyError>;

/// Problems with a fuzzy system definition. These are detected while the
/// system is being built and mean it must not be used for evaluation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("breakpoints must satisfy a <= b <= c, got ({a}, {b}, {c})")]
    UnorderedBreakpoints { a: f64, b: f64, c: f64 },

    #[error("breakpoints must be finite numbers")]
    NonFiniteBreakpoint,

    #[error("a universe needs at least two sample points, got {0}")]
    EmptyUniverse(usize),

    #[error("universe points must be finite and strictly increasing")]
    UnsortedUniverse,

    #[error("invalid universe step {step} over [{min}, {max}]")]
    InvalidStep { min: f64, max: f64, step: f64 },

    #[error("universe would have {points} sample points, at most {limit} are allowed")]
    UniverseTooLarge { points: usize, limit: usize },

    #[error("variable `{0}` defines no terms")]
    NoTerms(String),

    #[error("term {0} is defined more than once")]
    DuplicateTerm(String),

    #[error("variable `{0}` is defined more than once")]
    DuplicateVariable(String),

    #[error("the rule base is empty")]
    NoRules,

    #[error("rule {rule} references a variable that does not belong to this system")]
    UnknownVariable { rule: usize },

    #[error("rule {rule} references term {term} which `{variable}` does not define")]
    UnknownTerm {
        rule: usize,
        variable: String,
        term: String,
    },

    #[error("rule {rule} must conclude a single proposition")]
    CompoundConsequence { rule: usize },

    #[error("rule {rule} uses `{variable}` both as an input and as an output")]
    MixedRole { rule: usize, variable: String },

    #[error("rule {rule} has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The aggregated output set is zero everywhere, so the centroid is undefined.
    #[error("no rule fired for `{variable}`, its output is undefined")]
    UndefinedOutput { variable: String },

    #[error("missing crisp input for `{0}`")]
    MissingInput(String),

    #[error("crisp input for `{0}` is not a finite number")]
    NonFiniteInput(String),

    #[error("crisp input {value} for `{variable}` lies outside its universe [{min}, {max}]")]
    OutOfUniverse {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors surfaced by the device advisor shell around the engine.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for AdvisorError {
    fn from(err: ConfigError) -> Self {
        Self::Fuzzy(err.into())
    }
}
