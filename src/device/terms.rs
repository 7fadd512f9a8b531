use std::fmt;

use serde::Serialize;

use crate::terms::Key;

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum Consumption {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
pub enum Cost {
    Low,
    Medium,
    High,
}

/// Recommended usage level. Variant order is the tie-break order when a
/// score belongs equally to two levels.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Usage {
    Low,
    Moderate,
    High,
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        })
    }
}

crate::term_union! {
    /// Every term of the usage advisor's variables
    pub enum DeviceTerm {
        Consumption(Consumption),
        Cost(Cost),
        Usage(Usage),
    }
}
