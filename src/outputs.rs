use std::collections::HashMap;

use crate::math::interp;
use crate::variable::{Variable, VariableKey};

#[derive(Clone, Debug)]
pub(crate) struct InferredSet {
    pub(crate) crisp: f64,
    pub(crate) universe: Vec<f64>,
    pub(crate) aggregated: Vec<f64>,
}

/// Result of one evaluation of a fuzzy system
#[derive(Clone, Debug)]
pub struct Outputs {
    inferred: HashMap<VariableKey, InferredSet>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(inferred: HashMap<VariableKey, InferredSet>, firing_strengths: Vec<f64>) -> Self {
        Self {
            inferred,
            firing_strengths,
        }
    }

    /// Defuzzified value of an output variable
    pub fn crisp<I>(&self, var: Variable<I>) -> Option<f64> {
        self.inferred.get(&var.0).map(|set| set.crisp)
    }

    /// Aggregated membership of an output variable at `x`, interpolated
    /// between the universe sample points.
    pub fn aggregated_membership<I>(&self, var: Variable<I>, x: f64) -> Option<f64> {
        let set = self.inferred.get(&var.0)?;

        if x < set.universe[0] || x > set.universe[set.universe.len() - 1] {
            return Some(0.);
        }

        Some(interp(x, &set.universe, &set.aggregated))
    }

    /// Aggregated output set sampled over the universe
    pub fn aggregated<I>(&self, var: Variable<I>) -> Option<&[f64]> {
        self.inferred.get(&var.0).map(|set| &*set.aggregated)
    }

    /// Firing strength of every rule, in the order they were added
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn max_firing_strength(&self) -> f64 {
        self.firing_strengths.iter().copied().fold(0., f64::max)
    }
}
