use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Index, RangeInclusive};
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{new_key_type, SlotMap};

use crate::error::ConfigError;
use crate::linspace::Linspace;
use crate::membership::Triangle;
use crate::terms::{Term, Terms};

new_key_type! {
    pub(crate) struct SlotKey;
}

#[cfg(test)]
impl VariableKey {
    /// Distinct keys that belong to no set of variables
    pub(crate) fn unbound(n: usize) -> Vec<Self> {
        let mut slots = SlotMap::<SlotKey, ()>::with_key();

        (0..n)
            .map(|_| VariableKey {
                set: u64::MAX,
                slot: slots.insert(()),
            })
            .collect()
    }
}

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

/// A variable key. Only valid for the `Variables` that issued it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VariableKey {
    set: u64,
    slot: SlotKey,
}

/// Typed handle to a variable whose terms are the enum `I`
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        Variable(self.0, PhantomData)
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Variable<I> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

/// Most sample points `Universe::arange` will generate
pub const MAX_UNIVERSE_POINTS: usize = 1 << 20;

/// Sample points a variable is evaluated and integrated over.
/// Always strictly increasing with at least two points.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe(Vec<f64>);

impl Universe {
    /// Evenly spaced points from the start of `range` to its end. The step
    /// is snapped so that both ends are part of the universe.
    pub fn arange(range: RangeInclusive<f64>, step: f64) -> Result<Self, ConfigError> {
        let (min, max) = range.into_inner();

        if !(min.is_finite() && max.is_finite() && step.is_finite() && step > 0. && min < max) {
            return Err(ConfigError::InvalidStep { min, max, step });
        }

        let points = Linspace::by_step(min, max, step).ok_or(ConfigError::InvalidStep { min, max, step })?;

        if points.len() > MAX_UNIVERSE_POINTS {
            return Err(ConfigError::UniverseTooLarge {
                points: points.len(),
                limit: MAX_UNIVERSE_POINTS,
            });
        }

        Self::from_points(points.collect())
    }

    pub fn from_points(points: Vec<f64>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::EmptyUniverse(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) || points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnsortedUniverse);
        }

        Ok(Self(points))
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min() <= x && x <= self.max()
    }
}

/// A named universe with its labelled membership functions
#[derive(Clone, Debug)]
pub struct LinguisticVariable<T> {
    name: String,
    universe: Universe,
    // Kept in term enum declaration order
    terms: Vec<(T, Triangle)>,
}

impl<T: Copy + Eq> LinguisticVariable<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> impl Iterator<Item = (T, &Triangle)> + '_ {
        self.terms.iter().map(|(term, shape)| (*term, shape))
    }

    pub fn term(&self, term: &T) -> Option<&Triangle> {
        self.terms.iter().find(|(t, _)| t == term).map(|(_, shape)| shape)
    }

    /// Membership degree of `x` for every term of the variable
    pub fn fuzzify(&self, x: f64) -> Vec<(T, f64)> {
        self.terms
            .iter()
            .map(|(term, shape)| (*term, shape.membership(x)))
            .collect()
    }

    /// Every term's membership function sampled over the universe, as a
    /// plotting backend would draw them.
    pub fn curves(&self) -> Vec<(T, Vec<f64>)> {
        self.terms
            .iter()
            .map(|(term, shape)| (*term, shape.sample(self.universe.points())))
            .collect()
    }
}

pub struct Variables<T> {
    id: u64,
    vars: SlotMap<SlotKey, LinguisticVariable<T>>,
}

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            vars: SlotMap::with_key(),
        }
    }
}

impl<T> Variables<T> {
    /// `None` for keys issued by another set of variables
    pub(crate) fn by_key(&self, key: VariableKey) -> Option<&LinguisticVariable<T>> {
        if key.set != self.id {
            return None;
        }

        self.vars.get(key.slot)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &LinguisticVariable<T>> {
        self.vars.values()
    }
}

impl<T> Index<VariableKey> for Variables<T> {
    type Output = LinguisticVariable<T>;

    fn index(&self, key: VariableKey) -> &Self::Output {
        debug_assert_eq!(key.set, self.id, "variable key from another set");
        &self.vars[key.slot]
    }
}

impl<T: Copy + Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I: Into<T> + Term + 'static>(
        &mut self,
        name: impl Into<String>,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>, ConfigError> {
        let name = name.into();

        if terms.is_empty() {
            return Err(ConfigError::NoTerms(name));
        }
        if self.vars.values().any(|var| var.name == name) {
            return Err(ConfigError::DuplicateVariable(name));
        }

        let terms = terms.0.iter().map(|(k, shape)| (k.into(), *shape)).collect();
        let slot = self.vars.insert(LinguisticVariable { name, universe, terms });

        Ok(Variable(VariableKey { set: self.id, slot }, PhantomData))
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.by_key(var.0)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
