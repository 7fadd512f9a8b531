use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::{InferredSet, Outputs};
use crate::rules::Rules;
use crate::variable::{VariableKey, Variables};

/// What to do with a crisp input that lies outside its variable's universe
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniversePolicy {
    /// Evaluate the membership functions as is; they fall to zero outside their support
    #[default]
    Evaluate,
    /// Move the input to the nearest end of the universe
    Clamp,
    /// Fail with [`FuzzyError::OutOfUniverse`]
    Reject,
}

/// Operators of a Mamdani style inference. The default is min / max
/// combination, clipping implication, max aggregation and the centroid.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MamdaniInference {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub imp_op: ImplicationOp,
    pub prod_link: ProductionLink,
    pub defuzz_op: DefuzzificationOp,
    pub universe_policy: UniversePolicy,
}

impl MamdaniInference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
            universe_policy: UniversePolicy::default(),
        }
    }

    pub fn with_universe_policy(mut self, universe_policy: UniversePolicy) -> Self {
        self.universe_policy = universe_policy;
        self
    }

    /// Runs fuzzification, rule evaluation, aggregation and defuzzification.
    /// The variables and rules must have been validated by `FuzzySystem::new`.
    pub(crate) fn eval<T: Copy + Debug + Eq + Hash>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        antecedents: &[VariableKey],
        consequents: &[VariableKey],
        inputs: &Inputs,
    ) -> Result<Outputs> {
        let mut ctx = InferenceContext::with_capacity(antecedents.len(), rules.len());

        self.fuzzify(&mut ctx, vars, antecedents, inputs)?;
        self.evaluate_rules(&mut ctx, rules);
        self.aggregate(&mut ctx, vars, rules, consequents);
        self.defuzzify(ctx, vars)
    }

    fn fuzzify<T: Copy + Eq + Hash>(
        &self,
        ctx: &mut InferenceContext<T>,
        vars: &Variables<T>,
        antecedents: &[VariableKey],
        inputs: &Inputs,
    ) -> Result<()> {
        for key in antecedents {
            let var = &vars[*key];
            let universe = var.universe();
            let Some(mut value) = inputs.0.get(key).copied() else {
                return Err(FuzzyError::MissingInput(var.name().to_owned()));
            };

            if !value.is_finite() {
                return Err(FuzzyError::NonFiniteInput(var.name().to_owned()));
            }

            if !universe.contains(value) {
                match self.universe_policy {
                    UniversePolicy::Evaluate => {},
                    UniversePolicy::Clamp => value = value.clamp(universe.min(), universe.max()),
                    UniversePolicy::Reject => {
                        return Err(FuzzyError::OutOfUniverse {
                            variable: var.name().to_owned(),
                            value,
                            min: universe.min(),
                            max: universe.max(),
                        })
                    },
                }
            }

            ctx.crisp.insert(*key, value);

            for (term, degree) in var.fuzzify(value) {
                ctx.fuzzified.insert((*key, term), degree);
            }
        }

        tracing::trace!(inputs = ?ctx.crisp, "fuzzified inputs");

        Ok(())
    }

    fn evaluate_rules<T: Copy + Debug + Eq + Hash>(&self, ctx: &mut InferenceContext<T>, rules: &Rules<T>) {
        let fuzzified = &ctx.fuzzified;
        let degree = |key: VariableKey, term: &T| fuzzified.get(&(key, *term)).copied().unwrap_or(0.);

        let strengths = rules
            .0
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let strength = rule.premise.firing_strength(self.and_op, self.or_op, &degree) * rule.weight;

                tracing::trace!(
                    rule = i,
                    label = rule.label.as_deref(),
                    detached = rule.detached,
                    strength,
                    "rule fired"
                );

                strength
            })
            .collect();

        ctx.strengths = strengths;
    }

    fn aggregate<T: Copy + Eq + Hash>(
        &self,
        ctx: &mut InferenceContext<T>,
        vars: &Variables<T>,
        rules: &Rules<T>,
        consequents: &[VariableKey],
    ) {
        for key in consequents {
            let var = &vars[*key];
            let points = var.universe().points();
            let mut per_term: Vec<(T, Option<Vec<f64>>)> = var.terms().map(|(term, _)| (term, None)).collect();

            for (rule, strength) in rules.0.iter().zip(ctx.strengths.iter().copied()) {
                let Expr::Is(out_key, out_term) = &rule.consequence else {
                    continue;
                };

                if out_key != key || rule.detached {
                    continue;
                }

                let Some((shape, (_, slot))) = var
                    .term(out_term)
                    .zip(per_term.iter_mut().find(|(term, _)| term == out_term))
                else {
                    continue;
                };

                let implied: Vec<f64> = points
                    .iter()
                    .map(|x| self.imp_op.call(strength, shape.membership(*x)))
                    .collect();

                if let Some(acc) = slot.as_mut() {
                    self.prod_link.fold_into(acc, &implied);
                } else {
                    *slot = Some(implied);
                }
            }

            let curves = per_term
                .into_iter()
                .map(|(term, curve)| (term, curve.unwrap_or_else(|| vec![0.; points.len()])))
                .collect();

            ctx.aggregated.push((*key, curves));
        }
    }

    fn defuzzify<T: Copy + Eq + Hash>(&self, ctx: InferenceContext<T>, vars: &Variables<T>) -> Result<Outputs> {
        let mut inferred = HashMap::with_capacity(ctx.aggregated.len());

        for (key, curves) in ctx.aggregated {
            let var = &vars[key];
            let points = var.universe().points();
            let mut term_curves = curves.iter().map(|(_, curve)| curve);
            let overall = match term_curves.next() {
                Some(first) => term_curves.fold(first.clone(), |mut acc, curve| {
                    self.prod_link.fold_into(&mut acc, curve);
                    acc
                }),
                None => vec![0.; points.len()],
            };

            if overall.iter().all(|m| *m == 0.) {
                return Err(FuzzyError::UndefinedOutput {
                    variable: var.name().to_owned(),
                });
            }

            let crisp = self.defuzz_op.call(points, &overall);

            tracing::debug!(variable = var.name(), crisp, "defuzzified output");

            inferred.insert(
                key,
                InferredSet {
                    crisp,
                    universe: points.to_vec(),
                    aggregated: overall,
                },
            );
        }

        Ok(Outputs::new(inferred, ctx.strengths))
    }
}

/// Working state of a single evaluation. Never shared between calls.
struct InferenceContext<T> {
    crisp: HashMap<VariableKey, f64>,
    fuzzified: HashMap<(VariableKey, T), f64>,
    strengths: Vec<f64>,
    // Output variable => aggregated curve of each of its terms, in the
    // order the outputs were first concluded
    aggregated: Vec<(VariableKey, Vec<(T, Vec<f64>)>)>,
}

impl<T> InferenceContext<T> {
    fn with_capacity(n_inputs: usize, n_rules: usize) -> Self {
        Self {
            crisp: HashMap::with_capacity(n_inputs),
            fuzzified: HashMap::new(),
            strengths: Vec::with_capacity(n_rules),
            aggregated: Vec::new(),
        }
    }
}
