use std::fmt::Debug;
use std::hash::Hash;

use crate::dsl::Expr;
use crate::error::{ConfigError, Result};
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, Variable, VariableKey, Variables};

/// Variables, rules and operators checked once and then shared read-only
/// by every evaluation.
pub struct FuzzySystem<T> {
    vars: Variables<T>,
    rules: Rules<T>,
    model: MamdaniInference,
    antecedents: Vec<VariableKey>,
    consequents: Vec<VariableKey>,
}

impl<T: Copy + Debug + Eq + Hash> FuzzySystem<T> {
    pub fn new(vars: Variables<T>, rules: Rules<T>, model: MamdaniInference) -> std::result::Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::NoRules);
        }

        let mut antecedents = Vec::new();
        let mut consequents = Vec::new();

        for (i, rule) in rules.0.iter().enumerate() {
            if !(rule.weight > 0. && rule.weight <= 1.) {
                return Err(ConfigError::InvalidWeight {
                    rule: i,
                    weight: rule.weight,
                });
            }

            let Expr::Is(out_key, out_term) = &rule.consequence else {
                return Err(ConfigError::CompoundConsequence { rule: i });
            };

            check_proposition(&vars, i, *out_key, out_term)?;
            push_unique(&mut consequents, *out_key);

            for (key, term) in rule.premise.propositions() {
                check_proposition(&vars, i, key, term)?;
                push_unique(&mut antecedents, key);
            }
        }

        for (i, rule) in rules.0.iter().enumerate() {
            for key in rule.premise.propositions().into_iter().map(|(key, _)| key) {
                if consequents.contains(&key) {
                    return Err(ConfigError::MixedRole {
                        rule: i,
                        variable: vars[key].name().to_owned(),
                    });
                }
            }
        }

        tracing::debug!(
            variables = vars.len(),
            rules = rules.len(),
            inputs = antecedents.len(),
            outputs = consequents.len(),
            "compiled fuzzy system"
        );

        Ok(Self {
            vars,
            rules,
            model,
            antecedents,
            consequents,
        })
    }

    /// Infers every output variable from the crisp `inputs`
    pub fn eval(&self, inputs: &Inputs) -> Result<Outputs> {
        self.model
            .eval(&self.vars, &self.rules, &self.antecedents, &self.consequents, inputs)
    }

    /// Term of `var` in which `value` has the greatest membership, judged on
    /// the term's own membership function. Ties go to the term declared first.
    pub fn resolve<I>(&self, var: Variable<I>, value: f64) -> Option<I>
    where
        T: TryInto<I>,
    {
        self.resolve_term(var.0, value)
            .and_then(|(term, _)| term.try_into().ok())
    }

    pub fn resolve_term(&self, key: VariableKey, value: f64) -> Option<(T, f64)> {
        let var = self.vars.by_key(key)?;
        let mut best: Option<(T, f64)> = None;

        for (term, shape) in var.terms() {
            let degree = shape.membership(value);

            match best {
                Some((_, best_degree)) if degree <= best_degree => {},
                _ => best = Some((term, degree)),
            }
        }

        best
    }

    pub fn variable<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.vars.get(var)
    }

    pub fn variables(&self) -> impl Iterator<Item = &LinguisticVariable<T>> {
        self.vars.values()
    }

    pub fn model(&self) -> &MamdaniInference {
        &self.model
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

fn check_proposition<T: Copy + Debug + Eq>(
    vars: &Variables<T>,
    rule: usize,
    key: VariableKey,
    term: &T,
) -> std::result::Result<(), ConfigError> {
    let var = vars.by_key(key).ok_or(ConfigError::UnknownVariable { rule })?;

    if var.term(term).is_none() {
        return Err(ConfigError::UnknownTerm {
            rule,
            variable: var.name().to_owned(),
            term: format!("{term:?}"),
        });
    }

    Ok(())
}

fn push_unique(keys: &mut Vec<VariableKey>, key: VariableKey) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}
