use crate::dsl::Expr;

#[derive(Default)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds `premise => consequence` with weight one. The consequence must be
    /// a single `variable.is(term)` proposition.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) -> &mut Rule<T> {
        self.0.push(Rule {
            premise,
            consequence,
            weight: 1.,
            label: None,
            detached: false,
        });

        let last = self.0.len() - 1;

        &mut self.0[last]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
    pub(crate) weight: f64,
    pub(crate) label: Option<String>,
    pub(crate) detached: bool,
}

impl<T> Rule<T> {
    /// Scales the firing strength. Must lie in (0, 1], checked when the
    /// system is built.
    pub fn weight(&mut self, weight: f64) -> &mut Self {
        self.weight = weight;
        self
    }

    /// Keeps evaluating the rule and reporting its firing strength, but
    /// leaves its consequent out of the aggregated output set.
    pub fn detach(&mut self) -> &mut Self {
        self.detached = true;
        self
    }

    /// Name shown in logs
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }
}
