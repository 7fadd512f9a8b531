use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey};

/// Premise of a rule: propositions `variable is term` joined by AND / OR
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Box<Expr<T>>, Box<Expr<T>>),
    Or(Box<Expr<T>>, Box<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
            }
        }

        parse(self, &mut props);

        props
    }

    /// Degree to which the premise holds, given the degree of each proposition
    pub fn firing_strength(&self, and_op: AndOp, or_op: OrOp, degree: &impl Fn(VariableKey, &T) -> f64) -> f64 {
        match self {
            Expr::Is(var_key, term) => degree(*var_key, term),
            Expr::And(lhs, rhs) => and_op.call(
                lhs.firing_strength(and_op, or_op, degree),
                rhs.firing_strength(and_op, or_op, degree),
            ),
            Expr::Or(lhs, rhs) => or_op.call(
                lhs.firing_strength(and_op, or_op, degree),
                rhs.firing_strength(and_op, or_op, degree),
            ),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> (VariableKey, VariableKey) {
        let keys = VariableKey::unbound(2);

        (keys[0], keys[1])
    }

    #[test]
    fn test_min_max_combinators() {
        let (x, y) = keys();
        let grid = [0., 0.1, 0.25, 0.5, 0.75, 0.9, 1.];

        for s1 in grid {
            for s2 in grid {
                let degree = |key: VariableKey, _: &u8| if key == x { s1 } else { s2 };
                let and = Expr::Is(x, 0u8).and(Expr::Is(y, 0));
                let or = Expr::Is(x, 0u8).or(Expr::Is(y, 0));

                assert_eq!(and.firing_strength(AndOp::Min, OrOp::Max, &degree), s1.min(s2));
                assert_eq!(or.firing_strength(AndOp::Min, OrOp::Max, &degree), s1.max(s2));
            }
        }
    }

    #[test]
    fn test_nested_expression() {
        let (x, y) = keys();
        // (x is 1 and y is 2) or x is 3
        let expr = Expr::Is(x, 1u8).and(Expr::Is(y, 2)).or(Expr::Is(x, 3));
        let degree = |key: VariableKey, term: &u8| match (key == x, *term) {
            (true, 1) => 0.8,
            (false, 2) => 0.4,
            (true, 3) => 0.3,
            _ => 0.,
        };

        assert_eq!(expr.firing_strength(AndOp::Min, OrOp::Max, &degree), 0.4);
        assert_eq!(expr.propositions(), vec![(x, &1), (y, &2), (x, &3)]);
    }
}
