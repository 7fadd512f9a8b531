use std::iter::Sum;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.call(u, v),
            Self::ProbOr => ProductionLink::ProbOr.call(u, v),
            Self::BoundedSum => ProductionLink::BoundedSum.call(u, v),
            Self::DrasticSum => ProductionLink::DrasticSum.call(u, v),
        }
    }
}

/// How a rule's firing strength shapes its consequent membership function.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani: clip the consequent at the firing strength
    #[default]
    Min,
    /// Larsen: scale the consequent by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for aggregating the consequences of the fuzzy rules. Only
/// s-norms: a rule that did not fire must leave the aggregate unchanged.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionLink {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }

    /// Combines `curve` into `acc` point by point
    pub fn fold_into<F: Float>(self, acc: &mut [F], curve: &[F]) {
        for (a, c) in acc.iter_mut().zip(curve) {
            *a = self.call(*a, *c);
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Weighted mean of the sample points: sum(x * mu) / sum(mu)
    #[default]
    Centroid,
    /// Center of Gravity of the piecewise linear area
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// `membership` must be sampled over `universe` and must not be zero
    /// everywhere; callers check that first.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> F {
        debug_assert_eq!(universe.len(), membership.len());

        let two = F::one() + F::one();

        match self {
            Self::Centroid => {
                let den = membership.iter().copied().sum::<F>();
                let num = universe
                    .iter()
                    .zip(membership)
                    .map(|(x, m)| *x * *m)
                    .sum::<F>();

                num / den
            },
            Self::Cog => {
                let three = two + F::one();
                let mut den = F::zero();
                let mut num = F::zero();

                for i in 0..universe.len().saturating_sub(1) {
                    let base = universe[i + 1] - universe[i];
                    let area_rect = F::min(membership[i], membership[i + 1]) * base;
                    let center_rect = universe[i] + base / two;
                    let area_tria = base * F::abs(membership[i + 1] - membership[i]) / two;
                    let center_tria = if membership[i + 1] > membership[i] {
                        universe[i] + two / three * base
                    } else {
                        universe[i] + F::one() / three * base
                    };

                    den = den + area_rect + area_tria;
                    num = num + area_rect * center_rect + area_tria * center_tria;
                }

                num / den
            },
            Self::Boa => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(x, m)| (m[0] + m[1]) * (x[1] - x[0]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    if cum_area + area >= target && area > F::zero() {
                        let xp = [universe[i], universe[i + 1]];
                        let fp = [cum_area, cum_area + area];

                        // Linear in the accumulated area, inverted through the x/area pairs
                        return interp(target, &fp, &xp);
                    }
                    cum_area = cum_area + area;
                }

                universe[universe.len() - 1]
            },
            Self::Mom | Self::Lom | Self::Som => {
                let maximum = membership.iter().copied().fold(F::neg_infinity(), F::max);
                let peaks = universe
                    .iter()
                    .zip(membership)
                    .filter(|(_, m)| **m == maximum)
                    .map(|(x, _)| *x);

                match self {
                    Self::Lom => peaks.fold(F::neg_infinity(), F::max),
                    Self::Som => peaks.fold(F::infinity(), F::min),
                    _ => {
                        let (count, sum) = peaks.fold((F::zero(), F::zero()), |(count, sum), x| {
                            (count + F::one(), sum + x)
                        });

                        sum / count
                    },
                }
            },
        }
    }
}

#[test]
fn test_and_or_families() {
    assert_eq!(AndOp::Min.call(0.3, 0.7), 0.3);
    assert_eq!(OrOp::Max.call(0.3, 0.7), 0.7);
    assert!((AndOp::Prod.call(0.5, 0.4) - 0.2).abs() < 1e-12);
    assert!((OrOp::ProbOr.call(0.5, 0.4) - 0.7).abs() < 1e-12);
    assert_eq!(AndOp::BoundedProd.call(0.3, 0.4), 0.);
    assert_eq!(OrOp::BoundedSum.call(0.7, 0.4), 1.);
    assert_eq!(AndOp::DrasticProd.call(1., 0.4), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.9, 0.4), 0.);
    assert_eq!(OrOp::DrasticSum.call(0., 0.4), 0.4);
    assert_eq!(OrOp::DrasticSum.call(0.1, 0.4), 1.);
}

#[test]
fn test_production_links_keep_unfired_rules_neutral() {
    let curve = [0., 0.3, 0.8, 1.];

    for link in [
        ProductionLink::Max,
        ProductionLink::ProbOr,
        ProductionLink::BoundedSum,
        ProductionLink::DrasticSum,
    ] {
        let mut acc = curve;

        link.fold_into(&mut acc, &[0.; 4]);
        assert_eq!(acc, curve, "{link:?}");
    }

    // t-norms cannot be configured as the aggregation link
    for name in ["min", "prod", "bounded_prod", "drastic_prod"] {
        let parsed: Result<ProductionLink, _> = serde_json::from_value(serde_json::json!(name));

        assert!(parsed.is_err(), "{name}");
    }
}

#[test]
fn test_implication() {
    assert_eq!(ImplicationOp::Min.call(0.4, 0.9), 0.4);
    assert_eq!(ImplicationOp::Min.call(0.4, 0.2), 0.2);
    assert!((ImplicationOp::Prod.call(0.5, 0.8) - 0.4).abs() < 1e-12);
}

#[test]
fn test_defuzzification() {
    let universe = [0., 1., 2., 3., 4.];
    let symmetric = [0., 0.5, 1., 0.5, 0.];

    for op in [
        DefuzzificationOp::Centroid,
        DefuzzificationOp::Cog,
        DefuzzificationOp::Boa,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Lom,
        DefuzzificationOp::Som,
    ] {
        assert!((op.call(&universe, &symmetric) - 2.).abs() < 1e-12, "{op:?}");
    }

    let plateau = [0., 1., 1., 0.5, 0.];

    assert_eq!(DefuzzificationOp::Mom.call(&universe, &plateau), 1.5);
    assert_eq!(DefuzzificationOp::Lom.call(&universe, &plateau), 2.);
    assert_eq!(DefuzzificationOp::Som.call(&universe, &plateau), 1.);
    // (1 + 2 + 1.5) / 2.5
    assert!((DefuzzificationOp::Centroid.call(&universe, &plateau) - 1.8).abs() < 1e-12);
}
