use crate::error::ConfigError;

/// Triangular membership function with breakpoints `a <= b <= c`.
///
/// `a == b` or `b == c` give a one sided ramp (a shoulder). The peak `b`
/// always evaluates to one and anything outside `(a, c)` to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(ConfigError::NonFiniteBreakpoint);
        }
        if !(a <= b && b <= c) {
            return Err(ConfigError::UnorderedBreakpoints { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn membership(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x == b {
            return 1.;
        }
        // Also rejects NaN
        if !(x > a && x < c) {
            return 0.;
        }

        if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }

    /// Evaluates the function at every point of a universe
    pub fn sample(&self, points: &[f64]) -> Vec<f64> {
        points.iter().map(|x| self.membership(*x)).collect()
    }
}

#[test]
fn test_zero_outside_support() {
    let tri = Triangle::new(400., 800., 1200.).unwrap();

    for x in [-1e9, 0., 399.9, 400., 1200., 1200.1, 1e9] {
        assert_eq!(tri.membership(x), 0., "x = {x}");
    }

    assert_eq!(tri.membership(f64::NAN), 0.);
}

#[test]
fn test_peak_and_ramps() {
    let tri = Triangle::new(0., 0.5, 1.0).unwrap();

    assert_eq!(tri.membership(0.5), 1.);
    assert!((tri.membership(0.25) - 0.5).abs() < 1e-12);
    assert!((tri.membership(0.8) - 0.4).abs() < 1e-12);

    let mut prev = 0.;

    for i in 1..50 {
        let m = tri.membership(i as f64 / 100.);

        assert!(m > prev);
        prev = m;
    }
}

#[test]
fn test_shoulders() {
    let left = Triangle::new(0., 0., 1.).unwrap();

    assert_eq!(left.membership(0.), 1.);
    assert_eq!(left.membership(-0.1), 0.);
    assert!((left.membership(0.25) - 0.75).abs() < 1e-12);

    let right = Triangle::new(1., 2., 2.).unwrap();

    assert_eq!(right.membership(2.), 1.);
    assert_eq!(right.membership(2.5), 0.);
    assert!((right.membership(1.5) - 0.5).abs() < 1e-12);

    let singleton = Triangle::new(3., 3., 3.).unwrap();

    assert_eq!(singleton.membership(3.), 1.);
    assert_eq!(singleton.membership(3.0001), 0.);
}

#[test]
fn test_rejects_bad_breakpoints() {
    assert_eq!(
        Triangle::new(1., 0.5, 2.),
        Err(ConfigError::UnorderedBreakpoints { a: 1., b: 0.5, c: 2. })
    );
    assert_eq!(Triangle::new(0., f64::NAN, 1.), Err(ConfigError::NonFiniteBreakpoint));
}
