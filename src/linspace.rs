use std::ops::Range;

/// `n` evenly spaced values from `min` to `max` inclusive, computed the way
/// numpy.linspace does: `min + step * i`.
#[derive(Clone, Debug)]
pub(crate) struct Linspace {
    start: f64,
    step: f64,
    indices: Range<usize>,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 { (max - min) / (n - 1) as f64 } else { 0. };

        Linspace {
            start: min,
            step,
            indices: 0..n,
        }
    }

    /// Walks from `min` to `max` in increments of roughly `step`. The number of
    /// intervals is rounded, so 3.0 / 0.1 = 29.999... still gives 30 of them and
    /// both ends are always hit. `None` if that leaves fewer than one interval.
    pub(crate) fn by_step(min: f64, max: f64, step: f64) -> Option<Self> {
        let intervals = ((max - min) / step).round();

        if !(intervals >= 1. && intervals < usize::MAX as f64) {
            return None;
        }

        Some(Self::new(min, max, intervals as usize + 1))
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        self.indices.next().map(|i| self.start + self.step * i as f64)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Linspace {
    fn next_back(&mut self) -> Option<f64> {
        self.indices.next_back().map(|i| self.start + self.step * i as f64)
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace_endpoints() {
    let points: Vec<_> = Linspace::new(0., 3., 31).collect();

    assert_eq!(points.len(), 31);
    assert_eq!(points[0], 0.);
    assert_eq!(points[30], 3.);
    assert!((points[8] - 0.8).abs() < 1e-12);

    assert_eq!(Linspace::new(1., 2., 1).collect::<Vec<_>>(), vec![1.]);
    assert_eq!(Linspace::new(1., 2., 0).count(), 0);
    assert_eq!(Linspace::new(0., 1., 3).rev().collect::<Vec<_>>(), vec![1., 0.5, 0.]);
}

#[test]
fn test_by_step_rounds_interval_count() {
    assert_eq!(Linspace::by_step(0., 3., 0.1).map(|l| l.len()), Some(31));
    assert_eq!(Linspace::by_step(0., 2500., 1.).map(|l| l.len()), Some(2501));
    assert!(Linspace::by_step(0., 1., 5.).is_none());
    assert!(Linspace::by_step(0., 1., 0.).is_none());
}
