use num::Float;

/// Similar to numpy.interp for a single point: values left of `xp` take
/// the first `fp`, values right of it take the last one.
///
/// `xp` must be increasing and have the same length as `fp`.
pub(crate) fn interp<F: Float>(x: F, xp: &[F], fp: &[F]) -> F {
    debug_assert_eq!(xp.len(), fp.len());

    let (Some(&first_x), Some(&last_x)) = (xp.first(), xp.last()) else {
        return F::zero();
    };

    if x <= first_x {
        return fp[0];
    }
    if x >= last_x {
        return fp[fp.len() - 1];
    }

    // First index whose x is strictly above the input; never 0 here
    let i = xp.partition_point(|p| *p <= x);
    let (x1, x2) = (xp[i - 1], xp[i]);
    let (y1, y2) = (fp[i - 1], fp[i]);

    if x2 == x1 {
        return y2;
    }

    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let x = [0., 1., 1.5, 2.72, 3.24];

    let out: Vec<f64> = x.iter().map(|x| interp(*x, &xs, &ys)).collect();

    assert_eq!(out[..3], [3., 3., 2.5]);
    assert!((out[3] - 0.56).abs() < 1e-12);
    assert_eq!(out[4], 0.);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp(2.5, &xs, &ys), 4.);
    assert_eq!(interp(-1., &xs, &ys), 0.);
    assert_eq!(interp(7.5, &xs, &ys), 2.);
    assert_eq!(interp::<f64>(1., &[], &[]), 0.);
}
