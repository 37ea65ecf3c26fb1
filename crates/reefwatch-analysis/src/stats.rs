//! Small numeric helpers shared by the analyzers.

use reefwatch_core::constants::ZERO_VARIANCE_EPSILON;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by n).
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Ordinary least-squares slope of `ys` against `xs`.
///
/// `None` with fewer than two points or when every x is identical.
pub fn least_squares_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    if sxx <= ZERO_VARIANCE_EPSILON {
        return None;
    }
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();

    let slope = sxy / sxx;
    slope.is_finite().then_some(slope)
}

/// Pearson product-moment correlation over the first `min(len)` points.
///
/// `None` for fewer than two points, a zero-variance series, or any
/// non-finite intermediate. The result is clamped to `[-1, 1]` and is
/// symmetric in its arguments.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let ma = mean(a)?;
    let mb = mean(b)?;

    let mut sab = 0.0;
    let mut saa = 0.0;
    let mut sbb = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - ma;
        let dy = y - mb;
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }

    if saa <= ZERO_VARIANCE_EPSILON || sbb <= ZERO_VARIANCE_EPSILON {
        return None;
    }
    let r = sab / (saa * sbb).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
