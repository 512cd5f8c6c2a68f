//! Missing-value aware summary statistics and angle helpers.

/// Mean of the present values, `None` when there are none.
#[must_use]
pub fn nan_mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Population standard deviation (ddof = 0) of the present values.
#[must_use]
pub fn nan_std(values: &[Option<f64>]) -> Option<f64> {
    let mean = nan_mean(values)?;
    let (sq, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), &v| (s + (v - mean).powi(2), c + 1));
    Some((sq / count as f64).sqrt())
}

/// Mean of all values, `None` if any value is missing.
#[must_use]
pub fn strict_mean(values: &[Option<f64>]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    for v in values {
        sum += (*v)?;
    }
    Some(sum / values.len() as f64)
}

/// Mean of consecutive differences, skipping pairs with a missing end.
#[must_use]
pub fn nan_mean_diff(values: &[Option<f64>]) -> Option<f64> {
    let diffs: Vec<Option<f64>> = values
        .windows(2)
        .map(|w| Some(w[1]? - w[0]?))
        .collect();
    nan_mean(&diffs)
}

/// Wrap an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Minimum and maximum of a non-empty slice.
#[must_use]
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
