//! Average and nearest-rank percentile over a sample sequence.

/// Arithmetic mean of `samples`, or `fallback` when there are none.
///
/// # Examples
/// ```
/// use evrange_lib::average;
///
/// assert_eq!(average(&[160.0, 185.0, 220.0, 185.0], 180.0), 187.5);
/// assert_eq!(average(&[], 180.0), 180.0);
/// ```
pub fn average(samples: &[f64], fallback: f64) -> f64 {
    if samples.is_empty() {
        return fallback;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Nearest-rank percentile of `samples`, or `fallback` when there are none.
///
/// The samples are sorted ascending and the value at index
/// `floor(p * (len - 1))` is returned, without interpolation. `p` is clamped
/// into `[0, 1]`; a NaN `p` reads the lowest sample.
///
/// # Examples
/// ```
/// use evrange_lib::percentile;
///
/// let samples = [50.0, 10.0, 40.0, 20.0, 30.0];
/// assert_eq!(percentile(&samples, 0.20, 0.0), 10.0);
/// assert_eq!(percentile(&samples, 0.80, 0.0), 40.0);
/// ```
pub fn percentile(samples: &[f64], p: f64, fallback: f64) -> f64 {
    if samples.is_empty() {
        return fallback;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let last = sorted.len() - 1;
    let index = ((p * last as f64).floor() as usize).min(last);
    sorted[index]
}
