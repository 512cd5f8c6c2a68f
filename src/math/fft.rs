//! Spectral analysis of a skeleton treated as a 1-D periodic signal.
//!
//! The skeleton's y displacement is resampled onto an even x grid,
//! transformed with an FFT, and the magnitude spectrum is searched for
//! well separated peaks. Bin `k` of an `n`-point transform over samples
//! spaced `dx` apart corresponds to a wavelength of `n * dx / k`.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// Linearly resample `y(x)` onto `n` evenly spaced positions from `x[0]` to
/// `x[last]`.
///
/// `x` must be non-decreasing. Returns the samples and their spacing, or
/// `None` when the input spans no distance.
#[must_use]
pub fn resample_uniform(x: &[f64], y: &[f64], n: usize) -> Option<(Vec<f64>, f64)> {
    debug_assert_eq!(x.len(), y.len());
    let (&x0, &x1) = (x.first()?, x.last()?);
    if n < 2 || x1 - x0 <= 0.0 {
        return None;
    }

    let dx = (x1 - x0) / (n - 1) as f64;
    let mut samples = Vec::with_capacity(n);
    let mut seg = 0;

    for i in 0..n {
        let xi = if i == n - 1 { x1 } else { x0 + dx * i as f64 };
        while seg + 2 < x.len() && x[seg + 1] < xi {
            seg += 1;
        }
        let (xa, xb) = (x[seg], x[seg + 1]);
        let (ya, yb) = (y[seg], y[seg + 1]);
        let value = if xb > xa {
            ya + (yb - ya) * (xi - xa) / (xb - xa)
        } else {
            ya
        };
        samples.push(value);
    }

    Some((samples, dx))
}

/// Magnitudes of the first `signal.len() / 2` FFT bins.
#[must_use]
pub fn magnitude_spectrum(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex64> = signal.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    fft.process(&mut buffer);

    buffer[..n / 2].iter().map(|c| c.norm()).collect()
}

/// Peaks of a magnitude spectrum, largest first.
///
/// Only local maxima are candidates: bin `k` must rise above `k - 1` and be
/// no lower than `k + 1`. The DC bin is never a peak, so bin 1 only needs
/// to hold against bin 2; the last bin has no right neighbour and is never
/// a peak. Candidates are then accepted greedily by magnitude, and one
/// within `min_dist` of an already accepted peak is suppressed. Bins with
/// zero magnitude are ignored.
#[must_use]
pub fn find_peaks(spectrum: &[f64], min_dist: usize) -> Vec<usize> {
    let is_local_max = |k: usize| {
        let s = spectrum[k];
        s > 0.0 && (k == 1 || s > spectrum[k - 1]) && s >= spectrum[k + 1]
    };
    let mut order: Vec<usize> = (1..spectrum.len().saturating_sub(1))
        .filter(|&k| is_local_max(k))
        .collect();
    order.sort_by(|&a, &b| {
        spectrum[b]
            .partial_cmp(&spectrum[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut peaks: Vec<usize> = Vec::new();
    for k in order {
        if peaks.iter().all(|&p| p.abs_diff(k) > min_dist) {
            peaks.push(k);
        }
    }
    peaks
}

/// Wavelength of FFT bin `bin` for an `n_fft`-point transform with sample
/// spacing `dx`.
#[must_use]
#[inline]
pub fn bin_wavelength(bin: usize, n_fft: usize, dx: f64) -> f64 {
    n_fft as f64 * dx / bin as f64
}
