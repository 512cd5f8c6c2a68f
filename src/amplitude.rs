//! Amplitude, wavelength and track length of the worm's body wave.
//!
//! Each frame the skeleton is rotated so the equivalent ellipse's major
//! axis lies on the x axis and its centroid sits at the origin. In that
//! frame:
//!
//! - the maximum amplitude is the spread of the y coordinates, and the
//!   amplitude ratio compares the larger deviation on one side with the
//!   smaller one on the other (always ≤ 1);
//! - the track length is the spread of the x coordinates;
//! - the wavelengths come from treating y along x as a periodic signal.
//!   Frames whose x coordinates fold back on themselves are rejected. The
//!   primary wavelength belongs to the largest spectral peak and the
//!   secondary one to the next peak if it reaches a set fraction of the
//!   first. Neither may exceed a set multiple of the worm's length.
//!
//! Cronin et al., "An automated system for measuring parameters of nematode
//! sinusoidal movement", BMC Genetics 2005, 6:5.

use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::FeatureConfig;
use crate::error::Result;
use crate::math::fft::{bin_wavelength, find_peaks, magnitude_spectrum, resample_uniform};
use crate::math::stats::min_max;
use crate::signal::{valid_count, FrameSignal, PointPair};
use crate::worm::NormalizedWorm;

/// Amplitude per frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Amplitude {
    /// `max(y) - min(y)` after alignment.
    pub max: FrameSignal,
    /// Smaller over larger of `|max(y)|` and `|min(y)|`.
    pub ratio: FrameSignal,
}

/// Wavelengths per frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wavelength {
    pub primary: FrameSignal,
    /// Only present when the second peak is strong enough.
    pub secondary: FrameSignal,
}

/// Amplitude, wavelength and track length per frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmplitudeWavelength {
    pub amplitude: Amplitude,
    pub wavelength: Wavelength,
    pub track_length: FrameSignal,
}

impl AmplitudeWavelength {
    fn missing(n_frames: usize) -> Self {
        Self {
            amplitude: Amplitude {
                max: vec![None; n_frames],
                ratio: vec![None; n_frames],
            },
            wavelength: Wavelength {
                primary: vec![None; n_frames],
                secondary: vec![None; n_frames],
            },
            track_length: vec![None; n_frames],
        }
    }
}

/// Measurements of a single aligned frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameWave {
    pub amplitude_max: f64,
    pub amplitude_ratio: Option<f64>,
    pub track_length: f64,
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
}

/// Whether consecutive values never change direction.
#[must_use]
pub fn is_monotonic(xs: &[f64]) -> bool {
    let rising = xs.windows(2).all(|w| w[1] >= w[0]);
    let falling = xs.windows(2).all(|w| w[1] <= w[0]);
    rising || falling
}

/// Primary and secondary wavelength of `y(x)`, uncapped.
///
/// `None` when `x` is not monotonic or spans no distance.
#[must_use]
pub fn wavelengths(xs: &[f64], ys: &[f64], config: &FeatureConfig) -> Option<(f64, Option<f64>)> {
    if !is_monotonic(xs) {
        trace!("skeleton folds back on itself, wavelength rejected");
        return None;
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = if xs.first() > xs.last() {
        (xs.iter().rev().copied().collect(), ys.iter().rev().copied().collect())
    } else {
        (xs.to_vec(), ys.to_vec())
    };

    let n_fft = config.n_points_fft;
    let (samples, dx) = resample_uniform(&xs, &ys, n_fft)?;
    let spectrum = magnitude_spectrum(&samples);
    let peaks = find_peaks(&spectrum, config.min_dist_peaks);

    let &first = peaks.first()?;
    let primary = bin_wavelength(first, n_fft, dx);
    let secondary = peaks
        .get(1)
        .filter(|&&k| spectrum[k] >= config.wavelength_pct_max_cutoff * spectrum[first])
        .map(|&k| bin_wavelength(k, n_fft, dx));

    Some((primary, secondary))
}

/// Measure one frame of an aligned skeleton.
///
/// `length` caps the wavelengths; without it no wavelength is reported.
#[must_use]
pub fn measure_frame(xs: &[f64], ys: &[f64], length: Option<f64>, config: &FeatureConfig) -> Option<FrameWave> {
    let (min_y, max_y) = min_max(ys)?;
    let (min_x, max_x) = min_max(xs)?;

    let (above, below) = (max_y.abs(), min_y.abs());
    let larger = above.max(below);
    let amplitude_ratio = (larger > 0.0).then(|| above.min(below) / larger);

    let mut wave = FrameWave {
        amplitude_max: max_y - min_y,
        amplitude_ratio,
        track_length: max_x - min_x,
        primary: None,
        secondary: None,
    };

    if let Some(length) = length {
        if let Some((primary, secondary)) = wavelengths(xs, ys, config) {
            let cap = config.wavelength_pct_cutoff * length;
            wave.primary = Some(primary.min(cap));
            wave.secondary = secondary.map(|s| s.min(cap));
        }
    }

    Some(wave)
}

/// Amplitude, wavelength and track length of an already aligned skeleton.
#[must_use]
pub fn amplitude_and_wavelength(
    skeleton: &PointPair,
    lengths: &[Option<f64>],
    config: &FeatureConfig,
) -> AmplitudeWavelength {
    let n_frames = skeleton.n_frames();
    let mut result = AmplitudeWavelength::missing(n_frames);

    for frame in 0..n_frames {
        let Some((xs, ys)) = skeleton.complete_frame(frame) else {
            continue;
        };
        let length = lengths.get(frame).copied().flatten();
        let Some(wave) = measure_frame(&xs, &ys, length, config) else {
            continue;
        };

        result.amplitude.max[frame] = Some(wave.amplitude_max);
        result.amplitude.ratio[frame] = wave.amplitude_ratio;
        result.track_length[frame] = Some(wave.track_length);
        result.wavelength.primary[frame] = wave.primary;
        result.wavelength.secondary[frame] = wave.secondary;
    }

    result
}

/// Re-orient the worm by `orientation` (degrees per frame, normally from
/// [`crate::eccentricity`]) and measure its body wave.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or `orientation` does
/// not have one value per frame.
pub fn compute_amplitude_and_wavelength<W: NormalizedWorm + ?Sized>(
    worm: &W,
    orientation: &[Option<f64>],
    config: &FeatureConfig,
) -> Result<AmplitudeWavelength> {
    config.validate()?;
    let aligned = worm.re_orient_and_centre(orientation)?;
    let result = amplitude_and_wavelength(aligned.skeleton(), aligned.lengths(), config);
    debug!(
        frames = worm.n_frames(),
        amplitude = valid_count(&result.amplitude.max),
        wavelength = valid_count(&result.wavelength.primary),
        "computed amplitude and wavelength"
    );
    Ok(result)
}
