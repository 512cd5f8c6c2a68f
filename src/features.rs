//! The full locomotion and posture pass over one worm.
//!
//! # Pipeline Overview
//!
//! 1. Velocity of the five velocity partitions
//! 2. Bend statistics of the five normal partitions
//! 3. Eccentricity and orientation of the contour
//! 4. Amplitude, wavelength and track length, aligned by step 3's
//!    orientation

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::amplitude::{compute_amplitude_and_wavelength, AmplitudeWavelength};
use crate::bends::{compute_bends, WormBends};
use crate::config::FeatureConfig;
use crate::eccentricity::{compute_eccentricity, EccentricityOrientation};
use crate::error::Result;
use crate::velocity::{compute_worm_velocity, WormVelocity};
use crate::worm::NormalizedWorm;

/// Every feature computed for one worm.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WormFeatures {
    pub velocity: WormVelocity,
    pub bends: WormBends,
    pub eccentricity: EccentricityOrientation,
    pub amplitude: AmplitudeWavelength,
}

/// Compute all locomotion and posture features.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
///
/// # Example
///
/// ```
/// use worm_features::{compute_worm_features, FeatureConfig, PointPair, PointSeries, WormFrames};
///
/// let n_frames = 3;
/// let skeleton_x: Vec<Vec<f64>> = (0..49).map(|i| vec![i as f64; n_frames]).collect();
/// let skeleton_y: Vec<Vec<f64>> = (0..49).map(|_| vec![0.0; n_frames]).collect();
/// let contour_x: Vec<Vec<f64>> = (0..96)
///     .map(|i| vec![24.0 + 24.0 * (i as f64 * std::f64::consts::TAU / 96.0).cos(); n_frames])
///     .collect();
/// let contour_y: Vec<Vec<f64>> = (0..96)
///     .map(|i| vec![2.0 * (i as f64 * std::f64::consts::TAU / 96.0).sin(); n_frames])
///     .collect();
///
/// let skeleton = PointPair::new(
///     PointSeries::from_nan_rows(&skeleton_x)?,
///     PointSeries::from_nan_rows(&skeleton_y)?,
/// )?;
/// let contour = PointPair::new(
///     PointSeries::from_nan_rows(&contour_x)?,
///     PointSeries::from_nan_rows(&contour_y)?,
/// )?;
/// let worm = WormFrames::from_outline(skeleton, contour)?;
///
/// let features = compute_worm_features(&worm, &FeatureConfig::default())?;
/// assert!(features.eccentricity.eccentricity[0].unwrap() > 0.9);
/// # Ok::<(), worm_features::FeatureError>(())
/// ```
pub fn compute_worm_features<W: NormalizedWorm + ?Sized>(
    worm: &W,
    config: &FeatureConfig,
) -> Result<WormFeatures> {
    config.validate()?;
    debug!(frames = worm.n_frames(), fps = config.fps, "computing worm features");

    let velocity = compute_worm_velocity(worm, config)?;
    let bends = compute_bends(worm);
    let eccentricity = compute_eccentricity(worm, config)?;
    let amplitude = compute_amplitude_and_wavelength(worm, &eccentricity.orientation, config)?;

    Ok(WormFeatures {
        velocity,
        bends,
        eccentricity,
        amplitude,
    })
}
