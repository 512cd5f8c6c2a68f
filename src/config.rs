//! Configuration for feature extraction.
//!
//! [`FeatureConfig`] gathers the constants every estimator consumes: the
//! video frame rate, the velocity time scales, the eccentricity grid
//! resolution, the wavelength analysis constants and the ventral mode of the
//! recording.
//!
//! # Example
//!
//! ```
//! use worm_features::{FeatureConfig, VentralMode};
//!
//! let config = FeatureConfig::default()
//!     .with_fps(25.0)
//!     .with_ventral_mode(VentralMode::Anticlockwise);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Side of the worm that faces the viewer's ventral convention.
///
/// Fixed per recording. It decides the sign of direction-dependent outputs
/// (see [`crate::sign`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VentralMode {
    /// Ventral side not annotated.
    #[default]
    Unknown,
    /// Ventral side is clockwise from the head.
    Clockwise,
    /// Ventral side is anticlockwise from the head.
    Anticlockwise,
}

impl VentralMode {
    /// Numeric code used by tracking software (0, 1, 2).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Clockwise => 1,
            Self::Anticlockwise => 2,
        }
    }
}

impl TryFrom<u8> for VentralMode {
    type Error = FeatureError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Clockwise),
            2 => Ok(Self::Anticlockwise),
            other => Err(FeatureError::invalid_ventral_mode(other.to_string())),
        }
    }
}

impl FromStr for VentralMode {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "unknown" => Ok(Self::Unknown),
            "1" | "clockwise" => Ok(Self::Clockwise),
            "2" | "anticlockwise" | "counterclockwise" => Ok(Self::Anticlockwise),
            _ => Err(FeatureError::invalid_ventral_mode(s)),
        }
    }
}

impl fmt::Display for VentralMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Clockwise => "clockwise",
            Self::Anticlockwise => "anticlockwise",
        };
        f.write_str(name)
    }
}

/// Configuration for feature extraction.
///
/// The defaults are the constants of the reference worm tracker
/// analysis. Only `fps` and `ventral_mode` normally change per recording.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureConfig {
    /// Video frame rate (frames per second).
    pub fps: f64,

    /// Time scale (seconds) for head-tip and tail-tip velocity.
    pub tip_diff: f64,

    /// Time scale (seconds) for head, midbody and tail velocity.
    pub body_diff: f64,

    /// Number of grid points placed along the long dimension of the contour
    /// when filling it for the equivalent ellipse.
    pub n_eccentricity: usize,

    /// Number of evenly spaced samples the skeleton is interpolated onto
    /// before the wavelength FFT.
    pub n_points_fft: usize,

    /// Minimum separation (in FFT bins) between two spectral peaks.
    pub min_dist_peaks: usize,

    /// The secondary wavelength is kept only when its peak reaches this
    /// fraction of the primary peak.
    pub wavelength_pct_max_cutoff: f64,

    /// Wavelengths are capped at this multiple of the worm length.
    pub wavelength_pct_cutoff: f64,

    /// Ventral side convention of the recording.
    pub ventral_mode: VentralMode,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            fps: 20.0,
            tip_diff: 0.25,
            body_diff: 0.5,
            n_eccentricity: 50,
            n_points_fft: 512,
            min_dist_peaks: 5,
            wavelength_pct_max_cutoff: 0.5,
            wavelength_pct_cutoff: 2.0,
            ventral_mode: VentralMode::Unknown,
        }
    }
}

impl FeatureConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(FeatureError::invalid_config("fps must be positive"));
        }
        if !(self.tip_diff.is_finite() && self.tip_diff > 0.0) {
            return Err(FeatureError::invalid_config("tip_diff must be positive"));
        }
        if !(self.body_diff.is_finite() && self.body_diff > 0.0) {
            return Err(FeatureError::invalid_config("body_diff must be positive"));
        }
        if self.n_eccentricity < 2 {
            return Err(FeatureError::invalid_config(
                "n_eccentricity must be at least 2",
            ));
        }
        if self.n_points_fft < 4 {
            return Err(FeatureError::invalid_config(
                "n_points_fft must be at least 4",
            ));
        }
        if self.min_dist_peaks == 0 {
            return Err(FeatureError::invalid_config(
                "min_dist_peaks must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.wavelength_pct_max_cutoff) {
            return Err(FeatureError::invalid_config(
                "wavelength_pct_max_cutoff must be within [0, 1]",
            ));
        }
        if !(self.wavelength_pct_cutoff.is_finite() && self.wavelength_pct_cutoff > 0.0) {
            return Err(FeatureError::invalid_config(
                "wavelength_pct_cutoff must be positive",
            ));
        }
        Ok(())
    }

    /// Set the frame rate.
    #[must_use]
    pub const fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Set the ventral mode.
    #[must_use]
    pub const fn with_ventral_mode(mut self, mode: VentralMode) -> Self {
        self.ventral_mode = mode;
        self
    }

    /// Set the tip and body velocity time scales.
    #[must_use]
    pub const fn with_time_scales(mut self, tip_diff: f64, body_diff: f64) -> Self {
        self.tip_diff = tip_diff;
        self.body_diff = body_diff;
        self
    }

    /// Set the eccentricity grid resolution.
    #[must_use]
    pub const fn with_n_eccentricity(mut self, n: usize) -> Self {
        self.n_eccentricity = n;
        self
    }
}
