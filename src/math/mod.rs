//! Numerical utilities for feature extraction.
//!
//! This module provides:
//! - [`stats`]: missing-value aware means, standard deviations, angle wrapping
//! - [`fft`]: resampling, magnitude spectra and peak selection
//! - [`geometry`]: grid filling of polygons (point-in-polygon)
//! - [`linalg`]: second moments, 2×2 eigendecomposition and rotation

pub mod fft;
pub mod geometry;
pub mod linalg;
pub mod stats;

pub use fft::{bin_wavelength, find_peaks, magnitude_spectrum, resample_uniform};
pub use geometry::{fill_polygon, point_in_polygon, Grid};
pub use linalg::{principal_axes, second_moments, PrincipalAxes};
pub use stats::{nan_mean, nan_std, wrap_degrees};
