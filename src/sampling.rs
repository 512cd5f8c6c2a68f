//! Temporal sampling for velocity estimation.
//!
//! Velocity is not taken between adjacent frames but between frames that
//! are a set time apart. [`sampling_window`] turns that time into an odd
//! frame count, and [`find_neighbors`] finds, for one centre frame, the
//! nearest valid frame at or beyond half that window on each side. When the
//! nominal neighbour is missing the search widens, up to twice the half
//! window, independently on each side.

use crate::error::{FeatureError, Result};

/// Odd number of frames spanning `time_scale` seconds at `fps`.
///
/// An integral `time_scale * fps` is kept when odd and bumped by one when
/// even. Otherwise whichever of its floor and ceiling is odd is used. The
/// result is always at least 1.
///
/// # Errors
///
/// Returns an error if either argument is non-finite or not positive.
///
/// # Example
///
/// ```
/// use worm_features::sampling::sampling_window;
///
/// assert_eq!(sampling_window(0.5, 20.0)?, 11);
/// assert_eq!(sampling_window(0.25, 20.0)?, 5);
/// assert_eq!(sampling_window(0.5, 25.0)?, 13);
/// # Ok::<(), worm_features::FeatureError>(())
/// ```
pub fn sampling_window(time_scale: f64, fps: f64) -> Result<usize> {
    if !(time_scale.is_finite() && time_scale > 0.0) {
        return Err(FeatureError::invalid_config(format!(
            "time scale must be positive, got {time_scale}"
        )));
    }
    if !(fps.is_finite() && fps > 0.0) {
        return Err(FeatureError::invalid_config(format!(
            "fps must be positive, got {fps}"
        )));
    }

    let raw = time_scale * fps;
    let window = if raw.fract() == 0.0 {
        let whole = raw as usize;
        if whole % 2 == 0 {
            whole + 1
        } else {
            whole
        }
    } else {
        let high = raw.ceil() as usize;
        if high % 2 == 0 {
            high - 1
        } else {
            high
        }
    };
    Ok(window.max(1))
}

/// Half of an odd window, i.e. the nominal offset to each neighbour.
#[must_use]
#[inline]
pub const fn half_window(window: usize) -> usize {
    window.saturating_sub(1) / 2
}

/// Frames used to estimate a derivative at one centre frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPair {
    pub left: usize,
    pub right: usize,
}

impl NeighborPair {
    /// Frames between the two neighbours.
    #[must_use]
    pub const fn span(&self) -> usize {
        self.right - self.left
    }
}

/// Nearest valid frames at least `half_window` away from `center` on each
/// side, searching out to `2 * half_window`.
///
/// Indices outside `valid` count as invalid. A zero half window searches
/// only the immediate neighbours so the pair never collapses onto the
/// centre.
#[must_use]
pub fn find_neighbors(valid: &[bool], center: usize, half_window: usize) -> Option<NeighborPair> {
    let first = half_window.max(1);
    let last = (2 * half_window).max(1);
    let is_valid = |i: usize| valid.get(i).copied().unwrap_or(false);

    let left = (first..=last)
        .filter_map(|shift| center.checked_sub(shift))
        .find(|&i| is_valid(i))?;
    let right = (first..=last)
        .map(|shift| center + shift)
        .find(|&i| is_valid(i))?;

    Some(NeighborPair { left, right })
}

/// [`find_neighbors`] for every frame.
#[must_use]
pub fn find_all_neighbors(valid: &[bool], half_window: usize) -> Vec<Option<NeighborPair>> {
    (0..valid.len())
        .map(|center| find_neighbors(valid, center, half_window))
        .collect()
}
