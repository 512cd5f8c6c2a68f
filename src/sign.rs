//! Dorsal/ventral sign conventions.
//!
//! Every sign flip the estimators apply goes through this module.

use crate::config::VentralMode;

/// Multiplier applied to velocity direction for a ventral mode.
///
/// Positive direction means a turn towards the dorsal side. With the
/// ventral side unknown the clockwise convention is assumed.
#[must_use]
pub const fn direction_sign(mode: VentralMode) -> f64 {
    match mode {
        VentralMode::Unknown | VentralMode::Clockwise => -1.0,
        VentralMode::Anticlockwise => 1.0,
    }
}

/// Multiplier applied to a bend standard deviation so that it carries the
/// sign of the mean bend. A zero mean keeps the unsigned magnitude.
#[must_use]
pub fn bend_sign(mean: f64) -> f64 {
    if mean < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Multiplier applied to speed: negative when the centroid moved more than
/// 90° away from the body heading.
#[must_use]
pub fn speed_sign(heading_offset_deg: f64) -> f64 {
    if heading_offset_deg.abs() > 90.0 {
        -1.0
    } else {
        1.0
    }
}
