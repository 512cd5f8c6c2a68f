//! Eccentricity and orientation of the worm's equivalent ellipse.
//!
//! The contour is filled with an evenly spaced grid of points and the
//! ellipse with the same second moments as those points is taken as the
//! worm's equivalent ellipse. Its eccentricity measures how stretched the
//! posture is; its major axis orientation is what the amplitude and
//! wavelength features rotate onto the x axis.

use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::FeatureConfig;
use crate::error::Result;
use crate::math::geometry::{fill_polygon, Grid};
use crate::math::linalg::{centre, principal_axes, second_moments};
use crate::signal::{valid_count, FrameSignal, PointPair};
use crate::worm::NormalizedWorm;

/// Minimum number of interior grid points for a meaningful ellipse.
pub const MIN_FILLED_POINTS: usize = 3;

/// Eccentricity and orientation per frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EccentricityOrientation {
    /// Eccentricity in `[0, 1)`.
    pub eccentricity: FrameSignal,
    /// Angle of the major axis in degrees, in `(-90, 90]`. Arbitrary when
    /// the eccentricity is close to zero.
    pub orientation: FrameSignal,
}

/// Equivalent ellipse of one closed outline.
///
/// Returns `(eccentricity, orientation_degrees)`, or `None` when the
/// outline has no area on the grid.
#[must_use]
pub fn equivalent_ellipse(xs: &[f64], ys: &[f64], n_eccentricity: usize) -> Option<(f64, f64)> {
    let (mut xs, mut ys) = (xs.to_vec(), ys.to_vec());
    centre(&mut xs, &mut ys);

    let grid = Grid::covering(&xs, &ys, n_eccentricity)?;
    let (fx, fy) = fill_polygon(&xs, &ys, &grid);
    if fx.len() < MIN_FILLED_POINTS {
        trace!(filled = fx.len(), "too few grid points inside contour");
        return None;
    }

    // each grid point stands for a square cell, whose own variance is step^2/12
    let cell = grid.step * grid.step / 12.0;
    let (uxx, uyy, uxy) = second_moments(&fx, &fy)?;
    let axes = principal_axes(uxx + cell, uyy + cell, uxy);

    Some((axes.eccentricity(), axes.orientation_degrees()))
}

/// Eccentricity and orientation of a contour series.
#[must_use]
pub fn eccentricity_and_orientation(contour: &PointPair, n_eccentricity: usize) -> EccentricityOrientation {
    let n_frames = contour.n_frames();
    let mut result = EccentricityOrientation {
        eccentricity: vec![None; n_frames],
        orientation: vec![None; n_frames],
    };

    for frame in 0..n_frames {
        let Some((xs, ys)) = contour.complete_frame(frame) else {
            continue;
        };
        if let Some((ecc, angle)) = equivalent_ellipse(&xs, &ys, n_eccentricity) {
            result.eccentricity[frame] = Some(ecc);
            result.orientation[frame] = Some(angle);
        }
    }

    result
}

/// Compute eccentricity and orientation from the worm's contour.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn compute_eccentricity<W: NormalizedWorm + ?Sized>(
    worm: &W,
    config: &FeatureConfig,
) -> Result<EccentricityOrientation> {
    config.validate()?;
    let result = eccentricity_and_orientation(worm.contour(), config.n_eccentricity);
    debug!(
        frames = worm.n_frames(),
        estimated = valid_count(&result.eccentricity),
        "computed eccentricity and orientation"
    );
    Ok(result)
}
