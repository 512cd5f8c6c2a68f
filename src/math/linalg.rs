//! Planar linear algebra: second moments, the 2×2 symmetric
//! eigendecomposition behind the equivalent ellipse, and rigid rotation.

use nalgebra::{Matrix2, SymmetricEigen};

/// Eigen-decomposition of a 2×2 covariance matrix, major axis first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    /// Eigenvalue of the major axis.
    pub major: f64,
    /// Eigenvalue of the minor axis.
    pub minor: f64,
    /// Unit vector along the major axis.
    pub major_axis: [f64; 2],
}

impl PrincipalAxes {
    /// Angle of the major axis in degrees, normalised to `(-90, 90]`.
    #[must_use]
    pub fn orientation_degrees(&self) -> f64 {
        let angle = self.major_axis[1].atan2(self.major_axis[0]).to_degrees();
        if angle > 90.0 {
            angle - 180.0
        } else if angle <= -90.0 {
            angle + 180.0
        } else {
            angle
        }
    }

    /// Eccentricity of the ellipse with these second moments.
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        if self.major <= 0.0 {
            return 0.0;
        }
        (1.0 - (self.minor / self.major).clamp(0.0, 1.0)).sqrt()
    }
}

/// Decompose the symmetric matrix `[[uxx, uxy], [uxy, uyy]]`.
#[must_use]
pub fn principal_axes(uxx: f64, uyy: f64, uxy: f64) -> PrincipalAxes {
    let cov = Matrix2::new(uxx, uxy, uxy, uyy);
    let eigen = SymmetricEigen::new(cov);

    let (major_idx, minor_idx) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let axis = eigen.eigenvectors.column(major_idx);

    PrincipalAxes {
        major: eigen.eigenvalues[major_idx],
        minor: eigen.eigenvalues[minor_idx],
        major_axis: [axis[0], axis[1]],
    }
}

/// Population second moments `(uxx, uyy, uxy)` of a point cloud about its
/// centroid.
#[must_use]
pub fn second_moments(xs: &[f64], ys: &[f64]) -> Option<(f64, f64, f64)> {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return None;
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;

    let (mut uxx, mut uyy, mut uxy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        uxx += dx * dx;
        uyy += dy * dy;
        uxy += dx * dy;
    }
    Some((uxx / n, uyy / n, uxy / n))
}

/// Rotate points by `-angle_deg` about the origin, so that a direction at
/// `angle_deg` lands on the positive x axis.
pub fn rotate_to_x_axis(xs: &mut [f64], ys: &mut [f64], angle_deg: f64) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    for (x, y) in xs.iter_mut().zip(ys.iter_mut()) {
        let (px, py) = (*x, *y);
        *x = px * c + py * s;
        *y = -px * s + py * c;
    }
}

/// Subtract the mean of each coordinate.
pub fn centre(xs: &mut [f64], ys: &mut [f64]) {
    if xs.is_empty() {
        return;
    }
    let mx = xs.iter().sum::<f64>() / xs.len() as f64;
    let my = ys.iter().sum::<f64>() / ys.len() as f64;
    xs.iter_mut().for_each(|x| *x -= mx);
    ys.iter_mut().for_each(|y| *y -= my);
}
