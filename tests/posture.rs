//! Posture tests on synthetic worms: bends, eccentricity, amplitude and
//! wavelength.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use worm_features::{
    compute_amplitude_and_wavelength, compute_bends, compute_eccentricity, compute_worm_features,
    valid_count, FeatureConfig, NormalizedWorm, PointPair, PointSeries, WormFrames,
    N_CONTOUR_POINTS, N_SKELETON_POINTS,
};

// =============================================================================
// WORM GENERATORS
// =============================================================================

fn pair_from_frames(frames: Vec<(Vec<f64>, Vec<f64>)>) -> PointPair {
    let (xs, ys): (Vec<Vec<Option<f64>>>, Vec<Vec<Option<f64>>>) = frames
        .into_iter()
        .map(|(x, y)| {
            (
                x.into_iter().map(Some).collect(),
                y.into_iter().map(Some).collect(),
            )
        })
        .unzip();
    PointPair::new(
        PointSeries::from_frames(&xs).unwrap(),
        PointSeries::from_frames(&ys).unwrap(),
    )
    .unwrap()
}

/// Worm with the same skeleton and contour every frame.
fn generate_still(n_frames: usize, skeleton: &[(f64, f64)], contour: &[(f64, f64)]) -> WormFrames {
    assert_eq!(skeleton.len(), N_SKELETON_POINTS);
    assert_eq!(contour.len(), N_CONTOUR_POINTS);
    let sk: (Vec<f64>, Vec<f64>) = skeleton.iter().copied().unzip();
    let ct: (Vec<f64>, Vec<f64>) = contour.iter().copied().unzip();
    WormFrames::from_outline(
        pair_from_frames(vec![sk; n_frames]),
        pair_from_frames(vec![ct; n_frames]),
    )
    .unwrap()
}

/// Ellipse outline with semi-axes `a` and `b`, major axis at `angle_deg`.
fn ellipse_outline(a: f64, b: f64, angle_deg: f64) -> Vec<(f64, f64)> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    (0..N_CONTOUR_POINTS)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / N_CONTOUR_POINTS as f64;
            let (x, y) = (a * t.cos(), b * t.sin());
            (x * c - y * s + 3.0, x * s + y * c + 1.0)
        })
        .collect()
}

/// Skeleton along the major axis of [`ellipse_outline`].
fn axis_skeleton(a: f64, angle_deg: f64) -> Vec<(f64, f64)> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    (0..N_SKELETON_POINTS)
        .map(|i| {
            let r = a * (i as f64 / 24.0 - 1.0);
            (r * c + 3.0, r * s + 1.0)
        })
        .collect()
}

/// Skeleton whose heading turns by `rate * i` degrees at point `i`, so the
/// bend angle grows linearly along the body.
fn spiral_skeleton(rate: f64) -> Vec<(f64, f64)> {
    let mut points = vec![(0.0, 0.0)];
    let mut heading = 0.0f64;
    for i in 1..N_SKELETON_POINTS {
        let (x, y) = points[i - 1];
        let (s, c) = heading.to_radians().sin_cos();
        points.push((x + c, y + s));
        heading += rate * i as f64;
    }
    points
}

/// Sinusoidal skeleton of unit point spacing in x, rotated by `angle_deg`.
fn sine_skeleton(amplitude: f64, wavelength: f64, phase: f64, angle_deg: f64) -> Vec<(f64, f64)> {
    let (s, c) = angle_deg.to_radians().sin_cos();
    (0..N_SKELETON_POINTS)
        .map(|i| {
            let x = i as f64;
            let y = amplitude * (2.0 * PI * x / wavelength + phase).sin();
            (x * c - y * s - 10.0, x * s + y * c + 4.0)
        })
        .collect()
}

// =============================================================================
// ECCENTRICITY
// =============================================================================

#[test]
fn test_circle_eccentricity_near_zero() {
    let worm = generate_still(3, &axis_skeleton(10.0, 0.0), &ellipse_outline(10.0, 10.0, 0.0));
    let result = compute_eccentricity(&worm, &FeatureConfig::default()).unwrap();

    for ecc in result.eccentricity.iter().flatten() {
        assert!(*ecc < 0.1, "eccentricity {ecc}");
    }
    assert_eq!(valid_count(&result.eccentricity), 3);
}

#[test]
fn test_elongated_ellipse_eccentricity_near_one() {
    let worm = generate_still(2, &axis_skeleton(25.0, 30.0), &ellipse_outline(25.0, 1.0, 30.0));
    let result = compute_eccentricity(&worm, &FeatureConfig::default()).unwrap();

    let ecc = result.eccentricity[0].unwrap();
    assert!(ecc > 0.99 && ecc < 1.0, "eccentricity {ecc}");
    assert_relative_eq!(result.orientation[0].unwrap(), 30.0, epsilon = 1.0);
}

#[test]
fn test_finer_grid_still_agrees() {
    let worm = generate_still(1, &axis_skeleton(10.0, -45.0), &ellipse_outline(10.0, 2.0, -45.0));
    let coarse = compute_eccentricity(&worm, &FeatureConfig::default()).unwrap();
    let fine = compute_eccentricity(&worm, &FeatureConfig::default().with_n_eccentricity(120)).unwrap();

    assert_relative_eq!(
        coarse.eccentricity[0].unwrap(),
        fine.eccentricity[0].unwrap(),
        epsilon = 0.02
    );
    assert_relative_eq!(fine.orientation[0].unwrap(), -45.0, epsilon = 1.0);
}

// =============================================================================
// BENDS
// =============================================================================

#[test]
fn test_bend_spread_signed_by_mean() {
    let contour = ellipse_outline(10.0, 2.0, 0.0);
    let left = generate_still(2, &spiral_skeleton(1.0), &contour);
    let right = generate_still(2, &spiral_skeleton(-1.0), &contour);

    let left = compute_bends(&left);
    let right = compute_bends(&right);

    // head covers points 0..8; point 0 has no bend, points 1..7 bend by 1..7
    assert_relative_eq!(left.head.mean[0].unwrap(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(left.head.std_dev[0].unwrap(), 2.0, epsilon = 1e-9);
    assert_relative_eq!(right.head.mean[0].unwrap(), -4.0, epsilon = 1e-9);
    assert_relative_eq!(right.head.std_dev[0].unwrap(), -2.0, epsilon = 1e-9);

    // neck covers points 8..16
    assert_relative_eq!(left.neck.mean[1].unwrap(), 11.5, epsilon = 1e-9);
    assert!(right.neck.std_dev[1].unwrap() < 0.0);
}

// =============================================================================
// AMPLITUDE AND WAVELENGTH
// =============================================================================

#[test]
fn test_sine_worm_wavelength() {
    let skeleton = sine_skeleton(2.0, 24.0, 0.0, 0.0);
    let worm = generate_still(2, &skeleton, &ellipse_outline(24.0, 3.0, 0.0));
    let result =
        compute_amplitude_and_wavelength(&worm, &[Some(0.0), Some(0.0)], &FeatureConfig::default())
            .unwrap();

    assert_relative_eq!(result.wavelength.primary[0].unwrap(), 24.0, epsilon = 0.5);
    assert_eq!(result.wavelength.secondary[0], None);
    assert_relative_eq!(result.track_length[0].unwrap(), 48.0, epsilon = 1e-9);
    assert_relative_eq!(result.amplitude.max[0].unwrap(), 4.0, epsilon = 0.05);
}

#[test]
fn test_folded_worm_has_amplitude_but_no_wavelength() {
    // S-shape whose x doubles back along the body
    let skeleton: Vec<(f64, f64)> = (0..N_SKELETON_POINTS)
        .map(|i| {
            let t = i as f64 / 48.0 * 2.0 * PI;
            (6.0 * t.sin(), 20.0 * i as f64 / 48.0)
        })
        .collect();
    let worm = generate_still(1, &skeleton, &ellipse_outline(10.0, 6.0, 90.0));
    let result =
        compute_amplitude_and_wavelength(&worm, &[Some(0.0)], &FeatureConfig::default()).unwrap();

    assert!(result.amplitude.max[0].unwrap() > 0.0);
    assert!(result.track_length[0].is_some());
    assert_eq!(result.wavelength.primary[0], None);
    assert_eq!(result.wavelength.secondary[0], None);
}

#[test]
fn test_missing_orientation_gives_missing_frame() {
    let skeleton = sine_skeleton(2.0, 24.0, 0.0, 0.0);
    let worm = generate_still(2, &skeleton, &ellipse_outline(24.0, 3.0, 0.0));
    let result =
        compute_amplitude_and_wavelength(&worm, &[None, Some(0.0)], &FeatureConfig::default())
            .unwrap();

    assert_eq!(result.amplitude.max[0], None);
    assert_eq!(result.amplitude.ratio[0], None);
    assert_eq!(result.track_length[0], None);
    assert_eq!(result.wavelength.primary[0], None);
    assert!(result.amplitude.max[1].is_some());

    assert!(compute_amplitude_and_wavelength(&worm, &[None], &FeatureConfig::default()).is_err());
}

#[test]
fn test_random_periodic_worms_respect_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = FeatureConfig::default();

    for _ in 0..50 {
        let amplitude = rng.gen_range(0.2..6.0);
        let wavelength = rng.gen_range(6.0..150.0);
        let phase = rng.gen_range(0.0..2.0 * PI);
        let angle = rng.gen_range(-89.0..89.0);

        let skeleton = sine_skeleton(amplitude, wavelength, phase, angle);
        let worm = generate_still(1, &skeleton, &ellipse_outline(24.0, 3.0, angle));
        let length = worm.lengths()[0].unwrap();

        let result = compute_amplitude_and_wavelength(&worm, &[Some(angle)], &config).unwrap();

        let primary = result.wavelength.primary[0].unwrap();
        assert!(primary > 0.0 && primary <= 2.0 * length, "primary {primary}, length {length}");
        if let Some(secondary) = result.wavelength.secondary[0] {
            assert!(secondary > 0.0 && secondary <= 2.0 * length);
        }

        let ratio = result.amplitude.ratio[0].unwrap();
        assert!((0.0..=1.0).contains(&ratio), "ratio {ratio}");
        assert_relative_eq!(result.track_length[0].unwrap(), 48.0, epsilon = 1e-6);
    }
}

// =============================================================================
// FULL PASS
// =============================================================================

#[test]
fn test_features_use_contour_orientation() {
    let angle = 25.0;
    let skeleton = sine_skeleton(1.5, 16.0, 0.0, angle);
    let contour = ellipse_outline(24.0, 2.0, angle);
    let worm = generate_still(4, &skeleton, &contour);

    let features = compute_worm_features(&worm, &FeatureConfig::default()).unwrap();

    let orientation = features.eccentricity.orientation[0].unwrap();
    assert_relative_eq!(orientation, angle, epsilon = 1.0);

    // aligned by the contour's axis the skeleton is still a clean sine
    let primary = features.amplitude.wavelength.primary[0].unwrap();
    assert_relative_eq!(primary, 16.0, epsilon = 1.0);
}
