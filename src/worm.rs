//! The normalized worm: the data source every estimator reads from.
//!
//! Upstream tracking produces, per frame, a 49-point skeleton, the bend
//! angle at each skeleton point, a 96-point contour (head → tail → head,
//! no repeated points) and the worm length. [`NormalizedWorm`] is the
//! typed accessor the estimators consume; [`WormFrames`] is the validated
//! in-memory implementation.

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::math::linalg::rotate_to_x_axis;
use crate::math::stats::wrap_degrees;
use crate::partition::{Partition, PartitionSubset, N_CONTOUR_POINTS, N_SKELETON_POINTS};
use crate::signal::{FrameSignal, PointPair, PointSeries};

/// Kind of per-point signal requested from a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Skeleton x/y coordinates.
    Skeletons,
    /// Bend angles in degrees.
    Angles,
}

/// Data returned by [`NormalizedWorm::get_partition`].
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionData {
    Coordinates(PointPair),
    Angles(PointSeries),
}

/// Typed access to a normalized worm.
pub trait NormalizedWorm {
    /// Number of video frames.
    fn n_frames(&self) -> usize;

    /// Full 49-point skeleton.
    fn skeleton(&self) -> &PointPair;

    /// Bend angle (degrees) at each skeleton point.
    fn angles(&self) -> &PointSeries;

    /// Full 96-point contour.
    fn contour(&self) -> &PointPair;

    /// Worm length per frame.
    fn lengths(&self) -> &[Option<f64>];

    /// Skeleton coordinates of one partition.
    fn skeleton_partition(&self, partition: Partition) -> PointPair {
        let r = partition.range();
        self.skeleton().slice_points(r.start, r.end)
    }

    /// Bend angles of one partition.
    fn angle_partition(&self, partition: Partition) -> PointSeries {
        let r = partition.range();
        self.angles().slice_points(r.start, r.end)
    }

    /// Partitions of a named grouping.
    fn partition_subset(&self, subset: PartitionSubset) -> &'static [Partition] {
        subset.partitions()
    }

    /// Look a partition up by name.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::UnknownPartition`] for names outside the
    /// partition table.
    fn get_partition(&self, name: &str, kind: SignalKind) -> Result<PartitionData> {
        let partition: Partition = name.parse()?;
        Ok(match kind {
            SignalKind::Skeletons => PartitionData::Coordinates(self.skeleton_partition(partition)),
            SignalKind::Angles => PartitionData::Angles(self.angle_partition(partition)),
        })
    }

    /// Copy with each frame rotated by `-orientation` (degrees) and
    /// translated so the skeleton centroid sits at the origin.
    ///
    /// Skeleton and contour move together. Frames with a missing
    /// orientation or an incomplete skeleton come out all missing.
    ///
    /// # Errors
    ///
    /// Returns an error if `orientation` does not have one value per frame.
    fn re_orient_and_centre(&self, orientation: &[Option<f64>]) -> Result<WormFrames> {
        let n_frames = self.n_frames();
        if orientation.len() != n_frames {
            return Err(FeatureError::frame_count(
                "orientation",
                n_frames,
                orientation.len(),
            ));
        }

        let skeleton = self.skeleton();
        let contour = self.contour();
        let mut sk_x = PointSeries::empty(skeleton.n_points(), n_frames);
        let mut sk_y = PointSeries::empty(skeleton.n_points(), n_frames);
        let mut ct_x = PointSeries::empty(contour.n_points(), n_frames);
        let mut ct_y = PointSeries::empty(contour.n_points(), n_frames);

        for (frame, theta) in orientation.iter().enumerate() {
            let (Some(theta), Some((mut xs, mut ys))) = (*theta, skeleton.complete_frame(frame))
            else {
                continue;
            };
            let cx = xs.iter().sum::<f64>() / xs.len() as f64;
            let cy = ys.iter().sum::<f64>() / ys.len() as f64;

            xs.iter_mut().for_each(|x| *x -= cx);
            ys.iter_mut().for_each(|y| *y -= cy);
            rotate_to_x_axis(&mut xs, &mut ys, theta);
            for (p, (x, y)) in xs.into_iter().zip(ys).enumerate() {
                sk_x.set(p, frame, Some(x));
                sk_y.set(p, frame, Some(y));
            }

            if let Some((mut xs, mut ys)) = contour.complete_frame(frame) {
                xs.iter_mut().for_each(|x| *x -= cx);
                ys.iter_mut().for_each(|y| *y -= cy);
                rotate_to_x_axis(&mut xs, &mut ys, theta);
                for (p, (x, y)) in xs.into_iter().zip(ys).enumerate() {
                    ct_x.set(p, frame, Some(x));
                    ct_y.set(p, frame, Some(y));
                }
            }
        }

        Ok(WormFrames {
            skeleton: PointPair { x: sk_x, y: sk_y },
            angles: self.angles().clone(),
            contour: PointPair { x: ct_x, y: ct_y },
            lengths: self.lengths().to_vec(),
        })
    }
}

/// Validated per-frame worm data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WormParts"))]
pub struct WormFrames {
    skeleton: PointPair,
    angles: PointSeries,
    contour: PointPair,
    lengths: FrameSignal,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct WormParts {
    skeleton: PointPair,
    angles: PointSeries,
    contour: PointPair,
    lengths: FrameSignal,
}

#[cfg(feature = "serde")]
impl TryFrom<WormParts> for WormFrames {
    type Error = FeatureError;

    fn try_from(parts: WormParts) -> Result<Self> {
        Self::new(parts.skeleton, parts.angles, parts.contour, parts.lengths)
    }
}

impl WormFrames {
    /// Assemble a worm from its signals.
    ///
    /// # Errors
    ///
    /// Returns an error if the skeleton or angles don't have 49 points, the
    /// contour doesn't have 96, any signal has a different frame count from
    /// the skeleton, or a length is negative.
    pub fn new(
        skeleton: PointPair,
        angles: PointSeries,
        contour: PointPair,
        lengths: FrameSignal,
    ) -> Result<Self> {
        if skeleton.n_points() != N_SKELETON_POINTS {
            return Err(FeatureError::point_count(
                "skeleton",
                N_SKELETON_POINTS,
                skeleton.n_points(),
            ));
        }
        if angles.n_points() != N_SKELETON_POINTS {
            return Err(FeatureError::point_count(
                "angles",
                N_SKELETON_POINTS,
                angles.n_points(),
            ));
        }
        if contour.n_points() != N_CONTOUR_POINTS {
            return Err(FeatureError::point_count(
                "contour",
                N_CONTOUR_POINTS,
                contour.n_points(),
            ));
        }

        let n_frames = skeleton.n_frames();
        if angles.n_frames() != n_frames {
            return Err(FeatureError::frame_count("angles", n_frames, angles.n_frames()));
        }
        if contour.n_frames() != n_frames {
            return Err(FeatureError::frame_count("contour", n_frames, contour.n_frames()));
        }
        if lengths.len() != n_frames {
            return Err(FeatureError::frame_count("lengths", n_frames, lengths.len()));
        }
        if let Some((frame, length)) = lengths
            .iter()
            .enumerate()
            .find_map(|(f, l)| l.filter(|&l| l < 0.0).map(|l| (f, l)))
        {
            return Err(FeatureError::invalid_input(format!(
                "negative worm length {length} at frame {frame}"
            )));
        }

        Ok(Self {
            skeleton,
            angles,
            contour,
            lengths,
        })
    }

    /// Assemble a worm from skeleton and contour alone, deriving the bend
    /// angles and the lengths from the skeleton.
    ///
    /// The bend angle at an interior point is the change in heading between
    /// the segment arriving at it and the segment leaving it, wrapped into
    /// `(-180, 180]`. The two end points have no bend angle. The length is
    /// the skeleton's arc length.
    ///
    /// # Errors
    ///
    /// Same shape checks as [`WormFrames::new`].
    pub fn from_outline(skeleton: PointPair, contour: PointPair) -> Result<Self> {
        let n_points = skeleton.n_points();
        let n_frames = skeleton.n_frames();
        let mut angles = PointSeries::empty(n_points, n_frames);
        let mut lengths = Vec::with_capacity(n_frames);

        for frame in 0..n_frames {
            let xs = skeleton.x.frame(frame);
            let ys = skeleton.y.frame(frame);

            let headings: Vec<Option<f64>> = (1..n_points)
                .map(|i| {
                    let dx = xs[i]? - xs[i - 1]?;
                    let dy = ys[i]? - ys[i - 1]?;
                    Some(dy.atan2(dx).to_degrees())
                })
                .collect();

            for i in 1..n_points.saturating_sub(1) {
                let bend = match (headings[i - 1], headings[i]) {
                    (Some(a), Some(b)) => Some(wrap_degrees(b - a)),
                    _ => None,
                };
                angles.set(i, frame, bend);
            }

            let length = skeleton.complete_frame(frame).map(|(xs, ys)| {
                xs.windows(2)
                    .zip(ys.windows(2))
                    .map(|(wx, wy)| (wx[1] - wx[0]).hypot(wy[1] - wy[0]))
                    .sum::<f64>()
            });
            lengths.push(length);
        }

        debug!(n_frames, "derived bend angles and lengths from skeleton");
        Self::new(skeleton, angles, contour, lengths)
    }
}

impl NormalizedWorm for WormFrames {
    fn n_frames(&self) -> usize {
        self.skeleton.n_frames()
    }

    fn skeleton(&self) -> &PointPair {
        &self.skeleton
    }

    fn angles(&self) -> &PointSeries {
        &self.angles
    }

    fn contour(&self) -> &PointPair {
        &self.contour
    }

    fn lengths(&self) -> &[Option<f64>] {
        &self.lengths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Straight worm along the line at `angle_deg`, contour a thin loop
    /// around it.
    fn straight_worm(angle_deg: f64, n_frames: usize) -> WormFrames {
        let (s, c) = angle_deg.to_radians().sin_cos();
        let frames_x: Vec<Vec<Option<f64>>> = (0..n_frames)
            .map(|_| (0..N_SKELETON_POINTS).map(|i| Some(i as f64 * c + 5.0)).collect())
            .collect();
        let frames_y: Vec<Vec<Option<f64>>> = (0..n_frames)
            .map(|_| (0..N_SKELETON_POINTS).map(|i| Some(i as f64 * s - 3.0)).collect())
            .collect();
        let contour_x: Vec<Vec<Option<f64>>> = (0..n_frames)
            .map(|_| {
                (0..N_CONTOUR_POINTS)
                    .map(|i| {
                        let t = 2.0 * std::f64::consts::PI * i as f64 / N_CONTOUR_POINTS as f64;
                        Some(24.0 * t.cos() * c - 2.0 * t.sin() * s + 24.0 * c + 5.0)
                    })
                    .collect()
            })
            .collect();
        let contour_y: Vec<Vec<Option<f64>>> = (0..n_frames)
            .map(|_| {
                (0..N_CONTOUR_POINTS)
                    .map(|i| {
                        let t = 2.0 * std::f64::consts::PI * i as f64 / N_CONTOUR_POINTS as f64;
                        Some(24.0 * t.cos() * s + 2.0 * t.sin() * c + 24.0 * s - 3.0)
                    })
                    .collect()
            })
            .collect();

        let skeleton = PointPair::new(
            PointSeries::from_frames(&frames_x).unwrap(),
            PointSeries::from_frames(&frames_y).unwrap(),
        )
        .unwrap();
        let contour = PointPair::new(
            PointSeries::from_frames(&contour_x).unwrap(),
            PointSeries::from_frames(&contour_y).unwrap(),
        )
        .unwrap();
        WormFrames::from_outline(skeleton, contour).unwrap()
    }

    #[test]
    fn test_from_outline_derives_length_and_angles() {
        let worm = straight_worm(30.0, 2);
        assert_relative_eq!(worm.lengths()[0].unwrap(), 48.0, epsilon = 1e-9);
        assert_eq!(worm.angles().get(0, 0), None);
        assert_eq!(worm.angles().get(48, 1), None);
        assert_relative_eq!(worm.angles().get(24, 1).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shape_validation() {
        let skeleton = PointPair::new(PointSeries::empty(48, 3), PointSeries::empty(48, 3)).unwrap();
        let contour = PointPair::new(PointSeries::empty(96, 3), PointSeries::empty(96, 3)).unwrap();
        let err = WormFrames::new(
            skeleton,
            PointSeries::empty(49, 3),
            contour,
            vec![None; 3],
        )
        .unwrap_err();
        assert!(matches!(err, FeatureError::PointCount { expected: 49, actual: 48, .. }));

        let worm = straight_worm(0.0, 2);
        let err = WormFrames::new(
            worm.skeleton().clone(),
            worm.angles().clone(),
            worm.contour().clone(),
            vec![Some(48.0), Some(-1.0)],
        )
        .unwrap_err();
        assert!(matches!(err, FeatureError::InvalidInput(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_revalidates() {
        let worm = straight_worm(10.0, 2);
        let json = serde_json::to_string(&worm).unwrap();
        let back: WormFrames = serde_json::from_str(&json).unwrap();
        assert_eq!(back.n_frames(), 2);
        assert_relative_eq!(back.lengths()[1].unwrap(), worm.lengths()[1].unwrap(), epsilon = 1e-9);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["lengths"] = serde_json::json!([48.0]);
        assert!(serde_json::from_value::<WormFrames>(value).is_err());
    }

    #[test]
    fn test_get_partition_by_name() {
        let worm = straight_worm(0.0, 3);
        match worm.get_partition("body", SignalKind::Skeletons).unwrap() {
            PartitionData::Coordinates(pair) => {
                assert_eq!(pair.n_points(), 33);
                assert_eq!(pair.x.get(0, 0), Some(13.0));
            }
            PartitionData::Angles(_) => panic!("expected coordinates"),
        }
        match worm.get_partition("tail_tip", SignalKind::Angles).unwrap() {
            PartitionData::Angles(series) => assert_eq!(series.n_points(), 4),
            PartitionData::Coordinates(_) => panic!("expected angles"),
        }
        assert!(worm.get_partition("flagellum", SignalKind::Angles).is_err());
    }

    #[test]
    fn test_re_orient_and_centre() {
        let worm = straight_worm(30.0, 2);
        let oriented = worm.re_orient_and_centre(&[Some(30.0), None]).unwrap();

        let (xs, ys) = oriented.skeleton().complete_frame(0).unwrap();
        assert_relative_eq!(xs.iter().sum::<f64>(), 0.0, epsilon = 1e-9);
        for y in ys {
            assert_relative_eq!(y, 0.0, epsilon = 1e-9);
        }
        assert_relative_eq!(xs[48] - xs[0], 48.0, epsilon = 1e-9);

        assert!(oriented.skeleton().complete_frame(1).is_none());
        assert!(oriented.contour().complete_frame(0).is_some());
        assert!(worm.re_orient_and_centre(&[Some(0.0)]).is_err());
    }
}
