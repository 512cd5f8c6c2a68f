//! Frame-indexed signals.
//!
//! Missing values are `None` everywhere inside the crate. NaN only appears
//! at the boundary, through [`signal_from_nan`], [`signal_to_nan`] and
//! [`PointSeries::from_nan_rows`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// One value per video frame, `None` where the value is missing.
pub type FrameSignal = Vec<Option<f64>>;

/// Convert a NaN-encoded slice into a [`FrameSignal`].
///
/// Infinite values are treated as missing too.
#[must_use]
pub fn signal_from_nan(values: &[f64]) -> FrameSignal {
    values.iter().map(|&v| finite(v)).collect()
}

/// Convert a [`FrameSignal`] back to NaN encoding.
#[must_use]
pub fn signal_to_nan(signal: &[Option<f64>]) -> Vec<f64> {
    signal.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// Number of frames holding a value.
#[must_use]
pub fn valid_count(signal: &[Option<f64>]) -> usize {
    signal.iter().filter(|v| v.is_some()).count()
}

#[inline]
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// A `[points × frames]` array of coordinates or angles.
///
/// Stored frame-major so that all points of one frame are contiguous.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SeriesParts"))]
pub struct PointSeries {
    n_points: usize,
    n_frames: usize,
    data: Vec<Option<f64>>,
}

/// Unchecked fields of a [`PointSeries`] as they arrive from a serializer.
#[cfg(any(feature = "serde", test))]
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
struct SeriesParts {
    n_points: usize,
    n_frames: usize,
    data: Vec<Option<f64>>,
}

#[cfg(any(feature = "serde", test))]
impl TryFrom<SeriesParts> for PointSeries {
    type Error = FeatureError;

    fn try_from(parts: SeriesParts) -> Result<Self> {
        let SeriesParts {
            n_points,
            n_frames,
            data,
        } = parts;
        if n_points.checked_mul(n_frames) != Some(data.len()) {
            return Err(FeatureError::invalid_input(format!(
                "series of {n_points} points by {n_frames} frames holds {} values",
                data.len()
            )));
        }
        Ok(Self {
            n_points,
            n_frames,
            data: data.into_iter().map(|v| v.and_then(finite)).collect(),
        })
    }
}

impl PointSeries {
    /// Series of the given shape with every value missing.
    #[must_use]
    pub fn empty(n_points: usize, n_frames: usize) -> Self {
        Self {
            n_points,
            n_frames,
            data: vec![None; n_points * n_frames],
        }
    }

    /// Build from one row per point, each row holding one value per frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not all have the same length.
    pub fn from_rows(rows: &[Vec<Option<f64>>]) -> Result<Self> {
        let n_points = rows.len();
        let n_frames = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_frames) {
            return Err(FeatureError::frame_count("point row", n_frames, bad.len()));
        }

        let mut series = Self::empty(n_points, n_frames);
        for (p, row) in rows.iter().enumerate() {
            for (f, &v) in row.iter().enumerate() {
                series.set(p, f, v.and_then(finite));
            }
        }
        Ok(series)
    }

    /// Build from NaN-encoded rows (one row per point).
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not all have the same length.
    pub fn from_nan_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let rows: Vec<FrameSignal> = rows.iter().map(|r| signal_from_nan(r)).collect();
        Self::from_rows(&rows)
    }

    /// Build from one slice of points per frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frames do not all have the same point count.
    pub fn from_frames(frames: &[Vec<Option<f64>>]) -> Result<Self> {
        let n_frames = frames.len();
        let n_points = frames.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_points * n_frames);
        for frame in frames {
            if frame.len() != n_points {
                return Err(FeatureError::point_count("frame", n_points, frame.len()));
            }
            data.extend(frame.iter().map(|v| v.and_then(finite)));
        }
        Ok(Self {
            n_points,
            n_frames,
            data,
        })
    }

    /// Number of points in the partition.
    #[must_use]
    pub const fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of frames.
    #[must_use]
    pub const fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// All point values of one frame.
    #[must_use]
    pub fn frame(&self, frame: usize) -> &[Option<f64>] {
        let start = frame * self.n_points;
        &self.data[start..start + self.n_points]
    }

    /// Iterate over frames.
    pub fn frames(&self) -> impl Iterator<Item = &[Option<f64>]> {
        // chunks() rejects a zero chunk size
        self.data
            .chunks(self.n_points.max(1))
            .take(self.n_frames)
    }

    /// Value of one point at one frame.
    #[must_use]
    pub fn get(&self, point: usize, frame: usize) -> Option<f64> {
        self.data[frame * self.n_points + point]
    }

    /// Overwrite one value.
    pub fn set(&mut self, point: usize, frame: usize, value: Option<f64>) {
        self.data[frame * self.n_points + point] = value;
    }

    /// Copy of the contiguous point range `start..end`.
    #[must_use]
    pub fn slice_points(&self, start: usize, end: usize) -> Self {
        let n_points = end - start;
        let mut data = Vec::with_capacity(n_points * self.n_frames);
        for frame in self.frames() {
            data.extend_from_slice(&frame[start..end]);
        }
        Self {
            n_points,
            n_frames: self.n_frames,
            data,
        }
    }

    /// Points of one frame when every one of them is present.
    #[must_use]
    pub fn complete_frame(&self, frame: usize) -> Option<Vec<f64>> {
        self.frame(frame).iter().copied().collect()
    }
}

/// x and y coordinate series of the same partition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PairParts"))]
pub struct PointPair {
    /// x coordinates.
    pub x: PointSeries,
    /// y coordinates.
    pub y: PointSeries,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PairParts {
    x: PointSeries,
    y: PointSeries,
}

#[cfg(feature = "serde")]
impl TryFrom<PairParts> for PointPair {
    type Error = FeatureError;

    fn try_from(parts: PairParts) -> Result<Self> {
        Self::new(parts.x, parts.y)
    }
}

impl PointPair {
    /// Pair two series.
    ///
    /// # Errors
    ///
    /// Returns an error if the two series have different shapes.
    pub fn new(x: PointSeries, y: PointSeries) -> Result<Self> {
        if x.n_points() != y.n_points() {
            return Err(FeatureError::point_count("y series", x.n_points(), y.n_points()));
        }
        if x.n_frames() != y.n_frames() {
            return Err(FeatureError::frame_count("y series", x.n_frames(), y.n_frames()));
        }
        Ok(Self { x, y })
    }

    /// Number of points.
    #[must_use]
    pub const fn n_points(&self) -> usize {
        self.x.n_points()
    }

    /// Number of frames.
    #[must_use]
    pub const fn n_frames(&self) -> usize {
        self.x.n_frames()
    }

    /// x and y of one frame when every point is present.
    #[must_use]
    pub fn complete_frame(&self, frame: usize) -> Option<(Vec<f64>, Vec<f64>)> {
        Some((self.x.complete_frame(frame)?, self.y.complete_frame(frame)?))
    }

    /// Copy of the contiguous point range `start..end`.
    #[must_use]
    pub fn slice_points(&self, start: usize, end: usize) -> Self {
        Self {
            x: self.x.slice_points(start, end),
            y: self.y.slice_points(start, end),
        }
    }
}
