//! Worm velocity: signed speed and turning direction of five body parts.
//!
//! Speed is measured between frames a fixed time apart (see
//! [`crate::sampling`]), not between adjacent frames, so tracking jitter
//! does not dominate it.
//!
//! # Pipeline
//!
//! 1. Per-frame centroid and heading of the partition
//! 2. Odd sampling window from the partition's time scale
//! 3. Nearest valid neighbour frames around every frame
//! 4. Speed from centroid displacement, direction from heading change
//! 5. Speed negated when the centroid moves against the body heading
//! 6. Direction signed for the ventral mode

use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{FeatureConfig, VentralMode};
use crate::error::Result;
use crate::math::stats::{nan_mean_diff, strict_mean, wrap_degrees};
use crate::partition::Partition;
use crate::sampling::{find_all_neighbors, half_window, sampling_window};
use crate::sign::{direction_sign, speed_sign};
use crate::signal::{valid_count, FrameSignal, PointPair};
use crate::worm::NormalizedWorm;

/// Speed and direction of one partition.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartitionVelocity {
    /// Signed speed in skeleton units per second; negative when moving
    /// backwards relative to the body.
    pub speed: FrameSignal,
    /// Change of heading (degrees) over the sampling window, in
    /// `(-180, 180]`, signed for the ventral mode.
    pub direction: FrameSignal,
}

impl PartitionVelocity {
    fn missing(n_frames: usize) -> Self {
        Self {
            speed: vec![None; n_frames],
            direction: vec![None; n_frames],
        }
    }
}

/// Velocity of the head tip, head, midbody, tail and tail tip.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WormVelocity {
    pub head_tip: PartitionVelocity,
    pub head: PartitionVelocity,
    pub midbody: PartitionVelocity,
    pub tail: PartitionVelocity,
    pub tail_tip: PartitionVelocity,
}

impl WormVelocity {
    /// Partitions measured, head first.
    pub const PARTITIONS: [Partition; 5] = [
        Partition::HeadTip,
        Partition::Head,
        Partition::Midbody,
        Partition::Tail,
        Partition::TailTip,
    ];

    /// Result for one of [`Self::PARTITIONS`].
    #[must_use]
    pub fn get(&self, partition: Partition) -> Option<&PartitionVelocity> {
        match partition {
            Partition::HeadTip => Some(&self.head_tip),
            Partition::Head => Some(&self.head),
            Partition::Midbody => Some(&self.midbody),
            Partition::Tail => Some(&self.tail),
            Partition::TailTip => Some(&self.tail_tip),
            _ => None,
        }
    }
}

/// Time scale (seconds) used for a velocity partition.
#[must_use]
pub fn time_scale(partition: Partition, config: &FeatureConfig) -> f64 {
    match partition {
        Partition::HeadTip | Partition::TailTip => config.tip_diff,
        _ => config.body_diff,
    }
}

/// Heading (degrees) of a set of points per frame: the direction of the
/// mean step between consecutive points.
#[must_use]
pub fn partition_angle(points: &PointPair) -> FrameSignal {
    (0..points.n_frames())
        .map(|f| {
            let dx = nan_mean_diff(points.x.frame(f))?;
            let dy = nan_mean_diff(points.y.frame(f))?;
            Some(dy.atan2(dx).to_degrees())
        })
        .collect()
}

/// Centroid per frame; a frame with any missing point has none.
#[must_use]
pub fn partition_centroid(points: &PointPair) -> Vec<Option<(f64, f64)>> {
    (0..points.n_frames())
        .map(|f| Some((strict_mean(points.x.frame(f))?, strict_mean(points.y.frame(f))?)))
        .collect()
}

/// Compute the velocity of the five standard partitions.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn compute_worm_velocity<W: NormalizedWorm + ?Sized>(
    worm: &W,
    config: &FeatureConfig,
) -> Result<WormVelocity> {
    config.validate()?;

    let body_angle = partition_angle(&worm.skeleton_partition(Partition::Body));

    let measure = |partition: Partition| -> Result<PartitionVelocity> {
        let points = worm.skeleton_partition(partition);
        let velocity = compute_velocity(
            &points,
            &body_angle,
            time_scale(partition, config),
            config.fps,
            config.ventral_mode,
        )?;
        debug!(
            partition = partition.name(),
            frames = points.n_frames(),
            estimated = valid_count(&velocity.speed),
            "computed partition velocity"
        );
        Ok(velocity)
    };

    Ok(WormVelocity {
        head_tip: measure(Partition::HeadTip)?,
        head: measure(Partition::Head)?,
        midbody: measure(Partition::Midbody)?,
        tail: measure(Partition::Tail)?,
        tail_tip: measure(Partition::TailTip)?,
    })
}

/// Velocity of one set of points.
///
/// `body_angle` is the whole-body heading per frame, used to decide whether
/// the motion is forwards or backwards. Frames that cannot be paired with
/// valid neighbours come out `None`; if the sampling window is longer than
/// the clip every frame does.
///
/// # Errors
///
/// Returns an error if `time_scale` or `fps` is not positive.
pub fn compute_velocity(
    points: &PointPair,
    body_angle: &[Option<f64>],
    time_scale: f64,
    fps: f64,
    ventral_mode: VentralMode,
) -> Result<PartitionVelocity> {
    let n_frames = points.n_frames();
    let window = sampling_window(time_scale, fps)?;

    if window > n_frames {
        warn!(window, n_frames, "clip shorter than sampling window");
        return Ok(PartitionVelocity::missing(n_frames));
    }

    let angle = partition_angle(points);
    let centroid = partition_centroid(points);
    let valid: Vec<bool> = centroid.iter().map(Option::is_some).collect();
    let neighbors = find_all_neighbors(&valid, half_window(window));
    let dir_sign = direction_sign(ventral_mode);

    let mut result = PartitionVelocity::missing(n_frames);
    for (frame, pair) in neighbors.into_iter().enumerate() {
        let Some(pair) = pair else { continue };
        let (Some((lx, ly)), Some((rx, ry))) = (centroid[pair.left], centroid[pair.right]) else {
            continue;
        };

        let (dx, dy) = (rx - lx, ry - ly);
        let elapsed = pair.span() as f64 / fps;
        let mut speed = dx.hypot(dy) / elapsed;

        if let Some(heading) = body_angle.get(pair.left).copied().flatten() {
            let motion = dy.atan2(dx).to_degrees();
            speed *= speed_sign(wrap_degrees(motion - heading));
        }
        result.speed[frame] = Some(speed);

        if let (Some(a0), Some(a1)) = (angle[pair.left], angle[pair.right]) {
            result.direction[frame] = Some(wrap_degrees(dir_sign * (a1 - a0)));
        }
    }

    Ok(result)
}
