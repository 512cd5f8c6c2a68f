//! Bend statistics per body region.
//!
//! For each of the five normal regions the mean bend angle and its standard
//! deviation are taken across the region's points every frame. The standard
//! deviation is then given the sign of the mean so that it still tells
//! dorsal from ventral bending.

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::stats::{nan_mean, nan_std};
use crate::partition::{Partition, PartitionSubset};
use crate::sign::bend_sign;
use crate::signal::{valid_count, FrameSignal, PointSeries};
use crate::worm::NormalizedWorm;

/// Mean and signed standard deviation of the bend angle of one region.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BendStats {
    pub mean: FrameSignal,
    /// Population standard deviation carrying the sign of `mean`. A zero
    /// mean keeps the unsigned value.
    pub std_dev: FrameSignal,
}

/// Bend statistics of the head, neck, midbody, hips and tail.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WormBends {
    pub head: BendStats,
    pub neck: BendStats,
    pub midbody: BendStats,
    pub hips: BendStats,
    pub tail: BendStats,
}

impl WormBends {
    /// Result for one region of the normal subset.
    #[must_use]
    pub fn get(&self, partition: Partition) -> Option<&BendStats> {
        match partition {
            Partition::Head => Some(&self.head),
            Partition::Neck => Some(&self.neck),
            Partition::Midbody => Some(&self.midbody),
            Partition::Hips => Some(&self.hips),
            Partition::Tail => Some(&self.tail),
            _ => None,
        }
    }

    fn slot_mut(&mut self, partition: Partition) -> Option<&mut BendStats> {
        match partition {
            Partition::Head => Some(&mut self.head),
            Partition::Neck => Some(&mut self.neck),
            Partition::Midbody => Some(&mut self.midbody),
            Partition::Hips => Some(&mut self.hips),
            Partition::Tail => Some(&mut self.tail),
            _ => None,
        }
    }
}

/// Bend statistics of one set of angles.
#[must_use]
pub fn bend_stats(angles: &PointSeries) -> BendStats {
    let mut mean = Vec::with_capacity(angles.n_frames());
    let mut std_dev = Vec::with_capacity(angles.n_frames());

    for frame in angles.frames() {
        let m = nan_mean(frame);
        mean.push(m);
        std_dev.push(m.zip(nan_std(frame)).map(|(m, s)| s * bend_sign(m)));
    }

    BendStats { mean, std_dev }
}

/// Compute bend statistics for the normal partition subset.
pub fn compute_bends<W: NormalizedWorm + ?Sized>(worm: &W) -> WormBends {
    let mut bends = WormBends::default();

    for &partition in worm.partition_subset(PartitionSubset::Normal) {
        let stats = bend_stats(&worm.angle_partition(partition));
        debug!(
            partition = partition.name(),
            estimated = valid_count(&stats.mean),
            "computed bend statistics"
        );
        if let Some(slot) = bends.slot_mut(partition) {
            *slot = stats;
        }
    }

    bends
}
