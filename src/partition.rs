//! Named anatomical partitions of the 49-point skeleton.
//!
//! The table is static. Names are resolved once, through [`FromStr`], so
//! a misspelt partition fails before any computation starts.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Number of skeleton points of a normalized worm.
pub const N_SKELETON_POINTS: usize = 49;

/// Number of contour points of a normalized worm.
pub const N_CONTOUR_POINTS: usize = 96;

/// Contiguous range of skeleton point indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Partition {
    Head,
    Neck,
    Midbody,
    Hips,
    Tail,
    HeadTip,
    HeadBase,
    /// Starts one point inside `hips`, at point 40.
    TailBase,
    TailTip,
    /// Neck through hips (33 points).
    Body,
    All,
}

impl Partition {
    /// Every partition in the lookup table.
    pub const ALL_PARTITIONS: [Self; 11] = [
        Self::Head,
        Self::Neck,
        Self::Midbody,
        Self::Hips,
        Self::Tail,
        Self::HeadTip,
        Self::HeadBase,
        Self::TailBase,
        Self::TailTip,
        Self::Body,
        Self::All,
    ];

    /// Skeleton point indices covered by this partition.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        match self {
            Self::Head => 0..8,
            Self::Neck => 8..16,
            Self::Midbody => 16..33,
            Self::Hips => 33..41,
            Self::Tail => 41..49,
            Self::HeadTip => 0..4,
            Self::HeadBase => 4..8,
            Self::TailBase => 40..45,
            Self::TailTip => 45..49,
            Self::Body => 8..41,
            Self::All => 0..49,
        }
    }

    /// Number of points in this partition.
    #[must_use]
    pub const fn point_count(self) -> usize {
        let r = self.range();
        r.end - r.start
    }

    /// Name used by tracking software.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Neck => "neck",
            Self::Midbody => "midbody",
            Self::Hips => "hips",
            Self::Tail => "tail",
            Self::HeadTip => "head_tip",
            Self::HeadBase => "head_base",
            Self::TailBase => "tail_base",
            Self::TailTip => "tail_tip",
            Self::Body => "body",
            Self::All => "all",
        }
    }
}

impl FromStr for Partition {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL_PARTITIONS
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| FeatureError::unknown_partition(s))
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named grouping of partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PartitionSubset {
    /// Head, neck, midbody, hips, tail: the whole skeleton without overlap.
    Normal,
    FirstThird,
    SecondThird,
    LastThird,
}

impl PartitionSubset {
    /// Partitions of this subset, head first.
    #[must_use]
    pub const fn partitions(self) -> &'static [Partition] {
        match self {
            Self::Normal => &[
                Partition::Head,
                Partition::Neck,
                Partition::Midbody,
                Partition::Hips,
                Partition::Tail,
            ],
            Self::FirstThird => &[Partition::Head, Partition::Neck],
            Self::SecondThird => &[Partition::Midbody],
            Self::LastThird => &[Partition::Hips, Partition::Tail],
        }
    }
}

impl FromStr for PartitionSubset {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "first_third" => Ok(Self::FirstThird),
            "second_third" => Ok(Self::SecondThird),
            "last_third" => Ok(Self::LastThird),
            _ => Err(FeatureError::unknown_partition(s)),
        }
    }
}
