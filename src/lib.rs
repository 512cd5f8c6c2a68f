//! Worm Features Library
//!
//! Locomotion and posture features from normalized worm tracking data.
//!
//! Upstream tracking reduces each video frame to a 49-point skeleton, the
//! bend angle at every skeleton point, a 96-point contour and the worm's
//! length. This library turns those per-frame shapes into per-frame
//! features.
//!
//! # Features
//!
//! - **Velocity**: signed speed and heading change of five body partitions
//! - **Bends**: mean bend angle and signed spread of five body regions
//! - **Eccentricity**: equivalent-ellipse eccentricity and orientation
//! - **Amplitude**: body-wave amplitude, FFT wavelengths and track length
//!
//! Missing values are `Option<f64>` throughout; NaN only appears at the
//! boundary helpers in [`signal`].
//!
//! # Quick Start
//!
//! ```
//! use worm_features::{compute_worm_velocity, FeatureConfig, PointPair, PointSeries, WormFrames};
//!
//! // A straight worm lying head to tail along +x, sliding tail first at
//! // 2 units per frame. Speed is signed against the head-to-tail heading.
//! let n_frames = 30;
//! let frames_x: Vec<Vec<Option<f64>>> = (0..n_frames)
//!     .map(|f| (0..49).map(|i| Some(i as f64 + 2.0 * f as f64)).collect())
//!     .collect();
//! let frames_y = vec![vec![Some(0.0); 49]; n_frames];
//! let skeleton = PointPair::new(
//!     PointSeries::from_frames(&frames_x)?,
//!     PointSeries::from_frames(&frames_y)?,
//! )?;
//! let contour = PointPair::new(PointSeries::empty(96, n_frames), PointSeries::empty(96, n_frames))?;
//! let worm = WormFrames::from_outline(skeleton, contour)?;
//!
//! let config = FeatureConfig::default().with_fps(10.0);
//! let velocity = compute_worm_velocity(&worm, &config)?;
//!
//! let speed = velocity.midbody.speed[15].unwrap();
//! assert!((speed - 20.0).abs() < 1e-9);
//! # Ok::<(), worm_features::FeatureError>(())
//! ```
//!
//! # Partitions
//!
//! | Name | Skeleton points |
//! |------|-----------------|
//! | `head` | 0..8 |
//! | `neck` | 8..16 |
//! | `midbody` | 16..33 |
//! | `hips` | 33..41 |
//! | `tail` | 41..49 |
//! | `head_tip` / `head_base` | 0..4 / 4..8 |
//! | `tail_base` / `tail_tip` | 40..45 / 45..49 |
//! | `body` | 8..41 |
//! | `all` | 0..49 |

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod amplitude;
pub mod bends;
pub mod config;
pub mod eccentricity;
pub mod error;
pub mod features;
pub mod math;
pub mod partition;
pub mod sampling;
pub mod sign;
pub mod signal;
pub mod velocity;
pub mod worm;

// Re-exports for convenient access
pub use amplitude::{compute_amplitude_and_wavelength, Amplitude, AmplitudeWavelength, Wavelength};
pub use bends::{compute_bends, BendStats, WormBends};
pub use config::{FeatureConfig, VentralMode};
pub use eccentricity::{compute_eccentricity, EccentricityOrientation};
pub use error::{FeatureError, Result};
pub use features::{compute_worm_features, WormFeatures};
pub use partition::{Partition, PartitionSubset, N_CONTOUR_POINTS, N_SKELETON_POINTS};
pub use sampling::sampling_window;
pub use signal::{signal_from_nan, signal_to_nan, valid_count, FrameSignal, PointPair, PointSeries};
pub use velocity::{compute_velocity, compute_worm_velocity, PartitionVelocity, WormVelocity};
pub use worm::{NormalizedWorm, PartitionData, SignalKind, WormFrames};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
