//! Error types for worm feature extraction.
//!
//! Only structural problems surface as errors: bad configuration, unknown
//! partition names and arrays of the wrong shape. Data gaps inside a clip
//! never do; they come back as `None` in the output signals.

use thiserror::Error;

/// Main error type for feature extraction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Input validation errors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A point-set signal does not have the expected number of points.
    #[error("Wrong point count for {what}: expected {expected}, got {actual}")]
    PointCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two signals that must share frame indexing have different lengths.
    #[error("Frame count mismatch for {what}: expected {expected}, got {actual}")]
    FrameCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Partition or partition subset name that is not in the lookup table.
    #[error("Unknown partition: {0}")]
    UnknownPartition(String),

    /// Ventral mode value outside {unknown, clockwise, anticlockwise}.
    #[error("Invalid ventral mode: {0}")]
    InvalidVentralMode(String),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for feature extraction.
pub type Result<T> = std::result::Result<T, FeatureError>;

impl FeatureError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a point count error.
    #[must_use]
    pub const fn point_count(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::PointCount {
            what,
            expected,
            actual,
        }
    }

    /// Create a frame count error.
    #[must_use]
    pub const fn frame_count(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::FrameCount {
            what,
            expected,
            actual,
        }
    }

    /// Create an unknown partition error.
    #[must_use]
    pub fn unknown_partition(name: impl Into<String>) -> Self {
        Self::UnknownPartition(name.into())
    }

    /// Create an invalid ventral mode error.
    #[must_use]
    pub fn invalid_ventral_mode(value: impl Into<String>) -> Self {
        Self::InvalidVentralMode(value.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeatureError::point_count("skeleton x", 49, 48);
        let msg = err.to_string();
        assert!(msg.contains("skeleton x"));
        assert!(msg.contains("49"));
        assert!(msg.contains("48"));

        let err = FeatureError::unknown_partition("elbow");
        assert_eq!(err.to_string(), "Unknown partition: elbow");
    }

    #[test]
    fn test_error_constructors() {
        let _ = FeatureError::invalid_input("test");
        let _ = FeatureError::frame_count("lengths", 10, 9);
        let _ = FeatureError::invalid_ventral_mode("3");
        let _ = FeatureError::invalid_config("fps must be positive");
    }
}
