use crate::foundation::core::FrameIndex;

/// Convenience result type used across framewise.
pub type FramewiseResult<T> = Result<T, FramewiseError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramewiseError {
    /// Invalid clip configuration, detected once when a clip is built.
    #[error("malformed configuration: {0}")]
    MalformedConfiguration(String),

    /// A frame index outside `[0, total_frames)` was passed to the evaluator.
    #[error("frame {} is out of range (clip has {total_frames} frames)", frame.0)]
    OutOfRangeFrame {
        /// Offending frame.
        frame: FrameIndex,
        /// Clip length in frames.
        total_frames: u64,
    },

    /// An accumulation entry produced no usable candidate value.
    #[error(
        "channel '{channel}': accumulation entry {entry} has no defined value at frame {}",
        frame.0
    )]
    UndefinedAccumulatorEntry {
        /// Channel owning the accumulation group.
        channel: String,
        /// Index of the entry inside the group.
        entry: usize,
        /// Frame being evaluated.
        frame: FrameIndex,
    },

    /// Errors when serializing or deserializing clip definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramewiseError {
    /// Build a [`FramewiseError::MalformedConfiguration`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedConfiguration(msg.into())
    }

    /// Build a [`FramewiseError::OutOfRangeFrame`] value.
    pub fn out_of_range(frame: FrameIndex, total_frames: u64) -> Self {
        Self::OutOfRangeFrame {
            frame,
            total_frames,
        }
    }

    /// Build a [`FramewiseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
