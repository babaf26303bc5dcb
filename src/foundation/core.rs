use crate::foundation::error::{FramewiseError, FramewiseResult};

/// Absolute 0-based frame index in clip timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> FramewiseResult<Self> {
        if start.0 > end.0 {
            return Err(FramewiseError::malformed("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> FramewiseResult<Self> {
        if den == 0 {
            return Err(FramewiseError::malformed("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FramewiseError::malformed("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Clip timeline: total length in frames plus the playback rate.
///
/// Progress is always computed from the frame index alone, so any frame can be evaluated
/// without knowing about any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Total number of frames in the clip (`> 0`).
    pub total_frames: u64,
    /// Playback rate.
    pub fps: Fps,
}

impl Timeline {
    /// Create a validated timeline.
    pub fn new(total_frames: u64, fps: Fps) -> FramewiseResult<Self> {
        let tl = Self { total_frames, fps };
        tl.validate()?;
        Ok(tl)
    }

    /// Check `total_frames > 0` and a well-formed frame rate.
    pub fn validate(&self) -> FramewiseResult<()> {
        if self.total_frames == 0 {
            return Err(FramewiseError::malformed("timeline total_frames must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }

    /// Full frame range `[0, total_frames)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames),
        }
    }

    /// Return `true` when `frame` is a valid index into this timeline.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        frame.0 < self.total_frames
    }

    /// Clip-relative progress `t / total_frames`, in `[0, 1)` for valid frames.
    pub fn progress(&self, frame: FrameIndex) -> f64 {
        (frame.0 as f64) / (self.total_frames as f64)
    }

    /// Wall time of `frame` in seconds.
    pub fn seconds(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.total_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
