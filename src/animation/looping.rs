use crate::foundation::{
    core::FrameIndex,
    error::{FramewiseError, FramewiseResult},
};

/// Position of `frame` within a cycle of `period` frames, in `[0, 1)`.
///
/// A zero `period` is treated as a one-frame cycle and always yields `0`.
pub fn loop_progress(frame: FrameIndex, period: u64) -> f64 {
    let period = period.max(1);
    (frame.0 % period) as f64 / period as f64
}

/// How a looped clock behaves at the end of each cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Jump back to `0` at each cycle boundary.
    #[default]
    Repeat,
    /// Run forwards, then backwards; a full round trip lasts two periods.
    PingPong,
}

/// Cyclic clock over a fixed number of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoopSpec {
    /// Frames per cycle, `> 0`.
    pub period_frames: u64,
    /// End-of-cycle behavior.
    #[serde(default)]
    pub mode: LoopMode,
}

impl LoopSpec {
    /// Repeating loop of `period_frames`.
    pub fn repeat(period_frames: u64) -> Self {
        Self {
            period_frames,
            mode: LoopMode::Repeat,
        }
    }

    /// Ping-pong loop whose forward leg lasts `period_frames`.
    pub fn ping_pong(period_frames: u64) -> Self {
        Self {
            period_frames,
            mode: LoopMode::PingPong,
        }
    }

    /// Reject zero-length periods.
    pub fn validate(&self) -> FramewiseResult<()> {
        if self.period_frames == 0 {
            return Err(FramewiseError::malformed("loop period_frames must be > 0"));
        }
        Ok(())
    }

    /// Cycle progress at `frame`.
    ///
    /// `Repeat` stays in `[0, 1)`. `PingPong` is a triangle wave over `[0, 1]` that touches `1`
    /// at the turnaround frame.
    pub fn progress(&self, frame: FrameIndex) -> f64 {
        let period = self.period_frames.max(1);
        match self.mode {
            LoopMode::Repeat => loop_progress(frame, period),
            LoopMode::PingPong => {
                // A round trip can exceed u64 for periods above u64::MAX / 2.
                let period = u128::from(period);
                let round_trip = 2 * period;
                let pos = u128::from(frame.0) % round_trip;
                let leg = if pos <= period { pos } else { round_trip - pos };
                leg as f64 / period as f64
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/looping.rs"]
mod tests;
