use std::f64::consts::TAU;

use crate::foundation::error::{FramewiseError, FramewiseResult};

/// Sinusoid over a progress clock.
///
/// `value(p) = offset + amplitude * sin(TAU * (cycles * p + phase))`. Used for breathing, pulsing
/// and wobbling motion layered on top of keyed animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Wave {
    /// Peak deviation from `offset`.
    pub amplitude: f64,
    /// Full periods per unit of progress.
    pub cycles: f64,
    /// Phase shift, in periods.
    #[serde(default)]
    pub phase: f64,
    /// Resting value.
    #[serde(default)]
    pub offset: f64,
}

impl Wave {
    /// Zero-phase wave centred on `0`.
    pub fn new(amplitude: f64, cycles: f64) -> Self {
        Self {
            amplitude,
            cycles,
            phase: 0.0,
            offset: 0.0,
        }
    }

    /// Replace the phase shift.
    pub fn phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Replace the resting value.
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Reject non-finite parameters.
    pub fn validate(&self) -> FramewiseResult<()> {
        let params = [
            ("amplitude", self.amplitude),
            ("cycles", self.cycles),
            ("phase", self.phase),
            ("offset", self.offset),
        ];
        if let Some((name, v)) = params.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FramewiseError::malformed(format!("wave {name} must be finite, got {v}")));
        }
        Ok(())
    }

    /// Wave value at `progress`.
    pub fn value(&self, progress: f64) -> f64 {
        self.offset + self.amplitude * (TAU * (self.cycles * progress + self.phase)).sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/wave.rs"]
mod tests;
