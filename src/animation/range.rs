use crate::{
    animation::ease::Ease,
    foundation::error::{FramewiseError, FramewiseResult},
    foundation::math::lerp,
};

/// Map `x` from `input` to `output`, clamping `x` to `input` first.
///
/// `output[0] > output[1]` expresses a decreasing mapping. A zero-width input range acts as a
/// step at `input[0]`: values below it yield `output[0]`, everything else yields `output[1]`.
pub fn map_range(x: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    let [in_lo, in_hi] = input;
    let [out_lo, out_hi] = output;
    if in_hi <= in_lo {
        return if x < in_lo { out_lo } else { out_hi };
    }
    let t = (x.clamp(in_lo, in_hi) - in_lo) / (in_hi - in_lo);
    lerp(out_lo, out_hi, t)
}

/// Piecewise-linear function over ordered breakpoints.
///
/// Inputs are non-decreasing. When adjacent inputs are equal the segment has zero width and the
/// last breakpoint carrying that input wins.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeRange {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl KeyframeRange {
    /// Create a validated keyframe range.
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>) -> FramewiseResult<Self> {
        let kr = Self { inputs, outputs };
        kr.validate()?;
        Ok(kr)
    }

    /// Two-breakpoint range `input -> output`.
    pub fn linear(input: [f64; 2], output: [f64; 2]) -> FramewiseResult<Self> {
        Self::new(input.to_vec(), output.to_vec())
    }

    /// Check breakpoint counts, ordering, finiteness and output spans.
    pub fn validate(&self) -> FramewiseResult<()> {
        if self.inputs.len() != self.outputs.len() {
            return Err(FramewiseError::malformed(format!(
                "keyframe range has {} input breakpoints but {} output breakpoints",
                self.inputs.len(),
                self.outputs.len()
            )));
        }
        if self.inputs.len() < 2 {
            return Err(FramewiseError::malformed("keyframe range needs at least 2 breakpoints"));
        }
        for (i, (x, y)) in self.inputs.iter().zip(&self.outputs).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(FramewiseError::malformed(format!(
                    "keyframe breakpoint {i} is not finite"
                )));
            }
        }
        if let Some(i) = self
            .outputs
            .windows(2)
            .position(|w| !(w[1] - w[0]).is_finite())
        {
            return Err(FramewiseError::malformed(format!(
                "keyframe output span from breakpoint {i} to {} overflows f64",
                i + 1
            )));
        }
        if let Some(i) = self.inputs.windows(2).position(|w| w[1] < w[0]) {
            return Err(FramewiseError::malformed(format!(
                "keyframe input breakpoint {} ({}) is below breakpoint {} ({})",
                i + 1,
                self.inputs[i + 1],
                i,
                self.inputs[i]
            )));
        }
        Ok(())
    }

    /// Evaluate at `x`, easing each segment's local progress with `ease`.
    pub fn sample(&self, x: f64, ease: Ease) -> f64 {
        let last = self.inputs.len() - 1;
        if x.is_nan() || x < self.inputs[0] {
            return self.outputs[0];
        }
        // First breakpoint strictly greater than x; ties resolve to the last equal breakpoint.
        let idx = self.inputs.partition_point(|&b| b <= x);
        if idx > last {
            return self.outputs[last];
        }
        let (a, b) = (idx - 1, idx);
        let u = (x - self.inputs[a]) / (self.inputs[b] - self.inputs[a]);
        lerp(self.outputs[a], self.outputs[b], ease.apply(u))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/range.rs"]
mod tests;
