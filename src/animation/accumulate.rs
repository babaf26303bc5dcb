//! Monotonic accumulation of growth sub-animations.
//!
//! A growing shape (a stem, then a trunk, then a crown) is authored as several windowed
//! animations feeding one channel. Each entry is non-decreasing while active and holds its end
//! value afterwards, so the maximum over all entries never decreases either, even when the
//! hand-authored windows overlap or leave small gaps.

use crate::{
    animation::ease::Ease,
    animation::range::map_range,
    foundation::error::{FramewiseError, FramewiseResult},
};

/// Value an entry contributes before its window opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeforeWindow {
    /// Contribute `0` until the window opens.
    #[default]
    Zero,
    /// Contribute the entry's starting output until the window opens.
    Start,
}

/// One windowed contribution to an accumulation group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccumulationEntry {
    /// Active progress window `[lo, hi]`.
    pub window: [f64; 2],
    /// Output values at the start and end of the window.
    pub output: [f64; 2],
    /// Easing applied to progress within the window.
    #[serde(default)]
    pub ease: Ease,
    /// Contribution before the window opens.
    #[serde(default)]
    pub before: BeforeWindow,
}

impl AccumulationEntry {
    /// Entry with linear easing that contributes zero before its window.
    pub fn new(window: [f64; 2], output: [f64; 2]) -> Self {
        Self {
            window,
            output,
            ease: Ease::Linear,
            before: BeforeWindow::Zero,
        }
    }

    /// Replace the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Replace the pre-window behavior.
    pub fn before(mut self, before: BeforeWindow) -> Self {
        self.before = before;
        self
    }

    /// Candidate value at `progress`.
    ///
    /// Defined for every progress value: the pre-window value before `window[0]`, the eased
    /// mapping inside the window, and `output[1]` held from `window[1]` on.
    pub fn candidate(&self, progress: f64) -> f64 {
        let [lo, hi] = self.window;
        if progress < lo {
            return match self.before {
                BeforeWindow::Zero => 0.0,
                BeforeWindow::Start => self.output[0],
            };
        }
        if hi <= lo {
            return self.output[1];
        }
        let u = map_range(progress, self.window, [0.0, 1.0]);
        map_range(self.ease.apply(u), [0.0, 1.0], self.output)
    }

    fn validate(&self, channel: &str, index: usize) -> FramewiseResult<()> {
        let [lo, hi] = self.window;
        let [start, end] = self.output;
        if ![lo, hi, start, end].iter().all(|v| v.is_finite()) {
            return Err(FramewiseError::malformed(format!(
                "channel '{channel}': accumulation entry {index} has non-finite bounds"
            )));
        }
        if hi < lo {
            return Err(FramewiseError::malformed(format!(
                "channel '{channel}': accumulation entry {index} window [{lo}, {hi}] is inverted"
            )));
        }
        if end < start {
            return Err(FramewiseError::malformed(format!(
                "channel '{channel}': accumulation entry {index} output [{start}, {end}] decreases"
            )));
        }
        if !self.ease.is_monotonic() {
            return Err(FramewiseError::malformed(format!(
                "channel '{channel}': accumulation entry {index} uses overshooting ease '{}'",
                self.ease.name()
            )));
        }
        if self.before == BeforeWindow::Zero && start < 0.0 {
            return Err(FramewiseError::malformed(format!(
                "channel '{channel}': accumulation entry {index} starts below zero ({start}); \
                 use `before: start`"
            )));
        }
        Ok(())
    }
}

/// Ordered, non-empty list of entries combined by maximum.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AccumulationGroup {
    entries: Vec<AccumulationEntry>,
}

impl AccumulationGroup {
    /// Create a validated group. `channel` only labels error messages.
    pub fn new(channel: &str, entries: Vec<AccumulationEntry>) -> FramewiseResult<Self> {
        if entries.is_empty() {
            return Err(FramewiseError::malformed(format!(
                "channel '{channel}': accumulation group has no entries"
            )));
        }
        for (i, entry) in entries.iter().enumerate() {
            entry.validate(channel, i)?;
        }
        Ok(Self { entries })
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[AccumulationEntry] {
        &self.entries
    }

    /// Combined value at `progress`: the maximum candidate across entries.
    ///
    /// Fails with the index of the first entry whose candidate is not a finite number.
    pub fn accumulate(&self, progress: f64) -> Result<f64, usize> {
        let mut out = f64::NEG_INFINITY;
        for (i, entry) in self.entries.iter().enumerate() {
            let v = entry.candidate(progress);
            if !v.is_finite() {
                return Err(i);
            }
            out = out.max(v);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/accumulate.rs"]
mod tests;
