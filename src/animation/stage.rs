use crate::foundation::error::{FramewiseError, FramewiseResult};

/// Named, time-bounded phase of a clip.
///
/// Bounds are expressed in progress units: `start` in `[0, 1)`, `end` in `(start, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    /// Stage name, unique within its set.
    pub name: String,
    /// Inclusive start progress.
    pub start: f64,
    /// Exclusive end progress.
    pub end: f64,
}

impl Stage {
    /// Create a stage without validation; see [`StageSet::new`].
    pub fn new(name: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Return `true` when `progress` is inside `[start, end)`.
    pub fn contains(&self, progress: f64) -> bool {
        self.start <= progress && progress < self.end
    }

    /// Progress re-normalized to this stage, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        ((progress - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    fn validate(&self, set: &str) -> FramewiseResult<()> {
        if self.name.trim().is_empty() {
            return Err(FramewiseError::malformed(format!(
                "stage set '{set}' contains a stage with an empty name"
            )));
        }
        if !(self.start.is_finite() && (0.0..1.0).contains(&self.start)) {
            return Err(FramewiseError::malformed(format!(
                "stage '{}' in set '{set}' must start in [0, 1), got {}",
                self.name, self.start
            )));
        }
        if !(self.end.is_finite() && self.end > self.start && self.end <= 1.0) {
            return Err(FramewiseError::malformed(format!(
                "stage '{}' in set '{set}' must end in ({}, 1], got {}",
                self.name, self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Result of [`StageSet::locate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageLocation<'a> {
    /// Position of the stage within its set.
    pub index: usize,
    /// The resolved stage.
    pub stage: &'a Stage,
    /// Progress within the stage, in `[0, 1]`.
    pub local_progress: f64,
}

/// Ordered, non-empty sequence of stages.
///
/// Gaps, overlaps and out-of-order stages are all accepted; [`StageSet::locate`] resolves them
/// deterministically.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StageSet {
    name: String,
    stages: Vec<Stage>,
}

impl StageSet {
    /// Create a validated stage set.
    pub fn new(name: impl Into<String>, stages: Vec<Stage>) -> FramewiseResult<Self> {
        let set = Self {
            name: name.into(),
            stages,
        };
        set.validate()?;
        Ok(set)
    }

    /// Split `[0, 1)` into consecutive stages with the given relative weights.
    pub fn from_weights<S: Into<String>>(
        name: impl Into<String>,
        weights: impl IntoIterator<Item = (S, f64)>,
    ) -> FramewiseResult<Self> {
        let name = name.into();
        let weights: Vec<(String, f64)> = weights.into_iter().map(|(n, w)| (n.into(), w)).collect();
        if let Some((n, w)) = weights.iter().find(|(_, w)| !(w.is_finite() && *w > 0.0)) {
            return Err(FramewiseError::malformed(format!(
                "stage '{n}' in set '{name}' has non-positive weight {w}"
            )));
        }
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        let mut acc = 0.0;
        let mut stages = Vec::with_capacity(weights.len());
        let last = weights.len().saturating_sub(1);
        for (i, (n, w)) in weights.into_iter().enumerate() {
            let start = acc / total;
            acc += w;
            let end = if i == last { 1.0 } else { acc / total };
            stages.push(Stage::new(n, start, end));
        }
        Self::new(name, stages)
    }

    /// Check the set is non-empty, stage names are unique and bounds are well-formed.
    pub fn validate(&self) -> FramewiseResult<()> {
        if self.stages.is_empty() {
            return Err(FramewiseError::malformed(format!(
                "stage set '{}' has no stages",
                self.name
            )));
        }
        for (i, stage) in self.stages.iter().enumerate() {
            stage.validate(&self.name)?;
            if self.stages[..i].iter().any(|s| s.name == stage.name) {
                return Err(FramewiseError::malformed(format!(
                    "stage set '{}' has duplicate stage '{}'",
                    self.name, stage.name
                )));
            }
        }
        Ok(())
    }

    /// Set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stages in declaration order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Find a stage by name.
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Resolve `progress` to a stage and its local progress.
    ///
    /// 1. The first stage (scan order) containing `progress` wins.
    /// 2. Otherwise the nearest stage ending at or before `progress` is returned, finished.
    /// 3. Otherwise `progress` precedes every stage: the earliest stage is returned, not started.
    pub fn locate(&self, progress: f64) -> StageLocation<'_> {
        if let Some((index, stage)) = self
            .stages
            .iter()
            .enumerate()
            .find(|(_, s)| s.contains(progress))
        {
            return StageLocation {
                index,
                stage,
                local_progress: stage.local_progress(progress),
            };
        }

        let preceding = self
            .stages
            .iter()
            .enumerate()
            .filter(|(_, s)| s.end <= progress)
            .fold(None::<(usize, &Stage)>, |best, (i, s)| match best {
                Some((_, b)) if b.end >= s.end => best,
                _ => Some((i, s)),
            });
        if let Some((index, stage)) = preceding {
            return StageLocation {
                index,
                stage,
                local_progress: 1.0,
            };
        }

        let (index, stage) = self
            .stages
            .iter()
            .enumerate()
            .fold((0, &self.stages[0]), |first, (i, s)| {
                if s.start < first.1.start {
                    (i, s)
                } else {
                    first
                }
            });
        StageLocation {
            index,
            stage,
            local_progress: 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stage.rs"]
mod tests;
