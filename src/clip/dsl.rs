use std::collections::BTreeMap;

use crate::{
    animation::{
        accumulate::AccumulationEntry, ease::Ease, looping::LoopSpec, stage::Stage, wave::Wave,
    },
    clip::model::{ChannelDef, ChannelKindDef, Clip, ClipDef, ClockDef, StageRef},
    foundation::{
        core::{Fps, Timeline},
        error::{FramewiseError, FramewiseResult},
    },
};

/// Programmatic counterpart of a JSON [`ClipDef`].
pub struct ClipBuilder {
    timeline: Timeline,
    stage_sets: BTreeMap<String, Vec<Stage>>,
    channels: Vec<ChannelDef>,
}

impl ClipBuilder {
    /// Start an empty clip of `total_frames` at `fps`.
    pub fn new(total_frames: u64, fps: Fps) -> Self {
        Self {
            timeline: Timeline { total_frames, fps },
            stage_sets: BTreeMap::new(),
            channels: Vec::new(),
        }
    }

    /// Add a named stage set. Names must be unique.
    pub fn stage_set(
        mut self,
        name: impl Into<String>,
        stages: Vec<Stage>,
    ) -> FramewiseResult<Self> {
        let name = name.into();
        if self.stage_sets.contains_key(&name) {
            return Err(FramewiseError::malformed(format!("duplicate stage set '{name}'")));
        }
        self.stage_sets.insert(name, stages);
        Ok(self)
    }

    /// Append a channel.
    pub fn channel(mut self, channel: ChannelBuilder) -> Self {
        self.channels.push(channel.build());
        self
    }

    /// Unvalidated definition, e.g. for writing JSON.
    pub fn into_def(self) -> ClipDef {
        ClipDef {
            timeline: self.timeline,
            stage_sets: self.stage_sets,
            channels: self.channels,
        }
    }

    /// Validate into a [`Clip`].
    pub fn build(self) -> FramewiseResult<Clip> {
        Clip::new(self.into_def())
    }
}

/// Builder for a single [`ChannelDef`].
pub struct ChannelBuilder {
    name: String,
    clock: ClockDef,
    kind: ChannelKindDef,
    clamp: Option<[f64; 2]>,
}

impl ChannelBuilder {
    fn with_kind(name: impl Into<String>, kind: ChannelKindDef) -> Self {
        Self {
            name: name.into(),
            clock: ClockDef::default(),
            kind,
            clamp: None,
        }
    }

    /// Keyframe channel over `inputs -> outputs`.
    pub fn keyframes(name: impl Into<String>, inputs: Vec<f64>, outputs: Vec<f64>) -> Self {
        Self::with_kind(
            name,
            ChannelKindDef::Keyframes {
                inputs,
                outputs,
                ease: Ease::Linear,
            },
        )
    }

    /// Two-breakpoint keyframe channel.
    pub fn linear(name: impl Into<String>, input: [f64; 2], output: [f64; 2]) -> Self {
        Self::keyframes(name, input.to_vec(), output.to_vec())
    }

    /// Accumulation channel.
    pub fn accumulate(name: impl Into<String>, entries: Vec<AccumulationEntry>) -> Self {
        Self::with_kind(name, ChannelKindDef::Accumulate { entries })
    }

    /// Wave channel.
    pub fn wave(name: impl Into<String>, wave: Wave) -> Self {
        Self::with_kind(name, ChannelKindDef::Wave(wave))
    }

    /// Text channel naming the active stage of `stage_set`.
    pub fn stage_name(name: impl Into<String>, stage_set: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            ChannelKindDef::StageName {
                stage_set: stage_set.into(),
            },
        )
    }

    /// Constant channel.
    pub fn constant(name: impl Into<String>, value: f64) -> Self {
        Self::with_kind(name, ChannelKindDef::Constant { value })
    }

    /// Set the keyframe easing. No effect on other kinds.
    pub fn ease(mut self, e: Ease) -> Self {
        if let ChannelKindDef::Keyframes { ease, .. } = &mut self.kind {
            *ease = e;
        }
        self
    }

    /// Drive the channel from a cyclic clock.
    pub fn looping(mut self, looping: LoopSpec) -> Self {
        self.clock.looping = Some(looping);
        self
    }

    /// Progress local to the active stage of `set`.
    pub fn stage_clock(mut self, set: impl Into<String>) -> Self {
        self.clock.stage = Some(StageRef {
            set: set.into(),
            stage: None,
        });
        self
    }

    /// Progress local to the named stage of `set`.
    pub fn in_stage(mut self, set: impl Into<String>, stage: impl Into<String>) -> Self {
        self.clock.stage = Some(StageRef {
            set: set.into(),
            stage: Some(stage.into()),
        });
        self
    }

    /// Clamp the final value to `[lo, hi]`.
    pub fn clamp(mut self, lo: f64, hi: f64) -> Self {
        self.clamp = Some([lo, hi]);
        self
    }

    /// Finish the definition. Validation happens in [`Clip::new`].
    pub fn build(self) -> ChannelDef {
        ChannelDef {
            name: self.name,
            clock: self.clock,
            kind: self.kind,
            clamp: self.clamp,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/dsl.rs"]
mod tests;
