use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::{
        accumulate::{AccumulationEntry, AccumulationGroup},
        ease::Ease,
        looping::LoopSpec,
        range::KeyframeRange,
        stage::{Stage, StageSet},
        wave::Wave,
    },
    foundation::{
        core::Timeline,
        error::{FramewiseError, FramewiseResult},
    },
};

/// JSON-facing clip definition.
///
/// This is the human-edited boundary representation. It is checked once by [`Clip::new`] and
/// never consulted again during evaluation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipDef {
    /// Clip length and frame rate.
    pub timeline: Timeline,
    /// Named stage sets, referenced by channel clocks and stage-name channels.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stage_sets: BTreeMap<String, Vec<Stage>>,
    /// Channels in declaration order.
    pub channels: Vec<ChannelDef>,
}

/// One named output of a clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChannelDef {
    /// Channel name, unique within the clip.
    pub name: String,
    /// Progress source. Defaults to global clip progress.
    #[serde(default, skip_serializing_if = "ClockDef::is_global")]
    pub clock: ClockDef,
    /// How the clock's progress becomes a value.
    pub kind: ChannelKindDef,
    /// Optional `[lo, hi]` bounds applied after easing and mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamp: Option<[f64; 2]>,
}

/// Progress source for a channel.
///
/// With neither field set the clock is global progress `t / total_frames`. `looping` swaps that
/// for cycle progress; `stage` then re-normalizes whichever progress is in effect to a stage.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClockDef {
    /// Cyclic clock replacing global progress.
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<LoopSpec>,
    /// Stage-local re-normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageRef>,
}

impl ClockDef {
    /// Return `true` when the clock is plain global progress.
    pub fn is_global(&self) -> bool {
        self.looping.is_none() && self.stage.is_none()
    }
}

/// Reference to a stage set, and optionally to one stage in it.
///
/// Without `stage`, progress is local to whichever stage is active. With `stage`, progress is
/// local to that named stage for the whole clip (`0` before it, `1` after it).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageRef {
    /// Stage set name.
    pub set: String,
    /// Specific stage name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

/// Channel kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKindDef {
    /// Keyframe range sampled at the clock's progress.
    Keyframes {
        /// Input breakpoints, non-decreasing.
        inputs: Vec<f64>,
        /// Output breakpoints, same length as `inputs`.
        outputs: Vec<f64>,
        /// Per-segment easing.
        #[serde(default)]
        ease: Ease,
    },
    /// Maximum over windowed growth entries.
    Accumulate {
        /// Entries in declaration order.
        entries: Vec<AccumulationEntry>,
    },
    /// Sinusoid over the clock's progress.
    Wave(Wave),
    /// Name of the active stage of a set, as text.
    StageName {
        /// Stage set name.
        stage_set: String,
    },
    /// Fixed value.
    Constant {
        /// The value.
        value: f64,
    },
}

impl ClipDef {
    /// Parse a clip definition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramewiseResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramewiseError::serde(format!("parse clip JSON: {e}")))
    }

    /// Parse a clip definition from a JSON string.
    pub fn from_json_str(s: &str) -> FramewiseResult<Self> {
        serde_json::from_str(s).map_err(|e| FramewiseError::serde(format!("parse clip JSON: {e}")))
    }

    /// Parse a clip definition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FramewiseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramewiseError::serde(format!("open clip JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> FramewiseResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FramewiseError::serde(format!("serialize clip JSON: {e}")))
    }
}

/// Validated, immutable clip ready for evaluation.
///
/// Every reference is resolved and every range checked at construction, so evaluation only
/// fails for out-of-range frames or non-finite accumulation candidates.
#[derive(Clone, Debug)]
pub struct Clip {
    def: ClipDef,
    timeline: Timeline,
    stage_sets: BTreeMap<String, StageSet>,
    channels: Vec<Channel>,
}

#[derive(Clone, Debug)]
pub(crate) struct Channel {
    pub(crate) name: String,
    pub(crate) clock: Clock,
    pub(crate) kind: ChannelKind,
    pub(crate) clamp: Option<[f64; 2]>,
}

#[derive(Clone, Debug)]
pub(crate) struct Clock {
    pub(crate) looping: Option<LoopSpec>,
    pub(crate) stage: Option<StageClock>,
}

#[derive(Clone, Debug)]
pub(crate) struct StageClock {
    pub(crate) set: StageSet,
    pub(crate) stage: Option<usize>,
}

#[derive(Clone, Debug)]
pub(crate) enum ChannelKind {
    Keyframes { range: KeyframeRange, ease: Ease },
    Accumulate(AccumulationGroup),
    Wave(Wave),
    StageName(StageSet),
    Constant(f64),
}

impl Clip {
    /// Validate `def` and resolve its references.
    pub fn new(def: ClipDef) -> FramewiseResult<Self> {
        def.timeline.validate()?;

        let mut stage_sets = BTreeMap::new();
        for (name, stages) in &def.stage_sets {
            if name.trim().is_empty() {
                return Err(FramewiseError::malformed("stage set name must be non-empty"));
            }
            stage_sets.insert(name.clone(), StageSet::new(name.clone(), stages.clone())?);
        }

        let mut channels = Vec::with_capacity(def.channels.len());
        for (i, ch) in def.channels.iter().enumerate() {
            if ch.name.trim().is_empty() {
                return Err(FramewiseError::malformed(format!("channel {i} has an empty name")));
            }
            if def.channels[..i].iter().any(|c| c.name == ch.name) {
                return Err(FramewiseError::malformed(format!("duplicate channel '{}'", ch.name)));
            }
            let channel = compile_channel(ch, &stage_sets).map_err(|e| in_channel(&ch.name, e))?;
            channels.push(channel);
        }

        tracing::debug!(
            channels = channels.len(),
            stage_sets = stage_sets.len(),
            total_frames = def.timeline.total_frames,
            "clip validated"
        );

        Ok(Self {
            timeline: def.timeline,
            def,
            stage_sets,
            channels,
        })
    }

    /// Parse and validate a clip from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FramewiseResult<Self> {
        Self::new(ClipDef::from_path(path)?)
    }

    /// Parse and validate a clip from a JSON string.
    pub fn from_json_str(s: &str) -> FramewiseResult<Self> {
        Self::new(ClipDef::from_json_str(s)?)
    }

    /// The definition this clip was built from.
    pub fn def(&self) -> &ClipDef {
        &self.def
    }

    /// Clip timeline.
    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    /// Look up a validated stage set.
    pub fn stage_set(&self, name: &str) -> Option<&StageSet> {
        self.stage_sets.get(name)
    }

    /// Channel names in declaration order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    pub(crate) fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

fn compile_channel(
    ch: &ChannelDef,
    stage_sets: &BTreeMap<String, StageSet>,
) -> FramewiseResult<Channel> {
    if let Some(looping) = &ch.clock.looping {
        looping.validate()?;
    }

    let stage = match &ch.clock.stage {
        None => None,
        Some(r) => {
            let set = lookup_set(stage_sets, &r.set)?;
            let stage = match &r.stage {
                None => None,
                Some(name) => Some(
                    set.stages()
                        .iter()
                        .position(|s| &s.name == name)
                        .ok_or_else(|| {
                            FramewiseError::malformed(format!(
                                "stage set '{}' has no stage '{name}'",
                                r.set
                            ))
                        })?,
                ),
            };
            Some(StageClock {
                set: set.clone(),
                stage,
            })
        }
    };

    let kind = match &ch.kind {
        ChannelKindDef::Keyframes {
            inputs,
            outputs,
            ease,
        } => ChannelKind::Keyframes {
            range: KeyframeRange::new(inputs.clone(), outputs.clone())?,
            ease: *ease,
        },
        ChannelKindDef::Accumulate { entries } => {
            if let Some(StageClock { stage: None, .. }) = &stage {
                return Err(FramewiseError::malformed(
                    "accumulation channels cannot follow the active stage; name a stage",
                ));
            }
            ChannelKind::Accumulate(AccumulationGroup::new(&ch.name, entries.clone())?)
        }
        ChannelKindDef::Wave(wave) => {
            wave.validate()?;
            ChannelKind::Wave(*wave)
        }
        ChannelKindDef::StageName { stage_set } => {
            let set = lookup_set(stage_sets, stage_set)?;
            if stage.is_some() {
                return Err(FramewiseError::malformed(
                    "stage name channels cannot use a stage clock",
                ));
            }
            if ch.clamp.is_some() {
                return Err(FramewiseError::malformed("stage name channels cannot be clamped"));
            }
            ChannelKind::StageName(set.clone())
        }
        ChannelKindDef::Constant { value } => {
            if !value.is_finite() {
                return Err(FramewiseError::malformed(format!(
                    "constant value must be finite, got {value}"
                )));
            }
            ChannelKind::Constant(*value)
        }
    };

    if let Some([lo, hi]) = ch.clamp
        && !(lo.is_finite() && hi.is_finite() && lo <= hi)
    {
        return Err(FramewiseError::malformed(format!(
            "clamp [{lo}, {hi}] must be finite with lo <= hi"
        )));
    }

    Ok(Channel {
        name: ch.name.clone(),
        clock: Clock {
            looping: ch.clock.looping,
            stage,
        },
        kind,
        clamp: ch.clamp,
    })
}

fn lookup_set<'a>(
    stage_sets: &'a BTreeMap<String, StageSet>,
    name: &str,
) -> FramewiseResult<&'a StageSet> {
    stage_sets
        .get(name)
        .ok_or_else(|| FramewiseError::malformed(format!("unknown stage set '{name}'")))
}

fn in_channel(channel: &str, err: FramewiseError) -> FramewiseError {
    match err {
        FramewiseError::MalformedConfiguration(msg) if msg.starts_with("channel '") => {
            FramewiseError::MalformedConfiguration(msg)
        }
        FramewiseError::MalformedConfiguration(msg) => {
            FramewiseError::malformed(format!("channel '{channel}': {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/model.rs"]
mod tests;
