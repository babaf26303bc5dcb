use std::collections::BTreeMap;

use crate::{
    clip::model::{Channel, ChannelKind, Clip, Clock},
    foundation::{
        core::FrameIndex,
        error::{FramewiseError, FramewiseResult},
    },
};

/// Value of one channel at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    /// Numeric channel value.
    Scalar(f64),
    /// Textual channel value, e.g. a stage name.
    Text(String),
}

impl ChannelValue {
    /// Numeric value, if this is a scalar.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Every channel of a clip evaluated at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameValues {
    /// Evaluated frame.
    pub frame: FrameIndex,
    /// Global progress `frame / total_frames`.
    pub progress: f64,
    /// Frame time in seconds.
    pub seconds: f64,
    /// Channel values keyed by channel name.
    pub values: BTreeMap<String, ChannelValue>,
}

impl FrameValues {
    /// Value of channel `name`.
    pub fn get(&self, name: &str) -> Option<&ChannelValue> {
        self.values.get(name)
    }

    /// Scalar value of channel `name`.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ChannelValue::scalar)
    }

    /// Text value of channel `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ChannelValue::text)
    }
}

/// Stateless frame evaluator.
///
/// Every value is re-derived from the frame index alone; frames may be requested in any order,
/// repeatedly, or from several threads at once.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate all channels of `clip` at `frame`.
    ///
    /// Frames outside `[0, total_frames)` are rejected rather than clamped.
    #[tracing::instrument(skip(clip))]
    pub fn eval_frame(clip: &Clip, frame: FrameIndex) -> FramewiseResult<FrameValues> {
        let timeline = clip.timeline();
        if !timeline.contains(frame) {
            return Err(FramewiseError::out_of_range(frame, timeline.total_frames));
        }

        let progress = timeline.progress(frame);
        let mut values = BTreeMap::new();
        for channel in clip.channels() {
            let value = eval_channel(channel, frame, progress)?;
            values.insert(channel.name.clone(), value);
        }

        Ok(FrameValues {
            frame,
            progress,
            seconds: timeline.seconds(frame),
            values,
        })
    }

    /// Evaluate a single channel of `clip` at `frame`.
    pub fn eval_channel(
        clip: &Clip,
        name: &str,
        frame: FrameIndex,
    ) -> FramewiseResult<ChannelValue> {
        let timeline = clip.timeline();
        if !timeline.contains(frame) {
            return Err(FramewiseError::out_of_range(frame, timeline.total_frames));
        }
        let channel = clip
            .channels()
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| FramewiseError::malformed(format!("unknown channel '{name}'")))?;
        eval_channel(channel, frame, timeline.progress(frame))
    }
}

fn base_progress(clock: &Clock, frame: FrameIndex, global: f64) -> f64 {
    clock.looping.map_or(global, |l| l.progress(frame))
}

fn clock_progress(clock: &Clock, frame: FrameIndex, global: f64) -> f64 {
    let base = base_progress(clock, frame, global);
    match &clock.stage {
        None => base,
        Some(sc) => match sc.stage.and_then(|i| sc.set.stages().get(i)) {
            Some(stage) => stage.local_progress(base),
            None => sc.set.locate(base).local_progress,
        },
    }
}

fn eval_channel(
    channel: &Channel,
    frame: FrameIndex,
    global: f64,
) -> FramewiseResult<ChannelValue> {
    let p = clock_progress(&channel.clock, frame, global);
    let v = match &channel.kind {
        ChannelKind::StageName(set) => {
            let base = base_progress(&channel.clock, frame, global);
            return Ok(ChannelValue::Text(set.locate(base).stage.name.clone()));
        }
        ChannelKind::Keyframes { range, ease } => range.sample(p, *ease),
        ChannelKind::Accumulate(group) => match group.accumulate(p) {
            Ok(v) => v,
            Err(entry) => {
                return Err(FramewiseError::UndefinedAccumulatorEntry {
                    channel: channel.name.clone(),
                    entry,
                    frame,
                });
            }
        },
        ChannelKind::Wave(wave) => wave.value(p),
        ChannelKind::Constant(v) => *v,
    };
    let v = match channel.clamp {
        Some([lo, hi]) => v.clamp(lo, hi),
        None => v,
    };
    Ok(ChannelValue::Scalar(v))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
