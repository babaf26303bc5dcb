//! Framewise is a deterministic, frame-indexed animation evaluator for procedural motion-graphics
//! clips.
//!
//! A clip is a timeline (total frames and a frame rate), a few named stage sets and a list of
//! channels. Asking for frame `t` returns the value of every channel at `t`; nothing is cached
//! between calls, so frames can be evaluated in any order or in parallel.
//!
//! # Pipeline overview
//!
//! 1. **Define**: [`ClipDef`] from JSON, or [`ClipBuilder`] in code
//! 2. **Validate**: [`Clip::new`] resolves references and checks every range once
//! 3. **Evaluate**: [`Evaluator::eval_frame`] maps `(clip, t)` to [`FrameValues`]
//! 4. **Batch** (optional): [`eval_frames_with_stats`] over a frame range, on a rayon pool
//!
//! Channel values are built from a small library: clamped range mapping ([`map_range`],
//! [`KeyframeRange`]), named easing curves ([`Ease`]), stage lookup ([`StageSet::locate`]),
//! monotonic accumulation ([`AccumulationGroup`]), loop clocks ([`loop_progress`],
//! [`LoopSpec`]) and sinusoids ([`Wave`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod clip;
mod eval;
mod foundation;

pub mod presets;

pub use animation::accumulate::{AccumulationEntry, AccumulationGroup, BeforeWindow};
pub use animation::ease::Ease;
pub use animation::looping::{LoopMode, LoopSpec, loop_progress};
pub use animation::range::{KeyframeRange, map_range};
pub use animation::stage::{Stage, StageLocation, StageSet};
pub use animation::wave::Wave;
pub use clip::dsl::{ChannelBuilder, ClipBuilder};
pub use clip::model::{ChannelDef, ChannelKindDef, Clip, ClipDef, ClockDef, StageRef};
pub use eval::evaluator::{ChannelValue, Evaluator, FrameValues};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_sequence, fingerprint_values};
pub use eval::pipeline::{EvalStats, EvalThreading, eval_all, eval_frames, eval_frames_with_stats};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Timeline};
pub use foundation::error::{FramewiseError, FramewiseResult};
pub use presets::Preset;
