//! Ready-made clip definitions reproducing common motion-graphics timings.

use crate::{
    animation::{
        accumulate::AccumulationEntry,
        ease::Ease,
        looping::LoopSpec,
        stage::{Stage, StageSet},
        wave::Wave,
    },
    clip::{
        dsl::{ChannelBuilder, ClipBuilder},
        model::{Clip, ClipDef},
    },
    foundation::{core::Fps, error::FramewiseResult},
};

const FPS_30: Fps = Fps { num: 30, den: 1 };

/// Built-in clips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Seed to sprout to tree, with an accumulated stem height.
    TreeGrowth,
    /// Five overlapping steps climbing to a caption.
    Staircase,
    /// A two-beat infinity symbol drawn and captioned every 90 frames.
    InfinityLoop,
    /// A rally whose intensity only ever builds.
    PingPongRally,
    /// Four named stages with a stage caption and overshooting title.
    StoryStages,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Preset; 5] = [
        Preset::TreeGrowth,
        Preset::Staircase,
        Preset::InfinityLoop,
        Preset::PingPongRally,
        Preset::StoryStages,
    ];

    /// Stable preset name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TreeGrowth => "tree_growth",
            Self::Staircase => "staircase",
            Self::InfinityLoop => "infinity_loop",
            Self::PingPongRally => "ping_pong_rally",
            Self::StoryStages => "story_stages",
        }
    }

    /// Look a preset up by [`Preset::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Clip definition of this preset.
    pub fn def(self) -> FramewiseResult<ClipDef> {
        let builder = match self {
            Self::TreeGrowth => tree_growth(),
            Self::Staircase => staircase(),
            Self::InfinityLoop => infinity_loop()?,
            Self::PingPongRally => ping_pong_rally(),
            Self::StoryStages => story_stages()?,
        };
        Ok(builder.into_def())
    }

    /// Validated clip of this preset.
    pub fn clip(self) -> FramewiseResult<Clip> {
        Clip::new(self.def()?)
    }
}

fn grow(window: [f64; 2], output: [f64; 2]) -> AccumulationEntry {
    AccumulationEntry::new(window, output).ease(Ease::OutCubic)
}

fn tree_growth() -> ClipBuilder {
    ClipBuilder::new(150, FPS_30)
        .channel(ChannelBuilder::linear("seed_radius", [0.0, 0.3], [0.0, 20.0]).ease(Ease::OutQuad))
        .channel(
            ChannelBuilder::keyframes("seed_opacity", vec![0.0, 0.3, 0.5], vec![0.0, 1.0, 0.3])
                .ease(Ease::OutQuad),
        )
        .channel(ChannelBuilder::accumulate(
            "stem_height",
            vec![
                grow([0.25, 0.55], [0.0, 60.0]),
                grow([0.5, 0.8], [60.0, 120.0]),
                grow([0.75, 1.0], [120.0, 200.0]),
            ],
        ))
        .channel(ChannelBuilder::linear("trunk_width", [0.5, 1.0], [3.0, 12.0]).ease(Ease::OutQuad))
        .channel(ChannelBuilder::linear("leaf_size", [0.4, 0.7], [0.0, 15.0]))
        .channel(ChannelBuilder::linear("branch_length", [0.6, 0.85], [0.0, 40.0]))
        .channel(ChannelBuilder::linear("crown_radius", [0.8, 1.0], [0.0, 100.0]))
        .channel(ChannelBuilder::wave("sway", Wave::new(2.0, 3.0)))
}

fn staircase() -> ClipBuilder {
    ClipBuilder::new(180, FPS_30)
        .channel(
            ChannelBuilder::linear("ground_opacity", [0.0, 0.15], [0.0, 1.0]).ease(Ease::OutQuad),
        )
        .channel(ChannelBuilder::accumulate(
            "climb_height",
            vec![
                grow([0.1, 0.3], [0.0, 40.0]),
                grow([0.25, 0.45], [40.0, 80.0]),
                grow([0.4, 0.6], [80.0, 120.0]),
                grow([0.55, 0.75], [120.0, 160.0]),
                grow([0.7, 0.85], [160.0, 200.0]),
            ],
        ))
        .channel(ChannelBuilder::wave("wobble", Wave::new(3.0, 6.0)))
        .channel(ChannelBuilder::linear("progress_text_opacity", [0.6, 0.75], [0.0, 1.0]))
        .channel(ChannelBuilder::linear("not_text_opacity", [0.75, 0.9], [0.0, 1.0]))
        .channel(ChannelBuilder::keyframes("fade", vec![0.0, 0.9, 1.0], vec![1.0, 1.0, 0.0]))
}

fn infinity_loop() -> FramewiseResult<ClipBuilder> {
    let beat = LoopSpec::repeat(90);
    let cycle = StageSet::from_weights("cycle", [("draw", 7.0), ("text", 3.0)])?;
    Ok(ClipBuilder::new(180, FPS_30)
        .stage_set(cycle.name(), cycle.stages().to_vec())?
        .channel(ChannelBuilder::stage_name("phase", "cycle").looping(beat))
        .channel(
            ChannelBuilder::linear("dash_offset", [0.0, 1.0], [800.0, 0.0])
                .ease(Ease::InOutCubic)
                .looping(beat)
                .in_stage("cycle", "draw"),
        )
        .channel(
            ChannelBuilder::keyframes("glow", vec![0.0, 0.5, 1.0], vec![5.0, 15.0, 12.0])
                .looping(beat),
        )
        .channel(
            ChannelBuilder::keyframes("line_opacity", vec![0.0, 0.1, 1.0], vec![0.0, 0.8, 1.0])
                .looping(beat),
        )
        .channel(
            ChannelBuilder::keyframes(
                "text_opacity",
                vec![0.0, 0.3, 0.7, 1.0],
                vec![0.0, 1.0, 1.0, 0.0],
            )
            .looping(beat)
            .in_stage("cycle", "text"),
        )
        .channel(
            ChannelBuilder::keyframes("text_scale", vec![0.0, 0.2, 1.0], vec![0.9, 1.0, 1.0])
                .ease(Ease::OutBack)
                .looping(beat)
                .in_stage("cycle", "text"),
        )
        .channel(ChannelBuilder::wave("sparkle", Wave::new(0.5, 2.0).offset(1.5)).looping(beat)))
}

fn ping_pong_rally() -> ClipBuilder {
    ClipBuilder::new(180, FPS_30)
        .channel(ChannelBuilder::linear("table_opacity", [0.0, 0.15], [0.0, 1.0]))
        .channel(ChannelBuilder::accumulate(
            "intensity",
            vec![
                grow([0.1, 0.4], [0.0, 50.0]),
                grow([0.3, 0.6], [50.0, 120.0]),
                grow([0.5, 0.8], [120.0, 200.0]),
                grow([0.75, 1.0], [200.0, 300.0]),
            ],
        ))
        .channel(ChannelBuilder::linear("score_left", [0.0, 0.8], [0.0, 8.0]))
        .channel(ChannelBuilder::linear("score_right", [0.0, 0.7], [0.0, 10.0]))
        .channel(ChannelBuilder::wave("ball_x", Wave::new(100.0, 6.0).offset(400.0)))
        .channel(
            ChannelBuilder::linear("ball_y", [0.0, 1.0], [200.0, 250.0])
                .ease(Ease::OutQuad)
                .looping(LoopSpec::ping_pong(15)),
        )
}

fn story_stages() -> FramewiseResult<ClipBuilder> {
    Ok(ClipBuilder::new(150, FPS_30)
        .stage_set(
            "story",
            vec![
                Stage::new("seed", 0.0, 0.2),
                Stage::new("sprout", 0.2, 0.4),
                Stage::new("growing", 0.4, 0.7),
                Stage::new("mighty", 0.7, 1.0),
            ],
        )?
        .channel(ChannelBuilder::stage_name("stage", "story"))
        .channel(
            ChannelBuilder::linear("stage_progress", [0.0, 1.0], [0.0, 1.0]).stage_clock("story"),
        )
        .channel(ChannelBuilder::linear("title_scale", [0.0, 0.15], [0.8, 1.0]).ease(Ease::OutBack))
        .channel(
            ChannelBuilder::linear("badge_opacity", [0.0, 1.0], [0.0, 1.0])
                .ease(Ease::OutElastic)
                .in_stage("story", "sprout")
                .clamp(0.0, 1.0),
        )
        .channel(ChannelBuilder::accumulate(
            "height",
            vec![
                AccumulationEntry::new([0.2, 0.4], [0.0, 30.0]),
                grow([0.4, 0.7], [30.0, 90.0]),
                grow([0.7, 1.0], [90.0, 160.0]),
            ],
        ))
        .channel(ChannelBuilder::constant("ground_y", 520.0)))
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
