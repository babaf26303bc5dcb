use super::*;
use crate::foundation::core::Fps;

const GROWTH_JSON: &str = include_str!("../../data/growth_clip.json");

fn timeline() -> Timeline {
    Timeline {
        total_frames: 90,
        fps: Fps { num: 30, den: 1 },
    }
}

fn channel(name: &str, kind: ChannelKindDef) -> ChannelDef {
    ChannelDef {
        name: name.to_string(),
        clock: ClockDef::default(),
        kind,
        clamp: None,
    }
}

fn def(channels: Vec<ChannelDef>) -> ClipDef {
    ClipDef {
        timeline: timeline(),
        stage_sets: BTreeMap::from([(
            "story".to_string(),
            vec![Stage::new("intro", 0.0, 0.5), Stage::new("outro", 0.5, 1.0)],
        )]),
        channels,
    }
}

fn malformed_message(def: ClipDef) -> String {
    match Clip::new(def) {
        Err(FramewiseError::MalformedConfiguration(msg)) => msg,
        other => panic!("expected malformed configuration, got {other:?}"),
    }
}

#[test]
fn parses_and_validates_fixture() {
    let def = ClipDef::from_json_str(GROWTH_JSON).unwrap();
    assert_eq!(def.timeline.total_frames, 120);
    assert_eq!(def.channels.len(), 6);
    assert_eq!(def.channels[3].clock.looping, Some(LoopSpec::repeat(30)));

    let clip = Clip::new(def).unwrap();
    let names: Vec<&str> = clip.channel_names().collect();
    assert_eq!(
        names,
        ["stage", "opacity", "height", "pulse", "sprout_pop", "ground"]
    );
    assert_eq!(clip.stage_set("story").unwrap().stages().len(), 3);
    assert!(clip.stage_set("missing").is_none());
}

#[test]
fn json_round_trip_preserves_definition() {
    let def = ClipDef::from_json_str(GROWTH_JSON).unwrap();
    let s = def.to_json_pretty().unwrap();
    let de = ClipDef::from_json_str(&s).unwrap();
    assert_eq!(de, def);
    assert!(!s.contains("\"clock\": {}"));
}

#[test]
fn reader_and_path_agree() {
    let from_reader = ClipDef::from_reader(GROWTH_JSON.as_bytes()).unwrap();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/growth_clip.json");
    let from_path = ClipDef::from_path(path).unwrap();
    assert_eq!(from_reader, from_path);
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = ClipDef::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, FramewiseError::Serde(_)));
    let err = ClipDef::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("here.json"));
}

#[test]
fn rejects_zero_length_timeline() {
    let mut d = def(vec![]);
    d.timeline.total_frames = 0;
    assert!(malformed_message(d).contains("total_frames"));
}

#[test]
fn rejects_duplicate_channel_names() {
    let msg = malformed_message(def(vec![
        channel("a", ChannelKindDef::Constant { value: 1.0 }),
        channel("a", ChannelKindDef::Constant { value: 2.0 }),
    ]));
    assert!(msg.contains("duplicate channel 'a'"), "{msg}");
}

#[test]
fn keyframe_errors_name_channel_and_breakpoint() {
    let msg = malformed_message(def(vec![channel(
        "scale",
        ChannelKindDef::Keyframes {
            inputs: vec![0.0, 0.8, 0.5],
            outputs: vec![0.0, 1.0, 2.0],
            ease: Ease::Linear,
        },
    )]));
    assert!(msg.starts_with("channel 'scale':"), "{msg}");
    assert!(msg.contains("breakpoint 2"), "{msg}");
}

#[test]
fn accumulation_errors_name_channel_once() {
    let msg = malformed_message(def(vec![channel(
        "height",
        ChannelKindDef::Accumulate {
            entries: vec![AccumulationEntry::new([0.0, 0.5], [10.0, 0.0])],
        },
    )]));
    assert_eq!(msg.matches("channel 'height'").count(), 1, "{msg}");
    assert!(msg.contains("entry 0"), "{msg}");
}

#[test]
fn accumulation_requires_a_named_stage_clock() {
    let grow = || ChannelKindDef::Accumulate {
        entries: vec![AccumulationEntry::new([0.0, 1.0], [0.0, 10.0])],
    };

    let mut ch = channel("height", grow());
    ch.clock.stage = Some(StageRef {
        set: "story".to_string(),
        stage: None,
    });
    let msg = malformed_message(def(vec![ch]));
    assert!(msg.contains("channel 'height'"), "{msg}");
    assert!(msg.contains("active stage"), "{msg}");

    let mut ch = channel("height", grow());
    ch.clock.stage = Some(StageRef {
        set: "story".to_string(),
        stage: Some("outro".to_string()),
    });
    assert!(Clip::new(def(vec![ch])).is_ok());
}

#[test]
fn keyframe_output_overflow_is_rejected() {
    let msg = malformed_message(def(vec![channel(
        "sweep",
        ChannelKindDef::Keyframes {
            inputs: vec![0.0, 1.0],
            outputs: vec![-1e308, 1e308],
            ease: Ease::Linear,
        },
    )]));
    assert!(msg.contains("channel 'sweep'"), "{msg}");
    assert!(msg.contains("overflows"), "{msg}");
}

#[test]
fn huge_ping_pong_period_evaluates() {
    let mut ch = channel(
        "bounce",
        ChannelKindDef::Keyframes {
            inputs: vec![0.0, 1.0],
            outputs: vec![0.0, 1.0],
            ease: Ease::Linear,
        },
    );
    ch.clock.looping = Some(LoopSpec::ping_pong(u64::MAX));
    let clip = Clip::new(def(vec![ch])).unwrap();
    let v = crate::Evaluator::eval_channel(&clip, "bounce", crate::FrameIndex(5))
        .unwrap()
        .scalar()
        .unwrap();
    assert_eq!(v, 5.0 / u64::MAX as f64);
}

#[test]
fn rejects_unknown_stage_references() {
    let mut ch = channel("x", ChannelKindDef::Constant { value: 0.0 });
    ch.clock.stage = Some(StageRef {
        set: "nope".to_string(),
        stage: None,
    });
    assert!(malformed_message(def(vec![ch])).contains("unknown stage set 'nope'"));

    let mut ch = channel("x", ChannelKindDef::Constant { value: 0.0 });
    ch.clock.stage = Some(StageRef {
        set: "story".to_string(),
        stage: Some("middle".to_string()),
    });
    assert!(malformed_message(def(vec![ch])).contains("no stage 'middle'"));

    let ch = channel(
        "label",
        ChannelKindDef::StageName {
            stage_set: "nope".to_string(),
        },
    );
    assert!(malformed_message(def(vec![ch])).contains("channel 'label'"));
}

#[test]
fn stage_name_channel_rejects_stage_clock_and_clamp() {
    let mut ch = channel(
        "label",
        ChannelKindDef::StageName {
            stage_set: "story".to_string(),
        },
    );
    ch.clock.stage = Some(StageRef {
        set: "story".to_string(),
        stage: None,
    });
    assert!(malformed_message(def(vec![ch])).contains("stage clock"));

    let mut ch = channel(
        "label",
        ChannelKindDef::StageName {
            stage_set: "story".to_string(),
        },
    );
    ch.clamp = Some([0.0, 1.0]);
    assert!(malformed_message(def(vec![ch])).contains("cannot be clamped"));
}

#[test]
fn rejects_bad_clamp_loop_and_constant() {
    let mut ch = channel("x", ChannelKindDef::Constant { value: 0.0 });
    ch.clamp = Some([1.0, 0.0]);
    assert!(malformed_message(def(vec![ch])).contains("clamp"));

    let mut ch = channel("x", ChannelKindDef::Constant { value: 0.0 });
    ch.clock.looping = Some(LoopSpec::repeat(0));
    assert!(malformed_message(def(vec![ch])).contains("period_frames"));

    let ch = channel("x", ChannelKindDef::Constant { value: f64::NAN });
    assert!(malformed_message(def(vec![ch])).contains("finite"));

    let ch = channel("x", ChannelKindDef::Wave(Wave::new(1.0, f64::NAN)));
    assert!(malformed_message(def(vec![ch])).contains("cycles"));
}

#[test]
fn rejects_invalid_stage_sets() {
    let mut d = def(vec![]);
    d.stage_sets.insert("empty".to_string(), vec![]);
    assert!(malformed_message(d).contains("'empty' has no stages"));
}

#[test]
fn clip_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Clip>();
}
