use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(
        FrameRange::new(FrameIndex(3), FrameIndex(3))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn fps_frames_to_secs_uses_rational_rate() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frames_to_secs(30000) - 1001.0).abs() < 1e-9);
    assert!((Fps::new(30, 1).unwrap().frames_to_secs(45) - 1.5).abs() < 1e-12);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn timeline_progress_and_seconds() {
    let tl = Timeline::new(150, Fps::new(30, 1).unwrap()).unwrap();
    assert_eq!(tl.progress(FrameIndex(0)), 0.0);
    assert_eq!(tl.progress(FrameIndex(75)), 0.5);
    assert!(tl.progress(FrameIndex(149)) < 1.0);
    assert!((tl.seconds(FrameIndex(60)) - 2.0).abs() < 1e-12);
    assert!((tl.duration_secs() - 5.0).abs() < 1e-12);
    assert!(tl.contains(FrameIndex(149)));
    assert!(!tl.contains(FrameIndex(150)));
    assert_eq!(tl.range().len_frames(), 150);
}

#[test]
fn timeline_requires_frames() {
    let err = Timeline::new(0, Fps::new(30, 1).unwrap()).unwrap_err();
    assert!(err.to_string().contains("total_frames"));
}
