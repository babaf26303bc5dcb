use super::*;

#[test]
fn maps_midpoint() {
    assert_eq!(map_range(0.5, [0.0, 1.0], [0.0, 100.0]), 50.0);
}

#[test]
fn clamps_outside_input_range() {
    let input = [0.2, 0.6];
    let output = [10.0, 30.0];
    for x in [-5.0, 0.0, 0.1, 0.19] {
        assert_eq!(map_range(x, input, output), map_range(0.2, input, output));
    }
    for x in [0.61, 0.9, 1.0, 42.0] {
        assert_eq!(map_range(x, input, output), map_range(0.6, input, output));
    }
}

#[test]
fn identity_interpolation() {
    for (a, b) in [(0.0, 1.0), (-3.0, 7.0), (0.25, 0.5)] {
        for i in 0..=20 {
            let x = a + (b - a) * f64::from(i) / 20.0;
            let y = map_range(x, [a, b], [a, b]);
            assert!((y - x).abs() <= 1e-12 * (1.0 + x.abs()), "{x} -> {y}");
        }
    }
}

#[test]
fn decreasing_output_is_supported() {
    assert_eq!(map_range(0.0, [0.0, 1.0], [800.0, 0.0]), 800.0);
    assert_eq!(map_range(1.0, [0.0, 1.0], [800.0, 0.0]), 0.0);
    assert_eq!(map_range(0.25, [0.0, 1.0], [800.0, 0.0]), 600.0);
}

#[test]
fn zero_width_input_is_a_step() {
    assert_eq!(map_range(0.49, [0.5, 0.5], [1.0, 2.0]), 1.0);
    assert_eq!(map_range(0.5, [0.5, 0.5], [1.0, 2.0]), 2.0);
    assert_eq!(map_range(0.9, [0.5, 0.5], [1.0, 2.0]), 2.0);
}

#[test]
fn flat_middle_segment() {
    let kr = KeyframeRange::new(vec![0.0, 0.3, 0.6, 1.0], vec![0.0, 80.0, 80.0, 200.0]).unwrap();
    assert_eq!(kr.sample(0.45, Ease::Linear), 80.0);
    assert_eq!(kr.sample(0.3, Ease::Linear), 80.0);
    assert_eq!(kr.sample(0.6, Ease::Linear), 80.0);
    assert_eq!(kr.sample(1.0, Ease::Linear), 200.0);
    assert!((kr.sample(0.8, Ease::Linear) - 140.0).abs() < 1e-9);
}

#[test]
fn keyframes_clamp_to_first_and_last() {
    let kr = KeyframeRange::new(vec![0.2, 0.5, 0.8], vec![0.0, 1.0, 0.4]).unwrap();
    assert_eq!(kr.sample(-1.0, Ease::OutQuad), 0.0);
    assert_eq!(kr.sample(0.0, Ease::OutQuad), 0.0);
    assert_eq!(kr.sample(0.95, Ease::OutQuad), 0.4);
    assert_eq!(kr.sample(f64::NAN, Ease::Linear), 0.0);
}

#[test]
fn ease_applies_per_segment() {
    let kr = KeyframeRange::linear([0.0, 1.0], [0.0, 20.0]).unwrap();
    let eased = kr.sample(0.5, Ease::OutQuad);
    assert_eq!(eased, 15.0);
    let kr = KeyframeRange::new(vec![0.0, 0.5, 1.0], vec![0.0, 10.0, 20.0]).unwrap();
    assert_eq!(kr.sample(0.25, Ease::InQuad), 2.5);
    assert_eq!(kr.sample(0.75, Ease::InQuad), 12.5);
}

#[test]
fn duplicate_breakpoint_last_segment_wins() {
    let kr = KeyframeRange::new(vec![0.0, 0.5, 0.5, 1.0], vec![0.0, 10.0, 50.0, 100.0]).unwrap();
    assert_eq!(kr.sample(0.5, Ease::Linear), 50.0);
    assert!(kr.sample(0.4999, Ease::Linear) < 10.0);
    assert_eq!(kr.sample(0.75, Ease::Linear), 75.0);
}

#[test]
fn rejects_length_mismatch() {
    let err = KeyframeRange::new(vec![0.0, 1.0], vec![0.0]).unwrap_err();
    assert!(err.to_string().contains("2 input breakpoints but 1 output"));
}

#[test]
fn rejects_single_breakpoint() {
    assert!(KeyframeRange::new(vec![0.0], vec![1.0]).is_err());
}

#[test]
fn rejects_decreasing_inputs_with_index() {
    let err = KeyframeRange::new(vec![0.0, 0.6, 0.4], vec![0.0, 1.0, 2.0]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("breakpoint 2"), "{msg}");
    assert!(matches!(err, FramewiseError::MalformedConfiguration(_)));
}

#[test]
fn rejects_non_finite() {
    let err = KeyframeRange::new(vec![0.0, 1.0], vec![0.0, f64::INFINITY]).unwrap_err();
    assert!(err.to_string().contains("breakpoint 1"));
}

#[test]
fn rejects_output_span_wider_than_f64() {
    let err = KeyframeRange::new(vec![0.0, 1.0], vec![-1e308, 1e308]).unwrap_err();
    assert!(err.to_string().contains("breakpoint 0 to 1"), "{err}");
    assert!(KeyframeRange::new(vec![0.0, 1.0], vec![-1e307, 1e307]).is_ok());
}
