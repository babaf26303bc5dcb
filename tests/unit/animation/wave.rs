use super::*;

#[test]
fn oscillates_around_offset() {
    let w = Wave::new(0.5, 2.0).offset(1.5);
    assert_eq!(w.value(0.0), 1.5);
    assert!((w.value(0.125) - 2.0).abs() < 1e-12);
    assert!((w.value(0.375) - 1.0).abs() < 1e-12);
    for i in 0..=100 {
        let v = w.value(f64::from(i) / 100.0);
        assert!((1.0 - 1e-12..=2.0 + 1e-12).contains(&v));
    }
}

#[test]
fn phase_shifts_in_periods() {
    let w = Wave::new(1.0, 1.0).phase(0.25);
    assert!((w.value(0.0) - 1.0).abs() < 1e-12);
    assert!((w.value(0.5) + 1.0).abs() < 1e-12);
}

#[test]
fn zero_cycles_is_constant() {
    let w = Wave::new(3.0, 0.0).offset(2.0);
    assert_eq!(w.value(0.0), 2.0);
    assert_eq!(w.value(0.9), 2.0);
}

#[test]
fn rejects_non_finite_parameters() {
    let err = Wave::new(f64::NAN, 1.0).validate().unwrap_err();
    assert!(err.to_string().contains("amplitude"));
    assert!(Wave::new(1.0, f64::INFINITY).validate().is_err());
    assert!(Wave::new(1.0, 3.0).validate().is_ok());
}

#[test]
fn phase_and_offset_default_in_json() {
    let w: Wave = serde_json::from_str(r#"{"amplitude":2.0,"cycles":4}"#).unwrap();
    assert_eq!(w, Wave::new(2.0, 4.0));
}
