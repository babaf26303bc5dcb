use std::collections::BTreeMap;

use super::*;
use crate::foundation::core::FrameIndex;

fn frame(t: u64, values: &[(&str, ChannelValue)]) -> FrameValues {
    FrameValues {
        frame: FrameIndex(t),
        progress: t as f64 / 10.0,
        seconds: t as f64 / 30.0,
        values: values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn fingerprint_is_deterministic_and_ignores_timing() {
    let a = frame(1, &[("x", ChannelValue::Scalar(1.0))]);
    let b = frame(7, &[("x", ChannelValue::Scalar(1.0))]);
    assert_eq!(fingerprint_values(&a), fingerprint_values(&a));
    assert_eq!(fingerprint_values(&a), fingerprint_values(&b));
}

#[test]
fn fingerprint_changes_with_values_names_and_kinds() {
    let base = fingerprint_values(&frame(0, &[("x", ChannelValue::Scalar(1.0))]));
    assert_ne!(
        base,
        fingerprint_values(&frame(0, &[("x", ChannelValue::Scalar(1.5))]))
    );
    assert_ne!(
        base,
        fingerprint_values(&frame(0, &[("y", ChannelValue::Scalar(1.0))]))
    );
    assert_ne!(
        base,
        fingerprint_values(&frame(0, &[("x", ChannelValue::Text("1".to_string()))]))
    );
}

#[test]
fn signed_zero_is_one_value() {
    let pos = frame(0, &[("x", ChannelValue::Scalar(0.0))]);
    let neg = frame(0, &[("x", ChannelValue::Scalar(-0.0))]);
    assert_eq!(fingerprint_values(&pos), fingerprint_values(&neg));
}

#[test]
fn sequence_fingerprint_is_order_sensitive() {
    let a = frame(0, &[("x", ChannelValue::Scalar(0.0))]);
    let b = frame(1, &[("x", ChannelValue::Scalar(1.0))]);
    let forward = fingerprint_sequence([&a, &b]);
    let backward = fingerprint_sequence([&b, &a]);
    assert_ne!(forward, backward);
    assert_eq!(forward, fingerprint_sequence(&vec![a, b]));
}

#[test]
fn display_is_32_hex_digits() {
    let fp = FrameFingerprint { hi: 1, lo: 0xff };
    let s = fp.to_string();
    assert_eq!(s.len(), 32);
    assert_eq!(s, "000000000000000100000000000000ff");
}
