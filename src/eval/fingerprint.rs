use crate::{
    eval::evaluator::{ChannelValue, FrameValues},
    foundation::math::Fnv1a64,
};

const SEED_B: u64 = 0x9ae1_6a3b_2f90_404f;

/// 128-bit content hash of a frame's channel values.
///
/// Frame index and timing are excluded: two frames with identical channel values share a
/// fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameFingerprint {
    /// First hash lane.
    pub hi: u64,
    /// Second hash lane.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint the channel values of `frame`.
pub fn fingerprint_values(frame: &FrameValues) -> FrameFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(SEED_B);

    write_u64_pair(&mut a, &mut b, frame.values.len() as u64);
    for (name, value) in &frame.values {
        write_str_pair(&mut a, &mut b, name);
        match value {
            ChannelValue::Scalar(v) => {
                write_u8_pair(&mut a, &mut b, 0);
                // -0.0 and 0.0 draw the same.
                let v = if *v == 0.0 { 0.0 } else { *v };
                write_u64_pair(&mut a, &mut b, v.to_bits());
            }
            ChannelValue::Text(s) => {
                write_u8_pair(&mut a, &mut b, 1);
                write_str_pair(&mut a, &mut b, s);
            }
        }
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

/// Order-sensitive fingerprint over a sequence of frames.
pub fn fingerprint_sequence<'a>(
    frames: impl IntoIterator<Item = &'a FrameValues>,
) -> FrameFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(SEED_B);
    let mut count = 0u64;
    for frame in frames {
        let fp = fingerprint_values(frame);
        write_u64_pair(&mut a, &mut b, frame.frame.0);
        write_u64_pair(&mut a, &mut b, fp.hi);
        write_u64_pair(&mut a, &mut b, fp.lo);
        count += 1;
    }
    write_u64_pair(&mut a, &mut b, count);
    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
