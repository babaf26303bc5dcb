use std::collections::HashSet;

use rayon::prelude::*;

use crate::{
    clip::model::Clip,
    eval::{
        evaluator::{Evaluator, FrameValues},
        fingerprint::{FrameFingerprint, fingerprint_values},
    },
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{FramewiseError, FramewiseResult},
    },
};

/// Batch evaluation threading and chunking.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalThreading {
    /// Evaluate chunks on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Frames per chunk; `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Fingerprint frames and report repeats in [`EvalStats`].
    pub static_frame_detection: bool,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_detection: false,
        }
    }
}

/// Counters for one batch evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct EvalStats {
    /// Frames evaluated.
    pub frames_total: u64,
    /// Frames with distinct channel values.
    pub frames_unique: u64,
    /// Frames whose values equal the preceding frame's.
    pub frames_static: u64,
}

/// Evaluate `range` sequentially with default settings.
pub fn eval_frames(clip: &Clip, range: FrameRange) -> FramewiseResult<Vec<FrameValues>> {
    eval_frames_with_stats(clip, range, &EvalThreading::default()).map(|(frames, _)| frames)
}

/// Evaluate every frame of `clip`.
pub fn eval_all(
    clip: &Clip,
    threading: &EvalThreading,
) -> FramewiseResult<(Vec<FrameValues>, EvalStats)> {
    eval_frames_with_stats(clip, clip.timeline().range(), threading)
}

/// Evaluate `range` (start inclusive, end exclusive), in frame order.
///
/// Parallel and sequential runs return identical values. The first failing frame, in frame
/// order, aborts the batch.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn eval_frames_with_stats(
    clip: &Clip,
    range: FrameRange,
    threading: &EvalThreading,
) -> FramewiseResult<(Vec<FrameValues>, EvalStats)> {
    if range.is_empty() {
        return Err(FramewiseError::malformed("eval range must be non-empty"));
    }
    let total = clip.timeline().total_frames;
    if range.end.0 > total {
        return Err(FramewiseError::out_of_range(FrameIndex(range.end.0 - 1), total));
    }

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);

    if !threading.parallel {
        for f in range.start.0..range.end.0 {
            out.push(Evaluator::eval_frame(clip, FrameIndex(f))?);
        }
    } else {
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            tracing::debug!(chunk_start, chunk_end, "evaluating chunk");
            let evaluated = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| Evaluator::eval_frame(clip, FrameIndex(f)))
                    .collect::<Vec<_>>()
            });
            for item in evaluated {
                out.push(item?);
            }
            chunk_start = chunk_end;
        }
    }

    let stats = if threading.static_frame_detection {
        detect_static_frames(&out)
    } else {
        let n = out.len() as u64;
        EvalStats {
            frames_total: n,
            frames_unique: n,
            frames_static: 0,
        }
    };
    Ok((out, stats))
}

fn detect_static_frames(frames: &[FrameValues]) -> EvalStats {
    let mut seen = HashSet::<FrameFingerprint>::new();
    let mut prev = None;
    let mut stats = EvalStats::default();
    for frame in frames {
        let fp = fingerprint_values(frame);
        stats.frames_total += 1;
        if seen.insert(fp) {
            stats.frames_unique += 1;
        }
        if prev == Some(fp) {
            stats.frames_static += 1;
        }
        prev = Some(fp);
    }
    stats
}

fn build_thread_pool(threads: Option<usize>) -> FramewiseResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramewiseError::malformed("eval threading 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/pipeline.rs"]
mod tests;
