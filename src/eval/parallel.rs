use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    eval::evaluator::{EvaluatedFrame, Evaluator},
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{AdreelError, AdreelResult},
    },
};

/// Controls multi-frame evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalThreading {
    /// Evaluate frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames per work item (`0` is treated as `1`).
    pub chunk_size: usize,
    /// Worker threads; `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

impl EvalThreading {
    /// Parallel evaluation with the default chunk size.
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            parallel: true,
            threads,
            ..Self::default()
        }
    }
}

/// Evaluate every frame of `range`, in frame order.
///
/// Results are identical whether run sequentially or in parallel.
#[tracing::instrument(
    level = "debug",
    skip(eval, threading),
    fields(comp = %eval.composition().id(), start = range.start.0, end = range.end.0)
)]
pub fn eval_frames(
    eval: &Evaluator<'_>,
    range: FrameRange,
    threading: &EvalThreading,
) -> AdreelResult<Vec<EvaluatedFrame>> {
    let duration = eval.composition().config().duration;
    if range.end.0 > duration.0 {
        return Err(AdreelError::evaluation(format!(
            "frame range [{}, {}) exceeds duration {}",
            range.start.0, range.end.0, duration.0
        )));
    }
    if range.is_empty() {
        return Ok(Vec::new());
    }

    if !threading.parallel {
        return range.iter().map(|f| eval.eval_frame(f)).collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk = normalized_chunk_size(threading.chunk_size);
    let starts: Vec<u64> = (range.start.0..range.end.0).step_by(chunk).collect();
    tracing::debug!(chunks = starts.len(), chunk, "evaluating frames in parallel");

    let chunks = pool.install(|| {
        starts
            .par_iter()
            .map(|&s| {
                let e = (s + chunk as u64).min(range.end.0);
                (s..e)
                    .map(|f| eval.eval_frame(FrameIndex(f)))
                    .collect::<AdreelResult<Vec<_>>>()
            })
            .collect::<Vec<_>>()
    });

    let mut out = Vec::with_capacity(range.len_frames() as usize);
    for c in chunks {
        out.extend(c?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> AdreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AdreelError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AdreelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/parallel.rs"]
mod tests;
