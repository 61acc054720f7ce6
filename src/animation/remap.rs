use crate::foundation::error::{AdreelError, AdreelResult};

/// Local-frame transform applied before sampling an animation.
///
/// Negative local frames (premount) pass through untouched so pre-start semantics stay with the
/// sampled animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Remap {
    /// Hold frame 0 for `by` frames.
    Delay {
        /// Frames to hold.
        by: u64,
    },
    /// Play `factor` local frames per frame (floored).
    Speed {
        /// Playback rate; must be finite and positive.
        factor: f64,
    },
    /// Play `duration` frames backwards, holding frame 0 afterwards.
    Reverse {
        /// Length of the reversed clip.
        duration: u64,
    },
    /// Cycle through `period` frames.
    Loop {
        /// Frames per cycle.
        period: u64,
        /// Restart or bounce at the end of a cycle.
        mode: LoopMode,
    },
    /// Always sample this frame.
    Freeze {
        /// Sampled frame.
        frame: i64,
    },
}

/// End-of-cycle behavior of [`Remap::Loop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// `0, 1, .., n-1, 0, 1, ..`
    #[default]
    Repeat,
    /// `0, 1, .., n-1, n-2, .., 1, 0, 1, ..`
    PingPong,
}

impl Remap {
    /// Reject a zero period or duration and a non-positive speed.
    pub fn validate(&self) -> AdreelResult<()> {
        match *self {
            Self::Speed { factor } if !(factor.is_finite() && factor > 0.0) => Err(
                AdreelError::invalid_parameter("speed factor must be finite and > 0"),
            ),
            Self::Reverse { duration: 0 } => Err(AdreelError::invalid_parameter(
                "reverse duration must be > 0",
            )),
            Self::Loop { period: 0, .. } => {
                Err(AdreelError::invalid_parameter("loop period must be > 0"))
            }
            _ => Ok(()),
        }
    }

    /// Map a local frame. Call [`Remap::validate`] first; invalid parameters map to frame 0.
    pub fn apply(&self, local: i64) -> i64 {
        if let Self::Freeze { frame } = *self {
            return frame;
        }
        if local < 0 {
            return local;
        }
        match *self {
            Self::Delay { by } => local.saturating_sub(by as i64).max(0),
            Self::Speed { factor } => {
                if factor > 0.0 {
                    (local as f64 * factor).floor() as i64
                } else {
                    0
                }
            }
            Self::Reverse { duration } => {
                let max = duration.saturating_sub(1) as i64;
                max - local.min(max)
            }
            Self::Loop { period, mode } => {
                let period = period as i64;
                if period == 0 {
                    return 0;
                }
                match mode {
                    LoopMode::Repeat => local % period,
                    LoopMode::PingPong => {
                        if period == 1 {
                            return 0;
                        }
                        let cycle = 2 * (period - 1);
                        let pos = local % cycle;
                        if pos < period { pos } else { cycle - pos }
                    }
                }
            }
            Self::Freeze { frame } => frame,
        }
    }
}

/// Apply remaps left to right.
pub fn apply_chain(chain: &[Remap], local: i64) -> i64 {
    chain.iter().fold(local, |f, r| r.apply(f))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/remap.rs"]
mod tests;
