use serde::de::DeserializeOwned;

use crate::{
    animation::spring::{Spring, SpringConfig},
    foundation::{
        core::{Fps, FrameIndex, Rect, VideoConfig},
        error::{AdreelError, AdreelResult},
    },
    timeline::sequencer::TimelineFrame,
};

/// Everything a composer may read while building one frame.
#[derive(Clone, Debug)]
pub struct FrameCtx<'a> {
    /// Global frame being built.
    pub frame: FrameIndex,
    /// Canvas, frame rate and duration.
    pub config: &'a VideoConfig,
    /// `None` for compositions without a timeline.
    pub timeline: Option<TimelineFrame>,
    /// Defaults merged with call-site overrides.
    pub props: &'a serde_json::Value,
}

impl FrameCtx<'_> {
    /// Composition frame rate.
    pub fn fps(&self) -> Fps {
        self.config.fps
    }

    /// Canvas rect at the origin.
    pub fn bounds(&self) -> Rect {
        self.config.bounds()
    }

    /// Frame as a signed local frame for compositions without scenes.
    pub fn local(&self) -> i64 {
        self.frame.0 as i64
    }

    /// Local frame of an active scene; `None` means nothing to draw for it.
    pub fn scene_local(&self, name: &str) -> Option<i64> {
        self.timeline.as_ref()?.local(name)
    }

    /// Spring progress `local` frames after the spring started.
    ///
    /// Builds a fresh [`Spring`] on every call, which measures the natural duration again when
    /// `config` has a duration override. Composers sampling one config across frames should build
    /// the `Spring` once and call [`Spring::progress_at`], or walk [`Spring::iter`] for sequential
    /// frames.
    pub fn spring(&self, config: SpringConfig, local: i64) -> AdreelResult<f64> {
        Ok(Spring::new(config, self.fps())?.progress_at(local))
    }

    /// Deserialize the merged props; mismatches are validation errors.
    pub fn props_as<T: DeserializeOwned>(&self) -> AdreelResult<T> {
        serde_json::from_value(self.props.clone())
            .map_err(|e| AdreelError::validation(format!("invalid props: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/context.rs"]
mod tests;
