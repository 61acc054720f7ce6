use serde::{Deserialize, Serialize};

use crate::{
    composition::model::Composition,
    eval::context::FrameCtx,
    foundation::{
        core::FrameIndex,
        error::{AdreelError, AdreelResult},
    },
    visual::node::VisualNode,
};

/// Output of evaluating one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedFrame {
    /// Evaluated frame.
    pub frame: FrameIndex,
    /// Tree returned by the composer.
    pub root: VisualNode,
}

/// Evaluates frames of one composition with props resolved once up front.
#[derive(Clone, Debug)]
pub struct Evaluator<'a> {
    comp: &'a Composition,
    props: serde_json::Value,
}

impl<'a> Evaluator<'a> {
    /// Resolve props for `comp` once; later frames reuse them.
    pub fn new(
        comp: &'a Composition,
        overrides: Option<&serde_json::Value>,
    ) -> AdreelResult<Self> {
        let props = comp.resolve_props(overrides)?;
        Ok(Self { comp, props })
    }

    /// Composition being evaluated.
    pub fn composition(&self) -> &'a Composition {
        self.comp
    }

    /// Merged props passed to every frame.
    pub fn props(&self) -> &serde_json::Value {
        &self.props
    }

    /// Build one frame. Frames at or past the duration are an evaluation error.
    #[tracing::instrument(level = "trace", skip(self), fields(comp = %self.comp.id()))]
    pub fn eval_frame(&self, frame: FrameIndex) -> AdreelResult<EvaluatedFrame> {
        let duration = self.comp.config().duration;
        if frame.0 >= duration.0 {
            return Err(AdreelError::evaluation(format!(
                "frame {} out of bounds for '{}' (duration {})",
                frame.0,
                self.comp.id(),
                duration.0
            )));
        }

        let ctx = FrameCtx {
            frame,
            config: self.comp.config(),
            timeline: self.comp.timeline().map(|tl| tl.frame(frame)),
            props: &self.props,
        };
        let root = self.comp.composer().compose(&ctx).map_err(|e| match e {
            AdreelError::Other(inner) => AdreelError::evaluation(format!(
                "composer '{}' failed at frame {}: {inner:#}",
                self.comp.id(),
                frame.0
            )),
            typed => typed,
        })?;
        Ok(EvaluatedFrame { frame, root })
    }
}

/// One-shot evaluation of `frame` with props `overrides`.
pub fn eval_frame(
    comp: &Composition,
    frame: FrameIndex,
    overrides: Option<&serde_json::Value>,
) -> AdreelResult<EvaluatedFrame> {
    Evaluator::new(comp, overrides)?.eval_frame(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
