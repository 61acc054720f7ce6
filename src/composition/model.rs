use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    assets::resolver::normalize_rel_path,
    eval::context::FrameCtx,
    foundation::{
        core::VideoConfig,
        error::{AdreelError, AdreelResult},
    },
    timeline::sequencer::Timeline,
    visual::node::VisualNode,
};

/// Pure function from a frame context to a visual tree.
pub trait Composer: Send + Sync {
    /// Build the tree for `ctx.frame`. Must not depend on anything outside `ctx`.
    fn compose(&self, ctx: &FrameCtx<'_>) -> AdreelResult<VisualNode>;
}

impl<F> Composer for F
where
    F: Fn(&FrameCtx<'_>) -> AdreelResult<VisualNode> + Send + Sync,
{
    fn compose(&self, ctx: &FrameCtx<'_>) -> AdreelResult<VisualNode> {
        self(ctx)
    }
}

/// A font the composition needs loaded before any frame is rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    /// Family name text nodes refer to.
    pub family: String,
    /// Asset-relative path of the font file.
    pub src: String,
    /// CSS weight, 100 to 900.
    #[serde(default = "default_weight")]
    pub weight: u16,
}

fn default_weight() -> u16 {
    400
}

impl FontFace {
    /// Regular-weight face.
    pub fn new(family: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            src: src.into(),
            weight: default_weight(),
        }
    }

    /// Set the CSS weight.
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }
}

/// A registered, immutable composition.
#[derive(Clone)]
pub struct Composition {
    pub(crate) id: String,
    pub(crate) config: VideoConfig,
    pub(crate) timeline: Option<Timeline>,
    pub(crate) default_props: Map<String, Value>,
    pub(crate) fonts: Vec<FontFace>,
    pub(crate) composer: Arc<dyn Composer>,
}

impl std::fmt::Debug for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composition")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("timeline", &self.timeline)
            .field("default_props", &self.default_props)
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl Composition {
    /// Registry id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canvas, frame rate and duration.
    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Scene timeline, if the composition is sequenced.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Props used when a caller passes no overrides.
    pub fn default_props(&self) -> &Map<String, Value> {
        &self.default_props
    }

    /// Declared font faces.
    pub fn fonts(&self) -> &[FontFace] {
        &self.fonts
    }

    pub(crate) fn composer(&self) -> &dyn Composer {
        self.composer.as_ref()
    }

    /// Default props shallow-merged with `overrides`.
    pub fn resolve_props(&self, overrides: Option<&Value>) -> AdreelResult<Value> {
        merge_props(&self.default_props, overrides)
    }

    /// Check the id, config, timeline fit and font declarations.
    pub fn validate(&self) -> AdreelResult<()> {
        validate_id(&self.id)?;
        self.config.validate()?;
        if let Some(tl) = &self.timeline {
            if tl.fps() != self.config.fps {
                return Err(AdreelError::validation(format!(
                    "composition '{}': timeline fps does not match video fps",
                    self.id
                )));
            }
            if tl.duration() > self.config.duration.0 {
                return Err(AdreelError::validation(format!(
                    "composition '{}': timeline runs {} frames, longer than duration {}",
                    self.id,
                    tl.duration(),
                    self.config.duration.0
                )));
            }
        }
        for font in &self.fonts {
            if font.family.trim().is_empty() {
                return Err(AdreelError::validation("font family must be non-empty"));
            }
            normalize_rel_path(&font.src)?;
        }
        Ok(())
    }
}

/// Ids are non-empty and limited to ASCII letters, digits and `-`.
fn validate_id(id: &str) -> AdreelResult<()> {
    if id.is_empty() {
        return Err(AdreelError::validation("composition id must be non-empty"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AdreelError::validation(format!(
            "composition id '{id}' may only contain a-z, A-Z, 0-9 and '-'"
        )));
    }
    Ok(())
}

/// Shallow merge: top-level keys of `overrides` replace the defaults.
pub fn merge_props(
    defaults: &Map<String, Value>,
    overrides: Option<&Value>,
) -> AdreelResult<Value> {
    let mut merged = defaults.clone();
    match overrides {
        None | Some(Value::Null) => {}
        Some(Value::Object(o)) => {
            for (k, v) in o {
                merged.insert(k.clone(), v.clone());
            }
        }
        Some(other) => {
            return Err(AdreelError::validation(format!(
                "props overrides must be a JSON object, got {}",
                json_kind(other)
            )));
        }
    }
    Ok(Value::Object(merged))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
