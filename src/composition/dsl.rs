use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    composition::model::{Composer, Composition, FontFace},
    foundation::{
        core::VideoConfig,
        error::{AdreelError, AdreelResult},
    },
    timeline::sequencer::Timeline,
};

/// Fluent construction of a [`Composition`]; validated by [`build`](Self::build).
pub struct CompositionBuilder {
    id: String,
    config: VideoConfig,
    timeline: Option<Timeline>,
    default_props: Map<String, Value>,
    fonts: Vec<FontFace>,
    composer: Option<Arc<dyn Composer>>,
}

impl CompositionBuilder {
    /// Start a builder with no timeline, props, fonts or composer.
    pub fn new(id: impl Into<String>, config: VideoConfig) -> Self {
        Self {
            id: id.into(),
            config,
            timeline: None,
            default_props: Map::new(),
            fonts: Vec::new(),
            composer: None,
        }
    }

    /// Attach a scene timeline.
    pub fn timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Must be a JSON object.
    pub fn default_props(mut self, props: Value) -> AdreelResult<Self> {
        match props {
            Value::Object(map) => {
                self.default_props = map;
                Ok(self)
            }
            _ => Err(AdreelError::validation(format!(
                "composition '{}': default props must be a JSON object",
                self.id
            ))),
        }
    }

    /// Declare a font face.
    pub fn font(mut self, font: FontFace) -> Self {
        self.fonts.push(font);
        self
    }

    /// Set the frame function.
    pub fn composer(mut self, composer: impl Composer + 'static) -> Self {
        self.composer = Some(Arc::new(composer));
        self
    }

    /// Finish and validate. A composer is required.
    pub fn build(self) -> AdreelResult<Composition> {
        let composer = self.composer.ok_or_else(|| {
            AdreelError::validation(format!("composition '{}' has no composer", self.id))
        })?;
        let comp = Composition {
            id: self.id,
            config: self.config,
            timeline: self.timeline,
            default_props: self.default_props,
            fonts: self.fonts,
            composer,
        };
        comp.validate()?;
        Ok(comp)
    }
}

impl Composition {
    /// Shorthand for [`CompositionBuilder::new`].
    pub fn builder(id: impl Into<String>, config: VideoConfig) -> CompositionBuilder {
        CompositionBuilder::new(id, config)
    }
}
