//! adreel evaluates frame-driven animated compositions for programmatic video ads.
//!
//! A [`Composition`] is a pure function from a frame index to a [`VisualNode`] tree:
//!
//! - Time it with [`interpolate`], [`Spring`], [`NoiseField`] and [`Remap`]
//! - Lay out scenes and transitions with [`TransitionSeries`]
//! - Evaluate single frames with an [`Evaluator`] or whole ranges with [`eval_frames`]
//!
//! Rasterizing the resulting trees is left to an external renderer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod composition;
pub(crate) mod eval;
pub(crate) mod foundation;
pub(crate) mod presets;
pub(crate) mod timeline;
pub(crate) mod visual;

pub use crate::foundation::core::{
    Affine, Fps, FrameIndex, FrameRange, Point, Rect, Transform2D, Vec2, VideoConfig,
};
pub use crate::foundation::error::{AdreelError, AdreelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOptions, Interpolation, Lerp, interpolate,
};
pub use crate::animation::noise::{NoiseField, noise2d, noise3d};
pub use crate::animation::remap::{LoopMode, Remap, apply_chain};
pub use crate::animation::spring::{Spring, SpringConfig, SpringIter, SpringOptions, spring};

pub use crate::timeline::compose::compose_scenes;
pub use crate::timeline::scene::{Scene, SceneState};
pub use crate::timeline::sequencer::{
    ActiveTransition, SceneFrame, Timeline, TimelineFrame, TransitionSeries,
};
pub use crate::timeline::transition::{
    Direction, Presentation, PresentationStyle, Transition, TransitionTiming,
};

pub use crate::visual::color::{Color, interpolate_colors};
pub use crate::visual::node::{
    Fill, GradientStop, ImageFit, Shape, Stroke, Style, TextAlign, TextStyle, VisualNode,
};

pub use crate::composition::dsl::CompositionBuilder;
pub use crate::composition::model::{Composer, Composition, FontFace, merge_props};
pub use crate::composition::registry::Registry;

pub use crate::eval::context::FrameCtx;
pub use crate::eval::evaluator::{EvaluatedFrame, Evaluator, eval_frame};
pub use crate::eval::fingerprint::{fingerprint_frame, fingerprint_frames};
pub use crate::eval::parallel::{EvalThreading, eval_frames};

pub use crate::assets::preflight::{PreparedAssets, Preflight, ResolvedFont};
pub use crate::assets::resolver::{AssetResolver, FsAssetResolver, normalize_rel_path};

pub use crate::presets::builtin_registry;
