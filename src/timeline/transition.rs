use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        ease::Ease,
        interpolate::Lerp,
        spring::{Spring, SpringConfig},
    },
    foundation::{
        core::{Fps, Rect, Vec2},
        error::{AdreelError, AdreelResult},
    },
};

/// Edge the incoming scene enters from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Enters from the left edge.
    #[default]
    #[serde(alias = "from-left")]
    FromLeft,
    /// Enters from the right edge.
    #[serde(alias = "from-right")]
    FromRight,
    /// Enters from the top edge.
    #[serde(alias = "from-top")]
    FromTop,
    /// Enters from the bottom edge.
    #[serde(alias = "from-bottom")]
    FromBottom,
}

/// Visual treatment of the two scenes during a transition window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// Hard cut at the start of the window; the incoming scene covers the outgoing one.
    None,
    /// Cross-fade: the incoming scene fades in over the opaque outgoing one.
    #[default]
    Fade,
    /// Incoming scene revealed by a clip growing from `direction`.
    Wipe {
        /// Edge the clip grows from.
        #[serde(default)]
        direction: Direction,
    },
    /// Incoming scene slides in from `direction`, pushing the outgoing one out.
    Slide {
        /// Edge the incoming scene enters from.
        #[serde(default)]
        direction: Direction,
    },
}

/// How transition progress advances over the overlap window of `width` frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionTiming {
    /// Eased linear progress.
    Linear {
        /// Overlap in frames.
        width: u64,
        /// Curve applied to `local / width`.
        #[serde(default)]
        ease: Ease,
    },
    /// Spring progress rescaled to settle at `width`.
    Spring {
        /// Overlap in frames.
        width: u64,
        /// Spring physics; any duration override is replaced by `width`.
        config: SpringConfig,
    },
}

impl TransitionTiming {
    /// Un-eased linear timing.
    pub fn linear(width: u64) -> Self {
        Self::Linear {
            width,
            ease: Ease::Linear,
        }
    }

    /// Spring timing settling at `width`.
    pub fn spring(width: u64, config: SpringConfig) -> Self {
        Self::Spring { width, config }
    }

    /// Overlap in frames.
    pub fn width(&self) -> u64 {
        match *self {
            Self::Linear { width, .. } | Self::Spring { width, .. } => width,
        }
    }

    fn validate(&self) -> AdreelResult<()> {
        if self.width() == 0 {
            return Err(AdreelError::validation(
                "transition width must be > 0 frames",
            ));
        }
        match self {
            Self::Linear { ease, .. } => ease.validate(),
            Self::Spring { .. } => Ok(()),
        }
    }
}

/// Transition between two consecutive scenes of a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// How the two scenes are drawn.
    #[serde(default)]
    pub presentation: Presentation,
    /// How progress advances.
    pub timing: TransitionTiming,
}

impl Transition {
    /// Transition from its parts.
    pub fn new(presentation: Presentation, timing: TransitionTiming) -> Self {
        Self {
            presentation,
            timing,
        }
    }

    /// Cross-fade.
    pub fn fade(timing: TransitionTiming) -> Self {
        Self::new(Presentation::Fade, timing)
    }

    /// Wipe from `direction`.
    pub fn wipe(direction: Direction, timing: TransitionTiming) -> Self {
        Self::new(Presentation::Wipe { direction }, timing)
    }

    /// Slide in from `direction`.
    pub fn slide(direction: Direction, timing: TransitionTiming) -> Self {
        Self::new(Presentation::Slide { direction }, timing)
    }

    /// Overlap in frames.
    pub fn width(&self) -> u64 {
        self.timing.width()
    }

    /// Blend an outgoing value toward an incoming one; `p` is clamped to `[0, 1]`.
    pub fn blend<T: Lerp>(a: &T, b: &T, p: f64) -> T {
        T::lerp(a, b, p.clamp(0.0, 1.0))
    }

    /// Outgoing and incoming styles at progress `p` over a canvas of `bounds`.
    pub fn styles(&self, p: f64, bounds: Rect) -> (PresentationStyle, PresentationStyle) {
        let p = p.clamp(0.0, 1.0);
        let (w, h) = (bounds.width(), bounds.height());
        let full = PresentationStyle::default();
        match self.presentation {
            Presentation::None => (full, full),
            // Incoming drawn at `p` over an opaque outgoing scene composites to A(1-p) + B*p.
            Presentation::Fade => (
                full,
                PresentationStyle {
                    opacity: p,
                    ..full
                },
            ),
            Presentation::Wipe { direction } => {
                let clip = match direction {
                    Direction::FromLeft => Rect::new(0.0, 0.0, w * p, h),
                    Direction::FromRight => Rect::new(w * (1.0 - p), 0.0, w, h),
                    Direction::FromTop => Rect::new(0.0, 0.0, w, h * p),
                    Direction::FromBottom => Rect::new(0.0, h * (1.0 - p), w, h),
                };
                (
                    full,
                    PresentationStyle {
                        clip: Some(clip),
                        ..full
                    },
                )
            }
            Presentation::Slide { direction } => {
                let axis = match direction {
                    Direction::FromLeft => Vec2::new(-w, 0.0),
                    Direction::FromRight => Vec2::new(w, 0.0),
                    Direction::FromTop => Vec2::new(0.0, -h),
                    Direction::FromBottom => Vec2::new(0.0, h),
                };
                (
                    PresentationStyle {
                        offset: -axis * p,
                        ..full
                    },
                    PresentationStyle {
                        offset: axis * (1.0 - p),
                        ..full
                    },
                )
            }
        }
    }

    pub(crate) fn resolve(&self, fps: Fps) -> AdreelResult<ResolvedTiming> {
        self.timing.validate()?;
        Ok(match self.timing {
            TransitionTiming::Linear { width, ease } => ResolvedTiming::Linear { width, ease },
            TransitionTiming::Spring { width, config } => {
                let spring = Spring::new(config.with_duration(width), fps).map_err(|e| {
                    AdreelError::validation(format!("transition spring timing: {e}"))
                })?;
                ResolvedTiming::Spring(spring)
            }
        })
    }
}

/// Timing with its spring precomputed for a frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ResolvedTiming {
    Linear { width: u64, ease: Ease },
    Spring(Spring),
}

impl ResolvedTiming {
    /// Progress in `[0, 1]` at `local` frames into the window.
    pub(crate) fn progress(&self, local: i64) -> f64 {
        match *self {
            Self::Linear { width, ease } => ease.apply(local as f64 / width as f64),
            Self::Spring(spring) => spring.progress_at(local).clamp(0.0, 1.0),
        }
    }
}

/// Style a presentation applies to one side of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentationStyle {
    /// Opacity multiplied into the scene container.
    pub opacity: f64,
    /// Translation of the scene container.
    pub offset: Vec2,
    /// Visible region, in canvas coordinates.
    pub clip: Option<Rect>,
}

impl Default for PresentationStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset: Vec2::ZERO,
            clip: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/transition.rs"]
mod tests;
