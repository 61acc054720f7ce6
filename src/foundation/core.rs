use crate::foundation::error::{AdreelError, AdreelResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Global (composition-level) frame index, 0-based.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> AdreelResult<Self> {
        if start.0 > end.0 {
            return Err(AdreelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate every frame in the range in order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> AdreelResult<Self> {
        if den == 0 {
            return Err(AdreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AdreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number frame rate (`n/1`).
    pub fn whole(num: u32) -> AdreelResult<Self> {
        Self::new(num, 1)
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds per frame.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to a whole frame count (floor, never negative).
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Convert seconds to the nearest whole frame count (never negative).
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Fixed video parameters shared by every computation of one composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoConfig {
    /// Frame rate.
    pub fps: Fps,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Total duration in frames.
    pub duration: FrameIndex,
}

impl VideoConfig {
    /// Build and validate a video configuration.
    pub fn new(fps: Fps, width: u32, height: u32, duration_frames: u64) -> AdreelResult<Self> {
        let config = Self {
            fps,
            width,
            height,
            duration: FrameIndex(duration_frames),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check all fields are positive (also applied to deserialized configs).
    pub fn validate(&self) -> AdreelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(AdreelError::validation("fps must have num>0 and den>0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AdreelError::validation("video width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(AdreelError::validation("duration must be > 0 frames"));
        }
        Ok(())
    }

    /// The full `[0, duration)` range.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: self.duration,
        }
    }

    /// Canvas bounds as a rect anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Canvas center point.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Translate, rotate and scale about an anchor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Offset in parent space.
    pub translate: Vec2,
    /// Rotation in radians; positive turns clockwise on the y-down canvas.
    pub rotation_rad: f64,
    /// Per-axis scale; `(1, 1)` by default.
    pub scale: Vec2,
    /// Pivot for rotation and scale, in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    /// Pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec2::new(x, y),
            ..Self::default()
        }
    }

    /// Uniform scale around `anchor`.
    pub fn scale_about(s: f64, anchor: Vec2) -> Self {
        Self {
            scale: Vec2::new(s, s),
            anchor,
            ..Self::default()
        }
    }

    /// Replace the translation.
    pub fn with_translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }

    /// Replace the rotation, in degrees.
    pub fn with_rotation_deg(mut self, deg: f64) -> Self {
        self.rotation_rad = deg.to_radians();
        self
    }

    /// `true` for the default transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Local-to-parent matrix.
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
