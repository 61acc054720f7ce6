use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Transform2D, Vec2},
    foundation::error::{AdreelError, AdreelResult},
};

/// Component-wise linear blend. `t` outside `[0, 1]` extrapolates where the type allows it.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (0) and `b` (1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for (f64, f64) {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (f64::lerp(&a.0, &b.0, t), f64::lerp(&a.1, &b.1, t))
    }
}

impl<const N: usize> Lerp for [f64; N] {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        std::array::from_fn(|i| f64::lerp(&a[i], &b[i], t))
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            anchor: <Vec2 as Lerp>::lerp(&a.anchor, &b.anchor, t),
        }
    }
}

/// Behavior outside the breakpoint domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the outermost segment's slope (no easing).
    #[default]
    Extend,
    /// Hold the outermost output.
    Clamp,
    /// Same as `Clamp`: an interpolation projects into the output range and never passes the
    /// input through.
    Identity,
    /// Wrap the input back into the breakpoint domain.
    Wrap,
}

/// Options for the [`interpolate`] shorthand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterpolateOptions {
    /// Easing applied inside every segment.
    pub ease: Ease,
    /// Policy below the first breakpoint.
    pub left: Extrapolate,
    /// Policy above the last breakpoint.
    pub right: Extrapolate,
}

impl InterpolateOptions {
    /// Clamp on both sides, linear easing.
    pub fn clamp() -> Self {
        Self {
            ease: Ease::Linear,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        }
    }

    /// Clamp only above the last breakpoint.
    pub fn clamp_right() -> Self {
        Self {
            right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Replace the easing.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Piecewise mapping from an input scalar through breakpoints into outputs.
#[derive(Clone, Debug, Serialize)]
pub struct Interpolation<T> {
    input: Vec<f64>,
    output: Vec<T>,
    ease: Ease,
    segment_eases: Option<Vec<Ease>>,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
}

impl<'de, T> Deserialize<'de> for Interpolation<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr<T> {
            input: Vec<f64>,
            output: Vec<T>,
            #[serde(default)]
            ease: Ease,
            #[serde(default)]
            segment_eases: Option<Vec<Ease>>,
            #[serde(default)]
            extrapolate_left: Extrapolate,
            #[serde(default)]
            extrapolate_right: Extrapolate,
        }

        let r = Repr::<T>::deserialize(deserializer)?;
        let out = Self {
            input: r.input,
            output: r.output,
            ease: r.ease,
            segment_eases: r.segment_eases,
            extrapolate_left: r.extrapolate_left,
            extrapolate_right: r.extrapolate_right,
        };
        out.validate().map_err(serde::de::Error::custom)?;
        Ok(out)
    }
}

impl<T> Interpolation<T> {
    /// Linear interpolation extending on both sides.
    pub fn new(input: Vec<f64>, output: Vec<T>) -> AdreelResult<Self> {
        let out = Self {
            input,
            output,
            ease: Ease::Linear,
            segment_eases: None,
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
        };
        out.validate()?;
        Ok(out)
    }

    /// Linear interpolation clamped on both sides.
    pub fn clamped(input: Vec<f64>, output: Vec<T>) -> AdreelResult<Self> {
        Ok(Self::new(input, output)?.extrapolate(Extrapolate::Clamp))
    }

    /// Same policy on both sides.
    pub fn extrapolate(self, policy: Extrapolate) -> Self {
        self.extrapolate_left(policy).extrapolate_right(policy)
    }

    /// Policy below the first breakpoint.
    pub fn extrapolate_left(mut self, policy: Extrapolate) -> Self {
        self.extrapolate_left = policy;
        self
    }

    /// Policy above the last breakpoint.
    pub fn extrapolate_right(mut self, policy: Extrapolate) -> Self {
        self.extrapolate_right = policy;
        self
    }

    /// Apply the same easing to every segment.
    pub fn with_ease(mut self, ease: Ease) -> AdreelResult<Self> {
        ease.validate()?;
        self.ease = ease;
        Ok(self)
    }

    /// One easing per segment (`input.len() - 1` entries).
    pub fn with_segment_eases(mut self, eases: Vec<Ease>) -> AdreelResult<Self> {
        self.segment_eases = Some(eases);
        self.validate()?;
        Ok(self)
    }

    /// Breakpoints, strictly increasing.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// One output per breakpoint.
    pub fn output(&self) -> &[T] {
        &self.output
    }

    /// Check breakpoints, output count and easings.
    pub fn validate(&self) -> AdreelResult<()> {
        validate_breakpoints(&self.input, self.output.len())?;
        self.ease.validate()?;
        if let Some(eases) = &self.segment_eases {
            if eases.len() != self.input.len() - 1 {
                return Err(AdreelError::invalid_parameter(format!(
                    "segment eases must have {} entries (one per segment), got {}",
                    self.input.len() - 1,
                    eases.len()
                )));
            }
            for ease in eases {
                ease.validate()?;
            }
        }
        Ok(())
    }

    fn segment_ease(&self, seg: usize) -> Ease {
        self.segment_eases
            .as_ref()
            .and_then(|e| e.get(seg).copied())
            .unwrap_or(self.ease)
    }
}

impl<T> Interpolation<T>
where
    T: Lerp + Clone,
{
    /// Map `x` through the breakpoints. NaN input is an error.
    pub fn sample(&self, x: f64) -> AdreelResult<T> {
        if x.is_nan() {
            return Err(AdreelError::evaluation("interpolation input is NaN"));
        }

        let first = self.input[0];
        let last = self.input[self.input.len() - 1];

        if x < first {
            return Ok(match self.extrapolate_left {
                Extrapolate::Clamp | Extrapolate::Identity => self.output[0].clone(),
                Extrapolate::Extend => self.segment_raw(0, x),
                Extrapolate::Wrap => self.sample_inside(wrap_into(x, first, last)),
            });
        }
        if x > last {
            let seg = self.input.len() - 2;
            return Ok(match self.extrapolate_right {
                Extrapolate::Clamp | Extrapolate::Identity => self.output[seg + 1].clone(),
                Extrapolate::Extend => self.segment_raw(seg, x),
                Extrapolate::Wrap => self.sample_inside(wrap_into(x, first, last)),
            });
        }
        Ok(self.sample_inside(x))
    }

    fn sample_inside(&self, x: f64) -> T {
        let idx = self.input.partition_point(|b| *b <= x);
        let seg = idx.saturating_sub(1).min(self.input.len() - 2);
        let (a, b) = (self.input[seg], self.input[seg + 1]);
        let t = (x - a) / (b - a);
        let te = self.segment_ease(seg).apply(t);
        T::lerp(&self.output[seg], &self.output[seg + 1], te)
    }

    fn segment_raw(&self, seg: usize, x: f64) -> T {
        let (a, b) = (self.input[seg], self.input[seg + 1]);
        let t = (x - a) / (b - a);
        T::lerp(&self.output[seg], &self.output[seg + 1], t)
    }
}

fn validate_breakpoints(input: &[f64], outputs: usize) -> AdreelResult<()> {
    if input.len() < 2 {
        return Err(AdreelError::invalid_parameter(
            "interpolation needs at least 2 breakpoints",
        ));
    }
    if input.len() != outputs {
        return Err(AdreelError::invalid_parameter(format!(
            "interpolation breakpoints ({}) and outputs ({}) must have the same length",
            input.len(),
            outputs
        )));
    }
    if !input.iter().all(|v| v.is_finite()) {
        return Err(AdreelError::invalid_parameter(
            "interpolation breakpoints must be finite",
        ));
    }
    if !input.windows(2).all(|w| w[0] < w[1]) {
        return Err(AdreelError::invalid_parameter(
            "interpolation breakpoints must be strictly increasing",
        ));
    }
    Ok(())
}

fn wrap_into(x: f64, first: f64, last: f64) -> f64 {
    first + (x - first).rem_euclid(last - first)
}

/// Scalar interpolation in one call. Validates the breakpoints on every call.
pub fn interpolate(
    x: f64,
    input: &[f64],
    output: &[f64],
    opts: InterpolateOptions,
) -> AdreelResult<f64> {
    Interpolation::new(input.to_vec(), output.to_vec())?
        .with_ease(opts.ease)?
        .extrapolate_left(opts.left)
        .extrapolate_right(opts.right)
        .sample(x)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
