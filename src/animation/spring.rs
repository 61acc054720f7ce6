//! Damped harmonic oscillator progress curves.
//!
//! A spring is released at displacement 0 and settles toward 1. The state is advanced one frame
//! (`1/fps` seconds) at a time with the exact closed-form step solution, so the result only depends
//! on the configuration, the frame rate and the queried frame offset.

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Fps,
    error::{AdreelError, AdreelResult},
};

/// `|1 - x|` below this counts as settled when measuring natural duration.
pub const REST_THRESHOLD: f64 = 0.005;
/// Frames a spring must stay settled before its natural duration is final.
const REST_FRAMES: u32 = 20;
/// Upper bound on frames scanned while measuring natural duration.
const MAX_MEASURE_FRAMES: u64 = 1_000_000;

/// Physical spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Must be > 0.
    pub mass: f64,
    /// Must be > 0.
    pub stiffness: f64,
    /// Must be >= 0; 0 oscillates forever.
    pub damping: f64,
    /// Initial velocity toward the target, in progress units per second.
    #[serde(default)]
    pub initial_velocity: f64,
    /// Never report progress above 1.0.
    #[serde(default)]
    pub overshoot_clamping: bool,
    /// Rescale time so the spring settles in this many frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            initial_velocity: 0.0,
            overshoot_clamping: false,
            duration_frames: None,
        }
    }
}

impl SpringConfig {
    /// Heavily damped, no overshoot.
    pub const SMOOTH: Self = Self::physics(1.0, 100.0, 200.0);
    /// Fast with a small overshoot.
    pub const SNAPPY: Self = Self::physics(0.8, 200.0, 20.0);
    /// Visible bounce.
    pub const BOUNCY: Self = Self::physics(1.0, 150.0, 12.0);
    /// Slow, weighty settle.
    pub const HEAVY: Self = Self::physics(1.5, 80.0, 18.0);
    /// Several oscillations before settling.
    pub const ELASTIC: Self = Self::physics(1.0, 120.0, 8.0);

    /// Config from raw physics parameters, at rest and unclamped.
    pub const fn physics(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
            initial_velocity: 0.0,
            overshoot_clamping: false,
            duration_frames: None,
        }
    }

    /// Replace damping.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.initial_velocity = velocity;
        self
    }

    /// Cap progress at 1.0.
    pub fn with_overshoot_clamping(mut self, on: bool) -> Self {
        self.overshoot_clamping = on;
        self
    }

    /// Stretch or squeeze the spring to settle in `frames`.
    pub fn with_duration(mut self, frames: u64) -> Self {
        self.duration_frames = Some(frames);
        self
    }

    /// Damping ratio ζ; `>= 1` never overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Reject non-finite or out-of-range parameters and unsatisfiable duration overrides.
    pub fn validate(&self) -> AdreelResult<()> {
        let finite = [
            self.mass,
            self.stiffness,
            self.damping,
            self.initial_velocity,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(AdreelError::invalid_parameter(
                "spring parameters must be finite",
            ));
        }
        if self.mass <= 0.0 {
            return Err(AdreelError::invalid_parameter("spring mass must be > 0"));
        }
        if self.stiffness <= 0.0 {
            return Err(AdreelError::invalid_parameter(
                "spring stiffness must be > 0",
            ));
        }
        if self.damping < 0.0 {
            return Err(AdreelError::invalid_parameter(
                "spring damping must be >= 0",
            ));
        }
        match self.duration_frames {
            Some(0) => Err(AdreelError::invalid_parameter(
                "spring duration override must be > 0 frames",
            )),
            Some(_) if self.damping == 0.0 => Err(AdreelError::invalid_parameter(
                "spring duration override requires damping > 0 (an undamped spring never settles)",
            )),
            _ => Ok(()),
        }
    }
}

/// Call-site mapping of spring progress into a value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringOptions {
    /// Value at progress 0.
    #[serde(default)]
    pub from: f64,
    /// Value at progress 1.
    #[serde(default = "one")]
    pub to: f64,
    /// Frames to wait before the spring starts.
    #[serde(default)]
    pub delay: f64,
    /// Play the settle backwards (1 → 0 in progress space).
    #[serde(default)]
    pub reverse: bool,
}

fn one() -> f64 {
    1.0
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            delay: 0.0,
            reverse: false,
        }
    }
}

impl SpringOptions {
    /// Map progress onto `from..to`.
    pub fn range(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            ..Self::default()
        }
    }

    /// Start `frames` later.
    pub fn delayed(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Play backwards.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SpringState {
    position: f64,
    velocity: f64,
}

/// A validated spring bound to a frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    fps: Fps,
    /// Natural frames per requested frame (1.0 without a duration override).
    time_scale: f64,
    natural_duration: Option<u64>,
}

impl Spring {
    /// Validate `config` and measure its natural duration when a duration override is set.
    ///
    /// Build once and reuse: every [`progress`](Self::progress) call integrates from frame 0.
    pub fn new(config: SpringConfig, fps: Fps) -> AdreelResult<Self> {
        config.validate()?;
        let mut spring = Self {
            config,
            fps,
            time_scale: 1.0,
            natural_duration: None,
        };
        if let Some(duration) = config.duration_frames {
            let natural = spring.measure_natural_duration()?;
            spring.natural_duration = Some(natural);
            spring.time_scale = natural as f64 / duration as f64;
        }
        Ok(spring)
    }

    /// Configuration the spring was built from.
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Frames until the unscaled spring stays within [`REST_THRESHOLD`] of 1.
    pub fn natural_duration(&self) -> AdreelResult<u64> {
        match self.natural_duration {
            Some(n) => Ok(n),
            None => self.measure_natural_duration(),
        }
    }

    /// Visible duration in frames: the override when set, otherwise the natural duration.
    pub fn duration(&self) -> AdreelResult<u64> {
        match self.config.duration_frames {
            Some(d) => Ok(d),
            None => self.natural_duration(),
        }
    }

    /// Progress at `frame` frames after the spring's start. Negative offsets return exactly 0.
    pub fn progress(&self, frame: f64) -> f64 {
        if frame.is_nan() || frame <= 0.0 {
            return 0.0;
        }
        let state = self.state_at(frame * self.time_scale);
        self.finish(state.position)
    }

    /// Integer-frame form of [`progress`](Self::progress).
    pub fn progress_at(&self, frame: i64) -> f64 {
        self.progress(frame as f64)
    }

    /// Progress mapped through `opts` (`from`/`to`, `delay`, `reverse`).
    pub fn value(&self, frame: f64, opts: &SpringOptions) -> AdreelResult<f64> {
        let local = if opts.reverse {
            self.duration()? as f64 - frame + opts.delay
        } else {
            frame - opts.delay
        };
        let p = self.progress(local);
        Ok(opts.from + (opts.to - opts.from) * p)
    }

    /// Progress for frames `0, 1, 2, ...`, bit-identical to [`Spring::progress`].
    pub fn iter(&self) -> SpringIter {
        SpringIter {
            spring: *self,
            state: SpringState {
                position: 0.0,
                velocity: self.config.initial_velocity,
            },
            frame: 0,
        }
    }

    fn finish(&self, position: f64) -> f64 {
        if self.config.overshoot_clamping {
            position.min(1.0)
        } else {
            position
        }
    }

    fn dt(&self) -> f64 {
        self.fps.frame_duration_secs()
    }

    fn state_at(&self, frame: f64) -> SpringState {
        let mut state = SpringState {
            position: 0.0,
            velocity: self.config.initial_velocity,
        };
        let whole = frame.floor();
        let rest = frame - whole;
        let dt = self.dt();
        for _ in 0..(whole as u64) {
            state = advance(state, dt, &self.config);
        }
        if rest > 0.0 {
            state = advance(state, rest * dt, &self.config);
        }
        state
    }

    fn measure_natural_duration(&self) -> AdreelResult<u64> {
        let dt = self.dt();
        let mut state = SpringState {
            position: 0.0,
            velocity: self.config.initial_velocity,
        };
        let off = |s: &SpringState| (1.0 - s.position).abs() >= REST_THRESHOLD;

        let mut frame = 0u64;
        while off(&state) {
            frame += 1;
            if frame > MAX_MEASURE_FRAMES {
                return Err(AdreelError::invalid_parameter(
                    "spring does not settle; cannot measure its natural duration",
                ));
            }
            state = advance(state, dt, &self.config);
        }

        let mut finished = frame;
        let mut settled_for = 0u32;
        while settled_for < REST_FRAMES {
            frame += 1;
            state = advance(state, dt, &self.config);
            if off(&state) {
                finished = frame + 1;
                settled_for = 0;
            } else {
                settled_for += 1;
            }
            if frame > MAX_MEASURE_FRAMES {
                return Err(AdreelError::invalid_parameter(
                    "spring does not settle; cannot measure its natural duration",
                ));
            }
        }
        Ok(finished)
    }
}

/// Iterator over integer-frame spring progress.
#[derive(Clone, Debug)]
pub struct SpringIter {
    spring: Spring,
    state: SpringState,
    frame: u64,
}

impl Iterator for SpringIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let out = if self.spring.time_scale == 1.0 {
            if self.frame > 0 {
                self.state = advance(self.state, self.spring.dt(), &self.spring.config);
            }
            self.spring.finish(self.state.position)
        } else {
            self.spring.progress(self.frame as f64)
        };
        self.frame += 1;
        Some(out)
    }
}

/// Exact step of `m x'' = k (1 - x) - c x'` over `dt` seconds.
///
/// Configurations with ζ >= 1 follow the critically-damped envelope at ω0.
fn advance(state: SpringState, dt: f64, cfg: &SpringConfig) -> SpringState {
    let (k, c, m) = (cfg.stiffness, cfg.damping, cfg.mass);
    let v0 = -state.velocity;
    let x0 = 1.0 - state.position;
    let zeta = c / (2.0 * (k * m).sqrt());
    let omega0 = (k / m).sqrt();

    if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * dt).exp();
        let (sin1, cos1) = (omega1 * dt).sin_cos();
        let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
        SpringState {
            position: 1.0 - frag,
            velocity: zeta * omega0 * frag
                - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1),
        }
    } else {
        let envelope = (-omega0 * dt).exp();
        SpringState {
            position: 1.0 - envelope * (x0 + (v0 + omega0 * x0) * dt),
            velocity: envelope * (v0 * (dt * omega0 - 1.0) + dt * x0 * omega0 * omega0),
        }
    }
}

/// One-shot spring progress at an integer frame offset.
pub fn spring(frame: i64, fps: Fps, config: SpringConfig) -> AdreelResult<f64> {
    Ok(Spring::new(config, fps)?.progress_at(frame))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
