use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::FrameIndex,
    error::{AdreelError, AdreelResult},
};

/// A named window of the composition timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique within a timeline.
    pub name: String,
    /// First active global frame.
    pub start: u64,
    /// Active frames; must be > 0.
    pub duration: u64,
    /// Frames before `start` during which the scene is mounted but hidden.
    #[serde(default)]
    pub premount: u64,
}

/// Where a global frame falls relative to one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    /// Before the premount window.
    NotStarted,
    /// Mounted but hidden; `local` is negative.
    Premounting {
        /// Frames relative to the scene start.
        local: i64,
    },
    /// On screen.
    Active {
        /// Frames since the scene start.
        local: i64,
    },
    /// At or past the scene end.
    Finished,
}

impl Scene {
    /// Scene without premount. Empty names and zero durations are rejected.
    pub fn new(name: impl Into<String>, start: u64, duration: u64) -> AdreelResult<Self> {
        let scene = Self {
            name: name.into(),
            start,
            duration,
            premount: 0,
        };
        scene.validate()?;
        Ok(scene)
    }

    /// Mount `frames` frames before `start`.
    pub fn with_premount(mut self, frames: u64) -> Self {
        self.premount = frames;
        self
    }

    /// Check the name and duration.
    pub fn validate(&self) -> AdreelResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdreelError::validation("scene name must be non-empty"));
        }
        if self.duration == 0 {
            return Err(AdreelError::validation(format!(
                "scene '{}' duration must be > 0 frames",
                self.name
            )));
        }
        Ok(())
    }

    /// One past the last active frame.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }

    /// Frames since `start`; negative before it.
    pub fn local_frame(&self, global: FrameIndex) -> i64 {
        global.0 as i64 - self.start as i64
    }

    /// Where `global` falls relative to this scene.
    pub fn state(&self, global: FrameIndex) -> SceneState {
        let g = global.0;
        if g >= self.end() {
            SceneState::Finished
        } else if g >= self.start {
            SceneState::Active {
                local: self.local_frame(global),
            }
        } else if g >= self.start.saturating_sub(self.premount) {
            SceneState::Premounting {
                local: self.local_frame(global),
            }
        } else {
            SceneState::NotStarted
        }
    }

    /// `true` inside `[start, end)`.
    pub fn is_active(&self, global: FrameIndex) -> bool {
        matches!(self.state(global), SceneState::Active { .. })
    }

    /// Local frame while active, `None` outside the window.
    pub fn active_local(&self, global: FrameIndex) -> Option<i64> {
        match self.state(global) {
            SceneState::Active { local } => Some(local),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scene.rs"]
mod tests;
