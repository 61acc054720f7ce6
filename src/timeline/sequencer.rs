use std::collections::BTreeSet;

use crate::{
    foundation::{
        core::{Fps, FrameIndex},
        error::{AdreelError, AdreelResult},
    },
    timeline::{
        scene::{Scene, SceneState},
        transition::{ResolvedTiming, Transition},
    },
};

/// Builder for back-to-back scenes where each optional transition overlaps its neighbors.
#[derive(Clone, Debug, Default)]
pub struct TransitionSeries {
    items: Vec<SeriesItem>,
}

#[derive(Clone, Debug)]
enum SeriesItem {
    Scene { name: String, duration: u64 },
    Premount(u64),
    Transition(Transition),
}

impl TransitionSeries {
    /// Empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene after the previous scene, or overlapping it by a pending transition.
    pub fn scene(mut self, name: impl Into<String>, duration: u64) -> Self {
        self.items.push(SeriesItem::Scene {
            name: name.into(),
            duration,
        });
        self
    }

    /// Premount the scene added just before this call.
    ///
    /// Anywhere else (an empty series, or right after a transition or another premount)
    /// [`build`](Self::build) fails with a validation error.
    pub fn premount(mut self, frames: u64) -> Self {
        self.items.push(SeriesItem::Premount(frames));
        self
    }

    /// Overlap the previous and next scene by the transition width.
    pub fn transition(mut self, transition: Transition) -> Self {
        self.items.push(SeriesItem::Transition(transition));
        self
    }

    /// Lay the scenes out from frame 0 and validate widths, names and item order.
    pub fn build(self, fps: Fps) -> AdreelResult<Timeline> {
        let mut scenes = Vec::<Scene>::new();
        let mut links = Vec::<Option<Transition>>::new();
        let mut pending: Option<Transition> = None;
        let mut cursor = 0u64;
        let mut after_scene = false;

        for item in self.items {
            let is_scene = matches!(item, SeriesItem::Scene { .. });
            match item {
                SeriesItem::Premount(frames) => match scenes.last_mut() {
                    Some(scene) if after_scene => scene.premount = frames,
                    _ => {
                        return Err(AdreelError::validation(
                            "premount must directly follow a scene",
                        ));
                    }
                },
                SeriesItem::Transition(t) => {
                    if scenes.is_empty() {
                        return Err(AdreelError::validation(
                            "transition series cannot start with a transition",
                        ));
                    }
                    if pending.is_some() {
                        return Err(AdreelError::validation(
                            "transition series cannot have two adjacent transitions",
                        ));
                    }
                    pending = Some(t);
                }
                SeriesItem::Scene { name, duration } => {
                    let overlap = pending.as_ref().map_or(0, Transition::width);
                    let start = cursor.checked_sub(overlap).ok_or_else(|| {
                        AdreelError::validation(format!(
                            "transition into '{name}' is longer than the series so far"
                        ))
                    })?;
                    let scene = Scene::new(name, start, duration)?;
                    cursor = scene.end();
                    if !scenes.is_empty() {
                        links.push(pending.take());
                    }
                    scenes.push(scene);
                }
            }
            after_scene = is_scene;
        }
        if pending.is_some() {
            return Err(AdreelError::validation(
                "transition series cannot end with a transition",
            ));
        }
        Timeline::from_parts(scenes, links, fps)
    }
}

/// Resolved scene layout. Pure: every query is a function of the global frame alone.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    scenes: Vec<Scene>,
    /// `links[k]` joins `scenes[k]` and `scenes[k + 1]`.
    links: Vec<Option<(Transition, ResolvedTiming)>>,
    fps: Fps,
}

/// A scene visible (or premounted) at some frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SceneFrame {
    /// Position in the timeline.
    pub index: usize,
    /// Scene name.
    pub name: String,
    /// Frames since the scene start; negative while premounting.
    pub local: i64,
}

/// The transition in progress at some frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveTransition {
    /// Index of the outgoing scene; the incoming one is `from + 1`.
    pub from: usize,
    /// Index of the incoming scene.
    pub to: usize,
    /// Frames since the overlap window opened.
    pub local: i64,
    /// Timing progress in `[0, 1]`.
    pub progress: f64,
    /// Presentation and timing.
    #[serde(skip)]
    pub transition: Transition,
}

/// Timeline state at one global frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineFrame {
    /// Queried global frame.
    pub frame: FrameIndex,
    /// Scenes on screen, in scene order.
    pub active: Vec<SceneFrame>,
    /// Scenes mounted but hidden.
    pub premounting: Vec<SceneFrame>,
    /// Transition whose window contains the frame.
    pub transition: Option<ActiveTransition>,
}

impl TimelineFrame {
    /// `true` when `name` is on screen.
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|s| s.name == name)
    }

    /// Local frame of an active scene, `None` when it is not on screen.
    pub fn local(&self, name: &str) -> Option<i64> {
        self.active.iter().find(|s| s.name == name).map(|s| s.local)
    }
}

impl Timeline {
    /// Scenes at absolute positions with no transitions. Scenes may overlap freely.
    pub fn absolute(scenes: Vec<Scene>, fps: Fps) -> AdreelResult<Self> {
        Self::from_parts(scenes, Vec::new(), fps)
    }

    fn from_parts(
        scenes: Vec<Scene>,
        links: Vec<Option<Transition>>,
        fps: Fps,
    ) -> AdreelResult<Self> {
        if scenes.is_empty() {
            return Err(AdreelError::validation(
                "timeline must contain at least one scene",
            ));
        }
        let mut names = BTreeSet::new();
        for s in &scenes {
            s.validate()?;
            if !names.insert(s.name.as_str()) {
                return Err(AdreelError::validation(format!(
                    "duplicate scene name '{}'",
                    s.name
                )));
            }
        }

        let mut resolved = Vec::with_capacity(links.len());
        for (k, link) in links.into_iter().enumerate() {
            let Some(t) = link else {
                resolved.push(None);
                continue;
            };
            let (prev, next) = (&scenes[k], &scenes[k + 1]);
            let w = t.width();
            if w > prev.duration || w > next.duration {
                return Err(AdreelError::validation(format!(
                    "transition width {w} between '{}' ({}) and '{}' ({}) exceeds a scene duration",
                    prev.name, prev.duration, next.name, next.duration
                )));
            }
            resolved.push(Some((t, t.resolve(fps)?)));
        }

        // Two transitions touching the same scene must not overlap each other.
        for k in 1..scenes.len().saturating_sub(1) {
            let w_in = resolved[k - 1].as_ref().map_or(0, |(t, _)| t.width());
            let w_out = resolved[k].as_ref().map_or(0, |(t, _)| t.width());
            if w_in + w_out > scenes[k].duration {
                return Err(AdreelError::validation(format!(
                    "transitions around '{}' ({} + {} frames) exceed its duration {}",
                    scenes[k].name, w_in, w_out, scenes[k].duration
                )));
            }
        }

        Ok(Self {
            scenes,
            links: resolved,
            fps,
        })
    }

    /// Scenes in order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Scene by name.
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name == name)
    }

    /// Frame rate transitions were resolved at.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// One past the last frame of the last-ending scene.
    pub fn duration(&self) -> u64 {
        self.scenes.iter().map(Scene::end).max().unwrap_or(0)
    }

    /// Transition between scene `index` and the next one.
    pub fn transition_after(&self, index: usize) -> Option<&Transition> {
        self.links.get(index)?.as_ref().map(|(t, _)| t)
    }

    /// Scene, premount and transition state at `global`.
    pub fn frame(&self, global: FrameIndex) -> TimelineFrame {
        let mut active = Vec::new();
        let mut premounting = Vec::new();
        for (index, scene) in self.scenes.iter().enumerate() {
            let entry = |local| SceneFrame {
                index,
                name: scene.name.clone(),
                local,
            };
            match scene.state(global) {
                SceneState::Active { local } => active.push(entry(local)),
                SceneState::Premounting { local } => premounting.push(entry(local)),
                SceneState::NotStarted | SceneState::Finished => {}
            }
        }

        let transition = self.links.iter().enumerate().find_map(|(k, link)| {
            let (t, timing) = link.as_ref()?;
            let next = &self.scenes[k + 1];
            let window_end = self.scenes[k].end();
            if global.0 < next.start || global.0 >= window_end {
                return None;
            }
            let local = next.local_frame(global);
            Some(ActiveTransition {
                from: k,
                to: k + 1,
                local,
                progress: timing.progress(local),
                transition: *t,
            })
        });

        TimelineFrame {
            frame: global,
            active,
            premounting,
            transition,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
