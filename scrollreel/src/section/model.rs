use crate::{
    animation::playback::{LoopSpec, TextCycleSpec, ToggleActions},
    animation::timeline::TimelineSpec,
    effects::pointer::PointerEffect,
    foundation::error::{ScrollreelError, ScrollreelResult},
    host::document::Selector,
    trigger::registry::TriggerSpec,
};

/// How a section's timeline is clocked.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SectionMode {
    /// Plays on wall-clock time when the trigger fires.
    Entrance {
        /// Reaction to each trigger event.
        #[serde(default)]
        toggle_actions: ToggleActions,
    },
    /// Progress follows the trigger's scroll progress.
    Scrub {
        /// Seconds of lag; `None` snaps to scroll progress.
        #[serde(default)]
        smoothing: Option<f64>,
    },
}

impl Default for SectionMode {
    fn default() -> Self {
        Self::Entrance {
            toggle_actions: ToggleActions::default(),
        }
    }
}

/// Declarative description of one page section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    /// Section identifier (used in logs, snapshots and navigation).
    pub id: String,
    /// Root element of the section's subtree.
    pub root: Selector,
    /// Trigger region; without one, entrance timelines play at mount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerSpec>,
    /// Timeline clock.
    #[serde(default)]
    pub mode: SectionMode,
    /// Main timeline.
    #[serde(default)]
    pub timeline: TimelineSpec,
    /// Replacement timeline for mobile viewports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_timeline: Option<TimelineSpec>,
    /// Pointer-reactive effects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<PointerEffect>,
    /// Ambient loops.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loops: Vec<LoopSpec>,
    /// Rotating word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_cycle: Option<TextCycleSpec>,
}

impl SectionSpec {
    /// Section `id` rooted at `#id`, with an empty entrance timeline.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            root: Selector::Id(id.clone()),
            id,
            trigger: None,
            mode: SectionMode::default(),
            timeline: TimelineSpec::new(),
            mobile_timeline: None,
            effects: Vec::new(),
            loops: Vec::new(),
            text_cycle: None,
        }
    }

    /// Override the root selector.
    pub fn root(mut self, root: Selector) -> Self {
        self.root = root;
        self
    }

    /// Set the trigger region.
    pub fn trigger(mut self, trigger: TriggerSpec) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Entrance playback with the given toggle actions.
    pub fn entrance(mut self, toggle_actions: ToggleActions) -> Self {
        self.mode = SectionMode::Entrance { toggle_actions };
        self
    }

    /// Scrubbed playback.
    pub fn scrub(mut self, smoothing: Option<f64>) -> Self {
        self.mode = SectionMode::Scrub { smoothing };
        self
    }

    /// Set the main timeline.
    pub fn timeline(mut self, timeline: TimelineSpec) -> Self {
        self.timeline = timeline;
        self
    }

    /// Set the mobile replacement timeline.
    pub fn mobile_timeline(mut self, timeline: TimelineSpec) -> Self {
        self.mobile_timeline = Some(timeline);
        self
    }

    /// Add a pointer effect.
    pub fn effect(mut self, effect: PointerEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add an ambient loop.
    pub fn looping(mut self, spec: LoopSpec) -> Self {
        self.loops.push(spec);
        self
    }

    /// Set the rotating word.
    pub fn text_cycle(mut self, spec: TextCycleSpec) -> Self {
        self.text_cycle = Some(spec);
        self
    }

    /// Return `true` for scrubbed sections.
    pub fn is_scrub(&self) -> bool {
        matches!(self.mode, SectionMode::Scrub { .. })
    }

    /// Check everything that does not need the document.
    pub fn validate(&self) -> ScrollreelResult<()> {
        let ctx = |e: ScrollreelError| {
            let detail = match e {
                ScrollreelError::Validation(msg) => msg,
                other => other.to_string(),
            };
            ScrollreelError::validation(format!("section '{}': {detail}", self.id))
        };
        if self.id.trim().is_empty() {
            return Err(ScrollreelError::validation("section id must be non-empty"));
        }
        self.timeline.validate().map_err(ctx)?;
        if let Some(m) = &self.mobile_timeline {
            m.validate().map_err(ctx)?;
        }
        for e in &self.effects {
            e.validate().map_err(ctx)?;
        }
        for l in &self.loops {
            l.validate().map_err(ctx)?;
        }
        if let Some(t) = &self.text_cycle {
            t.validate().map_err(ctx)?;
        }
        match self.mode {
            SectionMode::Scrub { smoothing } => {
                if self.trigger.is_none() {
                    return Err(ScrollreelError::validation(format!(
                        "section '{}': scrub mode needs a trigger",
                        self.id
                    )));
                }
                if smoothing.is_some_and(|s| !s.is_finite() || s < 0.0) {
                    return Err(ScrollreelError::validation(format!(
                        "section '{}': smoothing must be finite and >= 0",
                        self.id
                    )));
                }
            }
            SectionMode::Entrance { .. } => {
                if self.trigger.is_some_and(|t| t.pin.is_some()) {
                    return Err(ScrollreelError::validation(format!(
                        "section '{}': pinning requires scrub mode",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/model.rs"]
mod tests;
