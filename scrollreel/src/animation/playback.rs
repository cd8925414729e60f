use crate::{
    animation::anim::Prop,
    animation::ease::Ease,
    foundation::error::{ScrollreelError, ScrollreelResult},
    foundation::math::{EPS, clamp01},
    host::document::{Document, ElementId, Selector, StyleWrite},
    host::events::MIN_TIMER_PERIOD_SECS,
    trigger::registry::TriggerEvent,
};

/// What an entrance timeline does when its trigger fires an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToggleAction {
    /// Play forward from the current position.
    Play,
    /// Play backward from the current position.
    Reverse,
    /// Freeze in place.
    Pause,
    /// Continue in the last direction.
    Resume,
    /// Jump to the start and play forward.
    Restart,
    /// Jump to the start and stop.
    Reset,
    /// Jump to the end and stop.
    Complete,
    /// Ignore the event.
    #[default]
    None,
}

/// Toggle actions for the four trigger events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToggleActions {
    /// Scrolling forward into the region.
    pub on_enter: ToggleAction,
    /// Scrolling forward past the region.
    pub on_leave: ToggleAction,
    /// Scrolling back into the region.
    pub on_enter_back: ToggleAction,
    /// Scrolling back above the region.
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::Reverse,
            on_enter_back: ToggleAction::Play,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl ToggleActions {
    /// Play once on enter and never reverse.
    pub fn play_once() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }

    /// Action bound to `event`.
    pub fn for_event(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

/// Wall-clock playhead for an entrance timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrancePlayer {
    time: f64,
    duration: f64,
    forward: bool,
    playing: bool,
}

impl EntrancePlayer {
    /// Stopped at the start of a timeline lasting `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration: duration.max(0.0),
            forward: true,
            playing: false,
        }
    }

    /// Apply a toggle action.
    pub fn apply(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::Play => {
                self.forward = true;
                self.playing = true;
            }
            ToggleAction::Reverse => {
                self.forward = false;
                self.playing = true;
            }
            ToggleAction::Pause => self.playing = false,
            ToggleAction::Resume => self.playing = true,
            ToggleAction::Restart => {
                self.time = 0.0;
                self.forward = true;
                self.playing = true;
            }
            ToggleAction::Reset => {
                self.time = 0.0;
                self.playing = false;
            }
            ToggleAction::Complete => {
                self.time = self.duration;
                self.playing = false;
            }
            ToggleAction::None => {}
        }
        // zero-length timelines finish the instant they are played
        if self.duration == 0.0 {
            self.playing = false;
        }
    }

    /// Advance by `dt` seconds. Returns `true` when the playhead moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.playing || dt <= 0.0 {
            return false;
        }
        let before = self.time;
        let delta = if self.forward { dt } else { -dt };
        self.time = (self.time + delta).clamp(0.0, self.duration);
        let finished = if self.forward {
            self.time >= self.duration
        } else {
            self.time <= 0.0
        };
        if finished {
            self.playing = false;
        }
        (self.time - before).abs() > 0.0
    }

    /// Playhead in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Playhead as `[0, 1]` progress.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            self.time / self.duration
        } else {
            0.0
        }
    }

    /// Return `true` while the playhead is moving.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Return `true` when the playhead moves backward.
    pub fn is_reversed(&self) -> bool {
        !self.forward
    }
}

/// Smoothed follower of scroll progress for scrubbed timelines.
///
/// With `smoothing` of `s` seconds the playhead closes about 98% of the gap to the target in `s`
/// seconds. Without smoothing it snaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubFollower {
    target: f64,
    current: f64,
    smoothing: Option<f64>,
}

impl ScrubFollower {
    /// Follower resting at `progress`.
    pub fn new(progress: f64, smoothing: Option<f64>) -> Self {
        let p = clamp01(progress);
        Self {
            target: p,
            current: p,
            smoothing: smoothing.filter(|s| *s > 0.0),
        }
    }

    /// Move the target.
    pub fn set_target(&mut self, progress: f64) {
        self.target = clamp01(progress);
        if self.smoothing.is_none() {
            self.current = self.target;
        }
    }

    /// Advance by `dt`. Returns `true` when the playhead moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(s) = self.smoothing else {
            return false;
        };
        if dt <= 0.0 || self.is_settled() {
            return false;
        }
        let alpha = 1.0 - (-4.0 * dt / s).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < 1e-4 {
            self.current = self.target;
        }
        true
    }

    /// Current playhead.
    pub fn progress(&self) -> f64 {
        self.current
    }

    /// Target progress.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Return `true` once the playhead has caught up.
    pub fn is_settled(&self) -> bool {
        (self.target - self.current).abs() <= EPS
    }
}

/// Looping strategy for ambient loops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Wrap at the period boundary.
    #[default]
    Repeat,
    /// Bounce forward and backward across the period.
    PingPong,
}

/// Endless wall-clock animation of one property (orbits, floating yoyo).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopSpec {
    /// Targets within the section.
    pub target: Selector,
    /// Animated property.
    pub prop: Prop,
    /// Value at phase 0.
    pub from: f64,
    /// Value at phase 1.
    pub to: f64,
    /// One pass, in seconds.
    pub period: f64,
    /// Wrap or bounce.
    #[serde(default)]
    pub mode: LoopMode,
    /// Ease within one pass.
    #[serde(default = "linear")]
    pub ease: Ease,
}

fn linear() -> Ease {
    Ease::Linear
}

impl LoopSpec {
    /// Check numeric invariants.
    pub fn validate(&self) -> ScrollreelResult<()> {
        if !self.period.is_finite() || self.period <= 0.0 {
            return Err(ScrollreelError::validation(format!(
                "loop on {} must have a positive period",
                self.target
            )));
        }
        if !self.from.is_finite() || !self.to.is_finite() || !self.ease.is_valid() {
            return Err(ScrollreelError::validation(format!(
                "loop on {} has invalid values",
                self.target
            )));
        }
        Ok(())
    }

    /// Phase in `[0, 1]` at `time` seconds (before easing).
    pub fn phase(&self, time: f64) -> f64 {
        let t = time.max(0.0);
        match self.mode {
            LoopMode::Repeat => (t % self.period) / self.period,
            LoopMode::PingPong => {
                let cycle = 2.0 * self.period;
                let pos = t % cycle;
                if pos < self.period {
                    pos / self.period
                } else {
                    (cycle - pos) / self.period
                }
            }
        }
    }

    /// Property value at `time` seconds.
    pub fn value_at(&self, time: f64) -> f64 {
        let e = self.ease.apply(self.phase(time));
        self.from + (self.to - self.from) * e
    }
}

/// A [`LoopSpec`] bound to its targets with its own clock.
#[derive(Clone, Debug)]
pub struct AmbientLoop {
    spec: LoopSpec,
    targets: Vec<ElementId>,
    time: f64,
}

impl AmbientLoop {
    /// Bind to the elements under `scope`.
    pub fn bind(spec: &LoopSpec, doc: &Document, scope: ElementId) -> ScrollreelResult<Self> {
        spec.validate()?;
        let targets = doc.query(scope, &spec.target);
        if targets.is_empty() {
            tracing::debug!(selector = %spec.target, "loop target matches no element");
        }
        Ok(Self {
            spec: spec.clone(),
            targets,
            time: 0.0,
        })
    }

    /// Advance the loop clock.
    pub fn tick(&mut self, dt: f64) {
        self.time += dt.max(0.0);
    }

    /// Emit the current value for every target.
    pub fn writes(&self, out: &mut Vec<StyleWrite>) {
        let value = self.spec.value_at(self.time);
        out.extend(self.targets.iter().map(|&element| StyleWrite {
            element,
            prop: self.spec.prop,
            value,
        }));
    }

    /// Return `true` when the loop drives at least one element.
    pub fn is_bound(&self) -> bool {
        !self.targets.is_empty()
    }
}

/// Rotating word index (the hero's cycling verb).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextCycleSpec {
    /// Words in display order.
    pub words: Vec<String>,
    /// Seconds each word stays visible.
    pub period: f64,
}

impl TextCycleSpec {
    /// Check invariants.
    pub fn validate(&self) -> ScrollreelResult<()> {
        if self.words.is_empty() {
            return Err(ScrollreelError::validation("text cycle needs at least one word"));
        }
        if !self.period.is_finite() || self.period < MIN_TIMER_PERIOD_SECS {
            return Err(ScrollreelError::validation(format!(
                "text cycle period must be finite and >= {MIN_TIMER_PERIOD_SECS}s"
            )));
        }
        Ok(())
    }
}

/// Current position of a [`TextCycleSpec`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextCycle {
    words: Vec<String>,
    index: usize,
}

impl TextCycle {
    /// Start at the first word.
    pub fn new(spec: &TextCycleSpec) -> Self {
        Self {
            words: spec.words.clone(),
            index: 0,
        }
    }

    /// Move to the next word, wrapping.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.words.len().max(1);
    }

    /// Current index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current word.
    pub fn word(&self) -> &str {
        self.words.get(self.index).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playback.rs"]
mod tests;
