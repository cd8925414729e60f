use crate::{
    animation::playback::{
        AmbientLoop, EntrancePlayer, ScrubFollower, TextCycle, ToggleAction, ToggleActions,
    },
    animation::timeline::{Clock, Drive, Timeline},
    effects::pointer::EffectRuntime,
    foundation::core::{Point, Viewport},
    foundation::error::ScrollreelResult,
    host::document::{Document, ElementId, OwnerId, StyleWrite},
    host::events::{EventBus, EventKind, Listener, ListenerScope, Purpose, RegId, Subscription},
    policy::{MotionProfile, ViewportClass},
    section::model::{SectionMode, SectionSpec},
    trigger::pin::{PinPhase, PinState},
    trigger::registry::{TriggerHandle, TriggerRegistry},
};

/// Shared engine services a controller registers with at mount.
#[derive(Clone, Copy, Debug)]
pub struct MountCtx<'a> {
    /// Page document.
    pub doc: &'a Document,
    /// Listener and timer registry.
    pub bus: &'a EventBus,
    /// Trigger registry.
    pub triggers: &'a TriggerRegistry,
    /// Active motion profile.
    pub profile: MotionProfile,
    /// Engine time in seconds.
    pub now: f64,
}

/// Per-section state exposed in snapshots.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionStatus {
    /// Section id.
    pub id: String,
    /// Mounted with a resolved root.
    pub mounted: bool,
    /// Scroll position is inside the trigger region.
    pub active: bool,
    /// Timeline playhead in `[0, 1]`.
    pub progress: f64,
    /// Pin geometry when pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinState>,
    /// Current rotating word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

#[derive(Debug)]
enum Playback {
    Idle,
    Entrance {
        timeline: Timeline,
        player: EntrancePlayer,
        actions: ToggleActions,
    },
    Scrub {
        timeline: Timeline,
        follower: ScrubFollower,
    },
}

#[derive(Debug)]
struct Mounted {
    root: ElementId,
    trigger: Option<TriggerHandle>,
    playback: Playback,
    effects: EffectRuntime,
    loops: Vec<AmbientLoop>,
    text: Option<(TextCycle, Subscription)>,
    subscriptions: Vec<Subscription>,
    active: bool,
    pin: Option<PinState>,
}

/// Lifecycle owner of one section: mount, event handling, rendering, unmount.
#[derive(Debug)]
pub struct SectionController {
    spec: SectionSpec,
    owner: OwnerId,
    mounted: Option<Mounted>,
}

impl SectionController {
    /// Unmounted controller writing styles as `owner`.
    pub fn new(spec: SectionSpec, owner: OwnerId) -> Self {
        Self {
            spec,
            owner,
            mounted: None,
        }
    }

    /// Section spec.
    pub fn spec(&self) -> &SectionSpec {
        &self.spec
    }

    /// Style-write identity.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Return `true` while mounted with a resolved root.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Resolved root element.
    pub fn root(&self) -> Option<ElementId> {
        self.mounted.as_ref().map(|m| m.root)
    }

    /// Bind timelines, register the trigger and listeners.
    ///
    /// A root that matches nothing leaves the controller inert.
    #[tracing::instrument(skip(self, ctx), fields(section = %self.spec.id))]
    pub fn mount(&mut self, ctx: MountCtx<'_>) -> ScrollreelResult<()> {
        if self.mounted.is_some() {
            return Ok(());
        }
        let Some(root) = ctx.doc.resolve_root(&self.spec.root) else {
            tracing::warn!(root = %self.spec.root, "section root not found; staying inert");
            return Ok(());
        };
        let profile = ctx.profile;

        let authored = match (&self.spec.mobile_timeline, profile.class) {
            (Some(mobile), ViewportClass::Mobile) => mobile,
            _ => &self.spec.timeline,
        };
        let degraded;
        let timeline_spec = if profile.reduced {
            degraded = authored.fades_only();
            &degraded
        } else {
            authored
        };

        let mode = if !profile.scrub {
            SectionMode::Entrance {
                toggle_actions: ToggleActions::play_once(),
            }
        } else {
            self.spec.mode
        };
        let scrub = matches!(mode, SectionMode::Scrub { .. });

        let mut subscriptions = Vec::new();
        let listen = |kind, scope, purpose| {
            ctx.bus.listen(Listener {
                owner: self.owner,
                kind,
                scope,
                purpose,
            })
        };

        let trigger = match self.spec.trigger {
            Some(mut t) => {
                if !(scrub && profile.pin) {
                    t.pin = None;
                }
                let handle = ctx.triggers.register(root, t, scrub)?;
                subscriptions.push(listen(EventKind::Scroll, ListenerScope::Window, Purpose::Trigger));
                subscriptions.push(listen(EventKind::Resize, ListenerScope::Window, Purpose::Trigger));
                Some(handle)
            }
            None => None,
        };

        let playback = match mode {
            _ if timeline_spec.is_empty() => Playback::Idle,
            SectionMode::Scrub { smoothing } => Playback::Scrub {
                timeline: Timeline::bind(timeline_spec, ctx.doc, root, Drive::Scrub)?,
                follower: ScrubFollower::new(0.0, smoothing),
            },
            SectionMode::Entrance { toggle_actions } => {
                let timeline = Timeline::bind(timeline_spec, ctx.doc, root, Drive::Entrance)?;
                let mut player = EntrancePlayer::new(timeline.duration());
                if trigger.is_none() {
                    player.apply(ToggleAction::Play);
                }
                Playback::Entrance {
                    timeline,
                    player,
                    actions: toggle_actions,
                }
            }
        };

        let effects = if profile.pointer && !self.spec.effects.is_empty() {
            let rt = EffectRuntime::bind(&self.spec.effects, ctx.doc, root)?;
            for effect in &self.spec.effects {
                for (kind, scope) in effect.listeners(ctx.doc, root) {
                    subscriptions.push(listen(kind, scope, Purpose::Transform));
                }
            }
            subscriptions.push(listen(
                EventKind::PointerLeave,
                ListenerScope::Window,
                Purpose::Transform,
            ));
            rt
        } else {
            EffectRuntime::default()
        };

        let loops = if profile.loops {
            self.spec
                .loops
                .iter()
                .map(|l| AmbientLoop::bind(l, ctx.doc, root))
                .collect::<ScrollreelResult<Vec<_>>>()?
        } else {
            Vec::new()
        };

        let text = self.spec.text_cycle.as_ref().map(|spec| {
            (
                TextCycle::new(spec),
                ctx.bus.interval(self.owner, ctx.now, spec.period),
            )
        });

        tracing::debug!(
            scrub,
            reduced = profile.reduced,
            listeners = subscriptions.len(),
            "section mounted"
        );
        self.mounted = Some(Mounted {
            root,
            trigger,
            playback,
            effects,
            loops,
            text,
            subscriptions,
            active: false,
            pin: None,
        });
        Ok(())
    }

    /// Drop every registration, cancel in-flight motion and revert written styles.
    ///
    /// Returns the number of inline styles reverted.
    #[tracing::instrument(skip(self, doc), fields(section = %self.spec.id))]
    pub fn unmount(&mut self, doc: &mut Document) -> usize {
        let Some(mut m) = self.mounted.take() else {
            return 0;
        };
        m.effects.cancel();
        m.subscriptions.clear();
        drop(m);
        doc.revert_owner(self.owner)
    }

    /// React to a scroll position.
    pub fn on_scroll(&mut self, triggers: &TriggerRegistry, scroll_y: f64) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        let Some(handle) = &m.trigger else {
            return;
        };
        let Some(obs) = triggers.observe(handle.id(), scroll_y) else {
            return;
        };
        m.active = obs.active;
        m.pin = obs.pin;
        match &mut m.playback {
            Playback::Entrance {
                player, actions, ..
            } => {
                for event in obs.events {
                    let action = actions.for_event(event);
                    tracing::debug!(section = %self.spec.id, ?event, ?action, "trigger event");
                    player.apply(action);
                }
            }
            Playback::Scrub { follower, .. } => follower.set_target(obs.progress),
            Playback::Idle => {}
        }
    }

    /// React to pointer movement (viewport coordinates).
    ///
    /// Hit tests run against where the subtree is drawn, so a pin's translation is removed
    /// from the document scroll first.
    pub fn on_pointer_move(
        &mut self,
        doc: &Document,
        pointer: Point,
        viewport: Viewport,
        scroll_y: f64,
    ) {
        if let Some(m) = self.mounted.as_mut() {
            let drawn_at = scroll_y - m.pin.map_or(0.0, |p| p.translate_y);
            m.effects.on_pointer_move(doc, pointer, viewport, drawn_at);
        }
    }

    /// React to the pointer leaving the window.
    pub fn on_pointer_leave(&mut self, doc: &Document) {
        if let Some(m) = self.mounted.as_mut() {
            m.effects.on_pointer_leave(doc);
        }
    }

    /// Handle a fired timer. Returns `true` when it belonged to this section.
    pub fn on_timer(&mut self, id: RegId) -> bool {
        match self.mounted.as_mut().and_then(|m| m.text.as_mut()) {
            Some((cycle, sub)) if sub.id() == id => {
                cycle.advance();
                true
            }
            _ => false,
        }
    }

    /// Advance playheads, loops and eased pointer values.
    pub fn tick(&mut self, dt: f64) {
        let Some(m) = self.mounted.as_mut() else {
            return;
        };
        match &mut m.playback {
            Playback::Entrance { player, .. } => {
                player.tick(dt);
            }
            Playback::Scrub { follower, .. } => {
                follower.tick(dt);
            }
            Playback::Idle => {}
        }
        for l in &mut m.loops {
            l.tick(dt);
        }
        m.effects.tick(dt);
    }

    /// Write the current frame's styles into the section subtree.
    ///
    /// Timeline values are written first; loops and pointer effects override them per slot.
    pub fn render(&self, doc: &mut Document) {
        let Some(m) = self.mounted.as_ref() else {
            return;
        };
        let mut out: Vec<StyleWrite> = Vec::new();
        let sampled = match &m.playback {
            Playback::Entrance {
                timeline, player, ..
            } => timeline.sample(Clock::Wall(player.time()), &mut out),
            Playback::Scrub { timeline, follower } => {
                timeline.sample(Clock::Scroll(follower.progress()), &mut out)
            }
            Playback::Idle => Ok(()),
        };
        if let Err(err) = sampled {
            tracing::error!(section = %self.spec.id, %err, "timeline sample failed");
        }
        for l in &m.loops {
            l.writes(&mut out);
        }
        m.effects.writes(&mut out);
        for w in out {
            doc.write(self.owner, m.root, w);
        }
    }

    /// Return `true` while anything is still moving without new input.
    pub fn is_animating(&self) -> bool {
        let Some(m) = self.mounted.as_ref() else {
            return false;
        };
        let playing = match &m.playback {
            Playback::Entrance { player, .. } => player.is_playing(),
            Playback::Scrub { follower, .. } => !follower.is_settled(),
            Playback::Idle => false,
        };
        playing || m.effects.in_flight() > 0 || m.loops.iter().any(AmbientLoop::is_bound)
    }

    /// Snapshot status.
    pub fn status(&self) -> SectionStatus {
        let m = self.mounted.as_ref();
        let progress = m
            .map(|m| match &m.playback {
                Playback::Entrance { player, .. } => player.progress(),
                Playback::Scrub { follower, .. } => follower.progress(),
                Playback::Idle => 0.0,
            })
            .unwrap_or(0.0);
        SectionStatus {
            id: self.spec.id.clone(),
            mounted: m.is_some(),
            active: m.is_some_and(|m| m.active),
            progress,
            pin: m.and_then(|m| m.pin),
            word: m.and_then(|m| m.text.as_ref().map(|(c, _)| c.word().to_owned())),
        }
    }

    /// Return `true` while the section is held by its pin.
    pub fn is_pinned(&self) -> bool {
        self.mounted
            .as_ref()
            .and_then(|m| m.pin)
            .is_some_and(|p| p.phase == PinPhase::Pinned)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/controller.rs"]
mod tests;
