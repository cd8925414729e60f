use crate::{
    animation::anim::Prop,
    foundation::core::{Point, Viewport},
    foundation::error::{ScrollreelError, ScrollreelResult},
    foundation::math::Fingerprint,
    host::document::{Document, ElementAction, OwnerId},
    host::events::{EventBus, EventKind, Listener, Purpose, Subscription},
    nav::orchestrator::{NavOpts, NavigationOrchestrator, SectionBounds, current_index},
    overlay::manager::{OverlayManager, OverlayStatus},
    page::model::PageSpec,
    policy::{Environment, MotionProfile, ViewportClass},
    section::controller::{MountCtx, SectionController, SectionStatus},
    trigger::registry::TriggerRegistry,
};

const NAV_OWNER: OwnerId = OwnerId(0);
const OVERLAY_OWNER: OwnerId = OwnerId(1);
const FIRST_SECTION_OWNER: u32 = 2;

/// Engine timing options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineOpts {
    /// Delay after construction before layout is measured again.
    pub settle_refresh_secs: f64,
    /// Seconds without scroll before navigation reports idle.
    pub scroll_idle_secs: f64,
    /// End-of-document slack in pixels.
    pub end_slack_px: f64,
    /// Smooth-scroll duration for section advance.
    pub advance_duration_secs: f64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        let nav = NavOpts::default();
        Self {
            settle_refresh_secs: 0.1,
            scroll_idle_secs: nav.scroll_idle_secs,
            end_slack_px: nav.end_slack_px,
            advance_duration_secs: nav.advance_duration_secs,
        }
    }
}

impl EngineOpts {
    fn validate(&self) -> ScrollreelResult<()> {
        let fields = [
            ("settle_refresh_secs", self.settle_refresh_secs),
            ("scroll_idle_secs", self.scroll_idle_secs),
            ("end_slack_px", self.end_slack_px),
            ("advance_duration_secs", self.advance_duration_secs),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollreelError::validation(format!(
                    "engine option {name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    fn nav(&self) -> NavOpts {
        NavOpts {
            scroll_idle_secs: self.scroll_idle_secs,
            end_slack_px: self.end_slack_px,
            advance_duration_secs: self.advance_duration_secs,
        }
    }
}

/// One computed inline style value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleEntry {
    /// Element id.
    pub element: String,
    /// Property.
    pub prop: Prop,
    /// Value.
    pub value: f64,
}

/// Navigation state in a snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavStatus {
    /// Section containing the viewport midpoint.
    pub current: Option<String>,
    /// Viewport bottom reached the document end.
    pub at_end: bool,
    /// A scroll happened within the idle window.
    pub is_scrolling: bool,
    /// A smooth advance is running.
    pub advancing: bool,
}

/// Registration counts, for leak checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RegistrationCounts {
    /// Active listeners.
    pub listeners: usize,
    /// Active listeners writing transform-like values.
    pub transform_listeners: usize,
    /// Pending timers.
    pub timers: usize,
    /// Registered trigger regions.
    pub triggers: usize,
}

/// Everything a host needs to paint one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    /// Engine time in seconds.
    pub time: f64,
    /// Scroll offset.
    pub scroll_y: f64,
    /// Viewport.
    pub viewport: Viewport,
    /// Viewport class.
    pub class: ViewportClass,
    /// Scrollable height including pin spacing.
    pub scroll_height: f64,
    /// Inline styles, ordered by element then property.
    pub styles: Vec<StyleEntry>,
    /// Per-section state.
    pub sections: Vec<SectionStatus>,
    /// Navigation state.
    pub nav: NavStatus,
    /// Overlay state.
    pub overlay: OverlayStatus,
    /// Registration counts.
    pub registrations: RegistrationCounts,
}

impl FrameSnapshot {
    /// Content hash over everything visible, excluding time.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fingerprint::new();
        h.write_f64(self.scroll_y);
        h.write_f64(self.scroll_height);
        for s in &self.styles {
            h.write_str(&s.element);
            h.write_u64(s.prop as u64);
            h.write_f64(s.value);
        }
        for s in &self.sections {
            h.write_u64(u64::from(s.active));
            h.write_f64(s.progress);
            if let Some(pin) = s.pin {
                h.write_f64(pin.translate_y);
            }
            if let Some(word) = &s.word {
                h.write_str(word);
            }
        }
        h.write_u64(u64::from(self.nav.at_end));
        h.write_u64(u64::from(self.overlay.modal_open));
        h.write_u64(self.overlay.faq_open.map_or(u64::MAX, |i| i as u64));
        h.write_u64(u64::from(self.overlay.bar.minimized));
        h.finish()
    }

    /// Look up one style value.
    pub fn style(&self, element: &str, prop: Prop) -> Option<f64> {
        self.styles
            .iter()
            .find(|s| s.element == element && s.prop == prop)
            .map(|s| s.value)
    }
}

/// One running page: document, sections, navigation and overlays, driven by input events.
pub struct Engine {
    page: PageSpec,
    opts: EngineOpts,
    env: Environment,
    profile: MotionProfile,
    doc: Document,
    bus: EventBus,
    triggers: TriggerRegistry,
    sections: Vec<SectionController>,
    nav: NavigationOrchestrator,
    overlay: OverlayManager,
    time: f64,
    scroll_y: f64,
    settle: Option<Subscription>,
}

impl Engine {
    /// Validate `page`, mount every section and measure layout.
    #[tracing::instrument(skip(page, opts), fields(sections = page.sections.len()))]
    pub fn new(page: PageSpec, env: Environment, opts: EngineOpts) -> ScrollreelResult<Self> {
        page.validate()?;
        opts.validate()?;
        let doc = page.build_document()?;
        let profile = page.policy.profile(&env);
        let nav = NavigationOrchestrator::new(NAV_OWNER, opts.nav());
        let overlay = OverlayManager::new(
            &page.overlay,
            &doc,
            OVERLAY_OWNER,
            nav.at_end(),
            page.faq_items,
        );
        let sections = page
            .sections
            .iter()
            .zip(FIRST_SECTION_OWNER..)
            .map(|(s, owner)| SectionController::new(s.clone(), OwnerId(owner)))
            .collect();
        let bus = EventBus::new();
        let settle = Some(bus.timeout(NAV_OWNER, opts.settle_refresh_secs));

        let mut engine = Self {
            page,
            opts,
            env,
            profile,
            doc,
            bus,
            triggers: TriggerRegistry::new(),
            sections,
            nav,
            overlay,
            time: 0.0,
            scroll_y: 0.0,
            settle,
        };
        engine.mount_all()?;
        engine.refresh();
        engine.render();
        Ok(engine)
    }

    fn mount_all(&mut self) -> ScrollreelResult<()> {
        let ctx = MountCtx {
            doc: &self.doc,
            bus: &self.bus,
            triggers: &self.triggers,
            profile: self.profile,
            now: self.time,
        };
        for s in &mut self.sections {
            s.mount(ctx)?;
        }
        Ok(())
    }

    fn unmount_all(&mut self) -> usize {
        self.sections
            .iter_mut()
            .map(|s| s.unmount(&mut self.doc))
            .sum()
    }

    /// Re-measure trigger regions and pin spacing, then re-evaluate the current scroll.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) {
        self.triggers.refresh(&mut self.doc, self.env.viewport);
        let max = self.doc.max_scroll(self.env.viewport.height);
        self.scroll_y = self.scroll_y.clamp(0.0, max);
        self.nav.sync(
            self.scroll_y,
            self.env.viewport.height,
            self.doc.scroll_height(),
        );
        self.dispatch_scroll();
    }

    fn dispatch_scroll(&mut self) {
        for s in &mut self.sections {
            s.on_scroll(&self.triggers, self.scroll_y);
        }
    }

    fn apply_scroll(&mut self, y: f64, user: bool) {
        let max = self.doc.max_scroll(self.env.viewport.height);
        self.scroll_y = y.clamp(0.0, max);
        self.nav.on_scroll(
            &self.bus,
            self.time,
            self.scroll_y,
            self.env.viewport.height,
            self.doc.scroll_height(),
            user,
        );
        self.dispatch_scroll();
    }

    /// User scroll to offset `y` (clamped to the scrollable range).
    pub fn scroll(&mut self, y: f64) -> ScrollreelResult<()> {
        if !y.is_finite() {
            return Err(ScrollreelError::validation("scroll offset must be finite"));
        }
        self.apply_scroll(y, true);
        self.render();
        Ok(())
    }

    /// New viewport size.
    pub fn resize(&mut self, viewport: Viewport) -> ScrollreelResult<()> {
        self.set_environment(Environment {
            viewport,
            ..self.env
        })
    }

    /// New environment. Sections remount when the motion profile changes.
    #[tracing::instrument(skip(self))]
    pub fn set_environment(&mut self, env: Environment) -> ScrollreelResult<()> {
        self.env = env;
        let profile = self.page.policy.profile(&env);
        if profile != self.profile {
            let reverted = self.unmount_all();
            tracing::debug!(?profile, reverted, "motion profile changed; remounting sections");
            self.profile = profile;
            self.mount_all()?;
        }
        self.refresh();
        self.render();
        Ok(())
    }

    /// Pointer moved to `pointer` (viewport coordinates).
    pub fn pointer_move(&mut self, pointer: Point) {
        if self.bus.listeners(EventKind::PointerMove).is_empty() {
            return;
        }
        for s in &mut self.sections {
            s.on_pointer_move(&self.doc, pointer, self.env.viewport, self.scroll_y);
        }
    }

    /// Pointer left the window.
    pub fn pointer_leave(&mut self) {
        for s in &mut self.sections {
            s.on_pointer_leave(&self.doc);
        }
    }

    /// Advance engine time by `dt` seconds: timers, smooth scroll, playheads, then render.
    pub fn tick(&mut self, dt: f64) -> ScrollreelResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(ScrollreelError::validation("tick dt must be finite and >= 0"));
        }
        self.time += dt;
        for (id, owner) in self.bus.due_timers(self.time) {
            if self.settle.as_ref().is_some_and(|s| s.id() == id) {
                self.settle = None;
                self.refresh();
            } else if owner == NAV_OWNER {
                self.nav.on_timer(id);
            } else if let Some(s) = owner
                .0
                .checked_sub(FIRST_SECTION_OWNER)
                .and_then(|i| self.sections.get_mut(i as usize))
            {
                s.on_timer(id);
            }
        }
        if let Some(y) = self.nav.tick(dt) {
            self.apply_scroll(y, false);
        }
        self.overlay.process(&self.doc);
        self.overlay.tick(dt);
        for s in &mut self.sections {
            s.tick(dt);
        }
        self.render();
        Ok(())
    }

    fn render(&mut self) {
        for s in &self.sections {
            s.render(&mut self.doc);
        }
        self.overlay.process(&self.doc);
        self.overlay.render(&mut self.doc);
    }

    /// Click on an element; the nearest ancestor with an action handles it.
    ///
    /// Returns the dispatched action, or `None` when nothing on the path has one.
    pub fn click(&mut self, element: &str) -> ScrollreelResult<Option<ElementAction>> {
        let Some(mut el) = self.doc.element(element) else {
            return Err(ScrollreelError::validation(format!(
                "click on unknown element '{element}'"
            )));
        };
        let action = loop {
            if let Some(a) = self.doc.action(el) {
                break a;
            }
            match self.doc.parent(el) {
                Some(p) => el = p,
                None => {
                    tracing::debug!(element, "click without action");
                    return Ok(None);
                }
            }
        };
        match action {
            ElementAction::OpenModal => self.overlay.handle().request_open(),
            ElementAction::CloseModal => self.overlay.handle().request_close(),
            ElementAction::ToggleAccordion(i) => self.overlay.accordion().toggle(i),
            ElementAction::AdvanceSection => {
                self.advance();
            }
            ElementAction::ToggleBar => self.overlay.bar().toggle(),
        }
        self.overlay.process(&self.doc);
        Ok(Some(action))
    }

    /// Start a smooth scroll to the next section; returns the target offset.
    pub fn advance(&mut self) -> f64 {
        let bounds = self.section_bounds();
        self.nav.advance(
            &bounds,
            self.scroll_y,
            self.env.viewport.height,
            self.doc.scroll_height(),
        )
    }

    /// Navigable section bounds, in navigation order, including pin spacing.
    pub fn section_bounds(&self) -> Vec<SectionBounds> {
        self.page
            .nav_order()
            .into_iter()
            .filter_map(|id| {
                let s = self.sections.iter().find(|s| s.spec().id == id)?;
                let b = self.doc.spaced_layout(s.root()?);
                Some(SectionBounds::new(id, b.y, b.height))
            })
            .collect()
    }

    /// Drop every section registration and revert their styles.
    ///
    /// Returns the number of inline styles reverted.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self) -> usize {
        let reverted = self.unmount_all();
        self.settle = None;
        self.nav.cancel();
        self.refresh();
        reverted
    }

    /// Registration counts.
    pub fn registrations(&self) -> RegistrationCounts {
        RegistrationCounts {
            listeners: self.bus.active_listeners(),
            transform_listeners: self
                .bus
                .count_listeners(|l: &Listener| l.purpose == Purpose::Transform),
            timers: self.bus.active_timers(),
            triggers: self.triggers.len(),
        }
    }

    /// Capture the current frame.
    #[tracing::instrument(skip(self))]
    pub fn snapshot(&self) -> FrameSnapshot {
        let styles = self
            .doc
            .inline_styles()
            .map(|(el, prop, value)| StyleEntry {
                element: self.doc.name(el).to_owned(),
                prop,
                value,
            })
            .collect();
        let bounds = self.section_bounds();
        let current = current_index(&bounds, self.scroll_y, self.env.viewport.height)
            .map(|i| bounds[i].id.clone());
        FrameSnapshot {
            time: self.time,
            scroll_y: self.scroll_y,
            viewport: self.env.viewport,
            class: self.profile.class,
            scroll_height: self.doc.scroll_height(),
            styles,
            sections: self.sections.iter().map(SectionController::status).collect(),
            nav: NavStatus {
                current,
                at_end: self.nav.at_end().get(),
                is_scrolling: self.nav.is_scrolling().get(),
                advancing: self.nav.is_advancing(),
            },
            overlay: self.overlay.status(self.profile.class),
            registrations: self.registrations(),
        }
    }

    /// Return `true` while anything moves without new input.
    pub fn is_animating(&self) -> bool {
        self.nav.is_advancing()
            || self.overlay.is_animating()
            || self.sections.iter().any(SectionController::is_animating)
    }

    /// Page document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Active motion profile.
    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Engine options.
    pub fn opts(&self) -> EngineOpts {
        self.opts
    }

    /// Scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Engine time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Section controller by id.
    pub fn section(&self, id: &str) -> Option<&SectionController> {
        self.sections.iter().find(|s| s.spec().id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/engine.rs"]
mod tests;
