use crate::{
    animation::ease::Ease,
    animation::tween::Tween,
    host::document::OwnerId,
    host::events::{EventBus, RegId, Subscription},
    host::observable::{Observable, ReadOnly},
};

/// Vertical extent of one navigable section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionBounds {
    /// Section id.
    pub id: String,
    /// Document offset of the top edge.
    pub top: f64,
    /// Height, including any pin spacing.
    pub height: f64,
}

impl SectionBounds {
    /// Bounds for `id` spanning `[top, top + height)`.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, y: f64) -> bool {
        self.top <= y && y < self.top + self.height
    }
}

/// Index of the section under the viewport midpoint.
///
/// Falls back to the last section whose top is at or above the midpoint.
pub fn current_index(sections: &[SectionBounds], scroll_y: f64, viewport_h: f64) -> Option<usize> {
    let mid = scroll_y + viewport_h / 2.0;
    sections
        .iter()
        .position(|s| s.contains(mid))
        .or_else(|| sections.iter().rposition(|s| s.top <= mid))
}

/// Scroll offset for "advance to the next section", clamped to the scrollable range.
pub fn advance_target(
    sections: &[SectionBounds],
    scroll_y: f64,
    viewport_h: f64,
    doc_h: f64,
) -> f64 {
    let max_scroll = (doc_h - viewport_h).max(0.0);
    let next = match current_index(sections, scroll_y, viewport_h) {
        Some(i) => sections.get(i + 1),
        None => sections.first(),
    };
    next.map(|s| s.top).unwrap_or(max_scroll).clamp(0.0, max_scroll)
}

/// Return `true` when the viewport bottom is within `slack` pixels of the document end.
pub fn is_at_end(scroll_y: f64, viewport_h: f64, doc_h: f64, slack: f64) -> bool {
    scroll_y + viewport_h >= doc_h - slack
}

/// Navigation timing options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavOpts {
    /// Seconds without scroll before `is_scrolling` turns false.
    pub scroll_idle_secs: f64,
    /// End-of-document slack in pixels.
    pub end_slack_px: f64,
    /// Smooth-scroll duration for [`NavigationOrchestrator::advance`].
    pub advance_duration_secs: f64,
}

impl Default for NavOpts {
    fn default() -> Self {
        Self {
            scroll_idle_secs: 0.15,
            end_slack_px: 10.0,
            advance_duration_secs: 0.8,
        }
    }
}

/// Owner of the page-level navigation state.
pub struct NavigationOrchestrator {
    owner: OwnerId,
    opts: NavOpts,
    at_end: Observable<bool>,
    is_scrolling: Observable<bool>,
    idle: Option<Subscription>,
    smooth: Option<Tween<f64>>,
}

impl NavigationOrchestrator {
    /// Idle orchestrator; timers are registered as `owner`.
    pub fn new(owner: OwnerId, opts: NavOpts) -> Self {
        Self {
            owner,
            opts,
            at_end: Observable::new(false),
            is_scrolling: Observable::new(false),
            idle: None,
            smooth: None,
        }
    }

    /// Read-only end-of-document flag.
    pub fn at_end(&self) -> ReadOnly<bool> {
        self.at_end.read_only()
    }

    /// Read-only scrolling flag.
    pub fn is_scrolling(&self) -> ReadOnly<bool> {
        self.is_scrolling.read_only()
    }

    /// Record a scroll at engine time `now`.
    ///
    /// A user scroll cancels any smooth scroll in progress.
    pub fn on_scroll(
        &mut self,
        bus: &EventBus,
        now: f64,
        scroll_y: f64,
        viewport_h: f64,
        doc_h: f64,
        user: bool,
    ) {
        if user && self.smooth.take().is_some() {
            tracing::debug!(scroll_y, "smooth scroll cancelled by user scroll");
        }
        self.is_scrolling.set(true);
        self.idle = Some(bus.timeout(self.owner, now + self.opts.scroll_idle_secs));
        self.at_end
            .set(is_at_end(scroll_y, viewport_h, doc_h, self.opts.end_slack_px));
    }

    /// Re-evaluate the end-of-document flag without counting as a scroll.
    pub fn sync(&self, scroll_y: f64, viewport_h: f64, doc_h: f64) {
        self.at_end
            .set(is_at_end(scroll_y, viewport_h, doc_h, self.opts.end_slack_px));
    }

    /// Handle a fired timer. Returns `true` when it was the idle timer.
    pub fn on_timer(&mut self, id: RegId) -> bool {
        if self.idle.as_ref().is_some_and(|s| s.id() == id) {
            self.idle = None;
            self.is_scrolling.set(false);
            return true;
        }
        false
    }

    /// Start a smooth scroll to the next section; returns the target offset.
    pub fn advance(
        &mut self,
        sections: &[SectionBounds],
        scroll_y: f64,
        viewport_h: f64,
        doc_h: f64,
    ) -> f64 {
        let target = advance_target(sections, scroll_y, viewport_h, doc_h);
        let mut tween = match self.smooth {
            Some(t) => t,
            None => Tween::at_rest(scroll_y),
        };
        tween.retarget(target, self.opts.advance_duration_secs, Ease::InOutCubic);
        tracing::debug!(from = scroll_y, target, "advance to next section");
        self.smooth = Some(tween);
        target
    }

    /// Advance the smooth scroll by `dt`; returns the new scroll offset while one is running.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        let tween = self.smooth.as_mut()?;
        let y = tween.tick(dt);
        if tween.is_settled() {
            self.smooth = None;
        }
        Some(y)
    }

    /// Return `true` while a smooth scroll is running.
    pub fn is_advancing(&self) -> bool {
        self.smooth.is_some()
    }

    /// Drop the idle timer and any smooth scroll.
    pub fn cancel(&mut self) {
        self.idle = None;
        self.smooth = None;
        self.is_scrolling.set(false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/orchestrator.rs"]
mod tests;
