use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    animation::anim::Prop,
    animation::ease::Ease,
    animation::tween::TweenSet,
    host::document::{Document, ElementId, OwnerId, Selector, StyleWrite},
    host::observable::{Observable, ReadOnly, Watch},
    policy::ViewportClass,
};

/// Elements animated by the overlay manager.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlaySpec {
    /// Modal backdrop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Selector>,
    /// Modal dialog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<Selector>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Request {
    Open,
    Close,
}

/// Cloneable requester sections use to open or close the modal.
#[derive(Clone, Debug, Default)]
pub struct OverlayHandle {
    queue: Rc<RefCell<Vec<Request>>>,
}

impl OverlayHandle {
    /// Ask for the modal to open.
    pub fn request_open(&self) {
        self.queue.borrow_mut().push(Request::Open);
    }

    /// Ask for the modal to close.
    pub fn request_close(&self) {
        self.queue.borrow_mut().push(Request::Close);
    }
}

/// FAQ accordion: at most one item open.
pub struct Accordion {
    open: Observable<Option<usize>>,
    items: usize,
}

impl Accordion {
    /// Accordion of `items` entries with the first one open.
    pub fn new(items: usize) -> Self {
        Self {
            open: Observable::new((items > 0).then_some(0)),
            items,
        }
    }

    /// Toggle item `index`: closes it when open, otherwise switches to it.
    pub fn toggle(&self, index: usize) {
        if index >= self.items {
            tracing::debug!(index, items = self.items, "accordion toggle out of range");
            return;
        }
        let next = if self.open.get() == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open.set(next);
    }

    /// Read-only open index.
    pub fn open_index(&self) -> ReadOnly<Option<usize>> {
        self.open.read_only()
    }
}

/// Visible state of the floating navigation affordances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BarState {
    /// Mobile quick bar shown.
    pub quick_bar_visible: bool,
    /// Quick bar collapsed.
    pub minimized: bool,
    /// Floating "next section" button shown.
    pub next_visible: bool,
}

/// Floating bar and next-section button.
pub struct FloatingBar {
    minimized: Observable<bool>,
    next_available: ReadOnly<bool>,
    _at_end: Watch<bool>,
}

impl FloatingBar {
    /// Bar watching the navigation end-of-document flag.
    pub fn new(at_end: ReadOnly<bool>) -> Self {
        let (next_available, watch) = at_end.map(|end| !*end);
        Self {
            minimized: Observable::new(false),
            next_available,
            _at_end: watch,
        }
    }

    /// Whether there is a next section to jump to; false once the document end is reached.
    pub fn next_available(&self) -> ReadOnly<bool> {
        self.next_available.clone()
    }

    /// Flip between minimized and expanded.
    pub fn toggle(&self) {
        self.minimized.set(!self.minimized.get());
    }

    /// Read-only minimized flag.
    pub fn minimized(&self) -> ReadOnly<bool> {
        self.minimized.read_only()
    }

    /// Visibility for a viewport class.
    pub fn state(&self, class: ViewportClass) -> BarState {
        let mobile = class == ViewportClass::Mobile;
        BarState {
            quick_bar_visible: mobile,
            minimized: self.minimized.get(),
            next_visible: !mobile && self.next_available.get(),
        }
    }
}

/// Snapshot of overlay state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OverlayStatus {
    /// Modal is open (its enter animation may still be running).
    pub modal_open: bool,
    /// Open FAQ item.
    pub faq_open: Option<usize>,
    /// Floating affordances.
    pub bar: BarState,
}

/// Owner of modal, floating bar and accordion state.
pub struct OverlayManager {
    owner: OwnerId,
    modal_open: Observable<bool>,
    handle: OverlayHandle,
    backdrop: Vec<ElementId>,
    dialog: Vec<ElementId>,
    tweens: TweenSet,
    bar: FloatingBar,
    accordion: Accordion,
}

impl OverlayManager {
    /// Bind the overlay elements in `doc`.
    pub fn new(
        spec: &OverlaySpec,
        doc: &Document,
        owner: OwnerId,
        at_end: ReadOnly<bool>,
        faq_items: usize,
    ) -> Self {
        let find = |sel: &Option<Selector>| {
            sel.as_ref()
                .map(|s| doc.query_global(s))
                .unwrap_or_default()
        };
        let backdrop = find(&spec.backdrop);
        let dialog = find(&spec.dialog);
        if spec.dialog.is_some() && dialog.is_empty() {
            tracing::debug!("modal dialog selector matches no element");
        }
        Self {
            owner,
            modal_open: Observable::new(false),
            handle: OverlayHandle::default(),
            backdrop,
            dialog,
            tweens: TweenSet::new(),
            bar: FloatingBar::new(at_end),
            accordion: Accordion::new(faq_items),
        }
    }

    /// Requester for sections and click actions.
    pub fn handle(&self) -> OverlayHandle {
        self.handle.clone()
    }

    /// Read-only modal flag.
    pub fn modal_open(&self) -> ReadOnly<bool> {
        self.modal_open.read_only()
    }

    /// Floating bar.
    pub fn bar(&self) -> &FloatingBar {
        &self.bar
    }

    /// FAQ accordion.
    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    /// Apply queued requests, starting the matching enter or exit animation.
    pub fn process(&mut self, doc: &Document) {
        let requests = std::mem::take(&mut *self.handle.queue.borrow_mut());
        for r in requests {
            let open = r == Request::Open;
            if self.modal_open.set(open) {
                tracing::debug!(open, "modal toggled");
                self.animate(doc, open);
            }
        }
    }

    fn animate(&mut self, doc: &Document, open: bool) {
        let mut to = |el: ElementId, prop: Prop, value: f64, duration: f64, ease: Ease| {
            self.tweens
                .to(el, prop, doc.computed(el, prop), value, duration, ease);
        };
        let backdrop_opacity = if open { 1.0 } else { 0.0 };
        for &el in &self.backdrop {
            to(el, Prop::Opacity, backdrop_opacity, 0.3, Ease::OutQuad);
        }
        let (scale, opacity, y, duration, ease) = if open {
            (1.0, 1.0, 0.0, 0.4, Ease::OutBack { overshoot: 1.5 })
        } else {
            (0.8, 0.0, 20.0, 0.3, Ease::InQuad)
        };
        for &el in &self.dialog {
            to(el, Prop::Scale, scale, duration, ease);
            to(el, Prop::Opacity, opacity, duration, ease);
            to(el, Prop::Y, y, duration, ease);
        }
    }

    /// Advance modal animations.
    pub fn tick(&mut self, dt: f64) {
        self.tweens.tick(dt);
    }

    /// Return `true` while a modal animation is running.
    pub fn is_animating(&self) -> bool {
        self.tweens.in_flight() > 0
    }

    /// Write modal styles.
    pub fn render(&self, doc: &mut Document) {
        let mut out: Vec<StyleWrite> = Vec::new();
        self.tweens.writes(&mut out);
        let scope = ElementId(0);
        for w in out {
            doc.write(self.owner, scope, w);
        }
    }

    /// Snapshot status.
    pub fn status(&self, class: ViewportClass) -> OverlayStatus {
        OverlayStatus {
            modal_open: self.modal_open.get(),
            faq_open: self.accordion.open_index().get(),
            bar: self.bar.state(class),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/manager.rs"]
mod tests;
