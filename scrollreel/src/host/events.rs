//! Listener and timer registration with paired teardown.
//!
//! Every registration returns a [`Subscription`] guard; dropping the guard deregisters it. The
//! bus never holds callbacks, only routing records, so dispatch stays with the engine and a leak
//! is visible as a non-zero [`EventBus::active_listeners`] count.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::host::document::{ElementId, OwnerId};

/// Shortest period a repeating timer may have.
pub const MIN_TIMER_PERIOD_SECS: f64 = 0.001;

/// Host event a listener subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// Document scroll.
    Scroll,
    /// Viewport resize.
    Resize,
    /// Pointer movement.
    PointerMove,
    /// Pointer leaving an element (or the window).
    PointerLeave,
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerScope {
    /// The window / document.
    Window,
    /// A single element.
    Element(ElementId),
}

/// What the listener's handler produces; used for instrumentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Purpose {
    /// Trigger bookkeeping (progress, enter/leave).
    Trigger,
    /// Writes transform-like style values (parallax, tilt, magnetic pull).
    Transform,
    /// Updates UI toggle state.
    Ui,
}

/// Routing record of one active listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    /// Registering component.
    pub owner: OwnerId,
    /// Subscribed event.
    pub kind: EventKind,
    /// Attachment point.
    pub scope: ListenerScope,
    /// Handler category.
    pub purpose: Purpose,
}

/// Identity of a registration (listener or timer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegId(u64);

#[derive(Clone, Copy, Debug)]
struct Timer {
    owner: OwnerId,
    due: f64,
    period: Option<f64>,
}

#[derive(Debug)]
enum Entry {
    Listener(Listener),
    Timer(Timer),
}

#[derive(Debug, Default)]
struct BusInner {
    next: u64,
    entries: BTreeMap<RegId, Entry>,
}

impl BusInner {
    fn insert(&mut self, entry: Entry) -> RegId {
        let id = RegId(self.next);
        self.next += 1;
        self.entries.insert(id, entry);
        id
    }
}

/// Shared registry of listeners and timers for one page.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

/// Scoped registration; dropping it deregisters the listener or cancels the timer.
#[must_use = "dropping a Subscription deregisters it immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: RegId,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    /// Registration identity (matches ids returned by [`EventBus::due_timers`]).
    pub fn id(&self) -> RegId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.borrow_mut().entries.remove(&self.id);
        }
    }
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self, id: RegId) -> Subscription {
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Register a listener.
    pub fn listen(&self, listener: Listener) -> Subscription {
        let id = self.inner.borrow_mut().insert(Entry::Listener(listener));
        self.guard(id)
    }

    /// Schedule a one-shot timer firing at engine time `due`.
    pub fn timeout(&self, owner: OwnerId, due: f64) -> Subscription {
        let id = self.inner.borrow_mut().insert(Entry::Timer(Timer {
            owner,
            due,
            period: None,
        }));
        self.guard(id)
    }

    /// Schedule a repeating timer first firing at `now + period`.
    ///
    /// Periods below [`MIN_TIMER_PERIOD_SECS`] are raised to it.
    pub fn interval(&self, owner: OwnerId, now: f64, period: f64) -> Subscription {
        let period = period.max(MIN_TIMER_PERIOD_SECS);
        let id = self.inner.borrow_mut().insert(Entry::Timer(Timer {
            owner,
            due: now + period,
            period: Some(period),
        }));
        self.guard(id)
    }

    /// Collect timers due at `now`, in due order.
    ///
    /// Each due timer fires once per call. A repeating timer that missed several periods is
    /// coalesced into one firing and rescheduled to its next due time after `now`; one-shot
    /// timers are removed, so their guards become inert.
    pub fn due_timers(&self, now: f64) -> Vec<(RegId, OwnerId)> {
        let mut inner = self.inner.borrow_mut();
        let mut fired: Vec<(f64, RegId, OwnerId)> = Vec::new();
        let mut spent = Vec::new();
        for (&id, entry) in inner.entries.iter_mut() {
            let Entry::Timer(timer) = entry else {
                continue;
            };
            if timer.due > now {
                continue;
            }
            fired.push((timer.due, id, timer.owner));
            match timer.period {
                Some(p) => {
                    let missed = ((now - timer.due) / p).floor() + 1.0;
                    timer.due += p * missed;
                }
                None => spent.push(id),
            }
        }
        for id in spent {
            inner.entries.remove(&id);
        }
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, id, owner)| (id, owner)).collect()
    }

    /// Listeners matching `kind`, in registration order.
    pub fn listeners(&self, kind: EventKind) -> Vec<Listener> {
        self.inner
            .borrow()
            .entries
            .values()
            .filter_map(|e| match e {
                Entry::Listener(l) if l.kind == kind => Some(*l),
                _ => None,
            })
            .collect()
    }

    /// Total active listeners.
    pub fn active_listeners(&self) -> usize {
        self.count_listeners(|_| true)
    }

    /// Active listeners matching a predicate.
    pub fn count_listeners(&self, pred: impl Fn(&Listener) -> bool) -> usize {
        self.inner
            .borrow()
            .entries
            .values()
            .filter(|e| matches!(e, Entry::Listener(l) if pred(l)))
            .count()
    }

    /// Total pending timers.
    pub fn active_timers(&self) -> usize {
        self.count_timers(|_| true)
    }

    /// Pending timers owned by `owner`.
    pub fn timers_for(&self, owner: OwnerId) -> usize {
        self.count_timers(|o| o == owner)
    }

    fn count_timers(&self, pred: impl Fn(OwnerId) -> bool) -> usize {
        self.inner
            .borrow()
            .entries
            .values()
            .filter(|e| matches!(e, Entry::Timer(t) if pred(t.owner)))
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/events.rs"]
mod tests;
