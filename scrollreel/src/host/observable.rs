use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    value: T,
    next: u64,
    subscribers: BTreeMap<u64, Callback<T>>,
    dropped_while_notifying: Vec<u64>,
    notifying: bool,
}

/// UI state owned by exactly one component.
///
/// Only the owner holds an `Observable`; consumers get a [`ReadOnly`] view and may subscribe to
/// changes. Subscribers run synchronously on every change, in subscription order.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

/// Read-only view of an [`Observable`].
pub struct ReadOnly<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Change subscription; dropping it unsubscribes.
#[must_use = "dropping a Watch unsubscribes immediately"]
pub struct Watch<T> {
    id: u64,
    inner: Weak<RefCell<Inner<T>>>,
}

impl<T> Drop for Watch<T> {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        // The callback may own other watches on this value; release it after the borrow ends.
        let _removed = {
            let mut inner = inner.borrow_mut();
            let removed = inner.subscribers.remove(&self.id);
            if removed.is_none() && inner.notifying {
                inner.dropped_while_notifying.push(self.id);
            }
            removed
        };
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next: 0,
                subscribers: BTreeMap::new(),
                dropped_while_notifying: Vec::new(),
                notifying: false,
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value, notifying subscribers when it changed. Returns `true` on change.
    pub fn set(&self, value: T) -> bool {
        let mut subscribers = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner.notifying = true;
            std::mem::take(&mut inner.subscribers)
        };
        for cb in subscribers.values_mut() {
            cb(&value);
        }
        let mut inner = self.inner.borrow_mut();
        inner.notifying = false;
        let dropped = std::mem::take(&mut inner.dropped_while_notifying);
        let removed: Vec<Callback<T>> = dropped
            .iter()
            .filter_map(|id| subscribers.remove(id))
            .collect();
        subscribers.append(&mut inner.subscribers);
        inner.subscribers = subscribers;
        drop(inner);
        drop(removed);
        true
    }

    /// Read-only handle for consumers.
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> ReadOnly<T> {
    /// Current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Subscribe to future changes.
    pub fn subscribe(&self, cb: impl FnMut(&T) + 'static) -> Watch<T> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next;
        inner.next += 1;
        inner.subscribers.insert(id, Box::new(cb));
        Watch {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Derived view recomputed by `f` on every change of `self`.
    ///
    /// The derived value lives as long as the returned [`Watch`]; dropping it freezes the view.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U + 'static) -> (ReadOnly<U>, Watch<T>)
    where
        U: Clone + PartialEq + 'static,
    {
        let derived = Observable::new(f(&self.get()));
        let view = derived.read_only();
        let watch = self.subscribe(move |v| {
            derived.set(f(v));
        });
        (view, watch)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/observable.rs"]
mod tests;
