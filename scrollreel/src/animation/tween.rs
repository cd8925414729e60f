use std::collections::BTreeMap;

use crate::{
    animation::anim::{Lerp, Prop},
    animation::ease::Ease,
    host::document::{ElementId, StyleWrite},
};

/// Time-driven tween that can be retargeted mid-flight.
///
/// Retargeting starts the new interpolation from the current value, so a superseding target
/// never causes a jump.
#[derive(Clone, Copy, Debug)]
pub struct Tween<T> {
    from: T,
    to: T,
    current: T,
    elapsed: f64,
    duration: f64,
    ease: Ease,
}

impl<T: Lerp + Copy + PartialEq> Tween<T> {
    /// A settled tween holding `value`.
    pub fn at_rest(value: T) -> Self {
        Self {
            from: value,
            to: value,
            current: value,
            elapsed: 0.0,
            duration: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Start moving toward `to` from wherever the value currently is.
    pub fn retarget(&mut self, to: T, duration: f64, ease: Ease) {
        self.from = self.current;
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.ease = ease;
        if self.duration == 0.0 {
            self.current = to;
        }
    }

    /// Jump to `value` with no interpolation.
    pub fn snap(&mut self, value: T) {
        *self = Self::at_rest(value);
    }

    /// Freeze at the current value.
    pub fn cancel(&mut self) {
        self.snap(self.current);
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn tick(&mut self, dt: f64) -> T {
        if self.is_settled() {
            return self.current;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        let t = self.elapsed / self.duration;
        self.current = if self.elapsed >= self.duration {
            self.to
        } else {
            T::lerp(&self.from, &self.to, self.ease.apply(t))
        };
        self.current
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.current
    }

    /// Destination value.
    pub fn target(&self) -> T {
        self.to
    }

    /// Return `true` once the destination has been reached.
    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration || self.current == self.to
    }
}

/// Per-(element, property) tween slots with last-write-wins semantics.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    slots: BTreeMap<(ElementId, Prop), Tween<f64>>,
}

impl TweenSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tween `prop` on `element` toward `to`, superseding any in-flight tween on that slot.
    ///
    /// A slot seen for the first time starts from `current`.
    pub fn to(
        &mut self,
        element: ElementId,
        prop: Prop,
        current: f64,
        to: f64,
        duration: f64,
        ease: Ease,
    ) {
        self.slots
            .entry((element, prop))
            .or_insert_with(|| Tween::at_rest(current))
            .retarget(to, duration, ease);
    }

    /// Set a slot instantly.
    pub fn set(&mut self, element: ElementId, prop: Prop, value: f64) {
        self.slots
            .entry((element, prop))
            .or_insert_with(|| Tween::at_rest(value))
            .snap(value);
    }

    /// Current value of a slot.
    pub fn value(&self, element: ElementId, prop: Prop) -> Option<f64> {
        self.slots.get(&(element, prop)).map(Tween::value)
    }

    /// Advance every slot by `dt`.
    pub fn tick(&mut self, dt: f64) {
        for tween in self.slots.values_mut() {
            tween.tick(dt);
        }
    }

    /// Number of slots still interpolating.
    pub fn in_flight(&self) -> usize {
        self.slots.values().filter(|t| !t.is_settled()).count()
    }

    /// Current values as style writes.
    pub fn writes(&self, out: &mut Vec<StyleWrite>) {
        out.extend(self.slots.iter().map(|(&(element, prop), t)| StyleWrite {
            element,
            prop,
            value: t.value(),
        }));
    }

    /// Cancel and forget every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Return `true` when no slot exists.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
