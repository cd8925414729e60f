//! Pointer-reactive effects.
//!
//! Each effect is a pure mapping from the current pointer position to a target transform. The
//! runtime eases toward that target with per-slot retargetable tweens and resets to neutral
//! when the pointer leaves.

use crate::{
    animation::anim::Prop,
    animation::ease::Ease,
    animation::tween::TweenSet,
    foundation::core::{Point, Rect, Vec2, Viewport},
    foundation::error::{ScrollreelError, ScrollreelResult},
    host::document::{Document, ElementId, Selector, StyleWrite},
    host::events::{EventKind, ListenerScope},
};

/// The mouse-move parallax offset for target `index`.
pub fn parallax_offset(
    pointer: Point,
    viewport: Viewport,
    strength: f64,
    index: usize,
    index_factor: f64,
) -> Vec2 {
    let scale = strength * (1.0 + index as f64 * index_factor);
    Vec2::new(
        (pointer.x / viewport.width - 0.5) * scale,
        (pointer.y / viewport.height - 0.5) * scale,
    )
}

/// Pull toward the pointer: `pull` times the offset from the element center.
pub fn magnetic_offset(pointer: Point, rect: Rect, pull: f64) -> Vec2 {
    (pointer - rect.center()) * pull
}

/// `(rotation_x, rotation_y)` in degrees for a pointer over `rect`.
pub fn tilt_angles(pointer: Point, rect: Rect, max_deg: f64) -> (f64, f64) {
    let cx = rect.width() / 2.0;
    let cy = rect.height() / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return (0.0, 0.0);
    }
    let x = pointer.x - rect.x0;
    let y = pointer.y - rect.y0;
    (((y - cy) / cy) * -max_deg, ((x - cx) / cx) * max_deg)
}

/// Pupil offset toward the pointer, bounded by `max_offset`.
pub fn eye_offset(pointer: Point, eye_center: Point, max_offset: f64, falloff: f64) -> Vec2 {
    let d = pointer - eye_center;
    let len = d.hypot();
    if len == 0.0 || falloff <= 0.0 {
        return Vec2::ZERO;
    }
    let distance = (len / falloff).min(max_offset);
    d * (distance / len)
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Parallax on mouse move, deeper for later targets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parallax {
    /// Moved elements.
    pub target: Selector,
    /// Offset in pixels at the viewport edge.
    pub strength: f64,
    /// Extra strength per target index.
    #[serde(default)]
    pub index_factor: f64,
    /// Catch-up duration.
    #[serde(default = "one_second")]
    pub duration: f64,
}

/// Magnetic pull toward the pointer while hovering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Magnetic {
    /// Pulled element.
    pub target: Selector,
    /// Fraction of the center offset applied.
    pub pull: f64,
}

/// 3D tilt toward the pointer while hovering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tilt {
    /// Tilted card.
    pub target: Selector,
    /// Rotation at the card edge, in degrees.
    pub max_deg: f64,
    /// Scale while hovered.
    #[serde(default = "unit")]
    pub hover_scale: f64,
    /// Authored z rotation restored on leave.
    #[serde(default)]
    pub rest_rotation: f64,
}

/// Pupils that look at the pointer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EyeFollow {
    /// Moved pupils; each follows its own center.
    pub target: Selector,
    /// Maximum pupil travel in pixels.
    pub max_offset: f64,
    /// Pointer distance per pixel of travel.
    pub falloff: f64,
}

/// Custom cursor: a dot glued to the pointer and a lagging ring.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CursorFollow {
    /// The dot.
    pub dot: Selector,
    /// The trailing ring.
    pub ring: Selector,
    /// Dot catch-up in seconds.
    #[serde(default = "dot_lag")]
    pub dot_lag: f64,
    /// Ring catch-up in seconds.
    #[serde(default = "ring_lag")]
    pub ring_lag: f64,
}

fn one_second() -> f64 {
    1.0
}

fn unit() -> f64 {
    1.0
}

fn dot_lag() -> f64 {
    0.1
}

fn ring_lag() -> f64 {
    0.6
}

/// Declared pointer effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum PointerEffect {
    /// See [`Parallax`].
    Parallax(Parallax),
    /// See [`Magnetic`].
    Magnetic(Magnetic),
    /// See [`Tilt`].
    Tilt(Tilt),
    /// See [`EyeFollow`].
    EyeFollow(EyeFollow),
    /// See [`CursorFollow`].
    CursorFollow(CursorFollow),
}

impl PointerEffect {
    /// Check numeric parameters.
    pub fn validate(&self) -> ScrollreelResult<()> {
        let ok = match self {
            Self::Parallax(p) => {
                p.strength.is_finite() && p.index_factor.is_finite() && p.duration >= 0.0
            }
            Self::Magnetic(m) => m.pull.is_finite(),
            Self::Tilt(t) => t.max_deg.is_finite() && positive(t.hover_scale),
            Self::EyeFollow(e) => positive(e.max_offset) && positive(e.falloff),
            Self::CursorFollow(c) => c.dot_lag >= 0.0 && c.ring_lag >= 0.0,
        };
        if ok {
            Ok(())
        } else {
            Err(ScrollreelError::validation(format!(
                "invalid pointer effect parameters: {self:?}"
            )))
        }
    }

    /// Listeners the effect needs, beyond the window pointer-leave every effect uses.
    pub fn listeners(&self, doc: &Document, scope: ElementId) -> Vec<(EventKind, ListenerScope)> {
        match self {
            Self::Magnetic(Magnetic { target, .. }) | Self::Tilt(Tilt { target, .. }) => doc
                .query(scope, target)
                .into_iter()
                .flat_map(|el| {
                    [
                        (EventKind::PointerMove, ListenerScope::Element(el)),
                        (EventKind::PointerLeave, ListenerScope::Element(el)),
                    ]
                })
                .collect(),
            _ => vec![(EventKind::PointerMove, ListenerScope::Window)],
        }
    }
}

const HOVER_EASE: Ease = Ease::OutQuad;

#[derive(Clone, Debug)]
struct Bound {
    effect: PointerEffect,
    targets: Vec<ElementId>,
    // only for cursor effects
    rings: Vec<ElementId>,
    hovered: Vec<bool>,
}

/// Bound effects of one section plus their eased state.
#[derive(Clone, Debug, Default)]
pub struct EffectRuntime {
    bound: Vec<Bound>,
    tweens: TweenSet,
}

impl EffectRuntime {
    /// Bind effects to the elements under `scope`.
    pub fn bind(
        effects: &[PointerEffect],
        doc: &Document,
        scope: ElementId,
    ) -> ScrollreelResult<Self> {
        let mut bound = Vec::with_capacity(effects.len());
        for effect in effects {
            effect.validate()?;
            let (targets, rings) = match effect {
                PointerEffect::Parallax(Parallax { target, .. })
                | PointerEffect::Magnetic(Magnetic { target, .. })
                | PointerEffect::Tilt(Tilt { target, .. })
                | PointerEffect::EyeFollow(EyeFollow { target, .. }) => {
                    (doc.query(scope, target), Vec::new())
                }
                PointerEffect::CursorFollow(c) => (doc.query(scope, &c.dot), doc.query(scope, &c.ring)),
            };
            if targets.is_empty() && rings.is_empty() {
                tracing::debug!(effect = ?effect, "pointer effect matches no element");
            }
            bound.push(Bound {
                effect: effect.clone(),
                hovered: vec![false; targets.len()],
                targets,
                rings,
            });
        }
        Ok(Self {
            bound,
            tweens: TweenSet::new(),
        })
    }

    /// Return `true` when no effect was declared.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Retarget every effect for a pointer at `pointer` (viewport coordinates).
    ///
    /// `scroll_y` is the offset the targets are drawn at, which differs from the document
    /// scroll while their section is pinned.
    pub fn on_pointer_move(
        &mut self,
        doc: &Document,
        pointer: Point,
        viewport: Viewport,
        scroll_y: f64,
    ) {
        let tweens = &mut self.tweens;
        let mut to = |el: ElementId, prop: Prop, value: f64, duration: f64, ease: Ease| {
            tweens.to(el, prop, doc.computed(el, prop), value, duration, ease);
        };
        for b in &mut self.bound {
            match &b.effect {
                PointerEffect::Parallax(p) => {
                    for (i, &el) in b.targets.iter().enumerate() {
                        let off = parallax_offset(pointer, viewport, p.strength, i, p.index_factor);
                        to(el, Prop::X, off.x, p.duration, HOVER_EASE);
                        to(el, Prop::Y, off.y, p.duration, HOVER_EASE);
                    }
                }
                PointerEffect::Magnetic(m) => {
                    for (i, &el) in b.targets.iter().enumerate() {
                        let rect = doc.viewport_rect(el, scroll_y);
                        if rect.contains(pointer) {
                            let off = magnetic_offset(pointer, rect, m.pull);
                            to(el, Prop::X, off.x, 0.25, HOVER_EASE);
                            to(el, Prop::Y, off.y, 0.25, HOVER_EASE);
                            b.hovered[i] = true;
                        } else if std::mem::take(&mut b.hovered[i]) {
                            reset_magnetic(&mut to, el);
                        }
                    }
                }
                PointerEffect::Tilt(t) => {
                    for (i, &el) in b.targets.iter().enumerate() {
                        let rect = doc.viewport_rect(el, scroll_y);
                        if rect.contains(pointer) {
                            let (rx, ry) = tilt_angles(pointer, rect, t.max_deg);
                            to(el, Prop::RotationX, rx, 0.4, HOVER_EASE);
                            to(el, Prop::RotationY, ry, 0.4, HOVER_EASE);
                            to(el, Prop::Scale, t.hover_scale, 0.4, HOVER_EASE);
                            b.hovered[i] = true;
                        } else if std::mem::take(&mut b.hovered[i]) {
                            reset_tilt(&mut to, el, t.rest_rotation);
                        }
                    }
                }
                PointerEffect::EyeFollow(e) => {
                    for &el in &b.targets {
                        let center = doc.viewport_rect(el, scroll_y).center();
                        let off = eye_offset(pointer, center, e.max_offset, e.falloff);
                        to(el, Prop::X, off.x, 0.2, HOVER_EASE);
                        to(el, Prop::Y, off.y, 0.2, HOVER_EASE);
                    }
                }
                PointerEffect::CursorFollow(c) => {
                    for (els, lag) in [(&b.targets, c.dot_lag), (&b.rings, c.ring_lag)] {
                        for &el in els {
                            to(el, Prop::X, pointer.x, lag, HOVER_EASE);
                            to(el, Prop::Y, pointer.y, lag, HOVER_EASE);
                        }
                    }
                }
            }
        }
    }

    /// Ease every target back to neutral.
    pub fn on_pointer_leave(&mut self, doc: &Document) {
        let tweens = &mut self.tweens;
        let mut to = |el: ElementId, prop: Prop, value: f64, duration: f64, ease: Ease| {
            tweens.to(el, prop, doc.computed(el, prop), value, duration, ease);
        };
        for b in &mut self.bound {
            b.hovered.iter_mut().for_each(|h| *h = false);
            match &b.effect {
                PointerEffect::Magnetic(_) => {
                    for &el in &b.targets {
                        reset_magnetic(&mut to, el);
                    }
                }
                PointerEffect::Tilt(t) => {
                    for &el in &b.targets {
                        reset_tilt(&mut to, el, t.rest_rotation);
                    }
                }
                PointerEffect::Parallax(p) => {
                    for &el in &b.targets {
                        to(el, Prop::X, 0.0, p.duration, HOVER_EASE);
                        to(el, Prop::Y, 0.0, p.duration, HOVER_EASE);
                    }
                }
                PointerEffect::EyeFollow(_) | PointerEffect::CursorFollow(_) => {
                    for &el in b.targets.iter().chain(&b.rings) {
                        to(el, Prop::X, doc.base_value(el, Prop::X), 0.2, HOVER_EASE);
                        to(el, Prop::Y, doc.base_value(el, Prop::Y), 0.2, HOVER_EASE);
                    }
                }
            }
        }
    }

    /// Advance every eased value.
    pub fn tick(&mut self, dt: f64) {
        self.tweens.tick(dt);
    }

    /// Number of values still easing.
    pub fn in_flight(&self) -> usize {
        self.tweens.in_flight()
    }

    /// Current eased values.
    pub fn writes(&self, out: &mut Vec<StyleWrite>) {
        self.tweens.writes(out);
    }

    /// Cancel every in-flight tween and forget all state.
    pub fn cancel(&mut self) {
        self.tweens.clear();
        for b in &mut self.bound {
            b.hovered.iter_mut().for_each(|h| *h = false);
        }
    }
}

fn reset_magnetic(to: &mut impl FnMut(ElementId, Prop, f64, f64, Ease), el: ElementId) {
    let ease = Ease::out_elastic(1.0, 0.4);
    to(el, Prop::X, 0.0, 0.4, ease);
    to(el, Prop::Y, 0.0, 0.4, ease);
}

fn reset_tilt(to: &mut impl FnMut(ElementId, Prop, f64, f64, Ease), el: ElementId, rest: f64) {
    let ease = Ease::out_elastic(1.0, 0.5);
    to(el, Prop::RotationX, 0.0, 0.5, ease);
    to(el, Prop::RotationY, 0.0, 0.5, ease);
    to(el, Prop::Scale, 1.0, 0.5, ease);
    to(el, Prop::Rotation, rest, 0.5, ease);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pointer.rs"]
mod tests;
