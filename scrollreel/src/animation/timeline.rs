use smallvec::SmallVec;

use crate::{
    animation::anim::{Lerp, Prop, TweenValue},
    animation::ease::Ease,
    foundation::error::{ScrollreelError, ScrollreelResult},
    foundation::math::{EPS, clamp01, seeded_ranks},
    host::document::{Document, ElementId, Selector, StyleWrite},
};

/// Clock driving a timeline. Fixed when the timeline is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Drive {
    /// Wall-clock playback triggered by visibility.
    Entrance,
    /// Progress bound directly to trigger scroll progress.
    Scrub,
}

/// Input sample for [`Timeline::sample`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clock {
    /// Scroll progress in `[0, 1]` (scrub timelines only).
    Scroll(f64),
    /// Seconds since timeline start (entrance timelines only).
    Wall(f64),
}

/// Where a step starts relative to the steps declared before it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Anchor {
    /// `offset` seconds after the previous step's end (negative overlaps it).
    PreviousEnd(f64),
    /// `offset` seconds after the previous step's start.
    PreviousStart(f64),
    /// Absolute time from timeline start.
    At(f64),
}

impl Default for Anchor {
    fn default() -> Self {
        Self::PreviousEnd(0.0)
    }
}

/// Element order used when spreading a staggered tween.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StaggerFrom {
    /// First element first.
    #[default]
    Start,
    /// Last element first.
    End,
    /// Middle outward.
    Center,
    /// Deterministically shuffled.
    Random {
        /// Shuffle seed.
        seed: u64,
    },
}

/// Spacing between staggered targets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StaggerSpread {
    /// Fixed delay between consecutive targets.
    Each(f64),
    /// Total delay spread across all targets.
    Amount(f64),
}

/// Stagger configuration for multi-target tweens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Delay spacing.
    pub spread: StaggerSpread,
    /// Element order.
    #[serde(default)]
    pub from: StaggerFrom,
}

impl Stagger {
    /// Fixed per-target delay from the first element.
    pub fn each(secs: f64) -> Self {
        Self {
            spread: StaggerSpread::Each(secs),
            from: StaggerFrom::Start,
        }
    }

    fn delay(&self, n: usize) -> f64 {
        match self.spread {
            StaggerSpread::Each(e) => e,
            StaggerSpread::Amount(a) if n > 1 => a / (n - 1) as f64,
            StaggerSpread::Amount(_) => 0.0,
        }
    }

    fn ranks(&self, n: usize) -> Vec<usize> {
        match self.from {
            StaggerFrom::Start => (0..n).collect(),
            StaggerFrom::End => (0..n).rev().collect(),
            StaggerFrom::Center => {
                let mid = (n as f64 - 1.0) / 2.0;
                (0..n)
                    .map(|i| (i as f64 - mid).abs().floor() as usize)
                    .collect()
            }
            StaggerFrom::Random { seed } => seeded_ranks(seed, n),
        }
    }
}

/// Animated property in a tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropTween {
    /// Animated property.
    pub prop: Prop,
    /// Start value; when absent the tween starts from the value at its start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<TweenValue>,
    /// End value.
    pub to: TweenValue,
}

/// One tween step: a selector, property set, duration, ease and placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Targets, resolved within the section subtree.
    pub target: Selector,
    /// Animated properties.
    pub props: Vec<PropTween>,
    /// Duration in seconds (or progress units for scrub timelines).
    pub duration: f64,
    /// Ease applied to each target's local progress.
    #[serde(default)]
    pub ease: Ease,
    /// Placement relative to earlier steps.
    #[serde(default)]
    pub anchor: Anchor,
    /// Optional stagger across targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<Stagger>,
}

impl TweenSpec {
    /// Tween on `target` lasting `duration`, with default ease and anchor.
    pub fn new(target: Selector, duration: f64) -> Self {
        Self {
            target,
            props: Vec::new(),
            duration,
            ease: Ease::default(),
            anchor: Anchor::default(),
            stagger: None,
        }
    }

    /// Animate `prop` from an explicit value.
    pub fn from_to(mut self, prop: Prop, from: f64, to: f64) -> Self {
        self.props.push(PropTween {
            prop,
            from: Some(TweenValue::Const(from)),
            to: TweenValue::Const(to),
        });
        self
    }

    /// Animate `prop` from its value at the tween's start.
    pub fn to(mut self, prop: Prop, to: f64) -> Self {
        self.props.push(PropTween {
            prop,
            from: None,
            to: TweenValue::Const(to),
        });
        self
    }

    /// Animate `prop` to per-target values.
    pub fn from_to_each(mut self, prop: Prop, from: f64, to: Vec<f64>, fallback: f64) -> Self {
        self.props.push(PropTween {
            prop,
            from: Some(TweenValue::Const(from)),
            to: TweenValue::PerIndex {
                values: to,
                fallback,
            },
        });
        self
    }

    /// Set the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the placement.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Placement overlapping (`offset < 0`) or trailing the previous step's end.
    pub fn after(self, offset: f64) -> Self {
        self.anchor(Anchor::PreviousEnd(offset))
    }

    /// Absolute placement.
    pub fn at(self, time: f64) -> Self {
        self.anchor(Anchor::At(time))
    }

    /// Stagger across targets.
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }
}

/// Declared timeline step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StepSpec {
    /// Property tween.
    Tween(TweenSpec),
    /// Empty span that only occupies time.
    Pause {
        /// Duration in seconds.
        duration: f64,
        /// Placement.
        #[serde(default)]
        anchor: Anchor,
    },
}

impl StepSpec {
    fn anchor(&self) -> Anchor {
        match self {
            Self::Tween(t) => t.anchor,
            Self::Pause { anchor, .. } => *anchor,
        }
    }
}

/// Ordered list of timeline steps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineSpec {
    /// Steps in declaration order.
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

impl TimelineSpec {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tween step.
    pub fn tween(mut self, tween: TweenSpec) -> Self {
        self.steps.push(StepSpec::Tween(tween));
        self
    }

    /// Append a pause after the previous step.
    pub fn pause(mut self, duration: f64) -> Self {
        self.steps.push(StepSpec::Pause {
            duration,
            anchor: Anchor::default(),
        });
        self
    }

    /// Return `true` when there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check numeric invariants that do not depend on the document.
    pub fn validate(&self) -> ScrollreelResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            let (duration, anchor) = match step {
                StepSpec::Tween(t) => {
                    if t.props.is_empty() {
                        return Err(ScrollreelError::validation(format!(
                            "step {i} ({}) animates no properties",
                            t.target
                        )));
                    }
                    if !t.ease.is_valid() {
                        return Err(ScrollreelError::validation(format!(
                            "step {i} has invalid ease parameters"
                        )));
                    }
                    for p in &t.props {
                        let from_ok = p.from.as_ref().is_none_or(TweenValue::is_finite);
                        if !from_ok || !p.to.is_finite() {
                            return Err(ScrollreelError::validation(format!(
                                "step {i} {:?} values must be finite",
                                p.prop
                            )));
                        }
                    }
                    if let Some(s) = t.stagger {
                        let v = match s.spread {
                            StaggerSpread::Each(v) | StaggerSpread::Amount(v) => v,
                        };
                        if !v.is_finite() || v < 0.0 {
                            return Err(ScrollreelError::validation(format!(
                                "step {i} stagger must be finite and >= 0"
                            )));
                        }
                    }
                    (t.duration, t.anchor)
                }
                StepSpec::Pause { duration, anchor } => (*duration, *anchor),
            };
            if !duration.is_finite() || duration < 0.0 {
                return Err(ScrollreelError::validation(format!(
                    "step {i} duration must be finite and >= 0"
                )));
            }
            let off = match anchor {
                Anchor::PreviousEnd(v) | Anchor::PreviousStart(v) | Anchor::At(v) => v,
            };
            if !off.is_finite() {
                return Err(ScrollreelError::validation(format!(
                    "step {i} anchor offset must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Keep only opacity animation; used when motion must be reduced.
    ///
    /// Stagger and placement are kept so fades still arrive in declared order.
    pub fn fades_only(&self) -> Self {
        let steps = self
            .steps
            .iter()
            .filter_map(|step| match step {
                StepSpec::Tween(t) => {
                    let props: Vec<PropTween> = t
                        .props
                        .iter()
                        .filter(|p| p.prop == Prop::Opacity)
                        .cloned()
                        .collect();
                    (!props.is_empty()).then(|| {
                        StepSpec::Tween(TweenSpec {
                            props,
                            ease: Ease::Linear,
                            ..t.clone()
                        })
                    })
                }
                StepSpec::Pause { .. } => None,
            })
            .collect();
        Self { steps }
    }
}

/// Placement of one step after anchor resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSlot {
    /// Start time.
    pub start: f64,
    /// End time, including stagger spread.
    pub end: f64,
}

/// Resolve step placements given each step's span (duration plus stagger spread).
///
/// Steps are placed in declaration order; every anchor refers to the step declared just before.
pub fn resolve_schedule(anchors_and_spans: &[(Anchor, f64)]) -> ScrollreelResult<Vec<StepSlot>> {
    let mut out = Vec::with_capacity(anchors_and_spans.len());
    let mut prev = StepSlot {
        start: 0.0,
        end: 0.0,
    };
    for (i, &(anchor, span)) in anchors_and_spans.iter().enumerate() {
        let start = match anchor {
            Anchor::PreviousEnd(o) => prev.end + o,
            Anchor::PreviousStart(o) => prev.start + o,
            Anchor::At(t) => t,
        };
        if start < -EPS {
            return Err(ScrollreelError::validation(format!(
                "step {i} resolves to negative start time {start:.3}"
            )));
        }
        let start = start.max(0.0);
        let slot = StepSlot {
            start,
            end: start + span.max(0.0),
        };
        out.push(slot);
        prev = slot;
    }
    Ok(out)
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    start: f64,
    duration: f64,
    from: f64,
    to: f64,
    ease: Ease,
    order: usize,
}

impl Segment {
    fn value_at(&self, time: f64, at_origin: bool) -> f64 {
        let local = if self.duration > 0.0 {
            clamp01((time - self.start) / self.duration)
        } else if time > self.start || (time == self.start && !at_origin) {
            1.0
        } else {
            0.0
        };
        f64::lerp(&self.from, &self.to, self.ease.apply(local))
    }
}

#[derive(Clone, Debug)]
struct Track {
    element: ElementId,
    prop: Prop,
    segments: SmallVec<[Segment; 2]>,
}

#[derive(Clone, Debug)]
struct PendingSegment {
    from: Option<f64>,
    seg: Segment,
}

/// Timeline bound to concrete elements, addressable by a single progress input.
#[derive(Clone, Debug)]
pub struct Timeline {
    drive: Drive,
    duration: f64,
    slots: Vec<StepSlot>,
    tracks: Vec<Track>,
}

impl Timeline {
    /// Bind `spec` to the elements under `scope`.
    ///
    /// Steps whose selector matches nothing still occupy their time and are otherwise no-ops.
    #[tracing::instrument(skip(spec, doc), fields(steps = spec.steps.len()))]
    pub fn bind(
        spec: &TimelineSpec,
        doc: &Document,
        scope: ElementId,
        drive: Drive,
    ) -> ScrollreelResult<Self> {
        spec.validate()?;

        let targets: Vec<Vec<ElementId>> = spec
            .steps
            .iter()
            .map(|step| match step {
                StepSpec::Tween(t) => {
                    let found = doc.query(scope, &t.target);
                    if found.is_empty() {
                        tracing::debug!(
                            selector = %t.target,
                            scope = doc.name(scope),
                            "tween target matches no element"
                        );
                    }
                    found
                }
                StepSpec::Pause { .. } => Vec::new(),
            })
            .collect();

        let spans: Vec<(Anchor, f64)> = spec
            .steps
            .iter()
            .zip(&targets)
            .map(|(step, found)| {
                let span = match step {
                    StepSpec::Tween(t) => {
                        let n = found.len();
                        let spread = t
                            .stagger
                            .map(|s| {
                                let max_rank = s.ranks(n).into_iter().max().unwrap_or(0);
                                s.delay(n) * max_rank as f64
                            })
                            .unwrap_or(0.0);
                        t.duration + spread
                    }
                    StepSpec::Pause { duration, .. } => *duration,
                };
                (step.anchor(), span)
            })
            .collect();
        let slots = resolve_schedule(&spans)?;

        let mut pending: Vec<((ElementId, Prop), PendingSegment)> = Vec::new();
        for (order, ((step, found), slot)) in spec.steps.iter().zip(&targets).zip(&slots).enumerate()
        {
            let StepSpec::Tween(t) = step else {
                continue;
            };
            let n = found.len();
            let (ranks, delay) = match t.stagger {
                Some(s) => (s.ranks(n), s.delay(n)),
                None => (vec![0; n], 0.0),
            };
            for (i, &el) in found.iter().enumerate() {
                let start = slot.start + ranks[i] as f64 * delay;
                for p in &t.props {
                    pending.push((
                        (el, p.prop),
                        PendingSegment {
                            from: p.from.as_ref().map(|v| v.at(i)),
                            seg: Segment {
                                start,
                                duration: t.duration,
                                from: 0.0,
                                to: p.to.at(i),
                                ease: t.ease,
                                order,
                            },
                        },
                    ));
                }
            }
        }

        pending.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.seg.start.total_cmp(&b.1.seg.start))
                .then(a.1.seg.order.cmp(&b.1.seg.order))
        });

        let mut tracks: Vec<Track> = Vec::new();
        for ((el, prop), p) in pending {
            let track = match tracks.last_mut() {
                Some(t) if t.element == el && t.prop == prop => t,
                _ => {
                    tracks.push(Track {
                        element: el,
                        prop,
                        segments: SmallVec::new(),
                    });
                    tracks.last_mut().ok_or_else(|| {
                        ScrollreelError::animation("track allocation failed")
                    })?
                }
            };
            let carried = track
                .segments
                .last()
                .map(|s| s.to)
                .unwrap_or_else(|| doc.base_value(el, prop));
            let mut seg = p.seg;
            seg.from = p.from.unwrap_or(carried);
            track.segments.push(seg);
        }

        let duration = slots.iter().map(|s| s.end).fold(0.0, f64::max);
        Ok(Self {
            drive,
            duration,
            slots,
            tracks,
        })
    }

    /// Clock this timeline accepts.
    pub fn drive(&self) -> Drive {
        self.drive
    }

    /// Total duration (end of the latest step).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Resolved step placements in declaration order.
    pub fn slots(&self) -> &[StepSlot] {
        &self.slots
    }

    /// Number of animated (element, property) tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Convert a clock sample into clamped progress, rejecting the wrong clock.
    pub fn progress_for(&self, clock: Clock) -> ScrollreelResult<f64> {
        match (self.drive, clock) {
            (Drive::Scrub, Clock::Scroll(p)) => Ok(clamp01(p)),
            (Drive::Entrance, Clock::Wall(t)) => Ok(if self.duration > 0.0 {
                clamp01(t / self.duration)
            } else if t > 0.0 {
                1.0
            } else {
                0.0
            }),
            (Drive::Scrub, Clock::Wall(_)) => Err(ScrollreelError::animation(
                "scrub timeline cannot be driven by wall-clock time",
            )),
            (Drive::Entrance, Clock::Scroll(_)) => Err(ScrollreelError::animation(
                "entrance timeline cannot be driven by scroll progress",
            )),
        }
    }

    /// Emit every track's value for the given clock sample.
    pub fn sample(&self, clock: Clock, out: &mut Vec<StyleWrite>) -> ScrollreelResult<()> {
        let progress = self.progress_for(clock)?;
        self.sample_progress(progress, out);
        Ok(())
    }

    pub(crate) fn sample_progress(&self, progress: f64, out: &mut Vec<StyleWrite>) {
        let progress = clamp01(progress);
        let time = progress * self.duration;
        let at_origin = progress == 0.0;
        for track in &self.tracks {
            let idx = track.segments.partition_point(|s| s.start <= time);
            let value = if idx == 0 {
                track.segments[0].from
            } else {
                track.segments[idx - 1].value_at(time, at_origin)
            };
            out.push(StyleWrite {
                element: track.element,
                prop: track.prop,
                value,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
