use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::{
    foundation::core::{LayoutBox, Length, ScrollSpan, Viewport},
    foundation::error::{ScrollreelError, ScrollreelResult},
    host::document::{Document, ElementId, Spacer},
    trigger::pin::{PinController, PinSpec, PinState},
};

/// Fractional position along an element's or the viewport's height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeAnchor {
    /// 0.
    Top,
    /// 0.5.
    Center,
    /// 1.
    Bottom,
    /// Any fraction (`0.8` = "80%").
    Fraction(f64),
}

impl EdgeAnchor {
    /// Fraction of the height.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
            Self::Fraction(f) => f,
        }
    }
}

impl FromStr for EdgeAnchor {
    type Err = ScrollreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => other
                .strip_suffix('%')
                .and_then(|pct| pct.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .map(|v| Self::Fraction(v / 100.0))
                .ok_or_else(|| ScrollreelError::validation(format!("bad edge anchor '{other}'"))),
        }
    }
}

impl fmt::Display for EdgeAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Fraction(v) => write!(f, "{}%", v * 100.0),
        }
    }
}

/// "Element anchor meets viewport anchor", e.g. `top 80%`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edge {
    /// Anchor on the trigger element.
    pub element: EdgeAnchor,
    /// Anchor on the viewport.
    pub viewport: EdgeAnchor,
}

impl Edge {
    /// Edge from two anchors.
    pub fn new(element: EdgeAnchor, viewport: EdgeAnchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this edge is met.
    pub fn resolve(self, layout: LayoutBox, viewport: Viewport) -> f64 {
        layout.y + self.element.fraction() * layout.height
            - self.viewport.fraction() * viewport.height
    }
}

impl FromStr for Edge {
    type Err = ScrollreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(el), Some(vp), None) => Ok(Self::new(el.parse()?, vp.parse()?)),
            _ => Err(ScrollreelError::validation(format!(
                "edge must be '<element> <viewport>', got '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for Edge {
    type Error = ScrollreelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Edge> for String {
    fn from(value: Edge) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// End of a trigger region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EndSpec {
    /// Element/viewport edge, like the start.
    Edge(Edge),
    /// Fixed distance past the start (`+=150%` or `+=400px`).
    Distance(Length),
}

impl FromStr for EndSpec {
    type Err = ScrollreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.trim().strip_prefix("+=") else {
            return s.parse().map(Self::Edge);
        };
        let bad = || ScrollreelError::validation(format!("bad end distance '{s}'"));
        let length = if let Some(pct) = rest.strip_suffix('%') {
            Length::ViewportHeights(pct.parse::<f64>().map_err(|_| bad())? / 100.0)
        } else {
            Length::Px(
                rest.strip_suffix("px")
                    .unwrap_or(rest)
                    .parse::<f64>()
                    .map_err(|_| bad())?,
            )
        };
        if !length.is_valid() {
            return Err(bad());
        }
        Ok(Self::Distance(length))
    }
}

impl TryFrom<String> for EndSpec {
    type Error = ScrollreelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EndSpec> for String {
    fn from(value: EndSpec) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EndSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge(e) => write!(f, "{e}"),
            Self::Distance(Length::Px(px)) => write!(f, "+={px}px"),
            Self::Distance(Length::ViewportHeights(n)) => write!(f, "+={}%", n * 100.0),
        }
    }
}

/// Declared trigger region of a section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    /// Where the region starts.
    pub start: Edge,
    /// Where the region ends.
    pub end: EndSpec,
    /// Pin the element for the region's length (scrubbed sections only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinSpec>,
}

impl TriggerSpec {
    /// Region from `start` to `end`, unpinned.
    pub fn new(start: Edge, end: EndSpec) -> Self {
        Self {
            start,
            end,
            pin: None,
        }
    }

    /// Pin for the region's length.
    pub fn pinned(mut self, pin: PinSpec) -> Self {
        self.pin = Some(pin);
        self
    }
}

/// Boundary crossing reported by [`TriggerRegistry::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TriggerEvent {
    /// Crossed the start moving down.
    Enter,
    /// Crossed the end moving down.
    Leave,
    /// Crossed the end moving up.
    EnterBack,
    /// Crossed the start moving up.
    LeaveBack,
}

/// Identifier of a registered region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriggerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Unknown,
    Before,
    Inside,
    After,
}

fn crossings(from: Zone, to: Zone) -> SmallVec<[TriggerEvent; 2]> {
    use TriggerEvent::*;
    match (from, to) {
        (Zone::Unknown | Zone::Before, Zone::Inside) => smallvec::smallvec![Enter],
        (Zone::Unknown | Zone::Before, Zone::After) => smallvec::smallvec![Enter, Leave],
        (Zone::Inside, Zone::After) => smallvec::smallvec![Leave],
        (Zone::After, Zone::Inside) => smallvec::smallvec![EnterBack],
        (Zone::After, Zone::Before) => smallvec::smallvec![EnterBack, LeaveBack],
        (Zone::Inside, Zone::Before) => smallvec::smallvec![LeaveBack],
        _ => SmallVec::new(),
    }
}

/// Result of observing one region at a scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Progress through the region in `[0, 1]`.
    pub progress: f64,
    /// Scroll position is within the region.
    pub active: bool,
    /// Boundary crossings since the previous observation, in scroll order.
    pub events: SmallVec<[TriggerEvent; 2]>,
    /// Pin geometry when the region pins.
    pub pin: Option<PinState>,
}

impl Observation {
    fn unready() -> Self {
        Self {
            progress: 0.0,
            active: false,
            events: SmallVec::new(),
            pin: None,
        }
    }
}

#[derive(Debug)]
struct Region {
    element: ElementId,
    spec: TriggerSpec,
    span: Option<ScrollSpan>,
    zone: Zone,
    pin: Option<PinController>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next: u64,
    regions: BTreeMap<u64, Region>,
}

/// Shared registry of live trigger regions.
#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

/// Ownership of one registered region; dropping it deregisters.
#[must_use = "dropping a TriggerHandle deregisters the region"]
#[derive(Debug)]
pub struct TriggerHandle {
    id: TriggerId,
    inner: Weak<RefCell<RegistryInner>>,
}

impl TriggerHandle {
    /// Registered region id.
    pub fn id(&self) -> TriggerId {
        self.id
    }
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().regions.remove(&self.id.0);
        }
    }
}

impl TriggerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region on `element`.
    ///
    /// Geometry stays unresolved (and the region inert) until the next [`refresh`](Self::refresh).
    pub fn register(
        &self,
        element: ElementId,
        spec: TriggerSpec,
        scrub: bool,
    ) -> ScrollreelResult<TriggerHandle> {
        if spec.pin.is_some() && !scrub {
            return Err(ScrollreelError::validation(
                "pinning requires a scrubbed trigger",
            ));
        }
        let mut inner = self.inner.borrow_mut();
        let id = inner.next;
        inner.next += 1;
        inner.regions.insert(
            id,
            Region {
                element,
                spec,
                span: None,
                zone: Zone::Unknown,
                pin: None,
            },
        );
        Ok(TriggerHandle {
            id: TriggerId(id),
            inner: Rc::downgrade(&self.inner),
        })
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.inner.borrow().regions.len()
    }

    /// Return `true` when no region is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recompute pin spacing and every region's scroll span from current layout.
    #[tracing::instrument(skip(self, doc))]
    pub fn refresh(&self, doc: &mut Document, viewport: Viewport) {
        let mut inner = self.inner.borrow_mut();

        let mut pinned: Vec<(f64, u64)> = inner
            .regions
            .iter()
            .filter(|(_, r)| r.spec.pin.is_some())
            .map(|(&id, r)| (doc.authored_layout(r.element).y, id))
            .collect();
        pinned.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        // a pin's budget is unaffected by spacing above it, so spacers come from authored layout
        let mut spacers = Vec::new();
        for &(_, id) in &pinned {
            let r = &inner.regions[&id];
            let Some(pin) = r.spec.pin else { continue };
            let layout = doc.authored_layout(r.element);
            if !pin.spacing || layout.is_collapsed() {
                continue;
            }
            let span = resolve_span(&r.spec, layout, viewport);
            if span.length() > 0.0 {
                spacers.push(Spacer {
                    anchor_y: layout.bottom(),
                    amount: span.length(),
                });
            }
        }
        doc.set_spacers(spacers);

        let mut unready = 0usize;
        for r in inner.regions.values_mut() {
            let layout = doc.layout(r.element);
            if layout.is_collapsed() {
                r.span = None;
                r.pin = None;
                unready += 1;
                continue;
            }
            let span = resolve_span(&r.spec, layout, viewport);
            r.span = Some(span);
            r.pin = r.spec.pin.map(|p| PinController::new(span, layout.y, p));
        }
        if unready > 0 {
            tracing::debug!(unready, "trigger regions waiting for layout");
        }
    }

    /// Observe region `id` at `scroll_y`, returning crossings since the last observation.
    ///
    /// Returns `None` for an unknown id.
    pub fn observe(&self, id: TriggerId, scroll_y: f64) -> Option<Observation> {
        let mut inner = self.inner.borrow_mut();
        let r = inner.regions.get_mut(&id.0)?;
        let Some(span) = r.span else {
            return Some(Observation::unready());
        };
        let zone = if scroll_y < span.start {
            Zone::Before
        } else if scroll_y > span.end {
            Zone::After
        } else {
            Zone::Inside
        };
        let events = crossings(r.zone, zone);
        r.zone = zone;
        Some(Observation {
            progress: span.progress(scroll_y),
            active: span.contains(scroll_y),
            events,
            pin: r.pin.map(|p| p.state(scroll_y)),
        })
    }

    /// Resolved span of region `id`, if laid out.
    pub fn span(&self, id: TriggerId) -> Option<ScrollSpan> {
        self.inner.borrow().regions.get(&id.0).and_then(|r| r.span)
    }
}

fn resolve_span(spec: &TriggerSpec, layout: LayoutBox, viewport: Viewport) -> ScrollSpan {
    let start = spec.start.resolve(layout, viewport);
    let end = match spec.end {
        EndSpec::Edge(e) => e.resolve(layout, viewport),
        EndSpec::Distance(d) => start + d.resolve(viewport),
    };
    if end < start {
        tracing::warn!(start, end, "trigger end resolves above its start; clamping");
    }
    ScrollSpan {
        start,
        end: end.max(start),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/registry.rs"]
mod tests;
