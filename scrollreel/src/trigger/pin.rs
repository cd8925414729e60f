use crate::foundation::core::ScrollSpan;

/// Pin configuration for a scrubbed trigger region.
///
/// The scroll budget is the region's resolved length, usually an
/// [`EndSpec::Distance`](crate::trigger::registry::EndSpec::Distance).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PinSpec {
    /// Reserve the budget as layout space below the pinned element.
    #[serde(default = "spacing_default")]
    pub spacing: bool,
}

fn spacing_default() -> bool {
    true
}

impl Default for PinSpec {
    fn default() -> Self {
        Self { spacing: true }
    }
}

/// Where the scroll position sits relative to a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PinPhase {
    /// Above the pin start; the element scrolls normally.
    Before,
    /// Inside the budget; the element holds its viewport position.
    Pinned,
    /// Past the budget; the element scrolls normally again, offset by the budget.
    After,
}

/// Rendered pin geometry for one scroll position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinState {
    /// Current phase.
    pub phase: PinPhase,
    /// Top of the pinned element in viewport coordinates.
    pub viewport_top: f64,
    /// Translation applied to the element to cancel document scroll.
    pub translate_y: f64,
    /// Layout space reserved below the element.
    pub spacer_px: f64,
}

/// Geometry of one engaged pin, rebuilt on every registry refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinController {
    span: ScrollSpan,
    element_top: f64,
    spacing: bool,
}

impl PinController {
    /// Pin covering `span` for an element whose document top is `element_top`.
    pub fn new(span: ScrollSpan, element_top: f64, spec: PinSpec) -> Self {
        Self {
            span,
            element_top,
            spacing: spec.spacing,
        }
    }

    /// Scroll distance consumed while pinned.
    pub fn budget(&self) -> f64 {
        self.span.length()
    }

    /// Layout space reserved below the element.
    pub fn spacer(&self) -> f64 {
        if self.spacing { self.budget() } else { 0.0 }
    }

    /// Pinned scroll span.
    pub fn span(&self) -> ScrollSpan {
        self.span
    }

    /// Phase for a scroll position.
    pub fn phase(&self, scroll_y: f64) -> PinPhase {
        if scroll_y < self.span.start {
            PinPhase::Before
        } else if scroll_y <= self.span.end {
            PinPhase::Pinned
        } else {
            PinPhase::After
        }
    }

    /// Rendered geometry for a scroll position.
    pub fn state(&self, scroll_y: f64) -> PinState {
        let phase = self.phase(scroll_y);
        let (translate_y, viewport_top) = match phase {
            PinPhase::Before => (0.0, self.element_top - scroll_y),
            PinPhase::Pinned => (scroll_y - self.span.start, self.element_top - self.span.start),
            PinPhase::After => (self.budget(), self.element_top + self.budget() - scroll_y),
        };
        PinState {
            phase,
            viewport_top,
            translate_y,
            spacer_px: self.spacer(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/pin.rs"]
mod tests;
