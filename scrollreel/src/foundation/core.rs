use crate::foundation::error::{ScrollreelError, ScrollreelResult};

pub use kurbo::{Point, Rect, Vec2};

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> ScrollreelResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ScrollreelError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// A distance that may be relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Multiples of the current viewport height (`1.5` = 150%).
    ViewportHeights(f64),
}

impl Length {
    /// Resolve to pixels against the given viewport.
    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::ViewportHeights(n) => n * viewport.height,
        }
    }

    pub(crate) fn is_valid(self) -> bool {
        let v = match self {
            Self::Px(v) | Self::ViewportHeights(v) => v,
        };
        v.is_finite() && v >= 0.0
    }
}

/// Closed scroll-offset span `[start, end]` in document pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSpan {
    /// Scroll offset where the span begins.
    pub start: f64,
    /// Scroll offset where the span ends (`>= start`).
    pub end: f64,
}

impl ScrollSpan {
    /// Create a validated span with `start <= end`.
    pub fn new(start: f64, end: f64) -> ScrollreelResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ScrollreelError::validation("ScrollSpan bounds must be finite"));
        }
        if start > end {
            return Err(ScrollreelError::validation("ScrollSpan start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Span length in pixels.
    pub fn length(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when the span has zero length.
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }

    /// Return `true` when `y` is inside `[start, end]`.
    pub fn contains(self, y: f64) -> bool {
        self.start <= y && y <= self.end
    }

    /// Normalized position of `y` in the span, clamped to `[0, 1]`.
    ///
    /// Degenerate spans are a step function: 0 before `start`, 1 at or after it.
    pub fn progress(self, y: f64) -> f64 {
        if self.is_degenerate() {
            return if y < self.start { 0.0 } else { 1.0 };
        }
        ((y - self.start) / self.length()).clamp(0.0, 1.0)
    }
}

/// Laid-out element box in document coordinates (y grows downward from the document top).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutBox {
    /// Left edge.
    #[serde(default)]
    pub x: f64,
    /// Top edge (document offset).
    pub y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl LayoutBox {
    /// Create a box from position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (document offset).
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Return `true` when the box has no measurable height yet.
    pub fn is_collapsed(self) -> bool {
        self.height.is_nan() || self.height <= 0.0
    }

    /// Convert to a viewport-relative rect for a given scroll offset.
    pub fn to_viewport_rect(self, scroll_y: f64) -> Rect {
        let top = self.y - scroll_y;
        Rect::new(self.x, top, self.x + self.width, top + self.height)
    }

    /// Translate vertically.
    pub fn shifted(self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
