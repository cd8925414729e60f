use crate::foundation::core::Viewport;

/// Platform signals that decide how much motion a page may use.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Environment {
    /// Current viewport.
    pub viewport: Viewport,
    /// `prefers-reduced-motion: reduce`.
    #[serde(default)]
    pub reduced_motion: bool,
    /// `pointer: fine`.
    #[serde(default = "yes")]
    pub fine_pointer: bool,
    /// `hover: hover`.
    #[serde(default = "yes")]
    pub hover: bool,
}

fn yes() -> bool {
    true
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            reduced_motion: false,
            fine_pointer: true,
            hover: true,
        }
    }
}

/// Layout class used to pick viewport-specific timelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ViewportClass {
    /// Narrower than the mobile breakpoint.
    Mobile,
    /// Everything else.
    Desktop,
}

/// What a section may register under a given [`Environment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MotionProfile {
    /// Viewport class.
    pub class: ViewportClass,
    /// Reduced motion was requested; timelines degrade to fades.
    pub reduced: bool,
    /// Scroll-scrubbed timelines.
    pub scrub: bool,
    /// Pinning.
    pub pin: bool,
    /// Pointer-reactive effects and their listeners.
    pub pointer: bool,
    /// Ambient wall-clock loops.
    pub loops: bool,
}

/// Single table mapping environment to motion capabilities.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionPolicy {
    /// Widths below this are [`ViewportClass::Mobile`].
    pub mobile_max_width: f64,
}

impl Default for MotionPolicy {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
        }
    }
}

impl MotionPolicy {
    /// Viewport class for a width.
    pub fn classify(&self, viewport: Viewport) -> ViewportClass {
        if viewport.width < self.mobile_max_width {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    /// Capabilities for `env`.
    pub fn profile(&self, env: &Environment) -> MotionProfile {
        let full = !env.reduced_motion;
        MotionProfile {
            class: self.classify(env.viewport),
            reduced: env.reduced_motion,
            scrub: full,
            pin: full,
            pointer: full && env.fine_pointer && env.hover,
            loops: full,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/policy/policy.rs"]
mod tests;
