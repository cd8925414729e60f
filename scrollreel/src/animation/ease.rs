use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Easing functions used to reshape normalized animation progress.
///
/// Every variant maps `0 -> 0` and `1 -> 1`. The back and elastic variants overshoot inside the
/// open interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation (no reshaping).
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    #[default]
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Ease-out that overshoots the target before settling.
    OutBack {
        /// Overshoot strength (`1.70158` is the classic value).
        overshoot: f64,
    },
    /// Spring-like ease-out oscillating around the target.
    OutElastic {
        /// Oscillation amplitude (`>= 1`).
        amplitude: f64,
        /// Oscillation period in progress units.
        period: f64,
    },
    /// Ease-out that bounces against the target.
    OutBounce,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::OutBack { overshoot } => {
                let c3 = overshoot + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u.powi(3) + overshoot * u.powi(2)
            }
            Self::OutElastic { amplitude, period } => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let a = amplitude.max(1.0);
                let p = if period > 0.0 { period } else { 0.3 };
                let s = p / TAU * (1.0 / a).asin();
                1.0 + a * 2f64.powf(-10.0 * t) * ((t - s) * TAU / p).sin()
            }
            Self::OutBounce => out_bounce(t),
        }
    }

    /// `OutBack` with the classic overshoot.
    pub fn out_back() -> Self {
        Self::OutBack { overshoot: 1.70158 }
    }

    /// `OutElastic` with explicit amplitude and period.
    pub fn out_elastic(amplitude: f64, period: f64) -> Self {
        Self::OutElastic { amplitude, period }
    }

    pub(crate) fn is_valid(self) -> bool {
        match self {
            Self::OutBack { overshoot } => overshoot.is_finite(),
            Self::OutElastic { amplitude, period } => {
                amplitude.is_finite() && period.is_finite() && period > 0.0
            }
            _ => true,
        }
    }
}

fn out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
