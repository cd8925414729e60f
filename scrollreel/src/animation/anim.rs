use std::collections::BTreeMap;

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`.
    ///
    /// `t` is usually in `[0, 1]` but overshooting eases may push it slightly outside.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Animatable inline style property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Prop {
    /// Horizontal translation in px.
    X,
    /// Vertical translation in px.
    Y,
    /// 2D rotation in degrees.
    Rotation,
    /// 3D rotation about the X axis in degrees.
    RotationX,
    /// 3D rotation about the Y axis in degrees.
    RotationY,
    /// Uniform scale.
    Scale,
    /// Horizontal scale.
    ScaleX,
    /// Vertical scale.
    ScaleY,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Gaussian blur radius in px.
    Blur,
    /// Width as a percentage of the containing block.
    WidthPct,
}

impl Prop {
    /// Value the property has when nothing sets it.
    pub fn neutral(self) -> f64 {
        match self {
            Self::X | Self::Y | Self::Rotation | Self::RotationX | Self::RotationY | Self::Blur => {
                0.0
            }
            Self::Scale | Self::ScaleX | Self::ScaleY | Self::Opacity => 1.0,
            Self::WidthPct => 100.0,
        }
    }

    /// Return `true` for properties that end up in the element transform.
    pub fn is_transform(self) -> bool {
        matches!(
            self,
            Self::X
                | Self::Y
                | Self::Rotation
                | Self::RotationX
                | Self::RotationY
                | Self::Scale
                | Self::ScaleX
                | Self::ScaleY
        )
    }

    /// Clamp a value into the property's legal range.
    pub fn sanitize(self, v: f64) -> f64 {
        match self {
            Self::Opacity => v.clamp(0.0, 1.0),
            Self::Blur => v.max(0.0),
            _ => v,
        }
    }
}

/// Property values keyed by property.
pub type StyleMap = BTreeMap<Prop, f64>;

/// Tween endpoint value, optionally varying by target index.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TweenValue {
    /// Same value for every target.
    Const(f64),
    /// One value per matched target, in document order.
    PerIndex {
        /// Values indexed by target position.
        values: Vec<f64>,
        /// Value for targets past the end of `values`.
        #[serde(default)]
        fallback: f64,
    },
}

impl TweenValue {
    /// Value for target at position `index`.
    pub fn at(&self, index: usize) -> f64 {
        match self {
            Self::Const(v) => *v,
            Self::PerIndex { values, fallback } => values.get(index).copied().unwrap_or(*fallback),
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        match self {
            Self::Const(v) => v.is_finite(),
            Self::PerIndex { values, fallback } => {
                fallback.is_finite() && values.iter().all(|v| v.is_finite())
            }
        }
    }
}

impl From<f64> for TweenValue {
    fn from(v: f64) -> Self {
        Self::Const(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
