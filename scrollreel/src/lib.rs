//! scrollreel is a headless, deterministic scroll choreography engine.
//!
//! A page is a static element tree with known layout boxes plus a list of sections. Each
//! section declares a trigger region, an entrance or scrubbed timeline, pointer effects and
//! ambient loops. The [`Engine`] takes input events and produces [`FrameSnapshot`]s:
//!
//! - Load and validate a [`PageSpec`] (or start from [`presets::studio_page`])
//! - Create an [`Engine`] for an [`Environment`]
//! - Feed scroll, resize, pointer, tick and click events, then read [`Engine::snapshot`]
//!
//! The engine never touches a real DOM; a host applies snapshot styles to its own elements.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod animation;
/// Pointer-reactive effects.
pub mod effects;
pub mod host;
/// Page-level navigation.
pub mod nav;
/// Modal and floating UI state.
pub mod overlay;
pub mod page;
/// Mapping from environment to motion capabilities.
pub mod policy;
pub mod presets;
pub mod section;
pub mod trigger;

pub use crate::foundation::core::{LayoutBox, Length, Point, Rect, ScrollSpan, Vec2, Viewport};
pub use crate::foundation::error::{ScrollreelError, ScrollreelResult};

pub use crate::animation::anim::Prop;
pub use crate::animation::ease::Ease;
pub use crate::host::document::{Document, ElementAction, ElementSpec, Selector};
pub use crate::page::engine::{Engine, EngineOpts, FrameSnapshot};
pub use crate::page::model::PageSpec;
pub use crate::policy::{Environment, MotionPolicy, MotionProfile, ViewportClass};
pub use crate::section::model::{SectionMode, SectionSpec};
