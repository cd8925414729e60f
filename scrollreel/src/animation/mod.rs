//! Easing, interpolation, timelines and playback.

/// Property ids and tween endpoint values.
pub mod anim;
/// Easing curves.
pub mod ease;
/// Timeline playback: entrance player, scrub follower, ambient loops.
pub mod playback;
/// Declarative timelines bound to document elements.
pub mod timeline;
/// Retargetable per-slot tweens.
pub mod tween;
