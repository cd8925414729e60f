//! Page description and the engine session running it.

/// Event-driven engine producing frame snapshots.
pub mod engine;
/// Serde page model.
pub mod model;
