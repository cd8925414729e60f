//! Scroll regions tied to elements, and pinning.

/// Pin geometry for scrubbed regions.
pub mod pin;
/// Trigger region registration and observation.
pub mod registry;
