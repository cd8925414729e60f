//! The page the engine drives: element tree, listener registry and observable UI state.

/// Element arena, selectors and owner-tagged inline styles.
pub mod document;
pub mod events;
/// Single-owner observable values with read-only views.
pub mod observable;
