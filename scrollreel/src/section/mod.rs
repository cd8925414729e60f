//! Page sections: declarative specs and their lifecycle controllers.

/// Mount, event handling, rendering and teardown of one section.
pub mod controller;
/// Section specs.
pub mod model;
