/// Current section, advance targets and end-of-document state.
pub mod orchestrator;
