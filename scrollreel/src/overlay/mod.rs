/// Contact modal, floating bar and FAQ accordion state.
pub mod manager;
