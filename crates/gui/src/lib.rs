// Library crate: exposes the state and the headless harness for integration tests.
// Painting (app, ui) stays in the binary crate.

pub mod harness;
pub mod mercator;
pub mod state;
