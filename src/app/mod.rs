// LogDock - app/mod.rs
//
// Application layer: orchestration, state management, live tail, session.
// Dependencies: core layer, platform config types.
// Must NOT depend on: ui.

pub mod session;
pub mod state;
pub mod tail;
