// LogDock - core/mod.rs
//
// Core layout engine layer.
// Dependencies: standard library, tracing, serde derives on settings types.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod drag;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod layout;
pub mod panel;
