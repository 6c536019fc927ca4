// LogDock - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only types), egui.
// Must NOT depend on: platform, direct I/O.

pub mod animator;
pub mod panel_view;
pub mod theme;
