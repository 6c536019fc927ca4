// LogDock - ui/theme.rs
//
// Colour scheme, line-level colour mapping, and panel chrome constants.
// No dependencies on app state or business logic.

use crate::app::tail::LineLevel;
use egui::Color32;

/// Text colour for a given line level.
pub fn level_colour(level: LineLevel) -> Color32 {
    match level {
        LineLevel::Error => Color32::from_rgb(220, 38, 38),   // Red 600
        LineLevel::Warning => Color32::from_rgb(217, 119, 6), // Amber 600
        LineLevel::Info => Color32::from_rgb(209, 213, 219),  // Gray 300
        LineLevel::Debug => Color32::from_rgb(107, 114, 128), // Gray 500
        LineLevel::Other => Color32::from_rgb(156, 163, 175), // Gray 400
    }
}

/// Background highlight colour for a line level (subtle, for row backgrounds).
pub fn level_bg_colour(level: LineLevel) -> Option<Color32> {
    match level {
        LineLevel::Error => Some(Color32::from_rgba_premultiplied(220, 38, 38, 25)),
        LineLevel::Warning => Some(Color32::from_rgba_premultiplied(217, 119, 6, 15)),
        _ => None,
    }
}

/// Panel chrome colours.
pub const PANEL_BG: Color32 = Color32::from_rgb(17, 24, 39); // Gray 900
pub const PANEL_BORDER: Color32 = Color32::from_rgb(55, 65, 81); // Gray 700
pub const GRIP_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const GRIP_BG_ACTIVE: Color32 = Color32::from_rgb(55, 65, 81); // Gray 700
pub const GRIP_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Layout constants.
pub const GRIP_HEIGHT: f32 = 24.0;
pub const ROW_HEIGHT: f32 = 18.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const PANEL_ROUNDING: u8 = 4;
