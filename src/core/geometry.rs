// LogDock - core/geometry.rs
//
// Plain f64 geometry types used by the panel layout engine.
// Deliberately independent of the GUI toolkit: the engine computes
// rectangles, the UI layer converts to its own types when painting.

use serde::{Deserialize, Serialize};

/// A point in host-relative coordinates (origin at the host's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The measured content-area size of the panel host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether this is a usable measurement.
    ///
    /// Hosts report NaN/infinite/zero sizes before their first real layout
    /// pass; all layout work is deferred until a valid size arrives.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle: position plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect whose width/height are clamped to ≥ 0.
    ///
    /// Margins larger than the available cell must never propagate negative
    /// geometry into the renderer.
    pub fn clamped(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Per-side inset applied between a panel's cell and its visible chrome.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_validity() {
        assert!(Size::new(900.0, 600.0).is_valid());
        assert!(!Size::new(0.0, 600.0).is_valid());
        assert!(!Size::new(f64::NAN, 600.0).is_valid());
        assert!(!Size::new(f64::INFINITY, 600.0).is_valid());
        assert!(!Size::default().is_valid());
    }

    #[test]
    fn test_rect_clamped_never_negative() {
        let r = Rect::clamped(10.0, 10.0, -5.0, -0.1);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn test_margin_totals() {
        let m = Margin {
            left: 1.0,
            top: 2.0,
            right: 3.0,
            bottom: 4.0,
        };
        assert_eq!(m.horizontal(), 4.0);
        assert_eq!(m.vertical(), 6.0);
    }
}
