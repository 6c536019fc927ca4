// LogDock - util/error.rs
//
// Typed errors for the panel host. Operations that mutate the panel
// collection return these so callers can distinguish a bad panel reference
// from an operation that is merely not allowed right now.

use crate::core::panel::PanelId;
use std::fmt;

/// Errors from panel host operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The referenced panel is not in the host's collection.
    UnknownPanel { id: PanelId },

    /// Structural changes are rejected while a drag is in progress.
    DragInProgress,

    /// Drag was requested on a panel whose dragging is disabled (a sibling
    /// is maximized).
    DragDisabled { id: PanelId },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnknownPanel { id } => {
                write!(f, "unknown panel: {id}")
            }
            HostError::DragInProgress => {
                write!(f, "operation not allowed while a panel drag is in progress")
            }
            HostError::DragDisabled { id } => {
                write!(f, "dragging is disabled for {id} while a panel is maximized")
            }
        }
    }
}

impl std::error::Error for HostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_panel() {
        let e = HostError::UnknownPanel { id: PanelId(7) };
        assert_eq!(e.to_string(), "unknown panel: panel#7");

        let e = HostError::DragDisabled { id: PanelId(2) };
        assert!(e.to_string().contains("panel#2"));
    }
}
