// LogDock - core/panel.rs
//
// The Panel record and its tri-state lifecycle.
//
// The lifecycle is an explicit enum with a pure transition function rather
// than overridable methods: the host inspects the returned event and reacts,
// which keeps the state machine independently testable.

use crate::core::geometry::{Margin, Rect};
use serde::{Deserialize, Serialize};

/// Opaque handle identifying a panel within its host.
///
/// Allocated from the host's monotonic counter; never reused within a host's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub u64);

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Lifecycle state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelState {
    /// Normal grid-cell layout.
    Restored,
    /// Occupies the host minus the minimized band.
    Maximized,
    /// Collapsed into the minimized band while a sibling is maximized.
    Minimized,
}

/// Event raised by a state transition that actually changed the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Restored,
    Maximized,
    Minimized,
}

impl PanelState {
    /// Apply a transition, returning the new state and the event to raise.
    ///
    /// Transitions to the current state are idempotent and raise no event.
    pub fn transition(self, to: PanelState) -> (PanelState, Option<PanelEvent>) {
        if self == to {
            return (self, None);
        }
        let event = match to {
            PanelState::Restored => PanelEvent::Restored,
            PanelState::Maximized => PanelEvent::Maximized,
            PanelState::Minimized => PanelEvent::Minimized,
        };
        (to, Some(event))
    }
}

/// A rectangular, draggable, dockable unit hosted on the panel canvas.
///
/// Content is opaque to the layout engine; a panel exposes only geometry and
/// lifecycle. The current rect is what the renderer draws this frame; the
/// target rect is the layout calculator's most recent output, which the
/// animation surface interpolates toward.
#[derive(Debug, Clone)]
pub struct Panel {
    pub id: PanelId,
    /// Where the panel currently is (updated per animation tick).
    pub rect: Rect,
    /// Where the layout calculator last told it to be.
    pub target: Rect,
    pub state: PanelState,
    /// Z-order rank: higher draws on top. Assigned from the host's counter.
    pub z: u32,
    pub margin: Margin,
    pub min_width: f64,
    pub min_height: f64,
    /// Cleared while a sibling is maximized.
    pub dragging_enabled: bool,
    /// Grid slot, managed by the host.
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl Panel {
    pub fn new(id: PanelId, margin: Margin) -> Self {
        Self {
            id,
            rect: Rect::default(),
            target: Rect::default(),
            state: PanelState::Restored,
            z: 0,
            margin,
            min_width: 0.0,
            min_height: 0.0,
            dragging_enabled: true,
            row: 0,
            col: 0,
        }
    }

    /// The panel's grid slot as (row, column).
    pub fn slot(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Flat slot index under the given column count.
    pub fn slot_index(&self, columns: usize) -> usize {
        self.row * columns + self.col
    }

    /// Set the current rect, clamping to the panel's minimum size.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width.max(self.min_width),
            height: rect.height.max(self.min_height),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_changes_state_and_raises_event() {
        let (state, event) = PanelState::Restored.transition(PanelState::Maximized);
        assert_eq!(state, PanelState::Maximized);
        assert_eq!(event, Some(PanelEvent::Maximized));

        let (state, event) = state.transition(PanelState::Minimized);
        assert_eq!(state, PanelState::Minimized);
        assert_eq!(event, Some(PanelEvent::Minimized));

        let (state, event) = state.transition(PanelState::Restored);
        assert_eq!(state, PanelState::Restored);
        assert_eq!(event, Some(PanelEvent::Restored));
    }

    #[test]
    fn test_transition_is_idempotent() {
        for s in [
            PanelState::Restored,
            PanelState::Maximized,
            PanelState::Minimized,
        ] {
            let (state, event) = s.transition(s);
            assert_eq!(state, s);
            assert_eq!(event, None, "no event may fire for a no-op transition");
        }
    }

    #[test]
    fn test_set_rect_respects_minimum_size() {
        let mut panel = Panel::new(PanelId(1), Margin::default());
        panel.min_width = 100.0;
        panel.min_height = 50.0;
        panel.set_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(panel.rect.width, 100.0);
        assert_eq!(panel.rect.height, 50.0);
    }

    #[test]
    fn test_slot_index_uses_column_count() {
        let mut panel = Panel::new(PanelId(1), Margin::default());
        panel.row = 2;
        panel.col = 1;
        assert_eq!(panel.slot_index(3), 7);
        assert_eq!(panel.slot_index(2), 5);
    }
}
