// LogDock - core/drag.rs
//
// Drag-to-swap state machine: Idle -> Dragging -> Idle.
//
// While a drag is active the dragged panel follows the pointer directly (the
// UI moves it, not the animator). On each pointer move the controller
// hit-tests the grid cell under the pointer; if another panel occupies that
// cell the two panels exchange slots and the host animates everyone else to
// their new cells. Dropping snaps all panels, including the dragged one,
// without animation.

use crate::core::geometry::{Point, Size};
use crate::core::grid::GridDims;
use crate::core::panel::{Panel, PanelId};

/// A slot exchange between the dragged panel and the panel under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub dragged: PanelId,
    pub other: PanelId,
}

/// Tracks the single in-progress drag, if any.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<PanelId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The panel currently being dragged.
    pub fn dragging(&self) -> Option<PanelId> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Record the start of a drag.
    pub fn begin(&mut self, panel: PanelId) {
        self.active = Some(panel);
    }

    /// Clear the drag on drop. Returns the panel that was being dragged.
    pub fn finish(&mut self) -> Option<PanelId> {
        self.active.take()
    }

    /// Hit-test the pointer against the grid and swap slots with the
    /// occupant of the cell under it, if any.
    ///
    /// Cells without an occupant (trailing cells of a partially filled grid)
    /// produce no swap; the drag just keeps tracking the pointer.
    pub fn pointer_moved(
        &self,
        panels: &mut [Panel],
        grid: GridDims,
        bounds: Size,
        pointer: Point,
    ) -> Option<Swap> {
        let dragged_id = self.active?;
        if !bounds.is_valid() {
            return None;
        }

        let row = (pointer.y / (bounds.height / grid.rows as f64)).floor() as isize;
        let col = (pointer.x / (bounds.width / grid.columns as f64)).floor() as isize;
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);

        let target_idx = panels
            .iter()
            .position(|p| p.id != dragged_id && p.slot() == (row, col))?;
        let dragged_idx = panels.iter().position(|p| p.id == dragged_id)?;

        let dragged_slot = panels[dragged_idx].slot();
        let other_id = panels[target_idx].id;

        panels[target_idx].row = dragged_slot.0;
        panels[target_idx].col = dragged_slot.1;
        panels[dragged_idx].row = row;
        panels[dragged_idx].col = col;

        Some(Swap {
            dragged: dragged_id,
            other: other_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Margin;
    use crate::core::grid::{assign_slots, compute_grid};

    fn grid_panels(n: usize) -> (Vec<Panel>, GridDims) {
        let mut panels: Vec<Panel> = (0..n)
            .map(|i| Panel::new(PanelId(i as u64), Margin::default()))
            .collect();
        let grid = compute_grid(n, 0, 0).unwrap();
        let order: Vec<usize> = (0..n).collect();
        assign_slots(&mut panels, &order, grid);
        (panels, grid)
    }

    #[test]
    fn test_drag_over_occupied_cell_swaps_exactly_two() {
        let (mut panels, grid) = grid_panels(4); // 2x2 in 900x600
        let bounds = Size::new(900.0, 600.0);
        let mut ctl = DragController::new();
        ctl.begin(PanelId(0));

        let before: Vec<(usize, usize)> = panels.iter().map(|p| p.slot()).collect();

        // Pointer over the bottom-right cell (panel 3).
        let swap = ctl.pointer_moved(&mut panels, grid, bounds, Point::new(700.0, 450.0));
        assert_eq!(
            swap,
            Some(Swap {
                dragged: PanelId(0),
                other: PanelId(3),
            })
        );
        assert_eq!(panels[0].slot(), before[3]);
        assert_eq!(panels[3].slot(), before[0]);
        // Bystanders untouched.
        assert_eq!(panels[1].slot(), before[1]);
        assert_eq!(panels[2].slot(), before[2]);
    }

    #[test]
    fn test_drag_over_own_cell_is_no_swap() {
        let (mut panels, grid) = grid_panels(4);
        let mut ctl = DragController::new();
        ctl.begin(PanelId(0));
        let swap = ctl.pointer_moved(
            &mut panels,
            grid,
            Size::new(900.0, 600.0),
            Point::new(10.0, 10.0),
        );
        assert_eq!(swap, None);
    }

    #[test]
    fn test_drag_over_empty_trailing_cell_is_no_swap() {
        // 3 panels in a 1x3 grid leave no empties; use 5 panels (2x3 grid,
        // slot 5 vacant).
        let (mut panels, grid) = grid_panels(5);
        assert_eq!(grid, GridDims { rows: 2, columns: 3 });
        let mut ctl = DragController::new();
        ctl.begin(PanelId(0));

        // Bottom-right cell (row 1, col 2) is unoccupied.
        let swap = ctl.pointer_moved(
            &mut panels,
            grid,
            Size::new(900.0, 600.0),
            Point::new(899.0, 599.0),
        );
        assert_eq!(swap, None);
    }

    #[test]
    fn test_no_swap_without_active_drag() {
        let (mut panels, grid) = grid_panels(4);
        let ctl = DragController::new();
        let swap = ctl.pointer_moved(
            &mut panels,
            grid,
            Size::new(900.0, 600.0),
            Point::new(700.0, 450.0),
        );
        assert_eq!(swap, None);
    }

    #[test]
    fn test_finish_clears_state() {
        let mut ctl = DragController::new();
        ctl.begin(PanelId(7));
        assert!(ctl.is_dragging());
        assert_eq!(ctl.finish(), Some(PanelId(7)));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.finish(), None);
    }
}
