// LogDock - core/host.rs
//
// The panel host orchestrator. Owns the panel collection, the grid
// assignment, the dock settings, and the maximized/dragging references, and
// drives grid assignment + layout computation whenever any of them change.
//
// Every mutating operation returns the list of layout commands the caller
// (the animation surface) must apply. The host never animates anything
// itself; it only decides targets and whether the move is eased or snapped.

use crate::core::drag::DragController;
use crate::core::geometry::{Margin, Point, Rect, Size};
use crate::core::grid::{self, GridDims};
use crate::core::layout::{self, DockEdge};
use crate::core::panel::{Panel, PanelEvent, PanelId, PanelState};
use crate::util::constants::{DEFAULT_BAND_THICKNESS, DEFAULT_PANEL_MARGIN};
use crate::util::error::HostError;

/// How a layout command is applied by the animation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Ease position and size toward the target over the layout duration.
    Animated,
    /// Jump to the target immediately (drag-finish snap, host resize).
    Immediate,
}

/// One panel's new target rectangle, produced by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCommand {
    pub panel: PanelId,
    pub target: Rect,
    pub transition: Transition,
}

/// A draggable, dockable, maximizable panel host.
#[derive(Debug)]
pub struct PanelHost {
    panels: Vec<Panel>,
    grid: GridDims,
    max_rows: usize,
    max_columns: usize,
    dock_edge: DockEdge,
    band_thickness: f64,
    bounds: Size,
    maximized: Option<PanelId>,
    drag: DragController,
    /// Monotonic z counter, host-owned so panels carry no shared statics.
    next_z: u32,
    next_id: u64,
    default_margin: Margin,
}

impl Default for PanelHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelHost {
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            grid: GridDims::default(),
            max_rows: 0,
            max_columns: 0,
            dock_edge: DockEdge::Right,
            band_thickness: DEFAULT_BAND_THICKNESS,
            bounds: Size::default(),
            maximized: None,
            drag: DragController::new(),
            next_z: 1,
            next_id: 0,
            default_margin: Margin::uniform(DEFAULT_PANEL_MARGIN),
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn maximized(&self) -> Option<PanelId> {
        self.maximized
    }

    pub fn dragging(&self) -> Option<PanelId> {
        self.drag.dragging()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn dock_edge(&self) -> DockEdge {
        self.dock_edge
    }

    pub fn band_thickness(&self) -> f64 {
        self.band_thickness
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    // -------------------------------------------------------------------
    // Structural operations
    // -------------------------------------------------------------------

    /// Add a panel, appended at the next free grid slot.
    ///
    /// Rejected while a drag is in progress. If a sibling is currently
    /// maximized the new panel joins the minimized band directly.
    pub fn add_panel(&mut self) -> Result<(PanelId, Vec<LayoutCommand>), HostError> {
        if self.drag.is_dragging() {
            return Err(HostError::DragInProgress);
        }

        // Order the existing panels before the newcomer exists so its
        // defaulted (0,0) slot cannot perturb the sort; it appends last.
        let mut order = grid::ordered_by_slot(&self.panels, self.grid.columns);

        let id = PanelId(self.next_id);
        self.next_id += 1;
        let mut panel = Panel::new(id, self.default_margin);
        panel.z = self.bump_z();

        if self.maximized.is_some() {
            let (state, _) = panel.state.transition(PanelState::Minimized);
            panel.state = state;
            panel.dragging_enabled = false;
        }

        order.push(self.panels.len());
        self.panels.push(panel);

        self.grid = grid::compute_grid(self.panels.len(), self.max_rows, self.max_columns)
            .unwrap_or_default();
        grid::assign_slots(&mut self.panels, &order, self.grid);

        tracing::debug!(
            panel = %id,
            rows = self.grid.rows,
            columns = self.grid.columns,
            "Panel added"
        );

        Ok((id, self.layout(Transition::Animated, None)))
    }

    /// Remove a panel and compact the grid.
    ///
    /// Rejected while a drag is in progress. Removing the maximized panel
    /// first forces the restore-all sequence so no dangling maximized
    /// reference survives.
    pub fn remove_panel(&mut self, id: PanelId) -> Result<Vec<LayoutCommand>, HostError> {
        if self.drag.is_dragging() {
            return Err(HostError::DragInProgress);
        }
        let idx = self
            .panels
            .iter()
            .position(|p| p.id == id)
            .ok_or(HostError::UnknownPanel { id })?;

        if self.maximized == Some(id) {
            self.restore_all();
        }

        self.panels.remove(idx);

        let order = grid::ordered_by_slot(&self.panels, self.grid.columns);
        self.grid = grid::compute_grid(self.panels.len(), self.max_rows, self.max_columns)
            .unwrap_or_default();
        grid::assign_slots(&mut self.panels, &order, self.grid);

        tracing::debug!(
            panel = %id,
            remaining = self.panels.len(),
            "Panel removed"
        );

        Ok(self.layout(Transition::Animated, None))
    }

    // -------------------------------------------------------------------
    // Dock settings
    // -------------------------------------------------------------------

    /// Cap the row count (0 = unbounded). Max rows takes priority over max
    /// columns.
    pub fn set_max_rows(&mut self, n: usize) -> Vec<LayoutCommand> {
        self.max_rows = n;
        self.reassign();
        self.layout(Transition::Animated, None)
    }

    /// Cap the column count (0 = unbounded).
    pub fn set_max_columns(&mut self, n: usize) -> Vec<LayoutCommand> {
        self.max_columns = n;
        self.reassign();
        self.layout(Transition::Animated, None)
    }

    pub fn set_dock_edge(&mut self, edge: DockEdge) -> Vec<LayoutCommand> {
        self.dock_edge = edge;
        self.layout(Transition::Animated, None)
    }

    pub fn set_band_thickness(&mut self, value: f64) -> Vec<LayoutCommand> {
        self.band_thickness = value.max(0.0);
        self.layout(Transition::Animated, None)
    }

    /// Record a new host measurement and snap everything into place.
    ///
    /// An invalid measurement keeps the previous bounds and defers layout.
    pub fn on_host_resized(&mut self, bounds: Size) -> Vec<LayoutCommand> {
        if !bounds.is_valid() {
            return Vec::new();
        }
        self.bounds = bounds;
        self.layout(Transition::Immediate, None)
    }

    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Maximize `id`: raises it to the front, minimizes every sibling, and
    /// disables dragging until restore.
    pub fn maximize(&mut self, id: PanelId) -> Result<Vec<LayoutCommand>, HostError> {
        let z = self.bump_z();
        let panel = self.panel_mut(id).ok_or(HostError::UnknownPanel { id })?;
        panel.z = z;

        let (state, event) = panel.state.transition(PanelState::Maximized);
        panel.state = state;
        if event != Some(PanelEvent::Maximized) {
            return Ok(Vec::new());
        }

        self.maximized = Some(id);
        for p in &mut self.panels {
            p.dragging_enabled = false;
            if p.id != id {
                let (state, _) = p.state.transition(PanelState::Minimized);
                p.state = state;
            }
        }

        tracing::debug!(panel = %id, edge = ?self.dock_edge, "Panel maximized");
        Ok(self.layout(Transition::Animated, None))
    }

    /// Restore `id`. Restoring the maximized panel returns every panel to
    /// the grid and re-enables dragging.
    pub fn restore(&mut self, id: PanelId) -> Result<Vec<LayoutCommand>, HostError> {
        let panel = self.panel_mut(id).ok_or(HostError::UnknownPanel { id })?;
        let (state, event) = panel.state.transition(PanelState::Restored);
        panel.state = state;
        if event != Some(PanelEvent::Restored) {
            return Ok(Vec::new());
        }

        if self.maximized.is_some() {
            self.restore_all();
            tracing::debug!(panel = %id, "Panel restored, grid layout resumed");
        }
        Ok(self.layout(Transition::Animated, None))
    }

    /// Minimize `id`. The host takes no further action; minimize is only
    /// meaningful as part of a maximize transition or for a caller that
    /// wants a panel tucked away.
    pub fn minimize(&mut self, id: PanelId) -> Result<Vec<LayoutCommand>, HostError> {
        let panel = self.panel_mut(id).ok_or(HostError::UnknownPanel { id })?;
        let (state, event) = panel.state.transition(PanelState::Minimized);
        panel.state = state;
        if event != Some(PanelEvent::Minimized) {
            return Ok(Vec::new());
        }
        Ok(self.layout(Transition::Animated, None))
    }

    /// Raise a panel to the front of the z-order (focus/click).
    pub fn bring_to_front(&mut self, id: PanelId) {
        let z = self.bump_z();
        if let Some(panel) = self.panel_mut(id) {
            panel.z = z;
        }
    }

    // -------------------------------------------------------------------
    // Dragging
    // -------------------------------------------------------------------

    /// Begin dragging `id`.
    pub fn start_drag(&mut self, id: PanelId) -> Result<(), HostError> {
        let z = self.bump_z();
        let panel = self.panel_mut(id).ok_or(HostError::UnknownPanel { id })?;
        if !panel.dragging_enabled {
            return Err(HostError::DragDisabled { id });
        }
        panel.z = z;
        self.drag.begin(id);
        Ok(())
    }

    /// Pointer moved while dragging. Returns animated commands for every
    /// panel except the dragged one when a slot swap occurred, otherwise
    /// nothing; the dragged panel itself follows the pointer directly.
    pub fn drag_moved(&mut self, pointer: Point) -> Vec<LayoutCommand> {
        let Some(dragged) = self.drag.dragging() else {
            return Vec::new();
        };
        match self
            .drag
            .pointer_moved(&mut self.panels, self.grid, self.bounds, pointer)
        {
            Some(swap) => {
                tracing::trace!(dragged = %swap.dragged, other = %swap.other, "Slot swap");
                self.layout(Transition::Animated, Some(dragged))
            }
            None => Vec::new(),
        }
    }

    /// Drop the dragged panel: snap every panel (including the dropped one)
    /// to its grid cell without animation.
    pub fn finish_drag(&mut self) -> Vec<LayoutCommand> {
        if self.drag.finish().is_none() {
            return Vec::new();
        }
        self.layout(Transition::Immediate, None)
    }

    // -------------------------------------------------------------------
    // Animation writeback
    // -------------------------------------------------------------------

    /// Record a panel's current rect (called by the animation surface per
    /// tick, and by the UI while a panel follows the pointer).
    pub fn set_panel_rect(&mut self, id: PanelId, rect: Rect) {
        if let Some(panel) = self.panel_mut(id) {
            panel.set_rect(rect);
        }
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn bump_z(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    /// Clear the maximized reference and return every panel to Restored
    /// with dragging enabled.
    fn restore_all(&mut self) {
        self.maximized = None;
        for p in &mut self.panels {
            let (state, _) = p.state.transition(PanelState::Restored);
            p.state = state;
            p.dragging_enabled = true;
        }
    }

    /// Recompute grid dimensions and re-assign slots, preserving order.
    fn reassign(&mut self) {
        let order = grid::ordered_by_slot(&self.panels, self.grid.columns);
        self.grid = grid::compute_grid(self.panels.len(), self.max_rows, self.max_columns)
            .unwrap_or_default();
        grid::assign_slots(&mut self.panels, &order, self.grid);
    }

    /// Run the layout calculator and emit commands, recording the target on
    /// each panel. `exclude` suppresses the command for the dragged panel.
    fn layout(&mut self, transition: Transition, exclude: Option<PanelId>) -> Vec<LayoutCommand> {
        let targets = layout::compute_targets(
            &self.panels,
            self.grid,
            self.bounds,
            self.maximized,
            self.dock_edge,
            self.band_thickness,
        );

        let mut commands = Vec::with_capacity(targets.len());
        for (id, target) in targets {
            if let Some(panel) = self.panel_mut(id) {
                panel.target = target;
            }
            if Some(id) == exclude {
                continue;
            }
            commands.push(LayoutCommand {
                panel: id,
                target,
                transition,
            });
        }
        commands
    }
}
