// LogDock - core/layout.rs
//
// Target-rectangle computation for the panel host.
//
// Two modes:
//   - Restored: panels tile the host as equal grid cells, shrunk by their
//     margins.
//   - Maximized: one panel takes the host minus a band reserved along the
//     docking edge; the remaining panels share the band's long axis equally,
//     placed in slot order.
//
// This is a pure function: no animation, no mutation. The host decides how
// the computed targets are applied (animated or snapped).

use crate::core::geometry::{Rect, Size};
use crate::core::grid::GridDims;
use crate::core::panel::{Panel, PanelId};
use serde::{Deserialize, Serialize};

/// The host-relative side where minimized siblings collect while another
/// panel is maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockEdge {
    Top,
    Bottom,
    Left,
    Right,
    /// Siblings collapse to zero size at the host's center point.
    None,
}

impl DockEdge {
    pub const ALL: [DockEdge; 5] = [
        DockEdge::Top,
        DockEdge::Bottom,
        DockEdge::Left,
        DockEdge::Right,
        DockEdge::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DockEdge::Top => "Top",
            DockEdge::Bottom => "Bottom",
            DockEdge::Left => "Left",
            DockEdge::Right => "Right",
            DockEdge::None => "None",
        }
    }
}

impl std::str::FromStr for DockEdge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(DockEdge::Top),
            "bottom" => Ok(DockEdge::Bottom),
            "left" => Ok(DockEdge::Left),
            "right" => Ok(DockEdge::Right),
            "none" => Ok(DockEdge::None),
            other => Err(format!(
                "unrecognised dock edge '{other}' (expected top, bottom, left, right, or none)"
            )),
        }
    }
}

/// Compute the target rect for every panel.
///
/// Returns an empty vec when `bounds` is not a valid measurement; layout is
/// deferred until the host reports a real size.
pub fn compute_targets(
    panels: &[Panel],
    grid: GridDims,
    bounds: Size,
    maximized: Option<PanelId>,
    edge: DockEdge,
    band: f64,
) -> Vec<(PanelId, Rect)> {
    if !bounds.is_valid() || panels.is_empty() {
        return Vec::new();
    }

    match maximized {
        None => restored_targets(panels, grid, bounds),
        Some(max_id) => maximized_targets(panels, grid, bounds, max_id, edge, band),
    }
}

/// Equal grid cells, shrunk by each panel's margin.
fn restored_targets(panels: &[Panel], grid: GridDims, bounds: Size) -> Vec<(PanelId, Rect)> {
    let cell_width = bounds.width / grid.columns as f64;
    let cell_height = bounds.height / grid.rows as f64;

    panels
        .iter()
        .map(|panel| {
            let (row, col) = panel.slot();
            let rect = Rect::clamped(
                col as f64 * cell_width,
                row as f64 * cell_height,
                cell_width - panel.margin.horizontal(),
                cell_height - panel.margin.vertical(),
            );
            (panel.id, rect)
        })
        .collect()
}

/// Maximized panel plus a band of minimized siblings along `edge`.
fn maximized_targets(
    panels: &[Panel],
    grid: GridDims,
    bounds: Size,
    max_id: PanelId,
    edge: DockEdge,
    band: f64,
) -> Vec<(PanelId, Rect)> {
    let sibling_count = panels.len().saturating_sub(1);

    // Siblings are placed along the band in slot order.
    let mut ordered: Vec<&Panel> = panels.iter().collect();
    ordered.sort_by_key(|p| p.slot_index(grid.columns));

    // Each sibling's share of the band's long axis.
    let share = if sibling_count > 0 {
        match edge {
            DockEdge::Left | DockEdge::Right => bounds.height / sibling_count as f64,
            DockEdge::Top | DockEdge::Bottom | DockEdge::None => {
                bounds.width / sibling_count as f64
            }
        }
    } else {
        0.0
    };

    let mut targets = Vec::with_capacity(panels.len());
    let mut offset = 0.0;

    for panel in ordered {
        if panel.id == max_id {
            targets.push((panel.id, maximized_rect(panel, bounds, edge, band, sibling_count)));
        } else {
            targets.push((panel.id, sibling_rect(panel, bounds, edge, band, share, offset)));
            offset += share;
        }
    }

    targets
}

/// The maximized panel's rect: full host minus the band.
///
/// With no siblings there is nothing to dock, so no band is reserved and the
/// lone panel receives the full host minus its margins.
fn maximized_rect(
    panel: &Panel,
    bounds: Size,
    edge: DockEdge,
    band: f64,
    sibling_count: usize,
) -> Rect {
    let mh = panel.margin.horizontal();
    let mv = panel.margin.vertical();

    if sibling_count == 0 {
        return Rect::clamped(0.0, 0.0, bounds.width - mh, bounds.height - mv);
    }

    match edge {
        DockEdge::Right => Rect::clamped(0.0, 0.0, bounds.width - band - mh, bounds.height - mv),
        DockEdge::Left => Rect::clamped(band, 0.0, bounds.width - band - mh, bounds.height - mv),
        DockEdge::Bottom => Rect::clamped(0.0, 0.0, bounds.width - mh, bounds.height - band - mv),
        DockEdge::Top => Rect::clamped(0.0, band, bounds.width - mh, bounds.height - band - mv),
        DockEdge::None => Rect::clamped(0.0, 0.0, bounds.width - mh, bounds.height - mv),
    }
}

/// A minimized sibling's rect at `offset` along the band.
fn sibling_rect(
    panel: &Panel,
    bounds: Size,
    edge: DockEdge,
    band: f64,
    share: f64,
    offset: f64,
) -> Rect {
    let mh = panel.margin.horizontal();
    let mv = panel.margin.vertical();

    match edge {
        DockEdge::Right => Rect::clamped(bounds.width - band, offset, band - mh, share - mv),
        DockEdge::Left => Rect::clamped(0.0, offset, band - mh, share - mv),
        DockEdge::Bottom => Rect::clamped(offset, bounds.height - band, share - mh, band - mv),
        DockEdge::Top => Rect::clamped(offset, 0.0, share - mh, band - mv),
        DockEdge::None => Rect::clamped(bounds.width / 2.0, bounds.height / 2.0, 0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Margin;
    use crate::core::grid::{assign_slots, compute_grid};

    fn make_panels(n: usize, margin: Margin) -> Vec<Panel> {
        let mut panels: Vec<Panel> = (0..n)
            .map(|i| Panel::new(PanelId(i as u64), margin))
            .collect();
        let grid = compute_grid(n, 0, 0).unwrap();
        let order: Vec<usize> = (0..n).collect();
        assign_slots(&mut panels, &order, grid);
        panels
    }

    #[test]
    fn test_invalid_bounds_defers_layout() {
        let panels = make_panels(4, Margin::default());
        let grid = compute_grid(4, 0, 0).unwrap();
        for bounds in [
            Size::new(0.0, 600.0),
            Size::new(f64::NAN, 600.0),
            Size::new(f64::INFINITY, 600.0),
        ] {
            let targets =
                compute_targets(&panels, grid, bounds, None, DockEdge::Right, 250.0);
            assert!(targets.is_empty(), "layout must defer for {bounds:?}");
        }
    }

    #[test]
    fn test_four_panels_tile_900_by_600() {
        let panels = make_panels(4, Margin::default());
        let grid = compute_grid(4, 0, 0).unwrap();
        let targets = compute_targets(
            &panels,
            grid,
            Size::new(900.0, 600.0),
            None,
            DockEdge::Right,
            250.0,
        );

        let expected = [
            Rect::new(0.0, 0.0, 450.0, 300.0),
            Rect::new(450.0, 0.0, 450.0, 300.0),
            Rect::new(0.0, 300.0, 450.0, 300.0),
            Rect::new(450.0, 300.0, 450.0, 300.0),
        ];
        for (i, (id, rect)) in targets.iter().enumerate() {
            assert_eq!(*id, PanelId(i as u64));
            assert_eq!(*rect, expected[i]);
        }
    }

    #[test]
    fn test_margins_shrink_cells_and_clamp_at_zero() {
        let panels = make_panels(4, Margin::uniform(5.0));
        let grid = compute_grid(4, 0, 0).unwrap();
        let targets = compute_targets(
            &panels,
            grid,
            Size::new(900.0, 600.0),
            None,
            DockEdge::Right,
            250.0,
        );
        assert_eq!(targets[0].1, Rect::new(0.0, 0.0, 440.0, 290.0));

        // Margins wider than the cell clamp to zero size.
        let tiny = make_panels(4, Margin::uniform(400.0));
        let targets = compute_targets(
            &tiny,
            grid,
            Size::new(900.0, 600.0),
            None,
            DockEdge::Right,
            250.0,
        );
        assert_eq!(targets[0].1.width, 100.0);
        assert_eq!(targets[0].1.height, 0.0);
    }

    #[test]
    fn test_maximized_right_band_scenario() {
        // Maximize slot 2 of 4 with a right band of 250 in a 900x600 host.
        let panels = make_panels(4, Margin::default());
        let grid = compute_grid(4, 0, 0).unwrap();
        let targets = compute_targets(
            &panels,
            grid,
            Size::new(900.0, 600.0),
            Some(PanelId(2)),
            DockEdge::Right,
            250.0,
        );

        let by_id = |id: u64| targets.iter().find(|(p, _)| *p == PanelId(id)).unwrap().1;

        assert_eq!(by_id(2), Rect::new(0.0, 0.0, 650.0, 600.0));
        assert_eq!(by_id(0), Rect::new(650.0, 0.0, 250.0, 200.0));
        assert_eq!(by_id(1), Rect::new(650.0, 200.0, 250.0, 200.0));
        assert_eq!(by_id(3), Rect::new(650.0, 400.0, 250.0, 200.0));
    }

    #[test]
    fn test_maximized_bottom_band_runs_horizontally() {
        let panels = make_panels(3, Margin::default());
        let grid = compute_grid(3, 0, 0).unwrap();
        let targets = compute_targets(
            &panels,
            grid,
            Size::new(900.0, 600.0),
            Some(PanelId(0)),
            DockEdge::Bottom,
            75.0,
        );

        let by_id = |id: u64| targets.iter().find(|(p, _)| *p == PanelId(id)).unwrap().1;

        assert_eq!(by_id(0), Rect::new(0.0, 0.0, 900.0, 525.0));
        assert_eq!(by_id(1), Rect::new(0.0, 525.0, 450.0, 75.0));
        assert_eq!(by_id(2), Rect::new(450.0, 525.0, 450.0, 75.0));
    }

    #[test]
    fn test_maximized_none_collapses_siblings_to_center() {
        let panels = make_panels(3, Margin::default());
        let grid = compute_grid(3, 0, 0).unwrap();
        let targets = compute_targets(
            &panels,
            grid,
            Size::new(900.0, 600.0),
            Some(PanelId(1)),
            DockEdge::None,
            250.0,
        );

        let by_id = |id: u64| targets.iter().find(|(p, _)| *p == PanelId(id)).unwrap().1;

        assert_eq!(by_id(1), Rect::new(0.0, 0.0, 900.0, 600.0));
        for sibling in [0u64, 2] {
            let rect = by_id(sibling);
            assert_eq!(rect, Rect::new(450.0, 300.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_single_maximized_panel_gets_full_host() {
        // One panel, maximized: no siblings, no band, no division by zero.
        let panels = make_panels(1, Margin::default());
        let grid = compute_grid(1, 0, 0).unwrap();
        let targets = compute_targets(
            &panels,
            grid,
            Size::new(900.0, 600.0),
            Some(PanelId(0)),
            DockEdge::Right,
            250.0,
        );
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].1, Rect::new(0.0, 0.0, 900.0, 600.0));
    }

    #[test]
    fn test_restored_targets_tile_without_gaps_or_overlap() {
        // Zero-margin panels must sum to exactly the host area.
        for n in [1usize, 2, 3, 4, 5, 6, 7, 9, 12] {
            let panels = make_panels(n, Margin::default());
            let grid = compute_grid(n, 0, 0).unwrap();
            let bounds = Size::new(960.0, 540.0);
            let targets = compute_targets(&panels, grid, bounds, None, DockEdge::Right, 250.0);

            let cell_area = (bounds.width / grid.columns as f64)
                * (bounds.height / grid.rows as f64);
            for (_, rect) in &targets {
                assert!((rect.width * rect.height - cell_area).abs() < 1e-6);
                assert!(rect.x >= 0.0 && rect.right() <= bounds.width + 1e-6);
                assert!(rect.y >= 0.0 && rect.bottom() <= bounds.height + 1e-6);
            }

            // No two panels share an origin.
            for i in 0..targets.len() {
                for j in (i + 1)..targets.len() {
                    assert!(
                        targets[i].1.x != targets[j].1.x || targets[i].1.y != targets[j].1.y,
                        "panels {i} and {j} overlap at the same origin"
                    );
                }
            }
        }
    }
}
