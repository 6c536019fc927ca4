// LogDock - core/grid.rs
//
// Row/column derivation and grid-slot assignment.
//
// The grid aims for a near-square arrangement: rows = floor(sqrt(N)), then
// columns to fit, with optional caps. Max rows takes priority over max
// columns. Re-assignment is a stable sort of panels by their previous slot
// index so relative ordering survives a grid resize.

use crate::core::panel::Panel;

/// Grid dimensions. Always satisfies `rows * columns >= panel count` for the
/// count it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub rows: usize,
    pub columns: usize,
}

impl Default for GridDims {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
        }
    }
}

impl GridDims {
    /// Number of cells in the grid.
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

/// Compute the grid dimensions for `panel_count` panels.
///
/// `max_rows` / `max_columns` of 0 mean unbounded. Max rows takes priority
/// over max columns. Returns `None` for an empty host (no grid exists).
pub fn compute_grid(panel_count: usize, max_rows: usize, max_columns: usize) -> Option<GridDims> {
    if panel_count == 0 {
        return None;
    }

    let mut rows = (panel_count as f64).sqrt().floor() as usize;
    debug_assert!(rows >= 1);

    let columns;
    if max_rows > 0 {
        if rows > max_rows {
            rows = max_rows;
        }
        columns = panel_count.div_ceil(rows);
    } else if max_columns > 0 {
        let unconstrained = panel_count.div_ceil(rows);
        if unconstrained > max_columns {
            columns = max_columns;
            rows = panel_count.div_ceil(columns);
        } else {
            columns = unconstrained;
        }
    } else {
        columns = panel_count.div_ceil(rows);
    }

    Some(GridDims { rows, columns })
}

/// Return panel indices ordered by current slot index (row * columns + col).
///
/// `columns` must be the column count the slots were assigned under (the
/// *previous* grid), otherwise relative ordering is not preserved across a
/// resize. The sort is stable so panels sharing a defaulted slot keep their
/// insertion order.
pub fn ordered_by_slot(panels: &[Panel], columns: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..panels.len()).collect();
    order.sort_by_key(|&i| panels[i].slot_index(columns));
    order
}

/// Assign contiguous slots 0..N-1 to `panels` in `order` under `grid`.
///
/// Walks the grid row-major; the invariant `grid.cells() >= panels.len()`
/// guarantees every panel receives a slot.
pub fn assign_slots(panels: &mut [Panel], order: &[usize], grid: GridDims) {
    debug_assert!(grid.cells() >= order.len());
    for (slot, &panel_idx) in order.iter().enumerate() {
        panels[panel_idx].row = slot / grid.columns;
        panels[panel_idx].col = slot % grid.columns;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Margin;
    use crate::core::panel::PanelId;

    fn panels(n: usize) -> Vec<Panel> {
        (0..n)
            .map(|i| Panel::new(PanelId(i as u64), Margin::default()))
            .collect()
    }

    #[test]
    fn test_grid_is_none_for_empty_host() {
        assert_eq!(compute_grid(0, 0, 0), None);
        assert_eq!(compute_grid(0, 3, 3), None);
    }

    #[test]
    fn test_grid_unconstrained_near_square() {
        assert_eq!(compute_grid(1, 0, 0), Some(GridDims { rows: 1, columns: 1 }));
        assert_eq!(compute_grid(2, 0, 0), Some(GridDims { rows: 1, columns: 2 }));
        assert_eq!(compute_grid(3, 0, 0), Some(GridDims { rows: 1, columns: 3 }));
        assert_eq!(compute_grid(4, 0, 0), Some(GridDims { rows: 2, columns: 2 }));
        assert_eq!(compute_grid(5, 0, 0), Some(GridDims { rows: 2, columns: 3 }));
        assert_eq!(compute_grid(9, 0, 0), Some(GridDims { rows: 3, columns: 3 }));
        assert_eq!(compute_grid(10, 0, 0), Some(GridDims { rows: 3, columns: 4 }));
    }

    #[test]
    fn test_grid_max_rows_takes_priority() {
        // 9 panels capped at 2 rows: columns stretch to 5.
        assert_eq!(compute_grid(9, 2, 0), Some(GridDims { rows: 2, columns: 5 }));
        // Cap above the natural row count changes nothing.
        assert_eq!(compute_grid(9, 5, 0), Some(GridDims { rows: 3, columns: 3 }));
    }

    #[test]
    fn test_grid_max_columns_rebalances_rows() {
        // 5 panels: natural 2x3 exceeds 2 columns, so rows grow to 3.
        assert_eq!(compute_grid(5, 0, 2), Some(GridDims { rows: 3, columns: 2 }));
        // Cap that the natural shape already satisfies is a no-op.
        assert_eq!(compute_grid(4, 0, 2), Some(GridDims { rows: 2, columns: 2 }));
    }

    #[test]
    fn test_grid_always_fits_panel_count() {
        for n in 1..=40 {
            for max_rows in 0..=5 {
                for max_cols in 0..=5 {
                    if let Some(grid) = compute_grid(n, max_rows, max_cols) {
                        assert!(
                            grid.cells() >= n,
                            "{n} panels do not fit {}x{} (max_rows={max_rows}, max_cols={max_cols})",
                            grid.rows,
                            grid.columns
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_assign_slots_contiguous_and_unique() {
        let mut p = panels(5);
        let grid = compute_grid(5, 0, 0).unwrap();
        let order: Vec<usize> = (0..5).collect();
        assign_slots(&mut p, &order, grid);

        let mut indices: Vec<usize> = p.iter().map(|panel| panel.slot_index(grid.columns)).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reassignment_preserves_relative_order() {
        // Assign slots under a 2x3 grid, then shrink to 3x2; the panel that
        // was visually first must stay first.
        let mut p = panels(5);
        let grid_a = GridDims { rows: 2, columns: 3 };
        let order: Vec<usize> = (0..5).collect();
        assign_slots(&mut p, &order, grid_a);

        // Swap panels 0 and 3 as a drag would.
        let (r0, c0) = p[0].slot();
        let (r3, c3) = p[3].slot();
        p[0].row = r3;
        p[0].col = c3;
        p[3].row = r0;
        p[3].col = c0;

        let order = ordered_by_slot(&p, grid_a.columns);
        assert_eq!(order, vec![3, 1, 2, 0, 4]);

        let grid_b = GridDims { rows: 3, columns: 2 };
        assign_slots(&mut p, &order, grid_b);
        // Same relative order under the new column count.
        assert_eq!(ordered_by_slot(&p, grid_b.columns), vec![3, 1, 2, 0, 4]);
    }
}
