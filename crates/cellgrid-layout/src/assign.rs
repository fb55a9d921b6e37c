//! Cell assignment: resolves every widget's grid data to a cell rectangle.

use cellgrid_core::{CellRect, GridData, LayoutConfig, MAX_GRID_TRACKS};
use tracing::{debug, warn};

use crate::cursor::GridPlacementCursor;

/// A widget as seen by the layout: an id chosen by the caller plus its
/// grid constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWidget<K> {
    pub id: K,
    pub grid_data: GridData,
}

impl<K> GridWidget<K> {
    pub fn new(id: K, grid_data: GridData) -> Self {
        Self { id, grid_data }
    }
}

/// How the cells of a pass were assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Every widget declared its own cell
    Static,
    /// Widgets were auto-placed in declaration order
    #[default]
    Dynamic,
}

/// One widget after assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedWidget<K> {
    pub id: K,
    pub grid_data: GridData,
    /// Resolved cell; [`CellRect::DEGENERATE`] for widgets outside the grid
    pub cell: CellRect,
    /// False for widgets invisible in layout or excluded from the grid
    pub in_grid: bool,
}

/// Result of one assignment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAssignment<K> {
    pub mode: PlacementMode,
    pub column_count: usize,
    pub row_count: usize,
    /// All widgets in declaration order
    pub widgets: Vec<AssignedWidget<K>>,
}

impl<K> GridAssignment<K> {
    /// Widgets that occupy cells, in declaration order.
    pub fn in_grid(&self) -> impl Iterator<Item = &AssignedWidget<K>> {
        self.widgets.iter().filter(|w| w.in_grid)
    }

    /// True if no widget occupies a cell.
    pub fn is_empty(&self) -> bool {
        self.column_count == 0 || self.row_count == 0
    }
}

impl<K: PartialEq> GridAssignment<K> {
    /// Look up the cell of a widget.
    pub fn cell_of(&self, id: &K) -> Option<CellRect> {
        self.widgets.iter().find(|w| &w.id == id).map(|w| w.cell)
    }
}

/// Decides between static and dynamic placement and produces the cells.
#[derive(Debug, Clone)]
pub struct GridAssigner<'a> {
    config: &'a LayoutConfig,
    inherited_column_count: Option<usize>,
}

impl<'a> GridAssigner<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            inherited_column_count: None,
        }
    }

    /// Column count declared by an ancestor container, used when the
    /// configuration does not declare one.
    pub fn with_inherited_column_count(mut self, column_count: Option<usize>) -> Self {
        self.inherited_column_count = column_count;
        self
    }

    /// Column count for dynamic placement.
    pub fn column_count(&self) -> usize {
        self.config.resolve_column_count(self.inherited_column_count)
    }

    /// Assign cells to all widgets.
    ///
    /// Static mode is used only if at least one widget in the grid declares a
    /// cell, none leaves it unset, and the declared cells do not overlap.
    /// Anything else is auto-placed.
    pub fn assign<K: Clone>(&self, widgets: &[GridWidget<K>]) -> GridAssignment<K> {
        let mut positioned = 0usize;
        let mut unpositioned = 0usize;
        for widget in widgets.iter().filter(|w| w.grid_data.is_in_grid()) {
            if widget.grid_data.is_positioned() {
                positioned += 1;
            } else {
                unpositioned += 1;
            }
        }

        let assignment = if positioned > 0 && unpositioned == 0 {
            self.assign_static(widgets)
                .unwrap_or_else(|| self.assign_dynamic(widgets))
        } else {
            self.assign_dynamic(widgets)
        };

        debug!(
            mode = ?assignment.mode,
            columns = assignment.column_count,
            rows = assignment.row_count,
            widgets = widgets.len(),
            "assigned grid cells"
        );
        assignment
    }

    fn assign_static<K: Clone>(&self, widgets: &[GridWidget<K>]) -> Option<GridAssignment<K>> {
        let max_w = self.config.column_count.or(self.inherited_column_count);
        let mut column_count = 0;
        let mut row_count = 0;
        let mut placed: Vec<CellRect> = Vec::new();
        let mut assigned = Vec::with_capacity(widgets.len());

        for widget in widgets {
            let gd = &widget.grid_data;
            if !gd.is_in_grid() {
                assigned.push(excluded(widget));
                continue;
            }
            let w = match max_w {
                Some(max) => gd.span_w().min(max.max(1)),
                None => gd.span_w(),
            };
            let cell = CellRect::new(gd.x as usize, gd.y as usize, w, gd.span_h());
            if cell.right() > MAX_GRID_TRACKS || cell.bottom() > MAX_GRID_TRACKS {
                warn!(?cell, "static grid cell out of range, falling back to auto-placement");
                return None;
            }
            if let Some(other) = placed.iter().find(|other| other.overlaps(&cell)) {
                warn!(?cell, ?other, "static grid cells overlap, falling back to auto-placement");
                return None;
            }
            placed.push(cell);
            column_count = column_count.max(cell.right());
            row_count = row_count.max(cell.bottom());
            assigned.push(AssignedWidget {
                id: widget.id.clone(),
                grid_data: gd.clone(),
                cell,
                in_grid: true,
            });
        }

        Some(GridAssignment {
            mode: PlacementMode::Static,
            column_count,
            row_count,
            widgets: assigned,
        })
    }

    fn assign_dynamic<K: Clone>(&self, widgets: &[GridWidget<K>]) -> GridAssignment<K> {
        let mut cursor = GridPlacementCursor::new(self.column_count());
        let mut assigned = Vec::with_capacity(widgets.len());
        let mut any_in_grid = false;

        for widget in widgets {
            let gd = &widget.grid_data;
            if !gd.is_in_grid() {
                assigned.push(excluded(widget));
                continue;
            }
            any_in_grid = true;
            let cell = cursor.place(gd.span_w(), gd.span_h());
            assigned.push(AssignedWidget {
                id: widget.id.clone(),
                grid_data: gd.clone(),
                cell,
                in_grid: true,
            });
        }

        let (column_count, row_count) = if any_in_grid {
            (cursor.column_count(), cursor.row_count())
        } else {
            (0, 0)
        };
        GridAssignment {
            mode: PlacementMode::Dynamic,
            column_count,
            row_count,
            widgets: assigned,
        }
    }
}

fn excluded<K: Clone>(widget: &GridWidget<K>) -> AssignedWidget<K> {
    AssignedWidget {
        id: widget.id.clone(),
        grid_data: widget.grid_data.clone(),
        cell: CellRect::DEGENERATE,
        in_grid: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets(data: Vec<GridData>) -> Vec<GridWidget<usize>> {
        data.into_iter()
            .enumerate()
            .map(|(i, gd)| GridWidget::new(i, gd))
            .collect()
    }

    #[test]
    fn test_static_mode_uses_hints() {
        let config = LayoutConfig::default();
        let input = widgets(vec![
            GridData::at(0, 0),
            GridData::at(1, 0),
            GridData::at(0, 1).with_span(2, 1),
        ]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.mode, PlacementMode::Static);
        assert_eq!(result.column_count, 2);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.cell_of(&2), Some(CellRect::new(0, 1, 2, 1)));
    }

    #[test]
    fn test_static_mode_clamps_span_to_declared_columns() {
        let config = LayoutConfig::default().with_column_count(2);
        let input = widgets(vec![GridData::at(0, 0).with_span(5, 1)]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.cell_of(&0), Some(CellRect::new(0, 0, 2, 1)));
        assert_eq!(result.column_count, 2);
    }

    #[test]
    fn test_static_mode_derives_column_count_without_declaration() {
        let config = LayoutConfig::default();
        let input = widgets(vec![GridData::at(2, 3).with_span(2, 1)]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.column_count, 4);
        assert_eq!(result.row_count, 4);
    }

    #[test]
    fn test_mixed_positions_are_dynamic() {
        let config = LayoutConfig::default();
        let input = widgets(vec![GridData::at(1, 1), GridData::auto(), GridData::auto()]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.mode, PlacementMode::Dynamic);
        // The explicit cell of the first widget is ignored.
        assert_eq!(result.cell_of(&0), Some(CellRect::new(0, 0, 1, 1)));
        assert_eq!(result.cell_of(&1), Some(CellRect::new(1, 0, 1, 1)));
        assert_eq!(result.cell_of(&2), Some(CellRect::new(0, 1, 1, 1)));
    }

    #[test]
    fn test_overlapping_static_cells_fall_back_to_dynamic() {
        let config = LayoutConfig::default();
        let input = widgets(vec![GridData::at(0, 0).with_span(2, 1), GridData::at(1, 0)]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.mode, PlacementMode::Dynamic);
        assert_eq!(result.cell_of(&0), Some(CellRect::new(0, 0, 2, 1)));
        assert_eq!(result.cell_of(&1), Some(CellRect::new(0, 1, 1, 1)));
    }

    #[test]
    fn test_out_of_range_static_cell_falls_back_to_dynamic() {
        let config = LayoutConfig::default();
        let input = widgets(vec![GridData::at(1_000_000_000, 0), GridData::at(0, 0)]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.mode, PlacementMode::Dynamic);
        assert_eq!(result.column_count, 2);
        assert_eq!(result.cell_of(&0), Some(CellRect::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_dynamic_mode_uses_inherited_column_count() {
        let config = LayoutConfig::default();
        let input = widgets(vec![GridData::auto(); 4]);
        let result = GridAssigner::new(&config)
            .with_inherited_column_count(Some(3))
            .assign(&input);

        assert_eq!(result.column_count, 3);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.cell_of(&3), Some(CellRect::new(0, 1, 1, 1)));
    }

    #[test]
    fn test_dynamic_mode_clamps_span() {
        let config = LayoutConfig::default().with_column_count(2);
        let input = widgets(vec![GridData::auto().with_span(4, 2)]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.cell_of(&0), Some(CellRect::new(0, 0, 2, 2)));
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn test_invisible_widgets_reserve_no_cell() {
        let config = LayoutConfig::default();
        let input = widgets(vec![
            GridData::auto(),
            GridData::auto().with_visible_in_layout(false),
            GridData::auto().with_exclude_from_grid(true),
            GridData::auto(),
        ]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.cell_of(&3), Some(CellRect::new(1, 0, 1, 1)));
        assert_eq!(result.cell_of(&1), Some(CellRect::DEGENERATE));
        assert!(!result.widgets[1].in_grid);
        assert!(!result.widgets[2].in_grid);
        assert_eq!(result.in_grid().count(), 2);
        assert_eq!(result.row_count, 1);
    }

    #[test]
    fn test_invisible_widgets_do_not_force_dynamic_mode() {
        let config = LayoutConfig::default();
        let input = widgets(vec![
            GridData::at(0, 0),
            GridData::auto().with_visible_in_layout(false),
        ]);
        let result = GridAssigner::new(&config).assign(&input);
        assert_eq!(result.mode, PlacementMode::Static);
    }

    #[test]
    fn test_no_visible_widgets() {
        let config = LayoutConfig::default();
        let input = widgets(vec![GridData::auto().with_visible_in_layout(false)]);
        let result = GridAssigner::new(&config).assign(&input);

        assert_eq!(result.column_count, 0);
        assert_eq!(result.row_count, 0);
        assert!(result.is_empty());
        assert_eq!(result.widgets.len(), 1);

        let result = GridAssigner::new(&config).assign::<usize>(&[]);
        assert!(result.is_empty());
    }
}
