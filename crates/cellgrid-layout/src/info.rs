//! Pixel sizing of an assigned grid.

use std::hash::Hash;

use cellgrid_core::{CellRect, Dimension, Insets, LayoutConfig, Rectangle};
use indexmap::IndexMap;
use tracing::debug;

use crate::assign::GridAssignment;
use crate::axis::{Axis, TrackSizing};
use crate::measure::Measure;

/// Column and row sizing of one assignment.
///
/// Holds the minimum track sizes; [`layout_cell_bounds`](Self::layout_cell_bounds)
/// turns them into rectangles for a concrete container size. All methods
/// taking `&self` are pure.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInfo<K> {
    cells: Vec<(K, CellRect)>,
    columns: TrackSizing,
    rows: TrackSizing,
}

impl<K: Clone> LayoutInfo<K> {
    /// Measure every widget in the grid (once, in declaration order) and
    /// resolve the minimum column widths and row heights.
    pub fn new<M>(
        assignment: &GridAssignment<K>,
        config: &LayoutConfig,
        measure: &mut M,
    ) -> Result<Self, M::Error>
    where
        M: Measure<K> + ?Sized,
    {
        let mut cells = Vec::new();
        let mut column_items = Vec::new();
        let mut row_items = Vec::new();

        for widget in assignment.in_grid() {
            let gd = &widget.grid_data;
            let measured = measure.preferred_size(&widget.id, gd)?;
            column_items.push(Axis::Horizontal.track_item(gd, &widget.cell, measured, config));
            row_items.push(Axis::Vertical.track_item(gd, &widget.cell, measured, config));
            cells.push((widget.id.clone(), widget.cell));
        }

        let columns = TrackSizing::resolve(
            assignment.column_count,
            &column_items,
            Axis::Horizontal.gap(config),
        );
        let rows = TrackSizing::resolve(
            assignment.row_count,
            &row_items,
            Axis::Vertical.gap(config),
        );

        debug!(
            columns = ?columns.min_sizes,
            rows = ?rows.min_sizes,
            "computed minimum track sizes"
        );
        Ok(Self { cells, columns, rows })
    }
}

impl<K> LayoutInfo<K> {
    pub fn column_count(&self) -> usize {
        self.columns.count()
    }

    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    /// Widgets in the grid with their cells, in declaration order.
    pub fn cells(&self) -> &[(K, CellRect)] {
        &self.cells
    }

    /// Minimum width of every column.
    pub fn column_widths(&self) -> &[i32] {
        &self.columns.min_sizes
    }

    /// Minimum height of every row.
    pub fn row_heights(&self) -> &[i32] {
        &self.rows.min_sizes
    }

    pub fn column_weights(&self) -> &[f64] {
        &self.columns.weights
    }

    pub fn row_weights(&self) -> &[f64] {
        &self.rows.weights
    }

    /// Cell rectangles for a container of the given size.
    ///
    /// Gaps are not part of any cell. The container is never clipped: if it
    /// is smaller than the preferred size the cells extend past it.
    pub fn layout_cell_bounds(&self, size: Dimension, insets: &Insets) -> CellBounds {
        let widths = self.track_sizes(Axis::Horizontal, size, insets);
        let heights = self.track_sizes(Axis::Vertical, size, insets);
        CellBounds::new(widths, heights, insets, self.columns.gap, self.rows.gap)
    }

    fn track_sizes(&self, axis: Axis, size: Dimension, insets: &Insets) -> Vec<i32> {
        let tracks = match axis {
            Axis::Horizontal => &self.columns,
            Axis::Vertical => &self.rows,
        };
        tracks.layout(tracks.available(axis.extent(size), axis.insets(insets)))
    }

    /// Minimum container size fitting every widget, insets included.
    pub fn preferred_size(&self, insets: &Insets) -> Dimension {
        Dimension::new(self.columns.preferred_extent(), self.rows.preferred_extent())
            .add_insets(insets)
    }

    /// Preferred size for parents whose height depends on the width of their
    /// children: the width is the one laid out for `parent`, the height stays
    /// logical.
    pub fn preferred_size_within(&self, parent: Dimension, insets: &Insets) -> Dimension {
        let width = self
            .track_sizes(Axis::Horizontal, parent, insets)
            .iter()
            .fold(self.columns.total_gap(), |sum, w| sum.saturating_add(*w));
        Dimension::new(width, self.rows.preferred_extent()).add_insets(insets)
    }
}

impl<K: Clone + Eq + Hash> LayoutInfo<K> {
    /// Bounds of every widget in the grid: the union of its spanned cells.
    ///
    /// Keys keep the declaration order.
    pub fn widget_bounds(&self, cell_bounds: &CellBounds) -> IndexMap<K, Rectangle> {
        self.cells
            .iter()
            .filter_map(|(id, cell)| cell_bounds.span_bounds(cell).map(|r| (id.clone(), r)))
            .collect()
    }

    /// Full layout for a container of the given size.
    pub fn layout(&self, size: Dimension, insets: &Insets) -> LayoutResult<K> {
        let cells = self.layout_cell_bounds(size, insets);
        let widgets = self.widget_bounds(&cells);
        LayoutResult {
            column_count: self.column_count(),
            row_count: self.row_count(),
            preferred_size: self.preferred_size(insets),
            cells,
            widgets,
        }
    }
}

/// Pixel rectangles of all cells, indexable by row then column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellBounds {
    pub rows: Vec<Vec<Rectangle>>,
    pub column_widths: Vec<i32>,
    pub row_heights: Vec<i32>,
}

impl CellBounds {
    fn new(
        column_widths: Vec<i32>,
        row_heights: Vec<i32>,
        insets: &Insets,
        hgap: i32,
        vgap: i32,
    ) -> Self {
        let xs = positions(&column_widths, insets.left, hgap);
        let ys = positions(&row_heights, insets.top, vgap);
        let rows = ys
            .iter()
            .zip(&row_heights)
            .map(|(&y, &height)| {
                xs.iter()
                    .zip(&column_widths)
                    .map(|(&x, &width)| Rectangle::new(x, y, width, height))
                    .collect()
            })
            .collect();
        Self {
            rows,
            column_widths,
            row_heights,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Rectangle> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Smallest rectangle covering every cell of `cell`.
    pub fn span_bounds(&self, cell: &CellRect) -> Option<Rectangle> {
        let first = self.cell(cell.y, cell.x)?;
        let last = self.cell(
            cell.bottom().saturating_sub(1),
            cell.right().saturating_sub(1),
        )?;
        Some(first.union(&last))
    }
}

fn positions(sizes: &[i32], start: i32, gap: i32) -> Vec<i32> {
    let mut current = start;
    sizes
        .iter()
        .map(|size| {
            let position = current;
            current = current.saturating_add(*size).saturating_add(gap);
            position
        })
        .collect()
}

/// Everything a caller needs to apply one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult<K: Hash + Eq> {
    pub column_count: usize,
    pub row_count: usize,
    pub cells: CellBounds,
    /// Widget bounds in declaration order; widgets outside the grid are absent
    pub widgets: IndexMap<K, Rectangle>,
    pub preferred_size: Dimension,
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use cellgrid_core::GridData;

    use super::*;
    use crate::assign::{GridAssigner, GridWidget};

    fn info(
        widgets: &[GridWidget<&'static str>],
        config: &LayoutConfig,
        size: Dimension,
    ) -> LayoutInfo<&'static str> {
        let assignment = GridAssigner::new(config).assign(widgets);
        let mut measure = |_: &&str, _: &GridData| Ok::<_, Infallible>(size);
        LayoutInfo::new(&assignment, config, &mut measure).unwrap()
    }

    #[test]
    fn test_label_and_field() {
        let config = LayoutConfig::default().with_gap(5).with_row_height(30);
        let widgets = [
            GridWidget::new("a", GridData::at(0, 0).with_weight_x(0.0).with_width_hint(70)),
            GridWidget::new("b", GridData::at(1, 0).with_weight_x(1.0)),
        ];
        let info = info(&widgets, &config, Dimension::new(100, 20));
        let bounds = info.layout_cell_bounds(Dimension::new(500, 23), &Insets::ZERO);

        assert_eq!(bounds.rows.len(), 1);
        assert_eq!(
            bounds.rows[0],
            vec![Rectangle::new(0, 0, 70, 30), Rectangle::new(75, 0, 425, 30)]
        );
        assert_eq!(info.preferred_size(&Insets::ZERO), Dimension::new(175, 30));
    }

    #[test]
    fn test_insets_offset_cells() {
        let config = LayoutConfig::default().with_gap(4).with_row_height(20);
        let widgets = [
            GridWidget::new("a", GridData::auto().with_weight_x(1.0)),
            GridWidget::new("b", GridData::auto().with_weight_x(1.0)),
            GridWidget::new("c", GridData::auto().with_weight_x(1.0)),
        ];
        let info = info(&widgets, &config, Dimension::new(10, 10));
        let insets = Insets::new(3, 7, 5, 9);
        let bounds = info.layout_cell_bounds(Dimension::new(120, 100), &insets);

        // 120 - 16 - 4 = 100 wide, two columns of 50.
        assert_eq!(bounds.cell(0, 0), Some(Rectangle::new(7, 3, 50, 20)));
        assert_eq!(bounds.cell(0, 1), Some(Rectangle::new(61, 3, 50, 20)));
        // Rows are unweighted, so the last one takes the 48 leftover pixels.
        assert_eq!(bounds.cell(1, 0), Some(Rectangle::new(7, 27, 50, 68)));
        assert_eq!(
            info.preferred_size(&insets),
            Dimension::new(10 + 4 + 10 + 16, 20 + 4 + 20 + 8)
        );
    }

    #[test]
    fn test_spanning_widget_bounds_are_union_of_cells() {
        let config = LayoutConfig::default().with_gap(5).with_row_height(30);
        let widgets = [
            GridWidget::new("a", GridData::at(0, 0)),
            GridWidget::new("b", GridData::at(1, 0)),
            GridWidget::new("wide", GridData::at(0, 1).with_span(2, 2)),
        ];
        let info = info(&widgets, &config, Dimension::new(50, 10));
        let cells = info.layout_cell_bounds(Dimension::new(305, 200), &Insets::ZERO);
        let bounds = info.widget_bounds(&cells);

        assert_eq!(bounds["a"], Rectangle::new(0, 0, 150, 30));
        assert_eq!(bounds["b"], Rectangle::new(155, 0, 150, 30));
        assert_eq!(bounds["wide"].x, 0);
        assert_eq!(bounds["wide"].width, 305);
        assert_eq!(bounds["wide"].y, 35);
        assert_eq!(bounds["wide"].bottom(), 200);
        assert_eq!(bounds.keys().copied().collect::<Vec<_>>(), vec!["a", "b", "wide"]);
    }

    #[test]
    fn test_empty_grid() {
        let config = LayoutConfig::default().with_gap(5);
        let widgets = [GridWidget::new("hidden", GridData::auto().with_visible_in_layout(false))];
        let info = info(&widgets, &config, Dimension::new(50, 10));
        let insets = Insets::uniform(4);

        assert!(info.layout_cell_bounds(Dimension::new(300, 300), &insets).is_empty());
        assert_eq!(info.preferred_size(&insets), Dimension::new(8, 8));
        assert!(info.layout(Dimension::new(300, 300), &insets).widgets.is_empty());
    }

    #[test]
    fn test_negative_container_size_is_clamped() {
        let config = LayoutConfig::default().with_gap(5);
        let widgets = [
            GridWidget::new("a", GridData::auto()),
            GridWidget::new("b", GridData::auto()),
        ];
        let info = info(&widgets, &config, Dimension::new(40, 10));
        let bounds = info.layout_cell_bounds(Dimension::new(-100, -100), &Insets::ZERO);

        assert_eq!(bounds.column_widths, vec![40, 40]);
        assert_eq!(bounds.row_heights, vec![10]);
    }

    #[test]
    fn test_preferred_size_within_parent() {
        let config = LayoutConfig::default().with_gap(5).with_row_height(30);
        let widgets = [
            GridWidget::new("a", GridData::auto().with_weight_x(1.0)),
            GridWidget::new("b", GridData::auto().with_weight_x(1.0)),
        ];
        let info = info(&widgets, &config, Dimension::new(40, 10));

        assert_eq!(info.preferred_size(&Insets::ZERO), Dimension::new(85, 30));
        assert_eq!(
            info.preferred_size_within(Dimension::new(400, 10), &Insets::ZERO),
            Dimension::new(400, 30)
        );
    }

    #[test]
    fn test_max_width_bounds_hinted_cell() {
        let config = LayoutConfig::default().with_gap(5).with_row_height(30);
        let widgets = [GridWidget::new(
            "a",
            GridData::at(0, 0).with_weight_x(1.0).with_width_hint(100).with_max_width(80),
        )];
        let info = info(&widgets, &config, Dimension::new(50, 10));

        assert_eq!(info.column_widths(), &[80]);
        let bounds = info.layout(Dimension::new(500, 400), &Insets::ZERO);
        assert_eq!(bounds.widgets["a"], Rectangle::new(0, 0, 80, 30));
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let config = LayoutConfig::default().with_gap(i32::MAX).with_row_height(i32::MAX);
        let widgets = [
            GridWidget::new("a", GridData::auto().with_span(1, 3)),
            GridWidget::new("b", GridData::auto()),
        ];
        let info = info(&widgets, &config, Dimension::new(i32::MAX, i32::MAX));
        let insets = Insets::uniform(i32::MAX);
        let result = info.layout(Dimension::new(i32::MAX, i32::MAX), &insets);

        assert_eq!(result.preferred_size, Dimension::new(i32::MAX, i32::MAX));
        assert_eq!(result.widgets["b"].x, i32::MAX);
        assert_eq!(
            info.preferred_size_within(Dimension::new(i32::MAX, 0), &insets).width,
            i32::MAX
        );
    }

    #[test]
    fn test_measurement_error_propagates() {
        let config = LayoutConfig::default();
        let widgets = [
            GridWidget::new("ok", GridData::auto()),
            GridWidget::new("broken", GridData::auto()),
        ];
        let assignment = GridAssigner::new(&config).assign(&widgets);
        let mut calls = Vec::new();
        let mut measure = |id: &&'static str, _: &GridData| {
            calls.push(*id);
            if *id == "broken" {
                Err("no font")
            } else {
                Ok(Dimension::new(1, 1))
            }
        };

        let result = LayoutInfo::new(&assignment, &config, &mut measure);
        assert_eq!(result.unwrap_err(), "no font");
        assert_eq!(calls, vec!["ok", "broken"]);
    }
}
