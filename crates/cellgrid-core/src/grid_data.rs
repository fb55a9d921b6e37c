//! Per-widget grid constraints and resolved cell rectangles.

use crate::config::MAX_GRID_TRACKS;

/// Placement constraint of one widget for one layout pass.
///
/// A negative `x` or `y` means the widget is auto-placed. Spans below 1 are
/// treated as 1. Weights left at `None` are derived from the hints, see
/// [`GridData::resolved_weight_x`] and [`GridData::resolved_weight_y`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GridData {
    /// Column index, or [`GridData::UNSET`]
    pub x: i32,
    /// Row index, or [`GridData::UNSET`]
    pub y: i32,
    /// Number of columns spanned
    pub w: i32,
    /// Number of rows spanned
    pub h: i32,
    /// Share of horizontal leftover space
    pub weight_x: Option<f64>,
    /// Share of vertical leftover space
    pub weight_y: Option<f64>,
    /// Replaces the measured preferred width
    pub width_hint: Option<i32>,
    /// Replaces the measured (or logical) preferred height
    pub height_hint: Option<i32>,
    /// The widget sizes itself horizontally and does not take part in column sizing
    pub use_ui_width: bool,
    /// Use the measured height instead of the logical row height
    pub use_ui_height: bool,
    /// Widgets invisible in layout consume no cell
    pub visible_in_layout: bool,
    /// Widgets living outside the normal grid flow (e.g. process buttons)
    pub exclude_from_grid: bool,
    /// Upper bound for leftover growth of the spanned columns
    pub max_width: Option<i32>,
    /// Upper bound for leftover growth of the spanned rows
    pub max_height: Option<i32>,
}

impl Default for GridData {
    fn default() -> Self {
        Self {
            x: Self::UNSET,
            y: Self::UNSET,
            w: 1,
            h: 1,
            weight_x: None,
            weight_y: None,
            width_hint: None,
            height_hint: None,
            use_ui_width: false,
            use_ui_height: false,
            visible_in_layout: true,
            exclude_from_grid: false,
            max_width: None,
            max_height: None,
        }
    }
}

impl GridData {
    /// Sentinel for an unset cell coordinate.
    pub const UNSET: i32 = -1;

    /// Constraint for an auto-placed single cell.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Constraint for an explicit single cell.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Set the column and row span.
    pub fn with_span(mut self, w: i32, h: i32) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    pub fn with_weight_x(mut self, weight: f64) -> Self {
        self.weight_x = Some(weight);
        self
    }

    pub fn with_weight_y(mut self, weight: f64) -> Self {
        self.weight_y = Some(weight);
        self
    }

    pub fn with_width_hint(mut self, width: i32) -> Self {
        self.width_hint = Some(width);
        self
    }

    pub fn with_height_hint(mut self, height: i32) -> Self {
        self.height_hint = Some(height);
        self
    }

    pub fn with_use_ui_width(mut self, use_ui_width: bool) -> Self {
        self.use_ui_width = use_ui_width;
        self
    }

    pub fn with_use_ui_height(mut self, use_ui_height: bool) -> Self {
        self.use_ui_height = use_ui_height;
        self
    }

    pub fn with_visible_in_layout(mut self, visible: bool) -> Self {
        self.visible_in_layout = visible;
        self
    }

    pub fn with_exclude_from_grid(mut self, exclude: bool) -> Self {
        self.exclude_from_grid = exclude;
        self
    }

    pub fn with_max_width(mut self, max_width: i32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_max_height(mut self, max_height: i32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// True if both cell coordinates are set.
    pub fn is_positioned(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// True if the widget takes part in cell assignment and sizing.
    pub fn is_in_grid(&self) -> bool {
        self.visible_in_layout && !self.exclude_from_grid
    }

    /// Column span, between 1 and [`MAX_GRID_TRACKS`].
    pub fn span_w(&self) -> usize {
        clamp_span(self.w)
    }

    /// Row span, between 1 and [`MAX_GRID_TRACKS`].
    pub fn span_h(&self) -> usize {
        clamp_span(self.h)
    }

    /// Width hint, ignoring non-positive values.
    pub fn effective_width_hint(&self) -> Option<i32> {
        self.width_hint.filter(|w| *w > 0)
    }

    /// Height hint, ignoring non-positive values.
    pub fn effective_height_hint(&self) -> Option<i32> {
        self.height_hint.filter(|h| *h > 0)
    }

    /// Horizontal weight; when unset, widgets that size themselves or carry a
    /// width hint keep their width (0) and all others grow (1).
    pub fn resolved_weight_x(&self) -> f64 {
        match self.weight_x {
            Some(weight) => weight.max(0.0),
            None if self.use_ui_width || self.effective_width_hint().is_some() => 0.0,
            None => 1.0,
        }
    }

    /// Vertical weight; when unset, only multi-row widgets grow.
    pub fn resolved_weight_y(&self) -> f64 {
        match self.weight_y {
            Some(weight) => weight.max(0.0),
            None if self.span_h() > 1 => 1.0,
            None => 0.0,
        }
    }
}

fn clamp_span(span: i32) -> usize {
    usize::try_from(span).unwrap_or(0).clamp(1, MAX_GRID_TRACKS)
}

/// Resolved position of a widget in grid-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl CellRect {
    /// Value reported for widgets that reserve no cell.
    pub const DEGENERATE: CellRect = CellRect { x: 0, y: 0, w: 1, h: 1 };

    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// First column to the right of the rectangle.
    pub fn right(&self) -> usize {
        self.x + self.w
    }

    /// First row below the rectangle.
    pub fn bottom(&self) -> usize {
        self.y + self.h
    }

    /// Check whether both rectangles share at least one cell.
    pub fn overlaps(&self, other: &CellRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Iterate over every covered `(x, y)` cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}
