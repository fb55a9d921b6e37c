//! Logical grid layout for cellgrid containers.
//!
//! This crate places widgets with declarative grid constraints into a cell
//! matrix and converts that matrix into pixel rectangles.
//!
//! # Architecture
//!
//! 1. **Cell assignment**: [`GridAssigner`] honors explicit cells (static
//!    mode) or auto-places widgets with a [`GridPlacementCursor`] (dynamic mode)
//! 2. **Track sizing**: [`LayoutInfo`] measures every widget once and resolves
//!    minimum column widths and row heights, spanning widgets included
//! 3. **Bounds**: leftover container space is distributed by weight and the
//!    cell and widget rectangles are computed
//!
//! [`GridLayout`] wraps the passes with an explicit cache; [`compute_layout`]
//! runs them all without keeping state.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use cellgrid_core::{Dimension, GridData, Insets, LayoutConfig};
//! use cellgrid_layout::{compute_layout, GridWidget};
//!
//! let widgets = vec![
//!     GridWidget::new("label", GridData::at(0, 0).with_weight_x(0.0).with_width_hint(70)),
//!     GridWidget::new("field", GridData::at(1, 0).with_weight_x(1.0)),
//! ];
//! let config = LayoutConfig::default().with_gap(5).with_row_height(30);
//! let mut measure = |_: &&str, _: &GridData| Ok::<_, Infallible>(Dimension::new(100, 20));
//!
//! let result = compute_layout(
//!     &widgets,
//!     &config,
//!     None,
//!     Dimension::new(500, 23),
//!     &Insets::ZERO,
//!     &mut measure,
//! )
//! .unwrap();
//!
//! assert_eq!(result.widgets["field"].x, 75);
//! assert_eq!(result.widgets["field"].width, 425);
//! ```

mod assign;
mod axis;
mod cache;
mod compute;
mod cursor;
pub mod fixture;
mod info;
mod measure;

pub use assign::{AssignedWidget, GridAssigner, GridAssignment, GridWidget, PlacementMode};
pub use axis::{proportional_shares, Axis, TrackItem, TrackSizing, MAX_TRACK_SIZE};
pub use cache::GridLayout;
pub use compute::compute_layout;
pub use cursor::GridPlacementCursor;
pub use fixture::{Fixture, FixtureError, FixtureOutcome};
pub use info::{CellBounds, LayoutInfo, LayoutResult};
pub use measure::Measure;
