//! JSON layout fixtures.
//!
//! A fixture lists widgets with their grid data and measured preferred
//! sizes, a container, and the rectangles the engine is expected to produce:
//!
//! ```json
//! {
//!   "name": "label and field",
//!   "config": { "hgap": 5, "vgap": 5, "rowHeight": 30, "columnCount": 2 },
//!   "container": { "width": 500, "height": 23 },
//!   "widgets": [
//!     { "id": "a", "gridData": { "x": 0, "y": 0, "weightX": 0, "widthHint": 70 },
//!       "preferredSize": { "width": 50, "height": 20 } }
//!   ],
//!   "expected": { "widgets": { "a": { "x": 0, "y": 0, "width": 70, "height": 30 } } }
//! }
//! ```
//!
//! Every expectation is optional; only the ones present are checked.
//! A file may also hold a JSON array of fixtures, read with
//! [`Fixture::list_from_json`].

use std::convert::Infallible;

use cellgrid_core::{ConfigError, Dimension, GridData, Insets, LayoutConfig, Rectangle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::assign::GridWidget;
use crate::compute::compute_layout;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid layout config: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture '{fixture}': {what} expected {expected}, got {actual}")]
    Mismatch {
        fixture: String,
        what: String,
        expected: String,
        actual: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub config: LayoutConfig,
    pub container: Dimension,
    #[serde(default)]
    pub insets: Insets,
    #[serde(default)]
    pub inherited_column_count: Option<usize>,
    pub widgets: Vec<FixtureWidget>,
    #[serde(default)]
    pub expected: FixtureExpectation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureWidget {
    pub id: String,
    #[serde(default)]
    pub grid_data: GridData,
    #[serde(default)]
    pub preferred_size: Dimension,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixtureExpectation {
    pub column_count: Option<usize>,
    pub row_count: Option<usize>,
    /// Cell rectangles by row, then column
    pub rows: Option<Vec<Vec<Rectangle>>>,
    pub preferred_size: Option<Dimension>,
    pub widgets: Option<IndexMap<String, Rectangle>>,
}

/// What the engine produced for a fixture, in the fixture's own format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureOutcome {
    pub column_count: usize,
    pub row_count: usize,
    pub rows: Vec<Vec<Rectangle>>,
    pub preferred_size: Dimension,
    pub widgets: IndexMap<String, Rectangle>,
}

impl Fixture {
    /// Parse a fixture and validate its configuration.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        fixture.config.validate()?;
        Ok(fixture)
    }

    /// Parse a JSON array of fixtures, validating each configuration.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, FixtureError> {
        let fixtures: Vec<Fixture> = serde_json::from_str(json)?;
        for fixture in &fixtures {
            fixture.config.validate()?;
        }
        Ok(fixtures)
    }

    /// Lay out the fixture's widgets, measuring each with its recorded
    /// preferred size.
    pub fn run(&self) -> FixtureOutcome {
        let widgets: Vec<GridWidget<String>> = self
            .widgets
            .iter()
            .map(|w| GridWidget::new(w.id.clone(), w.grid_data.clone()))
            .collect();
        let sizes: IndexMap<&str, Dimension> = self
            .widgets
            .iter()
            .map(|w| (w.id.as_str(), w.preferred_size))
            .collect();
        let mut measure = |id: &String, _: &GridData| {
            Ok::<_, Infallible>(sizes.get(id.as_str()).copied().unwrap_or_default())
        };

        let result = match compute_layout(
            &widgets,
            &self.config,
            self.inherited_column_count,
            self.container,
            &self.insets,
            &mut measure,
        ) {
            Ok(result) => result,
            Err(never) => match never {},
        };

        FixtureOutcome {
            column_count: result.column_count,
            row_count: result.row_count,
            rows: result.cells.rows,
            preferred_size: result.preferred_size,
            widgets: result.widgets,
        }
    }

    /// Run the fixture and compare the outcome with its expectations,
    /// reporting the first difference.
    pub fn verify(&self) -> Result<FixtureOutcome, FixtureError> {
        let outcome = self.run();
        let expected = &self.expected;

        self.check("column count", expected.column_count, Some(outcome.column_count))?;
        self.check("row count", expected.row_count, Some(outcome.row_count))?;
        if let Some(rows) = &expected.rows {
            for (r, row) in rows.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    let actual = outcome.rows.get(r).and_then(|row| row.get(c));
                    self.check(&format!("cell ({r}, {c})"), Some(cell), actual)?;
                }
            }
            self.check("row count of cell bounds", Some(rows.len()), Some(outcome.rows.len()))?;
        }
        self.check("preferred size", expected.preferred_size, Some(outcome.preferred_size))?;
        if let Some(widgets) = &expected.widgets {
            for (id, bounds) in widgets {
                self.check(&format!("bounds of '{id}'"), Some(bounds), outcome.widgets.get(id))?;
            }
        }

        debug!(fixture = %self.name, "fixture verified");
        Ok(outcome)
    }

    fn check<T: PartialEq + std::fmt::Debug>(
        &self,
        what: &str,
        expected: Option<T>,
        actual: Option<T>,
    ) -> Result<(), FixtureError> {
        match expected {
            Some(expected) if actual.as_ref() != Some(&expected) => Err(FixtureError::Mismatch {
                fixture: self.name.clone(),
                what: what.to_string(),
                expected: format!("{expected:?}"),
                actual: match actual {
                    Some(actual) => format!("{actual:?}"),
                    None => "nothing".to_string(),
                },
            }),
            _ => Ok(()),
        }
    }
}
