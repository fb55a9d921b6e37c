//! Layout configuration shared by all passes of one container.

use crate::errors::ConfigError;

/// Column count used when neither the container nor an ancestor declares one.
pub const DEFAULT_COLUMN_COUNT: usize = 2;

/// Largest number of columns, and largest span or static cell index, the
/// engine lays out. Larger values are clamped or rejected.
pub const MAX_GRID_TRACKS: usize = 4096;

/// Configuration of a grid container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct LayoutConfig {
    /// Horizontal gap between adjacent columns
    pub hgap: i32,
    /// Vertical gap between adjacent rows
    pub vgap: i32,
    /// Uniform logical row height; `None` sizes rows from measured heights
    pub row_height: Option<i32>,
    /// Column count declared on the container itself
    pub column_count: Option<usize>,
    /// Fallback when no column count is declared here or inherited
    pub default_column_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hgap: 0,
            vgap: 0,
            row_height: None,
            column_count: None,
            default_column_count: DEFAULT_COLUMN_COUNT,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both gaps.
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.hgap = gap;
        self.vgap = gap;
        self
    }

    pub fn with_hgap(mut self, hgap: i32) -> Self {
        self.hgap = hgap;
        self
    }

    pub fn with_vgap(mut self, vgap: i32) -> Self {
        self.vgap = vgap;
        self
    }

    pub fn with_row_height(mut self, row_height: i32) -> Self {
        self.row_height = Some(row_height);
        self
    }

    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = Some(column_count);
        self
    }

    pub fn with_default_column_count(mut self, column_count: usize) -> Self {
        self.default_column_count = column_count;
        self
    }

    /// Resolve the effective column count: declared, then inherited, then the
    /// fallback. Clamped to `1..=MAX_GRID_TRACKS`.
    pub fn resolve_column_count(&self, inherited: Option<usize>) -> usize {
        self.column_count
            .or(inherited)
            .unwrap_or(self.default_column_count)
            .clamp(1, MAX_GRID_TRACKS)
    }

    /// Horizontal gap, clamped to be non-negative.
    pub fn effective_hgap(&self) -> i32 {
        self.hgap.max(0)
    }

    /// Vertical gap, clamped to be non-negative.
    pub fn effective_vgap(&self) -> i32 {
        self.vgap.max(0)
    }

    /// Check the configuration for values the engine would silently clamp.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hgap < 0 {
            return Err(ConfigError::NegativeGap { axis: "horizontal", value: self.hgap });
        }
        if self.vgap < 0 {
            return Err(ConfigError::NegativeGap { axis: "vertical", value: self.vgap });
        }
        if let Some(value) = self.row_height.filter(|h| *h <= 0) {
            return Err(ConfigError::InvalidRowHeight { value });
        }
        if self.column_count == Some(0) {
            return Err(ConfigError::ZeroColumnCount { field: "columnCount" });
        }
        if self.default_column_count == 0 {
            return Err(ConfigError::ZeroColumnCount { field: "defaultColumnCount" });
        }
        for (field, value) in [
            ("columnCount", self.column_count.unwrap_or(0)),
            ("defaultColumnCount", self.default_column_count),
        ] {
            if value > MAX_GRID_TRACKS {
                return Err(ConfigError::TooManyColumns { field, value, max: MAX_GRID_TRACKS });
            }
        }
        Ok(())
    }
}
