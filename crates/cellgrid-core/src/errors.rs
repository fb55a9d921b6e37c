//! Error types for the cellgrid engine.
//!
//! Layout itself is total: constraint overflow and degenerate container sizes
//! are clamped rather than reported. Errors only arise when a configuration
//! is validated up front.

use thiserror::Error;

/// Errors found while validating a [`LayoutConfig`](crate::LayoutConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Negative {axis} gap: {value}")]
    NegativeGap { axis: &'static str, value: i32 },

    #[error("Row height must be positive, got {value}")]
    InvalidRowHeight { value: i32 },

    #[error("{field} must be at least 1")]
    ZeroColumnCount { field: &'static str },

    #[error("{field} must not exceed {max}, got {value}")]
    TooManyColumns { field: &'static str, value: usize, max: usize },
}
