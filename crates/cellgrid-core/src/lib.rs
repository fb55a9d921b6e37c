//! Core types for the cellgrid layout engine.
//!
//! This crate provides the value types shared by the layout passes:
//! - Pixel geometry (`Dimension`, `Insets`, `Rectangle`)
//! - Per-widget grid constraints (`GridData`) and resolved cells (`CellRect`)
//! - Container configuration (`LayoutConfig`)
//! - Error types
//!
//! Enable the `serde` feature to (de)serialize all of them.

pub mod config;
pub mod errors;
pub mod grid_data;
pub mod types;

pub use config::*;
pub use errors::*;
pub use grid_data::*;
pub use types::*;
