//! Container-level cache of the last assignment and track sizing.

use std::hash::Hash;

use cellgrid_core::{Dimension, Insets, LayoutConfig};
use tracing::debug;

use crate::assign::{GridAssigner, GridAssignment, GridWidget};
use crate::info::{LayoutInfo, LayoutResult};
use crate::measure::Measure;

/// Grid layout of one container.
///
/// Cell assignment and measurement run in [`validate`](Self::validate) and
/// are reused by every following [`layout`](Self::layout) until the layout
/// is invalidated. Callers invalidate whenever a widget, its grid data or
/// its preferred size changes.
#[derive(Debug, Clone)]
pub struct GridLayout<K> {
    config: LayoutConfig,
    assignment: Option<GridAssignment<K>>,
    info: Option<LayoutInfo<K>>,
}

impl<K> GridLayout<K> {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            assignment: None,
            info: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration; the cached layout is dropped.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.assignment = None;
        self.info = None;
    }

    pub fn is_valid(&self) -> bool {
        self.info.is_some()
    }

    pub fn assignment(&self) -> Option<&GridAssignment<K>> {
        self.assignment.as_ref()
    }

    pub fn info(&self) -> Option<&LayoutInfo<K>> {
        self.info.as_ref()
    }

    /// Preferred container size of the cached layout.
    pub fn preferred_size(&self, insets: &Insets) -> Option<Dimension> {
        self.info.as_ref().map(|info| info.preferred_size(insets))
    }
}

impl<K: Clone> GridLayout<K> {
    /// Assign cells and measure widgets unless the cache is still valid.
    ///
    /// On a measurement error the layout stays invalid.
    pub fn validate<M>(
        &mut self,
        widgets: &[GridWidget<K>],
        inherited_column_count: Option<usize>,
        measure: &mut M,
    ) -> Result<(), M::Error>
    where
        M: Measure<K> + ?Sized,
    {
        if self.is_valid() {
            return Ok(());
        }

        let assignment = GridAssigner::new(&self.config)
            .with_inherited_column_count(inherited_column_count)
            .assign(widgets);
        let info = LayoutInfo::new(&assignment, &self.config, measure)?;
        debug!(
            columns = info.column_count(),
            rows = info.row_count(),
            "rebuilt grid layout"
        );
        self.assignment = Some(assignment);
        self.info = Some(info);
        Ok(())
    }
}

impl<K: Clone + Eq + Hash> GridLayout<K> {
    /// Bounds for a container of the given size, `None` until validated.
    pub fn layout(&self, size: Dimension, insets: &Insets) -> Option<LayoutResult<K>> {
        self.info.as_ref().map(|info| info.layout(size, insets))
    }
}
