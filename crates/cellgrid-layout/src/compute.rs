use std::hash::Hash;

use cellgrid_core::{Dimension, Insets, LayoutConfig};

use crate::assign::{GridAssigner, GridWidget};
use crate::info::{LayoutInfo, LayoutResult};
use crate::measure::Measure;

/// Run cell assignment, track sizing and bounds computation in one go.
///
/// Nothing is cached; use [`GridLayout`](crate::GridLayout) to reuse the
/// assignment and measurements between passes.
pub fn compute_layout<K, M>(
    widgets: &[GridWidget<K>],
    config: &LayoutConfig,
    inherited_column_count: Option<usize>,
    size: Dimension,
    insets: &Insets,
    measure: &mut M,
) -> Result<LayoutResult<K>, M::Error>
where
    K: Clone + Eq + Hash,
    M: Measure<K> + ?Sized,
{
    let assignment = GridAssigner::new(config)
        .with_inherited_column_count(inherited_column_count)
        .assign(widgets);
    let info = LayoutInfo::new(&assignment, config, measure)?;
    Ok(info.layout(size, insets))
}
