//! Preferred-size measurement supplied by the caller.

use cellgrid_core::{Dimension, GridData};

/// Measures the preferred size of a widget.
///
/// The engine calls this once per widget in the grid and per pass. Errors
/// are returned to the caller of the layout pass unchanged.
pub trait Measure<K> {
    type Error;

    fn preferred_size(&mut self, id: &K, grid_data: &GridData) -> Result<Dimension, Self::Error>;
}

impl<K, E, F> Measure<K> for F
where
    F: FnMut(&K, &GridData) -> Result<Dimension, E>,
{
    type Error = E;

    fn preferred_size(&mut self, id: &K, grid_data: &GridData) -> Result<Dimension, E> {
        self(id, grid_data)
    }
}
