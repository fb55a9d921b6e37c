//! Row-major free-cell search for auto-placed widgets.

use std::collections::HashSet;

use cellgrid_core::CellRect;
use tracing::trace;

/// Walks an N-column grid in row-major order and hands out free top-left
/// cells.
///
/// The pointer only moves forward: cells skipped earlier are never
/// backfilled. Rows grow without bound, so a free cell is always found.
#[derive(Debug, Clone)]
pub struct GridPlacementCursor {
    column_count: usize,
    row_count: usize,
    x: usize,
    y: usize,
    occupied: HashSet<(usize, usize)>,
}

impl GridPlacementCursor {
    /// Create a cursor for `column_count` columns (at least 1).
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count: column_count.max(1),
            row_count: 0,
            x: 0,
            y: 0,
            occupied: HashSet::new(),
        }
    }

    /// Start over with a new column count and a known number of rows.
    pub fn reset(&mut self, column_count: usize, row_count: usize) {
        self.column_count = column_count.max(1);
        self.row_count = row_count;
        self.x = 0;
        self.y = 0;
        self.occupied.clear();
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of rows touched so far.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Current pointer position as `(x, y)`.
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.occupied.contains(&(x, y))
    }

    fn is_free(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        x + w <= self.column_count
            && (y..y + h).all(|j| (x..x + w).all(|i| !self.is_occupied(i, j)))
    }

    /// Advance to the next top-left cell where a `w × h` rectangle fits.
    ///
    /// `w` is clamped to the column count. A rectangle that would cross the
    /// right border moves the pointer to the start of the next row.
    pub fn next_free(&mut self, w: usize, h: usize) -> (usize, usize) {
        let w = w.clamp(1, self.column_count);
        let h = h.max(1);
        loop {
            if self.x + w > self.column_count {
                self.x = 0;
                self.y += 1;
                continue;
            }
            if self.is_free(self.x, self.y, w, h) {
                return (self.x, self.y);
            }
            self.x += 1;
        }
    }

    /// Mark every cell of the rectangle as occupied.
    pub fn occupy(&mut self, cell: CellRect) {
        self.occupied.extend(cell.cells());
        self.row_count = self.row_count.max(cell.bottom());
    }

    /// Find a free rectangle, occupy it and move the pointer past it.
    pub fn place(&mut self, w: usize, h: usize) -> CellRect {
        let w = w.clamp(1, self.column_count);
        let h = h.max(1);
        let (x, y) = self.next_free(w, h);
        let cell = CellRect::new(x, y, w, h);
        self.occupy(cell);
        self.x = x + w;
        trace!(x, y, w, h, "placed cell");
        cell
    }
}
