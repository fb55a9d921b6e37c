//! Track sizing shared by columns and rows.
//!
//! Columns and rows follow the same rules: single-span widgets set minimum
//! track sizes, spanning widgets widen their tracks only as far as needed, and
//! leftover container space is handed out by weight. [`Axis`] selects which
//! half of a widget's constraint feeds which direction.

use cellgrid_core::{CellRect, Dimension, GridData, Insets, LayoutConfig};
use tracing::trace;

/// Upper bound of every track, whether or not a widget caps it.
pub const MAX_TRACK_SIZE: i32 = 10_240;

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns (x, width)
    Horizontal,
    /// Rows (y, height)
    Vertical,
}

impl Axis {
    pub fn extent(self, size: Dimension) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Insets on both ends of this axis.
    pub fn insets(self, insets: &Insets) -> i32 {
        match self {
            Axis::Horizontal => insets.horizontal(),
            Axis::Vertical => insets.vertical(),
        }
    }

    pub fn gap(self, config: &LayoutConfig) -> i32 {
        match self {
            Axis::Horizontal => config.effective_hgap(),
            Axis::Vertical => config.effective_vgap(),
        }
    }

    pub fn start(self, cell: &CellRect) -> usize {
        match self {
            Axis::Horizontal => cell.x,
            Axis::Vertical => cell.y,
        }
    }

    pub fn span(self, cell: &CellRect) -> usize {
        match self {
            Axis::Horizontal => cell.w,
            Axis::Vertical => cell.h,
        }
    }

    pub fn weight(self, grid_data: &GridData) -> f64 {
        match self {
            Axis::Horizontal => grid_data.resolved_weight_x(),
            Axis::Vertical => grid_data.resolved_weight_y(),
        }
    }

    pub fn max_extent(self, grid_data: &GridData) -> Option<i32> {
        match self {
            Axis::Horizontal => grid_data.max_width,
            Axis::Vertical => grid_data.max_height,
        }
        .filter(|max| *max > 0)
    }

    /// Preferred extent of a widget along this axis, or `None` if the widget
    /// does not take part in sizing this axis.
    ///
    /// Hints win over everything. Widths come from the measurement unless the
    /// widget sizes itself. Heights use the configured logical row height
    /// unless the widget asks for its measured height.
    pub fn preferred(
        self,
        grid_data: &GridData,
        measured: Dimension,
        span: usize,
        config: &LayoutConfig,
    ) -> Option<i32> {
        match self {
            Axis::Horizontal => {
                if grid_data.use_ui_width {
                    return None;
                }
                Some(grid_data.effective_width_hint().unwrap_or(measured.width.max(0)))
            }
            Axis::Vertical => {
                if let Some(hint) = grid_data.effective_height_hint() {
                    return Some(hint);
                }
                match config.row_height.filter(|h| *h > 0) {
                    Some(row_height) if !grid_data.use_ui_height => {
                        let span = i32::try_from(span.max(1)).unwrap_or(i32::MAX);
                        let gaps = config.effective_vgap().saturating_mul(span - 1);
                        Some(row_height.saturating_mul(span).saturating_add(gaps))
                    }
                    _ => Some(measured.height.max(0)),
                }
            }
        }
    }

    /// Build the sizing input of one widget.
    pub fn track_item(
        self,
        grid_data: &GridData,
        cell: &CellRect,
        measured: Dimension,
        config: &LayoutConfig,
    ) -> TrackItem {
        let span = self.span(cell);
        TrackItem {
            start: self.start(cell),
            span,
            preferred: self.preferred(grid_data, measured, span, config),
            weight: self.weight(grid_data),
            max: self.max_extent(grid_data),
        }
    }
}

/// One widget's contribution to the tracks of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackItem {
    pub start: usize,
    pub span: usize,
    pub preferred: Option<i32>,
    pub weight: f64,
    pub max: Option<i32>,
}

/// Resolved minimum sizes, weights and caps of all tracks along one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackSizing {
    pub min_sizes: Vec<i32>,
    pub weights: Vec<f64>,
    /// Largest size of each track, at most [`MAX_TRACK_SIZE`]
    pub caps: Vec<i32>,
    pub gap: i32,
}

impl TrackSizing {
    /// Resolve `count` tracks from the widgets covering them.
    pub fn resolve(count: usize, items: &[TrackItem], gap: i32) -> Self {
        let mut sizing = Self {
            min_sizes: vec![0; count],
            weights: vec![0.0; count],
            caps: vec![MAX_TRACK_SIZE; count],
            gap: gap.max(0),
        };

        for item in items {
            let range = sizing.clip(item);
            for weight in &mut sizing.weights[range.clone()] {
                *weight = (*weight).max(item.weight);
            }
            if let Some(max) = item.max {
                sizing.merge_cap(range, max);
            }
        }

        for item in items.iter().filter(|i| i.span == 1) {
            let range = sizing.clip(item);
            let size = sizing.min_sizes.get_mut(range.start);
            if let (Some(preferred), Some(size)) = (item.preferred, size) {
                *size = (*size).max(preferred);
            }
        }

        for item in items.iter().filter(|i| i.span > 1) {
            let Some(preferred) = item.preferred else {
                continue;
            };
            let range = sizing.clip(item);
            if range.is_empty() {
                continue;
            }
            let covered = saturating_sum(&sizing.min_sizes[range.clone()])
                .saturating_add(gaps_between(sizing.gap, range.len()));
            let needed = preferred.saturating_sub(covered);
            if needed <= 0 {
                continue;
            }
            let weights = &sizing.weights[range.clone()];
            if weights.iter().any(|w| *w > 0.0) {
                let shares = proportional_shares(needed, weights);
                for (size, share) in sizing.min_sizes[range].iter_mut().zip(shares) {
                    *size = size.saturating_add(share);
                }
            } else if let Some(last) = sizing.min_sizes[range].last_mut() {
                *last = last.saturating_add(needed);
            }
        }

        // A cap bounds the minimum too.
        for (size, cap) in sizing.min_sizes.iter_mut().zip(&sizing.caps) {
            *size = (*size).min(*cap);
        }

        trace!(
            min_sizes = ?sizing.min_sizes,
            weights = ?sizing.weights,
            caps = ?sizing.caps,
            "resolved tracks"
        );
        sizing
    }

    /// Lower the caps of the tracks in `range` so that together, gaps
    /// included, they do not exceed `max`. Each track is capped at an even
    /// share; the last one also receives the remainder.
    fn merge_cap(&mut self, range: std::ops::Range<usize>, max: i32) {
        let parts = range.len();
        if parts == 0 {
            return;
        }
        let parts_i = i32::try_from(parts).unwrap_or(i32::MAX);
        let total = max.saturating_sub(gaps_between(self.gap, parts)).max(0);
        let share = total / parts_i;
        let caps = &mut self.caps[range];
        for cap in caps.iter_mut() {
            *cap = (*cap).min(share);
        }
        if let Some(last) = caps.last_mut() {
            *last = last.saturating_add(total % parts_i);
        }
    }

    fn clip(&self, item: &TrackItem) -> std::ops::Range<usize> {
        let count = self.min_sizes.len();
        let start = item.start.min(count);
        let end = item.start.saturating_add(item.span.max(1)).min(count);
        start..end
    }

    pub fn count(&self) -> usize {
        self.min_sizes.len()
    }

    /// Sum of the gaps between tracks.
    pub fn total_gap(&self) -> i32 {
        gaps_between(self.gap, self.count())
    }

    /// Sum of the minimum track sizes.
    pub fn total_min(&self) -> i32 {
        saturating_sum(&self.min_sizes)
    }

    /// Space taken by all tracks at their minimum size, gaps included.
    pub fn preferred_extent(&self) -> i32 {
        self.total_min().saturating_add(self.total_gap())
    }

    /// Space left for the tracks in a container of the given extent.
    pub fn available(&self, extent: i32, insets: i32) -> i32 {
        extent
            .saturating_sub(insets)
            .saturating_sub(self.total_gap())
            .max(0)
    }

    /// Track sizes for `available` pixels.
    ///
    /// Tracks never shrink below their minimum nor grow past their cap.
    /// Extra space goes to the weighted tracks, or to the last track if none
    /// is weighted.
    pub fn layout(&self, available: i32) -> Vec<i32> {
        let mut sizes = self.min_sizes.clone();
        let leftover = available.saturating_sub(self.total_min());
        if leftover <= 0 || sizes.is_empty() {
            return sizes;
        }

        if self.weights.iter().any(|w| *w > 0.0) {
            let rest = grow_weighted(&mut sizes, &self.weights, &self.caps, leftover);
            if rest > 0 {
                trace!(rest, "all weighted tracks reached their cap");
            }
        } else if let (Some(last), Some(cap)) = (sizes.last_mut(), self.caps.last()) {
            *last += leftover.min(room(*last, *cap));
        }
        sizes
    }
}

fn room(size: i32, cap: i32) -> i32 {
    cap.saturating_sub(size).max(0)
}

fn saturating_sum(sizes: &[i32]) -> i32 {
    sizes.iter().fold(0i32, |sum, size| sum.saturating_add(*size))
}

/// Total gap between `count` adjacent tracks.
fn gaps_between(gap: i32, count: usize) -> i32 {
    let between = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
    gap.saturating_mul(between)
}

/// Split `amount` over the tracks in proportion to their weights.
///
/// Each weighted track gets `floor(amount * weight / total)`; the pixels left
/// over are then handed out one at a time to weighted tracks in ascending
/// index order. Tracks with a non-positive weight get nothing. If no track is
/// weighted every share is 0.
pub fn proportional_shares(amount: i32, weights: &[f64]) -> Vec<i32> {
    let mut shares = vec![0; weights.len()];
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if amount <= 0 || total <= 0.0 {
        return shares;
    }

    let mut assigned = 0;
    for (share, weight) in shares.iter_mut().zip(weights) {
        if *weight > 0.0 {
            let exact = (f64::from(amount) * weight / total).floor() as i32;
            *share = exact.clamp(0, amount - assigned);
            assigned += *share;
        }
    }

    let weighted: Vec<usize> = (0..weights.len()).filter(|i| weights[*i] > 0.0).collect();
    let mut remainder = amount - assigned;
    for i in weighted.iter().cycle() {
        if remainder == 0 {
            break;
        }
        shares[*i] += 1;
        remainder -= 1;
    }
    shares
}

/// Distribute `amount` by weight without growing a track past its cap.
/// Overflow from capped tracks is redistributed among the others. Returns
/// the pixels that could not be placed.
fn grow_weighted(sizes: &mut [i32], weights: &[f64], caps: &[i32], mut amount: i32) -> i32 {
    while amount > 0 {
        let eligible: Vec<f64> = weights
            .iter()
            .zip(sizes.iter().zip(caps))
            .map(|(w, (size, cap))| if *w > 0.0 && room(*size, *cap) > 0 { *w } else { 0.0 })
            .collect();
        if eligible.iter().all(|w| *w <= 0.0) {
            break;
        }

        let shares = proportional_shares(amount, &eligible);
        let mut overflow = 0;
        for ((size, cap), share) in sizes.iter_mut().zip(caps).zip(shares) {
            let granted = share.min(room(*size, *cap));
            *size += granted;
            overflow += share - granted;
        }
        amount = overflow;
    }
    amount
}
