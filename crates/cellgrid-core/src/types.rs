//! Pixel geometry value types.
//!
//! All coordinates are integer pixels. Widths and heights produced by the
//! engine are never negative; values supplied by callers may be, and are
//! clamped where they feed into sizing.

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const ZERO: Dimension = Dimension { width: 0, height: 0 };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow this dimension by the given insets on every side.
    pub fn add_insets(&self, insets: &Insets) -> Dimension {
        Dimension::new(
            self.width.saturating_add(insets.horizontal()),
            self.height.saturating_add(insets.vertical()),
        )
    }
}

/// Space reserved on each side of a container's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets { top: 0, left: 0, bottom: 0, right: 0 };

    /// Create insets in top, left, bottom, right order.
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    /// Create uniform insets.
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Create symmetric insets.
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal insets.
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical insets.
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// True if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check whether both rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.intersection(other).is_some()
    }

    /// Compute the overlapping area with another rectangle.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 < x2 && y1 < y2 {
            Some(Rectangle::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1)))
        } else {
            None
        }
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rectangle::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }
}
