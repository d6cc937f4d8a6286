//! Integer geometry types shared by the widget tree and layout managers.
//!
//! All coordinates are in device pixels. Widget bounds are relative to the
//! parent widget; sizes never go negative (operations clamp to zero).

use std::ops::{Add, Sub};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Offset the point by the given amount.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub w: i32,
    pub h: i32,
}

impl Dimension {
    /// Create a new dimension.
    #[inline]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Zero size.
    pub const ZERO: Self = Self { w: 0, h: 0 };

    /// The largest representable size, used as "unbounded".
    pub const MAX: Self = Self {
        w: i32::MAX,
        h: i32::MAX,
    };

    /// Check if either extent is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Clamp each extent to at most the given maximum.
    #[inline]
    pub fn clamp_to(self, max: Dimension) -> Self {
        Self::new(self.w.min(max.w), self.h.min(max.h))
    }

    /// Grow each extent to at least the given minimum.
    #[inline]
    pub fn expand_to(self, min: Dimension) -> Self {
        Self::new(self.w.max(min.w), self.h.max(min.h))
    }

    /// Clamp both extents to be non-negative.
    #[inline]
    pub fn non_negative(self) -> Self {
        Self::new(self.w.max(0), self.h.max(0))
    }

    /// Add insets to both extents, saturating at [`Dimension::MAX`].
    #[inline]
    pub fn grow(self, insets: Insets) -> Self {
        Self::new(
            self.w.saturating_add(insets.horizontal()),
            self.h.saturating_add(insets.vertical()),
        )
    }

    /// Remove insets from both extents, clamping at zero.
    #[inline]
    pub fn shrink(self, insets: Insets) -> Self {
        if self == Self::MAX {
            return self;
        }
        Self::new(
            self.w.saturating_sub(insets.horizontal()),
            self.h.saturating_sub(insets.vertical()),
        )
        .non_negative()
    }
}

impl From<(i32, i32)> for Dimension {
    fn from((w, h): (i32, i32)) -> Self {
        Self::new(w, h)
    }
}

/// Space reserved at each edge of a widget (border plus margin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    /// Create insets from the four edges, in CSS order.
    #[inline]
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge.
    #[inline]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// No insets.
    pub const ZERO: Self = Self::uniform(0);

    /// Sum of left and right.
    #[inline]
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Insets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from a location and a size.
    #[inline]
    pub const fn from_parts(location: Point, size: Dimension) -> Self {
        Self::new(location.x, location.y, size.w, size.h)
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Top-left corner.
    #[inline]
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub fn size(&self) -> Dimension {
        Dimension::new(self.w, self.h)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Compute the intersection of two rectangles.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Shrink the rectangle by the given insets. The size never goes negative.
    pub fn shrink(&self, insets: Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.w - insets.horizontal()).max(0),
            (self.h - insets.vertical()).max(0),
        )
    }

    /// Offset the rectangle by the given amount.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(29, 29)));
        assert!(!r.contains(Point::new(30, 10)));
        assert!(!r.contains(Point::new(9, 15)));
    }

    #[test]
    fn test_rect_shrink_clamps() {
        let r = Rect::new(0, 0, 4, 4);
        let inner = r.shrink(Insets::uniform(3));
        assert_eq!(inner, Rect::new(3, 3, 0, 0));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(20, 20, 1, 1)), None);
    }

    #[test]
    fn test_dimension_clamp_and_expand() {
        let d = Dimension::new(50, 5);
        assert_eq!(d.clamp_to(Dimension::new(40, 40)), Dimension::new(40, 5));
        assert_eq!(d.expand_to(Dimension::new(10, 10)), Dimension::new(50, 10));
    }

    #[test]
    fn test_dimension_grow_saturates() {
        let grown = Dimension::MAX.grow(Insets::uniform(4));
        assert_eq!(grown, Dimension::MAX);
        assert_eq!(Dimension::MAX.shrink(Insets::uniform(4)), Dimension::MAX);
        assert_eq!(
            Dimension::new(3, 3).shrink(Insets::uniform(2)),
            Dimension::new(0, 0)
        );
    }

    #[test]
    fn test_insets_add() {
        let sum = Insets::new(1, 2, 3, 4) + Insets::uniform(1);
        assert_eq!(sum, Insets::new(2, 3, 4, 5));
        assert_eq!(sum.horizontal(), 8);
        assert_eq!(sum.vertical(), 6);
    }
}
