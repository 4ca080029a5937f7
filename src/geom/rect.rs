//! Integer rectangle for hitboxes and layout
//!
//! Positions and sizes are whole pixels; float centers are truncated on
//! assignment so motion math can feed back into the integer grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with integer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle of the given size centered on a point
    #[must_use]
    pub const fn from_center(center: (i32, i32), width: i32, height: i32) -> Self {
        Self {
            left: center.0 - width / 2,
            top: center.1 - height / 2,
            width,
            height,
        }
    }

    /// Right edge (exclusive)
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    /// Bottom edge (exclusive)
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Top-left corner
    #[must_use]
    pub const fn topleft(&self) -> (i32, i32) {
        (self.left, self.top)
    }

    /// Move the rectangle so its top-left corner is at the given point
    pub const fn set_topleft(&mut self, topleft: (i32, i32)) {
        self.left = topleft.0;
        self.top = topleft.1;
    }

    /// Center point (integer division)
    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.left + self.width / 2, self.top + self.height / 2)
    }

    /// Move the rectangle so it is centered on the given point
    pub const fn set_center(&mut self, center: (i32, i32)) {
        self.left = center.0 - self.width / 2;
        self.top = center.1 - self.height / 2;
    }

    /// Move the rectangle so it is centered on a continuous position
    ///
    /// Coordinates are truncated towards zero before assignment.
    pub fn set_center_vec(&mut self, center: Vec2) {
        self.set_center((center.x as i32, center.y as i32));
    }

    /// Right edge alignment: move so `right()` equals the given coordinate
    pub const fn set_right(&mut self, right: i32) {
        self.left = right - self.width;
    }

    /// Check whether two rectangles overlap
    ///
    /// Rectangles that merely touch along an edge do not overlap, and
    /// zero-sized rectangles never overlap anything.
    #[must_use]
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    /// Check if a point lies inside the rectangle
    #[must_use]
    pub const fn contains(&self, point: (i32, i32)) -> bool {
        point.0 >= self.left
            && point.0 < self.right()
            && point.1 >= self.top
            && point.1 < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center(), (25, 40));
    }

    #[test]
    fn test_rect_set_center_truncates() {
        let mut rect = Rect::new(0, 0, 16, 16);
        rect.set_center_vec(Vec2::new(100.9, 50.7));
        assert_eq!(rect.center(), (100, 50));
        assert_eq!(rect.topleft(), (92, 42));
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center((100, 270), 5, 13);
        assert_eq!(rect.center(), (100, 270));
        assert_eq!(rect.width, 5);
        assert_eq!(rect.height, 13);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching edges do not overlap
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_zero_size_never_intersects() {
        let a = Rect::new(5, 5, 0, 0);
        let b = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains((0, 0)));
        assert!(rect.contains((9, 9)));
        assert!(!rect.contains((10, 10)));
    }
}
