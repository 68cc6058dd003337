//! Integer points and rectangles for pixel addressing.
//!
//! A [`Rect`] is half-open: it contains the points with
//! `min.x <= x < max.x` and `min.y <= y < max.y`.

/// A point on the integer pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A half-open axis-aligned rectangle on the pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect {
        min: Point::new(0, 0),
        max: Point::new(0, 0),
    };

    /// Rectangle spanning `(x0, y0)` to `(x1, y1)` exclusive.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Width in pixels; inverted rectangles count as zero wide.
    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x).max(0) as u32
    }

    /// Height in pixels; inverted rectangles count as zero tall.
    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y).max(0) as u32
    }

    /// Whether the rectangle contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min.x <= x && x < self.max.x && self.min.y <= y && y < self.max.y
    }

    /// The largest rectangle contained in both `self` and `other`.
    ///
    /// Returns [`Rect::ZERO`] when the two do not overlap, so the result
    /// is never an inverted rectangle pointing outside either input.
    pub fn intersect(&self, other: Rect) -> Rect {
        let r = Rect {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Rect::ZERO } else { r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(1, 2, 4, 6);
        assert!(r.contains(1, 2));
        assert!(r.contains(3, 5));
        assert!(!r.contains(4, 2));
        assert!(!r.contains(1, 6));
        assert!(!r.contains(0, 3));
    }

    #[test]
    fn disjoint_intersection_is_zero() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 5, 8, 8);
        assert_eq!(a.intersect(b), Rect::ZERO);
        assert!(a.intersect(b).is_empty());
    }

    #[test]
    fn overlapping_intersection() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 1, 6, 3);
        assert_eq!(a.intersect(b), Rect::new(2, 1, 4, 3));
    }

    #[test]
    fn inverted_rect_has_zero_size() {
        let r = Rect::new(4, 4, 0, 0);
        assert!(r.is_empty());
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
    }
}
