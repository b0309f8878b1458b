use super::Point;

/// Axis-aligned integer rectangle in logical pixels (top-left origin).
///
/// A rectangle with non-positive width or height is considered empty; the
/// clip pipeline produces such rects deliberately when regions shrink to
/// nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn from_point_size(origin: Point, w: i32, h: i32) -> Self {
        Self { x: origin.x, y: origin.y, w, h }
    }

    #[inline]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// X coordinate one past the right edge.
    #[inline]
    pub fn right(self) -> i32 {
        self.x + self.w
    }

    /// Y coordinate one past the bottom edge.
    #[inline]
    pub fn bottom(self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}
