//! Core geometry types
//!
//! All values are logical pixels in `f32`. Layout writes [`Rect`]s in absolute
//! window coordinates; paint and hit testing read them back.

use std::ops::{Add, Sub};

// ─────────────────────────────────────────────────────────────────────────────
// Point / Size / Rect
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }

    /// Get the size of this rect
    pub fn size(&self) -> Size {
        self.size
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Shrink by per-side amounts, never producing a negative size
    pub fn inset_by(&self, edges: Edges<f32>) -> Self {
        Rect {
            origin: Point::new(self.origin.x + edges.left, self.origin.y + edges.top),
            size: Size::new(
                (self.size.width - edges.horizontal()).max(0.0),
                (self.size.height - edges.vertical()).max(0.0),
            ),
        }
    }

    /// Grow by per-side amounts
    pub fn outset_by(&self, edges: Edges<f32>) -> Self {
        Rect {
            origin: Point::new(self.origin.x - edges.left, self.origin.y - edges.top),
            size: Size::new(
                self.size.width + edges.horizontal(),
                self.size.height + edges.vertical(),
            ),
        }
    }

    /// Intersection of two rects, or `None` if they don't overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x().max(other.x());
        let y0 = self.y().max(other.y());
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Smallest rect containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.x().min(other.x());
        let y0 = self.y().min(other.y());
        let x1 = self.max_x().max(other.max_x());
        let y1 = self.max_y().max(other.max_y());
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Edges / CornerRadius
// ─────────────────────────────────────────────────────────────────────────────

/// Four-sided value in CSS order (top, right, bottom, left)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(vertical: T, horizontal: T) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Edges<U> {
        Edges {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }

    /// Sides as an array in (top, right, bottom, left) order
    pub fn to_array(self) -> [T; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

impl Edges<f32> {
    pub const ZERO: Edges<f32> = Edges::all(0.0);

    /// left + right
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn max_side(&self) -> f32 {
        self.top.max(self.right).max(self.bottom).max(self.left)
    }

    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }
}

impl Add for Edges<f32> {
    type Output = Edges<f32>;

    fn add(self, rhs: Edges<f32>) -> Edges<f32> {
        Edges::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

/// Corner radii for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub const fn uniform(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|r| *r <= 0.0)
    }

    /// Clamp every corner so that it fits a box of `size`
    pub fn clamped_to(&self, size: Size) -> CornerRadius {
        let limit = (size.width.min(size.height) / 2.0).max(0.0);
        CornerRadius::new(
            self.top_left.clamp(0.0, limit),
            self.top_right.clamp(0.0, limit),
            self.bottom_right.clamp(0.0, limit),
            self.bottom_left.clamp(0.0, limit),
        )
    }

    /// Radii of the curve inset by `edges`, as used for the inner edge of a border
    pub fn shrink(&self, edges: Edges<f32>) -> CornerRadius {
        CornerRadius::new(
            (self.top_left - edges.top.max(edges.left)).max(0.0),
            (self.top_right - edges.top.max(edges.right)).max(0.0),
            (self.bottom_right - edges.bottom.max(edges.right)).max(0.0),
            (self.bottom_left - edges.bottom.max(edges.left)).max(0.0),
        )
    }

    /// Radii of the curve grown by `amount` on every side, as used for outlines
    pub fn grow(&self, amount: f32) -> CornerRadius {
        let grow = |r: f32| if r > 0.0 { r + amount } else { 0.0 };
        CornerRadius::new(
            grow(self.top_left),
            grow(self.top_right),
            grow(self.bottom_right),
            grow(self.bottom_left),
        )
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}
