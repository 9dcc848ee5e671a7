//! Plain 2D value types shared by the session logic and the renderers.
//!
//! All coordinates are `f64` in view points unless stated otherwise. The view
//! origin is its top-left corner, with y growing downwards.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A location in view (or image) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement, e.g. a pan offset or a drag translation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub dx: f64,
    pub dy: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Mul<f64> for Size {
    type Output = Size;

    fn mul(self, k: f64) -> Size {
        Size::new(self.width * k, self.height * k)
    }
}

/// Axis-aligned rectangle stored as its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub size: Size,
}

impl Rect {
    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self {
            min: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    pub fn max(&self) -> Point {
        Point::new(self.min.x + self.size.width, self.min.y + self.size.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.size.width / 2.0,
            self.min.y + self.size.height / 2.0,
        )
    }

    /// Inclusive containment: points on the border count as inside.
    pub fn contains(&self, p: Point) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}
