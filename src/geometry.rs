//! Integer canvas points and regular polygon vertex generation.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the canvas in whole pixels, relative to the canvas' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, growing to the right
    pub x: i32,
    /// Vertical coordinate, growing downwards
    pub y: i32,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sum of the absolute coordinate differences between `self` and `other`.
    pub fn manhattan_distance(self, other: Point) -> i64 {
        (i64::from(self.x) - i64::from(other.x)).abs()
            + (i64::from(self.y) - i64::from(other.y)).abs()
    }
}

/// Displacement between two canvas points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    /// Horizontal displacement
    pub dx: i32,
    /// Vertical displacement
    pub dy: i32,
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x.saturating_sub(rhs.x),
            dy: self.y.saturating_sub(rhs.y),
        }
    }
}

impl Sub<Offset> for Point {
    type Output = Point;

    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_sub(rhs.dx), self.y.saturating_sub(rhs.dy))
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

/// Computes the vertices of a regular polygon.
///
/// Vertex `i` sits at angle `2π·i/sides` measured from the positive x-axis, at
/// `radius` pixels from `center`. Coordinates are rounded to the nearest pixel.
///
/// Callers must pass `sides >= 3` and `radius > 0`.
pub fn polygon_vertices(center: Point, radius: u32, sides: u32) -> Vec<Point> {
    debug_assert!(sides >= 3, "a polygon needs at least three sides");
    debug_assert!(radius > 0, "a polygon needs a positive radius");

    let r = f64::from(radius);
    let step = std::f64::consts::TAU / f64::from(sides);
    (0..sides)
        .map(|i| {
            let angle = step * f64::from(i);
            Point::new(
                (f64::from(center.x) + r * angle.cos()).round() as i32,
                (f64::from(center.y) + r * angle.sin()).round() as i32,
            )
        })
        .collect()
}
