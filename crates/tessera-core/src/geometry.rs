//! Geometric primitives for chart and diagram layout.
//!
//! This module provides the geometric types used throughout Tessera for
//! calculating positions, sizes and bounding boxes of rendered elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in pixel space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! Tessera uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are measured in radians, clockwise from the positive X axis
//! (3 o'clock), which is what `cos`/`sin` produce with Y pointing down.

/// A 2D point in pixel space.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point at `angle` radians on the circle around `center`.
    ///
    /// ```
    /// # use tessera_core::geometry::Point;
    /// let p = Point::on_circle(Point::new(100.0, 100.0), 50.0, 0.0);
    /// assert_eq!(p, Point::new(150.0, 100.0));
    /// ```
    pub fn on_circle(center: Point, radius: f64, angle: f64) -> Self {
        Self {
            x: radius.mul_add(angle.cos(), center.x),
            y: radius.mul_add(angle.sin(), center.y),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        other.sub_point(self).hypot()
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// An axis-aligned rectangle described by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds centered on `center` with the given size.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;

        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(self) -> f64 {
        self.min_x
    }

    pub fn min_y(self) -> f64 {
        self.min_y
    }

    pub fn max_x(self) -> f64 {
        self.max_x
    }

    pub fn max_y(self) -> f64 {
        self.max_y
    }

    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the two rectangles overlap with a positive area.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Smallest bounds containing both `self` and `other`.
    ///
    /// ```
    /// # use tessera_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(2.0, 2.0));
    /// let b = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(2.0, 2.0));
    /// let merged = a.merge(&b);
    /// assert_eq!(merged.min_x(), -1.0);
    /// assert_eq!(merged.max_y(), 11.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Padding values for the four sides of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates insets in CSS order: top, right, bottom, left.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value for top/bottom and for left/right.
    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn top(self) -> f64 {
        self.top
    }

    pub fn right(self) -> f64 {
        self.right
    }

    pub fn bottom(self) -> f64 {
        self.bottom
    }

    pub fn left(self) -> f64 {
        self.left
    }

    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f64 {
        self.top + self.bottom
    }
}

/// Finds where the ray from the center `a` of a rectangle of `a_size`
/// towards `b` leaves the rectangle.
///
/// Returns `b` when the two points coincide.
pub fn find_rectangle_intersection(a: Point, b: Point, a_size: Size) -> Point {
    let half_width = a_size.width() / 2.0;
    let half_height = a_size.height() / 2.0;

    let dist = b.sub_point(a);
    let length = dist.hypot();
    if length < 0.001 {
        return b;
    }

    let dx_norm = dist.x() / length;
    let dy_norm = dist.y() / length;

    // Distance along the ray to the horizontal and vertical edge lines;
    // the nearest one is where the ray exits.
    let t_horizontal = if dy_norm.abs() > f64::EPSILON {
        half_height / dy_norm.abs()
    } else {
        f64::MAX
    };
    let t_vertical = if dx_norm.abs() > f64::EPSILON {
        half_width / dx_norm.abs()
    } else {
        f64::MAX
    };

    let t = t_horizontal.min(t_vertical);
    Point::new(dx_norm.mul_add(t, a.x()), dy_norm.mul_add(t, a.y()))
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_on_circle() {
        let center = Point::new(0.0, 0.0);
        let bottom = Point::on_circle(center, 10.0, std::f64::consts::FRAC_PI_2);
        assert!(approx_eq!(f64, bottom.x(), 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bottom.y(), 10.0, epsilon = 1e-9));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_center(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let c = Bounds::new_from_center(Point::new(20.0, 0.0), Size::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));

        // Touching edges do not count as overlap.
        let d = Bounds::new_from_center(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_rectangle_intersection_horizontal() {
        let center = Point::new(100.0, 100.0);
        let hit = find_rectangle_intersection(center, Point::new(300.0, 100.0), Size::new(80.0, 40.0));
        assert!(approx_eq!(f64, hit.x(), 140.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, hit.y(), 100.0, epsilon = 1e-9));
    }

    #[test]
    fn test_rectangle_intersection_vertical() {
        let center = Point::new(100.0, 100.0);
        let hit = find_rectangle_intersection(center, Point::new(100.0, 0.0), Size::new(80.0, 40.0));
        assert!(approx_eq!(f64, hit.x(), 100.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, hit.y(), 80.0, epsilon = 1e-9));
    }

    #[test]
    fn test_rectangle_intersection_diagonal_hits_edge() {
        let center = Point::new(0.0, 0.0);
        let size = Size::new(80.0, 40.0);
        let hit = find_rectangle_intersection(center, Point::new(100.0, 100.0), size);
        // A 45° ray through an 80x40 box exits through the bottom edge.
        assert!(approx_eq!(f64, hit.y(), 20.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, hit.x(), 20.0, epsilon = 1e-9));
    }

    #[test]
    fn test_rectangle_intersection_same_point() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(find_rectangle_intersection(p, p, Size::new(10.0, 10.0)), p);
    }

    proptest! {
        #[test]
        fn prop_rectangle_intersection_on_border(
            angle in 0.0f64..std::f64::consts::TAU,
            width in 1.0f64..500.0,
            height in 1.0f64..500.0,
        ) {
            let center = Point::new(50.0, -20.0);
            let target = Point::on_circle(center, 1000.0, angle);
            let hit = find_rectangle_intersection(center, target, Size::new(width, height));

            let offset = hit.sub_point(center).abs();
            prop_assert!(offset.x() <= width / 2.0 + 1e-6);
            prop_assert!(offset.y() <= height / 2.0 + 1e-6);
            let on_vertical = (offset.x() - width / 2.0).abs() < 1e-6;
            let on_horizontal = (offset.y() - height / 2.0).abs() < 1e-6;
            prop_assert!(on_vertical || on_horizontal);
        }
    }
}
