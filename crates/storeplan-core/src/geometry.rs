//! Geometry kernel: rotation, containment and angle helpers.
//!
//! All angles at this boundary are in degrees. Radians only appear inside
//! the functions.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in unrotated local space.
///
/// Rotation is stored separately on the element transform and is never
/// baked into the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized bounds spanning two arbitrary corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Copy of these bounds moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Copy of these bounds expanded by `amount` on every side.
    pub fn inflated(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Whether two bounds overlap. Touching edges count as overlap.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Rotate `point` around `center` by `angle_degrees`.
///
/// Calling again with `-angle_degrees` returns the original point.
pub fn rotate_point(point: Point, center: Point, angle_degrees: f64) -> Point {
    center + rotate_vector(point - center, angle_degrees)
}

/// Rotate a vector about the origin by `angle_degrees`.
pub fn rotate_vector(vector: Vec2, angle_degrees: f64) -> Vec2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vec2::new(
        vector.x * cos - vector.y * sin,
        vector.x * sin + vector.y * cos,
    )
}

/// Inclusive containment test: points on the boundary are inside.
///
/// `kurbo::Rect::contains` is half-open, which would miss the right and
/// bottom edges.
pub fn is_point_in_rect(point: Point, bounds: &Bounds) -> bool {
    point.x >= bounds.x
        && point.x <= bounds.right()
        && point.y >= bounds.y
        && point.y <= bounds.bottom()
}

/// Containment test for bounds rotated about their center.
pub fn is_point_in_rotated_rect(point: Point, bounds: &Bounds, rotation_degrees: f64) -> bool {
    if rotation_degrees == 0.0 {
        return is_point_in_rect(point, bounds);
    }
    let local = rotate_point(point, bounds.center(), -rotation_degrees);
    is_point_in_rect(local, bounds)
}

/// Map an angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Round `angle` to the nearest multiple of `interval` when `enabled`.
pub fn snap_angle_to_interval(angle: f64, interval: f64, enabled: bool) -> f64 {
    if !enabled || interval <= 0.0 {
        return angle;
    }
    (angle / interval).round() * interval
}

/// The four corners of `bounds` after rotating about its center.
pub fn rotated_corners(bounds: &Bounds, rotation_degrees: f64) -> [Point; 4] {
    let center = bounds.center();
    bounds
        .corners()
        .map(|corner| rotate_point(corner, center, rotation_degrees))
}

/// Angle in degrees of the vector from `from` to `to`.
pub fn angle_between(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
