//! Wall segments.

use crate::geometry::Bounds;
use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};

/// A straight wall between two document-space points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start_point: Point,
    pub end_point: Point,
    pub thickness: f64,
}

impl Wall {
    pub fn new(start_point: Point, end_point: Point, thickness: f64) -> Self {
        Self {
            start_point,
            end_point,
            thickness,
        }
    }

    pub fn length(&self) -> f64 {
        self.start_point.distance(self.end_point)
    }

    pub fn as_line(&self) -> Line {
        Line::new(self.start_point, self.end_point)
    }

    /// Segment bounding box grown by half the thickness on every side.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.start_point, self.end_point).inflated(self.thickness / 2.0)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start_point += delta;
        self.end_point += delta;
    }

    /// Element bounds for this segment: [`Wall::bounds`] grown to at least
    /// `min_size` on each axis, centred on the segment.
    pub(crate) fn floored_bounds(&self, min_size: f64) -> Bounds {
        let padded = self.bounds();
        let center = padded.center();
        let width = padded.width.max(min_size);
        let height = padded.height.max(min_size);
        Bounds::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Move the endpoints so the segment's box follows the edge moves from
    /// `from` to `to`. Endpoints keep their relative place inside the box; a
    /// segment flat along an axis sits midway across it.
    pub(crate) fn follow_bounds(&mut self, from: &Bounds, to: &Bounds) {
        let segment = Bounds::from_points(self.start_point, self.end_point);
        let x0 = segment.x + (to.x - from.x);
        let y0 = segment.y + (to.y - from.y);
        let x1 = (segment.right() + (to.right() - from.right())).max(x0);
        let y1 = (segment.bottom() + (to.bottom() - from.bottom())).max(y0);

        let map = |p: Point| {
            let u = if segment.width > 0.0 { (p.x - segment.x) / segment.width } else { 0.5 };
            let v = if segment.height > 0.0 { (p.y - segment.y) / segment.height } else { 0.5 };
            Point::new(x0 + u * (x1 - x0), y0 + v * (y1 - y0))
        };
        self.start_point = map(self.start_point);
        self.end_point = map(self.end_point);
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new(Point::ZERO, Point::new(100.0, 0.0), 10.0)
    }
}
