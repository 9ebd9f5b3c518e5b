//! Grid snapping and alignment guides.

use crate::geometry::Bounds;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Snap a scalar to the nearest multiple of `grid_size`, rounding halves up.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size + 0.5).floor() * grid_size
}

/// Snap both coordinates of a point independently.
pub fn snap_point_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(snap_to_grid(point.x, grid_size), snap_to_grid(point.y, grid_size))
}

/// Snap origin and size of bounds, as done after a resize.
pub fn snap_bounds_to_grid(bounds: &Bounds, grid_size: f64) -> Bounds {
    Bounds::new(
        snap_to_grid(bounds.x, grid_size),
        snap_to_grid(bounds.y, grid_size),
        snap_to_grid(bounds.width, grid_size),
        snap_to_grid(bounds.height, grid_size),
    )
}

/// Direction of an alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideOrientation {
    /// Line of constant y.
    Horizontal,
    /// Line of constant x.
    Vertical,
}

/// A transient alignment line shown while dragging.
///
/// `position` is the constant coordinate; `start..end` is the extent along
/// the other axis covering both compared elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGuide {
    pub orientation: GuideOrientation,
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

/// Near edge, far edge and center of bounds along one axis.
fn anchors(bounds: &Bounds, orientation: GuideOrientation) -> [f64; 3] {
    match orientation {
        GuideOrientation::Vertical => [bounds.x, bounds.right(), bounds.x + bounds.width / 2.0],
        GuideOrientation::Horizontal => [bounds.y, bounds.bottom(), bounds.y + bounds.height / 2.0],
    }
}

const NEAR: usize = 0;
const FAR: usize = 1;
const CENTER: usize = 2;

/// (moving anchor, static anchor) pairs compared on each axis.
const RELATIONS: [(usize, usize); 5] = [
    (NEAR, NEAR),
    (FAR, FAR),
    (CENTER, CENTER),
    (NEAR, FAR),
    (FAR, NEAR),
];

/// Guides between `moving` and every bounds in `others` closer than `threshold`.
///
/// One guide is emitted per matching (moving anchor, static anchor) pair.
pub fn detect_alignment_guides<'a>(
    moving: &Bounds,
    others: impl IntoIterator<Item = &'a Bounds>,
    threshold: f64,
) -> Vec<AlignmentGuide> {
    let mut guides = Vec::new();
    for other in others {
        for orientation in [GuideOrientation::Vertical, GuideOrientation::Horizontal] {
            let mine = anchors(moving, orientation);
            let theirs = anchors(other, orientation);
            let (start, end) = match orientation {
                GuideOrientation::Vertical => (
                    moving.y.min(other.y),
                    moving.bottom().max(other.bottom()),
                ),
                GuideOrientation::Horizontal => {
                    (moving.x.min(other.x), moving.right().max(other.right()))
                }
            };
            for (m, t) in RELATIONS {
                if (mine[m] - theirs[t]).abs() < threshold {
                    guides.push(AlignmentGuide {
                        orientation,
                        position: theirs[t],
                        start,
                        end,
                    });
                }
            }
        }
    }
    guides
}

/// Snap the origin of `moving` onto the active guides.
///
/// On each axis the anchor closest to any guide wins; ties keep the first
/// match in guide order.
pub fn apply_alignment_snap(moving: &Bounds, guides: &[AlignmentGuide], threshold: f64) -> Point {
    let mut origin = moving.origin();
    for orientation in [GuideOrientation::Vertical, GuideOrientation::Horizontal] {
        let mine = anchors(moving, orientation);
        let mut best: Option<(f64, f64)> = None;
        for guide in guides.iter().filter(|g| g.orientation == orientation) {
            for anchor in mine {
                let diff = guide.position - anchor;
                if diff.abs() < threshold && best.is_none_or(|(d, _)| diff.abs() < d) {
                    best = Some((diff.abs(), diff));
                }
            }
        }
        if let Some((_, shift)) = best {
            match orientation {
                GuideOrientation::Vertical => origin.x += shift,
                GuideOrientation::Horizontal => origin.y += shift,
            }
        }
    }
    origin
}

/// Detect guides for `moving` and return its snapped origin with them.
pub fn snap_to_alignment<'a>(
    moving: &Bounds,
    others: impl IntoIterator<Item = &'a Bounds>,
    threshold: f64,
) -> (Point, Vec<AlignmentGuide>) {
    let guides = detect_alignment_guides(moving, others, threshold);
    let origin = apply_alignment_snap(moving, &guides, threshold);
    (origin, guides)
}
