//! Resize and rotation handles for selected elements.

use crate::elements::Element;
use crate::geometry::{self, Bounds};
use crate::snap;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// One of the eight resize hotspots around an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// Handle center on unrotated bounds.
    pub fn local_position(self, bounds: &Bounds) -> Point {
        let cx = bounds.x + bounds.width / 2.0;
        let cy = bounds.y + bounds.height / 2.0;
        match self {
            ResizeHandle::TopLeft => Point::new(bounds.x, bounds.y),
            ResizeHandle::Top => Point::new(cx, bounds.y),
            ResizeHandle::TopRight => Point::new(bounds.right(), bounds.y),
            ResizeHandle::Right => Point::new(bounds.right(), cy),
            ResizeHandle::BottomRight => Point::new(bounds.right(), bounds.bottom()),
            ResizeHandle::Bottom => Point::new(cx, bounds.bottom()),
            ResizeHandle::BottomLeft => Point::new(bounds.x, bounds.bottom()),
            ResizeHandle::Left => Point::new(bounds.x, cy),
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight)
    }
}

/// Handle centers in document space, rotated with the element.
pub fn handle_positions(element: &Element) -> [(ResizeHandle, Point); 8] {
    let center = element.center();
    let rotation = element.rotation();
    ResizeHandle::ALL.map(|handle| {
        let local = handle.local_position(&element.bounds);
        (handle, geometry::rotate_point(local, center, rotation))
    })
}

/// Rotation handle center, `offset` above the top edge midpoint.
pub fn rotation_handle_position(element: &Element, offset: f64) -> Point {
    let bounds = &element.bounds;
    let local = Point::new(bounds.x + bounds.width / 2.0, bounds.y - offset);
    geometry::rotate_point(local, element.center(), element.rotation())
}

/// Resize handle under `point`, if any.
///
/// `hit_radius` is in document units and should already account for zoom.
pub fn get_resize_handle_at_position(
    point: Point,
    element: &Element,
    hit_radius: f64,
) -> Option<ResizeHandle> {
    handle_positions(element)
        .into_iter()
        .find(|(_, position)| position.distance(point) <= hit_radius)
        .map(|(handle, _)| handle)
}

pub fn is_rotation_handle_at_position(
    point: Point,
    element: &Element,
    offset: f64,
    hit_radius: f64,
) -> bool {
    rotation_handle_position(element, offset).distance(point) <= hit_radius
}

/// Bounds after dragging `handle` by `local_delta`.
///
/// `local_delta` is measured in the element's unrotated frame. With a
/// `grid_size`, the width and height along each dragged axis snap to grid
/// multiples. Width and height never drop below `min_size` (rounded up to the
/// grid when snapping); the edge opposite the handle stays put throughout.
/// For rotated bounds the origin is corrected so the anchored side stays
/// fixed on screen.
pub fn apply_resize(
    original: &Bounds,
    rotation: f64,
    handle: ResizeHandle,
    local_delta: Vec2,
    min_size: f64,
    grid_size: Option<f64>,
) -> Bounds {
    let grid_size = grid_size.filter(|g| *g > 0.0);

    let mut left = original.x;
    let mut top = original.y;
    let mut right = original.right();
    let mut bottom = original.bottom();

    if handle.moves_left() {
        left += local_delta.x;
    }
    if handle.moves_right() {
        right += local_delta.x;
    }
    if handle.moves_top() {
        top += local_delta.y;
    }
    if handle.moves_bottom() {
        bottom += local_delta.y;
    }

    let raw = Bounds::new(left, top, right - left, bottom - top);
    let (mut width, mut height, floor) = match grid_size {
        Some(g) => {
            let snapped = snap::snap_bounds_to_grid(&raw, g);
            (snapped.width, snapped.height, (min_size / g).ceil() * g)
        }
        None => (raw.width, raw.height, min_size),
    };
    if !handle.moves_left() && !handle.moves_right() {
        width = original.width;
    } else {
        width = width.max(floor);
    }
    if !handle.moves_top() && !handle.moves_bottom() {
        height = original.height;
    } else {
        height = height.max(floor);
    }

    if handle.moves_left() {
        left = right - width;
    } else {
        right = left + width;
    }
    if handle.moves_top() {
        top = bottom - height;
    } else {
        bottom = top + height;
    }

    let resized = Bounds::new(left, top, right - left, bottom - top);
    if rotation == 0.0 {
        return resized;
    }

    // The element spins about its own center, so a shifted center would drag
    // the anchored side along. Move the bounds by the difference between the
    // rotated and unrotated center shift.
    let shift = resized.center() - original.center();
    let correction = geometry::rotate_vector(shift, rotation) - shift;
    resized.translated(correction)
}

/// Rotation after the pointer moves from `last_point` to `current_point`
/// around `center`.
pub fn apply_rotation(rotation: f64, center: Point, last_point: Point, current_point: Point) -> f64 {
    let delta = geometry::angle_between(center, current_point) - geometry::angle_between(center, last_point);
    rotation + delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementDraft, ElementType};
    use proptest::prelude::*;

    fn element(bounds: Bounds, rotation: f64) -> Element {
        let draft = ElementDraft::new(ElementType::Gondola.default_kind(), bounds).with_rotation(rotation);
        Element::from_draft(draft, 0, 10.0)
    }

    #[test]
    fn test_handle_hit_on_unrotated() {
        let e = element(Bounds::new(0.0, 0.0, 100.0, 50.0), 0.0);
        assert_eq!(
            get_resize_handle_at_position(Point::new(102.0, 52.0), &e, 8.0),
            Some(ResizeHandle::BottomRight)
        );
        assert_eq!(
            get_resize_handle_at_position(Point::new(50.0, -3.0), &e, 8.0),
            Some(ResizeHandle::Top)
        );
        assert_eq!(get_resize_handle_at_position(Point::new(50.0, 25.0), &e, 8.0), None);
    }

    #[test]
    fn test_handles_follow_rotation() {
        let e = element(Bounds::new(0.0, 0.0, 100.0, 50.0), 90.0);
        // the top edge midpoint sits on the right after a quarter turn
        assert_eq!(
            get_resize_handle_at_position(Point::new(75.0, 25.0), &e, 8.0),
            Some(ResizeHandle::Top)
        );
    }

    #[test]
    fn test_rotation_handle() {
        let e = element(Bounds::new(0.0, 0.0, 100.0, 50.0), 0.0);
        assert!(is_rotation_handle_at_position(Point::new(50.0, -30.0), &e, 30.0, 8.0));
        assert!(!is_rotation_handle_at_position(Point::new(50.0, 0.0), &e, 30.0, 8.0));

        let turned = element(Bounds::new(0.0, 0.0, 100.0, 50.0), 180.0);
        assert!(is_rotation_handle_at_position(Point::new(50.0, 80.0), &turned, 30.0, 8.0));
    }

    #[test]
    fn test_resize_bottom_right() {
        let original = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::BottomRight, Vec2::new(20.0, 10.0), 10.0, None);
        assert_eq!(resized, Bounds::new(0.0, 0.0, 120.0, 60.0));
    }

    #[test]
    fn test_resize_top_left_moves_origin() {
        let original = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::TopLeft, Vec2::new(10.0, -10.0), 10.0, None);
        assert_eq!(resized, Bounds::new(10.0, -10.0, 90.0, 60.0));
    }

    #[test]
    fn test_resize_floor_keeps_opposite_edge() {
        let original = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::Left, Vec2::new(250.0, 0.0), 10.0, None);
        assert_eq!(resized, Bounds::new(90.0, 0.0, 10.0, 50.0));

        let resized = apply_resize(&original, 0.0, ResizeHandle::Bottom, Vec2::new(0.0, -80.0), 10.0, None);
        assert_eq!(resized, Bounds::new(0.0, 0.0, 100.0, 10.0));
    }

    #[test]
    fn test_resize_edge_leaves_other_axis() {
        let original = Bounds::new(5.0, 5.0, 100.0, 50.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::Right, Vec2::new(15.0, 40.0), 10.0, None);
        assert_eq!(resized, Bounds::new(5.0, 5.0, 115.0, 50.0));
    }

    #[test]
    fn test_resize_snaps_dragged_edge() {
        let original = Bounds::new(0.0, 0.0, 100.0, 60.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::BottomRight, Vec2::new(13.0, 3.0), 10.0, Some(20.0));
        assert_eq!(resized, Bounds::new(0.0, 0.0, 120.0, 60.0));
    }

    #[test]
    fn test_resize_snaps_size_from_unaligned_origin() {
        let original = Bounds::new(13.0, 0.0, 100.0, 60.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::Right, Vec2::new(3.0, 0.0), 10.0, Some(20.0));
        assert_eq!(resized, Bounds::new(13.0, 0.0, 100.0, 60.0));

        let resized = apply_resize(&original, 0.0, ResizeHandle::Right, Vec2::new(14.0, 0.0), 10.0, Some(20.0));
        assert_eq!(resized.width % 20.0, 0.0);
        assert_eq!(resized, Bounds::new(13.0, 0.0, 120.0, 60.0));
    }

    #[test]
    fn test_snapped_floor_rounds_up_to_grid() {
        let original = Bounds::new(7.0, 0.0, 100.0, 60.0);
        let resized = apply_resize(&original, 0.0, ResizeHandle::Left, Vec2::new(300.0, 0.0), 10.0, Some(20.0));
        assert_eq!(resized, Bounds::new(87.0, 0.0, 20.0, 60.0));
    }

    #[test]
    fn test_rotated_resize_keeps_anchor_fixed() {
        let original = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let rotation = 90.0;
        let anchor_before = geometry::rotate_point(Point::new(0.0, 0.0), original.center(), rotation);

        let resized = apply_resize(&original, rotation, ResizeHandle::BottomRight, Vec2::new(40.0, 20.0), 10.0, None);
        assert!((resized.width - 140.0).abs() < 1e-9);
        assert!((resized.height - 70.0).abs() < 1e-9);

        let anchor_after = geometry::rotate_point(resized.origin(), resized.center(), rotation);
        assert!((anchor_after.x - anchor_before.x).abs() < 1e-9);
        assert!((anchor_after.y - anchor_before.y).abs() < 1e-9);
    }

    #[test]
    fn test_apply_rotation() {
        let center = Point::new(0.0, 0.0);
        let rotated = apply_rotation(10.0, center, Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        assert!((rotated - 100.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn resize_never_goes_below_floor(
            handle_index in 0usize..8,
            dx in -500f64..500.0,
            dy in -500f64..500.0,
            x in -100f64..100.0,
            y in -100f64..100.0,
            w in 10f64..300.0,
            h in 10f64..300.0,
            grid in prop::option::of(prop::sample::select(vec![5.0, 8.0, 20.0, 25.0])),
        ) {
            let handle = ResizeHandle::ALL[handle_index];
            let original = Bounds::new(x, y, w, h);
            let resized = apply_resize(&original, 0.0, handle, Vec2::new(dx, dy), 10.0, grid);

            prop_assert!(resized.width >= 10.0 - 1e-9);
            prop_assert!(resized.height >= 10.0 - 1e-9);

            if handle.moves_left() {
                prop_assert!((resized.right() - original.right()).abs() < 1e-9);
            }
            if handle.moves_right() {
                prop_assert!((resized.x - original.x).abs() < 1e-9);
            }
            if handle.moves_top() {
                prop_assert!((resized.bottom() - original.bottom()).abs() < 1e-9);
            }
            if handle.moves_bottom() {
                prop_assert!((resized.y - original.y).abs() < 1e-9);
            }

            if let Some(g) = grid {
                let on_grid = |v: f64| ((v / g).round() * g - v).abs() < 1e-6;
                if handle.moves_left() || handle.moves_right() {
                    prop_assert!(on_grid(resized.width), "width {} off a {} grid", resized.width, g);
                }
                if handle.moves_top() || handle.moves_bottom() {
                    prop_assert!(on_grid(resized.height), "height {} off a {} grid", resized.height, g);
                }
            }
        }
    }
}
