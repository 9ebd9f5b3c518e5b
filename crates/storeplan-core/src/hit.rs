//! Element hit-testing.

use crate::elements::Element;
use crate::geometry::{self, Bounds};
use kurbo::Point;

/// Elements sorted by ascending z-index. Equal z-indices keep scene order.
pub fn paint_order(elements: &[Element]) -> Vec<&Element> {
    let mut ordered: Vec<&Element> = elements.iter().collect();
    ordered.sort_by_key(|element| element.z_index);
    ordered
}

/// Whether `point` falls inside the element, taking rotation into account.
pub fn element_contains_point(element: &Element, point: Point) -> bool {
    geometry::is_point_in_rotated_rect(point, &element.bounds, element.rotation())
}

/// Topmost visible element at `point`.
pub fn find_element_at_position(elements: &[Element], point: Point) -> Option<&Element> {
    paint_order(elements)
        .into_iter()
        .rev()
        .find(|element| element.is_visible && element_contains_point(element, point))
}

/// Visible elements touched by the rectangle spanning `start` and `end`.
///
/// Unrotated elements are tested by bounds overlap. Rotated elements only
/// count when one of their rotated corners lies inside the rectangle, so an
/// edge crossing the area without a corner inside is not picked up.
pub fn find_elements_in_area(elements: &[Element], start: Point, end: Point) -> Vec<&Element> {
    let area = Bounds::from_points(start, end);
    elements
        .iter()
        .filter(|element| element.is_visible)
        .filter(|element| {
            if element.is_rotated() {
                element
                    .corners()
                    .iter()
                    .any(|corner| geometry::is_point_in_rect(*corner, &area))
            } else {
                area.intersects(&element.bounds)
            }
        })
        .collect()
}
