//! Viewport state and screen/document coordinate conversion.

use crate::config::EditorConfig;
use crate::geometry::Bounds;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Convert a window-space point into document space.
///
/// `origin_offset` is the position of the drawing surface inside the window.
/// Pan and zoom change mid-gesture, so callers convert every event afresh.
pub fn screen_to_document(screen_point: Point, origin_offset: Vec2, pan: Vec2, zoom: f64) -> Point {
    let local = screen_point - origin_offset - pan;
    Point::new(local.x / zoom, local.y / zoom)
}

/// Inverse of [`screen_to_document`].
pub fn document_to_screen(document_point: Point, origin_offset: Vec2, pan: Vec2, zoom: f64) -> Point {
    Point::new(document_point.x * zoom, document_point.y * zoom) + pan + origin_offset
}

/// Zoom, pan and grid state of the editor view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Scale factor from document units to surface pixels.
    pub zoom: f64,
    /// Surface-space translation applied after scaling.
    pub pan: Vec2,
    pub grid_enabled: bool,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            zoom: 1.0_f64.clamp(config.min_zoom, config.max_zoom),
            pan: Vec2::ZERO,
            grid_enabled: config.grid_enabled,
            grid_size: config.grid_size,
            snap_to_grid: config.snap_to_grid,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    /// Document-to-surface transform used for painting.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Convert a window-space point given the surface origin.
    pub fn screen_to_document(&self, screen_point: Point, origin_offset: Vec2) -> Point {
        screen_to_document(screen_point, origin_offset, self.pan, self.zoom)
    }

    pub fn document_to_screen(&self, document_point: Point, origin_offset: Vec2) -> Point {
        document_to_screen(document_point, origin_offset, self.pan, self.zoom)
    }

    /// Set the zoom, clamped to the configured range.
    ///
    /// Returns `false` when the requested value had to be clamped.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let clamped = if zoom.is_finite() {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.zoom
        };
        self.zoom = clamped;
        clamped == zoom
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Pan by a surface-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Zoom by `factor`, keeping the document point under `surface_point` fixed.
    ///
    /// `surface_point` is relative to the drawing surface origin. Returns
    /// `false` when the resulting zoom had to be clamped.
    pub fn zoom_at(&mut self, surface_point: Point, factor: f64) -> bool {
        let requested = self.zoom * factor;
        if !requested.is_finite() {
            return false;
        }
        let new_zoom = requested.clamp(self.min_zoom, self.max_zoom);
        let unclamped = new_zoom == requested;
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return unclamped;
        }

        let anchor = self.screen_to_document(surface_point, Vec2::ZERO);
        self.zoom = new_zoom;

        // Shift the pan so the anchor lands back under the cursor
        self.pan = surface_point.to_vec2() - anchor.to_vec2() * self.zoom;
        unclamped
    }

    /// Document-space area visible on a surface of `view_size` pixels.
    pub fn visible_bounds(&self, view_size: Size) -> Bounds {
        let top_left = self.screen_to_document(Point::ZERO, Vec2::ZERO);
        let bottom_right =
            self.screen_to_document(Point::new(view_size.width, view_size.height), Vec2::ZERO);
        Bounds::from_points(top_left, bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.pan, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
        assert!((viewport.grid_size - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_document_formula() {
        let doc = screen_to_document(
            Point::new(250.0, 140.0),
            Vec2::new(50.0, 40.0),
            Vec2::new(100.0, 0.0),
            2.0,
        );
        assert!((doc.x - 50.0).abs() < f64::EPSILON);
        assert!((doc.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::default();
        viewport.pan = Vec2::new(30.0, -20.0);
        viewport.zoom = 1.5;
        let origin = Vec2::new(12.0, 64.0);

        let original = Point::new(123.0, 456.0);
        let doc = viewport.screen_to_document(original, origin);
        let back = viewport.document_to_screen(doc, origin);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_transform_matches_conversion() {
        let mut viewport = Viewport::default();
        viewport.pan = Vec2::new(8.0, 16.0);
        viewport.zoom = 3.0;
        let p = Point::new(5.0, 7.0);
        let via_affine = viewport.transform() * p;
        let via_fn = viewport.document_to_screen(p, Vec2::ZERO);
        assert!((via_affine.x - via_fn.x).abs() < 1e-10);
        assert!((via_affine.y - via_fn.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_cursor_point() {
        let mut viewport = Viewport::default();
        viewport.pan = Vec2::new(-40.0, 25.0);
        let cursor = Point::new(320.0, 180.0);
        let before = viewport.screen_to_document(cursor, Vec2::ZERO);

        assert!(viewport.zoom_at(cursor, 1.1));

        let after = viewport.document_to_screen(before, Vec2::ZERO);
        assert!((after.x - cursor.x).abs() < 1e-9);
        assert!((after.y - cursor.y).abs() < 1e-9);
        assert!((viewport.zoom - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::default();
        assert!(!viewport.zoom_at(Point::ZERO, 0.001));
        assert!((viewport.zoom - viewport.min_zoom).abs() < f64::EPSILON);

        viewport.zoom = 1.0;
        assert!(!viewport.zoom_at(Point::ZERO, 1000.0));
        assert!((viewport.zoom - viewport.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_zoom_reports_clamping() {
        let mut viewport = Viewport::default();
        assert!(viewport.set_zoom(2.0));
        assert!(!viewport.set_zoom(50.0));
        assert!((viewport.zoom - 5.0).abs() < f64::EPSILON);
        assert!(!viewport.set_zoom(f64::NAN));
        assert!((viewport.zoom - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_bounds() {
        let mut viewport = Viewport::default();
        viewport.zoom = 2.0;
        viewport.pan = Vec2::new(100.0, 0.0);
        let visible = viewport.visible_bounds(Size::new(800.0, 600.0));
        assert!((visible.x + 50.0).abs() < 1e-10);
        assert!((visible.width - 400.0).abs() < 1e-10);
        assert!((visible.height - 300.0).abs() < 1e-10);
    }
}
