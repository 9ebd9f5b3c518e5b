//! Full-scene redraw.
//!
//! Every frame repaints everything in a fixed order: background and
//! document, grid, elements by ascending z-index, selection chrome, marquee
//! and finally alignment guides. Chrome widths are divided by the zoom so
//! they keep a constant on-screen size.

use crate::context::{GridStyle, Palette, RenderContext};
use crate::fixtures::FixturePainter;
use crate::surface::{RenderError, RenderResult, Surface};
use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Shape, Stroke};
use storeplan_core::geometry::Bounds;
use storeplan_core::selection::{self, ResizeHandle};
use storeplan_core::snap::{AlignmentGuide, GuideOrientation};
use storeplan_core::Element;

const TOLERANCE: f64 = 0.1;

/// Text shown on rotated elements in place of resize handles.
pub const ROTATION_LOCK_NOTICE: &str = "Rotation lock: reset rotation to resize";

/// Immediate-mode scene painter.
#[derive(Debug, Clone)]
pub struct ScenePainter {
    zoom: f64,
    palette: Palette,
}

impl Default for ScenePainter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenePainter {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            palette: Palette::default(),
        }
    }

    /// Redraw the whole scene onto `surface`.
    pub fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &RenderContext) -> RenderResult<()> {
        let view = ctx.view_size;
        if !(view.width.is_finite() && view.height.is_finite()) || view.width <= 0.0 || view.height <= 0.0 {
            return Err(RenderError::InvalidViewSize {
                width: view.width,
                height: view.height,
            });
        }
        let viewport = &ctx.scene.viewport;
        self.zoom = viewport.zoom;
        self.palette = ctx.palette;

        surface.clear(self.palette.background);
        surface.save();
        surface.transform(viewport.transform());

        let visible = viewport.visible_bounds(view);
        if let Some(document) = ctx.document_bounds {
            self.render_document(surface, document);
        }
        if viewport.grid_enabled {
            self.render_grid(surface, ctx.grid_style, visible, viewport.grid_size);
        }

        for element in ctx.scene.paint_order() {
            if element.is_visible {
                self.render_element(surface, element)?;
            }
        }

        for element in ctx.scene.selected_elements() {
            if element.is_visible {
                self.render_selection(surface, ctx, element)?;
            }
        }

        if let Some(marquee) = ctx.marquee {
            self.render_marquee(surface, marquee);
        }
        self.render_guides(surface, ctx.guides);

        surface.restore()
    }

    fn dashed(&self, width: f64) -> Stroke {
        let dash_len = 4.0 / self.zoom;
        Stroke::new(width / self.zoom).with_dashes(0.0, [dash_len, dash_len])
    }

    fn render_document<S: Surface + ?Sized>(&self, surface: &mut S, document: Bounds) {
        let path = document.to_rect().to_path(TOLERANCE);
        surface.fill(&path, self.palette.document);
        surface.stroke(&path, &Stroke::new(1.0 / self.zoom), self.palette.document_border);
    }

    /// Grid over the visible area only, snapped outward to whole cells.
    fn render_grid<S: Surface + ?Sized>(&self, surface: &mut S, style: GridStyle, visible: Bounds, grid_size: f64) {
        if !(grid_size.is_finite() && grid_size > 0.0) {
            return;
        }
        let start_x = (visible.x / grid_size).floor() * grid_size;
        let start_y = (visible.y / grid_size).floor() * grid_size;
        let end_x = (visible.right() / grid_size).ceil() * grid_size;
        let end_y = (visible.bottom() / grid_size).ceil() * grid_size;
        let columns = ((end_x - start_x) / grid_size).round() as usize;
        let rows = ((end_y - start_y) / grid_size).round() as usize;

        // Batch the whole grid into a single path
        let mut path = BezPath::new();
        match style {
            GridStyle::Lines => {
                for i in 0..=columns {
                    let x = start_x + i as f64 * grid_size;
                    path.move_to(Point::new(x, start_y));
                    path.line_to(Point::new(x, end_y));
                }
                for j in 0..=rows {
                    let y = start_y + j as f64 * grid_size;
                    path.move_to(Point::new(start_x, y));
                    path.line_to(Point::new(end_x, y));
                }
                surface.stroke(&path, &Stroke::new(0.5 / self.zoom), self.palette.grid);
            }
            GridStyle::Dots => {
                let dot_size = 1.5 / self.zoom;
                for i in 0..=columns {
                    for j in 0..=rows {
                        let center = Point::new(start_x + i as f64 * grid_size, start_y + j as f64 * grid_size);
                        let dot = Rect::from_center_size(center, (dot_size * 2.0, dot_size * 2.0));
                        path.extend(dot.path_elements(TOLERANCE));
                    }
                }
                surface.fill(&path, self.palette.grid);
            }
        }
    }

    /// Run `draw` in the element's rotated frame.
    fn in_element_frame<S, F>(&self, surface: &mut S, element: &Element, draw: F) -> RenderResult<()>
    where
        S: Surface + ?Sized,
        F: FnOnce(&mut S),
    {
        if !element.is_rotated() {
            draw(surface);
            return Ok(());
        }
        surface.save();
        surface.transform(Affine::rotate_about(
            element.rotation().to_radians(),
            element.center(),
        ));
        draw(surface);
        surface.restore()
    }

    fn render_element<S: Surface + ?Sized>(&self, surface: &mut S, element: &Element) -> RenderResult<()> {
        self.in_element_frame(surface, element, |surface| {
            FixturePainter {
                surface,
                palette: &self.palette,
                zoom: self.zoom,
            }
            .paint(element);
        })
    }

    fn render_selection<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        ctx: &RenderContext,
        element: &Element,
    ) -> RenderResult<()> {
        let color = self.palette.selection;
        let pad = 4.0 / self.zoom;
        let handle = ctx.handle_size / self.zoom;
        let rect = element.bounds.to_rect();

        self.in_element_frame(surface, element, |surface| {
            let outline = RoundedRect::from_rect(rect.inflate(pad, pad), pad).to_path(TOLERANCE);
            surface.stroke(&outline, &self.dashed(1.5), color);

            if element.is_locked {
                return;
            }
            if element.is_rotated() {
                let size = 11.0 / self.zoom;
                let position = Point::new(rect.x0, rect.y1 + pad + size * 1.5);
                surface.text(position, ROTATION_LOCK_NOTICE, size, color);
                return;
            }
            for h in ResizeHandle::ALL {
                let center = h.local_position(&element.bounds);
                let square = Rect::from_center_size(center, (handle, handle)).to_path(TOLERANCE);
                surface.fill(&square, peniko::Color::WHITE);
                surface.stroke(&square, &Stroke::new(1.5 / self.zoom), color);
            }
        })?;

        if element.is_locked {
            return Ok(());
        }
        // rotation handle, drawn in document space at its rotated position
        let top = selection::rotation_handle_position(element, 0.0);
        let knob = selection::rotation_handle_position(element, ctx.rotation_handle_offset / self.zoom);
        let mut stem = BezPath::new();
        stem.move_to(top);
        stem.line_to(knob);
        surface.stroke(&stem, &Stroke::new(1.0 / self.zoom), color);
        let circle = Circle::new(knob, handle / 2.0).to_path(TOLERANCE);
        surface.fill(&circle, peniko::Color::WHITE);
        surface.stroke(&circle, &Stroke::new(1.5 / self.zoom), color);
        Ok(())
    }

    fn render_marquee<S: Surface + ?Sized>(&self, surface: &mut S, marquee: Bounds) {
        let path = marquee.to_rect().to_path(TOLERANCE);
        surface.fill(&path, self.palette.marquee_fill);
        surface.stroke(&path, &self.dashed(1.0), self.palette.selection);
    }

    fn render_guides<S: Surface + ?Sized>(&self, surface: &mut S, guides: &[AlignmentGuide]) {
        let stroke = self.dashed(1.0);
        for guide in guides {
            let (from, to) = match guide.orientation {
                GuideOrientation::Vertical => (
                    Point::new(guide.position, guide.start),
                    Point::new(guide.position, guide.end),
                ),
                GuideOrientation::Horizontal => (
                    Point::new(guide.start, guide.position),
                    Point::new(guide.end, guide.position),
                ),
            };
            let mut path = BezPath::new();
            path.move_to(from);
            path.line_to(to);
            surface.stroke(&path, &stroke, self.palette.guide);
        }
    }
}
