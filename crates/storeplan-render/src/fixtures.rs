//! Paint routines for each element kind, in the element's unrotated frame.

use crate::context::Palette;
use crate::surface::Surface;
use kurbo::{BezPath, Cap, Ellipse, Point, Rect, RoundedRect, Shape, Stroke};
use peniko::Color;
use storeplan_core::elements::{BargainBin, Counter, EndCap, Gondola, Rectangle, Wall};
use storeplan_core::{Element, ElementKind};

const TOLERANCE: f64 = 0.1;

/// Paints one element kind. `zoom` keeps hairlines a constant screen width.
pub(crate) struct FixturePainter<'a, S: Surface + ?Sized> {
    pub surface: &'a mut S,
    pub palette: &'a Palette,
    pub zoom: f64,
}

impl<S: Surface + ?Sized> FixturePainter<'_, S> {
    pub fn paint(&mut self, element: &Element) {
        let rect = element.bounds.to_rect();
        match &element.kind {
            ElementKind::Rectangle(r) => self.rectangle(rect, r),
            ElementKind::Wall(w) => self.wall(w),
            ElementKind::Counter(c) => self.counter(rect, c),
            ElementKind::Gondola(g) => self.gondola(rect, g),
            ElementKind::EndCap(e) => self.end_cap(rect, e),
            ElementKind::BargainBin(b) => self.bargain_bin(rect, b),
        }
    }

    fn hairline(&self, width: f64) -> Stroke {
        Stroke::new(width / self.zoom)
    }

    fn body(&mut self, path: &BezPath) {
        self.surface.fill(path, self.palette.fixture_fill);
        let stroke = self.hairline(1.5);
        self.surface.stroke(path, &stroke, self.palette.fixture_stroke);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.surface.stroke(&path, stroke, color);
    }

    /// `count - 1` lines splitting `rect` into equal bands. Bands run along
    /// the long side.
    fn bands(&mut self, rect: Rect, count: u32) {
        if count < 2 {
            return;
        }
        let stroke = self.hairline(1.0);
        let color = self.palette.fixture_detail;
        let horizontal = rect.width() >= rect.height();
        for i in 1..count {
            let t = f64::from(i) / f64::from(count);
            if horizontal {
                let y = rect.y0 + rect.height() * t;
                self.line(Point::new(rect.x0, y), Point::new(rect.x1, y), &stroke, color);
            } else {
                let x = rect.x0 + rect.width() * t;
                self.line(Point::new(x, rect.y0), Point::new(x, rect.y1), &stroke, color);
            }
        }
    }

    fn label(&mut self, rect: Rect, text: &str) {
        let size = 12.0 / self.zoom;
        // rough centring; hosts with real text layout can re-centre
        let width = text.chars().count() as f64 * size * 0.55;
        let position = Point::new(rect.center().x - width / 2.0, rect.center().y + size / 3.0);
        self.surface.text(position, text, size, self.palette.label);
    }

    fn rectangle(&mut self, rect: Rect, rectangle: &Rectangle) {
        let path = rect.to_path(TOLERANCE);
        self.surface.fill(&path, rectangle.fill.into());
        let stroke = self.hairline(1.5);
        self.surface.stroke(&path, &stroke, rectangle.stroke.into());
        if let Some(label) = &rectangle.label {
            self.label(rect, label);
        }
    }

    fn wall(&mut self, wall: &Wall) {
        let stroke = Stroke::new(wall.thickness).with_caps(Cap::Square);
        self.line(wall.start_point, wall.end_point, &stroke, self.palette.wall);
    }

    fn counter(&mut self, rect: Rect, counter: &Counter) {
        self.body(&rect.to_path(TOLERANCE));
        if counter.has_storage {
            // storage shelf along the back edge
            let depth = rect.height() * 0.25;
            let storage = Rect::new(rect.x0, rect.y1 - depth, rect.x1, rect.y1);
            self.surface.fill(&storage.to_path(TOLERANCE), self.palette.fixture_detail);
        }
        let stroke = self.hairline(1.0);
        let color = self.palette.fixture_stroke;
        let stations = counter.stations.max(1);
        for i in 1..stations {
            let x = rect.x0 + rect.width() * f64::from(i) / f64::from(stations);
            self.line(Point::new(x, rect.y0), Point::new(x, rect.y1), &stroke, color);
        }
    }

    fn gondola(&mut self, rect: Rect, gondola: &Gondola) {
        self.body(&rect.to_path(TOLERANCE));
        if gondola.double_sided {
            let half = if rect.width() >= rect.height() {
                Rect::new(rect.x0, rect.y0, rect.x1, rect.center().y)
            } else {
                Rect::new(rect.x0, rect.y0, rect.center().x, rect.y1)
            };
            let other = half + flip_offset(rect, half);
            self.bands(half, gondola.shelves);
            self.bands(other, gondola.shelves);
            let spine = self.hairline(2.0);
            let (a, b) = spine_points(rect);
            self.line(a, b, &spine, self.palette.fixture_stroke);
        } else {
            self.bands(rect, gondola.shelves);
        }
    }

    fn end_cap(&mut self, rect: Rect, end_cap: &EndCap) {
        self.body(&rect.to_path(TOLERANCE));
        self.bands(rect, end_cap.shelves);
        if end_cap.attached_to.is_some() {
            // heavier edge on the side joined to the gondola
            let stroke = self.hairline(3.0);
            self.line(
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
                &stroke,
                self.palette.fixture_stroke,
            );
        }
    }

    fn bargain_bin(&mut self, rect: Rect, bin: &BargainBin) {
        let stroke = self.hairline(1.0);
        let color = self.palette.fixture_detail;
        if bin.round {
            self.body(&Ellipse::from_rect(rect).to_path(TOLERANCE));
            // dividers are diameters, evenly spaced in angle
            let center = rect.center();
            let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
            for i in 0..bin.dividers {
                let angle = std::f64::consts::PI * f64::from(i) / f64::from(bin.dividers);
                let (sin, cos) = angle.sin_cos();
                let offset = kurbo::Vec2::new(rx * cos, ry * sin);
                self.line(center - offset, center + offset, &stroke, color);
            }
        } else {
            let radius = rect.width().min(rect.height()) * 0.1;
            self.body(&RoundedRect::from_rect(rect, radius).to_path(TOLERANCE));
            let count = bin.dividers + 1;
            for i in 1..count {
                let x = rect.x0 + rect.width() * f64::from(i) / f64::from(count);
                self.line(Point::new(x, rect.y0), Point::new(x, rect.y1), &stroke, color);
            }
        }
    }
}

/// Offset moving the first half of a double-sided gondola onto its second half.
fn flip_offset(rect: Rect, half: Rect) -> kurbo::Vec2 {
    if rect.width() >= rect.height() {
        kurbo::Vec2::new(0.0, half.height())
    } else {
        kurbo::Vec2::new(half.width(), 0.0)
    }
}

/// Center line along the long side.
fn spine_points(rect: Rect) -> (Point, Point) {
    let c = rect.center();
    if rect.width() >= rect.height() {
        (Point::new(rect.x0, c.y), Point::new(rect.x1, c.y))
    } else {
        (Point::new(c.x, rect.y0), Point::new(c.x, rect.y1))
    }
}
