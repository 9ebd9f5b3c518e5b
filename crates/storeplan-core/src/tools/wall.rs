//! Two-click wall drawing tool.

use crate::config::EditorConfig;
use crate::elements::{ElementDraft, ElementKind, Wall};
use crate::geometry;
use crate::snap;
use kurbo::Point;

/// Segment shown while a wall is being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPreview {
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
}

impl WallPreview {
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum WallToolState {
    #[default]
    Idle,
    Drawing {
        start: Point,
        current: Point,
    },
}

/// Wall tool.
///
/// The first press records the start point. A drag released far enough away
/// finishes the wall; otherwise the tool waits for a second press. Segments
/// shorter than the minimum length are dropped without creating anything.
/// After finishing, the tool is idle and ready for the next wall.
#[derive(Debug, Clone)]
pub struct WallTool {
    state: WallToolState,
    pub thickness: f64,
    pub min_length: f64,
    pub angle_snap_degrees: f64,
}

impl Default for WallTool {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl WallTool {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: WallToolState::Idle,
            thickness: config.default_wall_thickness,
            min_length: config.min_wall_length,
            angle_snap_degrees: config.rotation_snap_degrees,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, WallToolState::Drawing { .. })
    }

    pub fn preview(&self) -> Option<WallPreview> {
        match self.state {
            WallToolState::Idle => None,
            WallToolState::Drawing { start, current } => Some(WallPreview {
                start,
                end: current,
                thickness: self.thickness,
            }),
        }
    }

    /// Press at `point`. Returns a draft when this press finishes a wall.
    pub fn pointer_down(
        &mut self,
        point: Point,
        grid_size: Option<f64>,
        snap_angle: bool,
    ) -> Option<ElementDraft> {
        match self.state {
            WallToolState::Idle => {
                let start = snap_to(point, grid_size);
                self.state = WallToolState::Drawing {
                    start,
                    current: start,
                };
                None
            }
            WallToolState::Drawing { start, .. } => {
                let end = self.constrain(start, point, grid_size, snap_angle);
                self.finish(start, end)
            }
        }
    }

    /// Update the preview. Returns `true` when the preview changed.
    pub fn pointer_move(&mut self, point: Point, grid_size: Option<f64>, snap_angle: bool) -> bool {
        let WallToolState::Drawing { start, current } = self.state else {
            return false;
        };
        let end = self.constrain(start, point, grid_size, snap_angle);
        if end == current {
            return false;
        }
        self.state = WallToolState::Drawing { start, current: end };
        true
    }

    /// Release at `point`. Finishes a dragged wall that is long enough.
    pub fn pointer_up(
        &mut self,
        point: Point,
        grid_size: Option<f64>,
        snap_angle: bool,
    ) -> Option<ElementDraft> {
        let WallToolState::Drawing { start, .. } = self.state else {
            return None;
        };
        let end = self.constrain(start, point, grid_size, snap_angle);
        if start.distance(end) < self.min_length {
            // treat as the first click of a two-click draw
            self.state = WallToolState::Drawing { start, current: end };
            return None;
        }
        self.finish(start, end)
    }

    /// Drop any wall in progress.
    pub fn cancel(&mut self) {
        self.state = WallToolState::Idle;
    }

    fn constrain(&self, start: Point, point: Point, grid_size: Option<f64>, snap_angle: bool) -> Point {
        let end = snap_to(point, grid_size);
        if !snap_angle {
            return end;
        }
        let length = start.distance(end);
        if length < f64::EPSILON {
            return end;
        }
        let angle = geometry::snap_angle_to_interval(
            geometry::angle_between(start, end),
            self.angle_snap_degrees,
            true,
        );
        let (sin, cos) = angle.to_radians().sin_cos();
        Point::new(start.x + length * cos, start.y + length * sin)
    }

    fn finish(&mut self, start: Point, end: Point) -> Option<ElementDraft> {
        self.state = WallToolState::Idle;
        if start.distance(end) < self.min_length {
            log::debug!("Wall shorter than {} discarded", self.min_length);
            return None;
        }
        let wall = Wall::new(start, end, self.thickness);
        let bounds = wall.bounds();
        Some(ElementDraft::new(ElementKind::Wall(wall), bounds))
    }
}

fn snap_to(point: Point, grid_size: Option<f64>) -> Point {
    grid_size.map_or(point, |g| snap::snap_point_to_grid(point, g))
}
