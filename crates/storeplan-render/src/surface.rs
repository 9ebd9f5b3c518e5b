//! Drawing surface abstraction and the recording backend.

use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Color;
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Restore called without a matching save")]
    UnbalancedRestore,
    #[error("Invalid view size {width}x{height}")]
    InvalidViewSize { width: f64, height: f64 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// 2D canvas a painter draws onto.
///
/// Mirrors an immediate-mode canvas: `transform` post-multiplies the current
/// matrix, `save`/`restore` push and pop it.
pub trait Surface {
    /// Wipe the surface and reset its state.
    fn clear(&mut self, color: Color);

    fn save(&mut self);

    fn restore(&mut self) -> RenderResult<()>;

    fn transform(&mut self, affine: Affine);

    fn fill(&mut self, path: &BezPath, color: Color);

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    fn text(&mut self, position: Point, text: &str, size: f64, color: Color);
}

/// A single recorded draw call. Paths are stored in document coordinates
/// together with the matrix that was current when they were issued.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear(Color),
    Save,
    Restore,
    Transform(Affine),
    Fill {
        path: BezPath,
        color: Color,
        transform: Affine,
    },
    Stroke {
        path: BezPath,
        stroke: Stroke,
        color: Color,
        transform: Affine,
    },
    Text {
        position: Point,
        text: String,
        size: f64,
        color: Color,
        transform: Affine,
    },
}

/// Display-list surface. Hosts replay the commands onto their own canvas.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    current: Affine,
    stack: Vec<Affine>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn current_transform(&self) -> Affine {
        self.current
    }

    /// Number of unmatched saves.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count()
    }

    /// Every text string drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.stack.clear();
        self.current = Affine::IDENTITY;
        self.commands.push(DrawCommand::Clear(color));
    }

    fn save(&mut self) {
        self.stack.push(self.current);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) -> RenderResult<()> {
        self.current = self.stack.pop().ok_or(RenderError::UnbalancedRestore)?;
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn transform(&mut self, affine: Affine) {
        self.current *= affine;
        self.commands.push(DrawCommand::Transform(affine));
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
            transform: self.current,
        });
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
            transform: self.current,
        });
    }

    fn text(&mut self, position: Point, text: &str, size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            size,
            color,
            transform: self.current,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape, Vec2};

    #[test]
    fn test_save_restore_tracks_transform() {
        let mut surface = RecordingSurface::new();
        surface.transform(Affine::scale(2.0));
        surface.save();
        surface.transform(Affine::translate(Vec2::new(10.0, 0.0)));
        assert_eq!(surface.current_transform() * Point::ZERO, Point::new(20.0, 0.0));
        surface.restore().unwrap();
        assert_eq!(surface.current_transform(), Affine::scale(2.0));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_unbalanced_restore() {
        let mut surface = RecordingSurface::new();
        assert!(matches!(surface.restore(), Err(RenderError::UnbalancedRestore)));
    }

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut surface = RecordingSurface::new();
        let path = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
        surface.fill(&path, Color::BLACK);
        surface.save();
        surface.clear(Color::WHITE);
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.fill_count(), 0);
    }

    #[test]
    fn test_commands_capture_current_matrix() {
        let mut surface = RecordingSurface::new();
        surface.transform(Affine::translate(Vec2::new(5.0, 5.0)));
        surface.text(Point::ZERO, "A1", 12.0, Color::BLACK);
        match &surface.commands()[1] {
            DrawCommand::Text { transform, .. } => {
                assert_eq!(*transform * Point::ZERO, Point::new(5.0, 5.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(surface.texts(), vec!["A1"]);
    }
}
