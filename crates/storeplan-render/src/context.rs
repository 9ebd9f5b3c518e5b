//! Per-frame render inputs.

use kurbo::Size;
use peniko::Color;
use storeplan_core::geometry::Bounds;
use storeplan_core::snap::AlignmentGuide;
use storeplan_core::{EditorConfig, SceneSnapshot};

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Full grid lines.
    #[default]
    Lines,
    /// Only dots at intersections.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::Lines,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Colors used by the scene painter.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Area outside the floor plan.
    pub background: Color,
    /// Floor plan fill.
    pub document: Color,
    pub document_border: Color,
    pub grid: Color,
    pub wall: Color,
    pub fixture_fill: Color,
    pub fixture_stroke: Color,
    pub fixture_detail: Color,
    pub label: Color,
    pub selection: Color,
    pub marquee_fill: Color,
    pub guide: Color,
    pub preview: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(250, 250, 250, 255),
            document: Color::WHITE,
            document_border: Color::from_rgba8(203, 213, 225, 255),
            grid: Color::from_rgba8(200, 200, 200, 100),
            wall: Color::from_rgba8(51, 65, 85, 255),
            fixture_fill: Color::from_rgba8(226, 232, 240, 255),
            fixture_stroke: Color::from_rgba8(71, 85, 105, 255),
            fixture_detail: Color::from_rgba8(148, 163, 184, 255),
            label: Color::from_rgba8(30, 41, 59, 255),
            selection: Color::from_rgba8(59, 130, 246, 255), // Blue
            marquee_fill: Color::from_rgba8(59, 130, 246, 25),
            guide: Color::from_rgba8(236, 72, 153, 180), // Pink-500 with alpha
            preview: Color::from_rgba8(59, 130, 246, 200),
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a SceneSnapshot,
    /// Surface size in pixels.
    pub view_size: Size,
    pub palette: Palette,
    pub grid_style: GridStyle,
    /// Floor plan extent in document coordinates, if the host has one.
    pub document_bounds: Option<Bounds>,
    /// Marquee rectangle in document coordinates.
    pub marquee: Option<Bounds>,
    pub guides: &'a [AlignmentGuide],
    /// Drawn resize handle edge length, in pixels.
    pub handle_size: f64,
    /// Rotation handle distance above the top edge, in pixels.
    pub rotation_handle_offset: f64,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a SceneSnapshot, view_size: Size) -> Self {
        let config = EditorConfig::default();
        Self {
            scene,
            view_size,
            palette: Palette::default(),
            grid_style: GridStyle::Lines,
            document_bounds: None,
            marquee: None,
            guides: &[],
            handle_size: config.handle_size,
            rotation_handle_offset: config.rotation_handle_offset,
        }
    }

    /// Take handle metrics from the editor configuration.
    pub fn with_config(mut self, config: &EditorConfig) -> Self {
        self.handle_size = config.handle_size;
        self.rotation_handle_offset = config.rotation_handle_offset;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_document_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.document_bounds = bounds;
        self
    }

    pub fn with_marquee(mut self, marquee: Option<Bounds>) -> Self {
        self.marquee = marquee;
        self
    }

    pub fn with_guides(mut self, guides: &'a [AlignmentGuide]) -> Self {
        self.guides = guides;
        self
    }

    pub fn zoom(&self) -> f64 {
        self.scene.viewport.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeplan_core::SceneStore;

    #[test]
    fn test_grid_style_cycle() {
        assert_eq!(GridStyle::Lines.next(), GridStyle::Dots);
        assert_eq!(GridStyle::Dots.next().name(), "Lines");
    }

    #[test]
    fn test_with_config_overrides_handles() {
        let snapshot = SceneStore::default().snapshot();
        let config = EditorConfig {
            handle_size: 12.0,
            rotation_handle_offset: 40.0,
            ..EditorConfig::default()
        };
        let ctx = RenderContext::new(&snapshot, Size::new(800.0, 600.0)).with_config(&config);
        assert_eq!(ctx.handle_size, 12.0);
        assert_eq!(ctx.rotation_handle_offset, 40.0);
        assert!(ctx.guides.is_empty());
    }
}
