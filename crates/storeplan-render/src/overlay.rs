//! Wall preview overlay.
//!
//! The preview lives on its own surface stacked above the scene, so moving
//! the pointer while drawing repaints only this layer. It repaints when the
//! preview or the view transform changes and is left untouched otherwise.

use crate::context::Palette;
use crate::surface::{RenderResult, Surface};
use kurbo::{Affine, BezPath, Cap, Circle, Shape, Stroke};
use peniko::Color;
use storeplan_core::{Interaction, Viewport, WallPreview};

/// Tracks what the overlay surface currently shows.
#[derive(Debug, Clone, Default)]
pub struct PreviewOverlay {
    drawn: Option<(u64, Affine)>,
}

impl PreviewOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next [`PreviewOverlay::update`] to repaint.
    pub fn invalidate(&mut self) {
        self.drawn = None;
    }

    /// Repaint `surface` if the wall preview changed since the last call.
    /// Returns whether anything was drawn.
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        interaction: &Interaction,
        viewport: &Viewport,
        palette: &Palette,
    ) -> RenderResult<bool> {
        let key = (interaction.preview_revision(), viewport.transform());
        if self.drawn == Some(key) {
            return Ok(false);
        }
        log::trace!("Repainting wall preview, revision {}", key.0);
        self.drawn = Some(key);

        surface.clear(Color::TRANSPARENT);
        if let Some(preview) = interaction.wall_preview() {
            surface.save();
            surface.transform(key.1);
            paint_preview(surface, &preview, viewport.zoom, palette);
            surface.restore()?;
        }
        Ok(true)
    }
}

fn paint_preview<S: Surface + ?Sized>(surface: &mut S, preview: &WallPreview, zoom: f64, palette: &Palette) {
    let mut path = BezPath::new();
    path.move_to(preview.start);
    path.line_to(preview.end);

    // translucent band showing the final wall footprint
    let band = Stroke::new(preview.thickness).with_caps(Cap::Square);
    surface.stroke(&path, &band, palette.preview.with_alpha(0.25));

    let dash_len = 6.0 / zoom;
    let dashed = Stroke::new(2.0 / zoom).with_dashes(0.0, [dash_len, dash_len]);
    surface.stroke(&path, &dashed, palette.preview);

    let anchor = Circle::new(preview.start, 3.0 / zoom).to_path(0.1);
    surface.fill(&anchor, palette.preview);

    let size = 11.0 / zoom;
    let midpoint = preview.start.midpoint(preview.end);
    surface.text(
        midpoint + kurbo::Vec2::new(size * 0.5, -size * 0.5),
        &format!("{:.0}", preview.length()),
        size,
        palette.label,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use kurbo::{Point, Vec2};
    use storeplan_core::{DrawingMode, EditorConfig, Modifiers, PointerButton, SceneStore};

    fn drawing() -> (SceneStore, Interaction) {
        let mut store = SceneStore::new(EditorConfig {
            snap_to_grid: false,
            ..EditorConfig::default()
        });
        let mut interaction = Interaction::new(&store);
        interaction.enter_drawing_mode(&mut store, DrawingMode::Wall);
        interaction.pointer_down(&mut store, Point::ZERO, PointerButton::Primary, Modifiers::NONE);
        interaction.pointer_up(&mut store, Point::ZERO, Modifiers::NONE);
        (store, interaction)
    }

    #[test]
    fn test_repaints_only_on_change() {
        let (mut store, mut interaction) = drawing();
        let mut overlay = PreviewOverlay::new();
        let mut surface = RecordingSurface::new();
        let palette = Palette::default();

        interaction.pointer_move(&mut store, Point::new(120.0, 0.0), Modifiers::NONE);
        assert!(overlay.update(&mut surface, &interaction, store.viewport(), &palette).unwrap());
        assert_eq!(surface.texts(), vec!["120"]);
        assert!(!overlay.update(&mut surface, &interaction, store.viewport(), &palette).unwrap());

        store.pan_by(Vec2::new(10.0, 0.0));
        assert!(overlay.update(&mut surface, &interaction, store.viewport(), &palette).unwrap());

        overlay.invalidate();
        assert!(overlay.update(&mut surface, &interaction, store.viewport(), &palette).unwrap());
    }

    #[test]
    fn test_cleared_when_wall_finishes() {
        let (mut store, mut interaction) = drawing();
        let mut overlay = PreviewOverlay::new();
        let mut surface = RecordingSurface::new();
        let palette = Palette::default();

        interaction.pointer_move(&mut store, Point::new(60.0, 0.0), Modifiers::NONE);
        overlay.update(&mut surface, &interaction, store.viewport(), &palette).unwrap();
        assert!(surface.stroke_count() > 0);

        interaction.pointer_down(&mut store, Point::new(60.0, 0.0), PointerButton::Primary, Modifiers::NONE);
        assert!(overlay.update(&mut surface, &interaction, store.viewport(), &palette).unwrap());
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(store.len(), 1);
    }
}
