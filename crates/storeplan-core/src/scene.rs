//! Scene store: the single source of truth for elements, selection and view.

use crate::config::EditorConfig;
use crate::elements::{Element, ElementDraft, ElementId, ElementPatch, PatchOutcome};
use crate::geometry::Bounds;
use crate::hit;
use crate::interaction::OperationKind;
use crate::tools::DrawingMode;
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Edge or center used by [`SceneStore::align_selected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignEdge {
    Left,
    Right,
    Top,
    Bottom,
    HorizontalCenter,
    VerticalCenter,
}

/// Owned, read-only copy of the scene state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub elements: Vec<Element>,
    pub selected_element_ids: Vec<ElementId>,
    pub viewport: Viewport,
    pub current_operation: OperationKind,
    pub drawing_mode: DrawingMode,
}

impl SceneSnapshot {
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Elements in ascending z-index order.
    pub fn paint_order(&self) -> Vec<&Element> {
        hit::paint_order(&self.elements)
    }

    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
        self.selected_element_ids
            .iter()
            .filter_map(|id| self.element(*id))
    }
}

/// Mutable scene state.
///
/// Every mutation is synchronous and leaves the store consistent before it
/// returns. Calls naming unknown ids do nothing.
#[derive(Debug, Clone)]
pub struct SceneStore {
    config: EditorConfig,
    elements: Vec<Element>,
    /// Selected ids in selection order; the first entry is the primary element.
    selection: Vec<ElementId>,
    viewport: Viewport,
    clipboard: Vec<Element>,
    current_operation: OperationKind,
    drawing_mode: DrawingMode,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl SceneStore {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            viewport: Viewport::from_config(&config),
            config,
            elements: Vec::new(),
            selection: Vec::new(),
            clipboard: Vec::new(),
            current_operation: OperationKind::None,
            drawing_mode: DrawingMode::Select,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn current_operation(&self) -> OperationKind {
        self.current_operation
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.drawing_mode
    }

    /// Grid size when snapping is on.
    pub fn grid_snap(&self) -> Option<f64> {
        self.viewport.snap_to_grid.then_some(self.viewport.grid_size)
    }

    pub fn clipboard_len(&self) -> usize {
        self.clipboard.len()
    }

    /// Owned copy of everything a renderer or panel needs.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            elements: self.elements.clone(),
            selected_element_ids: self.selection.clone(),
            viewport: self.viewport.clone(),
            current_operation: self.current_operation,
            drawing_mode: self.drawing_mode,
        }
    }

    // --- elements ---

    /// Add an element with a fresh id on top of the current stack.
    pub fn add_element(&mut self, draft: ElementDraft) -> ElementId {
        let z_index = self.next_z_index();
        let element = Element::from_draft(draft, z_index, self.config.min_element_size);
        let id = element.id;
        log::debug!("Added {} {}", element.element_type(), id);
        self.elements.push(element);
        id
    }

    /// Merge `patch` into the element. The element kind never changes.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        let min_size = self.config.min_element_size;
        let Some(element) = self.element_mut(id) else {
            log::warn!("Update for unknown element {}", id);
            return;
        };
        if element.apply_patch(patch, min_size) == PatchOutcome::KindMismatch {
            log::warn!(
                "Ignored kind patch for {} element {}",
                element.element_type(),
                id
            );
        }
    }

    pub fn remove_element(&mut self, id: ElementId) {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.elements.len() == before {
            log::warn!("Remove for unknown element {}", id);
            return;
        }
        self.selection.retain(|selected| *selected != id);
    }

    /// Move an element by `delta`, keeping wall endpoints in step.
    pub fn translate_element(&mut self, id: ElementId, delta: Vec2) {
        if let Some(element) = self.element_mut(id) {
            element.translate(delta);
        }
    }

    /// Move an element's bounds origin to `position`.
    pub fn move_element_to(&mut self, id: ElementId, position: Point) {
        if let Some(element) = self.element_mut(id) {
            element.move_to(position);
        }
    }

    fn next_z_index(&self) -> i32 {
        self.elements
            .iter()
            .map(|e| e.z_index)
            .max()
            .map_or(0, |z| z + 1)
    }

    pub fn bring_to_front(&mut self, id: ElementId) {
        let top = self.next_z_index();
        if let Some(element) = self.element_mut(id) {
            element.z_index = top;
        }
    }

    pub fn send_to_back(&mut self, id: ElementId) {
        let bottom = self
            .elements
            .iter()
            .map(|e| e.z_index)
            .min()
            .unwrap_or(0)
            - 1;
        if let Some(element) = self.element_mut(id) {
            element.z_index = bottom;
        }
    }

    // --- hit-testing ---

    pub fn find_element_at_position(&self, point: Point) -> Option<&Element> {
        hit::find_element_at_position(&self.elements, point)
    }

    pub fn find_elements_in_area(&self, start: Point, end: Point) -> Vec<&Element> {
        hit::find_elements_in_area(&self.elements, start, end)
    }

    // --- selection ---

    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// First selected element, used as the reference for alignment.
    pub fn primary_selection(&self) -> Option<&Element> {
        self.selection.first().and_then(|id| self.element(*id))
    }

    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> {
        self.selection.iter().filter_map(|id| self.element(*id))
    }

    /// Add an element to the selection.
    pub fn select_element(&mut self, id: ElementId) {
        if self.is_selected(id) {
            return;
        }
        let Some(element) = self.element_mut(id) else {
            log::warn!("Select for unknown element {}", id);
            return;
        };
        element.is_selected = true;
        self.selection.push(id);
    }

    pub fn deselect_element(&mut self, id: ElementId) {
        self.selection.retain(|selected| *selected != id);
        if let Some(element) = self.element_mut(id) {
            element.is_selected = false;
        }
    }

    /// Flip an element's selection membership.
    pub fn toggle_selection(&mut self, id: ElementId) {
        if self.is_selected(id) {
            self.deselect_element(id);
        } else {
            self.select_element(id);
        }
    }

    /// Replace the selection with exactly `id`.
    pub fn select_only(&mut self, id: ElementId) {
        self.deselect_all();
        self.select_element(id);
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
        for element in &mut self.elements {
            element.is_selected = false;
        }
    }

    /// Select every visible element. Hidden ones are left unselected.
    pub fn select_all(&mut self) {
        self.selection = self.elements.iter().filter(|e| e.is_visible).map(|e| e.id).collect();
        for element in &mut self.elements {
            element.is_selected = element.is_visible;
        }
    }

    pub fn delete_selected(&mut self) {
        let selected = std::mem::take(&mut self.selection);
        self.elements.retain(|e| !selected.contains(&e.id));
    }

    /// Move every unlocked selected element by `delta`.
    pub fn nudge_selected(&mut self, delta: Vec2) {
        let selected = self.selection.clone();
        for id in selected {
            if let Some(element) = self.element_mut(id).filter(|e| !e.is_locked) {
                element.translate(delta);
            }
        }
    }

    /// Line up the selection with the primary element.
    pub fn align_selected(&mut self, edge: AlignEdge) {
        let Some(reference) = self.primary_selection().map(|e| e.bounds) else {
            return;
        };
        let others: Vec<ElementId> = self.selection.iter().skip(1).copied().collect();
        for id in others {
            let Some(element) = self.element_mut(id).filter(|e| !e.is_locked) else {
                continue;
            };
            let b = element.bounds;
            let target = match edge {
                AlignEdge::Left => Point::new(reference.x, b.y),
                AlignEdge::Right => Point::new(reference.right() - b.width, b.y),
                AlignEdge::Top => Point::new(b.x, reference.y),
                AlignEdge::Bottom => Point::new(b.x, reference.bottom() - b.height),
                AlignEdge::HorizontalCenter => {
                    Point::new(reference.center().x - b.width / 2.0, b.y)
                }
                AlignEdge::VerticalCenter => {
                    Point::new(b.x, reference.center().y - b.height / 2.0)
                }
            };
            element.move_to(target);
        }
    }

    // --- clipboard ---

    /// Copy the selection. An empty selection leaves the clipboard alone.
    pub fn copy(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.clipboard = self.selected_elements().cloned().collect();
    }

    pub fn cut(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.copy();
        self.delete_selected();
    }

    /// Paste the clipboard offset from the copied originals. The pasted
    /// elements replace the selection.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let offset = Vec2::new(self.config.paste_offset, self.config.paste_offset);
        let base = self.next_z_index();
        let lowest = self.clipboard.iter().map(|e| e.z_index).min().unwrap_or(0);

        self.deselect_all();
        let pasted: Vec<Element> = self
            .clipboard
            .iter()
            .map(|source| {
                let mut copy = source.duplicate(offset);
                copy.z_index = base + (source.z_index - lowest);
                copy.is_selected = true;
                copy
            })
            .collect();
        log::info!("Pasted {} elements", pasted.len());
        self.selection = pasted.iter().map(|e| e.id).collect();
        self.elements.extend(pasted);
    }

    // --- viewport ---

    pub fn set_zoom(&mut self, zoom: f64) {
        if !self.viewport.set_zoom(zoom) {
            log::warn!("Zoom {} clamped to {}", zoom, self.viewport.zoom);
        }
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.viewport.set_pan(pan);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan_by(delta);
    }

    /// Zoom about a point relative to the drawing surface.
    pub fn zoom_at(&mut self, surface_point: Point, factor: f64) {
        if !self.viewport.zoom_at(surface_point, factor) {
            log::warn!("Zoom by {} clamped to {}", factor, self.viewport.zoom);
        }
    }

    pub fn toggle_grid(&mut self) {
        self.viewport.grid_enabled = !self.viewport.grid_enabled;
    }

    pub fn toggle_snap_to_grid(&mut self) {
        self.viewport.snap_to_grid = !self.viewport.snap_to_grid;
    }

    pub fn set_grid_size(&mut self, grid_size: f64) {
        if grid_size <= 0.0 || !grid_size.is_finite() {
            log::warn!("Ignored invalid grid size {}", grid_size);
            return;
        }
        self.viewport.grid_size = grid_size;
    }

    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        if self.drawing_mode != mode {
            log::debug!("Drawing mode {:?} -> {:?}", self.drawing_mode, mode);
        }
        self.drawing_mode = mode;
    }

    pub fn set_current_operation(&mut self, kind: OperationKind) {
        self.current_operation = kind;
    }

    /// Bounds of every visible element except `exclude`, for alignment.
    pub fn alignment_targets(&self, exclude: &[ElementId]) -> Vec<Bounds> {
        self.elements
            .iter()
            .filter(|e| e.is_visible && !exclude.contains(&e.id))
            .map(|e| e.bounds)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementKind, ElementType, KindPatch, GondolaPatch};

    fn draft(x: f64, y: f64) -> ElementDraft {
        ElementDraft::new(
            ElementType::Rectangle.default_kind(),
            Bounds::new(x, y, 50.0, 50.0),
        )
    }

    #[test]
    fn test_add_assigns_unique_ids_and_z() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(0.0, 0.0));
        let b = store.add_element(draft(10.0, 0.0));
        assert_ne!(a, b);
        assert_eq!(store.element(a).unwrap().z_index, 0);
        assert_eq!(store.element(b).unwrap().z_index, 1);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut store = SceneStore::default();
        store.add_element(draft(0.0, 0.0));
        let before = store.snapshot();
        store.update_element(uuid::Uuid::new_v4(), &ElementPatch::rotation(45.0));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_update_keeps_type() {
        let mut store = SceneStore::default();
        let id = store.add_element(draft(0.0, 0.0));
        let patch = ElementPatch {
            bounds: Some(Bounds::new(5.0, 5.0, 80.0, 2.0)),
            kind: Some(KindPatch::Gondola(GondolaPatch::default())),
            ..ElementPatch::default()
        };
        store.update_element(id, &patch);
        let element = store.element(id).unwrap();
        assert!(matches!(element.kind, ElementKind::Rectangle(_)));
        assert_eq!(element.bounds, Bounds::new(5.0, 5.0, 80.0, 10.0));
        assert_eq!(element.transform.position, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut store = SceneStore::default();
        let id = store.add_element(draft(0.0, 0.0));
        store.select_element(id);
        store.remove_element(id);
        assert!(store.is_empty());
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn test_selection_order_and_flags() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(0.0, 0.0));
        let b = store.add_element(draft(100.0, 0.0));
        store.select_element(b);
        store.select_element(a);
        store.select_element(b);
        assert_eq!(store.selected_ids(), &[b, a]);
        assert_eq!(store.primary_selection().unwrap().id, b);
        assert!(store.element(a).unwrap().is_selected);

        store.toggle_selection(b);
        assert_eq!(store.selected_ids(), &[a]);
        assert!(!store.element(b).unwrap().is_selected);

        store.select_all();
        assert_eq!(store.selected_ids().len(), 2);
        store.deselect_all();
        assert!(store.selected_ids().is_empty());
        assert!(store.elements().iter().all(|e| !e.is_selected));
    }

    #[test]
    fn test_select_all_skips_hidden() {
        let mut store = SceneStore::default();
        let shown = store.add_element(draft(0.0, 0.0));
        let hidden = store.add_element(ElementDraft {
            is_visible: false,
            ..draft(100.0, 0.0)
        });
        store.select_all();
        assert_eq!(store.selected_ids(), &[shown]);
        assert!(!store.element(hidden).unwrap().is_selected);

        store.delete_selected();
        assert_eq!(store.len(), 1);
        assert!(store.element(hidden).is_some());
    }

    #[test]
    fn test_paste_offsets_and_replaces_selection() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(0.0, 0.0));
        let b = store.add_element(draft(100.0, 40.0));
        store.select_element(a);
        store.select_element(b);
        store.copy();
        store.paste();

        assert_eq!(store.len(), 4);
        let selected = store.selected_ids().to_vec();
        assert_eq!(selected.len(), 2);
        assert!(!selected.contains(&a) && !selected.contains(&b));
        assert_ne!(selected[0], selected[1]);

        let first = store.element(selected[0]).unwrap();
        assert_eq!(first.bounds.origin(), Point::new(20.0, 20.0));
        assert_eq!(first.transform.position, Point::new(20.0, 20.0));
        let second = store.element(selected[1]).unwrap();
        assert_eq!(second.bounds.origin(), Point::new(120.0, 60.0));
        assert!(!store.element(a).unwrap().is_selected);
    }

    #[test]
    fn test_cut_removes_and_paste_restores() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(0.0, 0.0));
        store.select_element(a);
        store.cut();
        assert!(store.is_empty());
        assert_eq!(store.clipboard_len(), 1);

        store.paste();
        assert_eq!(store.len(), 1);
        assert_ne!(store.elements()[0].id, a);
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut store = SceneStore::default();
        store.paste();
        assert!(store.is_empty());
    }

    #[test]
    fn test_z_order() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(0.0, 0.0));
        let b = store.add_element(draft(0.0, 0.0));
        assert_eq!(store.find_element_at_position(Point::new(10.0, 10.0)).unwrap().id, b);
        store.bring_to_front(a);
        assert_eq!(store.find_element_at_position(Point::new(10.0, 10.0)).unwrap().id, a);
        store.send_to_back(a);
        assert_eq!(store.find_element_at_position(Point::new(10.0, 10.0)).unwrap().id, b);
    }

    #[test]
    fn test_align_to_primary() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(40.0, 0.0));
        let b = store.add_element(draft(100.0, 70.0));
        store.select_element(a);
        store.select_element(b);
        store.align_selected(AlignEdge::Left);
        assert!((store.element(b).unwrap().bounds.x - 40.0).abs() < f64::EPSILON);
        store.align_selected(AlignEdge::Bottom);
        assert!((store.element(b).unwrap().bounds.y - 0.0).abs() < f64::EPSILON);
        assert!((store.element(a).unwrap().bounds.x - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nudge_skips_locked() {
        let mut store = SceneStore::default();
        let a = store.add_element(draft(0.0, 0.0));
        let b = store.add_element(draft(100.0, 0.0).locked());
        store.select_all();
        store.nudge_selected(Vec2::new(1.0, 0.0));
        assert!((store.element(a).unwrap().bounds.x - 1.0).abs() < f64::EPSILON);
        assert!((store.element(b).unwrap().bounds.x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_viewport_mutations() {
        let mut store = SceneStore::default();
        store.set_zoom(100.0);
        assert!((store.viewport().zoom - 5.0).abs() < f64::EPSILON);
        store.zoom_at(Point::ZERO, 0.5);
        store.zoom_at(Point::ZERO, 4.0);
        assert!((store.viewport().zoom - 5.0).abs() < f64::EPSILON);
        store.set_pan(Vec2::new(3.0, 4.0));
        assert_eq!(store.viewport().pan, Vec2::new(3.0, 4.0));
        store.toggle_grid();
        assert!(!store.viewport().grid_enabled);
        store.toggle_snap_to_grid();
        assert!(store.grid_snap().is_none());
        store.set_grid_size(-1.0);
        assert!((store.viewport().grid_size - 20.0).abs() < f64::EPSILON);
        store.set_drawing_mode(DrawingMode::Wall);
        assert_eq!(store.snapshot().drawing_mode, DrawingMode::Wall);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = SceneStore::default();
        let id = store.add_element(draft(0.0, 0.0));
        store.select_element(id);
        let snapshot = store.snapshot();
        store.remove_element(id);
        assert_eq!(snapshot.elements.len(), 1);
        assert_eq!(snapshot.selected_elements().count(), 1);
        assert_eq!(snapshot.current_operation, OperationKind::None);
    }
}
