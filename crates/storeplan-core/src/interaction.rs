//! Pointer-driven operation state machine.
//!
//! [`Interaction`] turns pointer and key input into scene mutations. It owns
//! only transient gesture state; everything persistent lives in the
//! [`SceneStore`] passed to each call.
//!
//! Every pointer-move rebases the operation's reference point onto the
//! current pointer position, so each tick applies the delta since the
//! previous tick. Grid and angle snapping are applied to the running raw
//! value, never to the per-tick delta, so slow drags still make progress.

use crate::elements::{ElementId, ElementPatch};
use crate::geometry::{self, Bounds};
use crate::input::{InputEvent, Key, Modifiers, PointerButton};
use crate::scene::SceneStore;
use crate::selection::{self, ResizeHandle};
use crate::snap::{self, AlignmentGuide};
use crate::tools::{DrawingMode, WallPreview, WallTool};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Kind of gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationKind {
    #[default]
    None,
    Move,
    Resize,
    Rotate,
    MarqueeSelect,
    DrawWall,
    Pan,
}

/// Transient state between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    /// Reference point of the gesture, rebased to the pointer on every move.
    /// Document space, except for pans where it is in window space.
    pub start_point: Point,
    pub active_resize_handle: Option<ResizeHandle>,
    pub rotation_center: Option<Point>,
    /// Sum of the rebased per-tick deltas.
    accumulated: Vec2,
    /// Element and its bounds when the gesture began.
    targets: Vec<(ElementId, Bounds)>,
    /// Unsnapped rotation while rotating.
    raw_rotation: f64,
}

impl Operation {
    fn new(kind: OperationKind, start_point: Point) -> Self {
        Self {
            kind,
            start_point,
            ..Self::default()
        }
    }

    /// Rebase onto `point` and return the delta since the last tick.
    fn rebase(&mut self, point: Point) -> Vec2 {
        let delta = point - self.start_point;
        self.start_point = point;
        delta
    }
}

/// Marquee rectangle corners; both `None` when no marquee is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionBox {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl SelectionBox {
    pub fn is_active(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::from_points(self.start?, self.end?))
    }

    fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }
}

/// Gesture interpreter sitting between host input and the scene store.
#[derive(Debug, Clone)]
pub struct Interaction {
    operation: Operation,
    selection_box: SelectionBox,
    guides: Vec<AlignmentGuide>,
    wall_tool: WallTool,
    /// Position of the drawing surface inside the window.
    origin_offset: Vec2,
    /// Bumped whenever the wall preview changes.
    preview_revision: u64,
}

impl Interaction {
    pub fn new(store: &SceneStore) -> Self {
        Self {
            operation: Operation::default(),
            selection_box: SelectionBox::default(),
            guides: Vec::new(),
            wall_tool: WallTool::new(store.config()),
            origin_offset: Vec2::ZERO,
            preview_revision: 0,
        }
    }

    pub fn set_origin_offset(&mut self, origin_offset: Vec2) {
        self.origin_offset = origin_offset;
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn selection_box(&self) -> SelectionBox {
        self.selection_box
    }

    /// Guides produced by the latest move tick.
    pub fn guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    pub fn wall_preview(&self) -> Option<WallPreview> {
        self.wall_tool.preview()
    }

    /// Changes whenever [`Interaction::wall_preview`] does.
    pub fn preview_revision(&self) -> u64 {
        self.preview_revision
    }

    fn to_document(&self, store: &SceneStore, screen_point: Point) -> Point {
        // zoom and pan may change mid-gesture, so never cache this
        store.viewport().screen_to_document(screen_point, self.origin_offset)
    }

    fn begin(&mut self, store: &mut SceneStore, operation: Operation) {
        log::debug!("Operation {:?} started", operation.kind);
        store.set_current_operation(operation.kind);
        self.operation = operation;
    }

    fn end(&mut self, store: &mut SceneStore) {
        if self.operation.kind != OperationKind::None {
            log::debug!("Operation {:?} finished", self.operation.kind);
        }
        self.operation = Operation::default();
        self.selection_box.clear();
        self.guides.clear();
        store.set_current_operation(OperationKind::None);
    }

    /// Dispatch a host event.
    pub fn handle_event(&mut self, store: &mut SceneStore, event: InputEvent) {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.pointer_down(store, position, button, modifiers),
            InputEvent::PointerMove {
                position,
                modifiers,
            } => self.pointer_move(store, position, modifiers),
            InputEvent::PointerUp {
                position,
                modifiers,
                ..
            } => self.pointer_up(store, position, modifiers),
            InputEvent::PointerLeave {
                position,
                modifiers,
            } => self.pointer_leave(store, position, modifiers),
            InputEvent::Wheel { position, delta_y } => self.wheel(store, position, delta_y),
            InputEvent::KeyDown { key, modifiers } => {
                self.key_down(store, key, modifiers);
            }
        }
    }

    pub fn pointer_down(
        &mut self,
        store: &mut SceneStore,
        screen_point: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) {
        match button {
            PointerButton::Middle => {
                self.begin(store, Operation::new(OperationKind::Pan, screen_point));
                return;
            }
            PointerButton::Secondary => return,
            PointerButton::Primary => {}
        }

        let point = self.to_document(store, screen_point);

        if store.drawing_mode() == DrawingMode::Wall {
            self.begin(store, Operation::new(OperationKind::DrawWall, point));
            if let Some(draft) = self.wall_tool.pointer_down(point, store.grid_snap(), modifiers.shift) {
                let id = store.add_element(draft);
                log::info!("Wall {} created", id);
            }
            self.preview_revision += 1;
            return;
        }

        let operation = self.choose_operation(store, point, modifiers);
        if operation.kind == OperationKind::MarqueeSelect {
            self.selection_box = SelectionBox {
                start: Some(point),
                end: Some(point),
            };
        }
        if operation.kind == OperationKind::Pan {
            self.begin(store, Operation::new(OperationKind::Pan, screen_point));
        } else {
            self.begin(store, operation);
        }
    }

    /// Pick the gesture for a primary press at document point `point`.
    fn choose_operation(&self, store: &mut SceneStore, point: Point, modifiers: Modifiers) -> Operation {
        let config = store.config().clone();
        let zoom = store.viewport().zoom;
        let hit_radius = config.handle_hit_radius() / zoom;
        let rotation_offset = config.rotation_handle_offset / zoom;

        if let [only] = store.selected_ids() {
            if let Some(element) = store.element(*only).filter(|e| e.is_visible && !e.is_locked) {
                if selection::is_rotation_handle_at_position(point, element, rotation_offset, hit_radius) {
                    return Operation {
                        rotation_center: Some(element.center()),
                        targets: vec![(element.id, element.bounds)],
                        raw_rotation: element.rotation(),
                        ..Operation::new(OperationKind::Rotate, point)
                    };
                }
                if !element.is_rotated() {
                    if let Some(handle) = selection::get_resize_handle_at_position(point, element, hit_radius) {
                        return Operation {
                            active_resize_handle: Some(handle),
                            targets: vec![(element.id, element.bounds)],
                            ..Operation::new(OperationKind::Resize, point)
                        };
                    }
                }
            }
        }

        if let Some(hit_id) = store.find_element_at_position(point).map(|e| e.id) {
            if modifiers.shift {
                store.toggle_selection(hit_id);
            } else if !store.is_selected(hit_id) {
                store.select_only(hit_id);
            }
            if !store.is_selected(hit_id) {
                // shift-click just removed it from the selection
                return Operation::default();
            }
            let targets = store
                .selected_elements()
                .filter(|e| !e.is_locked)
                .map(|e| (e.id, e.bounds))
                .collect();
            return Operation {
                targets,
                ..Operation::new(OperationKind::Move, point)
            };
        }

        if modifiers.alt {
            return Operation::new(OperationKind::Pan, point);
        }
        if !modifiers.shift {
            store.deselect_all();
        }
        Operation::new(OperationKind::MarqueeSelect, point)
    }

    pub fn pointer_move(&mut self, store: &mut SceneStore, screen_point: Point, modifiers: Modifiers) {
        if self.operation.kind == OperationKind::Pan {
            let delta = self.operation.rebase(screen_point);
            store.pan_by(delta);
            return;
        }

        let point = self.to_document(store, screen_point);

        if store.drawing_mode() == DrawingMode::Wall {
            if self.wall_tool.pointer_move(point, store.grid_snap(), modifiers.shift) {
                self.preview_revision += 1;
            }
            return;
        }

        match self.operation.kind {
            OperationKind::Move => self.move_tick(store, point),
            OperationKind::Resize => self.resize_tick(store, point),
            OperationKind::Rotate => self.rotate_tick(store, point, modifiers),
            OperationKind::MarqueeSelect => {
                self.operation.rebase(point);
                self.selection_box.end = Some(point);
            }
            OperationKind::None | OperationKind::DrawWall | OperationKind::Pan => {}
        }
    }

    fn move_tick(&mut self, store: &mut SceneStore, point: Point) {
        let delta = self.operation.rebase(point);
        self.operation.accumulated += delta;
        let accumulated = self.operation.accumulated;
        let grid = store.grid_snap();
        let snap_origin = |origin: Point| grid.map_or(origin, |g| snap::snap_point_to_grid(origin, g));

        match self.operation.targets.as_slice() {
            [] => {}
            [(id, original)] => {
                let candidate = snap_origin(original.origin() + accumulated);
                let moved = Bounds {
                    x: candidate.x,
                    y: candidate.y,
                    ..*original
                };
                let others = store.alignment_targets(&[*id]);
                let (origin, guides) =
                    snap::snap_to_alignment(&moved, &others, store.config().alignment_threshold);
                self.guides = guides;
                store.move_element_to(*id, origin);
            }
            [(_, primary), ..] => {
                // every element shares the primary's snapped delta
                let snapped = snap_origin(primary.origin() + accumulated);
                let shared = snapped - primary.origin();
                self.guides.clear();
                for (id, original) in &self.operation.targets {
                    store.move_element_to(*id, original.origin() + shared);
                }
            }
        }
    }

    fn resize_tick(&mut self, store: &mut SceneStore, point: Point) {
        let Some(handle) = self.operation.active_resize_handle else {
            return;
        };
        let Some(&(id, original)) = self.operation.targets.first() else {
            return;
        };
        let rotation = store.element(id).map_or(0.0, |e| e.rotation());
        let delta = self.operation.rebase(point);
        self.operation.accumulated += geometry::rotate_vector(delta, -rotation);

        let bounds = selection::apply_resize(
            &original,
            rotation,
            handle,
            self.operation.accumulated,
            store.config().min_element_size,
            store.grid_snap(),
        );
        store.update_element(id, &ElementPatch::bounds(bounds));
    }

    fn rotate_tick(&mut self, store: &mut SceneStore, point: Point, modifiers: Modifiers) {
        let Some(center) = self.operation.rotation_center else {
            return;
        };
        let Some(&(id, _)) = self.operation.targets.first() else {
            return;
        };
        let last = self.operation.start_point;
        self.operation.rebase(point);
        self.operation.raw_rotation =
            selection::apply_rotation(self.operation.raw_rotation, center, last, point);

        let rotation = geometry::snap_angle_to_interval(
            self.operation.raw_rotation,
            store.config().rotation_snap_degrees,
            modifiers.shift,
        );
        store.update_element(id, &ElementPatch::rotation(rotation));
    }

    pub fn pointer_up(&mut self, store: &mut SceneStore, screen_point: Point, modifiers: Modifiers) {
        let point = self.to_document(store, screen_point);
        match self.operation.kind {
            OperationKind::MarqueeSelect => {
                if let Some(area) = self.selection_box.bounds() {
                    let found: Vec<ElementId> = store
                        .find_elements_in_area(area.origin(), Point::new(area.right(), area.bottom()))
                        .iter()
                        .map(|e| e.id)
                        .collect();
                    for id in found {
                        store.select_element(id);
                    }
                }
            }
            OperationKind::DrawWall => {
                if let Some(draft) = self.wall_tool.pointer_up(point, store.grid_snap(), modifiers.shift) {
                    let id = store.add_element(draft);
                    log::info!("Wall {} created", id);
                }
                self.preview_revision += 1;
            }
            _ => {}
        }
        self.end(store);
    }

    /// Leaving the surface finishes the gesture exactly like a release.
    pub fn pointer_leave(&mut self, store: &mut SceneStore, screen_point: Point, modifiers: Modifiers) {
        self.pointer_up(store, screen_point, modifiers);
    }

    /// Zoom about the cursor. Negative `delta_y` zooms in.
    pub fn wheel(&mut self, store: &mut SceneStore, screen_point: Point, delta_y: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let step = store.config().zoom_step;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        store.zoom_at(screen_point - self.origin_offset, factor);
    }

    /// Handle a key press. Returns `true` if the key did something.
    pub fn key_down(&mut self, store: &mut SceneStore, key: Key, modifiers: Modifiers) -> bool {
        if let Key::Char(c) = key {
            let c = c.to_ascii_lowercase();
            if modifiers.command() {
                match c {
                    'c' => store.copy(),
                    'x' => store.cut(),
                    'v' => store.paste(),
                    'a' => store.select_all(),
                    _ => return false,
                }
                return true;
            }
            match c {
                'w' => self.enter_drawing_mode(store, DrawingMode::Wall),
                'g' => store.toggle_grid(),
                _ => return false,
            }
            return true;
        }

        let step = if modifiers.shift {
            store.viewport().grid_size
        } else {
            store.config().nudge_step
        };
        match key {
            Key::Delete | Key::Backspace => store.delete_selected(),
            Key::Escape => self.escape(store),
            Key::ArrowUp => store.nudge_selected(Vec2::new(0.0, -step)),
            Key::ArrowDown => store.nudge_selected(Vec2::new(0.0, step)),
            Key::ArrowLeft => store.nudge_selected(Vec2::new(-step, 0.0)),
            Key::ArrowRight => store.nudge_selected(Vec2::new(step, 0.0)),
            Key::Char(_) => return false,
        }
        true
    }

    /// Switch drawing mode, dropping any wall in progress.
    pub fn enter_drawing_mode(&mut self, store: &mut SceneStore, mode: DrawingMode) {
        if self.wall_tool.is_drawing() {
            self.wall_tool.cancel();
            self.preview_revision += 1;
        }
        self.end(store);
        store.set_drawing_mode(mode);
    }

    fn escape(&mut self, store: &mut SceneStore) {
        if self.wall_tool.is_drawing() {
            self.wall_tool.cancel();
            self.preview_revision += 1;
        } else if store.drawing_mode() != DrawingMode::Select {
            store.set_drawing_mode(DrawingMode::Select);
        } else if self.operation.kind == OperationKind::None {
            store.deselect_all();
        }
        self.end(store);
    }
}
