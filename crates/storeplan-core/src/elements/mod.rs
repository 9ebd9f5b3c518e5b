//! Floor-plan element definitions.

mod fixtures;
mod patch;
mod wall;

pub use fixtures::{BargainBin, Counter, EndCap, Gondola, Rectangle};
pub use patch::{
    BargainBinPatch, CounterPatch, ElementPatch, EndCapPatch, GondolaPatch, KindPatch,
    PatchOutcome, RectanglePatch, WallPatch,
};
pub use wall::Wall;

use crate::geometry::{self, Bounds};
use kurbo::{Point, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements, stable for the element's lifetime.
pub type ElementId = Uuid;

/// Free-form key/value bag attached to an element.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Position, rotation and scale layered on top of an element's bounds.
///
/// `position` always mirrors the bounds origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    /// Rotation in degrees about the bounds center, in `[0, 360)`.
    pub rotation: f64,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Discriminant of [`ElementKind`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    Rectangle,
    Wall,
    Counter,
    Gondola,
    EndCap,
    BargainBin,
}

impl ElementType {
    pub const ALL: [ElementType; 6] = [
        ElementType::Rectangle,
        ElementType::Wall,
        ElementType::Counter,
        ElementType::Gondola,
        ElementType::EndCap,
        ElementType::BargainBin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Rectangle => "rectangle",
            ElementType::Wall => "wall",
            ElementType::Counter => "counter",
            ElementType::Gondola => "gondola",
            ElementType::EndCap => "end-cap",
            ElementType::BargainBin => "bargain-bin",
        }
    }

    /// Footprint a freshly placed element of this type gets.
    pub fn default_size(self) -> Size {
        match self {
            ElementType::Rectangle => Size::new(120.0, 80.0),
            ElementType::Wall => Wall::default().bounds().size(),
            ElementType::Counter => Size::new(160.0, 60.0),
            ElementType::Gondola => Size::new(200.0, 50.0),
            ElementType::EndCap => Size::new(60.0, 50.0),
            ElementType::BargainBin => Size::new(80.0, 80.0),
        }
    }

    /// Payload with default kind-specific fields.
    pub fn default_kind(self) -> ElementKind {
        match self {
            ElementType::Rectangle => ElementKind::Rectangle(Rectangle::default()),
            ElementType::Wall => ElementKind::Wall(Wall::default()),
            ElementType::Counter => ElementKind::Counter(Counter::default()),
            ElementType::Gondola => ElementKind::Gondola(Gondola::default()),
            ElementType::EndCap => ElementKind::EndCap(EndCap::default()),
            ElementType::BargainBin => ElementKind::BargainBin(BargainBin::default()),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific element payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    Rectangle(Rectangle),
    Wall(Wall),
    Counter(Counter),
    Gondola(Gondola),
    EndCap(EndCap),
    BargainBin(BargainBin),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::Wall(_) => ElementType::Wall,
            ElementKind::Counter(_) => ElementType::Counter,
            ElementKind::Gondola(_) => ElementType::Gondola,
            ElementKind::EndCap(_) => ElementType::EndCap,
            ElementKind::BargainBin(_) => ElementType::BargainBin,
        }
    }
}

/// An element that has not been added to a scene yet.
///
/// The store assigns the id and z-index when it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDraft {
    pub kind: ElementKind,
    pub bounds: Bounds,
    pub rotation: f64,
    pub is_locked: bool,
    pub is_visible: bool,
    pub metadata: Metadata,
}

impl ElementDraft {
    pub fn new(kind: ElementKind, bounds: Bounds) -> Self {
        Self {
            kind,
            bounds,
            rotation: 0.0,
            is_locked: false,
            is_visible: true,
            metadata: Metadata::new(),
        }
    }

    /// Draft of `element_type` with default fields, centred on `center`.
    ///
    /// Walls are laid out horizontally with `size.width` as their length.
    pub fn centered(element_type: ElementType, center: Point, size: Option<Size>) -> Self {
        match element_type.default_kind() {
            ElementKind::Wall(wall) => {
                let half = size.map_or(wall.length(), |s| s.width) / 2.0;
                let wall = Wall::new(
                    Point::new(center.x - half, center.y),
                    Point::new(center.x + half, center.y),
                    wall.thickness,
                );
                let bounds = wall.bounds();
                Self::new(ElementKind::Wall(wall), bounds)
            }
            kind => {
                let size = size.unwrap_or_else(|| element_type.default_size());
                let bounds = Bounds::new(
                    center.x - size.width / 2.0,
                    center.y - size.height / 2.0,
                    size.width,
                    size.height,
                );
                Self::new(kind, bounds)
            }
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = geometry::normalize_angle(rotation);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }
}

/// A positioned fixture in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub bounds: Bounds,
    pub transform: Transform,
    pub z_index: i32,
    pub is_locked: bool,
    pub is_visible: bool,
    pub is_selected: bool,
    pub metadata: Metadata,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Materialize a draft with a fresh id, clamping its size to `min_size`.
    pub fn from_draft(draft: ElementDraft, z_index: i32, min_size: f64) -> Self {
        let mut element = Self {
            id: Uuid::new_v4(),
            bounds: draft.bounds,
            transform: Transform {
                rotation: geometry::normalize_angle(draft.rotation),
                ..Transform::default()
            },
            z_index,
            is_locked: draft.is_locked,
            is_visible: draft.is_visible,
            is_selected: false,
            metadata: draft.metadata,
            kind: draft.kind,
        };
        element.set_bounds(draft.bounds, min_size);
        element
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    pub fn is_rotated(&self) -> bool {
        self.transform.rotation != 0.0
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Replace the bounds, enforcing the size floor and keeping the
    /// transform position in step.
    ///
    /// A wall's segment is authoritative: its endpoints follow the change and
    /// the bounds are then rebuilt from the segment.
    pub fn set_bounds(&mut self, bounds: Bounds, min_size: f64) {
        self.bounds = match &mut self.kind {
            ElementKind::Wall(wall) => {
                if self.bounds != bounds {
                    wall.follow_bounds(&self.bounds, &bounds);
                }
                wall.floored_bounds(min_size)
            }
            _ => Bounds {
                width: bounds.width.max(min_size),
                height: bounds.height.max(min_size),
                ..bounds
            },
        };
        self.transform.position = self.bounds.origin();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.bounds = self.bounds.translated(delta);
        self.transform.position = self.bounds.origin();
        if let ElementKind::Wall(wall) = &mut self.kind {
            wall.translate(delta);
        }
    }

    /// Move the bounds origin to `position`.
    pub fn move_to(&mut self, position: Point) {
        self.translate(position - self.bounds.origin());
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.transform.rotation = geometry::normalize_angle(rotation);
    }

    /// Corners after applying the element rotation.
    pub fn corners(&self) -> [Point; 4] {
        geometry::rotated_corners(&self.bounds, self.transform.rotation)
    }

    /// Copy with a new id, moved by `offset`.
    pub fn duplicate(&self, offset: Vec2) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.is_selected = false;
        copy.translate(offset);
        copy
    }
}
