//! StorePlan Core Library
//!
//! Scene model, geometry kernel and interaction engine for the StorePlan
//! floor-plan editor. Hosts feed pointer and key input into an
//! [`Interaction`], which mutates a [`SceneStore`]; renderers read a
//! [`SceneSnapshot`].

pub mod config;
pub mod elements;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod interaction;
pub mod payload;
pub mod scene;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod tools;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use elements::{Element, ElementDraft, ElementId, ElementKind, ElementPatch, ElementType, KindPatch};
pub use geometry::Bounds;
pub use input::{InputEvent, Key, Modifiers, PointerButton};
pub use interaction::{Interaction, Operation, OperationKind, SelectionBox};
pub use payload::{DropPayload, PayloadError};
pub use scene::{AlignEdge, SceneSnapshot, SceneStore};
pub use selection::ResizeHandle;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use snap::{AlignmentGuide, GuideOrientation};
pub use tools::{DrawingMode, WallPreview, WallTool};
pub use viewport::Viewport;
