//! StorePlan Render Library
//!
//! Immediate-mode painting of a [`storeplan_core::SceneSnapshot`] onto any
//! [`Surface`]. [`RecordingSurface`] captures the frame as a display list
//! that hosts replay onto their own canvas.

mod context;
mod fixtures;
mod overlay;
mod painter;
mod surface;

pub use context::{GridStyle, Palette, RenderContext};
pub use overlay::PreviewOverlay;
pub use painter::{ScenePainter, ROTATION_LOCK_NOTICE};
pub use surface::{DrawCommand, RecordingSurface, RenderError, RenderResult, Surface};
