//! Drawing tools.

mod wall;

pub use wall::{WallPreview, WallTool};

use serde::{Deserialize, Serialize};

/// What a primary-button press on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawingMode {
    /// Select and manipulate existing elements.
    #[default]
    Select,
    /// Draw wall segments with the wall tool.
    Wall,
}
