//! Drag-and-drop payloads from the fixture library.
//!
//! A payload is JSON such as `{"type": "gondola", "width": 240}`. Width and
//! height default to the type's default size.

use crate::elements::{ElementDraft, ElementId, ElementType, Metadata};
use crate::scene::SceneStore;
use crate::snap;
use kurbo::{Point, Size};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading a drop payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown element type: {0}")]
    UnknownKind(String),
    #[error("Invalid size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(rename = "type")]
    kind: String,
    width: Option<f64>,
    height: Option<f64>,
    #[serde(default)]
    metadata: Metadata,
}

/// A decoded library payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DropPayload {
    pub element_type: ElementType,
    pub size: Option<Size>,
    pub metadata: Metadata,
}

impl DropPayload {
    pub fn parse(json: &str) -> Result<Self, PayloadError> {
        let raw: RawPayload = serde_json::from_str(json)?;
        let element_type = ElementType::ALL
            .into_iter()
            .find(|t| t.name() == raw.kind)
            .ok_or_else(|| PayloadError::UnknownKind(raw.kind.clone()))?;

        let size = match (raw.width, raw.height) {
            (None, None) => None,
            (width, height) => {
                let default = element_type.default_size();
                let width = width.unwrap_or(default.width);
                let height = height.unwrap_or(default.height);
                if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
                    return Err(PayloadError::InvalidSize { width, height });
                }
                Some(Size::new(width, height))
            }
        };

        Ok(Self {
            element_type,
            size,
            metadata: raw.metadata,
        })
    }

    /// Draft centred on `point`.
    pub fn into_draft(self, point: Point) -> ElementDraft {
        ElementDraft::centered(self.element_type, point, self.size).with_metadata(self.metadata)
    }
}

impl SceneStore {
    /// Add the element described by a library payload dropped at
    /// `document_point`. Malformed payloads are logged and ignored.
    pub fn drop_payload(&mut self, json: &str, document_point: Point) -> Option<ElementId> {
        let payload = match DropPayload::parse(json) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Failed to read drop payload: {}", e);
                return None;
            }
        };
        let point = self
            .grid_snap()
            .map_or(document_point, |g| snap::snap_point_to_grid(document_point, g));
        let id = self.add_element(payload.into_draft(point));
        self.select_only(id);
        Some(id)
    }
}
