//! Partial updates for elements.
//!
//! A patch can change any field of an element except its kind. Kind-specific
//! fields go through [`KindPatch`], whose variant has to match the element.

use super::{Element, ElementId, ElementKind, Metadata, SerializableColor};
use crate::geometry::Bounds;
use kurbo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RectanglePatch {
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    /// `Some(None)` clears the label.
    pub label: Option<Option<String>>,
}

/// Changing wall geometry recomputes the element bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallPatch {
    pub start_point: Option<Point>,
    pub end_point: Option<Point>,
    pub thickness: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterPatch {
    pub stations: Option<u32>,
    pub has_storage: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GondolaPatch {
    pub shelves: Option<u32>,
    pub double_sided: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndCapPatch {
    pub shelves: Option<u32>,
    pub attached_to: Option<Option<ElementId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BargainBinPatch {
    pub dividers: Option<u32>,
    pub round: Option<bool>,
}

/// Kind-specific half of an [`ElementPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum KindPatch {
    Rectangle(RectanglePatch),
    Wall(WallPatch),
    Counter(CounterPatch),
    Gondola(GondolaPatch),
    EndCap(EndCapPatch),
    BargainBin(BargainBinPatch),
}

/// Partial update merged into an existing element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    pub bounds: Option<Bounds>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    pub is_locked: Option<bool>,
    pub is_visible: Option<bool>,
    pub metadata: Option<Metadata>,
    pub kind: Option<KindPatch>,
}

impl ElementPatch {
    pub fn bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    pub fn kind(kind: KindPatch) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Whether a patch was applied in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    /// Base fields were applied but the kind patch targeted another kind.
    KindMismatch,
}

impl Element {
    /// Merge `patch` into this element.
    pub fn apply_patch(&mut self, patch: &ElementPatch, min_size: f64) -> PatchOutcome {
        if let Some(bounds) = patch.bounds {
            self.set_bounds(bounds, min_size);
        }
        if let Some(rotation) = patch.rotation {
            self.set_rotation(rotation);
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
        if let Some(is_locked) = patch.is_locked {
            self.is_locked = is_locked;
        }
        if let Some(is_visible) = patch.is_visible {
            self.is_visible = is_visible;
        }
        if let Some(metadata) = &patch.metadata {
            self.metadata = metadata.clone();
        }

        let Some(kind_patch) = &patch.kind else {
            return PatchOutcome::Applied;
        };

        match (&mut self.kind, kind_patch) {
            (ElementKind::Rectangle(rect), KindPatch::Rectangle(p)) => {
                if let Some(fill) = p.fill {
                    rect.fill = fill;
                }
                if let Some(stroke) = p.stroke {
                    rect.stroke = stroke;
                }
                if let Some(label) = &p.label {
                    rect.label = label.clone();
                }
            }
            (ElementKind::Wall(wall), KindPatch::Wall(p)) => {
                if let Some(start) = p.start_point {
                    wall.start_point = start;
                }
                if let Some(end) = p.end_point {
                    wall.end_point = end;
                }
                if let Some(thickness) = p.thickness {
                    wall.thickness = thickness.max(0.0);
                }
                self.bounds = wall.floored_bounds(min_size);
                self.transform.position = self.bounds.origin();
            }
            (ElementKind::Counter(counter), KindPatch::Counter(p)) => {
                if let Some(stations) = p.stations {
                    counter.stations = stations;
                }
                if let Some(has_storage) = p.has_storage {
                    counter.has_storage = has_storage;
                }
            }
            (ElementKind::Gondola(gondola), KindPatch::Gondola(p)) => {
                if let Some(shelves) = p.shelves {
                    gondola.shelves = shelves;
                }
                if let Some(double_sided) = p.double_sided {
                    gondola.double_sided = double_sided;
                }
            }
            (ElementKind::EndCap(end_cap), KindPatch::EndCap(p)) => {
                if let Some(shelves) = p.shelves {
                    end_cap.shelves = shelves;
                }
                if let Some(attached_to) = p.attached_to {
                    end_cap.attached_to = attached_to;
                }
            }
            (ElementKind::BargainBin(bin), KindPatch::BargainBin(p)) => {
                if let Some(dividers) = p.dividers {
                    bin.dividers = dividers;
                }
                if let Some(round) = p.round {
                    bin.round = round;
                }
            }
            _ => return PatchOutcome::KindMismatch,
        }
        PatchOutcome::Applied
    }
}
