//! Payloads for the box-shaped fixture kinds.

use super::{ElementId, SerializableColor};
use serde::{Deserialize, Serialize};

/// Plain labelled rectangle used for zones and generic areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub fill: SerializableColor,
    pub stroke: SerializableColor,
    pub label: Option<String>,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            fill: SerializableColor::new(241, 245, 249, 255),
            stroke: SerializableColor::new(100, 116, 139, 255),
            label: None,
        }
    }
}

/// Checkout counter with one or more cashier stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub stations: u32,
    pub has_storage: bool,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            stations: 2,
            has_storage: false,
        }
    }
}

/// Free-standing shelving run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gondola {
    pub shelves: u32,
    /// Shelves face both long sides.
    pub double_sided: bool,
}

impl Default for Gondola {
    fn default() -> Self {
        Self {
            shelves: 4,
            double_sided: true,
        }
    }
}

/// Short display unit at the end of a gondola run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndCap {
    pub shelves: u32,
    /// Gondola this end-cap is attached to, if any.
    pub attached_to: Option<ElementId>,
}

impl Default for EndCap {
    fn default() -> Self {
        Self {
            shelves: 3,
            attached_to: None,
        }
    }
}

/// Promotional bin, square or round.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BargainBin {
    pub dividers: u32,
    pub round: bool,
}
