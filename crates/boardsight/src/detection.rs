use boardsight_core::BoundingBox;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::PieceLabel;

/// One detector output: a box plus the raw class string.
///
/// The label stays a string until assembly so an out-of-vocabulary class is
/// reported as an assembly error rather than lost at parse time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceDetection {
    pub bbox: BoundingBox,
    pub label: String,
}

impl PieceDetection {
    pub fn new(bbox: BoundingBox, label: impl Into<String>) -> Self {
        Self {
            bbox,
            label: label.into(),
        }
    }
}

/// Image point standing for the square a detected piece occupies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceAnchor {
    pub point: Point2<f32>,
    pub label: PieceLabel,
}
