use serde::{Deserialize, Serialize};

use crate::anchor::DEFAULT_ANCHOR_OFFSET_REL;
use crate::CellShape;

/// Configuration for reading a board from one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    /// Squares per side.
    pub grid_size: usize,
    /// Side of the canonical square, in canonical pixels.
    pub square_size: f32,
    /// Anchor lift as a fraction of `square_size`.
    pub anchor_offset_rel: f32,
    /// Polygon used for cell containment.
    pub cell_shape: CellShape,
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            grid_size: 8,
            square_size: 800.0,
            anchor_offset_rel: DEFAULT_ANCHOR_OFFSET_REL,
            cell_shape: CellShape::default(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("grid_size must be >= 1")]
    InvalidGridSize,
    #[error("square_size must be finite and > 0 (got {0})")]
    InvalidSquareSize(f32),
    #[error("anchor_offset_rel must be finite and in [0, 1) (got {0})")]
    InvalidAnchorOffset(f32),
}

impl BoardParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.grid_size == 0 {
            return Err(ParamsError::InvalidGridSize);
        }
        if !self.square_size.is_finite() || self.square_size <= 0.0 {
            return Err(ParamsError::InvalidSquareSize(self.square_size));
        }
        if !self.anchor_offset_rel.is_finite()
            || !(0.0..1.0).contains(&self.anchor_offset_rel)
        {
            return Err(ParamsError::InvalidAnchorOffset(self.anchor_offset_rel));
        }
        Ok(())
    }

    /// Anchor lift in canonical pixels.
    pub fn anchor_offset_px(&self) -> f32 {
        self.anchor_offset_rel * self.square_size
    }
}
