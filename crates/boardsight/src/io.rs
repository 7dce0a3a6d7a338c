//! JSON frame inputs and reading reports.

use boardsight_core::{any_overlap, BoundingBox, SortedCorners};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{BoardParams, BoardReading, PieceAnchor, PieceDetection, ReadError};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One frame's worth of collaborator output, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInput {
    /// Board corners, any order.
    pub corners: [[f32; 2]; 4],
    #[serde(default)]
    pub detections: Vec<PieceDetection>,
    #[serde(default)]
    pub params: BoardParams,
}

impl FrameInput {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn corner_points(&self) -> [Point2<f32>; 4] {
        self.corners.map(|[x, y]| Point2::new(x, y))
    }

    pub fn boxes(&self) -> Vec<BoundingBox> {
        self.detections.iter().map(|d| d.bbox).collect()
    }
}

/// What one frame produced, or why it produced nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame_path: String,
    pub params: BoardParams,
    pub num_detections: usize,
    /// Whether any two detection boxes collide.
    pub boxes_overlap: bool,
    #[serde(default)]
    pub sorted_corners: Option<SortedCorners>,
    #[serde(default)]
    pub intersections: Option<Vec<Vec<[f32; 2]>>>,
    #[serde(default)]
    pub anchors: Option<Vec<PieceAnchor>>,
    #[serde(default)]
    pub board: Option<Vec<String>>,
    #[serde(default)]
    pub placement: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub transient: Option<bool>,
}

impl FrameReport {
    pub fn new(frame: &FrameInput, frame_path: &Path) -> Self {
        Self {
            frame_path: frame_path.to_string_lossy().into_owned(),
            params: frame.params.clone(),
            num_detections: frame.detections.len(),
            boxes_overlap: any_overlap(&frame.boxes()),
            sorted_corners: None,
            intersections: None,
            anchors: None,
            board: None,
            placement: None,
            error: None,
            transient: None,
        }
    }

    pub fn set_reading(&mut self, reading: &BoardReading) {
        self.sorted_corners = Some(reading.rectification.sorted);
        self.intersections = Some(
            reading
                .grid
                .rows()
                .iter()
                .map(|row| row.iter().map(|p| [p.x, p.y]).collect())
                .collect(),
        );
        self.anchors = Some(reading.anchors.clone());
        self.board = Some(reading.board.rows());
        self.placement = Some(reading.board.fen_placement());
        self.error = None;
        self.transient = None;
    }

    pub fn set_error(&mut self, err: &ReadError) {
        self.error = Some(err.to_string());
        self.transient = Some(err.is_transient());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
