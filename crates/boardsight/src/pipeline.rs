//! Per-frame pipeline: corners + detections -> grid, anchors and board.

use boardsight_core::{rectify_quad, BoardRectification, GeometryError, IntersectionGrid};
use log::debug;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    anchor::project_anchor, assemble::assemble_board, AssembleError, BoardMatrix, BoardParams,
    ParamsError, PieceAnchor, PieceDetection, PieceLabel,
};

/// Why a frame produced no board.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Assembly(#[from] AssembleError),
}

impl ReadError {
    /// A degenerate corner quad is expected now and then; try the next frame.
    /// A bad square size or a failed assembly means a caller or upstream
    /// collaborator broke its contract.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ReadError::Geometry(GeometryError::DegenerateQuad { .. })
        )
    }
}

/// Everything derived from one frame.
#[derive(Clone, Debug)]
pub struct BoardReading {
    pub rectification: BoardRectification,
    pub grid: IntersectionGrid,
    pub anchors: Vec<PieceAnchor>,
    pub board: BoardMatrix,
}

/// Board geometry for one frame, before any pieces are placed.
#[derive(Clone, Debug)]
pub struct BoardGeometry {
    pub rectification: BoardRectification,
    pub grid: IntersectionGrid,
}

/// Stateless frame reader; each call works only on its inputs.
#[derive(Clone, Debug, Default)]
pub struct BoardReader {
    params: BoardParams,
}

impl BoardReader {
    pub fn new(params: BoardParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &BoardParams {
        &self.params
    }

    /// Rectify the board quad and compute its intersection grid.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, corners)))]
    pub fn geometry(&self, corners: &[Point2<f32>; 4]) -> Result<BoardGeometry, GeometryError> {
        let rectification = rectify_quad(corners, self.params.square_size)?;
        let grid = IntersectionGrid::compute(
            &rectification.canon_to_img,
            self.params.grid_size,
            self.params.square_size,
        );
        Ok(BoardGeometry {
            rectification,
            grid,
        })
    }

    /// Parse labels and project every detection to its anchor point.
    ///
    /// Output order follows `detections`, which is what the assembler's
    /// first-match rule keys on.
    pub fn anchors(
        &self,
        rect: &BoardRectification,
        detections: &[PieceDetection],
    ) -> Result<Vec<PieceAnchor>, AssembleError> {
        detections
            .iter()
            .map(|d| {
                let label = d.label.parse::<PieceLabel>().map_err(|_| {
                    AssembleError::UnknownPieceLabel {
                        label: d.label.clone(),
                    }
                })?;
                Ok(PieceAnchor {
                    point: project_anchor(&d.bbox, rect, self.params.anchor_offset_rel),
                    label,
                })
            })
            .collect()
    }

    /// Full pipeline for one frame.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, corners, detections), fields(detections = detections.len()))
    )]
    pub fn read(
        &self,
        corners: &[Point2<f32>; 4],
        detections: &[PieceDetection],
    ) -> Result<BoardReading, ReadError> {
        let BoardGeometry {
            rectification,
            grid,
        } = self.geometry(corners)?;
        let anchors = self.anchors(&rectification, detections)?;

        let pairs: Vec<(Point2<f32>, PieceLabel)> =
            anchors.iter().map(|a| (a.point, a.label)).collect();
        let board = assemble_board(&grid, &pairs, self.params.cell_shape)?;

        debug!(
            "frame read: {} detections, {} pieces placed",
            detections.len(),
            board.piece_count()
        );

        Ok(BoardReading {
            rectification,
            grid,
            anchors,
            board,
        })
    }
}
