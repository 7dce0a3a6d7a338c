//! Cell-by-cell assignment of piece anchors to the intersection grid.

use boardsight_core::{contains_point, GridShapeError, IntersectionGrid};
use log::{debug, trace, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{BoardMatrix, PieceLabel};

/// Polygon used for each cell's containment test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellShape {
    /// Vertices `[i][j], [i][j+1], [i+1][j], [i+1][j+1]` as given by
    /// [`IntersectionGrid::cell`]. The ring crosses itself, so only the top
    /// and bottom lobes of the square match. A lifted bottom-centre anchor
    /// lands in the bottom lobe.
    #[default]
    Hourglass,
    /// Perimeter quad `[tl, tr, br, bl]`: the whole square matches.
    Quad,
}

/// Assembly failures. These point at a contract violation upstream, not at
/// a bad frame, and no partial board is ever returned alongside them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AssembleError {
    #[error("unknown piece label {label:?}")]
    UnknownPieceLabel { label: String },
    #[error("malformed intersection grid: {reason}")]
    MalformedGrid { reason: String },
    #[error("intersection grid point ({row}, {col}) is not finite")]
    NonFiniteGrid { row: usize, col: usize },
}

impl From<GridShapeError> for AssembleError {
    fn from(err: GridShapeError) -> Self {
        match err {
            GridShapeError::NonFinite { row, col } => AssembleError::NonFiniteGrid { row, col },
            other => AssembleError::MalformedGrid {
                reason: other.to_string(),
            },
        }
    }
}

fn cell_polygon(
    grid: &IntersectionGrid,
    i: usize,
    j: usize,
    shape: CellShape,
) -> Result<[Point2<f32>; 4], AssembleError> {
    let polygon = match shape {
        CellShape::Hourglass => grid.cell(i, j).map(|c| c.vertices),
        CellShape::Quad => grid.cell_outline(i, j),
    };
    polygon.ok_or_else(|| AssembleError::MalformedGrid {
        reason: format!("cell ({i}, {j}) is out of range"),
    })
}

/// Fill an `N × N` board from anchors with known labels.
///
/// Cells are visited row-major. Each cell takes the first anchor, in input
/// order, that lies inside it (boundary included); callers resolve ambiguity
/// by ordering `anchors`. Anchors inside no cell are ignored.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, anchors), fields(anchors = anchors.len()))
)]
pub fn assemble_board(
    grid: &IntersectionGrid,
    anchors: &[(Point2<f32>, PieceLabel)],
    shape: CellShape,
) -> Result<BoardMatrix, AssembleError> {
    let n = grid.validate()?;

    let mut cells = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(n);
        for j in 0..n {
            let polygon = cell_polygon(grid, i, j, shape)?;
            let hit = anchors
                .iter()
                .position(|(p, _)| contains_point(&polygon, *p));
            let cell = hit.map(|k| {
                trace!("cell ({i}, {j}) <- anchor #{k} {}", anchors[k].1);
                if anchors[k + 1..]
                    .iter()
                    .any(|(p, _)| contains_point(&polygon, *p))
                {
                    warn!("cell ({i}, {j}) holds more than one anchor; keeping #{k}");
                }
                anchors[k].1
            });
            row.push(cell);
        }
        cells.push(row);
    }

    let board = BoardMatrix::from_cells(cells);
    debug!(
        "assembled {n}x{n} board with {} pieces from {} anchors",
        board.piece_count(),
        anchors.len()
    );
    Ok(board)
}

/// Like [`assemble_board`], taking raw detector label strings.
///
/// Every label is checked before any cell is filled, so one unknown class
/// fails the whole board.
pub fn assemble_board_from_labels<S: AsRef<str>>(
    grid: &IntersectionGrid,
    anchors: &[(Point2<f32>, S)],
    shape: CellShape,
) -> Result<BoardMatrix, AssembleError> {
    let parsed = anchors
        .iter()
        .map(|(p, label)| {
            let label = label.as_ref();
            label
                .parse::<PieceLabel>()
                .map(|l| (*p, l))
                .map_err(|_| AssembleError::UnknownPieceLabel {
                    label: label.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    assemble_board(grid, &parsed, shape)
}
