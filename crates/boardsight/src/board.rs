//! Reconstructed board state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PieceColor, PieceLabel};

/// Marker for an unoccupied cell in the text form.
pub const EMPTY_CELL: char = '.';

/// `N × N` occupancy in intersection-grid order (row 0 is grid row 0).
///
/// Rows follow the image layout, not algebraic ranks; relating rows to
/// ranks is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMatrix {
    cells: Vec<Vec<Option<PieceLabel>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardTextError {
    #[error("board text must have at least one row")]
    Empty,
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("row {row} holds unknown piece code {code:?}")]
    UnknownCode { row: usize, code: char },
}

impl BoardMatrix {
    pub fn empty(size: usize) -> Self {
        Self {
            cells: vec![vec![None; size]; size],
        }
    }

    pub(crate) fn from_cells(cells: Vec<Vec<Option<PieceLabel>>>) -> Self {
        Self { cells }
    }

    /// Parse the `'.'`-padded row form produced by [`BoardMatrix::rows`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardTextError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardTextError::Empty);
        }
        let mut cells = Vec::with_capacity(size);
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let got = text.chars().count();
            if got != size {
                return Err(BoardTextError::RaggedRow {
                    row,
                    expected: size,
                    got,
                });
            }
            let parsed = text
                .chars()
                .map(|code| match code {
                    EMPTY_CELL => Ok(None),
                    c => PieceLabel::from_code(c)
                        .map(Some)
                        .ok_or(BoardTextError::UnknownCode { row, code: c }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }
        Ok(Self { cells })
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<PieceLabel> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn cells(&self) -> &[Vec<Option<PieceLabel>>] {
        &self.cells
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// One string per row, piece codes or `'.'`.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.map_or(EMPTY_CELL, PieceLabel::code))
                    .collect()
            })
            .collect()
    }

    /// FEN piece-placement field: rows joined by `/`, empty runs as digits.
    pub fn fen_placement(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                out.push('/');
            }
            let mut empty = 0usize;
            for cell in row {
                match cell {
                    Some(label) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(label.code());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }

    /// Full FEN with unknown castling/en-passant and fresh move counters.
    pub fn fen(&self, side_to_move: PieceColor) -> String {
        format!(
            "{} {} - - 0 1",
            self.fen_placement(),
            side_to_move.fen_char()
        )
    }
}

impl fmt::Display for BoardMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}
