//! Map an engine move in UCI notation onto image-space square outlines.
//!
//! Assumes the photographed board has white at the bottom of the image, so
//! grid row 0 is rank 8 and grid column 0 is file `a`.

use boardsight_core::IntersectionGrid;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PieceKind;

/// Board square, `file` and `rank` both zero-based (`a1` = `(0, 0)`).
///
/// Only squares of a standard 8×8 board can be built, so the algebraic name
/// always exists. Serialized as that name (`"e4"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Grid cell `(row, col)` of this square on an `grid_size × grid_size` board.
    pub fn cell(self, grid_size: usize) -> Option<(usize, usize)> {
        let file = self.file as usize;
        let rank = self.rank as usize;
        if file >= grid_size || rank >= grid_size {
            return None;
        }
        Some((grid_size - 1 - rank, file))
    }

    fn from_bytes(b: &[u8]) -> Option<Self> {
        let [f, r] = b else {
            return None;
        };
        Self::new(f.checked_sub(b'a')?, r.checked_sub(b'1')?)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.file), self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or_else(|| InvalidMove(s.to_string()))
    }
}

impl TryFrom<String> for Square {
    type Error = InvalidMove;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid UCI move or square {0:?}")]
pub struct InvalidMove(pub String);

/// Piece a pawn may promote to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    /// Lower-case UCI suffix.
    pub fn code(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    fn from_code(c: u8) -> Option<Self> {
        match c {
            b'q' => Some(Promotion::Queen),
            b'r' => Some(Promotion::Rook),
            b'b' => Some(Promotion::Bishop),
            b'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

/// A move as engines print it: `e2e4`, `e7e8q`. Serialized in that form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UciMove {
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
}

impl UciMove {
    pub fn new(from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from
    }

    pub fn to_square(&self) -> Square {
        self.to
    }

    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }
}

impl FromStr for UciMove {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMove(s.to_string());
        let b = s.as_bytes();
        if !(b.len() == 4 || b.len() == 5) {
            return Err(invalid());
        }
        let from = Square::from_bytes(&b[0..2]).ok_or_else(invalid)?;
        let to = Square::from_bytes(&b[2..4]).ok_or_else(invalid)?;
        let promotion = match b.get(4) {
            None => None,
            Some(&c) => Some(Promotion::from_code(c).ok_or_else(invalid)?),
        };
        Ok(UciMove::new(from, to, promotion))
    }
}

impl TryFrom<String> for UciMove {
    type Error = InvalidMove;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UciMove> for String {
    fn from(mv: UciMove) -> Self {
        mv.to_string()
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.code())?;
        }
        Ok(())
    }
}

/// Image outlines of a move's source and destination squares, `[tl, tr, br, bl]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveHighlight {
    pub from: [Point2<f32>; 4],
    pub to: [Point2<f32>; 4],
}

/// Outline both squares of `mv` on `grid`, or `None` if either is off the grid.
pub fn move_highlight(grid: &IntersectionGrid, mv: &UciMove) -> Option<MoveHighlight> {
    let n = grid.cells_per_side();
    let outline = |sq: Square| {
        let (row, col) = sq.cell(n)?;
        grid.cell_outline(row, col)
    };
    Some(MoveHighlight {
        from: outline(mv.from)?,
        to: outline(mv.to)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).expect("on board")
    }

    fn square_grid() -> IntersectionGrid {
        IntersectionGrid::from_rows(
            (0..=8)
                .map(|i| {
                    (0..=8)
                        .map(|j| Point2::new(j as f32 * 10.0, i as f32 * 10.0))
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn parses_plain_and_promotion_moves() {
        let mv: UciMove = "e2e4".parse().expect("move");
        assert_eq!(mv.from_square(), sq(4, 1));
        assert_eq!(mv.to_square(), sq(4, 3));
        assert_eq!(mv.promotion(), None);
        assert_eq!(mv.to_string(), "e2e4");

        let promo: UciMove = "a7a8q".parse().expect("promotion");
        assert_eq!(promo.promotion(), Some(Promotion::Queen));
        assert_eq!(promo.promotion().map(Promotion::kind), Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "a7a8q");
    }

    #[test]
    fn rejects_malformed_moves() {
        for bad in ["", "e2", "e2e9", "i2e4", "e2e4k", "e2e4qq", "(none)"] {
            assert!(bad.parse::<UciMove>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn off_board_squares_cannot_be_built() {
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::new(200, 0), None);
        assert_eq!(sq(7, 7).to_string(), "h8");
    }

    #[test]
    fn serde_uses_algebraic_names() {
        let mv: UciMove = "e7e8n".parse().expect("move");
        let json = serde_json::to_string(&mv).expect("serialize");
        assert_eq!(json, "\"e7e8n\"");
        let back: UciMove = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, mv);
        assert_eq!(serde_json::to_string(&sq(0, 0)).expect("square"), "\"a1\"");
    }

    #[test]
    fn serde_rejects_values_display_cannot_print() {
        // Promotions to pawn or king and off-board squares never deserialize.
        assert!(serde_json::from_str::<UciMove>("\"e7e8p\"").is_err());
        assert!(serde_json::from_str::<UciMove>("\"e7e8k\"").is_err());
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
        assert!(serde_json::from_str::<Square>(r#"{"file":200,"rank":0}"#).is_err());
        assert!(serde_json::from_str::<UciMove>(
            r#"{"from":"e7","to":"e8","promotion":"pawn"}"#
        )
        .is_err());
    }

    #[test]
    fn squares_map_to_image_rows() {
        assert_eq!(sq(0, 7).cell(8), Some((0, 0)));
        assert_eq!(sq(7, 0).cell(8), Some((7, 7)));
        assert_eq!(sq(4, 1).cell(8), Some((6, 4)));
        assert_eq!(sq(4, 1).cell(4), None);
    }

    #[test]
    fn highlight_outlines_both_squares() {
        let mv: UciMove = "e2e4".parse().expect("move");
        let hl = move_highlight(&square_grid(), &mv).expect("highlight");
        assert_eq!(
            hl.from,
            [
                Point2::new(40.0, 60.0),
                Point2::new(50.0, 60.0),
                Point2::new(50.0, 70.0),
                Point2::new(40.0, 70.0),
            ]
        );
        assert_eq!(hl.to[0], Point2::new(40.0, 40.0));
    }
}
