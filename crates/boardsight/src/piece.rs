//! Closed vocabulary of piece labels produced by the detector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// Side-to-move letter used in FEN.
    pub fn fen_char(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// One of the 12 detector classes.
///
/// Serialized with the detector's own class names (`"Pawn_w"`, `"King_b"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceLabel {
    #[serde(rename = "Pawn_w", alias = "Pawn_white")]
    WhitePawn,
    #[serde(rename = "Knight_w", alias = "Knight_white")]
    WhiteKnight,
    #[serde(rename = "Bishop_w", alias = "Bishop_white")]
    WhiteBishop,
    #[serde(rename = "Rook_w", alias = "Rook_white")]
    WhiteRook,
    #[serde(rename = "Queen_w", alias = "Queen_white")]
    WhiteQueen,
    #[serde(rename = "King_w", alias = "King_white")]
    WhiteKing,
    #[serde(rename = "Pawn_b", alias = "Pawn_black")]
    BlackPawn,
    #[serde(rename = "Knight_b", alias = "Knight_black")]
    BlackKnight,
    #[serde(rename = "Bishop_b", alias = "Bishop_black")]
    BlackBishop,
    #[serde(rename = "Rook_b", alias = "Rook_black")]
    BlackRook,
    #[serde(rename = "Queen_b", alias = "Queen_black")]
    BlackQueen,
    #[serde(rename = "King_b", alias = "King_black")]
    BlackKing,
}

/// Returned when a detector string is outside the 12-class vocabulary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown piece label {0:?}")]
pub struct UnknownLabel(pub String);

impl PieceLabel {
    pub const ALL: [PieceLabel; 12] = [
        PieceLabel::WhitePawn,
        PieceLabel::WhiteKnight,
        PieceLabel::WhiteBishop,
        PieceLabel::WhiteRook,
        PieceLabel::WhiteQueen,
        PieceLabel::WhiteKing,
        PieceLabel::BlackPawn,
        PieceLabel::BlackKnight,
        PieceLabel::BlackBishop,
        PieceLabel::BlackRook,
        PieceLabel::BlackQueen,
        PieceLabel::BlackKing,
    ];

    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        use PieceColor::*;
        use PieceKind::*;
        match (color, kind) {
            (White, Pawn) => PieceLabel::WhitePawn,
            (White, Knight) => PieceLabel::WhiteKnight,
            (White, Bishop) => PieceLabel::WhiteBishop,
            (White, Rook) => PieceLabel::WhiteRook,
            (White, Queen) => PieceLabel::WhiteQueen,
            (White, King) => PieceLabel::WhiteKing,
            (Black, Pawn) => PieceLabel::BlackPawn,
            (Black, Knight) => PieceLabel::BlackKnight,
            (Black, Bishop) => PieceLabel::BlackBishop,
            (Black, Rook) => PieceLabel::BlackRook,
            (Black, Queen) => PieceLabel::BlackQueen,
            (Black, King) => PieceLabel::BlackKing,
        }
    }

    pub fn color(self) -> PieceColor {
        match self {
            PieceLabel::WhitePawn
            | PieceLabel::WhiteKnight
            | PieceLabel::WhiteBishop
            | PieceLabel::WhiteRook
            | PieceLabel::WhiteQueen
            | PieceLabel::WhiteKing => PieceColor::White,
            _ => PieceColor::Black,
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            PieceLabel::WhitePawn | PieceLabel::BlackPawn => PieceKind::Pawn,
            PieceLabel::WhiteKnight | PieceLabel::BlackKnight => PieceKind::Knight,
            PieceLabel::WhiteBishop | PieceLabel::BlackBishop => PieceKind::Bishop,
            PieceLabel::WhiteRook | PieceLabel::BlackRook => PieceKind::Rook,
            PieceLabel::WhiteQueen | PieceLabel::BlackQueen => PieceKind::Queen,
            PieceLabel::WhiteKing | PieceLabel::BlackKing => PieceKind::King,
        }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn code(self) -> char {
        match self {
            PieceLabel::WhitePawn => 'P',
            PieceLabel::WhiteKnight => 'N',
            PieceLabel::WhiteBishop => 'B',
            PieceLabel::WhiteRook => 'R',
            PieceLabel::WhiteQueen => 'Q',
            PieceLabel::WhiteKing => 'K',
            PieceLabel::BlackPawn => 'p',
            PieceLabel::BlackKnight => 'n',
            PieceLabel::BlackBishop => 'b',
            PieceLabel::BlackRook => 'r',
            PieceLabel::BlackQueen => 'q',
            PieceLabel::BlackKing => 'k',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        PieceLabel::ALL.into_iter().find(|l| l.code() == c)
    }

    /// Detector class name, e.g. `"Knight_b"`.
    pub fn as_str(self) -> &'static str {
        match self {
            PieceLabel::WhitePawn => "Pawn_w",
            PieceLabel::WhiteKnight => "Knight_w",
            PieceLabel::WhiteBishop => "Bishop_w",
            PieceLabel::WhiteRook => "Rook_w",
            PieceLabel::WhiteQueen => "Queen_w",
            PieceLabel::WhiteKing => "King_w",
            PieceLabel::BlackPawn => "Pawn_b",
            PieceLabel::BlackKnight => "Knight_b",
            PieceLabel::BlackBishop => "Bishop_b",
            PieceLabel::BlackRook => "Rook_b",
            PieceLabel::BlackQueen => "Queen_b",
            PieceLabel::BlackKing => "King_b",
        }
    }
}

impl FromStr for PieceLabel {
    type Err = UnknownLabel;

    /// Accepts `<Kind>_w`/`<Kind>_b` and `<Kind>_white`/`<Kind>_black`, case sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownLabel(s.to_string());
        let (kind, color) = s.split_once('_').ok_or_else(unknown)?;
        let kind = match kind {
            "Pawn" => PieceKind::Pawn,
            "Knight" => PieceKind::Knight,
            "Bishop" => PieceKind::Bishop,
            "Rook" => PieceKind::Rook,
            "Queen" => PieceKind::Queen,
            "King" => PieceKind::King,
            _ => return Err(unknown()),
        };
        let color = match color {
            "w" | "white" => PieceColor::White,
            "b" | "black" => PieceColor::Black,
            _ => return Err(unknown()),
        };
        Ok(PieceLabel::new(kind, color))
    }
}

impl fmt::Display for PieceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_round_trips_through_its_name_and_code() {
        for label in PieceLabel::ALL {
            assert_eq!(label.as_str().parse::<PieceLabel>(), Ok(label));
            assert_eq!(PieceLabel::from_code(label.code()), Some(label));
            assert_eq!(PieceLabel::new(label.kind(), label.color()), label);
        }
    }

    #[test]
    fn codes_follow_color_case() {
        for label in PieceLabel::ALL {
            let c = label.code();
            match label.color() {
                PieceColor::White => assert!(c.is_ascii_uppercase()),
                PieceColor::Black => assert!(c.is_ascii_lowercase()),
            }
            assert!("KQRBNP".contains(c.to_ascii_uppercase()));
        }
    }

    #[test]
    fn long_color_names_are_accepted() {
        assert_eq!("Queen_white".parse(), Ok(PieceLabel::WhiteQueen));
        assert_eq!("Knight_black".parse(), Ok(PieceLabel::BlackKnight));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        for bad in ["", "Pawn", "pawn_w", "Pawn_x", "Dragon_w", "Pawn_w_extra"] {
            assert_eq!(
                bad.parse::<PieceLabel>(),
                Err(UnknownLabel(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn serde_uses_detector_names() {
        let json = serde_json::to_string(&PieceLabel::BlackRook).expect("serialize");
        assert_eq!(json, "\"Rook_b\"");
        let parsed: PieceLabel = serde_json::from_str("\"Bishop_white\"").expect("alias");
        assert_eq!(parsed, PieceLabel::WhiteBishop);
    }
}
