//! A colored piece together with its has-moved flag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored chess piece.
///
/// `moved` flips to `true` the first time the piece is relocated and never
/// flips back. Pawn double steps and castling both depend on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    moved: bool,
}

impl Piece {
    /// Create an unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            moved: false,
        }
    }

    /// Create the piece a pawn turns into on promotion. It counts as moved.
    #[inline]
    pub const fn promoted(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            moved: true,
        }
    }

    /// Return a copy with the moved flag set to `moved`.
    #[inline]
    pub const fn with_moved(self, moved: bool) -> Piece {
        Piece { moved, ..self }
    }

    /// Parse a FEN character into an unmoved piece.
    ///
    /// Uppercase letters produce White pieces; lowercase letters produce Black pieces.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Return `true` once the piece has been relocated at least once.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.moved
    }

    #[inline]
    pub(crate) fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Return the FEN character for this piece.
    ///
    /// Uppercase for White pieces, lowercase for Black pieces.
    #[inline]
    pub fn fen_char(self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        let kind_char = self.kind.fen_char().to_ascii_uppercase();
        if self.moved {
            write!(f, "{color_prefix}{kind_char}*")
        } else {
            write!(f, "{color_prefix}{kind_char}")
        }
    }
}
