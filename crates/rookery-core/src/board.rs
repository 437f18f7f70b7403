//! The chess board: an 8x8 grid of optional pieces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement, indexed `cells[rank][file]`.
///
/// The grid is a plain array of `Copy` cells, so cloning yields a fully
/// independent board. Simulation relies on that.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Return an empty board.
    pub const fn empty() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                board.cells[color.back_rank() as usize][file] = Some(Piece::new(kind, color));
                board.cells[color.pawn_rank() as usize][file] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Return `true` iff both coordinates lie in `0..8`.
    #[inline]
    pub const fn in_bounds(rank: i8, file: i8) -> bool {
        0 <= rank && rank < 8 && 0 <= file && file < 8
    }

    /// Return the piece on the given position, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.rank() as usize][pos.file() as usize]
    }

    /// Return the color of the piece on the given position, if any.
    #[inline]
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.piece_at(pos).map(Piece::color)
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Place `piece` on `pos`, replacing whatever was there.
    #[inline]
    pub fn put(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.rank() as usize][pos.file() as usize] = Some(piece);
    }

    /// Clear `pos`, returning its previous occupant.
    #[inline]
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.rank() as usize][pos.file() as usize].take()
    }

    /// Move the occupant of `from` onto `to` and clear `from`.
    ///
    /// Anything on `to` is overwritten and returned. No legality checks are
    /// made: this is the raw primitive under both real and simulated moves.
    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let mover = self.remove(from);
        let captured = self.remove(to);
        if let Some(piece) = mover {
            self.put(to, piece);
        }
        captured
    }

    /// Set the moved flag of the piece on `pos`, if any.
    pub(crate) fn mark_moved(&mut self, pos: Position) {
        if let Some(piece) = self.cells[pos.rank() as usize][pos.file() as usize].as_mut() {
            piece.mark_moved();
        }
    }

    /// Return an independent deep copy of the board.
    #[inline]
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Overwrite this board with the contents of `snapshot`.
    #[inline]
    pub fn restore(&mut self, snapshot: &Board) {
        self.cells = snapshot.cells;
    }

    /// Iterate over every occupied cell, rank by rank from the eighth rank down.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Iterate over the pieces of one side.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color() == color)
    }

    /// Return the position of `color`'s king, or `None` if it has none.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Validate the structural integrity of the board.
    ///
    /// Play itself never calls this; it guards boards coming from outside.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let king_count = self
                .pieces(color)
                .filter(|(_, piece)| piece.kind() == PieceKind::King)
                .count() as u32;
            if king_count != 1 {
                return Err(BoardError::InvalidKingCount {
                    color: color.name(),
                    count: king_count,
                });
            }
        }

        let pawn_on_back_rank = self.occupied().any(|(pos, piece)| {
            piece.kind() == PieceKind::Pawn && (pos.rank() == 0 || pos.rank() == 7)
        });
        if pawn_on_back_rank {
            return Err(BoardError::PawnsOnBackRank);
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"")?;
        crate::fen::write_placement(self, f)?;
        write!(f, "\")")
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for (rank_idx, row) in board.cells.iter().enumerate() {
            write!(f, "{}  ", 8 - rank_idx)?;
            for (file_idx, cell) in row.iter().enumerate() {
                let c = cell.map_or('.', Piece::fen_char);
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::color::Color;
    use crate::error::BoardError;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::position::Position;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_validates() {
        Board::starting_position().validate().unwrap();
    }

    #[test]
    fn starting_position_piece_at() {
        let board = Board::starting_position();
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("a1")).map(Piece::kind), Some(PieceKind::Rook));
        assert_eq!(board.piece_at(sq("g8")).map(Piece::kind), Some(PieceKind::Knight));
        assert_eq!(board.piece_at(sq("e7")).map(Piece::kind), Some(PieceKind::Pawn));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn color_at_and_is_empty() {
        let board = Board::starting_position();
        assert_eq!(board.color_at(sq("b2")), Some(Color::White));
        assert_eq!(board.color_at(sq("b7")), Some(Color::Black));
        assert_eq!(board.color_at(sq("b5")), None);
        assert!(board.is_empty(sq("h4")));
        assert!(!board.is_empty(sq("h8")));
    }

    #[test]
    fn in_bounds_edges() {
        assert!(Board::in_bounds(0, 0));
        assert!(Board::in_bounds(7, 7));
        assert!(!Board::in_bounds(-1, 3));
        assert!(!Board::in_bounds(3, 8));
    }

    #[test]
    fn king_position() {
        let board = Board::starting_position();
        assert_eq!(board.king_position(Color::White), Some(sq("e1")));
        assert_eq!(board.king_position(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_position(Color::White), None);
    }

    #[test]
    fn relocate_captures_and_clears() {
        let mut board = Board::starting_position();
        let captured = board.relocate(sq("d1"), sq("d7"));
        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert!(board.is_empty(sq("d1")));
        assert_eq!(board.piece_at(sq("d7")).map(Piece::kind), Some(PieceKind::Queen));
        assert_eq!(board.occupied().count(), 31);
    }

    #[test]
    fn relocate_does_not_set_moved() {
        let mut board = Board::starting_position();
        board.relocate(sq("g1"), sq("f3"));
        assert!(!board.piece_at(sq("f3")).unwrap().has_moved());
        board.mark_moved(sq("f3"));
        assert!(board.piece_at(sq("f3")).unwrap().has_moved());
    }

    #[test]
    fn snapshot_is_independent() {
        let live = Board::starting_position();
        let mut copy = live.snapshot();
        copy.relocate(sq("e2"), sq("e4"));
        copy.remove(sq("a8"));
        assert_eq!(live, Board::starting_position());
        assert_ne!(live, copy);

        let mut restored = copy.snapshot();
        restored.restore(&live);
        assert_eq!(restored, live);
        assert_ne!(copy, live);
    }

    #[test]
    fn validate_rejects_missing_king() {
        let mut board = Board::starting_position();
        board.remove(sq("e8"));
        assert_eq!(
            board.validate(),
            Err(BoardError::InvalidKingCount { color: "black", count: 0 })
        );
    }

    #[test]
    fn validate_rejects_back_rank_pawn() {
        let mut board = Board::starting_position();
        board.relocate(sq("a2"), sq("b8"));
        assert_eq!(board.validate(), Err(BoardError::PawnsOnBackRank));
    }

    #[test]
    fn pretty_print() {
        let board = Board::starting_position();
        let output = format!("{}", board.pretty());
        assert!(output.starts_with("8  r n b q k b n r"));
        assert!(output.contains("1  R N B Q K B N R"));
        assert!(output.contains("a b c d e f g h"));
    }

    #[test]
    fn debug_shows_placement() {
        assert_eq!(
            format!("{:?}", Board::starting_position()),
            "Board(\"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR\")"
        );
    }
}
