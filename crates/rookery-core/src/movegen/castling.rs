//! Castling candidates.
//!
//! Kept apart from the step tables because the preconditions span several
//! squares and two pieces.

use std::collections::HashSet;

use crate::board::Board;
use crate::legality::attacked_squares;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// File of the rook this side castles with.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// File step from the king toward the rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }
}

/// Generate the castling destinations of the king on `pos`.
///
/// A side qualifies when the king and the corner rook of its rank are both
/// unmoved and of the same color, every square strictly between them is
/// empty, and neither the king's square, the square it crosses, nor its
/// destination is attacked by the opponent. The destination is two files
/// toward the rook.
pub fn castle_moves(board: &Board, pos: Position) -> Vec<Position> {
    let mut moves = Vec::new();
    let Some(king) = board.piece_at(pos) else {
        return moves;
    };
    if king.kind() != PieceKind::King || king.has_moved() {
        return moves;
    }
    let us = king.color();

    // Computed at most once, and only if some side passes the cheap checks.
    let mut attacked: Option<HashSet<Position>> = None;

    for side in CastleSide::ALL {
        let step = side.direction();
        let Some(rook_sq) = Position::new(pos.rank() as i8, side.rook_file() as i8) else {
            continue;
        };
        match board.piece_at(rook_sq) {
            Some(rook)
                if rook.kind() == PieceKind::Rook && rook.color() == us && !rook.has_moved() => {}
            _ => continue,
        }

        // The king's two steps must stay strictly between king and rook.
        let gap = (rook_sq.file() as i8 - pos.file() as i8).abs();
        if gap < 3 {
            continue;
        }

        let path_clear = (1..gap)
            .filter_map(|n| pos.offset(0, n * step))
            .all(|between| board.is_empty(between));
        if !path_clear {
            continue;
        }

        let (Some(crossed), Some(dest)) = (pos.offset(0, step), pos.offset(0, 2 * step)) else {
            continue;
        };
        let attacked = attacked.get_or_insert_with(|| attacked_squares(board, !us));
        if [pos, crossed, dest].iter().any(|sq| attacked.contains(sq)) {
            continue;
        }

        moves.push(dest);
    }
    moves
}

/// Return the rook's `(from, to)` squares for a king move of two or more
/// files, or `None` if the move is not a castle.
pub fn castle_rook_squares(king_from: Position, king_to: Position) -> Option<(Position, Position)> {
    if king_from.rank() != king_to.rank() {
        return None;
    }
    let delta = king_to.file() as i8 - king_from.file() as i8;
    let side = match delta {
        d if d >= 2 => CastleSide::KingSide,
        d if d <= -2 => CastleSide::QueenSide,
        _ => return None,
    };
    let rook_from = Position::new(king_from.rank() as i8, side.rook_file() as i8)?;
    let rook_to = king_to.offset(0, -side.direction())?;
    Some((rook_from, rook_to))
}
