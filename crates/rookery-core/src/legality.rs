//! Attack maps, check detection and self-check filtering.
//!
//! A candidate move is legal when playing it on a snapshot of the board
//! leaves the mover's king outside the opponent's attacked squares. The live
//! board is only ever read.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::board::Board;
use crate::color::Color;
use crate::make_move::apply_mechanics;
use crate::movegen::{castle_moves, pseudo_legal_moves};
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Return every square some piece of `color` could move to.
///
/// This is the union of pseudo-legal destinations, so pawn pushes onto empty
/// squares count and empty pawn diagonals do not. Castling and en passant
/// are never part of it.
pub fn attacked_squares(board: &Board, color: Color) -> HashSet<Position> {
    board
        .pieces(color)
        .flat_map(|(pos, _)| pseudo_legal_moves(board, pos, None))
        .collect()
}

/// Return `true` if `color`'s king stands on a square the opponent attacks.
///
/// # Panics
///
/// Panics if `color` has no king on the board (invalid board state).
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = board
        .king_position(color)
        .expect("board must have a king for each side");
    attacked_squares(board, !color).contains(&king)
}

/// Return the legal destinations of the piece on `from`.
///
/// The piece's own color decides whose king must stay safe. Kings also get
/// their castling candidates. An empty square yields nothing.
pub fn legal_moves_from(
    board: &Board,
    from: Position,
    en_passant: Option<Position>,
) -> Vec<Position> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut candidates = pseudo_legal_moves(board, from, en_passant);
    if piece.kind() == PieceKind::King {
        candidates.extend(castle_moves(board, from));
    }

    candidates
        .into_iter()
        .filter(|&to| !exposes_king(board, from, to, en_passant, piece.color()))
        .collect()
}

/// Map every piece of `color` to its legal destinations.
///
/// Pieces without a legal move are present with an empty list.
pub fn legal_moves(
    board: &Board,
    color: Color,
    en_passant: Option<Position>,
) -> BTreeMap<Position, Vec<Position>> {
    board
        .pieces(color)
        .map(|(pos, _)| (pos, legal_moves_from(board, pos, en_passant)))
        .collect()
}

/// Return `true` if `color` has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color, en_passant: Option<Position>) -> bool {
    board
        .pieces(color)
        .any(|(pos, _)| !legal_moves_from(board, pos, en_passant).is_empty())
}

/// `color` is in check and has no legal move.
pub fn checkmate(board: &Board, color: Color, en_passant: Option<Position>) -> bool {
    is_in_check(board, color) && !has_legal_move(board, color, en_passant)
}

/// `color` is not in check but has no legal move.
pub fn stalemate(board: &Board, color: Color, en_passant: Option<Position>) -> bool {
    !is_in_check(board, color) && !has_legal_move(board, color, en_passant)
}

/// Play the candidate on a snapshot and report whether `mover` ends up in check.
fn exposes_king(
    board: &Board,
    from: Position,
    to: Position,
    en_passant: Option<Position>,
    mover: Color,
) -> bool {
    let mut scratch = board.snapshot();
    apply_mechanics(&mut scratch, from, to, en_passant);
    let exposed = is_in_check(&scratch, mover);
    if exposed {
        trace!(%from, %to, "discarding self-check candidate");
    }
    exposed
}
