//! Pseudo-legal move generation.
//!
//! Moves produced here follow piece geometry only; they may leave the mover's
//! own king attacked. [`crate::legality`] filters those out.

mod castling;
mod pawns;
mod sliders;
mod steps;

use crate::board::Board;
use crate::piece_kind::PieceKind;
use crate::position::Position;

pub use self::castling::{CastleSide, castle_moves, castle_rook_squares};

use self::pawns::gen_pawn;
use self::sliders::gen_slider;
use self::steps::gen_steps;

/// Knight jump offsets as (rank, file) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King step offsets: the eight neighbours.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub(crate) const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// Generate the pseudo-legal destinations of the piece on `pos`.
///
/// `en_passant` is the square a pawn skipped on the previous move, if any;
/// it only matters for pawns. Castling is not included, see [`castle_moves`].
/// An empty square yields no moves.
pub fn pseudo_legal_moves(
    board: &Board,
    pos: Position,
    en_passant: Option<Position>,
) -> Vec<Position> {
    let Some(piece) = board.piece_at(pos) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind() {
        PieceKind::Pawn => gen_pawn(board, pos, piece, en_passant, &mut moves),
        PieceKind::Knight => gen_steps(board, pos, piece.color(), &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => gen_slider(board, pos, piece.color(), &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => gen_slider(board, pos, piece.color(), &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => gen_slider(board, pos, piece.color(), &QUEEN_DIRECTIONS, &mut moves),
        PieceKind::King => gen_steps(board, pos, piece.color(), &KING_OFFSETS, &mut moves),
    }
    moves
}
