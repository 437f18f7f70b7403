//! Board-level move execution shared by real play and simulation.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::movegen::castle_rook_squares;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// The category of a move, with the extra squares it touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    /// A plain relocation, with or without a capture on the destination.
    Ordinary,
    /// A king move of two files; the rook hopped from `rook_from` to `rook_to`.
    Castle {
        rook_from: Position,
        rook_to: Position,
    },
    /// A pawn captured en passant; the captured pawn stood on `captured`.
    EnPassant { captured: Position },
    /// A pawn advanced two ranks, passing over `skipped`.
    DoublePush { skipped: Position },
}

/// Apply the board mechanics of moving the piece on `from` to `to`.
///
/// Castling also relocates the rook and en passant also removes the pawn
/// behind the destination. Moved flags, promotion and side to move are left
/// to the caller. The move is not checked for legality.
pub fn apply_mechanics(
    board: &mut Board,
    from: Position,
    to: Position,
    en_passant: Option<Position>,
) -> MoveCategory {
    let kind = board.piece_at(from).map(|piece| piece.kind());

    let category = match kind {
        Some(PieceKind::King) => match castle_rook_squares(from, to) {
            Some((rook_from, rook_to)) => {
                board.relocate(rook_from, rook_to);
                MoveCategory::Castle { rook_from, rook_to }
            }
            None => MoveCategory::Ordinary,
        },
        Some(PieceKind::Pawn) if from.file() != to.file() => {
            if board.is_empty(to) && en_passant == Some(to) {
                let captured = Position::new(from.rank() as i8, to.file() as i8);
                match captured {
                    Some(captured) => {
                        board.remove(captured);
                        MoveCategory::EnPassant { captured }
                    }
                    None => MoveCategory::Ordinary,
                }
            } else {
                MoveCategory::Ordinary
            }
        }
        Some(PieceKind::Pawn) if from.rank().abs_diff(to.rank()) == 2 => {
            let mid = (from.rank() + to.rank()) / 2;
            match Position::new(mid as i8, from.file() as i8) {
                Some(skipped) => MoveCategory::DoublePush { skipped },
                None => MoveCategory::Ordinary,
            }
        }
        _ => MoveCategory::Ordinary,
    };

    board.relocate(from, to);
    category
}
