//! Bishop, rook and queen move generation by ray casting.

use crate::board::Board;
use crate::color::Color;
use crate::position::Position;

/// Walk each direction outward until the edge or the first occupied square.
///
/// Empty squares are pushed. The first occupied square is pushed only when it
/// holds an enemy piece; the walk stops there either way.
pub(super) fn gen_slider(
    board: &Board,
    from: Position,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Position>,
) {
    for &(d_rank, d_file) in directions {
        let mut cursor = from.offset(d_rank, d_file);
        while let Some(target) = cursor {
            match board.color_at(target) {
                None => moves.push(target),
                Some(color) => {
                    if color != us {
                        moves.push(target);
                    }
                    break;
                }
            }
            cursor = target.offset(d_rank, d_file);
        }
    }
}
