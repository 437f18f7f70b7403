//! Knight and king move generation from fixed offset tables.

use crate::board::Board;
use crate::color::Color;
use crate::position::Position;

/// Push every in-bounds target of `offsets` that is empty or enemy-occupied.
pub(super) fn gen_steps(
    board: &Board,
    from: Position,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Position>,
) {
    for &(d_rank, d_file) in offsets {
        let Some(target) = from.offset(d_rank, d_file) else {
            continue;
        };
        if board.color_at(target) != Some(us) {
            moves.push(target);
        }
    }
}
