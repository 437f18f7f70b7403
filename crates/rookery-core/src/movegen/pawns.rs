//! Pawn move generation.

use crate::board::Board;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Generate pawn pushes, captures and en passant captures.
///
/// Promotion is not a separate move here: a pawn landing on its last rank is
/// promoted after the move is played.
pub(super) fn gen_pawn(
    board: &Board,
    from: Position,
    pawn: Piece,
    en_passant: Option<Position>,
    moves: &mut Vec<Position>,
) {
    let us = pawn.color();
    let dir = us.pawn_direction();

    // --- Pushes ---
    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(one);
            if !pawn.has_moved() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    // --- Captures ---
    for d_file in [-1, 1] {
        let Some(target) = from.offset(dir, d_file) else {
            continue;
        };
        match board.color_at(target) {
            Some(color) if color != us => moves.push(target),
            Some(_) => {}
            None => {
                if en_passant == Some(target) && passed_pawn_behind(board, from, target) {
                    moves.push(target);
                }
            }
        }
    }
}

/// Return `true` if an enemy pawn stands beside `from` on the file of `target`,
/// i.e. on the square behind the en passant target.
fn passed_pawn_behind(board: &Board, from: Position, target: Position) -> bool {
    let Some(behind) = Position::new(from.rank() as i8, target.file() as i8) else {
        return false;
    };
    match (board.piece_at(from), board.piece_at(behind)) {
        (Some(ours), Some(theirs)) => {
            theirs.kind() == PieceKind::Pawn && theirs.color() != ours.color()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::color::Color;
    use crate::movegen::pseudo_legal_moves;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::position::Position;

    fn sq(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn pawn(color: Color) -> Piece {
        Piece::new(PieceKind::Pawn, color)
    }

    #[test]
    fn white_pawn_moves_toward_eighth_rank() {
        let board = Board::starting_position();
        let mut moves = pseudo_legal_moves(&board, sq("e2"), None);
        moves.sort();
        assert_eq!(moves, vec![sq("e4"), sq("e3")]);
    }

    #[test]
    fn black_pawn_moves_toward_first_rank() {
        let board = Board::starting_position();
        let mut moves = pseudo_legal_moves(&board, sq("d7"), None);
        moves.sort();
        assert_eq!(moves, vec![sq("d6"), sq("d5")]);
    }

    #[test]
    fn moved_pawn_has_no_double_step() {
        let mut board = Board::empty();
        board.put(sq("c3"), pawn(Color::White).with_moved(true));
        board.put(sq("f6"), pawn(Color::Black).with_moved(true));
        assert_eq!(pseudo_legal_moves(&board, sq("c3"), None), vec![sq("c4")]);
        assert_eq!(pseudo_legal_moves(&board, sq("f6"), None), vec![sq("f5")]);
    }

    #[test]
    fn double_step_needs_both_squares_empty() {
        let mut board = Board::starting_position();
        board.put(sq("a3"), Piece::new(PieceKind::Knight, Color::Black));
        board.put(sq("b4"), Piece::new(PieceKind::Knight, Color::Black));
        assert!(pseudo_legal_moves(&board, sq("a2"), None).is_empty());
        assert_eq!(pseudo_legal_moves(&board, sq("b2"), None), vec![sq("b3"), sq("a3")]);
    }

    #[test]
    fn blocked_pawn_cannot_push_or_capture_forward() {
        let mut board = Board::empty();
        board.put(sq("d4"), pawn(Color::White).with_moved(true));
        board.put(sq("d5"), pawn(Color::Black).with_moved(true));
        assert!(pseudo_legal_moves(&board, sq("d4"), None).is_empty());
        assert!(pseudo_legal_moves(&board, sq("d5"), None).is_empty());
    }

    #[test]
    fn diagonal_needs_an_enemy() {
        let mut board = Board::empty();
        board.put(sq("d4"), pawn(Color::White).with_moved(true));
        board.put(sq("c5"), pawn(Color::Black).with_moved(true));
        board.put(sq("e5"), pawn(Color::White).with_moved(true));
        let mut moves = pseudo_legal_moves(&board, sq("d4"), None);
        moves.sort();
        assert_eq!(moves, vec![sq("c5"), sq("d5")]);
    }

    #[test]
    fn en_passant_target_is_capturable() {
        // Black just played d7-d5, skipping d6.
        let mut board = Board::empty();
        board.put(sq("e5"), pawn(Color::White).with_moved(true));
        board.put(sq("d5"), pawn(Color::Black).with_moved(true));
        let moves = pseudo_legal_moves(&board, sq("e5"), Some(sq("d6")));
        assert!(moves.contains(&sq("d6")));
        assert!(moves.contains(&sq("e6")));
        assert!(!pseudo_legal_moves(&board, sq("e5"), None).contains(&sq("d6")));
    }

    #[test]
    fn en_passant_for_black() {
        // White just played c2-c4, skipping c3.
        let mut board = Board::empty();
        board.put(sq("b4"), pawn(Color::Black).with_moved(true));
        board.put(sq("c4"), pawn(Color::White).with_moved(true));
        let moves = pseudo_legal_moves(&board, sq("b4"), Some(sq("c3")));
        assert!(moves.contains(&sq("c3")));
    }

    #[test]
    fn en_passant_ignored_without_enemy_pawn_behind() {
        let mut board = Board::empty();
        board.put(sq("e5"), pawn(Color::White).with_moved(true));
        board.put(sq("d5"), Piece::new(PieceKind::Knight, Color::Black));
        let moves = pseudo_legal_moves(&board, sq("e5"), Some(sq("d6")));
        assert!(!moves.contains(&sq("d6")));
    }
}
