//! Perft (performance test) for move generation correctness verification.

use crate::game::Game;
use crate::piece_kind::{PieceKind, PromotionPiece};
use crate::position::Position;

/// One playable move: origin, destination and promotion choice.
type Turn = (Position, Position, Option<PromotionPiece>);

/// Expand the legal move map of the side to move into playable turns.
///
/// A pawn reaching its last rank yields one turn per promotion piece. A
/// finished game has no turns.
fn turns(game: &Game) -> Vec<Turn> {
    if game.status().is_over() {
        return Vec::new();
    }
    let us = game.side_to_move();
    let board = game.board();
    let mut out = Vec::new();
    for (from, targets) in game.legal_moves() {
        let is_pawn = board
            .piece_at(from)
            .is_some_and(|piece| piece.kind() == PieceKind::Pawn);
        for to in targets {
            if is_pawn && to.rank() == us.promotion_rank() {
                out.extend(PromotionPiece::ALL.map(|promo| (from, to, Some(promo))));
            } else {
                out.push((from, to, None));
            }
        }
    }
    out
}

fn play(game: &Game, (from, to, promotion): Turn) -> Game {
    let mut child = game.clone();
    child
        .apply_turn(from, to, promotion)
        .expect("turns of an unfinished game are legal");
    child
}

fn label((from, to, promotion): Turn) -> String {
    match promotion {
        Some(promo) => format!("{from}{to}{}", PieceKind::from(promo).fen_char()),
        None => format!("{from}{to}"),
    }
}

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without playing them.
pub fn perft(game: &Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let turns = turns(game);

    if depth == 1 {
        return turns.len() as u64;
    }

    turns
        .into_iter()
        .map(|turn| perft(&play(game, turn), depth - 1))
        .sum()
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(move, node_count)` pairs sorted alphabetically,
/// with moves written as `e2e4` or `e7e8q`.
pub fn divide(game: &Game, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = turns(game)
        .into_iter()
        .map(|turn| {
            let count = if depth <= 1 {
                1
            } else {
                perft(&play(game, turn), depth - 1)
            };
            (label(turn), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Starting position ---

    #[test]
    fn perft_depth_0() {
        assert_eq!(perft(&Game::new(), 0), 1);
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Game::new(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Game::new(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Game::new(), 3), 8_902);
    }

    // --- Kiwipete ---
    // r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1

    fn kiwipete() -> Game {
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap()
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&kiwipete(), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&kiwipete(), 2), 2_039);
    }

    // --- Position 3 ---
    // 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1

    fn position3() -> Game {
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"
            .parse()
            .unwrap()
    }

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(perft(&position3(), 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(perft(&position3(), 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(perft(&position3(), 3), 2_812);
    }

    // --- Promotions ---

    #[test]
    fn promotions_count_once_per_piece() {
        let game: Game = "8/P6k/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        let results = divide(&game, 1);
        let promos: Vec<&str> = results
            .iter()
            .map(|(mv, _)| mv.as_str())
            .filter(|mv| mv.starts_with("a7"))
            .collect();
        assert_eq!(promos, vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r"]);
        // Three king moves plus four promotions.
        assert_eq!(perft(&game, 1), 7);
    }

    // --- Finished games ---

    #[test]
    fn resigned_game_has_no_nodes() {
        let mut game = Game::new();
        game.resign(crate::color::Color::White).unwrap();
        assert_eq!(perft(&game, 1), 0);
        assert_eq!(perft(&game, 2), 0);
        assert!(divide(&game, 2).is_empty());
    }

    // --- divide ---

    #[test]
    fn divide_startpos_depth_1() {
        let results = divide(&Game::new(), 1);
        assert_eq!(results.len(), 20);
        for (_, count) in &results {
            assert_eq!(*count, 1);
        }
        assert_eq!(results[0].0, "a2a3");
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = Game::new();
        let total: u64 = divide(&game, 2).iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&game, 2));
    }
}
