//! Turn orchestration: special-move side effects, cross-turn state and game end.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::color::Color;
use crate::error::GameError;
use crate::legality;
use crate::make_move::{MoveCategory, apply_mechanics};
use crate::piece::Piece;
use crate::piece_kind::{PieceKind, PromotionPiece};
use crate::position::Position;

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Resigned { winner: Color },
}

impl GameStatus {
    /// Return `true` once no more turns can be played.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Resigned { winner } => write!(f, "resignation, {} wins", winner.name()),
        }
    }
}

/// Outcome of a successfully applied turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnResult {
    /// The move was played and the game goes on.
    Applied,
    /// The move delivered checkmate; carries the winner.
    Checkmate(Color),
    /// The move left the opponent without a legal move while not in check.
    Stalemate,
}

/// A game in progress.
///
/// All mutable state lives here as plain data (board with per-piece moved
/// flags, side to move, en passant square, status), so the whole game can be
/// serialized and restored without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    /// Square skipped by the previous move's double pawn push, if any.
    en_passant: Option<Position>,
    status: GameStatus,
}

impl Game {
    /// Start a game from the standard starting position.
    pub fn new() -> Game {
        Game {
            board: Board::starting_position(),
            side_to_move: Color::White,
            en_passant: None,
            status: GameStatus::InProgress,
        }
    }

    /// Resume a game from loaded parts. The status is evaluated immediately.
    ///
    /// # Panics
    ///
    /// Panics if `side_to_move` has no king on `board`.
    pub fn from_parts(board: Board, side_to_move: Color, en_passant: Option<Position>) -> Game {
        let mut game = Game {
            board,
            side_to_move,
            en_passant,
            status: GameStatus::InProgress,
        };
        game.status = game.evaluate();
        game
    }

    /// Read-only view of the board, for rendering.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Legal moves of the side to move, keyed by origin square.
    pub fn legal_moves(&self) -> BTreeMap<Position, Vec<Position>> {
        self.legal_moves_for(self.side_to_move)
    }

    /// Legal moves of either side in the current position.
    ///
    /// The en passant square is only honoured for the side to move.
    pub fn legal_moves_for(&self, color: Color) -> BTreeMap<Position, Vec<Position>> {
        let en_passant = self.en_passant.filter(|_| color == self.side_to_move);
        legality::legal_moves(&self.board, color, en_passant)
    }

    /// Return `true` if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        legality::is_in_check(&self.board, self.side_to_move)
    }

    /// Play one half-move for the side to move.
    ///
    /// `promotion` picks the piece a pawn becomes on its last rank; it
    /// defaults to a queen and is ignored for every other move. On error the
    /// game is left untouched.
    pub fn apply_turn(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PromotionPiece>,
    ) -> Result<TurnResult, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }

        let mover = match self.board.piece_at(from) {
            Some(piece) if piece.color() == self.side_to_move => piece,
            _ => return Err(GameError::InvalidMove { from, to }),
        };
        if !legality::legal_moves_from(&self.board, from, self.en_passant).contains(&to) {
            return Err(GameError::InvalidMove { from, to });
        }

        let category = apply_mechanics(&mut self.board, from, to, self.en_passant);
        self.finish_move(mover, to, category, promotion);
        debug!(%from, %to, ?category, side = self.side_to_move.name(), "turn applied");

        self.status = self.evaluate();
        Ok(match self.status {
            GameStatus::Checkmate { winner } => {
                info!(winner = winner.name(), "checkmate");
                TurnResult::Checkmate(winner)
            }
            GameStatus::Stalemate => {
                info!("stalemate");
                TurnResult::Stalemate
            }
            GameStatus::InProgress | GameStatus::Resigned { .. } => TurnResult::Applied,
        })
    }

    /// Concede the game on behalf of `color`.
    pub fn resign(&mut self, color: Color) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        self.status = GameStatus::Resigned { winner: !color };
        info!(loser = color.name(), "resignation");
        Ok(())
    }

    /// Post-move bookkeeping: moved flags, promotion, en passant square and
    /// side to move.
    fn finish_move(
        &mut self,
        mover: Piece,
        to: Position,
        category: MoveCategory,
        promotion: Option<PromotionPiece>,
    ) {
        self.board.mark_moved(to);
        if let MoveCategory::Castle { rook_to, .. } = category {
            self.board.mark_moved(rook_to);
        }

        let us = mover.color();
        if mover.kind() == PieceKind::Pawn && to.rank() == us.promotion_rank() {
            let kind = PieceKind::from(promotion.unwrap_or(PromotionPiece::Queen));
            self.board.put(to, Piece::promoted(kind, us));
            debug!(%to, %kind, "pawn promoted");
        }

        self.en_passant = match category {
            MoveCategory::DoublePush { skipped } => Some(skipped),
            _ => None,
        };
        self.side_to_move = !us;
    }

    /// Classify the position for the side to move.
    fn evaluate(&self) -> GameStatus {
        let us = self.side_to_move;
        if legality::has_legal_move(&self.board, us, self.en_passant) {
            return GameStatus::InProgress;
        }
        if legality::is_in_check(&self.board, us) {
            GameStatus::Checkmate { winner: !us }
        } else {
            GameStatus::Stalemate
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
