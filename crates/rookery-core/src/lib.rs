//! Core chess rules: board representation, move generation, legality and game flow.

mod board;
mod color;
mod error;
mod fen;
mod game;
pub mod legality;
mod make_move;
pub mod movegen;
pub mod perft;
mod piece;
mod piece_kind;
mod position;

pub use board::{Board, PrettyBoard};
pub use color::Color;
pub use error::{BoardError, FenError, GameError, PositionError};
pub use fen::STARTING_FEN;
pub use game::{Game, GameStatus, TurnResult};
pub use make_move::{MoveCategory, apply_mechanics};
pub use movegen::CastleSide;
pub use piece::Piece;
pub use piece_kind::{PieceKind, PromotionPiece};
pub use position::Position;
