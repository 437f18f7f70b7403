//! FEN string parsing and serialization for [`Game`].
//!
//! The castling field maps onto moved flags: a right is present exactly when
//! the king and the matching corner rook are both unmoved. Pawns count as
//! unmoved while on their starting rank. Other pieces load as unmoved since
//! their flag has no effect on the rules. The move counters are accepted on
//! input and written back as `0 1`.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::color::Color;
use crate::error::FenError;
use crate::game::Game;
use crate::legality;
use crate::movegen::CastleSide;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling letters in FEN order.
const CASTLING_CHARS: [(char, Color, CastleSide); 4] = [
    ('K', Color::White, CastleSide::KingSide),
    ('Q', Color::White, CastleSide::QueenSide),
    ('k', Color::Black, CastleSide::KingSide),
    ('q', Color::Black, CastleSide::QueenSide),
];

impl FromStr for Game {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Game, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut board = parse_placement(fields[0])?;

        // Parse active color
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        // Parse castling rights
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (_, color, side) = CASTLING_CHARS
                    .into_iter()
                    .find(|&(letter, _, _)| letter == c)
                    .ok_or(FenError::InvalidCastlingChar { character: c })?;
                let (king_sq, rook_sq) = castling_pieces(&board, color, side)
                    .ok_or(FenError::CastlingMismatch { character: c })?;
                unmark(&mut board, king_sq);
                unmark(&mut board, rook_sq);
            }
        }

        // Parse en passant
        let en_passant = if fields[3] == "-" {
            None
        } else {
            Some(
                Position::from_algebraic(fields[3]).ok_or_else(|| FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                })?,
            )
        };

        for (field, value) in [("halfmove clock", fields[4]), ("fullmove number", fields[5])] {
            value
                .parse::<u16>()
                .map_err(|_| FenError::InvalidMoveCounter {
                    field,
                    found: value.to_string(),
                })?;
        }

        board.validate()?;
        if legality::is_in_check(&board, !side_to_move) {
            return Err(FenError::OpponentInCheck {
                color: (!side_to_move).name(),
            });
        }
        Ok(Game::from_parts(board, side_to_move, en_passant))
    }
}

/// Parse the piece placement field. Kings and rooks start out moved until a
/// castling right clears them.
fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount {
            found: ranks.len(),
        });
    }

    let mut board = Board::empty();
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        let mut file_index: usize = 0;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file_index += digit as usize;
                continue;
            }

            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar {
                character: c,
            })?;
            let pos = Position::new(rank_index as i8, file_index as i8).ok_or(
                FenError::BadRankLength {
                    rank_index,
                    length: file_index + 1,
                },
            )?;
            let moved = match piece.kind() {
                PieceKind::Pawn => pos.rank() != piece.color().pawn_rank(),
                PieceKind::King | PieceKind::Rook => true,
                PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => false,
            };
            board.put(pos, piece.with_moved(moved));
            file_index += 1;
        }

        if file_index != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file_index,
            });
        }
    }
    Ok(board)
}

/// Locate the king and corner rook a castling right refers to.
fn castling_pieces(board: &Board, color: Color, side: CastleSide) -> Option<(Position, Position)> {
    let rank = color.back_rank() as i8;
    let king_sq = board.king_position(color).filter(|sq| sq.rank() as i8 == rank)?;
    let rook_sq = Position::new(rank, side.rook_file() as i8)?;
    let rook = board.piece_at(rook_sq)?;
    (rook.kind() == PieceKind::Rook && rook.color() == color).then_some((king_sq, rook_sq))
}

fn unmark(board: &mut Board, pos: Position) {
    if let Some(piece) = board.piece_at(pos) {
        board.put(pos, piece.with_moved(false));
    }
}

/// Write the piece placement field of `board`.
pub(crate) fn write_placement(board: &Board, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for rank_idx in 0u8..8 {
        let mut empty_count = 0u8;

        for file_idx in 0u8..8 {
            let pos = Position::new(rank_idx as i8, file_idx as i8);
            match pos.and_then(|pos| board.piece_at(pos)) {
                Some(piece) => {
                    if empty_count > 0 {
                        write!(f, "{empty_count}")?;
                        empty_count = 0;
                    }
                    write!(f, "{}", piece.fen_char())?;
                }
                None => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            write!(f, "{empty_count}")?;
        }

        if rank_idx < 7 {
            write!(f, "/")?;
        }
    }
    Ok(())
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();
        write_placement(board, f)?;

        // Side to move
        write!(f, " {}", self.side_to_move())?;

        // Castling
        let mut any = false;
        write!(f, " ")?;
        for (letter, color, side) in CASTLING_CHARS {
            let available = castling_pieces(board, color, side).is_some_and(|(king_sq, rook_sq)| {
                [king_sq, rook_sq]
                    .iter()
                    .all(|&sq| board.piece_at(sq).is_some_and(|p| !p.has_moved()))
            });
            if available {
                write!(f, "{letter}")?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }

        // En passant
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " 0 1")
    }
}
