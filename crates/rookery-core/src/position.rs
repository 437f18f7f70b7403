//! Board coordinates as (rank, file) pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::PositionError;

/// A cell of the 8x8 grid.
///
/// Rank index 0 is the eighth rank (Black's back rank) and rank index 7 the
/// first; file index 0 is the a-file. Both indices are always in `0..8`:
/// every constructor checks, nothing clamps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    rank: u8,
    file: u8,
}

impl Position {
    /// Create a position, returning `None` if it is off the board.
    #[inline]
    pub const fn new(rank: i8, file: i8) -> Option<Position> {
        if Board::in_bounds(rank, file) {
            Some(Position {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Create a position, reporting off-board coordinates as an error.
    pub fn try_new(rank: i8, file: i8) -> Result<Position, PositionError> {
        Position::new(rank, file).ok_or(PositionError::OutOfBounds { rank, file })
    }

    /// Parse an algebraic square such as "e4".
    pub fn from_algebraic(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0].to_ascii_lowercase();
        let rank_byte = bytes[1];

        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        Position::new((b'8' - rank_byte) as i8, (file_byte - b'a') as i8)
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Return the position shifted by the given deltas, or `None` if that
    /// leaves the board.
    #[inline]
    pub const fn offset(self, d_rank: i8, d_file: i8) -> Option<Position> {
        match (
            (self.rank as i8).checked_add(d_rank),
            (self.file as i8).checked_add(d_file),
        ) {
            (Some(rank), Some(file)) => Position::new(rank, file),
            _ => None,
        }
    }

    /// Iterate over all 64 positions, rank by rank from the eighth rank down.
    pub fn all() -> impl Iterator<Item = Position> {
        (0u8..8).flat_map(|rank| (0u8..8).map(move |file| Position { rank, file }))
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = PositionError;

    fn try_from((rank, file): (u8, u8)) -> Result<Position, PositionError> {
        let rank = i8::try_from(rank).unwrap_or(i8::MAX);
        let file = i8::try_from(file).unwrap_or(i8::MAX);
        Position::try_new(rank, file)
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> (u8, u8) {
        (pos.rank, pos.file)
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Position, PositionError> {
        Position::from_algebraic(s).ok_or_else(|| PositionError::Malformed {
            found: s.to_string(),
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        write!(f, "{}{}", file, 8 - self.rank)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self)
    }
}
