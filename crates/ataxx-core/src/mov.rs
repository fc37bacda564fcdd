//! Move representation.

use crate::Square;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing move text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid move length: expected 2 or 4 characters, got '{0}'")]
    InvalidLength(String),

    #[error("invalid square in move: '{0}'")]
    InvalidSquare(String),

    #[error("source and destination are the same square: '{0}'")]
    SameSquare(String),

    #[error("destination is more than two squares away: '{0}'")]
    TooFar(String),

    #[error("single move written as a double move: '{0}'")]
    SingleAsDouble(String),
}

/// An Ataxx move.
///
/// Encoded as two bytes: `from` in the low byte, `to` in the high byte. A
/// single (placement) move has `from == to`. Two reserved byte values encode
/// [`Move::PASS`] and [`Move::NONE`]; their squares are meaningless.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    const PASS_BYTE: u16 = 0xFE;
    const NONE_BYTE: u16 = 0xFF;

    /// The null move, played when the side to move has nowhere to go.
    pub const PASS: Move = Move(Self::PASS_BYTE | (Self::PASS_BYTE << 8));

    /// Absence of a move. Used to fill move buffers; never legal.
    pub const NONE: Move = Move(Self::NONE_BYTE | (Self::NONE_BYTE << 8));

    /// Creates a move from source to destination.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 8))
    }

    /// Creates a single (placement) move onto `to`.
    #[inline]
    pub const fn single(to: Square) -> Self {
        Self::new(to, to)
    }

    /// Creates a double (relocation) move.
    #[inline]
    pub const fn double(from: Square, to: Square) -> Self {
        Self::new(from, to)
    }

    /// Returns the source square. For single moves this equals [`Move::to`].
    ///
    /// Meaningless for [`Move::PASS`] and [`Move::NONE`].
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & 0xFF) as u8)
    }

    /// Returns the destination square.
    ///
    /// Meaningless for [`Move::PASS`] and [`Move::NONE`].
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked((self.0 >> 8) as u8)
    }

    #[inline]
    pub const fn is_pass(self) -> bool {
        self.0 == Self::PASS.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Returns true for a single (placement) move. False for pass and none.
    #[inline]
    pub const fn is_single(self) -> bool {
        !self.is_pass() && !self.is_none() && (self.0 & 0xFF) == (self.0 >> 8)
    }

    /// Returns true for a double (relocation) move.
    #[inline]
    pub const fn is_double(self) -> bool {
        !self.is_pass() && !self.is_none() && (self.0 & 0xFF) != (self.0 >> 8)
    }

    /// Returns the text notation for this move (e.g., "b2", "a1c3", "0000").
    pub fn to_uai(self) -> String {
        if self.is_pass() {
            "0000".to_string()
        } else if self.is_none() {
            "NONE".to_string()
        } else if self.is_single() {
            self.to().to_algebraic()
        } else {
            format!("{}{}", self.from(), self.to())
        }
    }

    /// Parses a move from text notation.
    ///
    /// Accepts `0000` or `null` for a pass, a square (`b2`) for a single move
    /// and a square pair (`a1c3`) for a double move.
    pub fn from_uai(s: &str) -> Result<Self, MoveError> {
        if s == "0000" || s == "null" {
            return Ok(Move::PASS);
        }

        match s.len() {
            2 => {
                let to = Square::from_algebraic(s)
                    .ok_or_else(|| MoveError::InvalidSquare(s.to_string()))?;
                Ok(Move::single(to))
            }
            4 => {
                let (from, to) = match (s.get(0..2), s.get(2..4)) {
                    (Some(a), Some(b)) => (Square::from_algebraic(a), Square::from_algebraic(b)),
                    _ => (None, None),
                };
                let (from, to) = match (from, to) {
                    (Some(from), Some(to)) => (from, to),
                    _ => return Err(MoveError::InvalidSquare(s.to_string())),
                };

                if from == to {
                    return Err(MoveError::SameSquare(s.to_string()));
                }
                match from.distance(to) {
                    1 => Err(MoveError::SingleAsDouble(s.to_string())),
                    2 => Ok(Move::double(from, to)),
                    _ => Err(MoveError::TooFar(s.to_string())),
                }
            }
            _ => Err(MoveError::InvalidLength(s.to_string())),
        }
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uai(s)
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uai())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uai())
    }
}
