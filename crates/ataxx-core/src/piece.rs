//! Cell contents.

use crate::Color;

/// What occupies a single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Black = 0,
    White = 1,
    /// A permanently blocked cell.
    Gap = 2,
    Empty = 3,
}

impl Piece {
    /// All cell kinds in order.
    pub const ALL: [Piece; 4] = [Piece::Black, Piece::White, Piece::Gap, Piece::Empty];

    /// Returns the stone of the given color.
    #[inline]
    pub const fn stone(color: Color) -> Self {
        match color {
            Color::Black => Piece::Black,
            Color::White => Piece::White,
        }
    }

    /// Returns the owning color if this is a stone.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Piece::Black => Some(Color::Black),
            Piece::White => Some(Color::White),
            Piece::Gap | Piece::Empty => None,
        }
    }

    /// Parses a board-notation cell character.
    ///
    /// Digits are run lengths, not cells, so they return `None` here.
    pub const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' | 'b' | 'B' => Some(Piece::Black),
            'o' | 'O' | 'w' | 'W' => Some(Piece::White),
            '-' => Some(Piece::Gap),
            _ => None,
        }
    }

    /// Returns the board-notation character, or `None` for empty cells.
    pub const fn to_fen_char(self) -> Option<char> {
        match self {
            Piece::Black => Some('x'),
            Piece::White => Some('o'),
            Piece::Gap => Some('-'),
            Piece::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stone_color_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Piece::stone(color).color(), Some(color));
        }
        assert_eq!(Piece::Gap.color(), None);
        assert_eq!(Piece::Empty.color(), None);
    }

    #[test]
    fn fen_char_aliases() {
        for c in ['x', 'X', 'b', 'B'] {
            assert_eq!(Piece::from_fen_char(c), Some(Piece::Black));
        }
        for c in ['o', 'O', 'w', 'W'] {
            assert_eq!(Piece::from_fen_char(c), Some(Piece::White));
        }
        assert_eq!(Piece::from_fen_char('-'), Some(Piece::Gap));
        assert_eq!(Piece::from_fen_char('3'), None);
        assert_eq!(Piece::from_fen_char('?'), None);
    }

    #[test]
    fn to_fen_char() {
        assert_eq!(Piece::Black.to_fen_char(), Some('x'));
        assert_eq!(Piece::White.to_fen_char(), Some('o'));
        assert_eq!(Piece::Gap.to_fen_char(), Some('-'));
        assert_eq!(Piece::Empty.to_fen_char(), None);
    }
}
