//! Ataxx position representation.

use std::fmt;

use ataxx_core::{Color, FenFields, Move, Piece, Square};

use crate::movegen::single_moves;
use crate::{Bitboard, Symmetry, ZOBRIST};

/// Complete Ataxx position state.
///
/// The stone and gap sets are pairwise disjoint and `hash` always equals
/// [`Position::calculate_hash`]. Fields are only reachable through methods
/// that preserve both.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Stones of each color, indexed by [`Color::index`].
    pub(crate) stones: [Bitboard; 2],

    /// Blocked cells.
    pub(crate) gaps: Bitboard,

    /// The side to move.
    pub(crate) side_to_move: Color,

    /// Plies since the last placement move.
    pub(crate) halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after White's move).
    pub(crate) fullmove_number: u32,

    /// Incrementally maintained Zobrist hash.
    pub(crate) hash: u64,
}

impl Position {
    /// Creates an empty board with Black to move.
    pub fn empty() -> Self {
        Position {
            stones: [Bitboard::EMPTY; 2],
            gaps: Bitboard::EMPTY,
            side_to_move: Color::Black,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: ZOBRIST.turn_key(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenFields::STARTPOS)
    }

    /// Creates a position from board notation.
    ///
    /// Parsing never fails. See [`FenFields`] for how malformed input is read.
    pub fn from_fen(fen: &str) -> Self {
        let fields = FenFields::parse(fen);
        let mut position = Position::empty();

        for (sq, piece) in fields.cells() {
            match piece {
                Piece::Black => position.stones[Color::Black.index()].set(sq),
                Piece::White => position.stones[Color::White.index()].set(sq),
                Piece::Gap => position.gaps.set(sq),
                Piece::Empty => {}
            }
        }

        position.side_to_move = fields.side_to_move;
        position.halfmove_clock = fields.halfmove_clock;
        position.fullmove_number = fields.fullmove_number;
        position.hash = position.calculate_hash();
        position
    }

    /// Converts the position to board notation with all four fields.
    pub fn to_fen(&self) -> String {
        FenFields {
            board: FenFields::encode_board(|sq| self.piece_at(sq)),
            side_to_move: self.side_to_move,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns what occupies the given square.
    pub fn piece_at(&self, sq: Square) -> Piece {
        if self.stones[Color::Black.index()].contains(sq) {
            Piece::Black
        } else if self.stones[Color::White.index()].contains(sq) {
            Piece::White
        } else if self.gaps.contains(sq) {
            Piece::Gap
        } else {
            Piece::Empty
        }
    }

    /// Replaces the content of a square.
    ///
    /// Counters are left untouched.
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        if let Some(color) = self.piece_at(sq).color() {
            self.stones[color.index()].clear(sq);
            self.hash ^= ZOBRIST.stone_key(color, sq);
        }
        self.gaps.clear(sq);

        if let Some(color) = piece.color() {
            self.stones[color.index()].set(sq);
            self.hash ^= ZOBRIST.stone_key(color, sq);
        } else if piece == Piece::Gap {
            self.gaps.set(sq);
        }
    }

    /// Sets the side to move.
    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.side_to_move = color;
            self.hash ^= ZOBRIST.turn_key();
        }
    }

    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub const fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub const fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the incrementally maintained hash.
    #[inline]
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    /// Returns the stones of the given color.
    #[inline]
    pub const fn stones(&self, color: Color) -> Bitboard {
        self.stones[color.index()]
    }

    #[inline]
    pub const fn black(&self) -> Bitboard {
        self.stones[Color::Black.index()]
    }

    #[inline]
    pub const fn white(&self) -> Bitboard {
        self.stones[Color::White.index()]
    }

    #[inline]
    pub const fn gaps(&self) -> Bitboard {
        self.gaps
    }

    /// Returns the stones of the side to move.
    #[inline]
    pub const fn us(&self) -> Bitboard {
        self.stones[self.side_to_move.index()]
    }

    /// Returns the stones of the side not to move.
    #[inline]
    pub const fn them(&self) -> Bitboard {
        self.stones[self.side_to_move.opposite().index()]
    }

    /// Returns all stones and gaps.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black() | self.white() | self.gaps
    }

    /// Returns all cells a stone could land on.
    #[inline]
    pub fn empty_cells(&self) -> Bitboard {
        !self.occupied()
    }

    /// Computes the hash from scratch.
    pub fn calculate_hash(&self) -> u64 {
        let mut hash = 0u64;

        for color in Color::ALL {
            for sq in self.stones(color) {
                hash ^= ZOBRIST.stone_key(color, sq);
            }
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.turn_key();
        }

        hash
    }

    /// Returns the hash the position would have after `m`, without playing it.
    pub fn predict_hash(&self, m: Move) -> u64 {
        if m.is_none() {
            return self.hash;
        }

        let mut hash = self.hash ^ ZOBRIST.turn_key();
        if m.is_pass() {
            return hash;
        }

        let us = self.side_to_move;
        let them = us.opposite();
        let to = m.to();

        hash ^= ZOBRIST.stone_key(us, to);
        if m.is_double() {
            hash ^= ZOBRIST.stone_key(us, m.from());
        }

        for sq in single_moves(to) & self.them() {
            hash ^= ZOBRIST.stone_key(us, sq) ^ ZOBRIST.stone_key(them, sq);
        }

        hash
    }

    /// Returns the image of this position under a board symmetry.
    ///
    /// Side to move and counters are kept; the hash is recomputed.
    pub fn transformed(&self, symmetry: Symmetry) -> Position {
        let mut image = Position {
            stones: [
                symmetry.apply(self.black()),
                symmetry.apply(self.white()),
            ],
            gaps: symmetry.apply(self.gaps),
            ..*self
        };
        image.hash = image.calculate_hash();
        image
    }

    /// Returns a hash shared by all eight symmetric images of this position.
    ///
    /// The representative is the image whose black stone set has the smallest
    /// raw value, with earlier symmetries in [`Symmetry::ALL`] winning ties.
    pub fn canonical_hash(&self) -> u64 {
        self.transformed(self.canonical_symmetry()).calculate_hash()
    }

    /// Returns the symmetry that maps black stones to their smallest pattern.
    ///
    /// The first symmetry in [`Symmetry::ALL`] wins ties.
    pub fn canonical_symmetry(&self) -> Symmetry {
        let black = self.black();
        let mut best = Symmetry::Identity;
        let mut best_bits = black.bits();

        for symmetry in Symmetry::ALL {
            let bits = symmetry.apply(black).bits();
            if bits < best_bits {
                best = symmetry;
                best_bits = bits;
            }
        }

        best
    }

    /// Returns black stones minus white stones.
    #[inline]
    pub fn score(&self) -> i32 {
        self.black().count() as i32 - self.white().count() as i32
    }

    /// Returns true if the side to move has no placement or relocation target.
    pub fn must_pass(&self) -> bool {
        let us = self.us();
        (self.empty_cells() & (us.singles() | us.doubles())).is_empty()
    }

    /// Returns true if `m` would flip at least one enemy stone.
    #[inline]
    pub fn is_capture(&self, m: Move) -> bool {
        self.count_captures(m) > 0
    }

    /// Returns how many enemy stones `m` would flip.
    pub fn count_captures(&self, m: Move) -> u32 {
        if m.is_pass() || m.is_none() {
            return 0;
        }
        (single_moves(m.to()) & self.them()).count()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..Square::STRIDE).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..Square::STRIDE {
                let sq = Square::from_index_unchecked(rank * Square::STRIDE + file);
                let c = self.piece_at(sq).to_fen_char().unwrap_or('.');
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g")?;
        write!(f, "Turn: {}", self.side_to_move.to_fen_char())
    }
}
