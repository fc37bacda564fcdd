//! Bitboard representation and operations.
//!
//! A bitboard is a 49-bit set packed into a `u64` where each bit represents a
//! cell of the 7x7 board. Rows are stored contiguously with a stride of seven,
//! so horizontal shifts must mask off the edge column to stop bits bleeding
//! into the neighbouring row. Every operation keeps the upper 15 bits clear.

use ataxx_core::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

const STRIDE: u32 = Square::STRIDE as u32;
const ALL_BITS: u64 = (1u64 << Square::COUNT) - 1;

const fn file_bits(file: u32) -> u64 {
    let mut bits = 0u64;
    let mut rank = 0;
    while rank < STRIDE {
        bits |= 1u64 << (rank * STRIDE + file);
        rank += 1;
    }
    bits
}

const fn rank_bits(rank: u32) -> u64 {
    0x7F << (rank * STRIDE)
}

/// Masks of the 13 diagonals, indexed by `file - rank + 6`.
const DIAGONALS: [u64; 13] = {
    let mut masks = [0u64; 13];
    let mut sq = 0;
    while sq < Square::COUNT as u32 {
        let file = sq % STRIDE;
        let rank = sq / STRIDE;
        masks[(file + 6 - rank) as usize] |= 1u64 << sq;
        sq += 1;
    }
    masks
};

/// Masks of the 13 anti-diagonals, indexed by `file + rank`.
const ANTI_DIAGONALS: [u64; 13] = {
    let mut masks = [0u64; 13];
    let mut sq = 0;
    while sq < Square::COUNT as u32 {
        masks[(sq % STRIDE + sq / STRIDE) as usize] |= 1u64 << sq;
        sq += 1;
    }
    masks
};

/// A set of board cells.
///
/// Bit 0 = a1, bit 6 = g1, bit 7 = a2, ..., bit 48 = g7.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Every cell of the board.
    pub const ALL: Bitboard = Bitboard(ALL_BITS);

    // File masks
    pub const FILE_A: Bitboard = Bitboard(file_bits(0));
    pub const FILE_B: Bitboard = Bitboard(file_bits(1));
    pub const FILE_C: Bitboard = Bitboard(file_bits(2));
    pub const FILE_D: Bitboard = Bitboard(file_bits(3));
    pub const FILE_E: Bitboard = Bitboard(file_bits(4));
    pub const FILE_F: Bitboard = Bitboard(file_bits(5));
    pub const FILE_G: Bitboard = Bitboard(file_bits(6));

    // Rank masks
    pub const RANK_1: Bitboard = Bitboard(rank_bits(0));
    pub const RANK_2: Bitboard = Bitboard(rank_bits(1));
    pub const RANK_3: Bitboard = Bitboard(rank_bits(2));
    pub const RANK_4: Bitboard = Bitboard(rank_bits(3));
    pub const RANK_5: Bitboard = Bitboard(rank_bits(4));
    pub const RANK_6: Bitboard = Bitboard(rank_bits(5));
    pub const RANK_7: Bitboard = Bitboard(rank_bits(6));

    const NOT_FILE_A: u64 = ALL_BITS & !file_bits(0);
    const NOT_FILE_G: u64 = ALL_BITS & !file_bits(6);

    /// Creates a bitboard from a raw u64. Bits above the board are dropped.
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits & ALL_BITS)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.index())
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the bitboard is not empty.
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns the number of set bits (population count).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Sets the given square.
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Clears the given square.
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Returns the least significant set square, if any.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as u8))
        }
    }

    /// Pops and returns the least significant bit.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Shifts the bitboard north (toward rank 7).
    #[inline]
    pub const fn north(self) -> Bitboard {
        Bitboard((self.0 << STRIDE) & ALL_BITS)
    }

    /// Shifts the bitboard south (toward rank 1).
    #[inline]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 >> STRIDE)
    }

    /// Shifts the bitboard east (toward file G).
    #[inline]
    pub const fn east(self) -> Bitboard {
        Bitboard((self.0 << 1) & Self::NOT_FILE_A)
    }

    /// Shifts the bitboard west (toward file A).
    #[inline]
    pub const fn west(self) -> Bitboard {
        Bitboard((self.0 >> 1) & Self::NOT_FILE_G)
    }

    #[inline]
    pub const fn north_east(self) -> Bitboard {
        self.north().east()
    }

    #[inline]
    pub const fn north_west(self) -> Bitboard {
        self.north().west()
    }

    #[inline]
    pub const fn south_east(self) -> Bitboard {
        self.south().east()
    }

    #[inline]
    pub const fn south_west(self) -> Bitboard {
        self.south().west()
    }

    /// Every cell one king step away from a set cell.
    #[inline]
    pub const fn singles(self) -> Bitboard {
        Bitboard(
            self.north().0
                | self.south().0
                | self.east().0
                | self.west().0
                | self.north_east().0
                | self.north_west().0
                | self.south_east().0
                | self.south_west().0,
        )
    }

    /// Every cell exactly two king steps away from a set cell.
    pub const fn doubles(self) -> Bitboard {
        let n2 = self.north().north();
        let s2 = self.south().south();
        let e2 = self.east().east();
        let w2 = self.west().west();

        Bitboard(
            // Two ranks up and down, five files wide
            n2.west().west().0
                | n2.west().0
                | n2.0
                | n2.east().0
                | n2.east().east().0
                | s2.west().west().0
                | s2.west().0
                | s2.0
                | s2.east().0
                | s2.east().east().0
                // Two files left and right, the three middle ranks
                | e2.north().0
                | e2.0
                | e2.south().0
                | w2.north().0
                | w2.0
                | w2.south().0,
        )
    }

    /// Mirrors the board top to bottom (rank 1 <-> rank 7).
    pub const fn flip_vertical(self) -> Bitboard {
        let mut out = 0u64;
        let mut rank = 0;
        while rank < STRIDE {
            let row = (self.0 >> (rank * STRIDE)) & 0x7F;
            out |= row << ((STRIDE - 1 - rank) * STRIDE);
            rank += 1;
        }
        Bitboard(out)
    }

    /// Mirrors the board left to right (file A <-> file G).
    pub const fn flip_horizontal(self) -> Bitboard {
        let mut out = 0u64;
        let mut file = 0;
        while file < STRIDE {
            let column = (self.0 >> file) & file_bits(0);
            out |= column << (STRIDE - 1 - file);
            file += 1;
        }
        Bitboard(out)
    }

    /// Mirrors the board along the a1-g7 diagonal.
    pub const fn flip_diagonal(self) -> Bitboard {
        // (file, rank) -> (rank, file) moves a bit by 6 * (file - rank).
        let mut out = self.0 & DIAGONALS[6];
        let mut d = 1usize;
        while d < 7 {
            let shift = 6 * d as u32;
            out |= (self.0 & DIAGONALS[6 + d]) << shift;
            out |= (self.0 & DIAGONALS[6 - d]) >> shift;
            d += 1;
        }
        Bitboard(out)
    }

    /// Mirrors the board along the a7-g1 anti-diagonal.
    pub const fn flip_anti_diagonal(self) -> Bitboard {
        // (file, rank) -> (6 - rank, 6 - file) moves a bit by 48 - 8 * (file + rank).
        let mut out = self.0 & ANTI_DIAGONALS[6];
        let mut d = 1usize;
        while d < 7 {
            let shift = 8 * d as u32;
            out |= (self.0 & ANTI_DIAGONALS[6 - d]) << shift;
            out |= (self.0 & ANTI_DIAGONALS[6 + d]) >> shift;
            d += 1;
        }
        Bitboard(out)
    }

    /// Rotates the board 90 degrees clockwise.
    #[inline]
    pub const fn rotate_90(self) -> Bitboard {
        self.flip_diagonal().flip_vertical()
    }

    /// Rotates the board 180 degrees.
    #[inline]
    pub const fn rotate_180(self) -> Bitboard {
        self.flip_vertical().flip_horizontal()
    }

    /// Rotates the board 270 degrees clockwise.
    #[inline]
    pub const fn rotate_270(self) -> Bitboard {
        self.flip_vertical().flip_diagonal()
    }
}

/// The eight symmetries of the square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    FlipVertical,
    FlipHorizontal,
    FlipDiagonal,
    FlipAntiDiagonal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Symmetry {
    /// All symmetries in canonicalization order.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::FlipVertical,
        Symmetry::FlipHorizontal,
        Symmetry::FlipDiagonal,
        Symmetry::FlipAntiDiagonal,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
    ];

    /// Applies the symmetry to a bitboard.
    #[inline]
    pub const fn apply(self, bb: Bitboard) -> Bitboard {
        match self {
            Symmetry::Identity => bb,
            Symmetry::FlipVertical => bb.flip_vertical(),
            Symmetry::FlipHorizontal => bb.flip_horizontal(),
            Symmetry::FlipDiagonal => bb.flip_diagonal(),
            Symmetry::FlipAntiDiagonal => bb.flip_anti_diagonal(),
            Symmetry::Rotate90 => bb.rotate_90(),
            Symmetry::Rotate180 => bb.rotate_180(),
            Symmetry::Rotate270 => bb.rotate_270(),
        }
    }

    /// Returns the symmetry that undoes this one.
    #[inline]
    pub const fn inverse(self) -> Symmetry {
        match self {
            Symmetry::Rotate90 => Symmetry::Rotate270,
            Symmetry::Rotate270 => Symmetry::Rotate90,
            other => other,
        }
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    /// Complement within the 49 board cells.
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0 & ALL_BITS)
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Self {
        Bitboard::from_square(sq)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard({:#015x})", self.0)?;
        for rank in (0..STRIDE).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..STRIDE {
                if (self.0 >> (rank * STRIDE + file)) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g")
    }
}

/// Iterator over set squares in a bitboard.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}
