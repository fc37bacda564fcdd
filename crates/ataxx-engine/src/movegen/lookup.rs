//! Precomputed neighbour tables for move generation.

use crate::Bitboard;
use ataxx_core::Square;

/// Cells one step away from each square.
const SINGLE_MOVES: [Bitboard; Square::COUNT] = compute_single_moves();

/// Cells exactly two steps away from each square.
const DOUBLE_MOVES: [Bitboard; Square::COUNT] = compute_double_moves();

/// Returns the placement targets around the given square.
#[inline]
pub fn single_moves(sq: Square) -> Bitboard {
    SINGLE_MOVES[sq.index() as usize]
}

/// Returns the relocation targets from the given square.
#[inline]
pub fn double_moves(sq: Square) -> Bitboard {
    DOUBLE_MOVES[sq.index() as usize]
}

const fn compute_single_moves() -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::EMPTY; Square::COUNT];
    let mut sq = 0;

    while sq < Square::COUNT {
        let origin = Bitboard::from_square(Square::from_index_unchecked(sq as u8));
        table[sq] = origin.singles();
        sq += 1;
    }

    table
}

const fn compute_double_moves() -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::EMPTY; Square::COUNT];
    let mut sq = 0;

    while sq < Square::COUNT {
        let origin = Bitboard::from_square(Square::from_index_unchecked(sq as u8));
        table[sq] = origin.doubles();
        sq += 1;
    }

    table
}
