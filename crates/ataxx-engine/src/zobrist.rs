//! Zobrist hashing for position identification.
//!
//! A position hash is the XOR of one random key per stone (indexed by color
//! and square) and, when Black is to move, a side-to-move key. Gaps never
//! change during a game and do not contribute. Making a move only touches the
//! keys of the cells it changes, so the hash is updated incrementally.

use ataxx_core::{Color, Square};

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for stones: [color][square]
    pub stones: [[u64; Square::COUNT]; 2],
    /// Key for black to move (XOR when black to move).
    pub black_to_move: u64,
}

impl ZobristKeys {
    /// Initializes Zobrist keys using a simple PRNG.
    ///
    /// Uses a fixed seed for reproducibility across runs.
    pub const fn new() -> Self {
        // Simple xorshift64 PRNG for const initialization
        const fn next_random(state: u64) -> (u64, u64) {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x, x)
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut stones = [[0u64; Square::COUNT]; 2];

        let mut color = 0;
        while color < 2 {
            let mut square = 0;
            while square < Square::COUNT {
                let (new_state, value) = next_random(state);
                state = new_state;
                stones[color][square] = value;
                square += 1;
            }
            color += 1;
        }

        let (_, black_to_move) = next_random(state);

        ZobristKeys {
            stones,
            black_to_move,
        }
    }

    /// Returns the key for a stone of `color` on `square`.
    #[inline]
    pub const fn stone_key(&self, color: Color, square: Square) -> u64 {
        self.stones[color.index()][square.index() as usize]
    }

    /// Returns the side-to-move key.
    #[inline]
    pub const fn turn_key(&self) -> u64 {
        self.black_to_move
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
