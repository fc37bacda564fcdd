//! Bitboard Ataxx engine for the 7x7 board.
//!
//! This crate provides:
//! - [`Bitboard`] - 49-cell board sets with shifts, neighbour rings and the
//!   eight board [`Symmetry`] transforms
//! - [`Position`] - Stones, gaps, side to move and counters with an
//!   incrementally updated Zobrist hash
//! - Move generation, move application and perft, plain or through a
//!   [`PerftTable`]
//! - Game termination and results
//!
//! # Architecture
//!
//! Each color's stones and the gaps are kept in their own bitboard. Placement
//! targets are computed for all stones at once by shifting; relocations come
//! from per-square tables built at compile time. Positions are small `Copy`
//! values, so search code branches by copying rather than undoing moves.
//!
//! # Example
//!
//! ```
//! use ataxx_engine::{perft, Position};
//!
//! let position = Position::startpos();
//! let moves = position.legal_moves();
//! println!("Legal moves from the starting position: {}", moves.len());
//!
//! let next = position.after_move(moves[0]);
//! assert_eq!(next.hash(), next.calculate_hash());
//! assert_eq!(perft(&position, 2), 256);
//! ```

mod bitboard;
pub mod movegen;
mod position;
pub mod rules;
mod zobrist;

pub use bitboard::{Bitboard, BitboardIter, Symmetry};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::table::{perft_hashed, PerftEntry, PerftTable, TableKey};
pub use movegen::{double_moves, generate_moves, make_move, single_moves, MoveList};
pub use position::Position;
pub use rules::{DrawReason, GameResult, HALFMOVE_LIMIT};
pub use zobrist::{ZobristKeys, ZOBRIST};
