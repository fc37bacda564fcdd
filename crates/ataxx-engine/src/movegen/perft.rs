//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::{generate_moves, make_move};
use crate::Position;
use ataxx_core::Move;

/// Counts the number of leaf nodes at the given depth.
///
/// Each child is explored on its own copy of the position.
pub fn perft(position: &Position, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => position.count_legal_moves() as u64,
        _ => {
            let mut nodes = 0u64;
            for m in &generate_moves(position) {
                let new_pos = make_move(position, *m);
                nodes += perft(&new_pos, depth - 1);
            }
            nodes
        }
    }
}

/// Perft with divide - shows node count for each root move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
///
/// Results are sorted by move text. Depth 0 has no root move to split on and
/// gives an empty list.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let new_pos = make_move(position, *m);
        let nodes = if depth > 1 {
            perft(&new_pos, depth - 1)
        } else {
            1
        };
        results.push((*m, nodes));
    }

    results.sort_by_key(|(m, _)| m.to_uai());
    results
}
