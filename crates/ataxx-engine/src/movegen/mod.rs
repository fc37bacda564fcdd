//! Move generation.
//!
//! Placements are found set-wise from the neighbour ring of all friendly
//! stones; relocations are enumerated per origin from the precomputed tables.
//! Generation is strictly legal: Ataxx has no move that is pseudolegal but
//! illegal, except on terminal positions where nothing may be played.

mod lookup;
pub mod perft;
pub mod table;

use crate::{Bitboard, Position, ZOBRIST};
use ataxx_core::{Color, Move};

pub use lookup::{double_moves, single_moves};

/// A list of moves with a fixed maximum capacity.
///
/// No 7x7 position has more than 416 moves, so we use a fixed-size array to
/// avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Capacity of the list, above the largest possible move count.
    pub const MAX_MOVES: usize = 512;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NONE; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the given position.
pub fn generate_moves(position: &Position) -> MoveList {
    position.legal_moves()
}

/// Makes a move and returns the new position.
pub fn make_move(position: &Position, m: Move) -> Position {
    position.after_move(m)
}

/// Pushes every placement and relocation of `us` that lands on `allowed`.
fn push_moves(us: Bitboard, allowed: Bitboard, moves: &mut MoveList) {
    for to in us.singles() & allowed {
        moves.push(Move::single(to));
    }

    for from in us {
        for to in double_moves(from) & allowed {
            moves.push(Move::double(from, to));
        }
    }
}

fn count_moves(us: Bitboard, allowed: Bitboard) -> usize {
    let mut count = (us.singles() & allowed).count() as usize;
    for from in us {
        count += (double_moves(from) & allowed).count() as usize;
    }
    count
}

impl Position {
    /// Generates moves without checking whether the game is over.
    ///
    /// Returns just [`Move::PASS`] when no stone can go anywhere.
    pub fn pseudolegal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        push_moves(self.us(), self.empty_cells(), &mut moves);
        if moves.is_empty() {
            moves.push(Move::PASS);
        }
        moves
    }

    /// Generates all legal moves. Empty once the game is over.
    pub fn legal_moves(&self) -> MoveList {
        if self.is_terminal() {
            return MoveList::new();
        }
        self.pseudolegal_moves()
    }

    /// Generates legal moves that flip at least one enemy stone.
    pub fn legal_captures(&self) -> MoveList {
        let mut moves = MoveList::new();
        if self.is_terminal() {
            return moves;
        }

        let allowed = self.them().singles() & self.empty_cells();
        push_moves(self.us(), allowed, &mut moves);
        moves
    }

    /// Generates legal moves that flip nothing, including a forced pass.
    pub fn legal_noncaptures(&self) -> MoveList {
        let mut moves = MoveList::new();
        if self.is_terminal() {
            return moves;
        }
        if self.must_pass() {
            moves.push(Move::PASS);
            return moves;
        }

        let allowed = !self.them().singles() & self.empty_cells();
        push_moves(self.us(), allowed, &mut moves);
        moves
    }

    /// Counts legal moves without building a list.
    pub fn count_legal_moves(&self) -> usize {
        if self.is_terminal() {
            return 0;
        }
        self.count_pseudolegal_moves()
    }

    /// Counts pseudolegal moves without building a list. A forced pass counts once.
    pub fn count_pseudolegal_moves(&self) -> usize {
        match count_moves(self.us(), self.empty_cells()) {
            0 => 1,
            n => n,
        }
    }

    /// Returns true if `m` may be played in this position.
    pub fn is_legal(&self, m: Move) -> bool {
        if m.is_none() || self.is_terminal() {
            return false;
        }
        if m.is_pass() {
            return self.must_pass();
        }

        let to = m.to();
        if !self.empty_cells().contains(to) {
            return false;
        }

        if m.is_single() {
            (single_moves(to) & self.us()).is_not_empty()
        } else {
            let from = m.from();
            double_moves(to).contains(from) && self.us().contains(from)
        }
    }

    /// Plays `m` in place.
    ///
    /// The move is not validated; callers should only pass legal moves.
    /// [`Move::NONE`] leaves the position unchanged.
    pub fn make_move(&mut self, m: Move) {
        if m.is_none() {
            return;
        }

        let us = self.side_to_move;
        let them = us.opposite();

        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        if us == Color::White {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = them;
        self.hash ^= ZOBRIST.turn_key();

        if m.is_pass() {
            return;
        }

        let from = m.from();
        let to = m.to();

        // Placement sets `to`; relocation also clears `from`
        self.stones[us.index()] ^= Bitboard::from_square(from) | Bitboard::from_square(to);
        self.hash ^= ZOBRIST.stone_key(us, to);
        if m.is_double() {
            self.hash ^= ZOBRIST.stone_key(us, from);
        }

        let captured = single_moves(to) & self.stones[them.index()];
        self.stones[them.index()] ^= captured;
        self.stones[us.index()] ^= captured;
        for sq in captured {
            self.hash ^= ZOBRIST.stone_key(us, sq) ^ ZOBRIST.stone_key(them, sq);
        }

        if m.is_single() {
            self.halfmove_clock = 0;
        }
    }

    /// Returns a copy of the position with `m` played.
    #[inline]
    pub fn after_move(&self, m: Move) -> Position {
        let mut next = *self;
        next.make_move(m);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ataxx_core::Square;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_uai(s).unwrap()
    }

    const FENS: [&str; 12] = [
        "startpos",
        "x5o/7/2-1-2/7/2-1-2/7/o5x x 0 1",
        "x5o/7/3-3/2-1-2/3-3/7/o5x x 0 1",
        "3xx-1/-2ooxx/2oo1o1/1-xoo2/1-4o/x4-1/1x2xx1 x 0 1",
        "4o2/2x1o2/2x4/1o5/7/3o1oo/-x3-1 o 0 1",
        "o2o3/2o4/2-4/1x5/4o2/1-2x-1/5xo o 0 1",
        "5-o/2-1-2/xo5/x1o1-2/o5-/o1-o2x/x5- o 0 1",
        "---4/1o5/o-1ox2/x6/2xo3/4xx1/o3-o1 o 0 1",
        "7/7/7/7/7/7/2x1o2 x 0 1",
        "o6/7/7/7/7/7/7 x 0 1",
        "xxxxxxx/7/ooooooo/7/ooooooo/7/xxxxxxx x 0",
        "7/7/7/7/4ooo/4ooo/4oox x 0 1",
    ];

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::single(sq("b2"));
        let m2 = Move::double(sq("a1"), sq("c3"));

        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert!(list.contains(m2));
        assert!(!list.contains(Move::PASS));
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn movelist_default() {
        let list = MoveList::default();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn movelist_clear() {
        let mut list = MoveList::new();
        list.push(Move::single(sq("d4")));
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn generate_moves_startpos() {
        let position = Position::startpos();
        let moves = generate_moves(&position);
        // 3 placements and 5 relocations around each black corner
        assert_eq!(moves.len(), 16);
        assert_eq!(moves.iter().filter(|m| m.is_single()).count(), 6);
        assert!(moves.contains(mv("b6")));
        assert!(moves.contains(mv("g1e3")));
        assert!(!moves.contains(mv("b2")));
    }

    #[test]
    fn pseudolegal_equals_legal_on_live_positions() {
        for fen in FENS {
            let position = Position::from_fen(fen);
            if position.is_terminal() {
                continue;
            }
            assert_eq!(
                position.pseudolegal_moves().as_slice(),
                position.legal_moves().as_slice(),
                "{}",
                fen
            );
        }
    }

    #[test]
    fn counts_match_lists() {
        for fen in FENS {
            let position = Position::from_fen(fen);
            assert_eq!(position.count_legal_moves(), position.legal_moves().len(), "{}", fen);
            assert_eq!(
                position.count_pseudolegal_moves(),
                position.pseudolegal_moves().len(),
                "{}",
                fen
            );
        }
    }

    #[test]
    fn terminal_positions_have_no_moves() {
        for fen in [
            "7/7/7/7/7/7/7 x 0 1",
            "x6/7/7/7/7/7/7 x 0 1",
            "x5o/7/7/7/7/7/o5x x 100 1",
            "ooooooo/ooooooo/ooooooo/ooo-xxx/xxxxxxx/xxxxxxx/xxxxxxx x 0 1",
        ] {
            let position = Position::from_fen(fen);
            assert!(position.legal_moves().is_empty(), "{}", fen);
            assert!(position.legal_captures().is_empty(), "{}", fen);
            assert!(position.legal_noncaptures().is_empty(), "{}", fen);
            assert_eq!(position.count_legal_moves(), 0, "{}", fen);
            assert!(!position.pseudolegal_moves().is_empty(), "{}", fen);
        }
    }

    #[test]
    fn forced_pass() {
        let position = Position::from_fen("7/7/7/7/4ooo/4ooo/4oox x 0 1");
        assert!(position.must_pass());
        let moves = position.legal_moves();
        assert_eq!(moves.as_slice(), &[Move::PASS]);
        assert_eq!(position.legal_noncaptures().as_slice(), &[Move::PASS]);
        assert!(position.legal_captures().is_empty());
        assert_eq!(position.count_legal_moves(), 1);
        assert!(position.is_legal(Move::PASS));
        assert!(!Position::startpos().is_legal(Move::PASS));
    }

    #[test]
    fn captures_and_noncaptures_partition_moves() {
        for fen in FENS {
            let position = Position::from_fen(fen);
            let all: HashSet<Move> = position.legal_moves().iter().copied().collect();
            let captures: HashSet<Move> = position.legal_captures().iter().copied().collect();
            let quiet: HashSet<Move> = position.legal_noncaptures().iter().copied().collect();

            assert!(captures.is_disjoint(&quiet), "{}", fen);
            assert_eq!(&captures | &quiet, all, "{}", fen);
            assert!(captures.iter().all(|m| position.is_capture(*m)), "{}", fen);
            assert!(quiet.iter().all(|m| !position.is_capture(*m)), "{}", fen);
        }
    }

    #[test]
    fn capture_lists() {
        let position = Position::from_fen("7/7/7/7/7/7/2x1o2 x 0 1");
        let captures = position.legal_captures();
        // d1 and d2 by placement, e2 by relocation from c1
        assert_eq!(captures.len(), 3);
        assert!(captures.contains(mv("d1")));
        assert!(captures.contains(mv("d2")));
        assert!(captures.contains(mv("c1e2")));
        assert!(!captures.contains(mv("c1e3")));
        assert_eq!(position.legal_noncaptures().len(), 10);
    }

    #[test]
    fn is_legal_agrees_with_generation() {
        for fen in FENS {
            let position = Position::from_fen(fen);
            let legal = position.legal_moves();

            for m in &legal {
                assert!(position.is_legal(*m), "{} {}", fen, m);
            }

            for from in Square::all() {
                for to in Square::all() {
                    let m = Move::new(from, to);
                    assert_eq!(position.is_legal(m), legal.contains(m), "{} {}", fen, m);
                }
            }
            assert_eq!(position.is_legal(Move::PASS), legal.contains(Move::PASS), "{}", fen);
            assert!(!position.is_legal(Move::NONE));
        }
    }

    #[test]
    fn make_move_single() {
        let mut position = Position::startpos();
        position.make_move(mv("b6"));
        assert_eq!(position.to_fen(), "x5o/1x5/7/7/7/7/o5x o 0 1");
        assert_eq!(position.hash(), position.calculate_hash());
    }

    #[test]
    fn make_move_double() {
        let mut position = Position::startpos();
        position.make_move(mv("a7c5"));
        assert_eq!(position.to_fen(), "6o/7/2x4/7/7/7/o5x o 1 1");
        assert_eq!(position.hash(), position.calculate_hash());
    }

    #[test]
    fn make_move_captures() {
        let position = Position::from_fen("7/7/7/7/7/ooo4/x6 x 0 1");
        let next = position.after_move(mv("b1"));
        assert_eq!(next.to_fen(), "7/7/7/7/7/xxx4/xx5 o 0 1");
        assert_eq!(next.hash(), next.calculate_hash());
        assert_eq!(position.to_fen(), "7/7/7/7/7/ooo4/x6 x 0 1");
    }

    #[test]
    fn make_move_none_is_ignored() {
        let position = Position::startpos();
        assert_eq!(position.after_move(Move::NONE), position);
    }

    #[test]
    fn counters_follow_moves() {
        // Placement resets the halfmove clock, relocation and capture do not.
        let mut position = Position::startpos();
        let script = [
            ("g2", 0, 1),
            ("a2", 0, 2),
            ("g3", 0, 2),
            ("a2a4", 1, 3),
            ("a7a5", 2, 3),
            ("a1b3", 3, 4),
            ("b4", 0, 4),
            ("f6", 0, 5),
        ];
        for (m, half, full) in script {
            let m = mv(m);
            assert!(position.is_legal(m), "{} in {}", m, position.to_fen());
            position.make_move(m);
            assert_eq!(position.halfmove_clock(), half, "after {}", m);
            assert_eq!(position.fullmove_number(), full, "after {}", m);
        }
        assert_eq!(position.to_fen(), "6o/5o1/x6/xx5/1x4x/6x/6x x 0 5");
    }

    #[test]
    fn counters_with_passes() {
        let mut position = Position::from_fen("7/7/7/7/4ooo/4ooo/4oox x 0 1");
        let script = [
            ("0000", 1, 1),
            ("d1", 0, 2),
            ("0000", 1, 2),
            ("d1b1", 2, 3),
            ("0000", 3, 3),
            ("a1", 0, 4),
        ];
        for (m, half, full) in script {
            let m = mv(m);
            assert!(position.is_legal(m), "{} in {}", m, position.to_fen());
            position.make_move(m);
            assert_eq!(position.halfmove_clock(), half, "after {}", m);
            assert_eq!(position.fullmove_number(), full, "after {}", m);
            assert_eq!(position.hash(), position.calculate_hash());
        }
    }

    #[test]
    fn counters_saturate() {
        let mut position = Position::from_fen("x5o/7/7/7/7/7/o5x o 0 4294967295");
        position.make_move(position.legal_moves()[0]);
        assert_eq!(position.fullmove_number(), u32::MAX);

        let mut position = Position::from_fen("x5o/7/7/7/7/7/o5x x 4294967295 1");
        assert!(position.legal_moves().is_empty());
        let m = mv("g1e3");
        assert!(position.pseudolegal_moves().contains(m));
        position.make_move(m);
        assert_eq!(position.halfmove_clock(), u32::MAX);
        assert_eq!(position.hash(), position.calculate_hash());
    }

    #[test]
    fn predicted_hash_matches() {
        for fen in FENS {
            let position = Position::from_fen(fen);
            for m in &position.legal_moves() {
                let next = position.after_move(*m);
                assert_eq!(next.hash(), position.predict_hash(*m), "{} {}", fen, m);
                assert_eq!(next.hash(), next.calculate_hash(), "{} {}", fen, m);
                assert_ne!(next.hash(), position.hash(), "{} {}", fen, m);
            }
        }
    }

    fn walk(position: &Position, depth: u32) {
        if depth == 0 {
            return;
        }
        for m in &position.legal_moves() {
            let next = position.after_move(*m);
            assert_eq!(next.hash(), position.predict_hash(*m));
            assert_eq!(next.hash(), next.calculate_hash());
            assert_ne!(next.hash(), position.hash());
            walk(&next, depth - 1);
        }
    }

    #[test]
    fn hash_consistency_walk() {
        for fen in &FENS[3..8] {
            walk(&Position::from_fen(fen), 2);
        }
    }

    proptest! {
        #[test]
        fn random_playouts_keep_invariants(choices in prop::collection::vec(any::<u16>(), 0..120)) {
            let mut position = Position::startpos();

            for choice in choices {
                let moves = position.legal_moves();
                if moves.is_empty() {
                    prop_assert!(position.is_terminal());
                    break;
                }

                let m = moves[choice as usize % moves.len()];
                prop_assert!(position.is_legal(m));

                let predicted = position.predict_hash(m);
                let before = position.hash();
                position.make_move(m);

                prop_assert_eq!(position.hash(), predicted);
                prop_assert_eq!(position.hash(), position.calculate_hash());
                prop_assert_ne!(position.hash(), before);
                prop_assert!((position.black() & position.white()).is_empty());
                prop_assert!((position.black() & position.gaps()).is_empty());
                prop_assert!((position.white() & position.gaps()).is_empty());
                prop_assert_eq!(
                    position.legal_captures().len() + position.legal_noncaptures().len(),
                    position.legal_moves().len()
                );
                prop_assert_eq!(position.count_legal_moves(), position.legal_moves().len());
            }
        }
    }
}
