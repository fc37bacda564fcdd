//! Hash table backed perft.
//!
//! Subtree counts are cached by position key so transpositions are counted
//! once. With [`TableKey::Canonical`] the eight symmetric images of a position
//! share one entry as well.

use super::{generate_moves, make_move};
use crate::{Bitboard, Position, HALFMOVE_LIMIT};

/// Which hash a [`PerftTable`] is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableKey {
    /// [`Position::hash`].
    #[default]
    Hash,
    /// [`Position::canonical_hash`].
    Canonical,
}

/// One cached subtree count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftEntry {
    pub key: u64,
    pub nodes: u64,
    pub depth: u32,
}

/// Fixed-size perft cache with one always-replaced entry per slot.
pub struct PerftTable {
    entries: Box<[PerftEntry]>,
    filled: usize,
    mode: TableKey,
}

impl PerftTable {
    /// Creates a table of roughly `mb` megabytes. Sizes below 1 MB get 1 MB.
    pub fn new(mb: usize, mode: TableKey) -> Self {
        let len = (mb.max(1) * 1024 * 1024) / std::mem::size_of::<PerftEntry>();
        Self::with_entries(len, mode)
    }

    /// Creates a table holding exactly `len` entries (at least one).
    pub fn with_entries(len: usize, mode: TableKey) -> Self {
        PerftTable {
            entries: vec![PerftEntry::default(); len.max(1)].into_boxed_slice(),
            filled: 0,
            mode,
        }
    }

    #[inline]
    pub fn mode(&self) -> TableKey {
        self.mode
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no slot has been written since creation or [`clear`](Self::clear).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.entries.fill(PerftEntry::default());
        self.filled = 0;
    }

    /// Per-mille of slots that have been written.
    pub fn hashfull(&self) -> u32 {
        (self.filled as u128 * 1000 / self.entries.len() as u128) as u32
    }

    /// Returns the key this table files `position` under.
    ///
    /// Zobrist keys leave gaps out, so the gap layout is mixed in here.
    pub fn key(&self, position: &Position) -> u64 {
        match self.mode {
            TableKey::Hash => position.hash() ^ gap_key(position.gaps()),
            TableKey::Canonical => {
                let symmetry = position.canonical_symmetry();
                let image = position.transformed(symmetry);
                image.hash() ^ gap_key(image.gaps())
            }
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Returns the cached count for `key` at `depth`, if present.
    pub fn probe(&self, key: u64, depth: u32) -> Option<u64> {
        let entry = &self.entries[self.index(key)];
        (entry.depth == depth && entry.key == key).then_some(entry.nodes)
    }

    /// Stores a count, replacing whatever held the slot.
    pub fn store(&mut self, key: u64, depth: u32, nodes: u64) {
        let idx = self.index(key);
        if self.entries[idx].depth == 0 {
            self.filled += 1;
        }
        self.entries[idx] = PerftEntry { key, nodes, depth };
    }
}

// Finalizer from splitmix64.
fn gap_key(gaps: Bitboard) -> u64 {
    let mut x = gaps.bits().wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Counts leaf nodes like [`perft`](super::perft::perft), caching subtree
/// counts in `table`.
///
/// Positions within reach of the halfmove limit are searched without the
/// table, since their counts depend on the clock.
pub fn perft_hashed(position: &Position, depth: u32, table: &mut PerftTable) -> u64 {
    match depth {
        0 => return 1,
        1 => return position.count_legal_moves() as u64,
        _ => {}
    }

    let cacheable = u64::from(position.halfmove_clock()) + u64::from(depth)
        <= u64::from(HALFMOVE_LIMIT);
    let key = table.key(position);
    if cacheable {
        if let Some(nodes) = table.probe(key, depth) {
            return nodes;
        }
    }

    let mut nodes = 0u64;
    for m in &generate_moves(position) {
        nodes += perft_hashed(&make_move(position, *m), depth - 1, table);
    }

    if cacheable {
        table.store(key, depth, nodes);
    }
    nodes
}
