//! Perft reference counts through the public API.

use ataxx_core::Move;
use ataxx_engine::{perft, perft_divide, perft_hashed, PerftTable, Position, Symmetry, TableKey};

const STARTPOS_COUNTS: [u64; 6] = [1, 16, 256, 6460, 155888, 4752668];

#[test]
fn startpos_counts() {
    let position = Position::startpos();
    for (depth, expected) in STARTPOS_COUNTS.iter().enumerate() {
        assert_eq!(perft(&position, depth as u32), *expected, "depth {}", depth);
    }
}

#[test]
fn gap_layouts() {
    let cases = [
        ("x5o/7/2-1-2/7/2-1-2/7/o5x x 0 1", 86528),
        ("x5o/7/3-3/2-1-2/3-3/7/o5x x 0 1", 133264),
    ];
    for (fen, expected) in cases {
        assert_eq!(perft(&Position::from_fen(fen), 4), expected, "{}", fen);
    }
}

#[test]
fn empty_board_has_no_moves() {
    assert_eq!(perft(&Position::default(), 1), 0);
    assert_eq!(perft(&Position::from_fen("7/7/7/7/7/7/7 x 0 1"), 1), 0);
}

#[test]
fn symmetric_images_have_equal_counts() {
    let position = Position::from_fen("3xx-1/-2ooxx/2oo1o1/1-xoo2/1-4o/x4-1/1x2xx1 x 0 1");
    let expected = perft(&position, 2);
    for symmetry in Symmetry::ALL {
        assert_eq!(
            perft(&position.transformed(symmetry), 2),
            expected,
            "{:?}",
            symmetry
        );
    }
}

#[test]
fn divide_matches_children() {
    let position = Position::from_fen("x5o/7/2-1-2/7/2-1-2/7/o5x x 0 1");
    let results = perft_divide(&position, 3);
    assert_eq!(results.len(), 14);

    for (m, nodes) in &results {
        assert!(position.is_legal(*m));
        assert_eq!(*nodes, perft(&position.after_move(*m), 2), "{}", m);
    }
    assert!(!results.iter().any(|(m, _)| *m == Move::PASS));
}

#[test]
fn hashed_counts_match_plain_perft() {
    let mut plain = PerftTable::with_entries(4096, TableKey::Hash);
    let mut canonical = PerftTable::with_entries(4096, TableKey::Canonical);
    for fen in [
        "startpos",
        "x5o/7/3-3/2-1-2/3-3/7/o5x x 0 1",
        "3xx-1/-2ooxx/2oo1o1/1-xoo2/1-4o/x4-1/1x2xx1 x 0 1",
        "7/7/7/7/4ooo/4ooo/4oox x 0 1",
    ] {
        let position = Position::from_fen(fen);
        let expected = perft(&position, 3);
        assert_eq!(perft_hashed(&position, 3, &mut plain), expected, "{}", fen);
        assert_eq!(perft_hashed(&position, 3, &mut canonical), expected, "{}", fen);
    }
    assert!(plain.hashfull() > 0);
}
