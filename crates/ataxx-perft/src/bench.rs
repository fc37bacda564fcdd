//! Fixed benchmark layouts.
//!
//! Twenty openings with the stones in the corners and different gap patterns,
//! so the timings cover a range of board shapes.

pub const BENCH_FENS: [&str; 20] = [
    "x5o/7/7/7/7/7/o5x x 0 1",
    "x5o/7/2-1-2/7/2-1-2/7/o5x x 0 1",
    "x5o/7/3-3/2-1-2/3-3/7/o5x x 0 1",
    "x2-2o/3-3/2---2/7/2---2/3-3/o2-2x x 0 1",
    "x2-2o/3-3/7/--3--/7/3-3/o2-2x x 0 1",
    "x1-1-1o/2-1-2/2-1-2/7/2-1-2/2-1-2/o1-1-1x x 0 1",
    "x5o/7/2-1-2/3-3/2-1-2/7/o5x x 0 1",
    "x5o/7/3-3/2---2/3-3/7/o5x x 0 1",
    "x5o/2-1-2/1-3-1/7/1-3-1/2-1-2/o5x x 0 1",
    "x5o/1-3-1/2-1-2/7/2-1-2/1-3-1/o5x x 0 1",
    "x-1-1-o/-1-1-1-/1-1-1-1/-1-1-1-/1-1-1-1/-1-1-1-/o-1-1-x x 0 1",
    "x-1-1-o/1-1-1-1/1-1-1-1/1-1-1-1/1-1-1-1/1-1-1-1/o-1-1-x x 0 1",
    "x1-1-1o/2-1-2/-------/2-1-2/-------/2-1-2/o1-1-1x x 0 1",
    "x5o/1-----1/1-3-1/1-1-1-1/1-3-1/1-----1/o5x x 0 1",
    "x-1-1-o/1-1-1-1/-1-1-1-/-1-1-1-/-1-1-1-/1-1-1-1/o-1-1-x x 0 1",
    "x5o/1--1--1/1--1--1/7/1--1--1/1--1--1/o5x x 0 1",
    "x-3-o/1-1-1-1/1-1-1-1/3-3/1-1-1-1/1-1-1-1/o-3-x x 0 1",
    "x2-2o/3-3/3-3/-------/3-3/3-3/o2-2x x 0 1",
    "x2-2o/2-1-2/1-3-1/-2-2-/1-3-1/2-1-2/o2-2x x 0 1",
    "x5o/6-/1-4-/-3--1/2-4/7/o-3-x x 0 1",
];

/// Formats a duration as seconds with millisecond precision.
pub fn format_seconds(elapsed: std::time::Duration) -> String {
    format!("{}.{:03}", elapsed.as_secs(), elapsed.subsec_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ataxx_engine::Position;
    use std::time::Duration;

    #[test]
    fn layouts_are_live_openings() {
        for fen in BENCH_FENS {
            let position = Position::from_fen(fen);
            assert_eq!(position.to_fen(), fen, "notation drift");
            assert_eq!(position.black().count(), 2, "{}", fen);
            assert_eq!(position.white().count(), 2, "{}", fen);
            assert!(!position.is_terminal(), "{}", fen);
            assert!(position.count_legal_moves() > 0, "{}", fen);
        }
    }

    #[test]
    fn format_seconds_pads_millis() {
        assert_eq!(format_seconds(Duration::from_millis(1234)), "1.234");
        assert_eq!(format_seconds(Duration::from_millis(5)), "0.005");
        assert_eq!(format_seconds(Duration::from_secs(12)), "12.000");
    }
}
