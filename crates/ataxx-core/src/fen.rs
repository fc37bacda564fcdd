//! Board notation parsing and serialization.
//!
//! A position is written as `<rows> <turn> [<halfmoves> [<fullmoves>]]`, e.g.
//! `x5o/7/7/7/7/7/o5x x 0 1`. Parsing is deliberately lenient: it never fails,
//! it stops decoding the board at the first character it does not understand,
//! and missing or unreadable counters fall back to their defaults. Callers that
//! need strict validation should re-serialize and compare.

use crate::{Color, Piece, Square};

/// The four fields of a board-notation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Row field, rank 7 first (e.g., "x5o/7/7/7/7/7/o5x").
    pub board: String,
    /// Side to move.
    pub side_to_move: Color,
    /// Halfmove clock (plies since the last single move).
    pub halfmove_clock: u32,
    /// Fullmove number, incremented after White moves.
    pub fullmove_number: u32,
}

impl FenFields {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "x5o/7/7/7/7/7/o5x x 0 1";

    /// Keyword accepted in place of [`FenFields::STARTPOS`].
    pub const STARTPOS_KEYWORD: &'static str = "startpos";

    /// Splits a board-notation string into its fields.
    pub fn parse(fen: &str) -> Self {
        let fen = fen.trim();
        if fen == Self::STARTPOS_KEYWORD {
            return Self::parse(Self::STARTPOS);
        }

        let mut parts = fen.split_whitespace();
        let board = parts.next().unwrap_or_default().to_string();

        let side_to_move = match parts.next() {
            None | Some("x" | "X" | "b" | "B") => Color::Black,
            Some(_) => Color::White,
        };

        let halfmove_clock = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        let fullmove_number = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);

        FenFields {
            board,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        }
    }

    /// Decodes the row field into the occupied cells it names.
    ///
    /// Empty cells are not reported. Decoding stops at the first unrecognized
    /// character or once the board is full, keeping everything placed so far.
    pub fn cells(&self) -> Vec<(Square, Piece)> {
        let mut cells = Vec::new();
        let mut file = 0u8;
        let mut rank = Square::STRIDE as i8 - 1;

        for c in self.board.chars() {
            if let Some(piece) = Piece::from_fen_char(c) {
                let Some(sq) = Self::cursor(file, rank) else {
                    break;
                };
                cells.push((sq, piece));
                file += 1;
            } else if let Some(run @ 1..=7) = c.to_digit(10) {
                file += run as u8;
            } else if c != '/' {
                break;
            }

            if file >= Square::STRIDE {
                if rank == 0 {
                    break;
                }
                file = 0;
                rank -= 1;
            }
        }

        cells
    }

    fn cursor(file: u8, rank: i8) -> Option<Square> {
        if rank < 0 {
            return None;
        }
        Square::from_coords(file, rank as u8)
    }

    /// Encodes a full board (rank 7 first) into a row field.
    pub fn encode_board<F>(piece_at: F) -> String
    where
        F: Fn(Square) -> Piece,
    {
        let mut board = String::new();

        for rank in (0..Square::STRIDE).rev() {
            let mut empty_count = 0;
            for file in 0..Square::STRIDE {
                let sq = Square::from_index_unchecked(rank * Square::STRIDE + file);
                match piece_at(sq).to_fen_char() {
                    Some(c) => {
                        if empty_count > 0 {
                            board.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        board.push(c);
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                board.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                board.push('/');
            }
        }

        board
    }

    /// Converts the fields back to a board-notation string with all four fields.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {}",
            self.board,
            self.side_to_move.to_fen_char(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenFields {
    fn default() -> Self {
        Self::parse(Self::STARTPOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::File;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn parse_startpos() {
        let fen = FenFields::parse(FenFields::STARTPOS);
        assert_eq!(fen.board, "x5o/7/7/7/7/7/o5x");
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn parse_startpos_keyword() {
        assert_eq!(FenFields::parse("startpos"), FenFields::default());
        assert_eq!(FenFields::parse("startpos").to_fen(), FenFields::STARTPOS);
    }

    #[test]
    fn parse_defaults_for_missing_fields() {
        let fen = FenFields::parse("7/7/7/7/7/7/7");
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);

        let fen = FenFields::parse("7/7/7/7/7/7/7 o 12");
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.halfmove_clock, 12);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.to_fen(), "7/7/7/7/7/7/7 o 12 1");
    }

    #[test]
    fn parse_turn_aliases() {
        for turn in ["x", "X", "b", "B"] {
            let fen = FenFields::parse(&format!("7/7/7/7/7/7/7 {}", turn));
            assert_eq!(fen.side_to_move, Color::Black);
        }
        for turn in ["o", "O", "w", "W", "?"] {
            let fen = FenFields::parse(&format!("7/7/7/7/7/7/7 {}", turn));
            assert_eq!(fen.side_to_move, Color::White);
        }
    }

    #[test]
    fn unreadable_counters_fall_back() {
        let fen = FenFields::parse("7/7/7/7/7/7/7 x abc def");
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
    }

    #[test]
    fn roundtrip() {
        for original in [
            "x5o/7/2-1-2/7/2-1-2/7/o5x x 0 1",
            "7/7/7/7/7/7/7 o 100 200",
            "3xo2/4o2/2x2-1/3-ox1/xx5/6o/1x3o1 x 7 31",
        ] {
            assert_eq!(FenFields::parse(original).to_fen(), original);
        }
    }

    #[test]
    fn cells_startpos() {
        let cells = FenFields::default().cells();
        assert_eq!(
            cells,
            vec![
                (Square::A7, Piece::Black),
                (Square::G7, Piece::White),
                (Square::A1, Piece::White),
                (Square::G1, Piece::Black),
            ]
        );
    }

    #[test]
    fn cells_gaps_and_aliases() {
        let fen = FenFields::parse("7/7/2-1-2/7/7/7/B5W b");
        let cells = fen.cells();
        assert!(cells.contains(&(sq("c5"), Piece::Gap)));
        assert!(cells.contains(&(sq("e5"), Piece::Gap)));
        assert!(cells.contains(&(Square::A1, Piece::Black)));
        assert!(cells.contains(&(Square::G1, Piece::White)));
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn cells_stop_at_unknown_character() {
        let fen = FenFields::parse("xx?oo/7/7/7/7/7/7 x");
        assert_eq!(
            fen.cells(),
            vec![(Square::A7, Piece::Black), (sq("b7"), Piece::Black)]
        );
    }

    #[test]
    fn cells_ignore_overflow_past_last_row() {
        let fen = FenFields::parse("7/7/7/7/7/7/6x/xxx x");
        assert_eq!(fen.cells(), vec![(Square::G1, Piece::Black)]);
    }

    #[test]
    fn cells_survive_oversized_row_field() {
        let fen = FenFields::parse(&("7/".repeat(200) + "x x 0 1"));
        assert!(fen.cells().is_empty());

        let fen = FenFields::parse(&("x6/".repeat(300) + " x 0 1"));
        let cells = fen.cells();
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|(sq, piece)| sq.file() == File::A && *piece == Piece::Black));
    }

    #[test]
    fn encode_board_runs() {
        let board = FenFields::encode_board(|sq| match sq {
            Square::A1 => Piece::White,
            Square::G7 => Piece::Black,
            Square::D4 => Piece::Gap,
            _ => Piece::Empty,
        });
        assert_eq!(board, "6x/7/7/3-3/7/7/o6");
    }
}
