//! Game termination and results.
//!
//! A game ends when a side has lost every stone, when the halfmove clock
//! reaches [`HALFMOVE_LIMIT`], or when neither side can reach an empty cell.
//! A side that merely has no move passes; that alone does not end the game.

use crate::{Bitboard, Position};
use ataxx_core::Color;

/// Plies without a placement after which the game is drawn.
pub const HALFMOVE_LIMIT: u32 = 100;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Black has more stones.
    BlackWins,
    /// White has more stones.
    WhiteWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the winning color, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::BlackWins => Some(Color::Black),
            GameResult::WhiteWins => Some(Color::White),
            GameResult::Draw(_) => None,
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// The board is settled with equal stone counts.
    EqualStones,
    /// The halfmove clock reached [`HALFMOVE_LIMIT`] while moves remained.
    HalfmoveClock,
}

impl Position {
    /// Returns true if the game is over.
    pub fn is_terminal(&self) -> bool {
        if self.black().is_empty() || self.white().is_empty() {
            return true;
        }
        if self.halfmove_clock >= HALFMOVE_LIMIT {
            return true;
        }
        !self.anyone_can_move()
    }

    fn anyone_can_move(&self) -> bool {
        let both = self.black() | self.white();
        ((both.singles() | both.doubles()) & self.empty_cells()).is_not_empty()
    }

    /// Returns the game result once the position is terminal.
    ///
    /// A settled board (a side wiped out, or nobody able to move) is scored
    /// by stone count even when the halfmove clock has also run out.
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_terminal() {
            return None;
        }

        let black = self.black().count();
        let white = self.white().count();
        let settled = black == 0 || white == 0 || !self.anyone_can_move();

        if !settled {
            return Some(GameResult::Draw(DrawReason::HalfmoveClock));
        }

        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameResult::BlackWins,
            std::cmp::Ordering::Less => GameResult::WhiteWins,
            std::cmp::Ordering::Equal => GameResult::Draw(DrawReason::EqualStones),
        })
    }

    /// Returns every stone and every empty cell any stone could eventually reach.
    pub fn reachable(&self) -> Bitboard {
        self.flood(self.black() | self.white())
    }

    /// Returns the stones of `color` and every empty cell they could eventually reach.
    ///
    /// Enemy stones are treated as walls.
    pub fn reachable_by(&self, color: Color) -> Bitboard {
        self.flood(self.stones(color))
    }

    fn flood(&self, from: Bitboard) -> Bitboard {
        let mut reached = from;
        let mut remaining = self.empty_cells();

        loop {
            let frontier = (reached.singles() | reached.doubles()) & remaining;
            if frontier.is_empty() {
                return reached;
            }
            reached |= frontier;
            remaining ^= frontier;
        }
    }
}
