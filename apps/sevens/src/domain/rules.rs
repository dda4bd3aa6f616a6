use super::{Rank, Suit};

pub const PLAYERS: usize = 2;
pub const MAX_HAND_SIZE: usize = 4;
pub const WINNING_SCORE: u32 = 4;
pub const DECK_SIZE: usize = Rank::ALL.len() * Suit::ALL.len();

/// Outcome of the win-condition check for a pair of scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreVerdict {
    /// Seat index (0 or 1) has strictly more than the threshold, the other does not.
    Outright(usize),
    /// Both players sit exactly on the threshold; the last trick winner takes it.
    Tied,
    Undecided,
}

pub fn score_verdict(scores: [u32; PLAYERS]) -> ScoreVerdict {
    let [a, b] = scores;
    if a > WINNING_SCORE && b <= WINNING_SCORE {
        return ScoreVerdict::Outright(0);
    }
    if b > WINNING_SCORE && a <= WINNING_SCORE {
        return ScoreVerdict::Outright(1);
    }
    if a == WINNING_SCORE && b == WINNING_SCORE {
        return ScoreVerdict::Tied;
    }
    ScoreVerdict::Undecided
}
