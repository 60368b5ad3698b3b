//! Bracket shape from a participant count alone.

use crate::logic::BracketError;
use serde::{Deserialize, Serialize};

/// Shape of a single-elimination bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketStats {
    /// Smallest power of 2 >= participant count.
    pub bracket_size: usize,
    pub bye_count: usize,
    /// Round-0 matches actually played.
    pub first_round_matches: usize,
    pub total_rounds: u32,
    /// Full theoretical bracket, walkover slots included. Larger than the persisted match
    /// count whenever there are byes.
    pub total_matches: usize,
}

impl BracketStats {
    /// Matches a built bracket actually holds: one walkover is suppressed per bye.
    pub fn persisted_matches(&self) -> usize {
        self.total_matches - self.bye_count
    }
}

/// Compute the bracket shape for `participant_count` players.
pub fn compute_stats(participant_count: usize) -> Result<BracketStats, BracketError> {
    if participant_count < 2 {
        return Err(BracketError::InsufficientParticipants {
            count: participant_count,
        });
    }
    let bracket_size = participant_count.next_power_of_two();
    let bye_count = bracket_size - participant_count;
    Ok(BracketStats {
        bracket_size,
        bye_count,
        first_round_matches: (participant_count - bye_count) / 2,
        total_rounds: bracket_size.trailing_zeros(),
        total_matches: bracket_size - 1,
    })
}
