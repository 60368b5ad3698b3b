//! Errors raised by the bracket engine.

use crate::models::{MatchId, ParticipantId};
use thiserror::Error;

/// One variant per failure kind so callers can tell which step failed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    /// Not retryable until more participants enroll.
    #[error("Tournament requires at least 2 participants (have {count})")]
    InsufficientParticipants { count: usize },

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Match {0} is not playable yet: both players must be assigned")]
    MatchNotReady(MatchId),

    #[error("Winner {winner_id} is not a player of match {match_id}")]
    InvalidWinner {
        match_id: MatchId,
        winner_id: ParticipantId,
    },

    #[error("Cannot disqualify {participant_id} in match {match_id}: must be the winner's opponent")]
    InvalidDisqualification {
        match_id: MatchId,
        participant_id: ParticipantId,
    },

    /// Double-apply or corrupted bracket; needs a manual reset.
    #[error("Inconsistent bracket at {match_id}: {reason}")]
    InconsistentState { match_id: MatchId, reason: String },
}
