//! Data structures for the tournament: participants, matches, tournament record.

mod game;
mod participant;
mod tournament;

pub use game::{round_name, Match, MatchId, MatchStatus, Slot};
pub use participant::{Participant, ParticipantId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
