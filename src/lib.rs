//! Single-elimination tournament organizer: library with models, bracket engine and store.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    apply_result, build_bracket, build_bracket_with_rng, compute_stats, create_tournament,
    enroll_participant, preview_stats, report_result, reset_tournament, restart_tournament,
    start_tournament, withdraw_participant, AppliedResult, BracketError, BracketStats,
    ResultReport, ScoreUpdate,
};
pub use models::{
    round_name, Match, MatchId, MatchStatus, Participant, ParticipantId, Slot, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
pub use store::{MemoryStore, StoreError, TournamentStore};
