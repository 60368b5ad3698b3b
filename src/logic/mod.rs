//! Tournament business logic: bracket shape, generation, result processing, lifecycle.

mod bracket;
mod error;
mod lifecycle;
mod results;
mod stats;

pub use bracket::{build_bracket, build_bracket_with_rng};
pub use error::BracketError;
pub use lifecycle::{
    create_tournament, enroll_participant, preview_stats, report_result, reset_tournament,
    restart_tournament, start_tournament, withdraw_participant,
};
pub use results::{apply_result, AppliedResult, ResultReport, ScoreUpdate};
pub use stats::{compute_stats, BracketStats};
