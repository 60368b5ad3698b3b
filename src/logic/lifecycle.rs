//! Tournament lifecycle over a store: enrollment, start, result reporting, reset.

use crate::logic::{
    apply_result, build_bracket_with_rng, compute_stats, AppliedResult, BracketError,
    BracketStats, ResultReport,
};
use crate::models::{Participant, Tournament, TournamentError, TournamentId, TournamentStatus};
use crate::store::TournamentStore;
use rand::Rng;

/// Create a tournament in Registration and store it.
pub fn create_tournament<S: TournamentStore + ?Sized>(
    store: &mut S,
    name: &str,
    max_participants: Option<usize>,
) -> Result<Tournament, TournamentError> {
    let tournament = Tournament::new(name.trim(), max_participants);
    store.insert_tournament(tournament.clone())?;
    log::info!("Created tournament {} ({})", tournament.id, tournament.name);
    Ok(tournament)
}

/// Enroll a participant (Registration only).
pub fn enroll_participant<S: TournamentStore + ?Sized>(
    store: &mut S,
    id: TournamentId,
    name: &str,
) -> Result<Participant, TournamentError> {
    let mut tournament = store.tournament(id)?;
    let participant = tournament.enroll(name)?;
    store.update_tournament(&tournament)?;
    Ok(participant)
}

/// Remove a participant (Registration only).
pub fn withdraw_participant<S: TournamentStore + ?Sized>(
    store: &mut S,
    id: TournamentId,
    participant_id: &str,
) -> Result<Participant, TournamentError> {
    let mut tournament = store.tournament(id)?;
    let participant = tournament.withdraw(participant_id)?;
    store.update_tournament(&tournament)?;
    Ok(participant)
}

/// Bracket shape for the current enrollment.
pub fn preview_stats<S: TournamentStore + ?Sized>(
    store: &S,
    id: TournamentId,
) -> Result<BracketStats, TournamentError> {
    let tournament = store.tournament(id)?;
    Ok(compute_stats(tournament.participants.len())?)
}

/// Generate the bracket and open play (Registration -> Locked -> InProgress).
///
/// Matches are written in sequential groups of at most `max_write_batch()`. If any group
/// fails, written matches are deleted, the status goes back to Registration and the
/// write error is returned. Returns the number of matches written.
pub fn start_tournament<S, R>(
    store: &mut S,
    id: TournamentId,
    rng: &mut R,
) -> Result<usize, TournamentError>
where
    S: TournamentStore + ?Sized,
    R: Rng + ?Sized,
{
    let mut tournament = store.tournament(id)?;
    tournament.require_status(TournamentStatus::Registration)?;
    let matches = build_bracket_with_rng(&tournament.participants, rng)?;

    tournament.set_status(TournamentStatus::Locked);
    store.update_tournament(&tournament)?;

    let batch = store.max_write_batch().max(1);
    let written = matches
        .chunks(batch)
        .try_for_each(|group| store.write_matches(id, group));
    if let Err(e) = written {
        log::warn!("Bracket write for {} failed ({}); rolling back to registration", id, e);
        // Orphans from earlier groups go through the reset delete path.
        if let Err(cleanup) = store.delete_matches(id) {
            log::warn!("Could not delete partial bracket for {}: {}", id, cleanup);
        }
        tournament.set_status(TournamentStatus::Registration);
        store.update_tournament(&tournament)?;
        return Err(e.into());
    }

    tournament.set_status(TournamentStatus::InProgress);
    store.update_tournament(&tournament)?;
    log::info!(
        "Tournament {} started: {} participants, {} matches",
        id,
        tournament.participants.len(),
        matches.len()
    );
    Ok(matches.len())
}

/// Record a match result (InProgress only). Reporting the final finishes the tournament.
pub fn report_result<S: TournamentStore + ?Sized>(
    store: &mut S,
    id: TournamentId,
    report: &ResultReport,
) -> Result<AppliedResult, TournamentError> {
    let mut tournament = store.tournament(id)?;
    tournament.require_status(TournamentStatus::InProgress)?;
    let matches = store.matches(id)?;
    let applied = apply_result(&matches, report)?;
    store.commit_result(id, &applied)?;
    log::info!("Result recorded for {} in {}: {} won", report.match_id, id, report.winner_id);

    if let Some(champion) = &applied.champion {
        tournament.champion = Some(champion.clone());
        tournament.set_status(TournamentStatus::Finished);
        store.update_tournament(&tournament)?;
        log::info!("Tournament {} finished; champion {}", id, champion.name);
    }
    Ok(applied)
}

/// Discard every match and return to Registration. Needs 2+ participants to regenerate later.
pub fn reset_tournament<S: TournamentStore + ?Sized>(
    store: &mut S,
    id: TournamentId,
) -> Result<usize, TournamentError> {
    let mut tournament = store.tournament(id)?;
    let count = tournament.participants.len();
    if count < 2 {
        return Err(BracketError::InsufficientParticipants { count }.into());
    }
    let removed = store.delete_matches(id)?;
    tournament.champion = None;
    tournament.set_status(TournamentStatus::Registration);
    store.update_tournament(&tournament)?;
    log::info!("Tournament {} reset: {} matches discarded", id, removed);
    Ok(removed)
}

/// Reset and immediately generate a fresh bracket.
pub fn restart_tournament<S, R>(
    store: &mut S,
    id: TournamentId,
    rng: &mut R,
) -> Result<usize, TournamentError>
where
    S: TournamentStore + ?Sized,
    R: Rng + ?Sized,
{
    reset_tournament(store, id)?;
    start_tournament(store, id, rng)
}
