//! Result processing: record a match result and advance the winner.

use crate::logic::BracketError;
use crate::models::{Match, MatchId, Participant, ParticipantId, Slot};
use serde::{Deserialize, Serialize};

/// Optional per-slot scores reported with a result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    #[serde(default)]
    pub top: Option<u32>,
    #[serde(default)]
    pub bottom: Option<u32>,
}

/// A reported result for one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultReport {
    pub match_id: MatchId,
    pub winner_id: ParticipantId,
    #[serde(default)]
    pub scores: ScoreUpdate,
    /// Recorded for audit; the winner must already be the opponent.
    #[serde(default)]
    pub disqualified_id: Option<ParticipantId>,
}

impl ResultReport {
    pub fn new(match_id: impl Into<MatchId>, winner_id: impl Into<ParticipantId>) -> Self {
        Self {
            match_id: match_id.into(),
            winner_id: winner_id.into(),
            scores: ScoreUpdate::default(),
            disqualified_id: None,
        }
    }

    pub fn with_scores(mut self, top: Option<u32>, bottom: Option<u32>) -> Self {
        self.scores = ScoreUpdate { top, bottom };
        self
    }

    pub fn with_disqualified(mut self, participant_id: impl Into<ParticipantId>) -> Self {
        self.disqualified_id = Some(participant_id.into());
        self
    }
}

/// The matches a result changes. Persist `completed` and `advanced` as one unit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AppliedResult {
    /// The reporting match, now COMPLETED.
    pub completed: Match,
    /// The receiving match with the winner seated; None for the final.
    pub advanced: Option<Match>,
    /// Set when the final was reported.
    pub champion: Option<Participant>,
}

impl AppliedResult {
    pub fn updated_matches(&self) -> impl Iterator<Item = &Match> {
        std::iter::once(&self.completed).chain(self.advanced.iter())
    }

    /// Replace the changed matches in `bracket` by id.
    pub fn merge_into(&self, bracket: &mut [Match]) {
        for updated in self.updated_matches() {
            if let Some(m) = bracket.iter_mut().find(|m| m.id == updated.id) {
                *m = updated.clone();
            }
        }
    }
}

fn find<'a>(bracket: &'a [Match], match_id: &str) -> Option<&'a Match> {
    bracket.iter().find(|m| m.id == match_id)
}

/// Compute the effect of `report` on `bracket` without mutating it.
///
/// Fails, in order of checking, with MatchNotFound, InconsistentState (already completed),
/// MatchNotReady, InvalidWinner, InvalidDisqualification, and InconsistentState when the
/// receiving match is missing, completed, or already has someone in the target slot.
pub fn apply_result(bracket: &[Match], report: &ResultReport) -> Result<AppliedResult, BracketError> {
    let target = find(bracket, &report.match_id)
        .ok_or_else(|| BracketError::MatchNotFound(report.match_id.clone()))?;

    let mut completed = target.clone();
    if let Some(score) = report.scores.top {
        completed.record_score(Slot::Top, score);
    }
    if let Some(score) = report.scores.bottom {
        completed.record_score(Slot::Bottom, score);
    }
    completed.complete(&report.winner_id)?;

    if let Some(disqualified_id) = &report.disqualified_id {
        if *disqualified_id == report.winner_id || !completed.disqualify(disqualified_id) {
            return Err(BracketError::InvalidDisqualification {
                match_id: completed.id.clone(),
                participant_id: disqualified_id.clone(),
            });
        }
    }

    let winner = completed
        .winner()
        .map(Participant::advancing)
        .ok_or_else(|| BracketError::InvalidWinner {
            match_id: completed.id.clone(),
            winner_id: report.winner_id.clone(),
        })?;

    let Some(next_id) = completed.next_match_id.clone() else {
        log::info!("Final {} won by {}", completed.id, winner.id);
        return Ok(AppliedResult {
            completed,
            advanced: None,
            champion: Some(winner),
        });
    };

    let mut advanced = find(bracket, &next_id)
        .ok_or_else(|| BracketError::InconsistentState {
            match_id: completed.id.clone(),
            reason: format!("next match {} does not exist", next_id),
        })?
        .clone();
    advanced.place(completed.next_match_slot, winner)?;
    log::debug!(
        "{} advanced from {} to {} ({:?})",
        report.winner_id,
        completed.id,
        advanced.id,
        advanced.status()
    );

    Ok(AppliedResult {
        completed,
        advanced: Some(advanced),
        champion: None,
    })
}
