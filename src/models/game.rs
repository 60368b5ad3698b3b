//! Match, MatchStatus and Slot: one node of the single-elimination tree.

use crate::logic::BracketError;
use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match, derived from its round and position.
pub type MatchId = String;

/// Where a match stands. Derived from players and winner, never set directly.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Fewer than two players assigned.
    #[default]
    Waiting,
    /// Both players assigned, no result yet.
    Ready,
    /// Result recorded.
    Completed,
}

/// One of the two player slots of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    Top,
    Bottom,
}

impl Slot {
    /// Slot fed by the match at `position` of the previous round.
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 0 {
            Slot::Top
        } else {
            Slot::Bottom
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::Top => 0,
            Slot::Bottom => 1,
        }
    }
}

/// Human label for a round: "Final", "Semi Finals", "Quarter Finals", then "Round of N"
/// where N is the number of bracket slots entering the round.
pub fn round_name(round_index: u32, total_rounds: u32) -> String {
    match total_rounds.saturating_sub(round_index + 1) {
        0 => "Final".to_string(),
        1 => "Semi Finals".to_string(),
        2 => "Quarter Finals".to_string(),
        from_final => format!("Round of {}", 1u64 << (from_final + 1)),
    }
}

/// A single match in the bracket.
///
/// Players, winner and status are private: every mutation goes through a method that
/// recomputes the status, so the three can never disagree.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Match {
    pub id: MatchId,
    /// 0 = earliest round.
    pub round_index: u32,
    pub round_name: String,
    /// None only for the final.
    pub next_match_id: Option<MatchId>,
    /// Slot of `next_match_id` this match's winner occupies.
    pub next_match_slot: Slot,
    players: [Option<Participant>; 2],
    winner_id: Option<ParticipantId>,
    status: MatchStatus,
}

impl Match {
    /// Empty match at `position` of round `round_index`, linked to its parent unless it is the final.
    pub fn new(round_index: u32, position: usize, total_rounds: u32) -> Self {
        let is_final = round_index + 1 >= total_rounds;
        let next_match_id = (!is_final).then(|| Self::id_for(round_index + 1, position / 2));
        Self {
            id: Self::id_for(round_index, position),
            round_index,
            round_name: round_name(round_index, total_rounds),
            next_match_id,
            next_match_slot: if is_final {
                Slot::Top
            } else {
                Slot::for_position(position)
            },
            players: [None, None],
            winner_id: None,
            status: MatchStatus::Waiting,
        }
    }

    /// Deterministic id for a round and position.
    pub fn id_for(round_index: u32, position: usize) -> MatchId {
        format!("round{}_match{}", round_index, position)
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn players(&self) -> &[Option<Participant>; 2] {
        &self.players
    }

    pub fn player(&self, slot: Slot) -> Option<&Participant> {
        self.players[slot.index()].as_ref()
    }

    pub fn winner_id(&self) -> Option<&ParticipantId> {
        self.winner_id.as_ref()
    }

    /// The winning participant, once completed.
    pub fn winner(&self) -> Option<&Participant> {
        let winner_id = self.winner_id.as_ref()?;
        self.players.iter().flatten().find(|p| &p.id == winner_id)
    }

    pub fn is_final(&self) -> bool {
        self.next_match_id.is_none()
    }

    pub fn has_both_players(&self) -> bool {
        self.players.iter().all(Option::is_some)
    }

    /// Slot a participant currently occupies in this match.
    pub fn slot_of(&self, participant_id: &str) -> Option<Slot> {
        [Slot::Top, Slot::Bottom]
            .into_iter()
            .find(|&slot| self.player(slot).is_some_and(|p| p.id == participant_id))
    }

    /// Put a participant into an empty slot. Completed matches and occupied slots are refused.
    pub fn place(&mut self, slot: Slot, participant: Participant) -> Result<(), BracketError> {
        if self.status == MatchStatus::Completed {
            return Err(BracketError::InconsistentState {
                match_id: self.id.clone(),
                reason: "match is already completed".to_string(),
            });
        }
        if let Some(existing) = self.player(slot) {
            return Err(BracketError::InconsistentState {
                match_id: self.id.clone(),
                reason: format!("{:?} slot already holds {}", slot, existing.id),
            });
        }
        self.players[slot.index()] = Some(participant);
        self.refresh_status();
        Ok(())
    }

    /// Set the score of whoever sits in `slot`. Empty slots are left alone.
    pub fn record_score(&mut self, slot: Slot, score: u32) {
        if let Some(p) = self.players[slot.index()].as_mut() {
            p.score = Some(score);
        }
    }

    /// Flag a participant in this match as disqualified. Returns false if they are not in it.
    pub fn disqualify(&mut self, participant_id: &str) -> bool {
        match self.slot_of(participant_id) {
            Some(slot) => {
                if let Some(p) = self.players[slot.index()].as_mut() {
                    p.disqualified = true;
                }
                true
            }
            None => false,
        }
    }

    /// Record the winner. Requires both players and the winner to be one of them.
    pub fn complete(&mut self, winner_id: &str) -> Result<(), BracketError> {
        if self.status == MatchStatus::Completed {
            return Err(BracketError::InconsistentState {
                match_id: self.id.clone(),
                reason: "result already recorded".to_string(),
            });
        }
        if !self.has_both_players() {
            return Err(BracketError::MatchNotReady(self.id.clone()));
        }
        if self.slot_of(winner_id).is_none() {
            return Err(BracketError::InvalidWinner {
                match_id: self.id.clone(),
                winner_id: winner_id.to_string(),
            });
        }
        self.winner_id = Some(winner_id.to_string());
        self.refresh_status();
        Ok(())
    }

    fn refresh_status(&mut self) {
        self.status = if self.winner_id.is_some() {
            MatchStatus::Completed
        } else if self.has_both_players() {
            MatchStatus::Ready
        } else {
            MatchStatus::Waiting
        };
    }
}
