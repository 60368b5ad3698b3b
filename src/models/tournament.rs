//! Tournament, TournamentStatus and TournamentError.

use crate::logic::BracketError;
use crate::models::participant::{Participant, ParticipantId};
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from tournament operations (enrollment and lifecycle).
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not in correct state: expected {expected:?}, got {actual:?}")]
    InvalidState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    #[error("Participant name must not be empty")]
    EmptyName,

    /// Names are unique, case-insensitive.
    #[error("A participant with this name already exists")]
    DuplicateParticipantName,

    #[error("Tournament is full ({max} participants)")]
    TournamentFull { max: usize },

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Tournament lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting participants.
    #[default]
    Registration,
    /// Registration closed, bracket being written.
    Locked,
    /// Bracket fully written; results being reported.
    InProgress,
    /// Final played; champion known.
    Finished,
}

/// Tournament record: enrollment, status and champion. Matches are stored separately.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    /// None means unlimited.
    pub max_participants: Option<usize>,
    pub participants: Vec<Participant>,
    pub champion: Option<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Registration with no participants.
    pub fn new(name: impl Into<String>, max_participants: Option<usize>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Registration,
            max_participants,
            participants: Vec::new(),
            champion: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Fails with InvalidState unless the tournament is in `expected`.
    pub fn require_status(&self, expected: TournamentStatus) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidState {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    pub fn set_status(&mut self, status: TournamentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Enroll a participant (Registration only). Returns the new participant.
    pub fn enroll(&mut self, name: &str) -> Result<Participant, TournamentError> {
        self.require_status(TournamentStatus::Registration)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if let Some(max) = self.max_participants {
            if self.participants.len() >= max {
                return Err(TournamentError::TournamentFull { max });
            }
        }
        if self
            .participants
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(TournamentError::DuplicateParticipantName);
        }
        let participant = Participant::enroll(name);
        self.participants.push(participant.clone());
        self.updated_at = Utc::now();
        Ok(participant)
    }

    /// Remove a participant by id (Registration only).
    pub fn withdraw(&mut self, participant_id: &str) -> Result<Participant, TournamentError> {
        self.require_status(TournamentStatus::Registration)?;
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or_else(|| TournamentError::ParticipantNotFound(participant_id.to_string()))?;
        self.updated_at = Utc::now();
        Ok(self.participants.remove(idx))
    }
}
