//! Participant: an enrolled player as it appears in a match slot.

use serde::{Deserialize, Serialize};

/// Opaque identifier, unique within a tournament.
pub type ParticipantId = String;

/// A player in the tournament. Match slots hold their own copy so scores stay per-match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Score in the match this copy sits in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disqualified: bool,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: None,
            disqualified: false,
        }
    }

    /// Create a participant with a fresh UUID v4 id (enrollment).
    pub fn enroll(name: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), name)
    }

    /// Copy carried into the next round: same identity, no match-local score or flag.
    pub fn advancing(&self) -> Self {
        Self::new(self.id.clone(), self.name.clone())
    }
}
