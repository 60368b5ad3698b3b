//! Persistence adapter: what the lifecycle layer needs from a store, plus an in-memory one.

use crate::logic::AppliedResult;
use crate::models::{Match, MatchId, Tournament, TournamentId};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Write group of {size} exceeds the limit of {limit} operations")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("Match already exists: {0}")]
    DuplicateMatch(MatchId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Storage the orchestration layer runs against. Every method is one atomic unit.
pub trait TournamentStore {
    /// Most match records one `write_matches` call may carry.
    fn max_write_batch(&self) -> usize;

    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError>;

    fn tournament(&self, id: TournamentId) -> Result<Tournament, StoreError>;

    /// Overwrite the tournament record (status, participants, champion).
    fn update_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    /// Write a group of new matches: all or nothing.
    fn write_matches(&mut self, id: TournamentId, matches: &[Match]) -> Result<(), StoreError>;

    /// All matches of a tournament, in creation order.
    fn matches(&self, id: TournamentId) -> Result<Vec<Match>, StoreError>;

    /// Write the reporting match and the receiving match together.
    fn commit_result(&mut self, id: TournamentId, result: &AppliedResult) -> Result<(), StoreError>;

    /// Delete every match of a tournament; returns how many were removed.
    fn delete_matches(&mut self, id: TournamentId) -> Result<usize, StoreError>;
}

/// Default operation limit per atomic write group.
pub const DEFAULT_WRITE_BATCH: usize = 500;

/// Per-tournament entry: record, matches and last activity time (for auto-cleanup).
#[derive(Debug)]
struct TournamentEntry {
    tournament: Tournament,
    matches: Vec<Match>,
    last_activity: Instant,
}

/// In-memory store. Atomicity comes from exclusive access (`&mut self`, behind a lock in the server).
#[derive(Debug)]
pub struct MemoryStore {
    entries: HashMap<TournamentId, TournamentEntry>,
    max_write_batch: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_WRITE_BATCH)
    }
}

impl MemoryStore {
    pub fn new(max_write_batch: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_write_batch: max_write_batch.max(1),
        }
    }

    fn entry(&self, id: TournamentId) -> Result<&TournamentEntry, StoreError> {
        self.entries.get(&id).ok_or(StoreError::TournamentNotFound(id))
    }

    fn entry_mut(&mut self, id: TournamentId) -> Result<&mut TournamentEntry, StoreError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        entry.last_activity = Instant::now();
        Ok(entry)
    }

    /// Refresh a tournament's last activity.
    pub fn touch(&mut self, id: TournamentId) -> Result<(), StoreError> {
        self.entry_mut(id).map(|_| ())
    }

    /// Remove tournaments idle for at least `timeout`. Returns how many were removed.
    pub fn purge_inactive(&mut self, timeout: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_activity.elapsed() < timeout);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TournamentStore for MemoryStore {
    fn max_write_batch(&self) -> usize {
        self.max_write_batch
    }

    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError> {
        self.entries.insert(
            tournament.id,
            TournamentEntry {
                tournament,
                matches: Vec::new(),
                last_activity: Instant::now(),
            },
        );
        Ok(())
    }

    fn tournament(&self, id: TournamentId) -> Result<Tournament, StoreError> {
        self.entry(id).map(|e| e.tournament.clone())
    }

    fn update_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.entry_mut(tournament.id)?.tournament = tournament.clone();
        Ok(())
    }

    fn write_matches(&mut self, id: TournamentId, matches: &[Match]) -> Result<(), StoreError> {
        let limit = self.max_write_batch;
        if matches.len() > limit {
            return Err(StoreError::BatchTooLarge {
                size: matches.len(),
                limit,
            });
        }
        let entry = self.entry_mut(id)?;
        for (i, m) in matches.iter().enumerate() {
            let clash = entry.matches.iter().any(|e| e.id == m.id)
                || matches[..i].iter().any(|e| e.id == m.id);
            if clash {
                return Err(StoreError::DuplicateMatch(m.id.clone()));
            }
        }
        entry.matches.extend_from_slice(matches);
        Ok(())
    }

    fn matches(&self, id: TournamentId) -> Result<Vec<Match>, StoreError> {
        self.entry(id).map(|e| e.matches.clone())
    }

    fn commit_result(&mut self, id: TournamentId, result: &AppliedResult) -> Result<(), StoreError> {
        let entry = self.entry_mut(id)?;
        if let Some(missing) = result
            .updated_matches()
            .find(|u| !entry.matches.iter().any(|m| m.id == u.id))
        {
            return Err(StoreError::MatchNotFound(missing.id.clone()));
        }
        result.merge_into(&mut entry.matches);
        Ok(())
    }

    fn delete_matches(&mut self, id: TournamentId) -> Result<usize, StoreError> {
        let entry = self.entry_mut(id)?;
        let removed = entry.matches.len();
        entry.matches.clear();
        Ok(removed)
    }
}
