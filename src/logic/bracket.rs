//! Bracket generation: participants in, fully linked match tree out.

use crate::logic::{compute_stats, BracketError};
use crate::models::{Match, Participant, Slot};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build a bracket with a non-deterministic shuffle.
pub fn build_bracket(participants: &[Participant]) -> Result<Vec<Match>, BracketError> {
    build_bracket_with_rng(participants, &mut rand::thread_rng())
}

/// Build a single-elimination bracket for `participants`, seeding with `rng`.
///
/// 1. Size the bracket to the next power of 2.
/// 2. Shuffle participants uniformly.
/// 3. Create every match of every round, each linked to `floor(p/2)` of the next round.
/// 4. Pair the first `first_round_matches * 2` participants into round 0.
/// 5. Seat every remaining (bye) participant directly in round 1, in the slot its
///    walkover match would have fed.
/// 6. Drop the round-0 matches that never got two players.
///
/// Rounds after round 0 are always kept, even when still waiting.
pub fn build_bracket_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Vec<Match>, BracketError> {
    let stats = compute_stats(participants.len())?;
    log::debug!(
        "Building bracket: {} participants, size {}, {} byes, {} rounds",
        participants.len(),
        stats.bracket_size,
        stats.bye_count,
        stats.total_rounds
    );

    let mut seeded = participants.to_vec();
    seeded.shuffle(rng);

    let mut rounds: Vec<Vec<Match>> = (0..stats.total_rounds)
        .map(|round_index| {
            let matches_in_round = stats.bracket_size >> (round_index + 1);
            (0..matches_in_round)
                .map(|position| Match::new(round_index, position, stats.total_rounds))
                .collect()
        })
        .collect();

    let (contested, byes) = seeded.split_at(stats.first_round_matches * 2);

    for (m, pair) in rounds[0].iter_mut().zip(contested.chunks_exact(2)) {
        m.place(Slot::Top, pair[0].clone())?;
        m.place(Slot::Bottom, pair[1].clone())?;
    }

    // Byes only exist when there are at least two rounds.
    for (offset, bye) in byes.iter().enumerate() {
        let position = stats.first_round_matches + offset;
        rounds[1][position / 2].place(Slot::for_position(position), bye.clone())?;
        log::debug!("Bye: {} seated in round1_match{}", bye.id, position / 2);
    }

    rounds[0].retain(Match::has_both_players);
    Ok(rounds.into_iter().flatten().collect())
}
