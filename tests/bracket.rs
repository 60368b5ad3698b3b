//! Integration tests for bracket generation.

use knockout_bracket::{
    build_bracket, build_bracket_with_rng, compute_stats, round_name, BracketError, Match,
    MatchStatus, Participant, Slot,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn participants(n: usize) -> Vec<Participant> {
    (1..=n)
        .map(|i| Participant::new(format!("player_{i}"), format!("Player {i}")))
        .collect()
}

fn seeded(n: usize, seed: u64) -> Vec<Match> {
    build_bracket_with_rng(&participants(n), &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn in_round(bracket: &[Match], round_index: u32) -> Vec<&Match> {
    bracket.iter().filter(|m| m.round_index == round_index).collect()
}

fn find<'a>(bracket: &'a [Match], id: &str) -> &'a Match {
    bracket.iter().find(|m| m.id == id).unwrap()
}

/// Shape and linkage checks shared by the example and property tests.
fn check_bracket(n: usize, bracket: &[Match]) {
    let stats = compute_stats(n).unwrap();
    assert_eq!(bracket.len(), stats.persisted_matches());
    assert_eq!(in_round(bracket, 0).len(), stats.first_round_matches);

    let rounds: HashSet<u32> = bracket.iter().map(|m| m.round_index).collect();
    assert_eq!(rounds, (0..stats.total_rounds).collect::<HashSet<_>>());

    // Every participant seated exactly once.
    let seated: Vec<&str> = bracket
        .iter()
        .flat_map(|m| m.players().iter().flatten())
        .map(|p| p.id.as_str())
        .collect();
    let unique: HashSet<&str> = seated.iter().copied().collect();
    assert_eq!(seated.len(), n);
    assert_eq!(unique.len(), n);

    let ids: HashSet<&str> = bracket.iter().map(|m| m.id.as_str()).collect();
    let mut targets = HashSet::new();
    for m in bracket {
        match &m.next_match_id {
            Some(next) => {
                assert!(ids.contains(next.as_str()), "{} points at missing {}", m.id, next);
                assert_eq!(find(bracket, next).round_index, m.round_index + 1);
                assert!(targets.insert((next.clone(), m.next_match_slot)));
            }
            None => assert_eq!(m.round_name, "Final"),
        }

        let expected = if m.has_both_players() {
            MatchStatus::Ready
        } else {
            MatchStatus::Waiting
        };
        assert_eq!(m.status(), expected);
        assert!(m.winner_id().is_none());
    }

    // An empty slot always has a feeder match that will fill it.
    for m in bracket {
        for slot in [Slot::Top, Slot::Bottom] {
            if m.player(slot).is_none() {
                assert!(
                    targets.contains(&(m.id.clone(), slot)),
                    "{} {:?} can never be filled",
                    m.id,
                    slot
                );
            }
        }
    }
    assert_eq!(bracket.iter().filter(|m| m.is_final()).count(), 1);
}

#[test]
fn one_participant_is_rejected() {
    assert_eq!(
        build_bracket(&participants(1)),
        Err(BracketError::InsufficientParticipants { count: 1 })
    );
}

#[test]
fn two_participants_make_a_ready_final() {
    let bracket = build_bracket(&participants(2)).unwrap();
    assert_eq!(bracket.len(), 1);
    let m = &bracket[0];
    assert_eq!(m.id, "round0_match0");
    assert_eq!(m.round_name, "Final");
    assert!(m.next_match_id.is_none());
    assert_eq!(m.status(), MatchStatus::Ready);
    assert!(m.player(Slot::Top).is_some());
    assert!(m.player(Slot::Bottom).is_some());
}

#[test]
fn four_participants_feed_both_final_slots() {
    let bracket = seeded(4, 7);
    check_bracket(4, &bracket);

    let first = in_round(&bracket, 0);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|m| m.status() == MatchStatus::Ready));
    assert!(first.iter().all(|m| m.round_name == "Semi Finals"));

    let last = in_round(&bracket, 1);
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].status(), MatchStatus::Waiting);
    assert_eq!(first[0].next_match_id.as_deref(), Some(last[0].id.as_str()));
    assert_eq!(first[1].next_match_id.as_deref(), Some(last[0].id.as_str()));
    assert_ne!(first[0].next_match_slot, first[1].next_match_slot);
}

#[test]
fn five_participants_seat_three_byes_in_round_one() {
    let bracket = seeded(5, 42);
    check_bracket(5, &bracket);
    assert_eq!(bracket.len(), 4);

    let first = in_round(&bracket, 0);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, "round0_match0");
    assert_eq!(first[0].status(), MatchStatus::Ready);

    let second = in_round(&bracket, 1);
    assert_eq!(second.len(), 2);
    let byes: usize = second
        .iter()
        .map(|m| m.players().iter().flatten().count())
        .sum();
    assert_eq!(byes, 3);

    // round1_match0 waits on the round-0 winner in its top slot.
    let waiting = find(&bracket, "round1_match0");
    assert!(waiting.player(Slot::Top).is_none());
    assert!(waiting.player(Slot::Bottom).is_some());
    assert_eq!(waiting.status(), MatchStatus::Waiting);
    assert_eq!(find(&bracket, "round1_match1").status(), MatchStatus::Ready);

    assert_eq!(in_round(&bracket, 2).len(), 1);
}

#[test]
fn thirteen_participants() {
    let bracket = seeded(13, 3);
    check_bracket(13, &bracket);
    assert_eq!(in_round(&bracket, 0).len(), 5);
    // 3 byes: round-1 positions 2 (one bye + a winner) and 3 (two byes).
    assert_eq!(find(&bracket, "round1_match3").status(), MatchStatus::Ready);
    assert_eq!(find(&bracket, "round1_match2").status(), MatchStatus::Waiting);
}

#[test]
fn large_tournament() {
    let bracket = seeded(74, 11);
    check_bracket(74, &bracket);
    assert_eq!(bracket.len(), 127 - 54);
}

#[test]
fn round_names_follow_distance_from_final() {
    let names: Vec<String> = (0..7).map(|r| round_name(r, 7)).collect();
    assert_eq!(
        names,
        [
            "Round of 128",
            "Round of 64",
            "Round of 32",
            "Round of 16",
            "Quarter Finals",
            "Semi Finals",
            "Final"
        ]
    );
    assert_eq!(round_name(0, 3), "Quarter Finals");
    assert_eq!(round_name(0, 1), "Final");
}

#[test]
fn same_seed_same_bracket() {
    assert_eq!(seeded(11, 99), seeded(11, 99));
}

#[test]
fn shuffle_varies_with_seed() {
    let first_pairs: HashSet<Vec<String>> = (0..20)
        .map(|seed| {
            seeded(8, seed)[0]
                .players()
                .iter()
                .flatten()
                .map(|p| p.id.clone())
                .collect()
        })
        .collect();
    assert!(first_pairs.len() > 1);
}

proptest! {
    #[test]
    fn every_bracket_is_complete_and_linked(n in 2usize..200, seed in any::<u64>()) {
        let bracket = seeded(n, seed);
        check_bracket(n, &bracket);
    }
}
