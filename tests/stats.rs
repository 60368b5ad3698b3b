//! Integration tests for bracket shape arithmetic.

use knockout_bracket::{compute_stats, BracketError, BracketStats};

#[test]
fn two_participants_is_a_single_final() {
    assert_eq!(
        compute_stats(2).unwrap(),
        BracketStats {
            bracket_size: 2,
            bye_count: 0,
            first_round_matches: 1,
            total_rounds: 1,
            total_matches: 1,
        }
    );
}

#[test]
fn perfect_power_of_two_has_no_byes() {
    let stats = compute_stats(8).unwrap();
    assert_eq!(stats.bracket_size, 8);
    assert_eq!(stats.bye_count, 0);
    assert_eq!(stats.first_round_matches, 4);
    assert_eq!(stats.total_rounds, 3);
    assert_eq!(stats.total_matches, 7);
    assert_eq!(stats.persisted_matches(), 7);
}

#[test]
fn five_participants_need_three_byes() {
    let stats = compute_stats(5).unwrap();
    assert_eq!(stats.bracket_size, 8);
    assert_eq!(stats.bye_count, 3);
    assert_eq!(stats.first_round_matches, 1);
    assert_eq!(stats.total_rounds, 3);
    // Theoretical count includes the three suppressed walkovers.
    assert_eq!(stats.total_matches, 7);
    assert_eq!(stats.persisted_matches(), 4);
}

#[test]
fn larger_counts() {
    let stats = compute_stats(13).unwrap();
    assert_eq!((stats.bracket_size, stats.bye_count, stats.first_round_matches), (16, 3, 5));
    assert_eq!(stats.total_rounds, 4);

    let stats = compute_stats(74).unwrap();
    assert_eq!(stats.bracket_size, 128);
    assert_eq!(stats.bye_count, 54);
    assert_eq!(stats.first_round_matches, 10);
    assert_eq!(stats.total_rounds, 7);
    assert_eq!(stats.total_matches, 127);
}

#[test]
fn fewer_than_two_participants_is_rejected() {
    assert_eq!(
        compute_stats(1),
        Err(BracketError::InsufficientParticipants { count: 1 })
    );
    assert_eq!(
        compute_stats(0),
        Err(BracketError::InsufficientParticipants { count: 0 })
    );
}
