//! Round-robin fixture generation (circle method).

use crate::models::{Leg, Match, ParticipantId};

/// Pairings per round for a single round robin, as `(home, away)`.
///
/// An odd count gets a bye slot; pairs against the bye are dropped, so each
/// participant sits out at most one round.
pub fn round_robin_rounds(ids: &[ParticipantId]) -> Vec<Vec<(ParticipantId, ParticipantId)>> {
    if ids.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<ParticipantId>> = ids.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let mut rounds = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        let pairs = (0..n / 2)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(home), Some(away)) => Some((home, away)),
                _ => None,
            })
            .collect();
        rounds.push(pairs);

        // First slot stays put; the last one wraps around to position 1.
        slots[1..].rotate_right(1);
    }

    rounds
}

/// Build a group's fixture list.
///
/// First legs come in round order, then slot order. With `double_round` the
/// same pairings follow again with home and away swapped, numbered as the
/// rounds after the last first-leg round.
pub fn schedule(group_id: &str, ids: &[ParticipantId], double_round: bool) -> Vec<Match> {
    let rounds = round_robin_rounds(ids);
    let first_leg_rounds = rounds.len() as u32;

    let mut matches: Vec<Match> = rounds
        .iter()
        .zip(1u32..)
        .flat_map(|(pairs, round)| {
            pairs.iter().zip(1u32..).map(move |(&(home, away), slot)| {
                Match::new(group_id, round, slot, Leg::First, home, away)
            })
        })
        .collect();

    if double_round {
        let second_legs = rounds.iter().zip(1u32..).flat_map(|(pairs, round)| {
            pairs.iter().zip(1u32..).map(move |(&(home, away), slot)| {
                Match::new(group_id, first_leg_rounds + round, slot, Leg::Second, away, home)
            })
        });
        matches.extend(second_legs);
    }

    log::debug!(
        "Scheduled {} matches for group {} ({} participants, double round: {})",
        matches.len(),
        group_id,
        ids.len(),
        double_round
    );
    matches
}
