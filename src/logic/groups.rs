//! Group stage: allocation of participants into groups and the overall playing order.

use crate::logic::round_robin::schedule;
use crate::models::{Group, GroupMode, Participant, ParticipantId, ScheduledMatch};
use rand::seq::SliceRandom;
use rand::Rng;

/// Target members per group in `GroupsOfFour` mode.
const GROUP_SIZE: usize = 4;

/// Matches taken from one group before moving to the next in the suggested order.
const MATCHES_PER_TURN: usize = 2;

/// Number of groups for `n` participants.
pub fn group_count(n: usize, mode: GroupMode) -> usize {
    match mode {
        GroupMode::SingleGroup => 1,
        GroupMode::GroupsOfFour if n <= GROUP_SIZE => 1,
        GroupMode::GroupsOfFour => {
            // round(n / 4), ties away from zero
            let rounded = (n + GROUP_SIZE / 2) / GROUP_SIZE;
            rounded.max(2)
        }
    }
}

/// Split participants into groups and schedule each group (uses the thread RNG).
pub fn allocate(participants: &[Participant], mode: GroupMode, double_round: bool) -> Vec<Group> {
    allocate_with_rng(participants, mode, double_round, &mut rand::thread_rng())
}

/// Split participants into groups and schedule each group.
///
/// 1. Shuffle, so teams of the same owner do not land in predictable slots.
/// 2. Deal entry `i` to group `i % group_count`; sizes differ by at most one.
/// 3. Name groups `A`, `B`, `C`, ... and build a round robin per group.
pub fn allocate_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    mode: GroupMode,
    double_round: bool,
    rng: &mut R,
) -> Vec<Group> {
    if participants.is_empty() {
        return Vec::new();
    }

    let count = group_count(participants.len(), mode);
    let mut groups: Vec<Group> = (0..count)
        .map(|i| Group {
            id: group_label(i),
            teams: Vec::new(),
            matches: Vec::new(),
        })
        .collect();

    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);

    for (idx, p) in shuffled.into_iter().enumerate() {
        groups[idx % count].teams.push(p);
    }

    for group in &mut groups {
        let ids: Vec<ParticipantId> = group.teams.iter().map(|p| p.id).collect();
        group.matches = schedule(&group.id, &ids, double_round);
    }

    log::debug!(
        "Allocated {} participants into {} group(s)",
        participants.len(),
        groups.len()
    );
    groups
}

/// `A`..`Z`, then `AA`, `AB`, ... for very large fields.
fn group_label(index: usize) -> String {
    let letter = |i: usize| char::from(b'A' + (i % 26) as u8);
    if index < 26 {
        letter(index).to_string()
    } else {
        format!("{}{}", letter(index / 26 - 1), letter(index))
    }
}

/// Suggested order to play the whole group stage: two matches from each group in turn.
pub fn suggested_match_order(groups: &[Group]) -> Vec<ScheduledMatch> {
    let mut order = Vec::new();
    let mut cursors = vec![0usize; groups.len()];
    let total: usize = groups.iter().map(|g| g.matches.len()).sum();

    while order.len() < total {
        for (group, cursor) in groups.iter().zip(cursors.iter_mut()) {
            let take = group.matches[*cursor..].iter().take(MATCHES_PER_TURN);
            for m in take {
                order.push(ScheduledMatch {
                    index: order.len() + 1,
                    group_id: group.id.clone(),
                    match_id: m.id.clone(),
                });
                *cursor += 1;
            }
        }
    }

    order
}
