//! Knockout qualifiers from group tables, World Cup style: A1 vs B2, B1 vs A2.

use crate::logic::standings::standings;
use crate::models::{Group, Participant};

/// Seed list for the knockout, taken from the current tables.
///
/// Groups are sorted by id and taken in pairs `(A, B)`, emitting
/// `A1, B2, B1, A2`. A pair where either table has fewer than two rows is
/// skipped. A trailing unpaired group contributes its leader only. Tables
/// are used as they stand; unfinished groups are not waited for.
pub fn qualify(groups: &[Group]) -> Vec<Participant> {
    let mut sorted: Vec<&Group> = groups.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut qualified = Vec::new();
    for pair in sorted.chunks(2) {
        match pair {
            [a, b] => {
                let (Some([a1, a2]), Some([b1, b2])) = (top_two(a), top_two(b)) else {
                    log::debug!("Skipping groups {} and {}: not enough ranked entries", a.id, b.id);
                    continue;
                };
                qualified.extend([a1, b2, b1, a2]);
            }
            [single] => {
                if let Some(leader) = leader(single) {
                    qualified.push(leader);
                }
            }
            _ => {}
        }
    }
    qualified
}

fn ranked(group: &Group) -> Vec<Participant> {
    standings(group)
        .iter()
        .filter_map(|row| group.participant(row.participant_id).cloned())
        .collect()
}

fn top_two(group: &Group) -> Option<[Participant; 2]> {
    let mut ranked = ranked(group).into_iter();
    Some([ranked.next()?, ranked.next()?])
}

fn leader(group: &Group) -> Option<Participant> {
    ranked(group).into_iter().next()
}
