//! Group tables: recomputed from the match list on every call.

use crate::models::{Group, StandingsRow};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute the current table for a group.
///
/// Only matches with both scores set count. Every member gets a row, played
/// or not. Order: points, goal difference, goals for (all descending), then
/// label ascending ignoring case; exact label then participant id settle the
/// rest so the order is total.
pub fn standings(group: &Group) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = group.teams.iter().map(StandingsRow::for_participant).collect();
    let index: HashMap<_, _> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.participant_id, i))
        .collect();

    for m in &group.matches {
        let Some((home_goals, away_goals)) = m.score() else {
            continue;
        };
        let (Some(&h), Some(&a)) = (index.get(&m.home), index.get(&m.away)) else {
            continue;
        };
        rows[h].record(home_goals, away_goals);
        rows[a].record(away_goals, home_goals);
    }

    rows.sort_by(compare_rows);
    rows
}

/// Table order between two rows (`Less` means `a` ranks higher).
pub fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.participant_id.cmp(&b.participant_id))
}
