//! Render data: groups with their tables, the suggested order, and the bracket.

use crate::logic::groups::suggested_match_order;
use crate::logic::standings::standings;
use crate::models::{GroupView, Tournament, TournamentView};

/// Snapshot of everything the presentation layer draws. Tables are computed fresh.
pub fn tournament_view(tournament: &Tournament) -> TournamentView<'_> {
    let groups = tournament
        .groups
        .iter()
        .map(|group| GroupView {
            group,
            standings: standings(group),
            complete: group.is_complete(),
        })
        .collect();

    let bracket = tournament.bracket.as_ref();
    let champion = bracket
        .and_then(|b| b.champion().and_then(|id| b.participant(id)));

    TournamentView {
        id: tournament.id,
        created_at: tournament.created_at,
        config: &tournament.config,
        participants: &tournament.participants,
        groups,
        suggested_order: suggested_match_order(&tournament.groups),
        bracket,
        champion,
    }
}
