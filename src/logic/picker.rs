//! Team picker: randomly hands teams from the pool to players.

use crate::models::{AssignedTeams, Assignment, PickError, TeamRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Options for a spin. Remembered per browser by the web layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    /// `None` means every league in the pool.
    pub league_ids: Option<Vec<String>>,
    pub player_count: usize,
    pub min_rating: f32,
    pub max_rating: f32,
    /// At most one team per league across all players.
    pub one_per_league: bool,
    /// More than one gives each player several teams (one entrant per team).
    pub teams_per_player: usize,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            league_ids: None,
            player_count: 4,
            min_rating: 4.5,
            max_rating: 5.0,
            one_per_league: false,
            teams_per_player: 1,
        }
    }
}

impl PickerSettings {
    /// Total number of team slots to fill (saturates on absurd requests).
    pub fn slots(&self) -> usize {
        self.player_count.saturating_mul(self.teams_per_player.max(1))
    }

    fn allows(&self, team: &TeamRecord, min: f32, max: f32) -> bool {
        let league_ok = self
            .league_ids
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|id| *id == team.league_id));
        league_ok && team.stars >= min && team.stars <= max
    }
}

/// Distinct `(league_id, league_name)` pairs in pool order.
pub fn leagues(pool: &[TeamRecord]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    pool.iter()
        .filter(|t| seen.insert(t.league_id.clone()))
        .map(|t| (t.league_id.clone(), t.league_name.clone()))
        .collect()
}

/// Teams per slot, flattened in player order (what locks refer to).
pub fn slot_teams(assignments: &[Assignment]) -> Vec<TeamRecord> {
    assignments
        .iter()
        .flat_map(|a| match &a.teams {
            AssignedTeams::Single(team) => vec![team.clone()],
            AssignedTeams::Multiple(teams) => teams.clone(),
        })
        .collect()
}

/// Spin teams for every player (uses the thread RNG).
pub fn pick_teams(
    pool: &[TeamRecord],
    settings: &PickerSettings,
    locked: &[Option<TeamRecord>],
) -> Result<Vec<Assignment>, PickError> {
    pick_teams_with_rng(pool, settings, locked, &mut rand::thread_rng())
}

/// Spin teams for every player.
///
/// 1. Filter the pool by league and star range (bounds swapped if reversed).
/// 2. Keep locked slots whose team is still allowed and still in the pool.
/// 3. Fill the rest with distinct shuffled teams, or with one team from each
///    of distinct shuffled leagues when `one_per_league` is set.
pub fn pick_teams_with_rng<R: Rng + ?Sized>(
    pool: &[TeamRecord],
    settings: &PickerSettings,
    locked: &[Option<TeamRecord>],
    rng: &mut R,
) -> Result<Vec<Assignment>, PickError> {
    if settings.player_count < 2 {
        return Err(PickError::PlayerCountTooLow);
    }
    if settings.league_ids.as_ref().is_some_and(|ids| ids.is_empty()) {
        return Err(PickError::NoLeaguesSelected);
    }
    if !settings.min_rating.is_finite() || !settings.max_rating.is_finite() {
        return Err(PickError::InvalidRatingRange);
    }
    let (min, max) = if settings.min_rating > settings.max_rating {
        (settings.max_rating, settings.min_rating)
    } else {
        (settings.min_rating, settings.max_rating)
    };

    let mut available: Vec<TeamRecord> = pool
        .iter()
        .filter(|t| settings.allows(t, min, max))
        .cloned()
        .collect();
    if available.is_empty() {
        return Err(PickError::EmptyPool);
    }

    let slots = settings.slots();
    // Each slot takes a distinct team from the filtered pool.
    if slots > available.len() {
        return Err(if settings.one_per_league {
            PickError::NotEnoughLeagues {
                available: leagues(&available).len(),
                needed: slots,
            }
        } else {
            PickError::NotEnoughTeams {
                available: available.len(),
                needed: slots,
            }
        });
    }

    let mut picked: Vec<Option<TeamRecord>> = vec![None; slots];
    let mut used_leagues = HashSet::new();

    for (slot, team) in locked.iter().take(slots).enumerate() {
        let Some(team) = team else { continue };
        let Some(idx) = available.iter().position(|t| t.same_team(team)) else {
            continue;
        };
        let team = available.remove(idx);
        if settings.one_per_league {
            used_leagues.insert(team.league_id.clone());
        }
        picked[slot] = Some(team);
    }

    let open = picked.iter().filter(|p| p.is_none()).count();

    if settings.one_per_league {
        let mut league_ids: Vec<String> = leagues(&available)
            .into_iter()
            .map(|(id, _)| id)
            .filter(|id| !used_leagues.contains(id))
            .collect();
        let distinct = used_leagues.len() + league_ids.len();
        if distinct < slots {
            return Err(PickError::NotEnoughLeagues {
                available: distinct,
                needed: slots,
            });
        }

        league_ids.shuffle(rng);
        let mut leagues_iter = league_ids.into_iter();
        for slot in picked.iter_mut().filter(|p| p.is_none()) {
            let league = leagues_iter.next().ok_or(PickError::NotEnoughLeagues {
                available: distinct,
                needed: slots,
            })?;
            let in_league: Vec<&TeamRecord> =
                available.iter().filter(|t| t.league_id == league).collect();
            *slot = in_league.choose(rng).map(|t| (*t).clone());
        }
    } else {
        if available.len() < open {
            return Err(PickError::NotEnoughTeams {
                available: available.len(),
                needed: open,
            });
        }
        available.shuffle(rng);
        let mut remaining = available.into_iter();
        for slot in picked.iter_mut().filter(|p| p.is_none()) {
            *slot = remaining.next();
        }
    }

    let teams: Vec<TeamRecord> = picked.into_iter().flatten().collect();
    if teams.len() != slots {
        return Err(PickError::NotEnoughTeams {
            available: teams.len(),
            needed: slots,
        });
    }

    let per_player = settings.teams_per_player.max(1);
    let assignments = teams
        .chunks(per_player)
        .enumerate()
        .map(|(i, chunk)| {
            let label = format!("Player {}", i + 1);
            if per_player == 1 {
                Assignment::single(label, chunk[0].clone())
            } else {
                Assignment::multiple(label, chunk.to_vec())
            }
        })
        .collect();

    log::debug!("Picked {} teams for {} players", slots, settings.player_count);
    Ok(assignments)
}
