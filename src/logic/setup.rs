//! Setup: turn team assignments plus configuration into a running tournament.

use crate::logic::groups::allocate_with_rng;
use crate::logic::knockout::create_bracket_with_rng;
use crate::logic::qualification::qualify;
use crate::models::{
    Assignment, CompetitionFormat, GroupMode, Participant, Tournament, TournamentConfig,
    TournamentError, BRACKET_SIZES,
};
use rand::Rng;

/// Expand assignments into entrants: multi-team owners yield one entrant per team.
pub fn expand_assignments(assignments: Vec<Assignment>) -> Vec<Participant> {
    assignments
        .into_iter()
        .flat_map(Assignment::into_participants)
        .collect()
}

/// Check the configuration against the number of available entrants.
pub fn validate_config(config: &TournamentConfig, available: usize) -> Result<(), TournamentError> {
    let requested = config.requested_participant_count;
    if requested < 2 || requested > available {
        return Err(TournamentError::InvalidParticipantCount { requested, available });
    }
    if config.competition_format == CompetitionFormat::KnockoutOnly
        && !BRACKET_SIZES.contains(&requested)
    {
        return Err(TournamentError::InvalidBracketSize { count: requested });
    }
    Ok(())
}

/// Create a tournament from the last team assignments (uses the thread RNG).
pub fn start_tournament(
    config: TournamentConfig,
    assignments: Vec<Assignment>,
) -> Result<Tournament, TournamentError> {
    start_tournament_with_rng(config, assignments, &mut rand::thread_rng())
}

/// Create a tournament from the last team assignments.
///
/// 1. Expand assignments and validate the requested count.
/// 2. Keep the first `requested_participant_count` entrants.
/// 3. Build a single group, groups of four, or the knockout bracket, per format.
pub fn start_tournament_with_rng<R: Rng + ?Sized>(
    config: TournamentConfig,
    assignments: Vec<Assignment>,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    if assignments.is_empty() {
        return Err(TournamentError::NoAssignments);
    }
    let mut participants = expand_assignments(assignments);
    validate_config(&config, participants.len())?;
    participants.truncate(config.requested_participant_count);

    let mut tournament = Tournament::new(config, participants);
    let config = &tournament.config;
    match config.competition_format {
        CompetitionFormat::GroupsOnly => {
            tournament.groups = allocate_with_rng(
                &tournament.participants,
                GroupMode::SingleGroup,
                config.group_stage_home_and_away,
                rng,
            );
        }
        CompetitionFormat::GroupsThenKnockout => {
            tournament.groups = allocate_with_rng(
                &tournament.participants,
                GroupMode::GroupsOfFour,
                config.group_stage_home_and_away,
                rng,
            );
        }
        CompetitionFormat::KnockoutOnly => {
            tournament.bracket = Some(create_bracket_with_rng(
                tournament.participants.clone(),
                config.knockout_home_and_away,
                rng,
            )?);
        }
    }

    log::info!(
        "Created tournament {} ({:?}, {} participants)",
        tournament.id,
        tournament.config.competition_format,
        tournament.participants.len()
    );
    Ok(tournament)
}

/// Build (or rebuild) the knockout from the current group tables (uses the thread RNG).
pub fn generate_knockout_from_groups(tournament: &mut Tournament) -> Result<(), TournamentError> {
    generate_knockout_from_groups_with_rng(tournament, &mut rand::thread_rng())
}

/// Build (or rebuild) the knockout from the current group tables.
///
/// Tables are taken as they stand, finished or not. Replaces any existing bracket.
pub fn generate_knockout_from_groups_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    match tournament.config.competition_format {
        CompetitionFormat::GroupsThenKnockout => {}
        CompetitionFormat::GroupsOnly => return Err(TournamentError::InvalidState),
        CompetitionFormat::KnockoutOnly => return Err(TournamentError::NoGroupStage),
    }
    if tournament.groups.is_empty() {
        return Err(TournamentError::NoGroupStage);
    }

    let qualified = qualify(&tournament.groups);
    if qualified.is_empty() {
        return Err(TournamentError::NoQualifiers);
    }
    if tournament.groups.iter().any(|g| !g.is_complete()) {
        log::warn!(
            "Tournament {}: building knockout from unfinished group tables",
            tournament.id
        );
    }

    let bracket = create_bracket_with_rng(qualified, tournament.config.knockout_home_and_away, rng)?;
    tournament.bracket = Some(bracket);
    Ok(())
}
