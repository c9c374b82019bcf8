//! Tournament session, its configuration, and the render view.

use crate::models::bracket::Bracket;
use crate::models::fixture::ScoreField;
use crate::models::group::{Group, ScheduledMatch, StandingsRow};
use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Knockout needs 2, 4, 8, 16 or 32 participants.
    InvalidBracketSize { count: usize },
    /// Requested count is below 2 or above what the assignment step produced.
    InvalidParticipantCount { requested: usize, available: usize },
    /// No team assignments to build a tournament from.
    NoAssignments,
    /// No match or tie with this id.
    UnknownFixture(String),
    /// The score field does not exist on this fixture (e.g. a second leg on a single-leg tie).
    InvalidField { id: String, field: ScoreField },
    /// The tournament has no group stage.
    NoGroupStage,
    /// The group tables do not yield any qualifier yet.
    NoQualifiers,
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidBracketSize { count } => write!(
                f,
                "Knockout supports 2, 4, 8, 16, or 32 players (got {})",
                count
            ),
            TournamentError::InvalidParticipantCount { requested, available } => write!(
                f,
                "You requested {} players but only {} teams exist from the last spin",
                requested, available
            ),
            TournamentError::NoAssignments => {
                write!(f, "No last spin found. Spin teams first in the team picker")
            }
            TournamentError::UnknownFixture(id) => write!(f, "No match or tie with id {}", id),
            TournamentError::InvalidField { id, field } => {
                write!(f, "Fixture {} has no {} score", id, field)
            }
            TournamentError::NoGroupStage => write!(f, "This tournament has no group stage"),
            TournamentError::NoQualifiers => {
                write!(f, "Not enough finished group tables to generate knockout")
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Which stages the tournament runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionFormat {
    /// One league table, everyone plays everyone.
    #[default]
    GroupsOnly,
    KnockoutOnly,
    /// Groups of about four, then a knockout seeded from the tables.
    GroupsThenKnockout,
}

/// Settings chosen before the tournament is created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default)]
    pub competition_format: CompetitionFormat,
    #[serde(default)]
    pub group_stage_home_and_away: bool,
    /// Applies to every knockout round except the final.
    #[serde(default)]
    pub knockout_home_and_away: bool,
    pub requested_participant_count: usize,
}

impl TournamentConfig {
    pub fn new(competition_format: CompetitionFormat, requested_participant_count: usize) -> Self {
        Self {
            competition_format,
            group_stage_home_and_away: false,
            knockout_home_and_away: false,
            requested_participant_count,
        }
    }

    pub fn has_group_stage(&self) -> bool {
        self.competition_format != CompetitionFormat::KnockoutOnly
    }
}

/// One interactive tournament: groups and/or bracket, owned by one session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    /// Entrants after multi-team expansion, in assignment order.
    pub participants: Vec<Participant>,
    /// Empty for knockout-only tournaments.
    pub groups: Vec<Group>,
    /// `None` until the knockout is built.
    pub bracket: Option<Bracket>,
}

impl Tournament {
    /// Empty tournament; stages are filled in by the setup logic.
    pub fn new(config: TournamentConfig, participants: Vec<Participant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            participants,
            groups: Vec::new(),
            bracket: None,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }
}

/// A group together with its current table.
#[derive(Clone, Debug, Serialize)]
pub struct GroupView<'a> {
    #[serde(flatten)]
    pub group: &'a Group,
    pub standings: Vec<StandingsRow>,
    pub complete: bool,
}

/// Plain render data for the presentation layer.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentView<'a> {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub config: &'a TournamentConfig,
    pub participants: &'a [Participant],
    pub groups: Vec<GroupView<'a>>,
    pub suggested_order: Vec<ScheduledMatch>,
    pub bracket: Option<&'a Bracket>,
    pub champion: Option<&'a Participant>,
}
