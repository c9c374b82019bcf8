//! Data structures for the party cup: participants, teams, groups, bracket, tournament session.

mod bracket;
mod fixture;
mod group;
mod participant;
mod team;
mod tournament;

pub use bracket::{Bracket, Round, RoundName, Tie, BRACKET_SIZES, THIRD_PLACE_ID};
pub use fixture::{parse_score, FixtureId, Leg, Match, ScoreField};
pub use group::{Group, GroupMode, ScheduledMatch, StandingsRow};
pub use participant::{AssignedTeams, Assignment, Owner, Participant, ParticipantId};
pub use team::{load_team_pool, load_team_pool_from_path, PickError, TeamRecord};
pub use tournament::{
    CompetitionFormat, GroupView, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentView,
};
