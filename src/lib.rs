//! Party cup: team picker plus tournament engine (groups and knockout), with models and business logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    allocate, create_bracket, generate_knockout_from_groups, pick_teams, qualify, recompute,
    resolve_tie, schedule, set_score, set_score_input, standings, start_tournament,
    tournament_view, PickerSettings, TieOutcome,
};
pub use models::{
    Assignment, Bracket, CompetitionFormat, Group, GroupMode, Match, Participant, ParticipantId,
    PickError, Round, RoundName, ScoreField, StandingsRow, TeamRecord, Tie, Tournament,
    TournamentConfig, TournamentError, TournamentId,
};
