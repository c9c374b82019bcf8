//! Tournament business logic: scheduling, tables, qualification, knockout, setup, scores.

mod groups;
mod knockout;
mod picker;
mod qualification;
mod round_robin;
mod scores;
mod setup;
mod standings;
mod view;

pub use groups::{allocate, allocate_with_rng, group_count, suggested_match_order};
pub use knockout::{
    create_bracket, create_bracket_with_rng, create_round, recompute, resolve_tie, TieOutcome,
};
pub use picker::{leagues, pick_teams, pick_teams_with_rng, slot_teams, PickerSettings};
pub use qualification::qualify;
pub use round_robin::{round_robin_rounds, schedule};
pub use scores::{set_score, set_score_input};
pub use setup::{
    expand_assignments, generate_knockout_from_groups, generate_knockout_from_groups_with_rng,
    start_tournament, start_tournament_with_rng, validate_config,
};
pub use standings::{compare_rows, standings};
pub use view::tournament_view;
