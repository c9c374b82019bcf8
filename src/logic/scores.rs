//! Score entry: the single callback the rendering layer uses for every edit.

use crate::logic::knockout::recompute;
use crate::models::{parse_score, ScoreField, Tournament, TournamentError};
use serde_json::Value;

/// Apply a raw user input to a match or tie. Invalid input clears the field.
pub fn set_score_input(
    tournament: &mut Tournament,
    fixture_id: &str,
    field: ScoreField,
    input: &Value,
) -> Result<(), TournamentError> {
    set_score(tournament, fixture_id, field, parse_score(input))
}

/// Set (or clear, with `None`) one score field, then recompute what depends on it.
///
/// Group matches: only `home_goals`/`away_goals`; tables are derived on read.
/// Knockout ties and the third-place match: leg and penalty fields; the whole
/// bracket is recomputed.
pub fn set_score(
    tournament: &mut Tournament,
    fixture_id: &str,
    field: ScoreField,
    value: Option<u32>,
) -> Result<(), TournamentError> {
    let invalid_field = || TournamentError::InvalidField {
        id: fixture_id.to_string(),
        field,
    };

    if let Some(m) = tournament
        .groups
        .iter_mut()
        .find_map(|g| g.match_mut(fixture_id))
    {
        match field {
            ScoreField::HomeGoals => m.home_goals = value,
            ScoreField::AwayGoals => m.away_goals = value,
            _ => return Err(invalid_field()),
        }
        log::debug!("Match {}: {} = {:?}", fixture_id, field, value);
        return Ok(());
    }

    let bracket = tournament
        .bracket
        .as_mut()
        .ok_or_else(|| TournamentError::UnknownFixture(fixture_id.to_string()))?;
    let tie = bracket
        .tie_mut(fixture_id)
        .ok_or_else(|| TournamentError::UnknownFixture(fixture_id.to_string()))?;
    let slot = tie.field_mut(field).ok_or_else(invalid_field)?;
    *slot = value;
    log::debug!("Tie {}: {} = {:?}", fixture_id, field, value);

    recompute(bracket);
    Ok(())
}
