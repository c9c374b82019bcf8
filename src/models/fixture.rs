//! Group-stage Match, score fields, and score input parsing.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a match or tie, unique within a tournament (e.g. `A-R2M1`, `R1-T3`).
pub type FixtureId = String;

/// Which leg of a home-and-away pairing a group match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    #[default]
    First,
    Second,
}

/// A round-robin fixture inside a group. Goals are `None` until played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: FixtureId,
    pub group_id: String,
    /// 1-based round number; second-leg rounds continue after the first-leg ones.
    pub round: u32,
    pub leg: Leg,
    pub home: ParticipantId,
    pub away: ParticipantId,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl Match {
    pub fn new(
        group_id: &str,
        round: u32,
        slot: u32,
        leg: Leg,
        home: ParticipantId,
        away: ParticipantId,
    ) -> Self {
        Self {
            id: format!("{}-R{}M{}", group_id, round, slot),
            group_id: group_id.to_string(),
            round,
            leg,
            home,
            away,
            home_goals: None,
            away_goals: None,
        }
    }

    /// Final score when both sides have a valid value.
    pub fn score(&self) -> Option<(u32, u32)> {
        Some((self.home_goals?, self.away_goals?))
    }
}

/// A score input on a match or tie, as sent by the rendering layer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    /// Group match home goals.
    HomeGoals,
    /// Group match away goals.
    AwayGoals,
    Leg1Home,
    Leg1Away,
    /// Second leg, scored by the side hosting it (the tie's away side).
    Leg2Home,
    Leg2Away,
    PenaltiesHome,
    PenaltiesAway,
}

impl std::fmt::Display for ScoreField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScoreField::HomeGoals => "home_goals",
            ScoreField::AwayGoals => "away_goals",
            ScoreField::Leg1Home => "leg1_home",
            ScoreField::Leg1Away => "leg1_away",
            ScoreField::Leg2Home => "leg2_home",
            ScoreField::Leg2Away => "leg2_away",
            ScoreField::PenaltiesHome => "penalties_home",
            ScoreField::PenaltiesAway => "penalties_away",
        };
        f.write_str(name)
    }
}

/// Parse a user-entered goal or penalty value.
///
/// Only non-negative integers (as JSON numbers or numeric strings) count;
/// anything else, including blanks, negatives and fractions, means unset.
pub fn parse_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).ok();
            }
            let f = n.as_f64()?;
            if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
                Some(f as u32)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
