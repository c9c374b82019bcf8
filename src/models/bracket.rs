//! Knockout bracket: ties, rounds, and the third-place match.

use crate::models::fixture::{FixtureId, ScoreField};
use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};

/// Bracket sizes the knockout supports.
pub const BRACKET_SIZES: [usize; 5] = [2, 4, 8, 16, 32];

/// Fixture id of the third-place match.
pub const THIRD_PLACE_ID: &str = "3P";

/// Display name of a knockout round, derived from its participant count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum RoundName {
    #[serde(rename = "Final")]
    Final,
    #[serde(rename = "Semi-finals")]
    SemiFinals,
    #[serde(rename = "Quarter-finals")]
    QuarterFinals,
    #[serde(rename = "Round of 16")]
    RoundOf16,
    #[serde(rename = "Round of 32")]
    RoundOf32,
    #[serde(rename = "Knockout")]
    Knockout,
}

impl RoundName {
    pub fn for_count(count: usize) -> Self {
        match count {
            2 => RoundName::Final,
            4 => RoundName::SemiFinals,
            8 => RoundName::QuarterFinals,
            16 => RoundName::RoundOf16,
            32 => RoundName::RoundOf32,
            _ => RoundName::Knockout,
        }
    }
}

impl std::fmt::Display for RoundName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoundName::Final => "Final",
            RoundName::SemiFinals => "Semi-finals",
            RoundName::QuarterFinals => "Quarter-finals",
            RoundName::RoundOf16 => "Round of 16",
            RoundName::RoundOf32 => "Round of 32",
            RoundName::Knockout => "Knockout",
        };
        f.write_str(name)
    }
}

/// A knockout fixture, single-leg or over two legs.
///
/// `winner`/`loser` are derived; they are overwritten on every recompute.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tie {
    pub id: FixtureId,
    pub home: ParticipantId,
    pub away: ParticipantId,
    pub two_legged: bool,
    pub leg1_home: Option<u32>,
    pub leg1_away: Option<u32>,
    /// Second leg is hosted by `away`: `leg2_home` is the away side's goals.
    pub leg2_home: Option<u32>,
    pub leg2_away: Option<u32>,
    pub penalties_home: Option<u32>,
    pub penalties_away: Option<u32>,
    pub winner: Option<ParticipantId>,
    pub loser: Option<ParticipantId>,
}

impl Tie {
    pub fn new(id: impl Into<FixtureId>, home: ParticipantId, away: ParticipantId, two_legged: bool) -> Self {
        Self {
            id: id.into(),
            home,
            away,
            two_legged,
            leg1_home: None,
            leg1_away: None,
            leg2_home: None,
            leg2_away: None,
            penalties_home: None,
            penalties_away: None,
            winner: None,
            loser: None,
        }
    }

    /// Mutable slot for a score field, or `None` if the field does not apply to this tie.
    pub fn field_mut(&mut self, field: ScoreField) -> Option<&mut Option<u32>> {
        match field {
            ScoreField::Leg1Home => Some(&mut self.leg1_home),
            ScoreField::Leg1Away => Some(&mut self.leg1_away),
            ScoreField::Leg2Home if self.two_legged => Some(&mut self.leg2_home),
            ScoreField::Leg2Away if self.two_legged => Some(&mut self.leg2_away),
            ScoreField::PenaltiesHome => Some(&mut self.penalties_home),
            ScoreField::PenaltiesAway => Some(&mut self.penalties_away),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }
}

/// One round of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: RoundName,
    pub ties: Vec<Tie>,
}

impl Round {
    /// Winners in tie order, or `None` while any tie is undecided.
    pub fn winners(&self) -> Option<Vec<ParticipantId>> {
        self.ties.iter().map(|t| t.winner).collect()
    }
}

/// Knockout state: rounds created so far plus the derived third-place match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub initial_participant_count: usize,
    pub home_and_away: bool,
    /// Entrants in shuffled seed order (for name lookup).
    pub participants: Vec<Participant>,
    pub rounds: Vec<Round>,
    /// Populated from the two semi-final losers once both semi-finals are decided.
    pub third_place_match: Option<Tie>,
}

impl Bracket {
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Number of rounds a complete bracket has (log2 of the entrant count).
    pub fn total_rounds(&self) -> usize {
        self.initial_participant_count.max(1).trailing_zeros() as usize
    }

    /// Tie by id in any round, or the third-place match.
    pub fn tie_mut(&mut self, id: &str) -> Option<&mut Tie> {
        if id == THIRD_PLACE_ID {
            return self.third_place_match.as_mut();
        }
        self.rounds
            .iter_mut()
            .flat_map(|r| r.ties.iter_mut())
            .find(|t| t.id == id)
    }

    /// Winner of the final, once it and every earlier round are decided.
    pub fn champion(&self) -> Option<ParticipantId> {
        let last = self.rounds.last()?;
        if last.name != RoundName::Final {
            return None;
        }
        let settled = self
            .rounds
            .iter()
            .all(|r| r.ties.iter().all(Tie::is_decided));
        if !settled {
            return None;
        }
        last.ties.first().and_then(|t| t.winner)
    }
}
