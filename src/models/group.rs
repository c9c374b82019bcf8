//! Group and standings rows.

use crate::models::fixture::Match;
use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};

/// How the participant list is split into groups.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// Everyone in one league table.
    #[default]
    SingleGroup,
    /// Groups of about four, as even as possible.
    GroupsOfFour,
}

/// A group: fixed membership plus its round-robin fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// `A`, `B`, `C`, ... in allocation order.
    pub id: String,
    pub teams: Vec<Participant>,
    pub matches: Vec<Match>,
}

impl Group {
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.teams.iter().find(|p| p.id == id)
    }

    pub fn match_mut(&mut self, match_id: &str) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// True once every fixture has a score.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.score().is_some())
    }
}

/// One line of a group table. Always derived from the matches, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub participant_id: ParticipantId,
    pub label: String,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingsRow {
    pub fn for_participant(p: &Participant) -> Self {
        Self {
            participant_id: p.id,
            label: p.label.clone(),
            team_name: p.team_name().to_string(),
            ..Self::default()
        }
    }

    /// Record one played match from this participant's point of view.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        if scored > conceded {
            self.won += 1;
        } else if scored < conceded {
            self.lost += 1;
        } else {
            self.drawn += 1;
        }
        self.points = 3 * self.won + self.drawn;
    }
}

/// An entry of the suggested playing order across all groups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// 1-based position in the overall order.
    pub index: usize,
    pub group_id: String,
    pub match_id: String,
}
