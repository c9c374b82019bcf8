//! Participant, Owner and Assignment data structures.

use crate::models::team::TeamRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in matches, ties and lookups).
pub type ParticipantId = Uuid;

/// Back-reference to the player who owns a participant in multi-team mode.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub label: String,
}

/// An entrant in a group or bracket: a player, or one of a player's teams.
///
/// Identity is the `id`; labels and teams may repeat across participants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub label: String,
    pub team: TeamRecord,
    /// Set only when this entrant is one of several teams owned by one player.
    pub owner: Option<Owner>,
}

impl Participant {
    /// Create a participant with a fresh id and no owner.
    pub fn new(label: impl Into<String>, team: TeamRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            team,
            owner: None,
        }
    }

    /// Create an entrant for one team of a multi-team owner.
    pub fn owned(owner: Owner, team: TeamRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: format!("{} ({})", team.name, owner.label),
            team,
            owner: Some(owner),
        }
    }

    /// Team name shown next to the label.
    pub fn team_name(&self) -> &str {
        &self.team.name
    }
}

/// Teams handed to a player by the team picker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignedTeams {
    Single(TeamRecord),
    Multiple(Vec<TeamRecord>),
}

/// Output of the team assignment step: one player with one or more teams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub label: String,
    pub teams: AssignedTeams,
}

impl Assignment {
    pub fn single(label: impl Into<String>, team: TeamRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            teams: AssignedTeams::Single(team),
        }
    }

    pub fn multiple(label: impl Into<String>, teams: Vec<TeamRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            teams: AssignedTeams::Multiple(teams),
        }
    }

    /// Turn this assignment into tournament entrants.
    ///
    /// A single team keeps the player as the entrant; a team list yields one
    /// owned entrant per team.
    pub fn into_participants(self) -> Vec<Participant> {
        match self.teams {
            AssignedTeams::Single(team) => vec![Participant {
                id: self.id,
                label: self.label,
                team,
                owner: None,
            }],
            AssignedTeams::Multiple(teams) => {
                let owner = Owner {
                    id: self.id,
                    label: self.label,
                };
                teams
                    .into_iter()
                    .map(|team| Participant::owned(owner.clone(), team))
                    .collect()
            }
        }
    }
}
