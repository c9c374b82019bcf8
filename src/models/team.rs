//! Team records (read-only to the engine) and team pool loading.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A club or national team that can be handed to a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub league_id: String,
    pub league_name: String,
    /// 0.5 to 5.0 in 0.5 steps.
    pub stars: f32,
    #[serde(default)]
    pub logo: String,
}

impl TeamRecord {
    pub fn new(
        name: impl Into<String>,
        league_id: impl Into<String>,
        league_name: impl Into<String>,
        stars: f32,
    ) -> Self {
        Self {
            name: name.into(),
            league_id: league_id.into(),
            league_name: league_name.into(),
            stars,
            logo: String::new(),
        }
    }

    /// Same team as `other` as far as the picker is concerned (name, league, rating).
    pub fn same_team(&self, other: &TeamRecord) -> bool {
        self.name == other.name && self.league_id == other.league_id && self.stars == other.stars
    }
}

/// Read a team pool from CSV with header `name,league_id,league_name,stars,logo`.
pub fn load_team_pool<R: io::Read>(reader: R) -> Result<Vec<TeamRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize().collect()
}

/// Read a team pool from a CSV file on disk.
pub fn load_team_pool_from_path(path: impl AsRef<Path>) -> Result<Vec<TeamRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    rdr.deserialize().collect()
}

/// Errors from the team picker.
#[derive(Clone, Debug, PartialEq)]
pub enum PickError {
    /// Fewer than 2 players requested.
    PlayerCountTooLow,
    /// No league selected.
    NoLeaguesSelected,
    /// Rating bounds are not numbers.
    InvalidRatingRange,
    /// No team matches the selected leagues and rating range.
    EmptyPool,
    /// Not enough distinct teams for the open slots.
    NotEnoughTeams { available: usize, needed: usize },
    /// Not enough distinct leagues when only one team per league is allowed.
    NotEnoughLeagues { available: usize, needed: usize },
}

impl std::fmt::Display for PickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickError::PlayerCountTooLow => write!(f, "Player count must be at least 2"),
            PickError::NoLeaguesSelected => write!(f, "Select at least one league"),
            PickError::InvalidRatingRange => write!(f, "Select a valid rating range"),
            PickError::EmptyPool => {
                write!(f, "No teams match this rating range in the selected leagues")
            }
            PickError::NotEnoughTeams { available, needed } => write!(
                f,
                "Not enough teams ({}) for {} remaining slots. Add more leagues or widen the rating range",
                available, needed
            ),
            PickError::NotEnoughLeagues { available, needed } => write!(
                f,
                "Only {} leagues have teams in this rating range but {} are needed. Allow multiple teams per league or lower the player count",
                available, needed
            ),
        }
    }
}

impl std::error::Error for PickError {}
