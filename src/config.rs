//! Server configuration from environment: HOST, PORT, TEAM_POOL_CSV, SESSION_TTL_HOURS.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TEAM_POOL: &str = "data/teams.csv";
const DEFAULT_SESSION_TTL_HOURS: u64 = 12;

/// Settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CSV file with the team pool (`name,league_id,league_name,stars,logo`).
    pub team_pool_csv: PathBuf,
    /// Tournaments idle for longer than this are dropped.
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            team_pool_csv: PathBuf::from(DEFAULT_TEAM_POOL),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
        }
    }
}

impl ServerConfig {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`; unset, blank or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => log::warn!("Ignoring invalid PORT {:?}", port),
            }
        }
        if let Some(path) = get("TEAM_POOL_CSV") {
            config.team_pool_csv = PathBuf::from(path);
        }
        if let Some(hours) = get("SESSION_TTL_HOURS") {
            match hours.parse::<u64>() {
                Ok(hours) if hours > 0 => config.session_ttl = Duration::from_secs(hours * 3600),
                _ => log::warn!("Ignoring invalid SESSION_TTL_HOURS {:?}", hours),
            }
        }
        config
    }
}
