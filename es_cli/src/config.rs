//! CLI configuration management.
//!
//! Consolidates all environment variable reads; command-line flags take
//! precedence over the environment.

use std::path::PathBuf;

use event_scoring::model::LeagueSettings;

/// Complete CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Sport snapshot read and rewritten by every command
    pub snapshot: PathBuf,
    /// Seed for shuffles; a fresh random seed when unset
    pub seed: Option<u64>,
    /// Overrides applied on top of the snapshot's league settings
    pub league: LeagueOverrides,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// League setting overrides; `None` keeps the snapshot's value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeagueOverrides {
    pub block_count: Option<usize>,
    pub advancing_teams: Option<usize>,
    pub has_third_place_match: Option<bool>,
}

impl LeagueOverrides {
    /// Settings with the overrides applied
    pub fn apply(&self, settings: &LeagueSettings) -> LeagueSettings {
        LeagueSettings {
            block_count: self.block_count.unwrap_or(settings.block_count),
            advancing_teams: self.advancing_teams.unwrap_or(settings.advancing_teams),
            has_third_place_match: self
                .has_third_place_match
                .unwrap_or(settings.has_third_place_match),
            ranking_method: settings.ranking_method,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `snapshot_override` - Snapshot path from `--snapshot`
    /// * `seed_override` - Seed from `--seed`
    /// * `league_override` - League values from `--blocks`, `--advancing`, `--third-place`
    ///
    /// # Errors
    ///
    /// Returns error if no snapshot path is configured
    pub fn from_env(
        snapshot_override: Option<PathBuf>,
        seed_override: Option<u64>,
        league_override: LeagueOverrides,
    ) -> Result<Self, ConfigError> {
        let snapshot = snapshot_override
            .or_else(|| std::env::var_os("ES_SNAPSHOT").map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "ES_SNAPSHOT".to_string(),
                hint: "Pass --snapshot PATH or set ES_SNAPSHOT".to_string(),
            })?;

        let league = LeagueOverrides {
            block_count: league_override
                .block_count
                .or_else(|| parse_env("ES_BLOCK_COUNT")),
            advancing_teams: league_override
                .advancing_teams
                .or_else(|| parse_env("ES_ADVANCING")),
            has_third_place_match: league_override
                .has_third_place_match
                .or_else(|| parse_env("ES_THIRD_PLACE")),
        };

        Ok(CliConfig {
            snapshot,
            seed: seed_override.or_else(|| parse_env("ES_SEED")),
            league,
            pretty: parse_env_or("ES_PRETTY", true),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "ES_SNAPSHOT".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.league.block_count == Some(0) {
            return Err(ConfigError::Invalid {
                var: "ES_BLOCK_COUNT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.league.advancing_teams == Some(0) {
            return Err(ConfigError::Invalid {
                var: "ES_ADVANCING".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an environment variable; unset or unparseable values yield `None`
fn parse_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    parse_env(key).unwrap_or(default)
}
