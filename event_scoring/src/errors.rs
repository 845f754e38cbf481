//! Scoring error types.

use thiserror::Error;

use crate::model::TeamId;

/// Errors returned by scoring operations.
///
/// Every variant is raised before any match or block is built, so a rejected
/// operation never leaves a partially generated result behind.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Not enough teams to build the requested structure
    #[error("Insufficient teams: need {needed}, have {actual}")]
    InsufficientTeams { needed: usize, actual: usize },

    /// Block count must be at least one
    #[error("Invalid block count: {0} (must be at least 1)")]
    InvalidBlockCount(usize),

    /// Advancing team count must be at least one
    #[error("Invalid advancing team count: {0} (must be at least 1)")]
    InvalidAdvancingCount(usize),

    /// Settings failed validation
    #[error("Invalid settings for {field}: {reason}")]
    InvalidSettings { field: String, reason: String },

    /// A block or entry references a team that is not on the roster
    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    /// Snapshot (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScoringError {
    pub(crate) fn invalid_settings(field: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidSettings {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for scoring operations
pub type ScoringResult<T> = Result<T, ScoringError>;
