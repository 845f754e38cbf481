//! Per-format settings.

use serde::{Deserialize, Serialize};

use crate::errors::{ScoringError, ScoringResult};

/// How round-robin standings are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingMethod {
    /// Points, then goal difference, then goals for
    #[default]
    Points,
    /// Goal difference, then goals for
    GoalDifference,
    /// Goals for, then goal difference
    Goals,
}

impl std::fmt::Display for RankingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingMethod::Points => write!(f, "points"),
            RankingMethod::GoalDifference => write!(f, "goalDifference"),
            RankingMethod::Goals => write!(f, "goals"),
        }
    }
}

impl std::str::FromStr for RankingMethod {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" => Ok(RankingMethod::Points),
            "goalDifference" | "goal-difference" => Ok(RankingMethod::GoalDifference),
            "goals" => Ok(RankingMethod::Goals),
            other => Err(ScoringError::invalid_settings(
                "ranking_method",
                format!("unknown method '{other}'"),
            )),
        }
    }
}

/// Points awarded per result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointScheme {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointScheme {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Single-elimination settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    #[serde(default)]
    pub has_third_place_match: bool,
}

/// Round-robin settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRobinSettings {
    #[serde(default)]
    pub ranking_method: RankingMethod,
    #[serde(default)]
    pub points: PointScheme,
}

impl RoundRobinSettings {
    /// Validate configuration
    pub fn validate(&self) -> ScoringResult<()> {
        if self.points.win < self.points.draw || self.points.draw < self.points.loss {
            return Err(ScoringError::invalid_settings(
                "points",
                "win >= draw >= loss is required",
            ));
        }
        Ok(())
    }
}

/// League (blocks followed by a playoff) settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettings {
    pub block_count: usize,
    /// Teams advancing from each block into the playoff
    pub advancing_teams: usize,
    #[serde(default)]
    pub has_third_place_match: bool,
    /// Display ranking of the blocks; playoff qualification always uses points
    #[serde(default)]
    pub ranking_method: RankingMethod,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            block_count: 2,
            advancing_teams: 2,
            has_third_place_match: false,
            ranking_method: RankingMethod::Points,
        }
    }
}

impl LeagueSettings {
    /// Validate configuration
    pub fn validate(&self) -> ScoringResult<()> {
        if self.block_count < 1 {
            return Err(ScoringError::InvalidBlockCount(self.block_count));
        }
        if self.advancing_teams < 1 {
            return Err(ScoringError::InvalidAdvancingCount(self.advancing_teams));
        }
        Ok(())
    }
}

/// Sort direction for ranking scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Free-form ranking settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSettings {
    /// Label of the score column (e.g. "Time", "Distance")
    pub criteria_name: String,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            criteria_name: "Score".to_string(),
            sort_direction: SortDirection::Desc,
        }
    }
}

impl RankingSettings {
    /// Validate configuration
    pub fn validate(&self) -> ScoringResult<()> {
        if self.criteria_name.trim().is_empty() {
            return Err(ScoringError::invalid_settings(
                "criteria_name",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
