//! The sport aggregate: a roster plus one format-specific payload.

use serde::{Deserialize, Serialize};

use super::entities::{Match, RankingEntry, Team};
use super::settings::{LeagueSettings, RankingSettings, RoundRobinSettings, TournamentSettings};
use crate::errors::ScoringResult;

/// Sport type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SportType {
    Tournament,
    RoundRobin,
    League,
    Ranking,
}

impl std::fmt::Display for SportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SportType::Tournament => write!(f, "tournament"),
            SportType::RoundRobin => write!(f, "roundRobin"),
            SportType::League => write!(f, "league"),
            SportType::Ranking => write!(f, "ranking"),
        }
    }
}

/// Format-specific state. Each variant carries only what its format uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SportFormat {
    Tournament {
        #[serde(default)]
        matches: Vec<Match>,
        #[serde(default)]
        settings: TournamentSettings,
    },
    RoundRobin {
        #[serde(default)]
        matches: Vec<Match>,
        #[serde(default)]
        settings: RoundRobinSettings,
    },
    /// Block-stage matches (with `blockId`) and playoff matches share one list.
    League {
        #[serde(default)]
        matches: Vec<Match>,
        #[serde(default)]
        settings: LeagueSettings,
    },
    Ranking {
        #[serde(default)]
        entries: Vec<RankingEntry>,
        #[serde(default)]
        settings: RankingSettings,
    },
}

/// A sport within the event.
///
/// The core never patches a sport in place: operations take the current
/// snapshot and hand back complete replacement match/team lists. Callers that
/// allow concurrent edits must re-read the latest snapshot before applying a
/// result, since the last whole-list write wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(flatten)]
    pub format: SportFormat,
}

impl Sport {
    pub fn new(id: impl Into<String>, name: impl Into<String>, format: SportFormat) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            teams: Vec::new(),
            format,
        }
    }

    pub fn with_teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = teams;
        self
    }

    pub fn sport_type(&self) -> SportType {
        match self.format {
            SportFormat::Tournament { .. } => SportType::Tournament,
            SportFormat::RoundRobin { .. } => SportType::RoundRobin,
            SportFormat::League { .. } => SportType::League,
            SportFormat::Ranking { .. } => SportType::Ranking,
        }
    }

    /// Tournaments and leagues play an elimination bracket; round robins and
    /// rankings do not.
    pub fn has_bracket(&self) -> bool {
        matches!(
            self.format,
            SportFormat::Tournament { .. } | SportFormat::League { .. }
        )
    }

    /// Matches of the sport; empty for the ranking format.
    pub fn matches(&self) -> &[Match] {
        match &self.format {
            SportFormat::Tournament { matches, .. }
            | SportFormat::RoundRobin { matches, .. }
            | SportFormat::League { matches, .. } => matches,
            SportFormat::Ranking { .. } => &[],
        }
    }

    /// Replace the whole match list. Returns `false` for the ranking format,
    /// which has no matches.
    pub fn replace_matches(&mut self, next: Vec<Match>) -> bool {
        match &mut self.format {
            SportFormat::Tournament { matches, .. }
            | SportFormat::RoundRobin { matches, .. }
            | SportFormat::League { matches, .. } => {
                *matches = next;
                true
            }
            SportFormat::Ranking { .. } => false,
        }
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Load a snapshot handed over by the persistence layer
    pub fn from_json(json: &str) -> ScoringResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize a snapshot for the persistence layer
    pub fn to_json(&self) -> ScoringResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
