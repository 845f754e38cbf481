//! Core entities shared by every format: teams, matches, blocks and ranking entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Team ID type
pub type TeamId = String;

/// Match ID type
pub type MatchId = String;

/// League block ID type
pub type BlockId = String;

/// Match number reserved for the third-place match.
pub const THIRD_PLACE_MATCH_NUMBER: u32 = 0;

/// A competing team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Roster names
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Team {
    /// Create a team with an empty roster
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
            color: None,
        }
    }

    /// Attach roster names
    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }

    /// Attach a display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "inProgress"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Which side of a match a team occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    /// Slot fed by the winner of match `match_number` in the previous round:
    /// odd numbers fill `team1`, even numbers fill `team2`.
    pub fn for_feeder(match_number: u32) -> Self {
        if match_number % 2 == 1 {
            Side::Team1
        } else {
            Side::Team2
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

/// A single match between two (possibly not yet known) teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    #[serde(default)]
    pub team1_score: u32,
    #[serde(default)]
    pub team2_score: u32,
    /// 1-based round
    pub round: u32,
    /// 1-based within the round; `0` marks the third-place match
    pub match_number: u32,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub winner_id: Option<TeamId>,
    /// Set only for league block-stage matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    /// Explicit third-place discriminator
    #[serde(default)]
    pub is_third_place: bool,
    /// Match the winner advances into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Match {
    /// Create a scheduled match with zeroed scores
    pub fn new(id: impl Into<MatchId>, round: u32, match_number: u32) -> Self {
        Self {
            id: id.into(),
            team1_id: None,
            team2_id: None,
            team1_score: 0,
            team2_score: 0,
            round,
            match_number,
            status: MatchStatus::Scheduled,
            winner_id: None,
            block_id: None,
            is_third_place: false,
            next_match_id: None,
            date: None,
            notes: None,
        }
    }

    /// Set both team slots
    pub fn with_teams(mut self, team1: Option<TeamId>, team2: Option<TeamId>) -> Self {
        self.team1_id = team1;
        self.team2_id = team2;
        self
    }

    /// Set the scores
    pub fn with_scores(mut self, team1_score: u32, team2_score: u32) -> Self {
        self.team1_score = team1_score;
        self.team2_score = team2_score;
        self
    }

    /// Third-place match, recognised by the explicit flag or the legacy `0` match number.
    pub fn is_third_place_match(&self) -> bool {
        self.is_third_place || self.match_number == THIRD_PLACE_MATCH_NUMBER
    }

    /// League block-stage match
    pub fn is_block_match(&self) -> bool {
        self.block_id.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn has_score(&self) -> bool {
        self.team1_score > 0 || self.team2_score > 0
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team1_id.as_deref() == Some(team_id) || self.team2_id.as_deref() == Some(team_id)
    }

    pub fn team(&self, side: Side) -> Option<&TeamId> {
        match side {
            Side::Team1 => self.team1_id.as_ref(),
            Side::Team2 => self.team2_id.as_ref(),
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Option<TeamId> {
        match side {
            Side::Team1 => &mut self.team1_id,
            Side::Team2 => &mut self.team2_id,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Team1 => self.team1_score,
            Side::Team2 => self.team2_score,
        }
    }

    /// The team that did not win, when a winner is set.
    pub fn loser_id(&self) -> Option<&TeamId> {
        let winner = self.winner_id.as_ref()?;
        if self.team1_id.as_ref() == Some(winner) {
            self.team2_id.as_ref()
        } else {
            self.team1_id.as_ref()
        }
    }
}

/// A round-robin subgroup of a league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueBlock {
    pub id: BlockId,
    pub name: String,
    pub team_ids: Vec<TeamId>,
    pub matches: Vec<Match>,
}

impl LeagueBlock {
    pub fn contains(&self, team_id: &str) -> bool {
        self.team_ids.iter().any(|id| id == team_id)
    }
}

/// Free-form ranking entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub team_id: TeamId,
    /// 1-based
    pub rank: u32,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_place_by_flag_or_sentinel() {
        let legacy = Match::new("m", 2, THIRD_PLACE_MATCH_NUMBER);
        assert!(legacy.is_third_place_match());

        let mut flagged = Match::new("m", 2, 3);
        flagged.is_third_place = true;
        assert!(flagged.is_third_place_match());

        assert!(!Match::new("m", 2, 1).is_third_place_match());
    }

    #[test]
    fn test_side_for_feeder() {
        assert_eq!(Side::for_feeder(1), Side::Team1);
        assert_eq!(Side::for_feeder(2), Side::Team2);
        assert_eq!(Side::for_feeder(7), Side::Team1);
    }

    #[test]
    fn test_loser_id() {
        let mut m = Match::new("m", 1, 1).with_teams(Some("a".into()), Some("b".into()));
        assert_eq!(m.loser_id(), None);

        m.winner_id = Some("b".into());
        assert_eq!(m.loser_id(), Some(&"a".to_string()));
    }

    #[test]
    fn test_match_json_uses_camel_case() {
        let m = Match::new("r1-m1", 1, 1).with_teams(Some("a".into()), None);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["team1Id"], "a");
        assert_eq!(json["matchNumber"], 1);
        assert_eq!(json["status"], "scheduled");
        assert!(json.get("blockId").is_none());
    }
}
