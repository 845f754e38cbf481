//! Data model shared by every scoring component.
//!
//! - [`entities`]: teams, matches, league blocks and ranking entries
//! - [`settings`]: per-format settings with validation
//! - [`sport`]: the sport aggregate, a tagged variant per format

pub mod entities;
pub mod settings;
pub mod sport;

pub use entities::{
    BlockId, LeagueBlock, Match, MatchId, MatchStatus, RankingEntry, Side, THIRD_PLACE_MATCH_NUMBER,
    Team, TeamId,
};
pub use settings::{
    LeagueSettings, PointScheme, RankingMethod, RankingSettings, RoundRobinSettings,
    SortDirection, TournamentSettings,
};
pub use sport::{Sport, SportFormat, SportType};
