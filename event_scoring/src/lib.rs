//! # Event Scoring
//!
//! Scoring core for a multi-sport event. Four formats are supported:
//! single-elimination tournaments, round robins, leagues (round-robin blocks
//! followed by a playoff bracket) and free-form rankings.
//!
//! Every operation takes a snapshot (teams, matches, settings) and returns a
//! complete next state. Nothing here stores anything; persisting the
//! [`Sport`] aggregate is the caller's job.
//!
//! ## Core Modules
//!
//! - [`model`]: teams, matches, blocks, settings and the [`Sport`] aggregate
//! - [`standings`]: ranked statistics from completed matches
//! - [`bracket`]: skeleton, match generation and winner progression
//! - [`league`]: block distribution, block standings and playoff seeding
//! - [`view`]: render-ready bracket projection
//! - [`ranking`]: ordering of free-form ranking entries
//! - [`roster`]: default teams from a roster provider
//!
//! ## Example
//!
//! ```
//! use event_scoring::{Team, compute_standings, generate_round_robin_matches};
//! use event_scoring::model::{PointScheme, RankingMethod};
//!
//! let teams = vec![Team::new("a", "A"), Team::new("b", "B")];
//! let mut matches = generate_round_robin_matches(&teams);
//! matches[0] = matches[0].clone().with_scores(2, 1);
//! matches[0].status = event_scoring::MatchStatus::Completed;
//!
//! let table = compute_standings(&teams, &matches, RankingMethod::Points, &PointScheme::default());
//! assert_eq!(table[0].team_id, "a");
//! assert_eq!(table[0].points, 3);
//! ```

pub mod bracket;
pub mod errors;
pub mod league;
pub mod model;
pub mod ranking;
pub mod roster;
pub mod standings;
pub mod view;

pub use bracket::{
    Placements, apply_match_result, apply_sport_result, bracket_placements,
    build_bracket_skeleton, generate_bracket_matches,
};
pub use errors::{ScoringError, ScoringResult};
pub use league::{
    compute_advancing_teams, compute_block_standings, distribute_into_blocks,
    generate_playoff, generate_round_robin_matches, reconstruct_blocks, scored_matches_at_risk,
};
pub use model::{LeagueBlock, Match, MatchStatus, RankingEntry, Sport, SportFormat, Team};
pub use ranking::{move_ranking_entry, ranking_entries_for_teams, sort_ranking_entries};
pub use roster::{RosterProvider, StaticRoster, default_teams};
pub use standings::{TeamStats, compute_standings, top_teams};
pub use view::{BracketViewModel, project_for_display};
