//! Single-elimination brackets.
//!
//! - [`skeleton`]: the deterministic shape for a team count
//! - [`generator`]: concrete matches from a seeding order
//! - [`progression`]: result application, winner advancement, third-place routing
//! - [`board`]: the indexed match arena both of the above run on
//!
//! ## Example
//!
//! ```
//! use event_scoring::bracket::{apply_match_result, generate_bracket_matches};
//! use event_scoring::model::Team;
//!
//! let teams: Vec<Team> = ["1-A", "1-B", "1-C", "1-D"]
//!     .iter()
//!     .map(|name| Team::new(*name, *name))
//!     .collect();
//!
//! let matches = generate_bracket_matches(&teams, true)?;
//! let mut opener = matches[0].clone();
//! opener.team1_score = 3;
//!
//! let matches = apply_match_result(opener, matches);
//! assert_eq!(matches[2].team1_id.as_deref(), Some("1-A"));
//! # Ok::<(), event_scoring::ScoringError>(())
//! ```

pub mod board;
pub mod generator;
pub mod progression;
pub mod skeleton;

pub use board::MatchBoard;
pub use generator::{THIRD_PLACE_MATCH_ID, bracket_match_id, generate_bracket_matches};
pub use progression::{
    Placements, apply_match_result, apply_sport_result, bracket_placements, settle,
};
pub use skeleton::{BracketSkeleton, SkeletonMatch, SlotSource, build_bracket_skeleton};
