//! Concrete bracket matches from a seeding order.

use log::debug;

use super::skeleton::{BracketSkeleton, SkeletonMatch, SlotSource, build_bracket_skeleton};
use crate::errors::{ScoringError, ScoringResult};
use crate::model::{Match, MatchId, THIRD_PLACE_MATCH_NUMBER, Team, TeamId};

/// Id of the third-place match
pub const THIRD_PLACE_MATCH_ID: &str = "third-place";

/// Minimum teams for a bracket
pub const MIN_BRACKET_TEAMS: usize = 2;

/// Deterministic id of a bracket match
pub fn bracket_match_id(round: u32, match_number: u32) -> MatchId {
    format!("r{round}-m{match_number}")
}

fn slot_team(slot: SlotSource, seed_order: &[Team]) -> Option<TeamId> {
    slot.seed_index().map(|i| seed_order[i].id.clone())
}

fn instantiate(skeleton_match: &SkeletonMatch, seed_order: &[Team]) -> Match {
    let mut m = Match::new(
        bracket_match_id(skeleton_match.round, skeleton_match.match_number),
        skeleton_match.round,
        skeleton_match.match_number,
    )
    .with_teams(
        slot_team(skeleton_match.team1, seed_order),
        slot_team(skeleton_match.team2, seed_order),
    );
    m.next_match_id = skeleton_match
        .next
        .map(|next| bracket_match_id(next.round, next.match_number));
    m
}

/// The empty third-place match appended to brackets that play one.
pub fn third_place_match(rounds: u32) -> Match {
    let mut m = Match::new(THIRD_PLACE_MATCH_ID, rounds, THIRD_PLACE_MATCH_NUMBER);
    m.is_third_place = true;
    m
}

/// Generate every match of a single-elimination bracket.
///
/// `seed_order` is used as given; shuffling is the caller's choice. Teams that
/// receive a bye are written straight into their round-2 slot, on the side the
/// odd/even rule assigns, so no placeholder matches are produced. All matches
/// start scheduled with zeroed scores.
///
/// # Errors
///
/// Returns [`ScoringError::InsufficientTeams`] for fewer than two teams.
pub fn generate_bracket_matches(
    seed_order: &[Team],
    has_third_place: bool,
) -> ScoringResult<Vec<Match>> {
    if seed_order.len() < MIN_BRACKET_TEAMS {
        return Err(ScoringError::InsufficientTeams {
            needed: MIN_BRACKET_TEAMS,
            actual: seed_order.len(),
        });
    }

    let skeleton = build_bracket_skeleton(seed_order.len());
    Ok(matches_from_skeleton(&skeleton, seed_order, has_third_place))
}

fn matches_from_skeleton(
    skeleton: &BracketSkeleton,
    seed_order: &[Team],
    has_third_place: bool,
) -> Vec<Match> {
    let mut matches: Vec<Match> = skeleton
        .matches
        .iter()
        .map(|m| instantiate(m, seed_order))
        .collect();

    if has_third_place {
        if skeleton.rounds >= 2 {
            matches.push(third_place_match(skeleton.rounds));
        } else {
            debug!("Skipping third-place match: bracket has no semifinal");
        }
    }

    debug!(
        "Generated bracket: {} teams, {} rounds, {} byes, {} matches",
        skeleton.team_count,
        skeleton.rounds,
        skeleton.byes,
        matches.len()
    );

    matches
}
