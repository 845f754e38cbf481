//! League blocks: distribution, per-block standings and playoff seeding.

use std::collections::HashMap;

use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use super::schedule::block_matches;
use crate::bracket::generate_bracket_matches;
use crate::errors::{ScoringError, ScoringResult};
use crate::model::{
    BlockId, LeagueBlock, LeagueSettings, Match, PointScheme, RankingMethod, Team, TeamId,
};
use crate::standings::{TeamStats, compute_standings, top_teams};

/// Deterministic id of the block at `index` (0-based)
pub fn block_id(index: usize) -> BlockId {
    format!("block-{}", index + 1)
}

/// Display name of the block at `index`: "Block A" … "Block Z", then numbers.
pub fn block_name(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => format!("Block {}", char::from(b'A' + i)),
        _ => format!("Block {}", index + 1),
    }
}

/// Shuffle `teams` and deal them into `block_count` blocks (`team[i]` goes to
/// block `i % block_count`), then schedule a full round robin in each block.
///
/// This replaces any existing block stage. Check [`scored_matches_at_risk`]
/// first and confirm with the user when it is non-zero.
///
/// # Errors
///
/// - [`ScoringError::InvalidBlockCount`] when `block_count` is 0
/// - [`ScoringError::InsufficientTeams`] when there are fewer teams than blocks
pub fn distribute_into_blocks<R: Rng + ?Sized>(
    teams: &[Team],
    block_count: usize,
    rng: &mut R,
) -> ScoringResult<Vec<LeagueBlock>> {
    if block_count < 1 {
        return Err(ScoringError::InvalidBlockCount(block_count));
    }
    if teams.len() < block_count {
        return Err(ScoringError::InsufficientTeams {
            needed: block_count,
            actual: teams.len(),
        });
    }

    let mut shuffled: Vec<&Team> = teams.iter().collect();
    shuffled.shuffle(rng);

    let mut team_ids: Vec<Vec<TeamId>> = vec![Vec::new(); block_count];
    for (i, team) in shuffled.into_iter().enumerate() {
        team_ids[i % block_count].push(team.id.clone());
    }

    let blocks: Vec<LeagueBlock> = team_ids
        .into_iter()
        .enumerate()
        .map(|(index, team_ids)| {
            let id = block_id(index);
            let matches = block_matches(&id, &team_ids);
            LeagueBlock {
                id,
                name: block_name(index),
                team_ids,
                matches,
            }
        })
        .collect();

    info!(
        "Distributed {} teams into {} blocks ({} block matches)",
        teams.len(),
        block_count,
        blocks.iter().map(|b| b.matches.len()).sum::<usize>()
    );

    Ok(blocks)
}

/// Number of block-stage matches with a recorded score that a redistribution
/// would discard.
pub fn scored_matches_at_risk(matches: &[Match]) -> usize {
    matches
        .iter()
        .filter(|m| m.is_block_match() && m.has_score())
        .count()
}

/// Flatten blocks back into the sport's single match list.
pub fn block_stage_matches(blocks: &[LeagueBlock]) -> Vec<Match> {
    blocks.iter().flat_map(|b| b.matches.iter().cloned()).collect()
}

/// Rebuild blocks from a flat match list.
///
/// Matches are grouped by `block_id` in order of first appearance; a block's
/// teams are the union of both sides of its matches, in order of appearance.
/// Matches without a block id (the playoff) are ignored.
pub fn reconstruct_blocks(matches: &[Match]) -> Vec<LeagueBlock> {
    let mut blocks: Vec<LeagueBlock> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in matches {
        let Some(id) = m.block_id.as_deref() else {
            continue;
        };
        let i = *index.entry(id).or_insert_with(|| {
            blocks.push(LeagueBlock {
                id: id.to_string(),
                name: block_name(blocks.len()),
                team_ids: Vec::new(),
                matches: Vec::new(),
            });
            blocks.len() - 1
        });

        let block = &mut blocks[i];
        for team_id in [&m.team1_id, &m.team2_id].into_iter().flatten() {
            if !block.contains(team_id) {
                block.team_ids.push(team_id.clone());
            }
        }
        block.matches.push(m.clone());
    }

    blocks
}

fn block_roster(block: &LeagueBlock, teams: &[Team]) -> Vec<Team> {
    block
        .team_ids
        .iter()
        .map(|id| match teams.iter().find(|t| &t.id == id) {
            Some(team) => team.clone(),
            None => {
                warn!("Block {} lists unknown team {}", block.id, id);
                Team::new(id.clone(), id.clone())
            }
        })
        .collect()
}

/// Standings of one block under the given display ranking.
pub fn compute_block_standings(
    block: &LeagueBlock,
    teams: &[Team],
    method: RankingMethod,
    points: &PointScheme,
) -> Vec<TeamStats> {
    compute_standings(&block_roster(block, teams), &block.matches, method, points)
}

/// Playoff seed order: the top `advancing_per_block` teams of block 1, then of
/// block 2, and so on.
///
/// Qualification always ranks by points (3/1/0), then goal difference, then
/// goals for, whatever the blocks display. A block with fewer teams than
/// `advancing_per_block` sends all of them.
///
/// # Errors
///
/// - [`ScoringError::InvalidAdvancingCount`] when `advancing_per_block` is 0
/// - [`ScoringError::UnknownTeam`] when a block lists a team missing from `teams`
pub fn compute_advancing_teams(
    blocks: &[LeagueBlock],
    teams: &[Team],
    advancing_per_block: usize,
) -> ScoringResult<Vec<Team>> {
    if advancing_per_block < 1 {
        return Err(ScoringError::InvalidAdvancingCount(advancing_per_block));
    }

    let roster: HashMap<&str, &Team> = teams.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut advancing = Vec::with_capacity(blocks.len() * advancing_per_block);

    for block in blocks {
        if let Some(missing) = block.team_ids.iter().find(|id| !roster.contains_key(id.as_str())) {
            return Err(ScoringError::UnknownTeam(missing.clone()));
        }

        let standings = compute_block_standings(
            block,
            teams,
            RankingMethod::Points,
            &PointScheme::default(),
        );
        advancing.extend(
            top_teams(&standings, advancing_per_block)
                .iter()
                .map(|row| roster[row.team_id.as_str()].clone()),
        );
    }

    Ok(advancing)
}

/// Build the playoff bracket from the current block standings.
///
/// # Errors
///
/// Fails on invalid settings, unknown teams, or fewer than two qualifiers.
pub fn generate_playoff(
    blocks: &[LeagueBlock],
    teams: &[Team],
    settings: &LeagueSettings,
) -> ScoringResult<Vec<Match>> {
    settings.validate()?;

    let seed_order = compute_advancing_teams(blocks, teams, settings.advancing_teams)?;
    let playoff = generate_bracket_matches(&seed_order, settings.has_third_place_match)?;

    info!(
        "Seeded playoff with {} teams from {} blocks",
        seed_order.len(),
        blocks.len()
    );

    Ok(playoff)
}
