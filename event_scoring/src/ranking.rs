//! Free-form ranking format.
//!
//! Entries are ordered by `rank` first and by `score` second, in the direction
//! the ranking's settings configure. Entries without a score always sort after
//! scored ones.

use std::cmp::Ordering;

use log::warn;

use crate::model::{RankingEntry, SortDirection, Team};

/// Deterministic entry id for a team
pub fn ranking_entry_id(team_id: &str) -> String {
    format!("rank-{team_id}")
}

/// One unscored entry per team, ranked in roster order.
pub fn ranking_entries_for_teams(teams: &[Team]) -> Vec<RankingEntry> {
    teams
        .iter()
        .enumerate()
        .map(|(i, team)| RankingEntry {
            id: ranking_entry_id(&team.id),
            team_id: team.id.clone(),
            rank: i as u32 + 1,
            score: None,
            notes: String::new(),
        })
        .collect()
}

fn compare_scores(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.total_cmp(&b),
            SortDirection::Desc => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort in place by rank, then score. Stable, so full ties keep their order.
pub fn sort_ranking_entries(entries: &mut [RankingEntry], direction: SortDirection) {
    entries.sort_by(|a, b| {
        a.rank
            .cmp(&b.rank)
            .then_with(|| compare_scores(a.score, b.score, direction))
    });
}

/// Rewrite ranks as 1..n following the current order.
pub fn renumber_ranks(entries: &mut [RankingEntry]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
}

/// Move an entry to `new_rank` (1-based, clamped to the list) and renumber.
///
/// # Arguments
///
/// * `entries` - Current entries, in display order
/// * `entry_id` - Entry to move
/// * `new_rank` - Target position
///
/// # Returns
///
/// The reordered list. An unknown id returns the entries unchanged.
pub fn move_ranking_entry(
    mut entries: Vec<RankingEntry>,
    entry_id: &str,
    new_rank: u32,
) -> Vec<RankingEntry> {
    let Some(from) = entries.iter().position(|e| e.id == entry_id) else {
        warn!("Ranking entry {} not found; order unchanged", entry_id);
        return entries;
    };

    let entry = entries.remove(from);
    let to = (new_rank.max(1) as usize - 1).min(entries.len());
    entries.insert(to, entry);
    renumber_ranks(&mut entries);
    entries
}
