//! Round-robin pairings.

use crate::model::{BlockId, Match, Team, TeamId};

/// Every unordered pair exactly once, in roster order: (0,1), (0,2), …, (1,2), …
pub fn all_pairings(team_ids: &[TeamId]) -> Vec<(TeamId, TeamId)> {
    let mut pairs = Vec::with_capacity(team_ids.len() * team_ids.len().saturating_sub(1) / 2);
    for (i, first) in team_ids.iter().enumerate() {
        for second in &team_ids[i + 1..] {
            pairs.push((first.clone(), second.clone()));
        }
    }
    pairs
}

/// Block-stage matches: all pairs in round 1, numbered from 1, tagged with the block.
pub fn block_matches(block_id: &BlockId, team_ids: &[TeamId]) -> Vec<Match> {
    all_pairings(team_ids)
        .into_iter()
        .enumerate()
        .map(|(i, (team1, team2))| {
            let match_number = i as u32 + 1;
            let mut m = Match::new(format!("{block_id}-m{match_number}"), 1, match_number)
                .with_teams(Some(team1), Some(team2));
            m.block_id = Some(block_id.clone());
            m
        })
        .collect()
}

/// Full round-robin schedule split into rounds with the circle method.
///
/// With an odd team count a dummy slot is added and whoever meets it sits the
/// round out. Every pair meets exactly once; nobody plays twice in a round.
pub fn generate_round_robin_matches(teams: &[Team]) -> Vec<Match> {
    let team_count = teams.len();
    if team_count < 2 {
        return Vec::new();
    }

    // 1-based positions; slot n + 1 is the dummy and only exists when n is odd
    let slots = team_count + team_count % 2;
    let rounds = slots - 1;
    let per_round = slots / 2;
    let dummy = team_count + 1;

    let mut table: Vec<usize> = (1..=slots).collect();
    let mut matches = Vec::new();

    for round in 1..=rounds as u32 {
        let mut match_number = 0;
        for m in 0..per_round {
            let home = table[m];
            let away = table[table.len() - 1 - m];
            if home == dummy || away == dummy {
                continue;
            }
            match_number += 1;
            matches.push(
                Match::new(format!("rr-r{round}-m{match_number}"), round, match_number).with_teams(
                    Some(teams[home - 1].id.clone()),
                    Some(teams[away - 1].id.clone()),
                ),
            );
        }

        if let Some(last) = table.pop() {
            table.insert(1, last);
        }
    }

    matches
}
