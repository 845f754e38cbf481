//! Integration tests for the league flow
//!
//! Distribute teams into blocks, play the block stage, seed the playoff and
//! confirm that the flat match list can be turned back into blocks.

use event_scoring::league::block_stage_matches;
use event_scoring::model::{LeagueSettings, PointScheme, RankingMethod, SportFormat};
use event_scoring::{
    LeagueBlock, Match, Sport, Team, apply_match_result, compute_advancing_teams,
    compute_block_standings, distribute_into_blocks, generate_playoff, reconstruct_blocks,
    scored_matches_at_risk,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("t{i}"), format!("Team {i}")))
        .collect()
}

/// Lower-numbered team wins every block match by the difference in numbers.
fn play_block_stage(blocks: Vec<LeagueBlock>) -> Vec<LeagueBlock> {
    blocks
        .into_iter()
        .map(|mut block| {
            for m in block.matches.clone() {
                let n1: u32 = m.team1_id.as_deref().unwrap()[1..].parse().unwrap();
                let n2: u32 = m.team2_id.as_deref().unwrap()[1..].parse().unwrap();
                let update = if n1 < n2 {
                    m.with_scores(n2 - n1, 0)
                } else {
                    m.with_scores(0, n1 - n2)
                };
                block.matches = apply_match_result(update, block.matches);
            }
            block
        })
        .collect()
}

#[test]
fn test_league_from_distribution_to_playoff() {
    let roster = teams(8);
    let settings = LeagueSettings {
        block_count: 2,
        advancing_teams: 2,
        has_third_place_match: true,
        ranking_method: RankingMethod::Points,
    };

    let blocks =
        distribute_into_blocks(&roster, settings.block_count, &mut StdRng::seed_from_u64(2024))
            .unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| b.team_ids.len() == 4 && b.matches.len() == 6));

    let blocks = play_block_stage(blocks);
    assert_eq!(scored_matches_at_risk(&block_stage_matches(&blocks)), 12);

    // each block's top two are its two lowest-numbered teams
    let advancing = compute_advancing_teams(&blocks, &roster, 2).unwrap();
    assert_eq!(advancing.len(), 4);
    for (i, block) in blocks.iter().enumerate() {
        let mut expected = block.team_ids.clone();
        expected.sort_by_key(|id| id[1..].parse::<u32>().unwrap());
        let got: Vec<&str> = advancing[i * 2..i * 2 + 2]
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(got, vec![expected[0].as_str(), expected[1].as_str()]);
    }

    let playoff = generate_playoff(&blocks, &roster, &settings).unwrap();
    assert_eq!(playoff.len(), 4);
    assert_eq!(playoff[0].team1_id.as_ref(), Some(&advancing[0].id));
    assert_eq!(playoff[0].team2_id.as_ref(), Some(&advancing[1].id));
    assert!(playoff.iter().all(|m| !m.is_block_match()));

    // store blocks and playoff together, then read the blocks back
    let mut all: Vec<Match> = block_stage_matches(&blocks);
    all.extend(playoff);
    let sport = Sport::new(
        "volleyball",
        "Volleyball",
        SportFormat::League {
            matches: all,
            settings,
        },
    )
    .with_teams(roster.clone());

    let restored = Sport::from_json(&sport.to_json().unwrap()).unwrap();
    let rebuilt = reconstruct_blocks(restored.matches());
    assert_eq!(rebuilt.len(), 2);
    for (original, rebuilt) in blocks.iter().zip(&rebuilt) {
        assert_eq!(original.matches, rebuilt.matches);
        assert_eq!(
            compute_block_standings(original, &roster, RankingMethod::Points, &PointScheme::default()),
            compute_block_standings(rebuilt, &roster, RankingMethod::Points, &PointScheme::default()),
        );
    }
}

#[test]
fn test_redistribution_gate_only_counts_scored_block_matches() {
    let roster = teams(6);
    let blocks = distribute_into_blocks(&roster, 3, &mut StdRng::seed_from_u64(9)).unwrap();
    let fresh = block_stage_matches(&blocks);
    assert_eq!(scored_matches_at_risk(&fresh), 0);

    let played = play_block_stage(blocks);
    assert_eq!(scored_matches_at_risk(&block_stage_matches(&played)), 3);
}

#[test]
fn test_uneven_blocks_send_everyone_they_have() {
    let roster = teams(5);
    let blocks = distribute_into_blocks(&roster, 4, &mut StdRng::seed_from_u64(1)).unwrap();
    let sizes: Vec<usize> = blocks.iter().map(|b| b.team_ids.len()).collect();
    assert_eq!(sizes, vec![2, 1, 1, 1]);

    let advancing = compute_advancing_teams(&blocks, &roster, 2).unwrap();
    assert_eq!(advancing.len(), 5);
}
