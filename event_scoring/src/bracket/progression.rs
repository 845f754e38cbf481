//! Result application and winner advancement.
//!
//! Progression only ever writes into empty downstream slots. Re-applying the
//! same result is therefore a no-op, and a slot that was filled by hand (or by
//! an earlier, since corrected, result) is left alone.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::board::{MatchBoard, is_bracket_match};
use crate::model::{Match, MatchStatus, Side, Sport, SportFormat, TeamId};

/// Derive `status` and `winner_id` from the scores.
///
/// A match is completed once either side has scored or the caller marked it
/// completed. A caller-set `InProgress` survives while the score is still 0-0.
/// The winner is the side with the higher score; ties leave it unset.
pub fn settle(m: &mut Match) {
    m.status = if m.has_score() || m.status == MatchStatus::Completed {
        MatchStatus::Completed
    } else if m.status == MatchStatus::InProgress {
        MatchStatus::InProgress
    } else {
        MatchStatus::Scheduled
    };

    m.winner_id = if m.status != MatchStatus::Completed {
        None
    } else if m.team1_score > m.team2_score {
        m.team1_id.clone()
    } else if m.team2_score > m.team1_score {
        m.team2_id.clone()
    } else {
        None
    };
}

/// Apply an edited match to the full list and return the next list.
///
/// The match is settled, swapped in by id, and for bracket matches its winner
/// is advanced into the linked slot. A decided semifinal also sends its loser
/// to the third-place match, filling `team1` then `team2` in the order the
/// semifinals are decided. Dangling links are logged and skipped.
pub fn apply_match_result(mut updated: Match, all_matches: Vec<Match>) -> Vec<Match> {
    settle(&mut updated);

    let mut board = MatchBoard::new(all_matches);
    let Some(index) = board.index_of(&updated.id) else {
        warn!("Match {} not found; result ignored", updated.id);
        return board.into_matches();
    };
    board.replace(updated);

    let current = board.at(index);
    if !is_bracket_match(current) {
        return board.into_matches();
    }
    let Some(winner) = current.winner_id.clone() else {
        return board.into_matches();
    };
    let loser = current.loser_id().cloned();

    advance_winner(&mut board, index, winner);

    if let Some(loser) = loser {
        route_semifinal_loser(&mut board, index, loser);
    }

    board.into_matches()
}

/// Apply an edited match to a sport.
///
/// Bracket formats go through [`apply_match_result`]. A round-robin schedule
/// has no tree to advance through, so its match is only settled and swapped
/// in. Returns `false` for the ranking format, which has no matches.
pub fn apply_sport_result(sport: &mut Sport, mut updated: Match) -> bool {
    let next = match &sport.format {
        SportFormat::Tournament { matches, .. } | SportFormat::League { matches, .. } => {
            apply_match_result(updated, matches.clone())
        }
        SportFormat::RoundRobin { matches, .. } => {
            settle(&mut updated);
            let mut next = matches.clone();
            match next.iter_mut().find(|m| m.id == updated.id) {
                Some(slot) => *slot = updated,
                None => warn!("Match {} not found; result ignored", updated.id),
            }
            next
        }
        SportFormat::Ranking { .. } => return false,
    };
    sport.replace_matches(next)
}

fn advance_winner(board: &mut MatchBoard, index: usize, winner: TeamId) {
    let (next, side) = match board.next_slot(index) {
        Ok(Some(target)) => target,
        Ok(None) => return,
        Err(missing) => {
            warn!(
                "Match {} links to missing match {}; winner not advanced",
                board.at(index).id,
                missing
            );
            return;
        }
    };

    let target = board.at_mut(next);
    let target_id = target.id.clone();
    let slot = target.team_mut(side);
    match slot.as_deref() {
        None => {
            debug!("Advancing {} into {} ({:?})", winner, target_id, side);
            *slot = Some(winner);
        }
        Some(existing) if existing == winner => {}
        Some(existing) => {
            warn!(
                "Slot {:?} of {} already holds {}; {} not advanced",
                side, target_id, existing, winner
            );
        }
    }
}

fn route_semifinal_loser(board: &mut MatchBoard, index: usize, loser: TeamId) {
    let max_round = board.max_round();
    if max_round < 2 || board.at(index).round != max_round - 1 {
        return;
    }
    let Some(third) = board.third_place_index() else {
        return;
    };

    let semifinal = board.at(index);
    let semifinal_id = semifinal.id.clone();
    let participants: Vec<TeamId> = [&semifinal.team1_id, &semifinal.team2_id]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    let third_match = board.at_mut(third);
    if third_match.involves(&loser) {
        return;
    }
    // A corrected semifinal already sent its earlier loser
    if let Some(earlier) = participants.iter().find(|t| third_match.involves(t)) {
        warn!(
            "Third-place match {} already holds {} from {}; {} not added",
            third_match.id, earlier, semifinal_id, loser
        );
        return;
    }

    for side in [Side::Team1, Side::Team2] {
        let slot = third_match.team_mut(side);
        if slot.is_none() {
            debug!("Sending {} to third-place match ({:?})", loser, side);
            *slot = Some(loser);
            return;
        }
    }

    warn!(
        "Third-place match {} is full; {} not added",
        third_match.id, loser
    );
}

/// Final placements of a decided bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placements {
    pub champion: TeamId,
    pub runner_up: TeamId,
    pub third: Option<TeamId>,
    pub fourth: Option<TeamId>,
}

/// Placements once the final has a winner; third and fourth are filled when a
/// third-place match was played and decided.
pub fn bracket_placements(matches: &[Match]) -> Option<Placements> {
    let board = MatchBoard::new(matches.to_vec());
    let max_round = board.max_round();
    let final_ = board.position(max_round, 1)?;
    let champion = final_.winner_id.clone()?;
    let runner_up = final_.loser_id()?.clone();

    let (third, fourth) = board
        .third_place_index()
        .map(|i| board.at(i))
        .and_then(|m| Some((m.winner_id.clone()?, m.loser_id()?.clone())))
        .map_or((None, None), |(w, l)| (Some(w), Some(l)));

    Some(Placements {
        champion,
        runner_up,
        third,
        fourth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::generate_bracket_matches;
    use crate::model::Team;

    fn teams(n: usize) -> Vec<Team> {
        (1..=n)
            .map(|i| Team::new(format!("t{i}"), format!("Team {i}")))
            .collect()
    }

    fn find<'a>(matches: &'a [Match], id: &str) -> &'a Match {
        matches.iter().find(|m| m.id == id).unwrap()
    }

    fn scored(matches: &[Match], id: &str, s1: u32, s2: u32) -> Match {
        find(matches, id).clone().with_scores(s1, s2)
    }

    #[test]
    fn test_settle_derives_status_and_winner() {
        let mut m = Match::new("m", 1, 1)
            .with_teams(Some("a".into()), Some("b".into()))
            .with_scores(0, 2);
        settle(&mut m);
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.winner_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_settle_explicit_draw_has_no_winner() {
        let mut m = Match::new("m", 1, 1).with_teams(Some("a".into()), Some("b".into()));
        m.status = MatchStatus::Completed;
        settle(&mut m);
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.winner_id, None);
    }

    #[test]
    fn test_settle_resets_to_scheduled() {
        let mut m = Match::new("m", 1, 1).with_teams(Some("a".into()), Some("b".into()));
        m.winner_id = Some("a".into());
        settle(&mut m);
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert_eq!(m.winner_id, None);

        m.status = MatchStatus::InProgress;
        settle(&mut m);
        assert_eq!(m.status, MatchStatus::InProgress);
    }

    #[test]
    fn test_winner_fills_slot_by_parity() {
        let matches = generate_bracket_matches(&teams(4), false).unwrap();

        let matches = apply_match_result(scored(&matches, "r1-m2", 0, 1), matches);
        let final_ = find(&matches, "r2-m1");
        assert_eq!(final_.team1_id, None);
        assert_eq!(final_.team2_id.as_deref(), Some("t4"));

        let matches = apply_match_result(scored(&matches, "r1-m1", 5, 3), matches);
        let final_ = find(&matches, "r2-m1");
        assert_eq!(final_.team1_id.as_deref(), Some("t1"));
        assert_eq!(final_.team2_id.as_deref(), Some("t4"));
    }

    #[test]
    fn test_tie_does_not_advance() {
        let matches = generate_bracket_matches(&teams(4), false).unwrap();
        let matches = apply_match_result(scored(&matches, "r1-m1", 2, 2), matches);
        let opener = find(&matches, "r1-m1");
        assert_eq!(opener.status, MatchStatus::Completed);
        assert_eq!(opener.winner_id, None);
        assert_eq!(find(&matches, "r2-m1").team1_id, None);
    }

    #[test]
    fn test_filled_slot_is_never_overwritten() {
        let matches = generate_bracket_matches(&teams(4), false).unwrap();
        let matches = apply_match_result(scored(&matches, "r1-m1", 1, 0), matches);
        // Correct the result: t2 now wins, but t1 already sits in the final.
        let matches = apply_match_result(scored(&matches, "r1-m1", 0, 1), matches);

        assert_eq!(find(&matches, "r1-m1").winner_id.as_deref(), Some("t2"));
        assert_eq!(find(&matches, "r2-m1").team1_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let matches = generate_bracket_matches(&teams(6), true).unwrap();
        let update = scored(&matches, "r1-m1", 3, 1);
        let once = apply_match_result(update.clone(), matches);
        let twice = apply_match_result(update, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_semifinal_losers_fill_third_place_in_resolution_order() {
        let matches = generate_bracket_matches(&teams(4), true).unwrap();

        let matches = apply_match_result(scored(&matches, "r1-m2", 4, 0), matches);
        let matches = apply_match_result(scored(&matches, "r1-m1", 0, 1), matches);

        let third = find(&matches, "third-place");
        assert_eq!(third.team1_id.as_deref(), Some("t4"));
        assert_eq!(third.team2_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_corrected_semifinal_keeps_third_place_consistent() {
        let matches = generate_bracket_matches(&teams(4), true).unwrap();

        let matches = apply_match_result(scored(&matches, "r1-m1", 2, 0), matches);
        // t2 now wins; t2 already sits in the third-place match
        let matches = apply_match_result(scored(&matches, "r1-m1", 0, 2), matches);

        let third = find(&matches, "third-place");
        assert_eq!(third.team1_id.as_deref(), Some("t2"));
        assert_eq!(third.team2_id, None);
        assert_eq!(find(&matches, "r2-m1").team1_id.as_deref(), Some("t1"));

        // the other semifinal's loser still gets the free slot
        let matches = apply_match_result(scored(&matches, "r1-m2", 3, 1), matches);
        let third = find(&matches, "third-place");
        assert_eq!(third.team1_id.as_deref(), Some("t2"));
        assert_eq!(third.team2_id.as_deref(), Some("t4"));
    }

    #[test]
    fn test_round_robin_result_is_settled_without_advancing() {
        use crate::league::generate_round_robin_matches;
        use crate::model::RoundRobinSettings;

        let schedule = generate_round_robin_matches(&teams(4));
        let mut sport = Sport::new(
            "rr",
            "Round Robin",
            SportFormat::RoundRobin {
                matches: schedule.clone(),
                settings: RoundRobinSettings::default(),
            },
        )
        .with_teams(teams(4));

        assert!(apply_sport_result(&mut sport, scored(&schedule, "rr-r1-m1", 2, 0)));

        let played = find(sport.matches(), "rr-r1-m1");
        assert_eq!(played.status, MatchStatus::Completed);
        assert!(played.winner_id.is_some());
        for (before, after) in schedule.iter().zip(sport.matches()).skip(1) {
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_ranking_sport_takes_no_results() {
        let mut sport = Sport::new(
            "relay",
            "Relay",
            SportFormat::Ranking {
                entries: Vec::new(),
                settings: Default::default(),
            },
        );
        assert!(!apply_sport_result(&mut sport, Match::new("x", 1, 1)));
    }

    #[test]
    fn test_no_third_place_match_is_skipped_silently() {
        let matches = generate_bracket_matches(&teams(4), false).unwrap();
        let matches = apply_match_result(scored(&matches, "r1-m1", 1, 0), matches);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_dangling_link_keeps_result() {
        let mut opener = Match::new("x", 1, 1).with_teams(Some("a".into()), Some("b".into()));
        opener.next_match_id = Some("gone".into());
        let matches = apply_match_result(opener.clone().with_scores(1, 0), vec![opener]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].winner_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_block_match_does_not_propagate() {
        let mut block_match = Match::new("block-1-m1", 1, 1)
            .with_teams(Some("t1".into()), Some("t2".into()));
        block_match.block_id = Some("block-1".into());
        let final_ = Match::new("r1-m1", 1, 1);

        let matches = apply_match_result(
            block_match.clone().with_scores(2, 0),
            vec![block_match, final_],
        );
        assert_eq!(matches[0].winner_id.as_deref(), Some("t1"));
        assert_eq!(matches[1].team1_id, None);
    }

    #[test]
    fn test_unknown_match_leaves_list_unchanged() {
        let matches = generate_bracket_matches(&teams(2), false).unwrap();
        let stray = Match::new("nope", 1, 1).with_scores(1, 0);
        assert_eq!(apply_match_result(stray, matches.clone()), matches);
    }

    #[test]
    fn test_placements_after_full_bracket() {
        let matches = generate_bracket_matches(&teams(4), true).unwrap();
        assert_eq!(bracket_placements(&matches), None);

        let matches = apply_match_result(scored(&matches, "r1-m1", 2, 0), matches);
        let matches = apply_match_result(scored(&matches, "r1-m2", 0, 2), matches);
        let matches = apply_match_result(scored(&matches, "third-place", 1, 3), matches);
        let matches = apply_match_result(scored(&matches, "r2-m1", 1, 0), matches);

        let placements = bracket_placements(&matches).unwrap();
        assert_eq!(placements.champion, "t1");
        assert_eq!(placements.runner_up, "t4");
        assert_eq!(placements.third.as_deref(), Some("t3"));
        assert_eq!(placements.fourth.as_deref(), Some("t2"));
    }
}
