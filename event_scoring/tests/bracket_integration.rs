//! Integration tests for the bracket lifecycle
//!
//! Generate a bracket, feed results in until the final is decided, and check
//! the placements that fall out.

use event_scoring::bracket::{THIRD_PLACE_MATCH_ID, bracket_match_id};
use event_scoring::model::{MatchStatus, SportFormat, TournamentSettings};
use event_scoring::{
    Match, Sport, Team, apply_match_result, bracket_placements, build_bracket_skeleton,
    generate_bracket_matches,
};

fn teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("t{i}"), format!("Team {i}")))
        .collect()
}

/// Play every ready match (both teams known, not completed) with team1 winning 1-0,
/// in list order, until nothing is left to play.
fn play_out(mut matches: Vec<Match>) -> Vec<Match> {
    while let Some(next) = matches
        .iter()
        .find(|m| !m.is_completed() && m.team1_id.is_some() && m.team2_id.is_some())
        .cloned()
    {
        matches = apply_match_result(next.with_scores(1, 0), matches);
    }
    matches
}

fn find<'a>(matches: &'a [Match], id: &str) -> &'a Match {
    matches.iter().find(|m| m.id == id).unwrap()
}

#[test]
fn test_eight_team_bracket_full_lifecycle() {
    let matches = generate_bracket_matches(&teams(8), true).unwrap();
    assert_eq!(matches.len(), 8);

    let matches = play_out(matches);
    assert!(matches.iter().all(|m| m.status == MatchStatus::Completed));

    let final_ = find(&matches, "r3-m1");
    assert_eq!(final_.team1_id.as_deref(), Some("t1"));
    assert_eq!(final_.team2_id.as_deref(), Some("t5"));

    let third = find(&matches, THIRD_PLACE_MATCH_ID);
    assert_eq!(third.team1_id.as_deref(), Some("t3"));
    assert_eq!(third.team2_id.as_deref(), Some("t7"));

    let placements = bracket_placements(&matches).unwrap();
    assert_eq!(placements.champion, "t1");
    assert_eq!(placements.runner_up, "t5");
    assert_eq!(placements.third.as_deref(), Some("t3"));
    assert_eq!(placements.fourth.as_deref(), Some("t7"));
}

#[test]
fn test_brackets_with_byes_play_to_completion() {
    for n in 2..=17 {
        let matches = play_out(generate_bracket_matches(&teams(n), true).unwrap());
        let placements = bracket_placements(&matches)
            .unwrap_or_else(|| panic!("bracket of {n} teams has no champion"));
        assert_ne!(placements.champion, placements.runner_up, "n = {n}");
        assert!(
            matches
                .iter()
                .filter(|m| !m.is_third_place_match())
                .all(Match::is_completed),
            "n = {n}"
        );
    }
}

#[test]
fn test_six_team_bye_layout() {
    let skeleton = build_bracket_skeleton(6);
    assert_eq!(skeleton.rounds, 3);
    assert_eq!(skeleton.byes, 2);
    assert_eq!(skeleton.match_count_in_round(1), 2);
    assert_eq!(skeleton.match_count_in_round(2), 2);

    let matches = generate_bracket_matches(&teams(6), false).unwrap();
    assert_eq!(matches.len(), 5);

    let r1: Vec<_> = matches.iter().filter(|m| m.round == 1).collect();
    assert!(r1.iter().all(|m| m.team1_id.is_some() && m.team2_id.is_some()));

    // the bye entrants are already in place
    let r2m2 = find(&matches, &bracket_match_id(2, 2));
    assert!(r2m2.team1_id.is_some() && r2m2.team2_id.is_some());
    assert_eq!(r2m2.status, MatchStatus::Scheduled);
}

#[test]
fn test_snapshot_survives_json_round_trip_mid_bracket() {
    let tournament = teams(4);
    let matches = generate_bracket_matches(&tournament, true).unwrap();
    let opener = find(&matches, "r1-m1").clone().with_scores(2, 1);
    let matches = apply_match_result(opener, matches);

    let sport = Sport::new(
        "soccer",
        "Soccer",
        SportFormat::Tournament {
            matches,
            settings: TournamentSettings {
                has_third_place_match: true,
            },
        },
    )
    .with_teams(tournament);

    let restored = Sport::from_json(&sport.to_json().unwrap()).unwrap();
    assert_eq!(restored, sport);

    // progression keeps working on the restored snapshot
    let semi = find(restored.matches(), "r1-m2").clone().with_scores(0, 4);
    let next = apply_match_result(semi, restored.matches().to_vec());
    let final_ = find(&next, "r2-m1");
    assert_eq!(final_.team1_id.as_deref(), Some("t1"));
    assert_eq!(final_.team2_id.as_deref(), Some("t4"));

    let third = find(&next, THIRD_PLACE_MATCH_ID);
    assert_eq!(third.team1_id.as_deref(), Some("t2"));
    assert_eq!(third.team2_id.as_deref(), Some("t3"));
}

#[test]
fn test_legacy_snapshot_without_links_still_progresses() {
    // older snapshots carry neither nextMatchId nor isThirdPlace
    let json = r#"{
        "id": "s", "name": "Basketball", "type": "tournament",
        "teams": [
            {"id": "a", "name": "A"}, {"id": "b", "name": "B"},
            {"id": "c", "name": "C"}, {"id": "d", "name": "D"}
        ],
        "matches": [
            {"id": "x1", "team1Id": "a", "team2Id": "b", "round": 1, "matchNumber": 1},
            {"id": "x2", "team1Id": "c", "team2Id": "d", "round": 1, "matchNumber": 2},
            {"id": "x3", "team1Id": null, "team2Id": null, "round": 2, "matchNumber": 1},
            {"id": "x4", "team1Id": null, "team2Id": null, "round": 2, "matchNumber": 0}
        ]
    }"#;
    let sport = Sport::from_json(json).unwrap();

    let update = find(sport.matches(), "x2").clone().with_scores(1, 2);
    let next = apply_match_result(update, sport.matches().to_vec());

    assert_eq!(find(&next, "x3").team2_id.as_deref(), Some("d"));
    assert_eq!(find(&next, "x4").team1_id.as_deref(), Some("c"));
}
