//! Round-robin standings.
//!
//! Standings are always derived from the completed matches of a snapshot, never
//! stored. Residual ties after the comparator chain keep roster order: the sort
//! is stable and teams are folded in the order they were given.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Match, PointScheme, RankingMethod, Team, TeamId};

/// Accumulated statistics for one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: i32,
}

impl TeamStats {
    fn empty(team: &Team) -> Self {
        Self {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32, points: &PointScheme) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += points.win;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += points.draw;
            }
            Ordering::Less => {
                self.lost += 1;
                self.points += points.loss;
            }
        }
    }
}

/// Compare two stat lines under a ranking method; `Less` means `a` ranks higher.
pub fn compare_stats(a: &TeamStats, b: &TeamStats, method: RankingMethod) -> Ordering {
    let by_points = || b.points.cmp(&a.points);
    let by_difference = || b.goal_difference().cmp(&a.goal_difference());
    let by_goals = || b.goals_for.cmp(&a.goals_for);

    match method {
        RankingMethod::Points => by_points().then_with(by_difference).then_with(by_goals),
        RankingMethod::GoalDifference => by_difference().then_with(by_goals),
        RankingMethod::Goals => by_goals().then_with(by_difference),
    }
}

/// Compute ordered standings for `teams` from the completed matches in `matches`.
///
/// Every team gets a row, including teams that have not played. Matches that
/// involve teams outside `teams` only count for the listed side.
pub fn compute_standings(
    teams: &[Team],
    matches: &[Match],
    method: RankingMethod,
    points: &PointScheme,
) -> Vec<TeamStats> {
    let mut stats: Vec<TeamStats> = teams.iter().map(TeamStats::empty).collect();
    let index: HashMap<&str, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id.as_str(), i))
        .collect();

    for m in matches.iter().filter(|m| m.is_completed()) {
        let (Some(team1), Some(team2)) = (m.team1_id.as_deref(), m.team2_id.as_deref()) else {
            continue;
        };

        if let Some(&i) = index.get(team1) {
            stats[i].record(m.team1_score, m.team2_score, points);
        }
        if let Some(&i) = index.get(team2) {
            stats[i].record(m.team2_score, m.team1_score, points);
        }
    }

    stats.sort_by(|a, b| compare_stats(a, b, method));
    stats
}

/// The first `n` rows of a standings table.
pub fn top_teams(standings: &[TeamStats], n: usize) -> &[TeamStats] {
    &standings[..n.min(standings.len())]
}
