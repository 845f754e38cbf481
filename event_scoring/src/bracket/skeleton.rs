//! Canonical single-elimination skeleton for a given team count.
//!
//! Layout for `n` teams, `rounds = ceil(log2 n)` and `size = 2^rounds`:
//!
//! - Round 1 holds `n - size/2` real matches. When byes exist, seed index `0`
//!   is reserved as the top seed and skips round 1; round-1 pairs are taken
//!   from the following indices in order.
//! - Indices left unpaired enter directly in round 2, followed by the top seed,
//!   which always takes the last round-2 slot. These `Bye` entrants skip
//!   round 1 just like the top seed, so with `size - n` byes (5 teams: 3,
//!   9 to 12 teams: 7 down to 4) several teams sit out round 1, not only one.
//! - Round-1 winners fill the leading round-2 slots, so every feeder obeys the
//!   linkage rule: next match is `(round + 1, ceil(number / 2))`, odd numbers
//!   fill `team1` and even numbers fill `team2`.
//!
//! The result has exactly `n - 1` matches and depends on `n` alone.

use serde::{Deserialize, Serialize};

use crate::model::Side;

/// Where a skeleton slot gets its team from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SlotSource {
    /// Index into the seeding order, playing from round 1
    Team { index: usize },
    /// Index into the seeding order, entering at round 2 without playing round 1
    Bye { index: usize },
    /// The reserved top seed (always index 0), entering at round 2
    Seed { index: usize },
    /// Winner of an earlier match
    Winner { round: u32, match_number: u32 },
}

impl SlotSource {
    /// Seeding index for slots filled at generation time
    pub fn seed_index(&self) -> Option<usize> {
        match *self {
            SlotSource::Team { index } | SlotSource::Bye { index } | SlotSource::Seed { index } => {
                Some(index)
            }
            SlotSource::Winner { .. } => None,
        }
    }
}

/// Link from a match to the slot its winner fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextSlot {
    pub round: u32,
    pub match_number: u32,
    pub side: SlotSide,
}

/// Serializable mirror of [`Side`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotSide {
    Team1,
    Team2,
}

impl From<Side> for SlotSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Team1 => SlotSide::Team1,
            Side::Team2 => SlotSide::Team2,
        }
    }
}

impl From<SlotSide> for Side {
    fn from(side: SlotSide) -> Self {
        match side {
            SlotSide::Team1 => Side::Team1,
            SlotSide::Team2 => Side::Team2,
        }
    }
}

/// One match position in the skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonMatch {
    pub round: u32,
    pub match_number: u32,
    pub team1: SlotSource,
    pub team2: SlotSource,
    /// `None` for the final
    pub next: Option<NextSlot>,
}

/// Deterministic bracket shape for a team count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketSkeleton {
    pub team_count: usize,
    pub rounds: u32,
    pub bracket_size: usize,
    pub byes: usize,
    /// Ordered by round, then match number
    pub matches: Vec<SkeletonMatch>,
}

impl BracketSkeleton {
    fn empty(team_count: usize) -> Self {
        Self {
            team_count,
            rounds: 0,
            bracket_size: 0,
            byes: 0,
            matches: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches of one round
    pub fn round(&self, round: u32) -> impl Iterator<Item = &SkeletonMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    pub fn match_count_in_round(&self, round: u32) -> usize {
        self.round(round).count()
    }

    /// Seeding index of the top seed, when byes exist.
    pub fn seed_index(&self) -> Option<usize> {
        self.matches
            .iter()
            .flat_map(|m| [m.team1, m.team2])
            .find_map(|slot| match slot {
                SlotSource::Seed { index } => Some(index),
                _ => None,
            })
    }
}

/// Number of rounds needed for `n` teams: `ceil(log2 n)`.
pub fn round_count(team_count: usize) -> u32 {
    if team_count < 2 {
        0
    } else {
        team_count.next_power_of_two().trailing_zeros()
    }
}

fn next_slot(round: u32, match_number: u32, rounds: u32) -> Option<NextSlot> {
    (round < rounds).then(|| NextSlot {
        round: round + 1,
        match_number: match_number.div_ceil(2),
        side: Side::for_feeder(match_number).into(),
    })
}

/// Build the skeleton for `team_count` teams. Fewer than two teams yields an
/// empty skeleton.
pub fn build_bracket_skeleton(team_count: usize) -> BracketSkeleton {
    if team_count < 2 {
        return BracketSkeleton::empty(team_count);
    }

    let rounds = round_count(team_count);
    let size = 1usize << rounds;
    let byes = size - team_count;
    let first_round_matches = team_count - size / 2;
    let first_paired = usize::from(byes > 0);

    let mut matches = Vec::with_capacity(team_count - 1);

    for k in 0..first_round_matches {
        let match_number = k as u32 + 1;
        let a = first_paired + 2 * k;
        matches.push(SkeletonMatch {
            round: 1,
            match_number,
            team1: SlotSource::Team { index: a },
            team2: SlotSource::Team { index: a + 1 },
            next: next_slot(1, match_number, rounds),
        });
    }

    if rounds >= 2 {
        // Round-2 slot sources: round-1 winners first, then the bye entrants.
        let mut entrants: Vec<SlotSource> = (0..first_round_matches)
            .map(|k| SlotSource::Winner {
                round: 1,
                match_number: k as u32 + 1,
            })
            .collect();
        entrants.extend(
            (first_paired + 2 * first_round_matches..team_count)
                .map(|index| SlotSource::Bye { index }),
        );
        if byes > 0 {
            entrants.push(SlotSource::Seed { index: 0 });
        }
        debug_assert_eq!(entrants.len(), size / 2);

        for (k, pair) in entrants.chunks_exact(2).enumerate() {
            let match_number = k as u32 + 1;
            matches.push(SkeletonMatch {
                round: 2,
                match_number,
                team1: pair[0],
                team2: pair[1],
                next: next_slot(2, match_number, rounds),
            });
        }
    }

    for round in 3..=rounds {
        let count = (size >> round) as u32;
        for match_number in 1..=count {
            matches.push(SkeletonMatch {
                round,
                match_number,
                team1: SlotSource::Winner {
                    round: round - 1,
                    match_number: 2 * match_number - 1,
                },
                team2: SlotSource::Winner {
                    round: round - 1,
                    match_number: 2 * match_number,
                },
                next: next_slot(round, match_number, rounds),
            });
        }
    }

    BracketSkeleton {
        team_count,
        rounds,
        bracket_size: size,
        byes,
        matches,
    }
}
