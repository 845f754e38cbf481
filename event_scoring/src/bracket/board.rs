//! Indexed match arena used during progression and projection.

use std::collections::HashMap;

use crate::model::{Match, MatchId, Side};

/// Ordered match list with O(1) lookup by id and by bracket position.
///
/// Only bracket matches (no block id, not the third-place match) are indexed by
/// `(round, match_number)`. When ids repeat, the first occurrence wins.
#[derive(Debug, Clone)]
pub struct MatchBoard {
    matches: Vec<Match>,
    by_id: HashMap<MatchId, usize>,
    by_position: HashMap<(u32, u32), usize>,
}

impl MatchBoard {
    pub fn new(matches: Vec<Match>) -> Self {
        let mut by_id = HashMap::with_capacity(matches.len());
        let mut by_position = HashMap::new();

        for (i, m) in matches.iter().enumerate() {
            by_id.entry(m.id.clone()).or_insert(i);
            if is_bracket_match(m) {
                by_position.entry((m.round, m.match_number)).or_insert(i);
            }
        }

        Self {
            matches,
            by_id,
            by_position,
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Match> {
        self.index_of(id).map(|i| &self.matches[i])
    }

    pub(crate) fn at(&self, index: usize) -> &Match {
        &self.matches[index]
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> &mut Match {
        &mut self.matches[index]
    }

    /// Bracket match at a position
    pub fn position(&self, round: u32, match_number: u32) -> Option<&Match> {
        self.by_position
            .get(&(round, match_number))
            .map(|&i| &self.matches[i])
    }

    /// Replace the match with the same id, keeping its place in the order.
    /// Returns `false` when the id is unknown.
    pub fn replace(&mut self, updated: Match) -> bool {
        match self.index_of(&updated.id) {
            Some(i) => {
                self.matches[i] = updated;
                true
            }
            None => false,
        }
    }

    /// Highest bracket round; `0` when there are no bracket matches.
    pub fn max_round(&self) -> u32 {
        self.by_position
            .keys()
            .map(|&(round, _)| round)
            .max()
            .unwrap_or(0)
    }

    /// Index of the third-place match, if the bracket has one.
    pub fn third_place_index(&self) -> Option<usize> {
        self.matches
            .iter()
            .position(|m| m.block_id.is_none() && m.is_third_place_match())
    }

    /// Bracket matches of the semifinal round, in match-number order.
    pub fn semifinals(&self) -> Vec<&Match> {
        let max_round = self.max_round();
        if max_round < 2 {
            return Vec::new();
        }
        let mut semis: Vec<&Match> = self
            .matches
            .iter()
            .filter(|m| is_bracket_match(m) && m.round == max_round - 1)
            .collect();
        semis.sort_by_key(|m| m.match_number);
        semis
    }

    /// Where the winner of the match at `index` goes.
    ///
    /// An explicit `next_match_id` takes precedence; it resolves to `Err(id)` when
    /// the referenced match does not exist. Without one, the ceil-half rule
    /// applies and a missing target simply means `index` is the final.
    pub fn next_slot(&self, index: usize) -> Result<Option<(usize, Side)>, MatchId> {
        let m = &self.matches[index];
        let side = Side::for_feeder(m.match_number);

        if let Some(next_id) = &m.next_match_id {
            return match self.index_of(next_id) {
                Some(next) => Ok(Some((next, side))),
                None => Err(next_id.clone()),
            };
        }

        Ok(self
            .by_position
            .get(&(m.round + 1, m.match_number.div_ceil(2)))
            .map(|&next| (next, side)))
    }

    /// The match feeding a slot of the match at `index`, if any.
    pub fn feeder(&self, index: usize, side: Side) -> Option<&Match> {
        let target = &self.matches[index];
        if !is_bracket_match(target) {
            return None;
        }

        self.matches.iter().enumerate().find_map(|(i, m)| {
            if i == index || !is_bracket_match(m) {
                return None;
            }
            match self.next_slot(i) {
                Ok(Some((next, feeds))) if next == index && feeds == side => Some(m),
                _ => None,
            }
        })
    }
}

/// Match belonging to the elimination tree proper.
pub fn is_bracket_match(m: &Match) -> bool {
    m.block_id.is_none() && !m.is_third_place_match()
}
