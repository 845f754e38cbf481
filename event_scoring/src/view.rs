//! Render-ready projection of a bracket.
//!
//! The projection is a pure function of the sport's teams and matches. League
//! block matches are left out, so a league shows only its playoff. Round robins
//! and rankings have no bracket and project to an empty model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bracket::MatchBoard;
use crate::bracket::board::is_bracket_match;
use crate::model::{Match, MatchId, MatchStatus, Side, Sport, TeamId};

/// What a label is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// The sole match of the last round
    Final,
    ThirdPlace,
    Match { round: u32, match_number: u32 },
    /// Heading of a bracket round; `rounds` is the bracket's depth
    Round { round: u32, rounds: u32 },
}

/// English labels
pub fn default_label(label: &Label) -> String {
    match *label {
        Label::Final => "Final".to_string(),
        Label::ThirdPlace => "Third Place".to_string(),
        Label::Match {
            round,
            match_number,
        } => format!("Round {round} Match {match_number}"),
        Label::Round { round, rounds } if round == rounds => "Final".to_string(),
        Label::Round { round, rounds } if round + 1 == rounds => "Semifinal".to_string(),
        Label::Round { round, .. } => format!("Round {round}"),
    }
}

/// Display state of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchState {
    Done,
    Playing,
    Scheduled,
}

impl From<MatchStatus> for MatchState {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Completed => Self::Done,
            MatchStatus::InProgress => Self::Playing,
            MatchStatus::Scheduled => Self::Scheduled,
        }
    }
}

/// Display status of one participant slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipantStatus {
    /// A team occupies the slot
    Normal,
    /// The slot will be filled once its feeding match is decided
    Waiting,
    /// The slot can never be filled
    NoTeam,
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Waiting => write!(f, "waiting"),
            Self::NoTeam => write!(f, "no-team"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: Option<TeamId>,
    pub name: String,
    pub score: u32,
    pub is_winner: bool,
    pub status: ParticipantStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: MatchId,
    pub name: String,
    pub next_match_id: Option<MatchId>,
    pub round: u32,
    pub round_label: String,
    pub state: MatchState,
    pub participants: [ParticipantView; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketViewModel {
    pub matches: Vec<MatchView>,
}

impl BracketViewModel {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MatchView> {
        self.matches.iter().find(|m| m.id == id)
    }
}

/// Project the sport's bracket for display.
///
/// # Arguments
///
/// * `sport` - Snapshot to project
/// * `label_fn` - Produces match names and round headings, see [`default_label`]
///
/// # Returns
///
/// Bracket matches ordered by round then number, the third-place match last.
pub fn project_for_display<F>(sport: &Sport, label_fn: F) -> BracketViewModel
where
    F: Fn(&Label) -> String,
{
    if !sport.has_bracket() {
        return BracketViewModel::default();
    }

    let bracket: Vec<Match> = sport
        .matches()
        .iter()
        .filter(|m| m.block_id.is_none())
        .cloned()
        .collect();
    let board = MatchBoard::new(bracket);

    let rounds = board.max_round();
    let final_count = board
        .matches()
        .iter()
        .filter(|m| is_bracket_match(m) && m.round == rounds)
        .count();
    let semifinal_count = board.semifinals().len();

    let mut order: Vec<usize> = (0..board.matches().len()).collect();
    order.sort_by_key(|&i| {
        let m = &board.matches()[i];
        (m.is_third_place_match(), m.round, m.match_number)
    });

    let matches = order
        .into_iter()
        .map(|index| {
            let m = &board.matches()[index];
            let third_place = m.is_third_place_match();

            let label = if third_place {
                Label::ThirdPlace
            } else if m.round == rounds && final_count == 1 {
                Label::Final
            } else {
                Label::Match {
                    round: m.round,
                    match_number: m.match_number,
                }
            };
            let round_label = if third_place {
                label_fn(&Label::ThirdPlace)
            } else {
                label_fn(&Label::Round {
                    round: m.round,
                    rounds,
                })
            };

            let next_match_id = match board.next_slot(index) {
                Ok(Some((next, _))) if !third_place => Some(board.matches()[next].id.clone()),
                _ => None,
            };

            let participant = |side: Side| {
                let empty_status = if third_place {
                    if semifinal_count > side_index(side) {
                        ParticipantStatus::Waiting
                    } else {
                        ParticipantStatus::NoTeam
                    }
                } else if board.feeder(index, side).is_some() {
                    ParticipantStatus::Waiting
                } else {
                    ParticipantStatus::NoTeam
                };
                participant_view(sport, m, side, empty_status)
            };

            MatchView {
                id: m.id.clone(),
                name: label_fn(&label),
                next_match_id,
                round: m.round,
                round_label,
                state: m.status.into(),
                participants: [participant(Side::Team1), participant(Side::Team2)],
            }
        })
        .collect();

    BracketViewModel { matches }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Team1 => 0,
        Side::Team2 => 1,
    }
}

fn participant_view(
    sport: &Sport,
    m: &Match,
    side: Side,
    empty_status: ParticipantStatus,
) -> ParticipantView {
    let score = m.score(side);
    match m.team(side) {
        Some(team_id) => ParticipantView {
            id: Some(team_id.clone()),
            name: sport
                .team(team_id)
                .map_or_else(|| team_id.clone(), |t| t.name.clone()),
            score,
            is_winner: m.winner_id.as_ref() == Some(team_id),
            status: ParticipantStatus::Normal,
        },
        None => ParticipantView {
            id: None,
            name: String::new(),
            score,
            is_winner: false,
            status: empty_status,
        },
    }
}
