//! Command handlers.
//!
//! Every handler works on an in-memory snapshot and reports whether it changed;
//! `main` decides whether to write it back.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use event_scoring::league::block_stage_matches;
use event_scoring::model::{MatchStatus, PointScheme, SportFormat};
use event_scoring::view::default_label;
use event_scoring::{
    Match, Sport, TeamStats, apply_sport_result, bracket_placements, compute_block_standings,
    compute_standings, distribute_into_blocks, generate_bracket_matches, generate_playoff,
    generate_round_robin_matches, move_ranking_entry, project_for_display,
    ranking_entries_for_teams, reconstruct_blocks, scored_matches_at_risk, sort_ranking_entries,
};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::CliConfig;

/// A parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Seed the teams into a new tournament bracket
    Bracket { shuffle: bool, force: bool },
    /// Generate the full round-robin schedule
    Schedule { force: bool },
    /// Apply one result with progression
    Result {
        match_id: String,
        score: (u32, u32),
        complete: bool,
    },
    /// Print standings, placements or ranking order
    Standings,
    /// Deal the teams into league blocks
    Distribute { force: bool },
    /// Seed the playoff from the block standings
    Playoff { force: bool },
    /// Print the bracket view model as JSON
    View,
    /// Initialise ranking entries, optionally moving one to a new rank
    Rank { entry: Option<String>, to: u32 },
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: String,
    /// The snapshot was modified and should be saved
    pub changed: bool,
}

impl Outcome {
    fn changed(report: String) -> Self {
        Self {
            report,
            changed: true,
        }
    }

    fn unchanged(report: String) -> Self {
        Self {
            report,
            changed: false,
        }
    }
}

/// Parse `A-B` into a pair of scores
pub fn parse_score(s: &str) -> Result<(u32, u32), String> {
    let (a, b) = s
        .split_once('-')
        .ok_or_else(|| format!("expected SCORE as A-B, got '{s}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid score '{part}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

/// Run `command` against `sport`.
///
/// # Errors
///
/// Fails when the command does not fit the sport's format, when the core
/// rejects the input, or when the command would discard recorded scores
/// without `--force`.
pub fn run(command: &Command, config: &CliConfig, sport: &mut Sport) -> Result<Outcome> {
    match command {
        Command::Bracket { shuffle, force } => bracket(sport, config, *shuffle, *force),
        Command::Schedule { force } => schedule(sport, *force),
        Command::Result {
            match_id,
            score,
            complete,
        } => record_result(sport, match_id, *score, *complete),
        Command::Standings => standings(sport),
        Command::Distribute { force } => distribute(sport, config, *force),
        Command::Playoff { force } => playoff(sport, config, *force),
        Command::View => view(sport, config),
        Command::Rank { entry, to } => rank(sport, entry.as_deref(), *to),
    }
}

fn rng(config: &CliConfig) -> StdRng {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Shuffle seed: {}", seed);
    StdRng::seed_from_u64(seed)
}

fn team_name<'a>(sport: &'a Sport, team_id: Option<&'a str>) -> &'a str {
    match team_id {
        Some(id) => sport.team(id).map_or(id, |t| t.name.as_str()),
        None => "TBD",
    }
}

fn bracket(sport: &mut Sport, config: &CliConfig, shuffle: bool, force: bool) -> Result<Outcome> {
    let kind = sport.sport_type();
    let mut seed_order = sport.teams.clone();
    let SportFormat::Tournament { matches, settings } = &mut sport.format else {
        bail!("`bracket` needs a tournament sport, found {kind}");
    };

    let scored = matches.iter().filter(|m| m.has_score()).count();
    if scored > 0 && !force {
        bail!("{scored} bracket matches already have scores; pass --force to discard them");
    }

    if shuffle {
        seed_order.shuffle(&mut rng(config));
    }
    if let Some(third_place) = config.league.has_third_place_match {
        settings.has_third_place_match = third_place;
    }

    *matches = generate_bracket_matches(&seed_order, settings.has_third_place_match)?;
    Ok(Outcome::changed(format!(
        "Generated {} matches for {} teams",
        matches.len(),
        seed_order.len()
    )))
}

fn schedule(sport: &mut Sport, force: bool) -> Result<Outcome> {
    let kind = sport.sport_type();
    let teams = sport.teams.clone();
    let SportFormat::RoundRobin { matches, .. } = &mut sport.format else {
        bail!("`schedule` needs a round-robin sport, found {kind}");
    };

    let scored = matches.iter().filter(|m| m.has_score()).count();
    if scored > 0 && !force {
        bail!("{scored} matches already have scores; pass --force to discard them");
    }

    *matches = generate_round_robin_matches(&teams);
    let rounds = matches.iter().map(|m| m.round).max().unwrap_or(0);
    Ok(Outcome::changed(format!(
        "Scheduled {} matches over {} rounds",
        matches.len(),
        rounds
    )))
}

fn record_result(
    sport: &mut Sport,
    match_id: &str,
    (team1_score, team2_score): (u32, u32),
    complete: bool,
) -> Result<Outcome> {
    let mut update = sport
        .matches()
        .iter()
        .find(|m| m.id == match_id)
        .cloned()
        .with_context(|| format!("Unknown match {match_id}"))?
        .with_scores(team1_score, team2_score);
    // A stored completion does not survive re-entering a score; 0-0 clears it
    update.status = match update.status {
        _ if complete => MatchStatus::Completed,
        MatchStatus::Completed => MatchStatus::Scheduled,
        status => status,
    };

    if !apply_sport_result(sport, update) {
        bail!("{} sports have no matches", sport.sport_type());
    }
    let Some(applied) = sport.matches().iter().find(|m| m.id == match_id).cloned() else {
        bail!("Match {match_id} vanished while applying the result");
    };

    let mut report = format!(
        "{}: {} {}-{} {} ({})",
        applied.id,
        team_name(sport, applied.team1_id.as_deref()),
        applied.team1_score,
        applied.team2_score,
        team_name(sport, applied.team2_id.as_deref()),
        applied.status
    );
    if let Some(winner) = applied.winner_id.as_deref() {
        let _ = write!(report, ", winner {}", team_name(sport, Some(winner)));
    }
    Ok(Outcome::changed(report))
}

fn render_table(rows: &[TeamStats]) -> String {
    let mut out = format!(
        "{:>3}  {:<20} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}\n",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<20} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            i + 1,
            row.team_name,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference(),
            row.points
        );
    }
    out
}

fn standings(sport: &Sport) -> Result<Outcome> {
    let report = match &sport.format {
        SportFormat::RoundRobin { matches, settings } => {
            settings.validate()?;
            render_table(&compute_standings(
                &sport.teams,
                matches,
                settings.ranking_method,
                &settings.points,
            ))
        }
        SportFormat::League { matches, settings } => {
            let mut out = String::new();
            for block in reconstruct_blocks(matches) {
                let rows = compute_block_standings(
                    &block,
                    &sport.teams,
                    settings.ranking_method,
                    &PointScheme::default(),
                );
                let _ = writeln!(out, "{}\n{}", block.name, render_table(&rows));
            }
            out
        }
        SportFormat::Tournament { matches, .. } => match bracket_placements(matches) {
            Some(p) => {
                let mut out = format!(
                    "1. {}\n2. {}\n",
                    team_name(sport, Some(p.champion.as_str())),
                    team_name(sport, Some(p.runner_up.as_str()))
                );
                if let (Some(third), Some(fourth)) = (p.third.as_deref(), p.fourth.as_deref()) {
                    let _ = write!(
                        out,
                        "3. {}\n4. {}\n",
                        team_name(sport, Some(third)),
                        team_name(sport, Some(fourth))
                    );
                }
                out
            }
            None => "Bracket not decided yet\n".to_string(),
        },
        SportFormat::Ranking { entries, settings } => {
            settings.validate()?;
            let mut entries = entries.clone();
            sort_ranking_entries(&mut entries, settings.sort_direction);
            let mut out = format!("{:>3}  {:<20} {}\n", "#", "Team", settings.criteria_name);
            for e in &entries {
                let score = e.score.map_or_else(|| "-".to_string(), |s| s.to_string());
                let _ = writeln!(
                    out,
                    "{:>3}  {:<20} {}",
                    e.rank,
                    team_name(sport, Some(e.team_id.as_str())),
                    score
                );
            }
            out
        }
    };
    Ok(Outcome::unchanged(report))
}

fn distribute(sport: &mut Sport, config: &CliConfig, force: bool) -> Result<Outcome> {
    let kind = sport.sport_type();
    let teams = sport.teams.clone();
    let SportFormat::League { matches, settings } = &mut sport.format else {
        bail!("`distribute` needs a league sport, found {kind}");
    };

    let next_settings = config.league.apply(settings);
    next_settings.validate()?;

    let at_risk = scored_matches_at_risk(matches);
    if at_risk > 0 && !force {
        bail!("{at_risk} block matches already have scores; pass --force to discard them");
    }

    let blocks = distribute_into_blocks(&teams, next_settings.block_count, &mut rng(config))?;
    *matches = block_stage_matches(&blocks);
    *settings = next_settings;

    let mut report = String::new();
    for block in &blocks {
        let names: Vec<&str> = block
            .team_ids
            .iter()
            .map(|id| teams.iter().find(|t| &t.id == id).map_or(id.as_str(), |t| t.name.as_str()))
            .collect();
        let _ = writeln!(report, "{}: {}", block.name, names.join(", "));
    }
    Ok(Outcome::changed(report))
}

fn playoff(sport: &mut Sport, config: &CliConfig, force: bool) -> Result<Outcome> {
    let kind = sport.sport_type();
    let teams = sport.teams.clone();
    let SportFormat::League { matches, settings } = &mut sport.format else {
        bail!("`playoff` needs a league sport, found {kind}");
    };

    let scored_playoff = matches
        .iter()
        .filter(|m| !m.is_block_match() && m.has_score())
        .count();
    if scored_playoff > 0 && !force {
        bail!("{scored_playoff} playoff matches already have scores; pass --force to regenerate");
    }

    let next_settings = config.league.apply(settings);
    let blocks = reconstruct_blocks(matches);
    if blocks.is_empty() {
        bail!("No block matches found; run `distribute` first");
    }

    let bracket = generate_playoff(&blocks, &teams, &next_settings)?;
    let seeded = bracket
        .iter()
        .filter(|m| m.round == 1)
        .flat_map(|m| [m.team1_id.as_ref(), m.team2_id.as_ref()])
        .flatten()
        .count();

    let mut next: Vec<Match> = block_stage_matches(&blocks);
    let playoff_len = bracket.len();
    next.extend(bracket);
    *matches = next;
    *settings = next_settings;

    Ok(Outcome::changed(format!(
        "Playoff generated: {playoff_len} matches, {seeded} teams seeded into round 1"
    )))
}

fn view(sport: &Sport, config: &CliConfig) -> Result<Outcome> {
    let model = project_for_display(sport, default_label);
    let json = if config.pretty {
        serde_json::to_string_pretty(&model)
    } else {
        serde_json::to_string(&model)
    }
    .context("Failed to serialize view")?;
    Ok(Outcome::unchanged(json))
}

fn rank(sport: &mut Sport, entry: Option<&str>, to: u32) -> Result<Outcome> {
    let kind = sport.sport_type();
    let teams = sport.teams.clone();
    let SportFormat::Ranking { entries, .. } = &mut sport.format else {
        bail!("`rank` needs a ranking sport, found {kind}");
    };

    let mut report = String::new();
    if entries.is_empty() {
        *entries = ranking_entries_for_teams(&teams);
        let _ = writeln!(report, "Created {} ranking entries", entries.len());
    }

    if let Some(entry) = entry {
        if !entries.iter().any(|e| e.id == entry) {
            bail!("Unknown ranking entry {entry}");
        }
        *entries = move_ranking_entry(std::mem::take(entries), entry, to);
        let _ = writeln!(report, "Moved {entry} to rank {}", to.clamp(1, entries.len() as u32));
    }

    Ok(Outcome::changed(report))
}
