//! Command-line host for the event scoring core.
//!
//! Loads a sport snapshot, runs one operation against it, and writes the next
//! snapshot back when the operation changed it.

mod commands;
mod config;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Error, bail};
use log::info;
use pico_args::Arguments;

use commands::{Command, parse_score};
use config::{CliConfig, LeagueOverrides};

const HELP: &str = "\
Score brackets, round robins, leagues and rankings for a multi-sport event

USAGE:
  es_cli <COMMAND> [OPTIONS]

COMMANDS:
  bracket                  Seed the teams into a new tournament bracket
  schedule                 Generate the round-robin schedule
  result                   Apply one match result
  standings                Print standings, placements or ranking order
  distribute               Deal the teams into league blocks
  playoff                  Seed the league playoff from block standings
  view                     Print the bracket view model as JSON
  rank                     Create ranking entries; move one with --entry/--to

OPTIONS:
  --snapshot   PATH        Sport snapshot file  [default: env ES_SNAPSHOT]
  --seed       N           Shuffle seed          [default: env ES_SEED or random]
  --blocks     N           League block count    [default: env ES_BLOCK_COUNT or snapshot]
  --advancing  N           Teams advancing per block  [default: env ES_ADVANCING or snapshot]
  --third-place BOOL       Play a third-place match   [default: env ES_THIRD_PLACE or snapshot]
  --match      ID          Match to update (result)
  --score      A-B         Score to record (result)
  --entry      ID          Ranking entry to move (rank)
  --to         N           New rank for --entry  [default: 1]

FLAGS:
  --shuffle                Shuffle the seeding order (bracket)
  --complete               Mark the match completed even at 0-0 (result)
  --force                  Discard recorded scores (bracket, schedule, distribute, playoff)
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log level (e.g., info, debug)
  ES_PRETTY                Pretty-print JSON output [default: true]
  (A .env file in the working directory is loaded if present)
";

fn parse_command(pargs: &mut Arguments) -> Result<Command, Error> {
    let Some(name) = pargs.subcommand()? else {
        bail!("Missing command\n\n{HELP}");
    };

    let command = match name.as_str() {
        "bracket" => Command::Bracket {
            shuffle: pargs.contains("--shuffle"),
            force: pargs.contains("--force"),
        },
        "schedule" => Command::Schedule {
            force: pargs.contains("--force"),
        },
        "result" => Command::Result {
            match_id: pargs
                .value_from_str("--match")
                .context("`result` needs --match ID")?,
            score: pargs
                .value_from_fn("--score", parse_score)
                .context("`result` needs --score A-B")?,
            complete: pargs.contains("--complete"),
        },
        "standings" => Command::Standings,
        "distribute" => Command::Distribute {
            force: pargs.contains("--force"),
        },
        "playoff" => Command::Playoff {
            force: pargs.contains("--force"),
        },
        "view" => Command::View,
        "rank" => Command::Rank {
            entry: pargs.opt_value_from_str("--entry")?,
            to: pargs.opt_value_from_str("--to")?.unwrap_or(1),
        },
        other => bail!("Unknown command '{other}'\n\n{HELP}"),
    };
    Ok(command)
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let command = parse_command(&mut pargs)?;
    let snapshot_path: Option<PathBuf> = pargs.opt_value_from_str("--snapshot")?;
    let seed: Option<u64> = pargs.opt_value_from_str("--seed")?;
    let overrides = LeagueOverrides {
        block_count: pargs.opt_value_from_str("--blocks")?,
        advancing_teams: pargs.opt_value_from_str("--advancing")?,
        has_third_place_match: pargs.opt_value_from_str("--third-place")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }

    env_logger::builder().format_target(false).init();

    let config = CliConfig::from_env(snapshot_path, seed, overrides)?;
    config.validate()?;

    let mut sport = snapshot::load(&config.snapshot)?;
    info!("Running {:?} on {}", command, sport.name);

    let outcome = commands::run(&command, &config, &mut sport)?;
    if outcome.changed {
        snapshot::save(&config.snapshot, &sport)?;
        info!("Snapshot updated: {}", config.snapshot.display());
    }

    println!("{}", outcome.report.trim_end());
    Ok(())
}
