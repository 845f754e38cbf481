//! Sport snapshot files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use event_scoring::Sport;
use log::debug;

/// Read a snapshot from disk
pub fn load(path: &Path) -> Result<Sport> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let sport = Sport::from_json(&json)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    debug!(
        "Loaded {} ({}, {} teams)",
        sport.name,
        sport.sport_type(),
        sport.teams.len()
    );
    Ok(sport)
}

/// Replace the snapshot on disk.
///
/// The new content goes to a sibling file that is then renamed over the
/// original, so a failed write never leaves a truncated snapshot behind.
pub fn save(path: &Path, sport: &Sport) -> Result<()> {
    let json = sport.to_json().context("Failed to serialize snapshot")?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace snapshot {}", path.display()))?;
    debug!("Saved {}", path.display());
    Ok(())
}
