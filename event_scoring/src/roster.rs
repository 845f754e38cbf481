//! Roster collaborator: turns group names (grades, classes) into default teams.

use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use crate::model::Team;

/// Source of member names per group.
pub trait RosterProvider {
    /// Members of `group`, or `None` when the group is unknown.
    fn members(&self, group: &str) -> Option<Vec<String>>;
}

/// In-memory roster
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    groups: HashMap<String, Vec<String>>,
}

impl StaticRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: impl Into<String>, members: Vec<String>) -> Self {
        self.groups.insert(group.into(), members);
        self
    }
}

impl RosterProvider for StaticRoster {
    fn members(&self, group: &str) -> Option<Vec<String>> {
        self.groups.get(group).cloned()
    }
}

/// One team per group, named after the group, with a fresh id.
///
/// Unknown groups still get a team, with an empty roster.
pub fn default_teams<P, S>(provider: &P, groups: &[S]) -> Vec<Team>
where
    P: RosterProvider + ?Sized,
    S: AsRef<str>,
{
    groups
        .iter()
        .map(|group| {
            let group = group.as_ref();
            let members = provider.members(group).unwrap_or_else(|| {
                debug!("No roster for group {}", group);
                Vec::new()
            });
            Team::new(Uuid::new_v4().to_string(), group).with_members(members)
        })
        .collect()
}
