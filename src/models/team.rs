//! Team, Group and the group key used to partition standings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in fixtures, matches and lookups).
pub type TeamId = Uuid;

/// Unique identifier for a group within a tournament stage.
pub type GroupId = Uuid;

/// A team entered in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A named partition of teams (e.g. "Group A").
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Which table a team belongs to.
///
/// Ordering puts every `Grouped` key (ascending by id) before `Ungrouped`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Grouped(GroupId),
    Ungrouped,
}

impl From<Option<GroupId>> for GroupKey {
    fn from(group: Option<GroupId>) -> Self {
        match group {
            Some(id) => GroupKey::Grouped(id),
            None => GroupKey::Ungrouped,
        }
    }
}
