//! Tournament and TournamentState: the record the host keeps between engine calls.

use crate::logic::{
    compute_standings_with, generate_schedule, RosterEntry, ScheduleError, ScheduleParams,
};
use crate::models::fixture::Round;
use crate::models::game::{Match, MatchId, MatchStatus};
use crate::models::standings::{PointSystem, Standings};
use crate::models::team::{Group, GroupId, GroupKey, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Team and group names must not be blank.
    EmptyName,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// A group with this name already exists (case-insensitive).
    DuplicateGroupName,
    TeamNotFound(TeamId),
    GroupNotFound(GroupId),
    MatchNotFound(MatchId),
    /// The generator rejected one of the groups.
    Schedule(ScheduleError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::EmptyName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::DuplicateGroupName => write!(f, "A group with this name already exists"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::Schedule(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<ScheduleError> for TournamentError {
    fn from(e: ScheduleError) -> Self {
        TournamentError::Schedule(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Entering teams and groups; no fixtures yet.
    #[default]
    Setup,
    /// Fixtures generated; results are being entered.
    InProgress,
}

/// Fixtures generated for one group (or for the whole field when ungrouped).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupSchedule {
    pub group: GroupKey,
    pub rounds: Vec<Round>,
}

/// Full tournament record: roster, groups, generated fixtures and match results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub teams: Vec<Team>,
    pub groups: Vec<Group>,
    /// Team -> group. Teams missing here are ungrouped.
    pub assignments: HashMap<TeamId, GroupId>,
    pub schedules: Vec<GroupSchedule>,
    pub matches: Vec<Match>,
    pub state: TournamentState,
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
            groups: Vec::new(),
            assignments: HashMap::new(),
            schedules: Vec::new(),
            matches: Vec::new(),
            state: TournamentState::Setup,
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Add a team (Setup only). Names must be unique (case-insensitive). Returns the new id.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeamName);
        }
        let team = Team::new(name);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team and its group assignment (Setup only).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        self.assignments.remove(&team_id);
        Ok(())
    }

    /// Add a group (Setup only). Returns the new id.
    pub fn add_group(&mut self, name: impl Into<String>) -> Result<GroupId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.groups.iter().any(|g| g.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateGroupName);
        }
        let group = Group::new(name);
        let id = group.id;
        self.groups.push(group);
        Ok(id)
    }

    /// Put a team in a group, or take it out with `None` (Setup only).
    pub fn assign_team(&mut self, team_id: TeamId, group: Option<GroupId>) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        if self.team(team_id).is_none() {
            return Err(TournamentError::TeamNotFound(team_id));
        }
        match group {
            Some(group_id) => {
                if !self.groups.iter().any(|g| g.id == group_id) {
                    return Err(TournamentError::GroupNotFound(group_id));
                }
                self.assignments.insert(team_id, group_id);
            }
            None => {
                self.assignments.remove(&team_id);
            }
        }
        Ok(())
    }

    /// Add teams from a roster, creating groups by name as needed (Setup only).
    /// Either every entry is added or none is.
    pub fn import_roster(&mut self, entries: &[RosterEntry]) -> Result<usize, TournamentError> {
        let mut next = self.clone();
        for entry in entries {
            let team_id = next.add_team(entry.name.as_str())?;
            let group_name = entry.group.as_deref().map(str::trim).unwrap_or("");
            if group_name.is_empty() {
                continue;
            }
            let group_id = match next
                .groups
                .iter()
                .find(|g| g.name.eq_ignore_ascii_case(group_name))
            {
                Some(g) => g.id,
                None => next.add_group(group_name)?,
            };
            next.assign_team(team_id, Some(group_id))?;
        }
        *self = next;
        Ok(entries.len())
    }

    /// Display label for a table key.
    pub fn group_name(&self, key: &GroupKey) -> String {
        match key {
            GroupKey::Grouped(id) => self
                .groups
                .iter()
                .find(|g| g.id == *id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| id.to_string()),
            GroupKey::Ungrouped => "Ungrouped".to_string(),
        }
    }

    /// Teams per group in roster order. Groups without teams are left out;
    /// unassigned teams form the `Ungrouped` bucket.
    pub fn teams_by_group(&self) -> Vec<(GroupKey, Vec<Team>)> {
        let mut buckets: Vec<(GroupKey, Vec<Team>)> = self
            .groups
            .iter()
            .map(|g| (GroupKey::Grouped(g.id), Vec::new()))
            .collect();
        buckets.push((GroupKey::Ungrouped, Vec::new()));
        for team in &self.teams {
            let key = GroupKey::from(self.assignments.get(&team.id).copied());
            if let Some((_, bucket)) = buckets.iter_mut().find(|(k, _)| *k == key) {
                bucket.push(team.clone());
            }
        }
        buckets.retain(|(_, teams)| !teams.is_empty());
        buckets
    }

    /// Generate fixtures for every group and create a scheduled match per fixture.
    ///
    /// Nothing changes if any group cannot be scheduled.
    pub fn generate_fixtures(&mut self, params: &ScheduleParams) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let buckets = self.teams_by_group();
        if buckets.is_empty() {
            return Err(ScheduleError::InsufficientTeams { found: 0 }.into());
        }
        let mut schedules = Vec::with_capacity(buckets.len());
        for (group, teams) in buckets {
            let rounds = generate_schedule(&teams, params)?;
            schedules.push(GroupSchedule { group, rounds });
        }

        self.matches = schedules
            .iter()
            .flat_map(|s| s.rounds.iter())
            .flat_map(|r| r.fixtures.iter())
            .map(Match::from_fixture)
            .collect();
        self.schedules = schedules;
        self.state = TournamentState::InProgress;
        log::info!(
            "Tournament {}: {} matches scheduled",
            self.id,
            self.matches.len()
        );
        Ok(())
    }

    /// Enter (or correct) a final score; the match becomes completed.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        home_score: u32,
        away_score: u32,
    ) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.record_score(home_score, away_score);
        Ok(())
    }

    /// Change a match's status (e.g. cancel it). Scores are kept as entered.
    pub fn set_match_status(&mut self, match_id: MatchId, status: MatchStatus) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.status = status;
        Ok(())
    }

    pub fn standings(&self) -> Standings {
        self.standings_with(&PointSystem::default())
    }

    pub fn standings_with(&self, points: &PointSystem) -> Standings {
        compute_standings_with(&self.teams, &self.assignments, &self.matches, points)
    }

    /// Drop fixtures and matches and go back to Setup (InProgress only).
    pub fn reset_fixtures(&mut self) -> Result<(), TournamentError> {
        if self.state != TournamentState::InProgress {
            return Err(TournamentError::InvalidState);
        }
        self.schedules.clear();
        self.matches.clear();
        self.state = TournamentState::Setup;
        Ok(())
    }
}
