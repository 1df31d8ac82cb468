//! Standings rows, form entries and the points table.

use crate::models::team::{GroupKey, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of most recent results kept in a team's form.
pub const FORM_WINDOW: usize = 5;

/// One ranked table per group.
pub type Standings = BTreeMap<GroupKey, Vec<StandingsRow>>;

/// Outcome of one match from a team's point of view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn as_char(self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }
}

/// Points awarded per outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointSystem {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointSystem {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

impl PointSystem {
    pub fn points_for(&self, result: FormResult) -> u32 {
        match result {
            FormResult::Win => self.win,
            FormResult::Draw => self.draw,
            FormResult::Loss => self.loss,
        }
    }
}

/// A team's line in its group table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    /// Last results, oldest first.
    pub form: Vec<FormResult>,
    /// 1-based position within the group.
    pub rank: usize,
}

impl StandingsRow {
    /// A zeroed row (bootstrap table before any result exists).
    pub fn new(team_id: TeamId, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            ..Self::default()
        }
    }

    /// Fold one result into the row. `goal_difference` is re-derived, never accumulated.
    /// Totals saturate at `u32::MAX` instead of overflowing.
    pub fn apply(&mut self, scored: u32, conceded: u32, points: &PointSystem) {
        let result = match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => FormResult::Win,
            std::cmp::Ordering::Equal => FormResult::Draw,
            std::cmp::Ordering::Less => FormResult::Loss,
        };
        self.played = self.played.saturating_add(1);
        match result {
            FormResult::Win => self.won = self.won.saturating_add(1),
            FormResult::Draw => self.drawn = self.drawn.saturating_add(1),
            FormResult::Loss => self.lost = self.lost.saturating_add(1),
        }
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.points = self.points.saturating_add(points.points_for(result));
        self.form.push(result);
    }

    /// Form as a compact string, e.g. "WWDLW".
    pub fn form_string(&self) -> String {
        self.form.iter().map(|r| r.as_char()).collect()
    }
}
