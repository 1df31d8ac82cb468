//! Fixtures and rounds produced by the schedule generator.

use crate::models::team::TeamId;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sequence number of a fixture within one generated schedule (1-based, emission order).
pub type FixtureId = u32;

/// An unplayed pairing with its slot in the calendar.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub round: u32,
    /// 1 for the first pass, 2 for the reverse leg of a double round.
    pub leg: u8,
    pub home: TeamId,
    pub away: TeamId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
}

impl Fixture {
    pub fn kickoff(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }
}

/// All fixtures sharing a round number. A team appears at most once per round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub name: String,
    pub fixtures: Vec<Fixture>,
}

impl Round {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            name: format!("Round {number}"),
            fixtures: Vec::new(),
        }
    }

    /// Teams from `teams` that have no fixture in this round.
    pub fn resting<'a>(&self, teams: &'a [TeamId]) -> Vec<&'a TeamId> {
        teams
            .iter()
            .filter(|t| !self.fixtures.iter().any(|f| f.involves(**t)))
            .collect()
    }
}
