//! Match records: a pairing plus its status and final score.

use crate::models::fixture::Fixture;
use crate::models::team::TeamId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match record.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Unscheduled,
    Scheduled,
    Completed,
    Cancelled,
}

/// A single match between a home and an away team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home: TeamId,
    pub away: TeamId,
    pub kickoff: NaiveDateTime,
    pub venue: String,
    /// None until a result is entered.
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: MatchStatus,
    /// Round and leg of the fixture this match was created from, if any.
    pub round: Option<u32>,
    pub leg: Option<u8>,
}

impl Match {
    /// A manually created pairing with no fixture behind it.
    pub fn new(home: TeamId, away: TeamId, kickoff: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            home,
            away,
            kickoff,
            venue: String::new(),
            home_score: None,
            away_score: None,
            status: MatchStatus::Unscheduled,
            round: None,
            leg: None,
        }
    }

    pub fn from_fixture(fixture: &Fixture) -> Self {
        Self {
            venue: fixture.venue.clone(),
            status: MatchStatus::Scheduled,
            round: Some(fixture.round),
            leg: Some(fixture.leg),
            ..Self::new(fixture.home, fixture.away, fixture.kickoff())
        }
    }

    /// A completed match with its final score (convenience for result entry and tests).
    pub fn completed(home: TeamId, away: TeamId, kickoff: NaiveDateTime, home_score: u32, away_score: u32) -> Self {
        let mut m = Self::new(home, away, kickoff);
        m.record_score(home_score, away_score);
        m
    }

    /// Set the final score and mark the match completed.
    pub fn record_score(&mut self, home_score: u32, away_score: u32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = MatchStatus::Completed;
    }

    /// Final score, only for completed matches with both scores present.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if self.status != MatchStatus::Completed {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }
}
