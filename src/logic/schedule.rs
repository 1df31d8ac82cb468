//! Round-robin fixture generation (circle method) with date and venue assignment.

use super::draw::draw_order;
use crate::models::{Fixture, FixtureId, Round, Team, TeamId};
use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors reported by the schedule generator. No partial schedule is ever returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Fewer than two teams to pair up.
    InsufficientTeams { found: usize },
    /// The same team id was entered twice.
    DuplicateTeam(TeamId),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InsufficientTeams { found } => {
                write!(f, "Need at least 2 teams to generate a schedule (got {})", found)
            }
            ScheduleError::DuplicateTeam(id) => write!(f, "Team {} is listed more than once", id),
        }
    }
}

impl std::error::Error for ScheduleError {}

fn default_kickoff_time() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_days_between_slates() -> u64 {
    7
}

/// Parameters for one generator run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleParams {
    pub start_date: NaiveDate,
    #[serde(default = "default_kickoff_time")]
    pub kickoff_time: NaiveTime,
    #[serde(default)]
    pub venue: String,
    /// Home-and-away: append a second pass with venues reversed.
    #[serde(default)]
    pub double_round: bool,
    /// Fixtures per date inside a round; 0 keeps a whole round on one date.
    #[serde(default)]
    pub max_matches_per_round_before_date_advance: usize,
    #[serde(default = "default_days_between_slates")]
    pub days_between_slates: u64,
    /// Shuffle the entry order with this seed before pairing.
    #[serde(default)]
    pub draw_seed: Option<u64>,
}

impl ScheduleParams {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            kickoff_time: default_kickoff_time(),
            venue: String::new(),
            double_round: false,
            max_matches_per_round_before_date_advance: 0,
            days_between_slates: default_days_between_slates(),
            draw_seed: None,
        }
    }
}

/// How the date cursor moves to the next slate.
pub trait DateAdvance {
    fn advance(&self, date: NaiveDate) -> NaiveDate;
}

/// Advance by a fixed number of days.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedInterval(pub u64);

impl DateAdvance for FixedInterval {
    fn advance(&self, date: NaiveDate) -> NaiveDate {
        date + Days::new(self.0)
    }
}

/// Generate a round-robin schedule, advancing dates by `params.days_between_slates`.
///
/// See [`generate_schedule_with`] for the pairing and date rules.
pub fn generate_schedule(teams: &[Team], params: &ScheduleParams) -> Result<Vec<Round>, ScheduleError> {
    generate_schedule_with(teams, params, &FixedInterval(params.days_between_slates))
}

/// Generate a round-robin schedule with a custom date policy.
///
/// 0. With `draw_seed`, the entry order is first replaced by [`draw_order`].
/// 1. Odd team counts get a bye slot appended; pairings against it are dropped (that team rests).
/// 2. Round `r` pairs slot `(r + m) % (n - 1)` with `(n - 1 - m + r) % (n - 1)`, the pivot
///    `n - 1` standing in when both would be the same slot.
/// 3. The date cursor advances after every `max_matches_per_round_before_date_advance`
///    fixtures inside a round, and once after every round.
/// 4. With `double_round`, the same rounds follow again with home and away swapped (leg 2).
pub fn generate_schedule_with(
    teams: &[Team],
    params: &ScheduleParams,
    policy: &impl DateAdvance,
) -> Result<Vec<Round>, ScheduleError> {
    let drawn;
    let teams = match params.draw_seed {
        Some(seed) => {
            drawn = draw_order(teams, seed);
            drawn.as_slice()
        }
        None => teams,
    };
    let slots = seat_teams(teams)?;
    let round_count = slots.len() - 1;
    let pairings: Vec<Vec<(TeamId, TeamId)>> =
        (0..round_count).map(|r| round_pairings(&slots, r)).collect();

    let legs: &[u8] = if params.double_round { &[1, 2] } else { &[1] };
    let per_date = params.max_matches_per_round_before_date_advance;
    let mut date = params.start_date;
    let mut next_id: FixtureId = 1;
    let mut rounds = Vec::with_capacity(round_count * legs.len());

    for &leg in legs {
        for (r, pairs) in pairings.iter().enumerate() {
            let number = (usize::from(leg - 1) * round_count + r + 1) as u32;
            let mut round = Round::new(number);
            for (i, &(first, second)) in pairs.iter().enumerate() {
                if i > 0 && per_date > 0 && i % per_date == 0 {
                    date = policy.advance(date);
                }
                let (home, away) = if leg == 1 { (first, second) } else { (second, first) };
                round.fixtures.push(Fixture {
                    id: next_id,
                    round: number,
                    leg,
                    home,
                    away,
                    date,
                    time: params.kickoff_time,
                    venue: params.venue.clone(),
                });
                next_id += 1;
            }
            rounds.push(round);
            date = policy.advance(date);
        }
    }

    log::debug!(
        "generated {} fixtures over {} rounds for {} teams",
        next_id - 1,
        rounds.len(),
        teams.len()
    );
    Ok(rounds)
}

/// Team slots for the polygon; `None` is the bye. Always an even count.
fn seat_teams(teams: &[Team]) -> Result<Vec<Option<TeamId>>, ScheduleError> {
    if teams.len() < 2 {
        return Err(ScheduleError::InsufficientTeams { found: teams.len() });
    }
    let mut seen = HashSet::with_capacity(teams.len());
    let mut slots: Vec<Option<TeamId>> = Vec::with_capacity(teams.len() + 1);
    for team in teams {
        if !seen.insert(team.id) {
            return Err(ScheduleError::DuplicateTeam(team.id));
        }
        slots.push(Some(team.id));
    }
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    Ok(slots)
}

/// Pairings for one round, bye pairings dropped.
fn round_pairings(slots: &[Option<TeamId>], round: usize) -> Vec<(TeamId, TeamId)> {
    let pivot = slots.len() - 1;
    (0..slots.len() / 2)
        .filter_map(|m| {
            let home = (round + m) % pivot;
            let mut away = (pivot - m + round) % pivot;
            if away == home {
                away = pivot;
            }
            Some((slots[home]?, slots[away]?))
        })
        .collect()
}
