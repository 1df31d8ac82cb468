//! League fixtures: round-robin schedule generation and standings, plus the models the web host keeps.

pub mod logic;
pub mod models;

pub use logic::{
    compute_standings, compute_standings_with, draw_order, generate_schedule,
    generate_schedule_with, parse_roster, write_standings_csv, CsvIoError, DateAdvance,
    FixedInterval, RosterEntry, ScheduleError, ScheduleParams,
};
pub use models::{
    Fixture, FixtureId, FormResult, Group, GroupId, GroupKey, GroupSchedule, Match, MatchId,
    MatchStatus, PointSystem, Round, Standings, StandingsRow, Team, TeamId, Tournament,
    TournamentError, TournamentId, TournamentState, FORM_WINDOW,
};
