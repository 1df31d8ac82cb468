//! Data structures for the league: teams, groups, fixtures, matches, standings, tournament state.

mod fixture;
mod game;
mod standings;
mod team;
mod tournament;

pub use fixture::{Fixture, FixtureId, Round};
pub use game::{Match, MatchId, MatchStatus};
pub use standings::{FormResult, PointSystem, Standings, StandingsRow, FORM_WINDOW};
pub use team::{Group, GroupId, GroupKey, Team, TeamId};
pub use tournament::{GroupSchedule, Tournament, TournamentError, TournamentId, TournamentState};
