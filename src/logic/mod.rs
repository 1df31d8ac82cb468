//! League engine: fixture scheduling, standings, seeded draws and CSV I/O.

mod csv_io;
mod draw;
mod schedule;
mod standings;

pub use csv_io::{parse_roster, write_standings_csv, CsvIoError, RosterEntry};
pub use draw::draw_order;
pub use schedule::{
    generate_schedule, generate_schedule_with, DateAdvance, FixedInterval, ScheduleError,
    ScheduleParams,
};
pub use standings::{compute_standings, compute_standings_with};
