//! CSV roster import and standings export.

use crate::models::{GroupKey, Standings};
use serde::{Deserialize, Serialize};
use std::io;

/// Errors from reading or writing CSV.
#[derive(Debug)]
pub enum CsvIoError {
    Csv(csv::Error),
    /// The roster file has a header but no team rows.
    EmptyRoster,
}

impl std::fmt::Display for CsvIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvIoError::Csv(e) => write!(f, "CSV error: {}", e),
            CsvIoError::EmptyRoster => write!(f, "Roster contains no teams"),
        }
    }
}

impl std::error::Error for CsvIoError {}

impl From<csv::Error> for CsvIoError {
    fn from(e: csv::Error) -> Self {
        CsvIoError::Csv(e)
    }
}

/// One roster line: `name,group` (group column optional, blank for no group).
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Parse a roster with a header row. Fields are trimmed.
pub fn parse_roster<R: io::Read>(reader: R) -> Result<Vec<RosterEntry>, CsvIoError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let entries = rdr
        .deserialize()
        .collect::<Result<Vec<RosterEntry>, _>>()?;
    if entries.is_empty() {
        return Err(CsvIoError::EmptyRoster);
    }
    Ok(entries)
}

#[derive(Serialize)]
struct StandingsRecord<'a> {
    group: &'a str,
    rank: usize,
    team: &'a str,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i64,
    points: u32,
    form: String,
}

/// Write every table as CSV rows, group by group. `group_name` labels each table.
pub fn write_standings_csv<W: io::Write>(
    writer: W,
    standings: &Standings,
    group_name: impl Fn(&GroupKey) -> String,
) -> Result<(), CsvIoError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (key, rows) in standings {
        let group = group_name(key);
        for row in rows {
            wtr.serialize(StandingsRecord {
                group: &group,
                rank: row.rank,
                team: &row.team_name,
                played: row.played,
                won: row.won,
                drawn: row.drawn,
                lost: row.lost,
                goals_for: row.goals_for,
                goals_against: row.goals_against,
                goal_difference: row.goal_difference,
                points: row.points,
                form: row.form_string(),
            })?;
        }
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
