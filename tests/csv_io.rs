//! Integration tests for CSV roster parsing and standings export.

use chrono::NaiveDate;
use league_fixtures::{
    compute_standings, parse_roster, write_standings_csv, CsvIoError, GroupKey, Match,
    RosterEntry, Team,
};
use std::collections::HashMap;

#[test]
fn roster_with_and_without_group_column() {
    let entries = parse_roster(" name , group \n Harbour FC , North \nMill Lane,\n".as_bytes()).unwrap();
    assert_eq!(
        entries,
        vec![
            RosterEntry {
                name: "Harbour FC".to_string(),
                group: Some("North".to_string()),
            },
            RosterEntry {
                name: "Mill Lane".to_string(),
                group: None,
            },
        ]
    );

    let names_only = parse_roster("name\nA\nB\nC\n".as_bytes()).unwrap();
    assert_eq!(names_only.len(), 3);
    assert!(names_only.iter().all(|e| e.group.is_none()));
}

#[test]
fn empty_roster_is_rejected() {
    assert!(matches!(
        parse_roster("name,group\n".as_bytes()),
        Err(CsvIoError::EmptyRoster)
    ));
}

#[test]
fn roster_without_name_column_is_a_csv_error() {
    assert!(matches!(
        parse_roster("team,group\nA,North\n".as_bytes()),
        Err(CsvIoError::Csv(_))
    ));
}

#[test]
fn standings_export_has_header_and_rows() {
    let t: Vec<Team> = ["A", "B"].iter().map(|n| Team::new(*n)).collect();
    let kickoff = NaiveDate::from_ymd_opt(2024, 5, 4)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap();
    let matches = vec![Match::completed(t[0].id, t[1].id, kickoff, 2, 1)];
    let standings = compute_standings(&t, &HashMap::new(), &matches);

    let mut out = Vec::new();
    write_standings_csv(&mut out, &standings, |key| match key {
        GroupKey::Ungrouped => "League".to_string(),
        GroupKey::Grouped(id) => id.to_string(),
    })
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "group,rank,team,played,won,drawn,lost,goals_for,goals_against,goal_difference,points,form",
            "League,1,A,1,1,0,0,2,1,1,3,W",
            "League,2,B,1,0,0,1,1,2,-1,0,L",
        ]
    );
}
