//! League tables from completed results: fold, rank, trim form.

use crate::models::{
    GroupId, GroupKey, Match, MatchStatus, PointSystem, Standings, StandingsRow, Team, TeamId,
    FORM_WINDOW,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Compute standings with the default 3/1/0 points.
pub fn compute_standings(
    teams: &[Team],
    groups: &HashMap<TeamId, GroupId>,
    matches: &[Match],
) -> Standings {
    compute_standings_with(teams, groups, matches, &PointSystem::default())
}

/// Compute one ranked table per group from scratch.
///
/// Teams without a group land in [`GroupKey::Ungrouped`]. Only completed matches with both
/// scores count, applied in kickoff order so form reads oldest to newest. Bad records
/// (unknown team, a team against itself, teams from different groups) are logged and skipped.
/// A group with no results still gets a zeroed table, which the ordering ranks by name.
pub fn compute_standings_with(
    teams: &[Team],
    groups: &HashMap<TeamId, GroupId>,
    matches: &[Match],
    points: &PointSystem,
) -> Standings {
    let group_of: HashMap<TeamId, GroupKey> = teams
        .iter()
        .map(|t| (t.id, GroupKey::from(groups.get(&t.id).copied())))
        .collect();

    let mut results: Vec<(&Match, u32, u32)> = matches
        .iter()
        .filter_map(|m| countable_result(m, &group_of))
        .collect();
    // Stable: equal kickoffs keep input order.
    results.sort_by_key(|(m, _, _)| m.kickoff);

    let mut rows = results.iter().fold(
        teams
            .iter()
            .map(|t| (t.id, StandingsRow::new(t.id, t.name.as_str())))
            .collect::<HashMap<_, _>>(),
        |mut rows, &(m, home_score, away_score)| {
            if let Some(row) = rows.get_mut(&m.home) {
                row.apply(home_score, away_score, points);
            }
            if let Some(row) = rows.get_mut(&m.away) {
                row.apply(away_score, home_score, points);
            }
            rows
        },
    );

    let mut tables: Standings = BTreeMap::new();
    for team in teams {
        // `remove` also drops repeated roster entries.
        if let Some(row) = rows.remove(&team.id) {
            tables.entry(group_of[&team.id]).or_default().push(row);
        }
    }
    for table in tables.values_mut() {
        rank_table(table);
    }

    log::debug!(
        "standings: {} results counted over {} tables",
        results.len(),
        tables.len()
    );
    tables
}

/// Score of a match if it should count, logging malformed records.
fn countable_result<'m>(
    m: &'m Match,
    group_of: &HashMap<TeamId, GroupKey>,
) -> Option<(&'m Match, u32, u32)> {
    if m.status != MatchStatus::Completed {
        return None;
    }
    let Some((home_score, away_score)) = m.final_score() else {
        log::warn!("Skipping match {}: completed without both scores", m.id);
        return None;
    };
    if m.home == m.away {
        log::warn!("Skipping match {}: team {} plays itself", m.id, m.home);
        return None;
    }
    let (Some(home_group), Some(away_group)) = (group_of.get(&m.home), group_of.get(&m.away)) else {
        log::warn!("Skipping match {}: references a team not in the roster", m.id);
        return None;
    };
    if home_group != away_group {
        log::warn!("Skipping match {}: teams are in different groups", m.id);
        return None;
    }
    Some((m, home_score, away_score))
}

/// Points, goal difference, goals for (all descending), then name ignoring case, then id.
fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_name.to_lowercase().cmp(&b.team_name.to_lowercase()))
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

fn rank_table(table: &mut [StandingsRow]) {
    table.sort_by(compare_rows);
    for (i, row) in table.iter_mut().enumerate() {
        row.rank = i + 1;
        if row.form.len() > FORM_WINDOW {
            let excess = row.form.len() - FORM_WINDOW;
            row.form.drain(..excess);
        }
    }
}
