//! Integration tests for the schedule generator: pairing, byes, legs and dates.

use chrono::{Days, NaiveDate, NaiveTime};
use league_fixtures::{
    draw_order, generate_schedule, generate_schedule_with, DateAdvance, Fixture, Round,
    ScheduleError, ScheduleParams, Team, TeamId,
};
use std::collections::{HashMap, HashSet};

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
}

fn params() -> ScheduleParams {
    ScheduleParams::new(start())
}

fn fixtures(rounds: &[Round]) -> Vec<&Fixture> {
    rounds.iter().flat_map(|r| r.fixtures.iter()).collect()
}

fn unordered(f: &Fixture) -> (TeamId, TeamId) {
    if f.home < f.away {
        (f.home, f.away)
    } else {
        (f.away, f.home)
    }
}

#[test]
fn generate_requires_at_least_2_teams() {
    assert_eq!(
        generate_schedule(&teams(1), &params()),
        Err(ScheduleError::InsufficientTeams { found: 1 })
    );
    assert_eq!(
        generate_schedule(&[], &params()),
        Err(ScheduleError::InsufficientTeams { found: 0 })
    );
}

#[test]
fn generate_rejects_duplicate_team() {
    let mut t = teams(3);
    t.push(t[1].clone());
    assert_eq!(
        generate_schedule(&t, &params()),
        Err(ScheduleError::DuplicateTeam(t[1].id))
    );
}

#[test]
fn four_teams_single_round() {
    let t = teams(4);
    let rounds = generate_schedule(&t, &params()).unwrap();
    assert_eq!(rounds.len(), 3);
    assert_eq!(fixtures(&rounds).len(), 6);

    let mut appearances: HashMap<TeamId, usize> = HashMap::new();
    for f in fixtures(&rounds) {
        *appearances.entry(f.home).or_default() += 1;
        *appearances.entry(f.away).or_default() += 1;
    }
    assert!(t.iter().all(|team| appearances[&team.id] == 3));
    for round in &rounds {
        assert_eq!(round.fixtures.len(), 2);
        assert!(round.resting(&t.iter().map(|x| x.id).collect::<Vec<_>>()).is_empty());
    }

    // Slot 0 meets the pivot first, then 1 meets 2.
    let first: Vec<_> = rounds[0].fixtures.iter().map(|f| (f.home, f.away)).collect();
    assert_eq!(first, vec![(t[0].id, t[3].id), (t[1].id, t[2].id)]);
    assert_eq!(rounds[0].name, "Round 1");
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=13 {
        let t = teams(n);
        let rounds = generate_schedule(&t, &params()).unwrap();
        let all = fixtures(&rounds);
        assert_eq!(all.len(), n * (n - 1) / 2, "fixture count for {n} teams");

        let pairs: HashSet<_> = all.iter().map(|f| unordered(f)).collect();
        assert_eq!(pairs.len(), all.len(), "repeated pairing for {n} teams");
        assert!(all.iter().all(|f| f.home != f.away));
        assert_eq!(rounds.len(), if n % 2 == 0 { n - 1 } else { n });
    }
}

#[test]
fn no_team_plays_twice_in_a_round() {
    for n in 2..=12 {
        let mut p = params();
        p.double_round = true;
        let rounds = generate_schedule(&teams(n), &p).unwrap();
        for round in &rounds {
            let mut seen = HashSet::new();
            for f in &round.fixtures {
                assert!(seen.insert(f.home), "round {} repeats a team", round.number);
                assert!(seen.insert(f.away), "round {} repeats a team", round.number);
            }
        }
    }
}

#[test]
fn odd_field_rests_one_team_per_round() {
    let t = teams(5);
    let ids: Vec<TeamId> = t.iter().map(|x| x.id).collect();
    let rounds = generate_schedule(&t, &params()).unwrap();
    assert_eq!(rounds.len(), 5);

    let mut rests: HashMap<TeamId, usize> = HashMap::new();
    for round in &rounds {
        assert_eq!(round.fixtures.len(), 2);
        let resting = round.resting(&ids);
        assert_eq!(resting.len(), 1);
        *rests.entry(*resting[0]).or_default() += 1;
    }
    assert_eq!(rests.len(), 5);
    assert!(rests.values().all(|&c| c == 1));
}

#[test]
fn double_round_reverses_every_fixture() {
    let t = teams(6);
    let mut p = params();
    p.double_round = true;
    let rounds = generate_schedule(&t, &p).unwrap();
    assert_eq!(rounds.len(), 10);

    let (first, second): (Vec<&Fixture>, Vec<&Fixture>) =
        fixtures(&rounds).into_iter().partition(|f| f.leg == 1);
    assert_eq!(first.len(), 15);
    assert_eq!(second.len(), 15);
    for f in &first {
        let reversed = second
            .iter()
            .filter(|s| s.home == f.away && s.away == f.home)
            .count();
        assert_eq!(reversed, 1);
    }
    let numbers: Vec<u32> = rounds.iter().map(|r| r.number).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
    assert!(rounds[5..].iter().all(|r| r.fixtures.iter().all(|f| f.round == r.number && f.leg == 2)));
}

#[test]
fn fixture_ids_follow_emission_order() {
    let mut p = params();
    p.double_round = true;
    let rounds = generate_schedule(&teams(5), &p).unwrap();
    let ids: Vec<u32> = fixtures(&rounds).iter().map(|f| f.id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}

#[test]
fn rounds_are_a_week_apart_by_default() {
    let mut p = params();
    p.double_round = true;
    let rounds = generate_schedule(&teams(4), &p).unwrap();
    for (i, round) in rounds.iter().enumerate() {
        let expected = start() + Days::new(7 * i as u64);
        assert!(round.fixtures.iter().all(|f| f.date == expected), "round {}", round.number);
    }
}

#[test]
fn date_advances_inside_round_after_max_matches() {
    let mut p = params();
    p.max_matches_per_round_before_date_advance = 2;
    p.days_between_slates = 1;
    // 6 teams: 3 fixtures per round -> two dates per round, then one more step.
    let rounds = generate_schedule(&teams(6), &p).unwrap();
    let day = |n: u64| start() + Days::new(n);

    let r1: Vec<NaiveDate> = rounds[0].fixtures.iter().map(|f| f.date).collect();
    assert_eq!(r1, vec![day(0), day(0), day(1)]);
    let r2: Vec<NaiveDate> = rounds[1].fixtures.iter().map(|f| f.date).collect();
    assert_eq!(r2, vec![day(2), day(2), day(3)]);
}

#[test]
fn kickoff_and_venue_copied_to_every_fixture() {
    let mut p = params();
    p.kickoff_time = NaiveTime::from_hms_opt(19, 30, 0).unwrap();
    p.venue = "Riverside Ground".to_string();
    let rounds = generate_schedule(&teams(4), &p).unwrap();
    for f in fixtures(&rounds) {
        assert_eq!(f.time, p.kickoff_time);
        assert_eq!(f.venue, "Riverside Ground");
        assert_eq!(f.kickoff(), f.date.and_time(p.kickoff_time));
    }
}

struct Weekends;

impl DateAdvance for Weekends {
    fn advance(&self, date: NaiveDate) -> NaiveDate {
        use chrono::Datelike;
        let mut next = date + Days::new(1);
        while next.weekday().number_from_monday() < 6 {
            next = next + Days::new(1);
        }
        next
    }
}

#[test]
fn custom_date_policy_drives_the_calendar() {
    // 2024-03-02 is a Saturday.
    let rounds = generate_schedule_with(&teams(4), &params(), &Weekends).unwrap();
    let dates: Vec<NaiveDate> = rounds.iter().map(|r| r.fixtures[0].date).collect();
    assert_eq!(
        dates,
        vec![
            start(),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        ]
    );
}

#[test]
fn generation_is_deterministic() {
    let t = teams(7);
    let mut p = params();
    p.double_round = true;
    p.max_matches_per_round_before_date_advance = 2;
    assert_eq!(generate_schedule(&t, &p), generate_schedule(&t, &p));
}

#[test]
fn params_deserialize_with_defaults() {
    let p: ScheduleParams = serde_json::from_str(r#"{"start_date":"2024-03-02"}"#).unwrap();
    assert_eq!(p, params());
    assert_eq!(p.kickoff_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
    assert_eq!(p.days_between_slates, 7);
}

#[test]
fn seeded_draw_is_reproducible_permutation() {
    let t = teams(10);
    let a = draw_order(&t, 42);
    let b = draw_order(&t, 42);
    assert_eq!(a, b);
    let original: HashSet<TeamId> = t.iter().map(|x| x.id).collect();
    let drawn: HashSet<TeamId> = a.iter().map(|x| x.id).collect();
    assert_eq!(original, drawn);
    assert_eq!(a.len(), t.len());
}

#[test]
fn draw_seed_shuffles_entry_order_before_pairing() {
    let t = teams(6);
    let seeded = ScheduleParams {
        draw_seed: Some(7),
        ..params()
    };
    let drawn = generate_schedule(&t, &seeded).unwrap();
    assert_eq!(drawn, generate_schedule(&draw_order(&t, 7), &params()).unwrap());
    assert_eq!(drawn, generate_schedule(&t, &seeded).unwrap());

    let p: ScheduleParams =
        serde_json::from_str(r#"{"start_date":"2024-03-02","draw_seed":7}"#).unwrap();
    assert_eq!(p, seeded);
}
