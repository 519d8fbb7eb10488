use super::*;
use crate::domain::TeamId;
use std::collections::HashMap;

fn teams(count: usize) -> Vec<Team> {
    (0..count)
        .map(|i| {
            Team::new(
                TeamId(i as u32),
                format!("Team {}", (b'A' + i as u8) as char),
                50 + i as u32,
                None,
            )
        })
        .collect()
}

#[test]
fn four_teams() {
    let calendar = generate(&teams(4));
    assert_eq!(6, calendar.total_weeks());
    for week in 1..=6 {
        assert_eq!(2, calendar.matches_in_week(week).unwrap().len());
    }
    assert_eq!(12, calendar.all_matches().count());
}

#[test]
fn six_teams() {
    let calendar = generate(&teams(6));
    assert_eq!(10, calendar.total_weeks());
    for week in 1..=10 {
        assert_eq!(3, calendar.matches_in_week(week).unwrap().len());
    }
    assert_eq!(30, calendar.all_matches().count());
}

#[test]
fn three_teams_with_byes() {
    let calendar = generate(&teams(3));
    // the bye slot stretches an odd-count season to 2n weeks of thinner rounds
    assert_eq!(6, calendar.total_weeks());
    for week in 1..=6 {
        assert_eq!(1, calendar.matches_in_week(week).unwrap().len());
    }
    assert_eq!(6, calendar.all_matches().count());
}

#[test]
fn fewer_than_two_teams_yields_empty_calendar() {
    assert!(generate(&teams(0)).is_empty());
    assert!(generate(&teams(1)).is_empty());
    assert_eq!(0, generate(&teams(1)).total_weeks());
}

#[test]
fn pairwise_coverage_and_venue_balance() {
    for count in 2..=9 {
        let teams = teams(count);
        let calendar = generate(&teams);
        let expected_weeks = if count % 2 == 0 {
            2 * (count as u32 - 1)
        } else {
            2 * count as u32
        };
        assert_eq!(expected_weeks, calendar.total_weeks());
        assert_eq!(
            count * (count - 1),
            calendar.all_matches().count(),
            "match count for {count} teams"
        );

        let mut ordered: HashMap<(TeamId, TeamId), usize> = HashMap::new();
        for m in calendar.all_matches() {
            assert_ne!(m.home_id, m.away_id);
            *ordered.entry((m.home_id, m.away_id)).or_default() += 1;
        }
        for a in &teams {
            for b in &teams {
                if a.id == b.id {
                    continue;
                }
                // each ordered pair hosts exactly once, so each unordered pair meets
                // exactly twice across the season
                assert_eq!(
                    Some(&1),
                    ordered.get(&(a.id, b.id)),
                    "venue coverage for {} v {} with {count} teams",
                    a.name,
                    b.name
                );
            }
        }
    }
}

#[test]
fn no_team_plays_twice_in_a_week() {
    for count in 2..=9 {
        let calendar = generate(&teams(count));
        for week in 1..=calendar.total_weeks() {
            let mut seen = Vec::new();
            for m in calendar.matches_in_week(week).unwrap() {
                assert!(!seen.contains(&m.home_id), "{count} teams, week {week}");
                assert!(!seen.contains(&m.away_id), "{count} teams, week {week}");
                seen.push(m.home_id);
                seen.push(m.away_id);
            }
        }
    }
}

#[test]
fn match_ids_are_unique_and_weeks_contiguous() {
    let calendar = generate(&teams(5));
    let mut ids = Vec::new();
    for (index, week) in (1..=calendar.total_weeks()).enumerate() {
        for m in calendar.matches_in_week(week).unwrap() {
            assert_eq!(index as u32 + 1, m.week);
            assert!(!ids.contains(&m.id));
            ids.push(m.id);
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let teams = teams(7);
    let first = generate(&teams);
    let second = generate(&teams);
    assert_eq!(first.total_weeks(), second.total_weeks());
    let pairs = |calendar: &Calendar| {
        calendar
            .all_matches()
            .map(|m| (m.id, m.week, m.home_id, m.away_id))
            .collect::<Vec<_>>()
    };
    assert_eq!(pairs(&first), pairs(&second));
}
