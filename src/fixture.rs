//! Double round-robin calendar generation using the circle method: one slot is held
//! fixed while the remainder rotate, producing `count - 1` balanced rounds; the second
//! half of the season replays the same pairings with venues swapped.

use crate::domain::{Calendar, Match, MatchId, Team};

/// Generates the season calendar for the given teams. Pairing is a pure function of
/// team order and count. Fewer than two teams yields an empty calendar; whether that
/// constitutes an error is the caller's decision.
pub fn generate(teams: &[Team]) -> Calendar {
    let count = teams.len();
    if count < 2 {
        return Calendar::default();
    }

    // Odd team counts get a synthetic bye slot; pairings touching it are dropped, so
    // one team sits out each such round.
    let slots = if count % 2 == 0 { count } else { count + 1 };
    let rotating = slots - 1;

    let mut next_id = 0;
    let mut rounds: Vec<Vec<Match>> = Vec::with_capacity(2 * rotating);

    for round in 0..rotating {
        let mut matches = Vec::with_capacity(slots / 2);
        // The fixed slot meets whichever slot has rotated into position `round`.
        push_pairing(
            teams,
            &mut matches,
            &mut next_id,
            round,
            slots - 1,
            round % rotating,
        );
        for i in 1..slots / 2 {
            let a = (round + i) % rotating;
            let b = (rotating + round - i) % rotating;
            push_pairing(teams, &mut matches, &mut next_id, round, a, b);
        }
        rounds.push(matches);
    }

    // Second half: identical pairings, venues swapped, week numbering continuing
    // without gaps.
    let half_weeks = rounds.len() as u32;
    let second_half: Vec<Vec<Match>> = rounds
        .iter()
        .map(|week_matches| {
            week_matches
                .iter()
                .map(|m| {
                    let id = MatchId(next_id);
                    next_id += 1;
                    Match {
                        id,
                        week: m.week + half_weeks,
                        home_id: m.away_id,
                        away_id: m.home_id,
                        home_name: m.away_name.clone(),
                        away_name: m.home_name.clone(),
                        score: None,
                    }
                })
                .collect()
        })
        .collect();
    rounds.extend(second_half);

    Calendar::from_rounds(rounds)
}

fn push_pairing(
    teams: &[Team],
    matches: &mut Vec<Match>,
    next_id: &mut u32,
    round: usize,
    slot_a: usize,
    slot_b: usize,
) {
    if slot_a >= teams.len() || slot_b >= teams.len() {
        return; // bye
    }
    // Alternate venues by round parity to balance home-field counts.
    let (home, away) = if round % 2 == 0 {
        (slot_a, slot_b)
    } else {
        (slot_b, slot_a)
    };
    let id = MatchId(*next_id);
    *next_id += 1;
    matches.push(Match {
        id,
        week: round as u32 + 1,
        home_id: teams[home].id,
        away_id: teams[away].id,
        home_name: teams[home].name.clone(),
        away_name: teams[away].name.clone(),
        score: None,
    });
}

#[cfg(test)]
mod tests;
