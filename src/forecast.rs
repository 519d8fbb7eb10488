//! Monte Carlo championship forecasting: repeatedly plays out the remaining season
//! from a snapshot of the current records and tallies how often each team ends up on
//! top. Trials never touch live state; each works on a scratch copy of the records
//! refilled from the baseline.

use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tinyrand::Rand;
use tracing::debug;

use crate::domain::{Calendar, Team, TeamId};
use crate::scoring::ScoringModel;
use crate::standings;

pub const DEFAULT_TRIALS: usize = 10_000;

/// One team's championship chance, expressed as a percentage for presentation.
#[derive(Clone, Debug, Serialize)]
pub struct Prediction {
    pub team_id: TeamId,
    pub team_name: String,
    pub probability: f64,
}

/// The full probability board, stamped with the week it was computed at.
#[derive(Clone, Debug, Serialize)]
pub struct PredictionBoard {
    pub week: u32,
    pub predictions: Vec<Prediction>,
}

/// Estimates each team's probability of winning the league. Probabilities sum to 1.
/// A finished season is decided without trials: the table leader takes it all.
pub fn championship(
    teams: &[Team],
    calendar: &Calendar,
    current_week: u32,
    model: &ScoringModel,
    trials: usize,
    rand: &mut impl Rand,
) -> FxHashMap<TeamId, f64> {
    let total_weeks = calendar.total_weeks();
    let mut probabilities: FxHashMap<TeamId, f64> = teams.iter().map(|t| (t.id, 0.0)).collect();

    if current_week >= total_weeks {
        if let Some(leader) = standings::table(teams).first() {
            probabilities.insert(leader.id, 1.0);
        }
        return probabilities;
    }

    let start = Instant::now();
    let index: FxHashMap<TeamId, usize> =
        teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
    let baseline: Vec<TrialForm> = teams.iter().map(TrialForm::from).collect();
    let mut forms = baseline.clone();
    let mut wins = vec![0_usize; teams.len()];

    for _ in 0..trials {
        forms.copy_from_slice(&baseline);
        for week in current_week + 1..=total_weeks {
            let Some(matches) = calendar.matches_in_week(week) else {
                continue;
            };
            for m in matches {
                let home = index[&m.home_id];
                let away = index[&m.away_id];
                // results already on the books replay as-is; the rest are drawn fresh
                let score = match m.score {
                    Some(score) => score,
                    None => model.simulate(forms[home].power, forms[away].power, rand),
                };
                forms[home].apply(score.home, score.away);
                forms[away].apply(score.away, score.home);
            }
        }
        wins[champion(&forms)] += 1;
    }

    for (i, team) in teams.iter().enumerate() {
        probabilities.insert(team.id, wins[i] as f64 / trials as f64);
    }
    debug!(
        "{trials} trials over {} remaining weeks took {:?}",
        total_weeks - current_week,
        start.elapsed()
    );
    probabilities
}

/// Fast heuristic alternative to the full simulation: a weighted blend of current
/// points, goal difference and power, scaled towards the current position as the
/// season progresses, normalised to sum to 1.
pub fn quick(teams: &[Team], current_week: u32, total_weeks: u32) -> FxHashMap<TeamId, f64> {
    if total_weeks == 0 {
        let share = 1.0 / teams.len() as f64;
        return teams.iter().map(|t| (t.id, share)).collect();
    }
    let mut scores: FxHashMap<TeamId, f64> = FxHashMap::default();
    let mut total = 0.0;
    for team in teams {
        let points_score = team.points as f64 / (total_weeks as f64 * 3.0);
        let diff = (team.goal_diff() as f64).clamp(-10.0, 10.0) / 10.0;
        let diff_score = (diff + 1.0) / 2.0;
        let power_score = team.power as f64 / 100.0;
        let mut score = points_score * 0.6 + diff_score * 0.2 + power_score * 0.2;
        let progress = current_week as f64 / total_weeks as f64;
        score *= 0.5 + 0.5 * progress;
        let score = f64::max(0.01, score);
        scores.insert(team.id, score);
        total += score;
    }
    for score in scores.values_mut() {
        *score /= total;
    }
    scores
}

#[derive(Clone, Copy, Debug)]
struct TrialForm {
    power: u32,
    points: u32,
    goals_for: u32,
    goals_against: u32,
}
impl TrialForm {
    fn apply(&mut self, goals_for: u32, goals_against: u32) {
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        if goals_for > goals_against {
            self.points += 3;
        } else if goals_for == goals_against {
            self.points += 1;
        }
    }

    fn goal_diff(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

impl From<&Team> for TrialForm {
    fn from(team: &Team) -> Self {
        Self {
            power: team.power,
            points: team.points,
            goals_for: team.goals_for,
            goals_against: team.goals_against,
        }
    }
}

// Points, then goal difference, then goals for; a full tie keeps the earlier team.
// The live table additionally breaks full ties by name; the trial winner does not.
fn champion(forms: &[TrialForm]) -> usize {
    let mut best = 0;
    for (i, form) in forms.iter().enumerate().skip(1) {
        let leader = &forms[best];
        if form.points > leader.points
            || (form.points == leader.points
                && (form.goal_diff() > leader.goal_diff()
                    || (form.goal_diff() == leader.goal_diff()
                        && form.goals_for > leader.goals_for)))
        {
            best = i;
        }
    }
    best
}
