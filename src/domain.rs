//! Value types shared across the league engine: teams, matches, scores and the
//! season calendar.

use std::fmt::{Display, Formatter};

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumCount, EnumIter};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl Display for TeamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u32);

impl Display for MatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}
impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }

    pub fn outcome(&self) -> Outcome {
        if self.home > self.away {
            Outcome::HomeWin
        } else if self.home < self.away {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Ordinal, EnumCount, EnumIter)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// A competing team and its accumulated record. Power is fixed at creation; the
/// record fields uphold `points == 3*won + drawn` and `played == won + drawn + lost`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub power: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}
impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, power: u32, logo: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            logo,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_diff(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    /// Folds one match result into the record, seen from this team's perspective.
    pub fn apply_result(&mut self, goals_for: u32, goals_against: u32) {
        self.played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        if goals_for > goals_against {
            self.won += 1;
            self.points += 3;
        } else if goals_for == goals_against {
            self.drawn += 1;
            self.points += 1;
        } else {
            self.lost += 1;
        }
    }

    /// Exact inverse of [`apply_result`](Self::apply_result); must only be called with a
    /// result previously applied, otherwise the record underflows.
    pub fn revert_result(&mut self, goals_for: u32, goals_against: u32) {
        self.played -= 1;
        self.goals_for -= goals_for;
        self.goals_against -= goals_against;
        if goals_for > goals_against {
            self.won -= 1;
            self.points -= 3;
        } else if goals_for == goals_against {
            self.drawn -= 1;
            self.points -= 1;
        } else {
            self.lost -= 1;
        }
    }

    pub fn reset_record(&mut self) {
        self.played = 0;
        self.won = 0;
        self.drawn = 0;
        self.lost = 0;
        self.goals_for = 0;
        self.goals_against = 0;
        self.points = 0;
    }
}

/// A fixture between two teams. Identity never changes; the score is set in place when
/// the match is played or re-scored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub week: u32,
    pub home_id: TeamId,
    pub away_id: TeamId,
    pub home_name: String,
    pub away_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}
impl Match {
    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn set_result(&mut self, score: Score) {
        self.score = Some(score);
    }

    pub fn clear_result(&mut self) {
        self.score = None;
    }
}

/// The season calendar: weeks are 1-indexed and contiguous, each holding the matches
/// resolved together when that week is played.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Calendar {
    rounds: Vec<Vec<Match>>,
}
impl Calendar {
    pub fn from_rounds(rounds: Vec<Vec<Match>>) -> Self {
        Self { rounds }
    }

    pub fn total_weeks(&self) -> u32 {
        self.rounds.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn matches_in_week(&self, week: u32) -> Option<&[Match]> {
        if week == 0 {
            return None;
        }
        self.rounds.get(week as usize - 1).map(Vec::as_slice)
    }

    pub fn matches_in_week_mut(&mut self, week: u32) -> Option<&mut [Match]> {
        if week == 0 {
            return None;
        }
        self.rounds.get_mut(week as usize - 1).map(Vec::as_mut_slice)
    }

    pub fn all_matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flatten()
    }

    pub fn all_matches_mut(&mut self) -> impl Iterator<Item = &mut Match> {
        self.rounds.iter_mut().flatten()
    }

    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.all_matches_mut().find(|m| m.id == id)
    }
}
