//! Season state and orchestration: a [`League`] is the single mutable aggregate of
//! teams, calendar, week cursor and cached predictions; an [`Engine`] owns at most one
//! league and funnels every state transition through itself, recomputing the title
//! forecast once the configured week threshold is reached.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tinyrand::{Rand, Seeded, StdRand};
use tracing::debug;

use crate::domain::{Calendar, Match, MatchId, Score, Team, TeamId};
use crate::fixture;
use crate::forecast::{self, Prediction, PredictionBoard};
use crate::roster::TeamSpec;
use crate::scoring::ScoringModel;
use crate::standings;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("at least 2 teams are required, got {0}")]
    NotEnoughTeams(usize),

    #[error("scores cannot be negative, got {home}:{away}")]
    NegativeScore { home: i32, away: i32 },
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("league not initialised")]
    NotInitialised,

    #[error("all {0} weeks have been played")]
    SeasonFinished(u32),
}

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    State(#[from] StateError),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),
}

/// The in-memory season aggregate. Mutation happens only through [`Engine`] methods;
/// everything here is read-only to outside callers.
#[derive(Clone, Debug)]
pub struct League {
    teams: Vec<Team>,
    index: FxHashMap<TeamId, usize>,
    calendar: Calendar,
    current_week: u32,
    predictions: FxHashMap<TeamId, f64>,
}

impl League {
    fn new(specs: &[TeamSpec]) -> Self {
        let teams: Vec<Team> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Team::new(TeamId(i as u32), &spec.name, spec.power, spec.logo.clone())
            })
            .collect();
        let index = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let calendar = fixture::generate(&teams);
        Self {
            teams,
            index,
            calendar,
            current_week: 0,
            predictions: FxHashMap::default(),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.index.get(&id).map(|&i| &self.teams[i])
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The week cursor; 0 means the season has not started.
    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn total_weeks(&self) -> u32 {
        self.calendar.total_weeks()
    }

    pub fn is_finished(&self) -> bool {
        self.current_week >= self.total_weeks()
    }

    pub fn matches_in_week(&self, week: u32) -> Option<&[Match]> {
        self.calendar.matches_in_week(week)
    }

    pub fn all_matches(&self) -> impl Iterator<Item = &Match> {
        self.calendar.all_matches()
    }

    /// Raw championship probabilities; empty until the forecast threshold is reached.
    pub fn predictions(&self) -> &FxHashMap<TeamId, f64> {
        &self.predictions
    }

    fn resolve_week(&mut self, week: u32, model: &ScoringModel, rand: &mut impl Rand) {
        let Self {
            teams,
            index,
            calendar,
            ..
        } = self;
        if let Some(matches) = calendar.matches_in_week_mut(week) {
            for m in matches {
                if m.is_played() {
                    continue;
                }
                let home = index[&m.home_id];
                let away = index[&m.away_id];
                let score = model.simulate(teams[home].power, teams[away].power, rand);
                m.set_result(score);
                teams[home].apply_result(score.home, score.away);
                teams[away].apply_result(score.away, score.home);
            }
        }
    }

    fn rescore(&mut self, id: MatchId, score: Score) -> Result<(), LeagueError> {
        let Self {
            teams,
            index,
            calendar,
            ..
        } = self;
        let m = calendar
            .find_match_mut(id)
            .ok_or(LeagueError::MatchNotFound(id))?;
        let home = index[&m.home_id];
        let away = index[&m.away_id];
        // a compensating transaction: the old contribution comes off exactly before
        // the new result lands, so repeated overrides stay consistent
        if let Some(old) = m.score {
            teams[home].revert_result(old.home, old.away);
            teams[away].revert_result(old.away, old.home);
        }
        m.set_result(score);
        teams[home].apply_result(score.home, score.away);
        teams[away].apply_result(score.away, score.home);
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Week from which every state-mutating operation recomputes the forecast.
    pub forecast_after_week: u32,
    /// Monte Carlo trial count per forecast.
    pub trials: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            forecast_after_week: 3,
            trials: forecast::DEFAULT_TRIALS,
        }
    }
}

/// The orchestrator. Owns the league, the scoring model and the random source;
/// entry points must be externally serialised if shared, as every mutation is a
/// multi-step transition over the aggregate.
pub struct Engine<R: Rand = StdRand> {
    league: Option<League>,
    model: ScoringModel,
    config: EngineConfig,
    rand: R,
}

impl Engine<StdRand> {
    pub fn new() -> Self {
        Self::with_rand(StdRand::default())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rand(StdRand::seed(seed))
    }
}

impl Default for Engine<StdRand> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rand> Engine<R> {
    pub fn with_rand(rand: R) -> Self {
        Self {
            league: None,
            model: ScoringModel::default(),
            config: EngineConfig::default(),
            rand,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_model(mut self, model: ScoringModel) -> Self {
        self.model = model;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn league(&self) -> Result<&League, StateError> {
        self.league.as_ref().ok_or(StateError::NotInitialised)
    }

    /// Builds a fresh league around the supplied roster, discarding any prior season.
    pub fn initialize(&mut self, roster: Vec<TeamSpec>) -> Result<&League, LeagueError> {
        if roster.len() < 2 {
            return Err(ValidationError::NotEnoughTeams(roster.len()).into());
        }
        let league = League::new(&roster);
        debug!(
            "initialised league: {} teams over {} weeks",
            league.teams.len(),
            league.total_weeks()
        );
        self.league = Some(league);
        self.maybe_forecast();
        Ok(self.league()?)
    }

    /// Advances the cursor one week and resolves that week's unplayed matches
    /// sequentially.
    pub fn play_week(&mut self) -> Result<&League, LeagueError> {
        let league = self.league.as_mut().ok_or(StateError::NotInitialised)?;
        if league.is_finished() {
            return Err(StateError::SeasonFinished(league.total_weeks()).into());
        }
        league.current_week += 1;
        let week = league.current_week;
        league.resolve_week(week, &self.model, &mut self.rand);
        debug!("week {week} resolved");
        self.maybe_forecast();
        Ok(self.league()?)
    }

    /// Plays every remaining week, propagating the first failure.
    pub fn play_all(&mut self) -> Result<&League, LeagueError> {
        while !self.league()?.is_finished() {
            self.play_week()?;
        }
        Ok(self.league()?)
    }

    /// Manually overrides a match result regardless of week or status. A previously
    /// played match has its old contribution reverted exactly first.
    pub fn update_match(
        &mut self,
        id: MatchId,
        home: i32,
        away: i32,
    ) -> Result<&League, LeagueError> {
        if home < 0 || away < 0 {
            return Err(ValidationError::NegativeScore { home, away }.into());
        }
        let score = Score::new(home as u32, away as u32);
        let league = self.league.as_mut().ok_or(StateError::NotInitialised)?;
        league.rescore(id, score)?;
        self.maybe_forecast();
        Ok(self.league()?)
    }

    /// Returns the season to week 0: records and results cleared, roster and calendar
    /// preserved. Fixtures are not re-seeded.
    pub fn reset(&mut self) -> Result<&League, LeagueError> {
        let league = self.league.as_mut().ok_or(StateError::NotInitialised)?;
        for team in &mut league.teams {
            team.reset_record();
        }
        for m in league.calendar.all_matches_mut() {
            m.clear_result();
        }
        league.current_week = 0;
        league.predictions.clear();
        debug!("league reset");
        Ok(self.league()?)
    }

    /// The live table, ordered by the standings comparator.
    pub fn standings(&self) -> Result<Vec<&Team>, StateError> {
        Ok(standings::table(self.league()?.teams()))
    }

    /// The cached probability board, sorted by probability descending and expressed
    /// in percent. Empty until the forecast threshold week is reached.
    pub fn predictions(&self) -> Result<PredictionBoard, StateError> {
        let league = self.league()?;
        let mut predictions: Vec<Prediction> = league
            .predictions
            .iter()
            .filter_map(|(&id, &probability)| {
                league.team(id).map(|team| Prediction {
                    team_id: id,
                    team_name: team.name.clone(),
                    probability: probability * 100.0,
                })
            })
            .collect();
        predictions.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.team_name.cmp(&b.team_name))
        });
        Ok(PredictionBoard {
            week: league.current_week,
            predictions,
        })
    }

    fn maybe_forecast(&mut self) {
        let Some(league) = self.league.as_mut() else {
            return;
        };
        if league.current_week >= self.config.forecast_after_week {
            league.predictions = forecast::championship(
                &league.teams,
                &league.calendar,
                league.current_week,
                &self.model,
                self.config.trials,
                &mut self.rand,
            );
        }
    }
}
