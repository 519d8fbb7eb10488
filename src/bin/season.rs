use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use gaffer::forecast::{self, Prediction, PredictionBoard};
use gaffer::print;
use gaffer::roster;
use gaffer::season::{Engine, EngineConfig};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON file to source the roster from (an array of {name, power, logo?})
    #[clap(short = 'f', long)]
    roster: Option<PathBuf>,

    /// weeks to play before stopping; the whole season when omitted
    #[clap(short = 'w', long)]
    weeks: Option<u32>,

    /// Monte Carlo trials per title forecast
    #[clap(short = 't', long)]
    trials: Option<usize>,

    /// seed for the random source; drawn from the clock when omitted
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// also print the fast heuristic forecast for comparison
    #[clap(short = 'q', long)]
    quick: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.trials == Some(0) {
            bail!("at least one trial is required");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let roster = match &args.roster {
        Some(path) => roster::from_json_file(path)?,
        None => roster::default_roster(),
    };
    info!("{} teams entered", roster.len());

    let seed = args.seed.unwrap_or_else(clock_seed);
    debug!("random seed: {seed}");

    let mut config = EngineConfig::default();
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    let mut engine = Engine::seeded(seed).with_config(config);
    engine.initialize(roster)?;

    let renderer = Console::default();
    let total_weeks = engine.league()?.total_weeks();
    let weeks = args.weeks.unwrap_or(total_weeks).min(total_weeks);
    for _ in 0..weeks {
        if engine.league()?.is_finished() {
            break;
        }
        let league = engine.play_week()?;
        let week = league.current_week();
        let matches = league.matches_in_week(week).unwrap_or(&[]);
        info!("week {week} results:");
        println!("{}", renderer.render(&print::tabulate_week(matches)));
    }

    info!(
        "table after week {} of {total_weeks}:",
        engine.league()?.current_week()
    );
    println!(
        "{}",
        renderer.render(&print::tabulate_standings(&engine.standings()?))
    );

    let board = engine.predictions()?;
    if board.predictions.is_empty() {
        info!(
            "no title forecast yet; forecasting starts once week {} is reached",
            engine.config().forecast_after_week
        );
    } else {
        info!("title odds as of week {}:", board.week);
        println!("{}", renderer.render(&print::tabulate_predictions(&board)));
    }

    if args.quick {
        let league = engine.league()?;
        let probabilities =
            forecast::quick(league.teams(), league.current_week(), league.total_weeks());
        let mut predictions: Vec<Prediction> = probabilities
            .iter()
            .filter_map(|(&id, &probability)| {
                league.team(id).map(|team| Prediction {
                    team_id: id,
                    team_name: team.name.clone(),
                    probability: probability * 100.0,
                })
            })
            .collect();
        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        let board = PredictionBoard {
            week: league.current_week(),
            predictions,
        };
        info!("heuristic odds for comparison:");
        println!("{}", renderer.render(&print::tabulate_predictions(&board)));
    }

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
