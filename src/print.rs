//! Console rendering of the table, weekly results and title odds.

use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::{Match, Team};
use crate::forecast::PredictionBoard;

pub fn tabulate_standings(standings: &[&Team]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(3)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "#".into(),
                "Team".into(),
                "P".into(),
                "W".into(),
                "D".into(),
                "L".into(),
                "GF".into(),
                "GA".into(),
                "GD".into(),
                "Pts".into(),
            ],
        ));
    for (position, team) in standings.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", position + 1).into(),
                team.name.clone().into(),
                format!("{}", team.played).into(),
                format!("{}", team.won).into(),
                format!("{}", team.drawn).into(),
                format!("{}", team.lost).into(),
                format!("{}", team.goals_for).into(),
                format!("{}", team.goals_against).into(),
                format!("{:+}", team.goal_diff()).into(),
                format!("{}", team.points).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_week(matches: &[Match]) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Right)),
        Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Centred)),
        Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
    ]);
    for m in matches {
        let score = match m.score {
            Some(score) => format!("{score}"),
            None => "v".into(),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                m.home_name.clone().into(),
                score.into(),
                m.away_name.clone().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_predictions(board: &PredictionBoard) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Team".into(), "Title %".into()],
        ));
    for prediction in &board.predictions {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                prediction.team_name.clone().into(),
                format!("{:.1}", prediction.probability).into(),
            ],
        ));
    }
    table
}
