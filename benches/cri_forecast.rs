use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Seeded, StdRand};

use gaffer::domain::{Team, TeamId};
use gaffer::fixture;
use gaffer::forecast;
use gaffer::scoring::ScoringModel;

fn criterion_benchmark(c: &mut Criterion) {
    let teams: Vec<Team> = [92, 88, 84, 80, 76, 72]
        .iter()
        .enumerate()
        .map(|(i, &power)| Team::new(TeamId(i as u32), format!("Team {i}"), power, None))
        .collect();
    let calendar = fixture::generate(&teams);
    let model = ScoringModel::default();
    let mut rand = StdRand::seed(42);

    // sanity check
    let probabilities = forecast::championship(&teams, &calendar, 0, &model, 10, &mut rand);
    assert_eq!(teams.len(), probabilities.len());

    c.bench_function("cri_forecast_100_trials", |b| {
        b.iter(|| forecast::championship(&teams, &calendar, 0, &model, 100, &mut rand));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
