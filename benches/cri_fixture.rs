use criterion::{criterion_group, criterion_main, Criterion};

use gaffer::domain::{Team, TeamId};
use gaffer::fixture;

fn criterion_benchmark(c: &mut Criterion) {
    let teams: Vec<Team> = (0..18)
        .map(|i| Team::new(TeamId(i), format!("Team {i}"), 50 + i, None))
        .collect();

    // sanity check
    assert_eq!(34, fixture::generate(&teams).total_weeks());

    c.bench_function("cri_fixture_18_teams", |b| {
        b.iter(|| fixture::generate(&teams));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
