use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use event_scoring::model::{PointScheme, RankingMethod, SportFormat, TournamentSettings};
use event_scoring::view::default_label;
use event_scoring::{
    Match, MatchStatus, Sport, Team, apply_match_result, build_bracket_skeleton,
    compute_standings, distribute_into_blocks, generate_bracket_matches,
    generate_round_robin_matches, project_for_display,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("t{i}"), format!("Team {i}")))
        .collect()
}

/// Round robin with every match completed, alternating home wins and draws
fn played_round_robin(n: usize) -> (Vec<Team>, Vec<Match>) {
    let roster = teams(n);
    let matches = generate_round_robin_matches(&roster)
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            let mut m = m.with_scores((i % 3) as u32, (i % 2) as u32);
            m.status = MatchStatus::Completed;
            m
        })
        .collect();
    (roster, matches)
}

/// Benchmark skeleton construction across bracket sizes
fn bench_build_skeleton(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_skeleton");
    for n in [8, 37, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| build_bracket_skeleton(n));
        });
    }
    group.finish();
}

/// Benchmark full bracket generation with a third-place match
fn bench_generate_bracket(c: &mut Criterion) {
    let roster = teams(64);
    c.bench_function("generate_bracket_64", |b| {
        b.iter(|| generate_bracket_matches(&roster, true));
    });
}

/// Benchmark applying a first-round result to a large bracket
fn bench_apply_result(c: &mut Criterion) {
    let matches = generate_bracket_matches(&teams(128), true).unwrap();
    let update = matches[0].clone().with_scores(2, 1);

    c.bench_function("apply_result_128", |b| {
        b.iter_batched(
            || matches.clone(),
            |all| apply_match_result(update.clone(), all),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark standings over a fully played round robin
fn bench_standings(c: &mut Criterion) {
    let (roster, matches) = played_round_robin(20);
    c.bench_function("standings_20_teams", |b| {
        b.iter(|| {
            compute_standings(&roster, &matches, RankingMethod::Points, &PointScheme::default())
        });
    });
}

/// Benchmark block distribution with a fixed seed
fn bench_distribute(c: &mut Criterion) {
    let roster = teams(48);
    c.bench_function("distribute_48_into_8", |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(7),
            |mut rng| distribute_into_blocks(&roster, 8, &mut rng),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark view projection of a large bracket
fn bench_projection(c: &mut Criterion) {
    let roster = teams(64);
    let sport = Sport::new(
        "bench",
        "Bench",
        SportFormat::Tournament {
            matches: generate_bracket_matches(&roster, true).unwrap(),
            settings: TournamentSettings {
                has_third_place_match: true,
            },
        },
    )
    .with_teams(roster);

    c.bench_function("project_64", |b| {
        b.iter(|| project_for_display(&sport, default_label));
    });
}

criterion_group!(
    bracket,
    bench_build_skeleton,
    bench_generate_bracket,
    bench_apply_result,
    bench_projection,
);

criterion_group!(league, bench_standings, bench_distribute);

criterion_main!(bracket, league);
