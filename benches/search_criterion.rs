use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mailbox_chess::game_state::position::Position;
use mailbox_chess::search::board_scoring::MaterialScorer;
use mailbox_chess::search::minimax::{minimax_search_with_rng, MinimaxConfig};

const POSITIONS: &[(&str, &str)] = &[
    (
        "start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0",
    ),
];

fn bench_minimax(c: &mut Criterion) {
    let max_depth = match std::env::var("MAILBOX_CHESS_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => 3,
        _ => 1,
    };

    let mut group = c.benchmark_group("minimax");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for (name, fen) in POSITIONS {
        let mut position = Position::from_fen(fen).expect("benchmark FEN should parse");
        let before = position.to_string();

        for depth in 0..=max_depth {
            let config = MinimaxConfig { depth };

            // Correctness guard: the search must leave the position untouched.
            let result = minimax_search_with_rng(
                &mut position,
                &MaterialScorer,
                config,
                &mut StdRng::seed_from_u64(0),
            )
            .expect("search should run");
            assert!(result.best_move.is_some());
            assert_eq!(position.to_string(), before);

            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{name}_d{depth}")),
                &config,
                |b, config| {
                    let mut rng = StdRng::seed_from_u64(0);
                    b.iter(|| {
                        let result = minimax_search_with_rng(
                            black_box(&mut position),
                            &MaterialScorer,
                            *config,
                            &mut rng,
                        )
                        .expect("search benchmark run should succeed");
                        black_box(result.best_score)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_minimax);
criterion_main!(search_benches);
