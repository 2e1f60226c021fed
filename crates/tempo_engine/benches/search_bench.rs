//! Engine Benchmarks
//!
//! Performance benchmarks for the evaluator, move ordering and fixed-depth
//! search using Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempo_engine::evaluation::evaluate_static;
use tempo_engine::search::{order_moves, HeuristicTables, OrderContext};
use tempo_engine::{Engine, EngineConfig, Position, ShakmatyBoard, TimeBudget};

const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_evaluate_starting(c: &mut Criterion) {
    let pos = ShakmatyBoard::new();

    c.bench_function("evaluate_starting_position", |b| {
        b.iter(|| black_box(evaluate_static(&pos)))
    });
}

fn bench_evaluate_middlegame(c: &mut Criterion) {
    let pos = ShakmatyBoard::from_fen(MIDDLEGAME).unwrap();

    c.bench_function("evaluate_middlegame", |b| {
        b.iter(|| black_box(evaluate_static(&pos)))
    });
}

fn bench_order_moves(c: &mut Criterion) {
    let pos = ShakmatyBoard::from_fen(MIDDLEGAME).unwrap();
    let tables = HeuristicTables::default();
    let moves = pos.legal_moves();

    c.bench_function("order_moves_middlegame", |b| {
        b.iter(|| {
            let mut list = moves.clone();
            let ctx = OrderContext {
                tables: &tables,
                ply: 0,
                previous: None,
                root_best: None,
            };
            order_moves(&pos, &mut list, Some(&ctx));
            black_box(list)
        })
    });
}

fn bench_search_depth_four(c: &mut Criterion) {
    let mut config = EngineConfig::for_tests();
    config.search.max_depth = 4;

    c.bench_function("search_depth_4_middlegame", |b| {
        b.iter(|| {
            // Fresh engine each run so the TT does not carry over
            let mut engine = Engine::new(config.clone()).unwrap();
            let mut pos = ShakmatyBoard::from_fen(MIDDLEGAME).unwrap();
            black_box(engine.think(&mut pos, TimeBudget::from_millis(600_000)).unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate_starting,
    bench_evaluate_middlegame,
    bench_order_moves,
    bench_search_depth_four,
);
criterion_main!(benches);
