//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p minimax`
//!
//! These benchmarks measure:
//! - Candidate generation and board cloning
//! - Full searches at increasing depths, with and without pruning
//! - Heuristic evaluation cost

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minimax::{HeuristicKind, MinimaxSearch, SearchConfig, SearchStats};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wargame_core::{Board, CoordPair, Player};

/// Board after a few opening moves, with both sides in contact.
fn midgame_board() -> Board {
    let mut board = Board::default();
    let moves = [
        ("E2 D2", Player::Attacker),
        ("B1 C1", Player::Defender),
        ("D2 C2", Player::Attacker),
        ("C1 C2", Player::Defender),
    ];
    for (text, player) in moves {
        let pair: CoordPair = text.parse().unwrap();
        board = board.clone_and_move(&pair, player).unwrap_or(board);
    }
    board
}

// =============================================================================
// Board Operations
// =============================================================================

fn bench_board_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_ops");
    let board = Board::default();

    group.bench_function("move_candidates", |b| {
        b.iter(|| black_box(board.move_candidates(Player::Attacker).count()));
    });

    group.bench_function("clone_and_move_all", |b| {
        let candidates: Vec<CoordPair> = board.move_candidates(Player::Attacker).collect();
        b.iter(|| {
            candidates
                .iter()
                .filter_map(|pair| board.clone_and_move(pair, Player::Attacker))
                .count()
        });
    });

    group.finish();
}

// =============================================================================
// Full Search
// =============================================================================

fn bench_search_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_depth");
    group.sample_size(20);

    for depth in [1usize, 2, 3] {
        for alpha_beta in [true, false] {
            let label = if alpha_beta { "alpha_beta" } else { "minimax" };
            group.bench_with_input(BenchmarkId::new(label, depth), &depth, |b, &depth| {
                let board = Board::default();
                let config = SearchConfig::for_testing()
                    .with_max_depth(depth)
                    .with_alpha_beta(alpha_beta);
                b.iter(|| {
                    let mut stats = SearchStats::new();
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    let mut search =
                        MinimaxSearch::new(HeuristicKind::E2.heuristic(), &config, &mut stats);
                    black_box(search.run(&board, Player::Attacker, depth, &mut rng).unwrap())
                });
            });
        }
    }

    group.finish();
}

fn bench_search_midgame(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_midgame");
    group.sample_size(20);
    let board = midgame_board();
    let config = SearchConfig::for_testing().with_max_depth(3);

    group.bench_function("defender_depth_3", |b| {
        b.iter(|| {
            let mut stats = SearchStats::new();
            let mut rng = ChaCha20Rng::seed_from_u64(7);
            let mut search =
                MinimaxSearch::new(HeuristicKind::E1.heuristic(), &config, &mut stats);
            black_box(search.run(&board, Player::Defender, 3, &mut rng).unwrap())
        });
    });

    group.finish();
}

// =============================================================================
// Heuristics
// =============================================================================

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristics");
    let board = midgame_board();

    for kind in [HeuristicKind::E0, HeuristicKind::E1, HeuristicKind::E2] {
        group.bench_with_input(BenchmarkId::new("evaluate", kind), &kind, |b, &kind| {
            let heuristic = kind.heuristic();
            b.iter(|| black_box(heuristic.evaluate(&board)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_board_ops,
    bench_search_depth,
    bench_search_midgame,
    bench_heuristics,
);
criterion_main!(benches);
