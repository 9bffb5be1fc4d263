use std::time::Instant;

use rand::prelude::IteratorRandom;
use rand::{rngs::SmallRng, SeedableRng};
use twisty_zapper::{
    board::Board,
    level::{BundledLevels, LevelId, LevelSource},
    snake::SnakeState,
    spawner,
    types::{Difficulty, Direction},
};

use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use tracing_subscriber::EnvFilter;

fn fresh(initial: &Board, rng: &mut SmallRng) -> (Board, SnakeState) {
    let mut board = initial.clone();
    let snake = SnakeState::starting();
    spawner::ensure_apple(&mut board, &snake, rng);
    (board, snake)
}

fn random_walk(b: &mut Bencher, difficulty: Difficulty) {
    b.iter_custom(|iter_count| {
        let grid = BundledLevels
            .load(LevelId::new(difficulty, 0).unwrap())
            .unwrap();
        let initial = Board::from_grid(&grid);
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let (mut board, mut snake) = fresh(&initial, &mut rng);

        let start = Instant::now();
        for _ in 0..iter_count {
            let current = snake.direction();
            let direction = Direction::all()
                .iter()
                .copied()
                .filter(|d| current.is_not_opposite(d))
                .choose(&mut rng)
                .unwrap();
            let outcome = black_box(&mut snake).advance(direction, &mut board, &mut rng);
            if outcome.is_terminal() {
                let (next_board, next_snake) = fresh(&initial, &mut rng);
                board = next_board;
                snake = next_snake;
            }
        }
        start.elapsed()
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    // RUST_LOG=twisty_zapper=debug shows game overs and apple spawns
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let mut g = c.benchmark_group("advance");
    g.bench_function("easy level random walk", |b| {
        random_walk(b, Difficulty::Easy)
    });
    g.bench_function("hard level random walk", |b| {
        random_walk(b, Difficulty::Hard)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
