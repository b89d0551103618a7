use criterion::{black_box, criterion_group, criterion_main, Criterion};

use canvas_tetris::core::{create_piece, Board, GameState};
use canvas_tetris::types::{Phase, PieceKind, SweepPolicy};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut now: u64 = 0;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            state.tick(black_box(now));
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_full_rows", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, 1);
                }
            }
            board.sweep_full_rows(black_box(SweepPolicy::TopRowEligible));
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new(10, 20);
    let bar = create_piece(PieceKind::I);

    c.bench_function("collides_empty_board", |b| {
        b.iter(|| board.collides(black_box(&bar), 3, 10))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let t = create_piece(PieceKind::T);

    c.bench_function("matrix_rotate_cw", |b| b.iter(|| black_box(&t).rotated(true)));
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.phase() == Phase::GameOver {
                state.start();
            }
            state.hard_drop();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_sweep,
    bench_collides,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
