use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_2048::core::{Board, GameSession, Grid, SessionConfig, SimpleRng};
use tui_2048::term::{FrameBuffer, GameView, Viewport};
use tui_2048::types::PieceValue::{Eight, Empty as E, Four, Sixteen, Two};
use tui_2048::types::{Direction, FrameInput, GameKey, MergePolicy};

fn busy_board() -> Board {
    Board::from_rows([
        [Two, Two, Four, E],
        [E, Four, Four, Eight],
        [Sixteen, E, Sixteen, Two],
        [Two, Four, E, Four],
    ])
}

fn bench_shift(c: &mut Criterion) {
    let grid = Grid::default();
    let board = busy_board();

    c.bench_function("shift_all_directions", |b| {
        b.iter(|| {
            for direction in Direction::ALL {
                let mut board = board.clone();
                black_box(board.shift(black_box(direction), &grid, MergePolicy::Cascading));
            }
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("spawn_until_full", |b| {
        b.iter(|| {
            let mut board = Board::new();
            while board.spawn(&mut rng).is_ok() {}
            black_box(board.is_stuck())
        })
    });
}

fn bench_session_update(c: &mut Criterion) {
    let mut session = GameSession::new(12345, SessionConfig::default());
    let mut start = FrameInput::new();
    start.press(GameKey::Start);
    session.update(1.0 / 60.0, &start);

    let idle = FrameInput::new();
    c.bench_function("session_update_16ms", |b| {
        b.iter(|| {
            session.update(black_box(1.0 / 60.0), &idle);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = GameSession::new(12345, SessionConfig::default());
    session.begin_game();
    // Run out the crossfade: one call flips the screen, the next ends the fade-in.
    session.update(10.0, &FrameInput::new());
    session.update(10.0, &FrameInput::new());
    *session.board_mut() = busy_board();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    c.bench_function("render_gameplay_80x24", |b| {
        b.iter(|| {
            view.render_into(&session, Viewport::new(80, 24), &mut fb);
            black_box(fb.width());
        })
    });
}

criterion_group!(
    benches,
    bench_shift,
    bench_spawn,
    bench_session_update,
    bench_render
);
criterion_main!(benches);
