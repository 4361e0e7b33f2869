use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_flappy::core::{Bird, GameConfig, Pipe, PipeField};
use tui_flappy::types::{TextureId, BIRD_FRAMES};

fn bird(config: &GameConfig) -> Bird {
    Bird::from_textures([TextureId(0); BIRD_FRAMES], config)
}

fn bench_bird_update(c: &mut Criterion) {
    let config = GameConfig::default();
    let bird = bird(&config);

    c.bench_function("bird_update", |b| {
        b.iter(|| {
            bird.update();
            if !bird.is_alive() {
                bird.restart();
            }
        })
    });
}

fn bench_field_update(c: &mut Criterion) {
    let config = GameConfig::default().with_seed(12345);
    let field = PipeField::detached(TextureId(0), &config);

    c.bench_function("field_update_10_pipes", |b| {
        b.iter(|| {
            while field.len() < 10 {
                field.spawn_pipe();
            }
            field.update();
        })
    });
}

fn bench_touch(c: &mut Criterion) {
    let config = GameConfig::default();
    let bird = bird(&config);
    let field = PipeField::detached(TextureId(0), &config);
    for i in 0..10 {
        field.insert(Pipe::new(black_box(60 + i * 70), 150, 50, i % 2 == 0));
    }

    c.bench_function("touch_10_pipes", |b| {
        b.iter(|| {
            field.touch(black_box(&bird));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let config = GameConfig::default().with_seed(12345);
    let field = PipeField::detached(TextureId(0), &config);
    for _ in 0..10 {
        field.spawn_pipe();
    }

    c.bench_function("field_snapshot", |b| b.iter(|| black_box(field.snapshot())));
}

criterion_group!(
    benches,
    bench_bird_update,
    bench_field_update,
    bench_touch,
    bench_snapshot
);
criterion_main!(benches);
