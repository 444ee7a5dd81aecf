//! Tick benchmark: Measure one tick across many connected actors.
//!
//! Target: < 1µs per actor per tick

use cadence::prelude::*;
use cadence::scheduler::ActionScheduler;
use cadence::FrameLoop;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::rc::Rc;

fn scheduler_resolve_pending(c: &mut Criterion) {
    c.bench_function("scheduler_resolve_64_pending", |b| {
        b.iter(|| {
            let mut scheduler = ActionScheduler::new();
            let waits: Vec<_> = (0..64).map(|_| scheduler.await_next_tick()).collect();
            for resolver in scheduler.tick(None) {
                resolver.resolve();
            }
            black_box(waits)
        });
    });
}

fn tick_idle_sprites(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_idle_sprites");
    for count in [10usize, 100, 1000] {
        let frame_loop = Rc::new(FrameLoop::new(60));
        let sprites: Vec<Sprite> = (0..count)
            .map(|_| {
                let sprite = Sprite::new();
                sprite.connect(frame_loop.clone());
                sprite
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(frame_loop.tick()));
        });
        drop(sprites);
    }
    group.finish();
}

fn tick_moving_sprites(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_moving_sprites");
    for count in [10usize, 100, 1000] {
        let frame_loop = Rc::new(FrameLoop::new(60));
        let sprites: Vec<Sprite> = (0..count)
            .map(|_| {
                let sprite = Sprite::new();
                sprite.connect(frame_loop.clone());
                sprite
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                for sprite in &sprites {
                    let _wait = sprite.move_steps(black_box(1.0));
                }
                frame_loop.tick()
            });
        });
    }
    group.finish();
}

fn tick_gliding_sprites(c: &mut Criterion) {
    let frame_loop = Rc::new(FrameLoop::new(60));
    let sprites: Vec<Sprite> = (0..100)
        .map(|_| {
            let sprite = Sprite::new();
            sprite.connect(frame_loop.clone());
            sprite
        })
        .collect();

    c.bench_function("tick_100_gliding_sprites", |b| {
        b.iter(|| {
            for sprite in &sprites {
                if !sprite.is_gliding() {
                    let _ = sprite.glide(black_box(200.0), 0.0, 10.0);
                }
            }
            frame_loop.tick()
        });
    });
}

criterion_group!(
    benches,
    scheduler_resolve_pending,
    tick_idle_sprites,
    tick_moving_sprites,
    tick_gliding_sprites,
);
criterion_main!(benches);
