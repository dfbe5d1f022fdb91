//! Benchmarks for the lookahead hot path: copying states and enumerating
//! legal actions.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rust_tribes::agent::{play_game, Agent, RandomAgent};
use rust_tribes::core::GameConfig;
use rust_tribes::game::GameState;
use rust_tribes::setup::GameBuilder;

fn midgame(size: usize) -> GameState {
    let mut gs = GameBuilder::new(size)
        .with_config(GameConfig::new().with_max_turns(30))
        .generated(11)
        .build(11)
        .unwrap();
    let mut agents: Vec<Box<dyn Agent>> =
        vec![Box::new(RandomAgent::new(1)), Box::new(RandomAgent::new(2))];
    play_game(&mut gs, &mut agents, 400).unwrap();
    gs
}

fn bench_copy(c: &mut Criterion) {
    let gs = midgame(16);
    c.bench_function("copy_16x16", |b| {
        b.iter(|| black_box(black_box(&gs).copy()));
    });
}

fn bench_clone_state(c: &mut Criterion) {
    let mut gs = midgame(16);
    c.bench_function("clone_state_16x16", |b| {
        b.iter(|| black_box(gs.clone_state()));
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let gs = midgame(16);
    c.bench_function("legal_actions_16x16", |b| {
        b.iter(|| black_box(black_box(&gs).legal_actions()));
    });
}

fn bench_copy_and_step(c: &mut Criterion) {
    // One lookahead step: copy, pick the first legal action, apply it
    let gs = midgame(16);
    c.bench_function("copy_and_step_16x16", |b| {
        b.iter(|| {
            let mut next = gs.copy();
            if let Some(action) = next.legal_actions().first().copied() {
                next.execute(&action).unwrap();
            }
            black_box(next)
        });
    });
}

criterion_group!(
    benches,
    bench_copy,
    bench_clone_state,
    bench_legal_actions,
    bench_copy_and_step
);
criterion_main!(benches);
