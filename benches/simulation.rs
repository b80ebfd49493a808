//! Simulation throughput benchmarks
//!
//! Measures the per-tick cost of the asteroid field and the full
//! machine loop at escalating field sizes.
//!
//! Run with: cargo bench --bench simulation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use asteroids_core::config::GameConfig;
use asteroids_core::game::input::InputFrame;
use asteroids_core::game::machine::GameMachine;
use asteroids_core::game::state::{Asteroid, AsteroidSize, GameSession, Shot};
use asteroids_core::game::systems::asteroids;
use asteroids_core::io::scores::MemoryScoreStore;
use asteroids_core::util::vec2::Vec2;

/// Build a session with a dense field and a spray of live shots
fn create_session(rock_count: usize) -> GameSession {
    let config = GameConfig::default();
    let mut session = GameSession::with_seed(&config, 1234);
    let bounds = session.bounds();

    for i in 0..rock_count {
        let size = if i % 3 == 0 {
            AsteroidSize::Small
        } else {
            AsteroidSize::Large
        };
        let position = Vec2::new(
            session.rng.gen_range(0.0..bounds.x),
            session.rng.gen_range(0.0..bounds.y),
        );
        let velocity = Vec2::new(
            session.rng.gen_range(-35.0..35.0),
            session.rng.gen_range(-35.0..35.0),
        );
        let heading = session.rng.gen_range(0.0..std::f32::consts::TAU);
        let rock = Asteroid::new(size, position, velocity, heading, bounds, &mut session.rng);
        session.asteroids.push(rock);
    }

    for _ in 0..rock_count / 4 {
        let position = Vec2::new(
            session.rng.gen_range(0.0..bounds.x),
            session.rng.gen_range(0.0..bounds.y),
        );
        let angle = session.rng.gen_range(0.0..std::f32::consts::TAU);
        session.shots.push(Shot::new(position, angle, bounds));
    }

    session
}

/// Benchmark the field update (collision scan + drift) alone
fn bench_field_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_update");
    group.sample_size(50);

    for count in [4, 16, 64, 256] {
        let mut session = create_session(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("asteroids", count), &count, |b, _| {
            b.iter(|| {
                black_box(asteroids::update(&mut session));
            });
        });
    }

    group.finish();
}

/// Benchmark whole machine ticks mid-game
fn bench_machine_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("machine_tick");
    group.sample_size(50);

    let config = GameConfig::default();
    let mut machine = GameMachine::with_seed(config, MemoryScoreStore::default(), 1234);
    let confirm = InputFrame {
        confirm: true,
        ..InputFrame::default()
    };
    machine.update(&confirm);

    let playing = InputFrame {
        thrust: true,
        fire: true,
        ..InputFrame::default()
    };

    group.bench_function("playing_tick", |b| {
        b.iter(|| {
            machine.update(black_box(&playing));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_field_update, bench_machine_tick);
criterion_main!(benches);
