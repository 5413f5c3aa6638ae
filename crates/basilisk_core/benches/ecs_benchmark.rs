//! # ECS Performance Benchmark
//!
//! Entity churn, component attach/detach, and full system ticks at
//! 10K/100K entity scales.
//!
//! Run with: `cargo bench --package basilisk_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use basilisk_core::{ComponentDescriptor, EntityId, SystemDescriptor, World};
use bytemuck::{Pod, Zeroable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Baseline scale for the cheap benchmarks.
const SMALL_COUNT: usize = 10_000;

/// Stress scale for the tick benchmarks.
const LARGE_COUNT: usize = 100_000;

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct Velocity {
    x: f32,
    y: f32,
}

/// Builds a world where every entity moves under one position integrator.
fn seeded_movement_world(count: usize) -> World {
    let mut world = World::new(count).unwrap();
    let position = world
        .register_component(ComponentDescriptor::for_type::<Position>())
        .unwrap();
    let velocity = world
        .register_component(ComponentDescriptor::for_type::<Velocity>())
        .unwrap();

    let mover = world
        .register_system(SystemDescriptor::new(move |world, ids, dt| {
            for &id in ids {
                let vel = *world.get_as::<Velocity>(id, velocity).unwrap();
                let pos = world.get_mut_as::<Position>(id, position).unwrap();
                pos.x += vel.x * dt;
                pos.y += vel.y * dt;
            }
            0
        }))
        .unwrap();
    world.require_component(mover, position).unwrap();
    world.require_component(mover, velocity).unwrap();

    for index in 0..count {
        let id = world.create().unwrap();
        world.add(id, position, None).unwrap();
        world.add(id, velocity, None).unwrap();
        let vel = world.get_mut_as::<Velocity>(id, velocity).unwrap();
        vel.x = (index as f32) * 0.001;
        vel.y = 0.5;
    }
    world
}

/// Benchmark: world construction.
fn bench_world_creation(c: &mut Criterion) {
    c.bench_function("world_creation_100K", |b| {
        b.iter(|| black_box(World::new(LARGE_COUNT).unwrap()).entity_capacity());
    });
}

/// Benchmark: create/destroy cycles through the free-id pool.
fn bench_entity_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_churn");

    for count in [SMALL_COUNT, LARGE_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut world = World::new(count).unwrap();
            let mut ids = Vec::with_capacity(count);
            b.iter(|| {
                for _ in 0..count {
                    ids.push(world.create().unwrap());
                }
                for &id in &ids {
                    world.destroy(id).unwrap();
                }
                ids.clear();
                black_box(world.entity_count())
            });
        });
    }

    group.finish();
}

/// Benchmark: attach and detach one payload across 10K entities.
fn bench_attach_detach(c: &mut Criterion) {
    let mut world = World::new(SMALL_COUNT).unwrap();
    let position = world
        .register_component(ComponentDescriptor::for_type::<Position>())
        .unwrap();
    let ids: Vec<EntityId> = (0..SMALL_COUNT).map(|_| world.create().unwrap()).collect();

    c.bench_function("attach_detach_10K", |b| {
        b.iter(|| {
            for &id in &ids {
                world.add(id, position, None).unwrap();
            }
            for &id in &ids {
                world.remove(id, position).unwrap();
            }
            black_box(world.entity_count())
        });
    });
}

/// THE CRITICAL BENCHMARK: one full movement tick over every entity.
fn bench_movement_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement_tick");

    for count in [SMALL_COUNT, LARGE_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut world = seeded_movement_world(count);
            b.iter(|| {
                world.update_systems(0.016).unwrap();
                black_box(world.entity_count())
            });
        });
    }

    group.finish();
}

/// Benchmark: tick where only a tenth of the entities match the filter.
///
/// The matching set keeps the update proportional to the movers, not to the
/// table size; this run should scale with `count / 10`.
fn bench_sparse_movement_tick(c: &mut Criterion) {
    let mut world = World::new(LARGE_COUNT).unwrap();
    let position = world
        .register_component(ComponentDescriptor::for_type::<Position>())
        .unwrap();
    let velocity = world
        .register_component(ComponentDescriptor::for_type::<Velocity>())
        .unwrap();

    let mover = world
        .register_system(SystemDescriptor::new(move |world, ids, dt| {
            for &id in ids {
                let vel = *world.get_as::<Velocity>(id, velocity).unwrap();
                let pos = world.get_mut_as::<Position>(id, position).unwrap();
                pos.x += vel.x * dt;
                pos.y += vel.y * dt;
            }
            0
        }))
        .unwrap();
    world.require_component(mover, position).unwrap();
    world.require_component(mover, velocity).unwrap();

    for index in 0..LARGE_COUNT {
        let id = world.create().unwrap();
        world.add(id, position, None).unwrap();
        if index % 10 == 0 {
            world.add(id, velocity, None).unwrap();
        }
    }

    c.bench_function("sparse_movement_tick_100K", |b| {
        b.iter(|| {
            world.update_systems(0.016).unwrap();
            black_box(world.entity_count())
        });
    });
}

/// Benchmark: queued destruction of every matching entity plus the flush.
fn bench_queued_destroy_flush(c: &mut Criterion) {
    let mut world = World::new(SMALL_COUNT).unwrap();
    // Zero-stride tag; the reaper queues everything carrying it.
    let doomed = world.register_component(ComponentDescriptor::new(0)).unwrap();
    let reaper = world
        .register_system(SystemDescriptor::new(|world, ids, _| {
            for &id in ids {
                world.queue_destroy(id).unwrap();
            }
            0
        }))
        .unwrap();
    world.require_component(reaper, doomed).unwrap();

    c.bench_function("queued_destroy_flush_10K", |b| {
        b.iter(|| {
            for _ in world.entity_count()..SMALL_COUNT {
                let id = world.create().unwrap();
                world.add(id, doomed, None).unwrap();
            }
            world.update_system(reaper, 0.016).unwrap();
            black_box(world.entity_count())
        });
    });
}

criterion_group!(
    benches,
    bench_world_creation,
    bench_entity_churn,
    bench_attach_detach,
    bench_movement_tick,
    bench_sparse_movement_tick,
    bench_queued_destroy_flush,
);

criterion_main!(benches);
