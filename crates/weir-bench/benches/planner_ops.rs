//! Criterion benchmarks for workflow scheduling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weir_planner::{ListScheduler, PlanningAlgorithm, Workflow, WorkflowTask};
use weir_test_utils::{cluster_of, imaging_workflow};

/// A layered DAG: `layers` rows of `width` tasks, each task depending
/// on up to two deterministically-chosen tasks in the previous row.
fn layered_workflow(layers: usize, width: usize) -> Workflow {
    let mut tasks = Vec::with_capacity(layers * width);
    for layer in 0..layers {
        for slot in 0..width {
            let i = (layer * width + slot) as u64;
            // Deterministic pseudo-random runtimes and dep picks.
            let runtime = 1 + i.wrapping_mul(6364136223846793005) % 20;
            let mut deps: smallvec::SmallVec<[String; 4]> = smallvec::SmallVec::new();
            if layer > 0 {
                let a = (i.wrapping_mul(1442695040888963407) % width as u64) as usize;
                let b = (i.wrapping_mul(2862933555777941757) % width as u64) as usize;
                deps.push(format!("t{}-{a}", layer - 1));
                let second = format!("t{}-{b}", layer - 1);
                if !deps.contains(&second) {
                    deps.push(second);
                }
            }
            tasks.push(WorkflowTask {
                id: format!("t{layer}-{slot}"),
                runtime,
                deps,
            });
        }
    }
    Workflow { tasks }
}

fn bench_imaging_single_machine(c: &mut Criterion) {
    let workflow = imaging_workflow();
    let cluster = cluster_of(1);

    c.bench_function("schedule_imaging_1m", |b| {
        b.iter(|| {
            let schedule = ListScheduler.schedule(&workflow, &cluster).unwrap();
            black_box(&schedule);
        });
    });
}

fn bench_imaging_wide_cluster(c: &mut Criterion) {
    let workflow = imaging_workflow();
    let cluster = cluster_of(16);

    c.bench_function("schedule_imaging_16m", |b| {
        b.iter(|| {
            let schedule = ListScheduler.schedule(&workflow, &cluster).unwrap();
            black_box(&schedule);
        });
    });
}

fn bench_layered_64(c: &mut Criterion) {
    let workflow = layered_workflow(8, 8);
    let cluster = cluster_of(8);

    c.bench_function("schedule_layered_64", |b| {
        b.iter(|| {
            let schedule = ListScheduler.schedule(&workflow, &cluster).unwrap();
            black_box(&schedule);
        });
    });
}

fn bench_layered_256(c: &mut Criterion) {
    let workflow = layered_workflow(16, 16);
    let cluster = cluster_of(16);

    c.bench_function("schedule_layered_256", |b| {
        b.iter(|| {
            let schedule = ListScheduler.schedule(&workflow, &cluster).unwrap();
            black_box(&schedule);
        });
    });
}

criterion_group!(
    benches,
    bench_imaging_single_machine,
    bench_imaging_wide_cluster,
    bench_layered_64,
    bench_layered_256
);
criterion_main!(benches);
