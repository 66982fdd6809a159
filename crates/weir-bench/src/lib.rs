//! Benchmark profiles and workload generation for the Weir staging
//! simulator.
//!
//! Provides pre-built simulations for benchmarking and examples:
//!
//! - [`reference_profile`]: 8 observations staged onto a 4-machine cluster
//! - [`stress_profile`]: 64 observations onto a 16-machine cluster
//! - [`steady_profile`]: a run that never completes, for per-tick timing
//! - [`synthetic_observations`]: deterministic workload from a seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::PathBuf;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use weir_buffer::{Buffer, BufferConfig, TierConfig};
use weir_cluster::{Cluster, Machine};
use weir_core::{Observation, RunStatus, Tick};
use weir_engine::{DispatchProcess, IngestProcess, Simulation, SimState};
use weir_planner::Planner;

/// Per-tick hot-tier admission cap in every profile.
pub const HOT_RATE_CAP: u64 = 5;

/// Per-tick cold-tier admission cap in every profile.
pub const COLD_RATE_CAP: u64 = 2;

fn workflow_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/workflow.json")
}

/// Generate a deterministic synthetic workload.
///
/// Observations are named `obs-0..`, already running, with data rates
/// in `1..=HOT_RATE_CAP` and durations in `5..=20` drawn from a
/// ChaCha8 stream seeded with `seed`. Identical seeds produce
/// identical workloads.
pub fn synthetic_observations(n: usize, seed: u64) -> Vec<Observation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let duration = rng.random_range(5..=20u64);
            let data_rate = rng.random_range(1..=HOT_RATE_CAP);
            let mut obs = Observation::new(
                format!("obs-{i}"),
                Tick::ZERO,
                duration,
                512,
                workflow_fixture(),
                "continuum",
                data_rate,
            );
            obs.status = RunStatus::Running;
            obs
        })
        .collect()
}

/// A buffer wide enough to stage the whole workload concurrently.
///
/// Both tiers get twice the workload's total data volume, so profile
/// runs measure accounting rather than back-pressure.
fn sized_buffer(observations: &[Observation]) -> Buffer {
    let volume: u64 = observations.iter().map(|o| o.data_rate * o.duration).sum();
    Buffer::new(BufferConfig {
        hot: TierConfig {
            total_capacity: volume * 2,
            rate_cap: HOT_RATE_CAP,
        },
        cold: TierConfig {
            total_capacity: volume * 2,
            rate_cap: COLD_RATE_CAP,
        },
    })
}

fn arc_cluster(machines: usize) -> Cluster {
    let machines = (0..machines)
        .map(|i| Machine {
            name: format!("arc-{i}"),
            cpu: 84,
            memory: 64,
            bandwidth: 10,
        })
        .collect();
    Cluster::new(machines).unwrap()
}

/// Assemble a ready-to-run staging simulation.
///
/// Spawns one ingest per observation plus a first-fit dispatcher with
/// a quota of `machines`. The dispatcher retires once the cluster is
/// full, so [`Simulation::run_to_idle`] terminates with any
/// still-undispatched observations left on the processing queue.
pub fn staged_sim(observations: Vec<Observation>, machines: usize) -> Simulation {
    let buffer = sized_buffer(&observations);
    let mut state = SimState::new(buffer, arc_cluster(machines), Planner::default());
    let names: Vec<String> = observations.iter().map(|o| o.name.clone()).collect();
    for obs in observations {
        state.observations.insert(obs).unwrap();
    }

    let mut sim = Simulation::new(state);
    for name in names {
        sim.spawn(Box::new(IngestProcess::new(name)));
    }
    sim.spawn(Box::new(DispatchProcess::first_fit(machines)));
    sim
}

/// Build the reference profile: 8 observations, 4 machines.
pub fn reference_profile(seed: u64) -> Simulation {
    staged_sim(synthetic_observations(8, seed), 4)
}

/// Build the stress profile: 64 observations, 16 machines.
pub fn stress_profile(seed: u64) -> Simulation {
    staged_sim(synthetic_observations(64, seed), 16)
}

/// Build a profile that never goes idle: `n` ingests with effectively
/// unbounded durations on an effectively unbounded buffer.
///
/// Stepping this simulation measures steady-state per-tick cost with
/// a full schedule; no process ever completes within a benchmark.
pub fn steady_profile(n: usize) -> Simulation {
    let observations: Vec<Observation> = (0..n)
        .map(|i| {
            let mut obs = Observation::new(
                format!("obs-{i}"),
                Tick::ZERO,
                u64::MAX,
                512,
                workflow_fixture(),
                "continuum",
                1 + (i as u64 % HOT_RATE_CAP),
            );
            obs.status = RunStatus::Running;
            obs
        })
        .collect();

    let buffer = Buffer::new(BufferConfig {
        hot: TierConfig {
            total_capacity: u64::MAX / 2,
            rate_cap: HOT_RATE_CAP,
        },
        cold: TierConfig {
            total_capacity: u64::MAX / 2,
            rate_cap: COLD_RATE_CAP,
        },
    });
    let mut state = SimState::new(buffer, arc_cluster(1), Planner::default());
    let names: Vec<String> = observations.iter().map(|o| o.name.clone()).collect();
    for obs in observations {
        state.observations.insert(obs).unwrap();
    }

    let mut sim = Simulation::new(state);
    for name in names {
        sim.spawn(Box::new(IngestProcess::new(name)));
    }
    sim
}
