//! Reusable scenario fixtures.
//!
//! Canned buffer shapes, clusters, observations, and a small imaging
//! workflow, shared by the unit and integration suites so tests agree
//! on one set of numbers.

use weir_buffer::{Buffer, BufferConfig, TierConfig};
use weir_cluster::{Cluster, Machine};
use weir_core::{Observation, RunStatus, Tick};
use weir_planner::{Workflow, WorkflowTask};

/// The standard two-tier shape: hot 500 units at rate 5, cold 250
/// units at rate 2.
pub fn standard_buffer_config() -> BufferConfig {
    BufferConfig {
        hot: TierConfig {
            total_capacity: 500,
            rate_cap: 5,
        },
        cold: TierConfig {
            total_capacity: 250,
            rate_cap: 2,
        },
    }
}

/// A buffer with the [`standard_buffer_config`] shape.
pub fn standard_buffer() -> Buffer {
    Buffer::new(standard_buffer_config())
}

/// A buffer with an arbitrary shape, for exhaustion scenarios.
pub fn buffer_with(hot_total: u64, hot_rate: u64, cold_total: u64, cold_rate: u64) -> Buffer {
    Buffer::new(BufferConfig {
        hot: TierConfig {
            total_capacity: hot_total,
            rate_cap: hot_rate,
        },
        cold: TierConfig {
            total_capacity: cold_total,
            rate_cap: cold_rate,
        },
    })
}

/// A cluster of `n` identical machines named `arc-0` .. `arc-{n-1}`.
pub fn cluster_of(n: usize) -> Cluster {
    let machines = (0..n)
        .map(|i| Machine {
            name: format!("arc-{i}"),
            cpu: 84,
            memory: 64,
            bandwidth: 10,
        })
        .collect();
    // Names are unique by construction.
    match Cluster::new(machines) {
        Ok(cluster) => cluster,
        Err(e) => panic!("fixture cluster rejected: {e}"),
    }
}

/// A waiting continuum observation starting at tick 0.
///
/// The workflow path points at the caller's `tests/data/workflow.json`
/// relative to wherever the test runs; tests that never reach planning
/// can ignore it.
pub fn observation(name: &str, data_rate: u64, duration: u64) -> Observation {
    Observation::new(name, Tick::ZERO, duration, 512, "workflow.json", "continuum", data_rate)
}

/// An [`observation`] already marked running, ready for ingest.
pub fn running_observation(name: &str, data_rate: u64, duration: u64) -> Observation {
    let mut obs = observation(name, data_rate, duration);
    obs.status = RunStatus::Running;
    obs
}

/// The five-task imaging workflow used across the planning tests.
///
/// Serial makespan is 98; on two or more machines the grid and clean
/// branches overlap and the makespan drops to 78.
pub fn imaging_workflow() -> Workflow {
    fn task(id: &str, runtime: u64, deps: &[&str]) -> WorkflowTask {
        WorkflowTask {
            id: id.to_string(),
            runtime,
            deps: deps.iter().map(|d| d.to_string()).collect(),
        }
    }
    Workflow {
        tasks: vec![
            task("ingest-cal", 10, &[]),
            task("grid", 20, &["ingest-cal"]),
            task("clean", 30, &["ingest-cal"]),
            task("mosaic", 18, &["grid", "clean"]),
            task("catalogue", 20, &["mosaic"]),
        ],
    }
}
