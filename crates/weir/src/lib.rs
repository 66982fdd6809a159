//! Weir: a simulated-time staging buffer between a radio telescope and
//! its compute facility.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Weir sub-crates. For most users, adding `weir` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weir::prelude::*;
//!
//! // Hot tier: 500 units refilled at 5 per tick. Cold: 250 at 2.
//! let buffer = Buffer::new(BufferConfig {
//!     hot: TierConfig { total_capacity: 500, rate_cap: 5 },
//!     cold: TierConfig { total_capacity: 250, rate_cap: 2 },
//! });
//! let cluster = Cluster::new(vec![Machine {
//!     name: "arc-0".into(),
//!     cpu: 84,
//!     memory: 64,
//!     bandwidth: 10,
//! }])
//! .unwrap();
//!
//! // One observation streaming 2 units per tick for 10 ticks.
//! let mut emu = Observation::new("emu", Tick(0), 10, 512, "imaging.json", "continuum", 2);
//! emu.status = RunStatus::Running;
//!
//! let mut state = SimState::new(buffer, cluster, Planner::default());
//! state.observations.insert(emu).unwrap();
//!
//! let mut sim = Simulation::new(state);
//! sim.spawn(Box::new(IngestProcess::new("emu")));
//!
//! // Five ticks of ingest land ten units in the hot tier.
//! sim.run_until(Tick(5)).unwrap();
//! assert_eq!(sim.now(), Tick(5));
//! assert_eq!(sim.state().buffer.hot().current_capacity(), 490);
//! assert_eq!(sim.state().buffer.hot().staged("emu"), Some(10));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weir-core` | Ticks, observations, the registry, errors, config plumbing |
//! | [`buffer`] | `weir-buffer` | Hot/cold capacity pools and the processing queue |
//! | [`cluster`] | `weir-cluster` | Machine inventory and provisioning bookkeeping |
//! | [`planner`] | `weir-planner` | Workflow graphs and list scheduling |
//! | [`engine`] | `weir-engine` | The simulation kernel and the staging processes |
//! | [`trace`] | `weir-trace` | Run recording and divergence checking |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors, and configuration plumbing (`weir-core`).
///
/// Contains [`types::Tick`], [`types::Observation`] and its lifecycle,
/// the [`types::ObservationRegistry`], and the error taxonomy shared by
/// the rest of the workspace.
pub use weir_core as types;

/// Two-tier staging buffer (`weir-buffer`).
///
/// [`buffer::CapacityPool`] is the accounting primitive both tiers
/// share; [`buffer::Buffer`] aggregates the hot and cold pools with the
/// [`buffer::ProcessingQueue`] that feeds the scheduler.
pub use weir_buffer as buffer;

/// Compute-cluster inventory (`weir-cluster`).
///
/// [`cluster::Cluster`] tracks which [`cluster::Machine`]s are
/// provisioned to observations.
pub use weir_cluster as cluster;

/// Workflow planning (`weir-planner`).
///
/// Load [`planner::Workflow`] documents and compute schedules through
/// the [`planner::PlanningAlgorithm`] seam; [`planner::ListScheduler`]
/// is the shipped algorithm.
pub use weir_planner as planner;

/// Simulation kernel and staging processes (`weir-engine`).
///
/// [`engine::Simulation`] drives suspendable [`engine::Process`]es over
/// a single clock. The shipped pipeline is
/// [`engine::IngestProcess`] → [`engine::TransferProcess`] →
/// [`engine::PlanningProcess`] → [`engine::DispatchProcess`].
pub use weir_engine as engine;

/// Run recording and divergence checking (`weir-trace`).
///
/// Record per-tick buffer state with [`trace::TraceWriter`], re-run and
/// compare with [`trace::TraceReader`] and [`trace::verify_trace`].
pub use weir_trace as trace;

/// Common imports for typical Weir usage.
///
/// ```rust
/// use weir::prelude::*;
/// ```
///
/// This imports the most frequently used types: the buffer and its
/// tiers, observations and their lifecycle, the planner, the simulation
/// kernel, and the shipped staging processes.
pub mod prelude {
    // Core types
    pub use weir_core::{Observation, ObservationRegistry, Plan, RunStatus, Tick};

    // Errors
    pub use weir_core::{ConfigError, PoolError, ProcessError, RegistryError, StepError};

    // Buffer
    pub use weir_buffer::{Buffer, BufferConfig, CapacityPool, ProcessingQueue, TierConfig};

    // Cluster
    pub use weir_cluster::{Cluster, Machine};

    // Planner
    pub use weir_planner::{ListScheduler, Planner, PlanningAlgorithm, Workflow};

    // Engine
    pub use weir_engine::{
        DispatchProcess, FirstFit, IngestProcess, PlacementPolicy, PlanningProcess, Process,
        Resumption, SimState, Simulation, StepContext, StepMetrics, TransferProcess,
    };
}
