//! Simulation kernel and staging processes.
//!
//! The kernel is a single-threaded cooperative loop: one global
//! clock, a schedule of suspendable processes, one resumption per
//! process per tick. Determinism comes from spawn order alone; there
//! is no event queue and no concurrency.
//!
//! The staging pipeline ships as four processes:
//!
//! - [`IngestProcess`] — telescope data into the hot store, one rate
//!   quantum per tick
//! - [`TransferProcess`] — staged data from hot to cold, one cold
//!   rate quantum per tick
//! - [`PlanningProcess`] — workflow plan attached, observation
//!   queued for processing
//! - [`DispatchProcess`] — queued observations placed onto cluster
//!   machines via a [`PlacementPolicy`]
//!
//! Each completion hands the observation to the next stage by
//! spawning the follow-on process, so a harness that spawns one
//! ingest and one dispatch sees an observation travel the whole
//! pipeline. Harnesses can also spawn any stage directly, or define
//! their own [`Process`] implementations.
//!
//! Failures are loud: any process error aborts the step, leaves the
//! clock on the failed tick, and surfaces as
//! [`StepError::ProcessFailed`](weir_core::StepError::ProcessFailed).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod dispatch;
pub mod ingest;
pub mod metrics;
pub mod planning;
pub mod process;
pub mod sim;
pub mod state;
pub mod transfer;

pub use context::StepContext;
pub use dispatch::{DispatchProcess, FirstFit, PlacementPolicy};
pub use ingest::IngestProcess;
pub use metrics::StepMetrics;
pub use planning::PlanningProcess;
pub use process::{Process, Resumption};
pub use sim::Simulation;
pub use state::SimState;
pub use transfer::TransferProcess;
