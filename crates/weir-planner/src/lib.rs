//! Workflow planning for staged observations.
//!
//! Once an observation's data has fully migrated to the cold tier it
//! needs a plan: an ordering of its workflow tasks over the cluster's
//! machines and the projected makespan. This crate is the pure half
//! of that step — loading workflow documents and computing schedules.
//! The suspendable process that attaches plans on the simulated
//! timeline lives in the engine crate.
//!
//! - [`Workflow`] / [`WorkflowTask`] — the task graph and its loader
//! - [`PlanningAlgorithm`] — the algorithm seam
//! - [`ListScheduler`] — shipped insertion-order list scheduling
//! - [`Planner`] — workflow in, [`weir_core::Plan`] out

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod error;
pub mod planner;
pub mod workflow;

pub use algorithm::{ListScheduler, PlanningAlgorithm, WorkflowSchedule};
pub use error::PlanError;
pub use planner::Planner;
pub use workflow::{Workflow, WorkflowTask};
