//! Compute-cluster inventory and provisioning bookkeeping.
//!
//! The cluster is a collaborator of the staging pipeline: the buffer
//! holds observations until they are planned, and the scheduler's
//! dispatch side provisions machines from this inventory. Nothing in
//! the buffer pipeline mutates cluster state.
//!
//! - [`Machine`] — one compute node
//! - [`Cluster`] — the inventory plus provisioned-set bookkeeping
//! - [`ClusterError`] — inventory misuse (always a caller defect)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{Cluster, Machine};
pub use error::ClusterError;
