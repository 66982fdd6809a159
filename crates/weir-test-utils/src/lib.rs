//! Test fixtures for Weir development.
//!
//! Canned buffer shapes, clusters, observations, and workflows shared
//! by the test suites of the other crates. Everything here is plain
//! construction code; no simulation logic lives in this crate.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    buffer_with, cluster_of, imaging_workflow, observation, running_observation, standard_buffer,
    standard_buffer_config,
};
