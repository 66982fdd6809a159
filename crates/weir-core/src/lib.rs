//! Core types and errors for the Weir staging simulator.
//!
//! Weir models the data path between a radio telescope and its compute
//! facility: observations stream into a fast hot store, migrate to a
//! larger cold store under a rate cap, and are then planned and handed
//! to a scheduler. This crate holds the vocabulary shared by every
//! other crate in the workspace:
//!
//! - [`Tick`] — the simulated clock unit
//! - [`Observation`], [`RunStatus`], [`Plan`] — the unit of work and
//!   its lifecycle
//! - [`ObservationRegistry`] — name-keyed ownership of observations
//! - the error taxonomy ([`PoolError`], [`ProcessError`], [`StepError`],
//!   [`ConfigError`], [`RegistryError`])

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod observation;
pub mod registry;
pub mod time;

pub use error::{ConfigError, PoolError, ProcessError, RegistryError, StepError};
pub use observation::{Observation, Plan, RunStatus};
pub use registry::ObservationRegistry;
pub use time::Tick;
