//! Two-tier staging buffer with capacity and rate accounting.
//!
//! The buffer sits between the telescope and the compute facility.
//! Live observation data lands in a fast, capacity-limited hot tier;
//! a rate-capped migration moves it to the larger cold tier; staged
//! observations then wait on a FIFO queue for planning and
//! scheduling.
//!
//! - [`CapacityPool`] — the accounting primitive both tiers share
//! - [`ProcessingQueue`] — the planner→scheduler hand-off
//! - [`Buffer`] — the aggregate owning both tiers and the queue
//! - [`BufferConfig`] — the validated configuration document
//!
//! All capacity mutation here is synchronous and all-or-nothing; the
//! tick-by-tick driving logic lives in the engine crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod pool;
pub mod queue;

pub use buffer::Buffer;
pub use config::{BufferConfig, TierConfig};
pub use pool::CapacityPool;
pub use queue::ProcessingQueue;
