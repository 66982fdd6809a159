//! Run tracing and divergence checks for Weir staging simulations.
//!
//! Records one row of pipeline state per tick to a line-oriented JSON
//! format, and re-runs recorded scenarios to pin down the first tick
//! at which two runs disagree. The simulator's whole value rests on
//! runs being reproducible; this crate is how that claim gets checked.
//!
//! # Architecture
//!
//! - [`TraceWriter`] records rows to any `Write` sink
//! - [`TraceReader`] reads rows back from any `BufRead` source
//! - [`verify_trace`] replays a scenario and reports the first
//!   differing tick
//!
//! # Format
//!
//! ```text
//! {"format":"weir-trace","version":1,"hot_capacity":500,...}
//! {"tick":0,"hot":498,"cold":250,"queued":0,"live":1}
//! {"tick":1,"hot":496,"cold":250,"queued":0,"live":1}
//! ```
//!
//! One JSON object per line; the first line is the header. Rows hold
//! only integers, so comparison is exact.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod reader;
pub mod types;
pub mod writer;

pub use compare::{verify_trace, TraceDivergence};
pub use error::TraceError;
pub use reader::{RowIter, TraceReader};
pub use types::{TraceHeader, TraceRow};
pub use writer::TraceWriter;

/// Format name in every trace header line.
pub const FORMAT_NAME: &str = "weir-trace";

/// Current trace format version.
pub const FORMAT_VERSION: u32 = 1;
