//! Data types for run tracing.

use weir_core::Tick;

/// Buffer geometry stored in the trace header.
///
/// A verifying harness can compare this against its own configuration
/// before replaying, so a mismatched setup surfaces before the row
/// comparison turns it into a spurious divergence.
///
/// # Examples
///
/// ```
/// use weir_trace::TraceHeader;
///
/// let header = TraceHeader {
///     hot_capacity: 500,
///     hot_rate: 5,
///     cold_capacity: 250,
///     cold_rate: 2,
/// };
///
/// assert_eq!(header.hot_capacity, 500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceHeader {
    /// Total capacity of the hot store, in capacity units.
    pub hot_capacity: u64,
    /// Per-tick ingest rate cap of the hot store.
    pub hot_rate: u64,
    /// Total capacity of the cold store, in capacity units.
    pub cold_capacity: u64,
    /// Per-tick transfer rate cap of the cold store.
    pub cold_rate: u64,
}

/// One tick of recorded pipeline state, captured after the step ran.
///
/// Rows are exact integers, so two runs either match byte for byte or
/// have genuinely diverged; there is no tolerance to tune.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRow {
    /// The tick this row describes.
    pub tick: Tick,
    /// Hot store capacity remaining after the step.
    pub hot: u64,
    /// Cold store capacity remaining after the step.
    pub cold: u64,
    /// Processing-queue length after the step.
    pub queued: usize,
    /// Scheduled processes remaining after the step.
    pub live: usize,
}
