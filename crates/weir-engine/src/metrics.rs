//! Per-step observability counters.

use weir_core::Tick;

/// What one `step()` did, for harness-side reporting.
///
/// Returned by every successful step and retained as
/// `last_metrics()`. Failed steps return an error instead; their
/// partial counts are discarded with the step.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// The tick this step executed.
    pub tick: Tick,
    /// Wall-clock duration of the step in microseconds.
    pub total_us: u64,
    /// Process resumptions performed.
    pub resumed: usize,
    /// Resumptions that returned completion.
    pub completed: usize,
    /// Processes spawned during the step.
    pub spawned: usize,
    /// Processes still scheduled after the step.
    pub live: usize,
}
