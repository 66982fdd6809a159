//! The suspendable-process seam.
//!
//! Everything that happens on the simulated timeline is a [`Process`]:
//! ingest, transfer, planning, dispatch, and any process a harness
//! defines itself. The kernel resumes each scheduled process once per
//! tick until it completes or fails.

use weir_core::ProcessError;

use crate::context::StepContext;

/// What a process resumption decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resumption {
    /// The process did this tick's work and wants the next tick too.
    Suspend,
    /// The process is finished and leaves the schedule.
    Complete,
}

/// A unit of work that advances one tick at a time.
///
/// Creating a process only schedules it; nothing is validated until
/// the kernel first resumes it. A process that finds its
/// preconditions unmet at that first resumption returns an error,
/// which the kernel reports as a failed step.
///
/// # Contract
///
/// - `resume` is called at most once per simulated tick, and never
///   again after it returns `Complete` or an error.
/// - Preconditions are checked at the first resumption, not at
///   construction. Between spawn and first resume the world may
///   change; only the state at first resume counts.
/// - Any error is fatal to the run. The kernel removes the process,
///   leaves the clock where it was, and surfaces the error to the
///   caller of `step`. Processes must not swallow failures.
/// - Processes spawned through [`StepContext::spawn`] during a
///   resumption join the schedule immediately but are first resumed
///   at the next tick.
///
/// # Example
///
/// ```
/// use weir_core::ProcessError;
/// use weir_engine::{Process, Resumption, StepContext};
///
/// struct Heartbeat {
///     left: u32,
/// }
///
/// impl Process for Heartbeat {
///     fn name(&self) -> &str {
///         "heartbeat"
///     }
///
///     fn resume(&mut self, _ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
///         if self.left == 0 {
///             return Ok(Resumption::Complete);
///         }
///         self.left -= 1;
///         Ok(Resumption::Suspend)
///     }
/// }
/// ```
pub trait Process: Send {
    /// Stable name for error reporting and traces.
    ///
    /// The shipped processes qualify theirs with the observation,
    /// e.g. `ingest:emu`.
    fn name(&self) -> &str;

    /// Advance by one tick.
    ///
    /// # Errors
    ///
    /// Any [`ProcessError`]; all are fatal to the run.
    fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError>;
}
