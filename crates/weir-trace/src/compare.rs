//! Trace verification.
//!
//! Re-runs a recorded scenario through a caller-provided step function
//! and compares rows tick by tick, reporting the first difference.

use std::io::BufRead;

use weir_core::Tick;

use crate::error::TraceError;
use crate::reader::TraceReader;
use crate::types::TraceRow;

/// The first recorded/replayed row pair that differs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceDivergence {
    /// Tick at which the runs first disagree.
    pub tick: Tick,
    /// The row from the recorded run.
    pub recorded: TraceRow,
    /// The row the verifying run produced.
    pub replayed: TraceRow,
}

/// Replay a recorded run through `step_fn` and compare every row.
///
/// The closure receives the tick of the next recorded row, steps its
/// own simulation, and returns the row it observed. This closure-based
/// API keeps the trace crate independent of any particular simulation
/// kernel.
///
/// Returns `Ok(None)` when every row matches, or `Ok(Some(..))` at
/// the first difference; remaining rows are not read.
///
/// # Errors
///
/// Reader errors from the recorded stream, plus whatever `step_fn`
/// returns.
pub fn verify_trace<R: BufRead>(
    mut reader: TraceReader<R>,
    step_fn: &mut dyn FnMut(Tick) -> Result<TraceRow, TraceError>,
) -> Result<Option<TraceDivergence>, TraceError> {
    while let Some(recorded) = reader.next_row()? {
        let replayed = step_fn(recorded.tick)?;
        if replayed != recorded {
            return Ok(Some(TraceDivergence {
                tick: recorded.tick,
                recorded,
                replayed,
            }));
        }
    }
    Ok(None)
}
