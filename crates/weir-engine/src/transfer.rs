//! Hot-to-cold migration of staged observation data.

use weir_core::ProcessError;

use crate::context::StepContext;
use crate::planning::PlanningProcess;
use crate::process::{Process, Resumption};

/// Drains one observation's staged data from the hot store into cold.
///
/// Each tick it moves one quantum: the cold pool's rate cap, or the
/// staged remainder if that is smaller. Cold space is reserved before
/// the hot side is drained, so a full cold store fails the run with
/// the hot tier untouched for that tick.
///
/// The resumption that drains the last unit is also the completion
/// event: the observation leaves the hot ledger, enters the cold
/// ledger once with its full amount, and a [`PlanningProcess`] is
/// handed the observation for the next tick.
///
/// Usually spawned by [`IngestProcess`](crate::IngestProcess) when
/// ingest completes; a harness can also spawn one directly for data
/// it staged itself. Run at most one transfer per observation at a
/// time.
pub struct TransferProcess {
    observation: String,
    name: String,
    started: bool,
    moved: u64,
}

impl TransferProcess {
    /// Transfer for the named observation.
    pub fn new(observation: impl Into<String>) -> Self {
        let observation = observation.into();
        let name = format!("transfer:{observation}");
        Self {
            observation,
            name,
            started: false,
            moved: 0,
        }
    }
}

impl Process for TransferProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
        let remaining = match ctx.buffer().hot().staged(&self.observation) {
            Some(units) => units,
            None => {
                return Err(ProcessError::NothingStaged {
                    observation: self.observation.clone(),
                })
            }
        };
        if !self.started {
            if remaining == 0 {
                return Err(ProcessError::NothingStaged {
                    observation: self.observation.clone(),
                });
            }
            self.started = true;
        }

        let quantum = remaining.min(ctx.buffer().cold().rate_cap());
        // Cold admission first: if it fails, the hot side is
        // untouched this tick.
        ctx.buffer_mut().cold_mut().reserve(quantum)?;
        let hot = ctx.buffer_mut().hot_mut();
        hot.release(quantum);
        let left = hot.withdraw(&self.observation, quantum)?;
        self.moved += quantum;

        if left == 0 {
            ctx.buffer_mut().hot_mut().untrack(&self.observation)?;
            ctx.buffer_mut()
                .cold_mut()
                .track(&self.observation, self.moved);
            ctx.spawn(Box::new(PlanningProcess::new(self.observation.clone())));
            return Ok(Resumption::Complete);
        }
        Ok(Resumption::Suspend)
    }
}
