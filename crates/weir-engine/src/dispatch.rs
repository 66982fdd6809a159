//! Scheduler-side dispatch: planned observations onto machines.

use weir_cluster::Cluster;
use weir_core::{Observation, ProcessError};

use crate::context::StepContext;
use crate::process::{Process, Resumption};

/// Chooses a machine for a planned observation.
///
/// # Contract
///
/// - Pure: no mutation, no randomness. The same observation and
///   cluster state must always yield the same machine.
/// - The returned name must be an idle machine from the given
///   cluster; naming anything else fails the run.
/// - `None` means "no machine right now" and parks the dispatch
///   process for a tick; it is not an error.
pub trait PlacementPolicy: Send {
    /// Stable policy name for process naming and traces.
    fn name(&self) -> &str;

    /// The machine to run this observation on, if any is acceptable.
    fn place(&self, observation: &Observation, cluster: &Cluster) -> Option<String>;
}

/// Take the first idle machine in inventory order.
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn name(&self) -> &str {
        "first-fit"
    }

    fn place(&self, _observation: &Observation, cluster: &Cluster) -> Option<String> {
        cluster.available_machines().next().map(|m| m.name.clone())
    }
}

/// Consumes the processing queue, provisioning one machine per tick.
///
/// Each tick it looks at the oldest queued observation and asks its
/// [`PlacementPolicy`] for a machine. On a placement the machine is
/// provisioned and the observation dequeued; with no machine free
/// (or nothing queued) the process just waits. Dequeue strictly
/// follows queue order: the front observation blocks those behind it
/// until it places.
///
/// The process retires after `quota` placements, so a harness that
/// knows its observation count can drive the pipeline with
/// [`run_to_idle`](crate::Simulation::run_to_idle).
pub struct DispatchProcess {
    policy: Box<dyn PlacementPolicy>,
    name: String,
    quota: usize,
    dispatched: usize,
}

impl DispatchProcess {
    /// Dispatch with the given policy, retiring after `quota`
    /// placements.
    pub fn new(policy: Box<dyn PlacementPolicy>, quota: usize) -> Self {
        let name = format!("dispatch:{}", policy.name());
        Self {
            policy,
            name,
            quota,
            dispatched: 0,
        }
    }

    /// Dispatch with [`FirstFit`].
    pub fn first_fit(quota: usize) -> Self {
        Self::new(Box::new(FirstFit), quota)
    }

    /// Placements made so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}

impl Process for DispatchProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
        if self.dispatched >= self.quota {
            return Ok(Resumption::Complete);
        }
        let next = match ctx.buffer().observations_for_processing().peek() {
            Some(name) => name.to_string(),
            None => return Ok(Resumption::Suspend),
        };
        let machine = {
            let obs = ctx.observations().get(&next).ok_or_else(|| {
                ProcessError::UnknownObservation {
                    observation: next.clone(),
                }
            })?;
            match self.policy.place(obs, ctx.cluster()) {
                Some(machine) => machine,
                None => return Ok(Resumption::Suspend),
            }
        };
        ctx.cluster_mut()
            .provision(&machine)
            .map_err(|e| ProcessError::PlacementFailed {
                observation: next.clone(),
                reason: e.to_string(),
            })?;
        let _ = ctx.buffer_mut().observations_for_processing_mut().dequeue();
        self.dispatched += 1;

        if self.dispatched >= self.quota {
            Ok(Resumption::Complete)
        } else {
            Ok(Resumption::Suspend)
        }
    }
}
