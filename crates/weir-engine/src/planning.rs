//! Attaching workflow plans to staged observations.

use weir_core::{ProcessError, RunStatus};

use crate::context::StepContext;
use crate::process::{Process, Resumption};

/// Plans one staged observation's workflow and queues it for
/// processing.
///
/// A single-tick process, spawned by [`TransferProcess`]'s completion
/// event. It loads the observation's workflow, asks the planner for a
/// plan over the current cluster, attaches the plan, marks the
/// observation queued, and enqueues it on the processing queue. The
/// queue has set semantics, so replaying the event for an observation
/// cannot produce a duplicate entry.
///
/// [`TransferProcess`]: crate::TransferProcess
pub struct PlanningProcess {
    observation: String,
    name: String,
}

impl PlanningProcess {
    /// Planning for the named observation.
    pub fn new(observation: impl Into<String>) -> Self {
        let observation = observation.into();
        let name = format!("plan:{observation}");
        Self { observation, name }
    }
}

impl Process for PlanningProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
        let workflow = {
            let obs = ctx.observations().get(&self.observation).ok_or_else(|| {
                ProcessError::UnknownObservation {
                    observation: self.observation.clone(),
                }
            })?;
            obs.workflow.clone()
        };

        let plan = ctx
            .planner()
            .plan_from_file(&self.observation, &workflow, ctx.cluster())
            .map_err(|e| ProcessError::PlanningFailed {
                observation: self.observation.clone(),
                reason: e.to_string(),
            })?;

        let obs = ctx.observations_mut().get_mut(&self.observation).ok_or_else(|| {
            ProcessError::UnknownObservation {
                observation: self.observation.clone(),
            }
        })?;
        obs.plan = Some(plan);
        obs.status = RunStatus::Queued;
        ctx.buffer_mut()
            .observations_for_processing_mut()
            .enqueue(self.observation.clone());
        Ok(Resumption::Complete)
    }
}
