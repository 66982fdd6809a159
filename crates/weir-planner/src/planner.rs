//! The planner: workflow in, attached-ready [`Plan`] out.

use std::fmt;
use std::path::Path;

use weir_cluster::Cluster;
use weir_core::Plan;

use crate::algorithm::{ListScheduler, PlanningAlgorithm};
use crate::error::PlanError;
use crate::workflow::Workflow;

/// Turns a staged observation's workflow into a [`Plan`].
///
/// Planning is pure: the planner never mutates the observation, the
/// buffer, or the cluster. Attaching the plan and enqueueing the
/// observation is the planning process's job in the engine crate, so
/// that all state mutation stays on the simulated timeline.
pub struct Planner {
    algorithm: Box<dyn PlanningAlgorithm>,
}

impl Planner {
    /// Create a planner around the given algorithm.
    pub fn new(algorithm: Box<dyn PlanningAlgorithm>) -> Self {
        Self { algorithm }
    }

    /// Name of the planning algorithm in use.
    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    /// Plan a workflow for the named observation.
    ///
    /// The returned plan's `id` is always the observation's name.
    ///
    /// # Errors
    ///
    /// The algorithm's errors: [`PlanError::NoMachines`],
    /// [`PlanError::Unschedulable`].
    pub fn plan(
        &self,
        observation: &str,
        workflow: &Workflow,
        cluster: &Cluster,
    ) -> Result<Plan, PlanError> {
        let schedule = self.algorithm.schedule(workflow, cluster)?;
        Ok(Plan {
            id: observation.to_string(),
            makespan: schedule.makespan,
            exec_order: schedule.exec_order,
        })
    }

    /// Load a workflow file and plan it for the named observation.
    ///
    /// # Errors
    ///
    /// [`PlanError::Config`] for load failures, plus the
    /// [`plan`](Self::plan) errors.
    pub fn plan_from_file(
        &self,
        observation: &str,
        workflow: impl AsRef<Path>,
        cluster: &Cluster,
    ) -> Result<Plan, PlanError> {
        let workflow = Workflow::from_file(workflow)?;
        self.plan(observation, &workflow, cluster)
    }
}

impl Default for Planner {
    /// A planner using the shipped [`ListScheduler`].
    fn default() -> Self {
        Self::new(Box::new(ListScheduler))
    }
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("algorithm", &self.algorithm.name())
            .finish()
    }
}
