//! The planning-algorithm seam and the shipped list scheduler.

use weir_cluster::Cluster;

use crate::error::PlanError;
use crate::workflow::Workflow;

/// A computed schedule for one workflow, before it is attached to an
/// observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowSchedule {
    /// Finish time of the last task, in ticks.
    pub makespan: u64,
    /// Task ids in the order the algorithm starts them.
    pub exec_order: Vec<String>,
}

/// A workflow planning algorithm.
///
/// Implementations turn a task graph plus the machine inventory into
/// a [`WorkflowSchedule`]. The contract:
///
/// - Scheduling must be deterministic: the same workflow and cluster
///   always produce the same schedule. Any tie-break must be a fixed
///   rule, not iteration order of an unordered container.
/// - `schedule` must reject a workflow it cannot fully order
///   ([`PlanError::Unschedulable`]) rather than silently dropping
///   tasks.
/// - `schedule` does not mutate anything; it is a pure function of
///   its inputs.
pub trait PlanningAlgorithm {
    /// Short name, used in traces.
    fn name(&self) -> &str;

    /// Compute a schedule for `workflow` on `cluster`.
    ///
    /// # Errors
    ///
    /// [`PlanError::NoMachines`] for an empty cluster;
    /// [`PlanError::Unschedulable`] when no execution order covers
    /// every task.
    fn schedule(&self, workflow: &Workflow, cluster: &Cluster)
        -> Result<WorkflowSchedule, PlanError>;
}

/// Insertion-order list scheduling on identical machines.
///
/// Repeatedly takes the first declared task whose deps are all
/// scheduled and places it on the machine that frees earliest
/// (ties broken by inventory order). Task start is the later of the
/// machine's free time and the task's ready time. On a single
/// machine the makespan is the sum of runtimes; with enough machines
/// it converges to the critical-path length.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListScheduler;

impl PlanningAlgorithm for ListScheduler {
    fn name(&self) -> &str {
        "list"
    }

    fn schedule(
        &self,
        workflow: &Workflow,
        cluster: &Cluster,
    ) -> Result<WorkflowSchedule, PlanError> {
        if cluster.total_machines() == 0 {
            return Err(PlanError::NoMachines);
        }

        let tasks = &workflow.tasks;
        let mut machine_free = vec![0u64; cluster.total_machines()];
        let mut finish: Vec<Option<u64>> = vec![None; tasks.len()];
        let mut exec_order = Vec::with_capacity(tasks.len());

        for _ in 0..tasks.len() {
            // First declared task that is unscheduled and ready.
            let next = tasks.iter().enumerate().position(|(i, task)| {
                finish[i].is_none()
                    && task.deps.iter().all(|dep| {
                        tasks
                            .iter()
                            .position(|t| &t.id == dep)
                            .is_some_and(|d| finish[d].is_some())
                    })
            });
            let Some(i) = next else {
                // Every remaining task waits on an unfinished dep:
                // a cycle, or a dep that was never declared.
                let stuck = tasks
                    .iter()
                    .enumerate()
                    .find(|(i, _)| finish[*i].is_none())
                    .map(|(_, t)| t.id.clone())
                    .unwrap_or_default();
                return Err(PlanError::Unschedulable { task: stuck });
            };

            let ready = tasks[i]
                .deps
                .iter()
                .filter_map(|dep| {
                    tasks
                        .iter()
                        .position(|t| &t.id == dep)
                        .and_then(|d| finish[d])
                })
                .max()
                .unwrap_or(0);

            let m = machine_free
                .iter()
                .enumerate()
                .min_by_key(|(_, free)| **free)
                .map(|(m, _)| m)
                .unwrap_or(0);

            let start = machine_free[m].max(ready);
            let done = start + tasks[i].runtime;
            machine_free[m] = done;
            finish[i] = Some(done);
            exec_order.push(tasks[i].id.clone());
        }

        let makespan = finish.iter().flatten().copied().max().unwrap_or(0);
        Ok(WorkflowSchedule {
            makespan,
            exec_order,
        })
    }
}
