//! Observations, their lifecycle states, and attached plans.

use std::fmt;
use std::path::PathBuf;

use crate::time::Tick;

/// Lifecycle state of an [`Observation`].
///
/// The path through this pipeline is `Waiting → Running → Queued`:
/// the telescope harness promotes an observation to `Running` when it
/// starts observing, and the planning process marks it `Queued` once
/// its plan is attached and it sits on the processing queue. Ingest
/// refuses any observation that is not `Running`; the check happens
/// when the simulation first resumes the ingest process, not when the
/// process is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Created but not yet observing. Initial state.
    #[default]
    Waiting,
    /// Actively observing; eligible for hot-tier ingest.
    Running,
    /// Planned and sitting on the processing queue.
    Queued,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Running => write!(f, "running"),
            Self::Queued => write!(f, "queued"),
        }
    }
}

/// Output of workflow planning for one observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Plan identity; always the source observation's name.
    pub id: String,
    /// Projected completion time of the workflow, in ticks.
    pub makespan: u64,
    /// Task ids in execution order, as chosen by the planning
    /// algorithm.
    pub exec_order: Vec<String>,
}

/// One unit of telescope work moving through the staging pipeline.
///
/// Created by the harness in [`RunStatus::Waiting`], with no plan
/// attached. The buffer pipeline never creates or destroys
/// observations; it only reads their parameters and advances their
/// status.
#[derive(Clone, Debug)]
pub struct Observation {
    /// Unique name within one simulation run.
    pub name: String,
    /// Tick at which the telescope is scheduled to start it.
    pub start: Tick,
    /// How many ticks the observation produces data for.
    pub duration: u64,
    /// Fraction of telescope demand, in arbitrary harness units.
    pub demand: u32,
    /// Path to the workflow description planned after staging.
    pub workflow: PathBuf,
    /// Observation type as named by the harness (e.g. `continuum`).
    pub kind: String,
    /// Data produced per tick while observing, in capacity units.
    pub data_rate: u64,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// Attached by the planner after staging completes; `None` until
    /// then.
    pub plan: Option<Plan>,
}

impl Observation {
    /// Create an observation in [`RunStatus::Waiting`] with no plan.
    pub fn new(
        name: impl Into<String>,
        start: Tick,
        duration: u64,
        demand: u32,
        workflow: impl Into<PathBuf>,
        kind: impl Into<String>,
        data_rate: u64,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            duration,
            demand,
            workflow: workflow.into(),
            kind: kind.into(),
            data_rate,
            status: RunStatus::Waiting,
            plan: None,
        }
    }
}
