//! The mutable world every process acts on.

use weir_buffer::Buffer;
use weir_cluster::Cluster;
use weir_core::ObservationRegistry;
use weir_planner::Planner;

/// All simulation state outside the processes themselves.
///
/// One instance per simulation, owned by the kernel and lent to each
/// process resumption through the step context. The registry holds
/// every observation the harness has told the simulation about; the
/// buffer, cluster, and planner are the collaborators the staging
/// processes drive.
///
/// Fields are public: the harness mutates them freely between steps
/// (registering observations, marking them running, releasing
/// machines). During a step, processes reach them through
/// [`StepContext`](crate::StepContext) instead.
#[derive(Debug)]
pub struct SimState {
    /// Every observation known to this run, by name.
    pub observations: ObservationRegistry,
    /// The two-tier staging buffer.
    pub buffer: Buffer,
    /// The compute facility's machine inventory.
    pub cluster: Cluster,
    /// The workflow planner.
    pub planner: Planner,
}

impl SimState {
    /// Assemble a world with an empty observation registry.
    pub fn new(buffer: Buffer, cluster: Cluster, planner: Planner) -> Self {
        Self {
            observations: ObservationRegistry::new(),
            buffer,
            cluster,
            planner,
        }
    }
}
