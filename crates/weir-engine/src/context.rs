//! The view a process gets of the world during one resumption.

use weir_buffer::Buffer;
use weir_cluster::Cluster;
use weir_core::{ObservationRegistry, Tick};
use weir_planner::Planner;

use crate::process::Process;
use crate::state::SimState;

/// Borrowed world state plus the current tick, handed to
/// [`Process::resume`].
///
/// The accessors below cover what the shipped processes need; custom
/// processes can drop to [`state_mut`](Self::state_mut) for anything
/// else. Spawns requested through [`spawn`](Self::spawn) are collected
/// here and folded into the schedule by the kernel after the
/// resumption returns; the spawned processes are first resumed at the
/// next tick.
pub struct StepContext<'a> {
    now: Tick,
    state: &'a mut SimState,
    spawned: Vec<Box<dyn Process>>,
}

impl<'a> StepContext<'a> {
    /// Build a context for one resumption at tick `now`.
    pub fn new(now: Tick, state: &'a mut SimState) -> Self {
        Self {
            now,
            state,
            spawned: Vec::new(),
        }
    }

    /// The tick being executed.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// The whole world, read-only.
    pub fn state(&self) -> &SimState {
        self.state
    }

    /// The whole world, mutably.
    pub fn state_mut(&mut self) -> &mut SimState {
        self.state
    }

    /// The observation registry.
    pub fn observations(&self) -> &ObservationRegistry {
        &self.state.observations
    }

    /// The observation registry, mutably.
    pub fn observations_mut(&mut self) -> &mut ObservationRegistry {
        &mut self.state.observations
    }

    /// The staging buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.state.buffer
    }

    /// The staging buffer, mutably.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.state.buffer
    }

    /// The machine inventory.
    pub fn cluster(&self) -> &Cluster {
        &self.state.cluster
    }

    /// The machine inventory, mutably.
    pub fn cluster_mut(&mut self) -> &mut Cluster {
        &mut self.state.cluster
    }

    /// The workflow planner.
    pub fn planner(&self) -> &Planner {
        &self.state.planner
    }

    /// Schedule another process.
    ///
    /// It joins the schedule behind every live process and is first
    /// resumed at the tick after this one.
    pub fn spawn(&mut self, process: Box<dyn Process>) {
        self.spawned.push(process);
    }

    /// Processes spawned so far in this resumption.
    pub fn spawned(&self) -> usize {
        self.spawned.len()
    }

    pub(crate) fn into_spawned(self) -> Vec<Box<dyn Process>> {
        self.spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Resumption;
    use weir_core::ProcessError;

    fn world() -> SimState {
        SimState::new(
            weir_test_utils::standard_buffer(),
            weir_test_utils::cluster_of(2),
            Planner::default(),
        )
    }

    #[test]
    fn accessors_reach_every_collaborator() {
        let mut state = world();
        let mut ctx = StepContext::new(Tick(7), &mut state);
        assert_eq!(ctx.now(), Tick(7));
        assert_eq!(ctx.buffer().hot().total_capacity(), 500);
        assert_eq!(ctx.cluster().total_machines(), 2);
        assert_eq!(ctx.planner().algorithm_name(), "list");
        assert!(ctx.observations().is_empty());
        ctx.buffer_mut().hot_mut().reserve(3).unwrap();
        assert_eq!(state.buffer.hot().current_capacity(), 497);
    }

    #[test]
    fn spawn_collects_in_order() {
        struct Named(&'static str);
        impl Process for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn resume(&mut self, _ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
                Ok(Resumption::Complete)
            }
        }
        let mut state = world();
        let mut ctx = StepContext::new(Tick::ZERO, &mut state);
        ctx.spawn(Box::new(Named("a")));
        ctx.spawn(Box::new(Named("b")));
        assert_eq!(ctx.spawned(), 2);
        let spawned = ctx.into_spawned();
        let names: Vec<&str> = spawned.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
