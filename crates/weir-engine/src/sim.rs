//! The simulation kernel: one clock, one process schedule.
//!
//! [`Simulation`] owns the world state and a list of scheduled
//! processes. Each `step()` resumes every due process once, in spawn
//! order, then advances the clock by one tick. There is no
//! parallelism and no hidden event queue; spawn order is the whole
//! tie-break story, which is what makes runs reproducible.

use std::fmt;
use std::time::Instant;

use weir_core::{StepError, Tick};

use crate::context::StepContext;
use crate::metrics::StepMetrics;
use crate::process::{Process, Resumption};
use crate::state::SimState;

// ── Schedule entries ─────────────────────────────────────────────

/// A process plus the first tick it may run.
///
/// Processes spawned mid-step carry `first_tick` one past the current
/// tick, so a spawner never sees its child run in the same step.
struct Scheduled {
    process: Box<dyn Process>,
    first_tick: Tick,
}

// ── Simulation ───────────────────────────────────────────────────

/// Single-threaded cooperative simulation over a [`SimState`].
///
/// The harness assembles the world, spawns the initial processes,
/// and drives the clock with [`step`](Self::step) or one of the run
/// helpers. Any process failure is surfaced as
/// [`StepError::ProcessFailed`] with the clock left on the failed
/// tick.
pub struct Simulation {
    state: SimState,
    clock: Tick,
    processes: Vec<Scheduled>,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Create a simulation at tick 0 with an empty schedule.
    pub fn new(state: SimState) -> Self {
        Self {
            state,
            clock: Tick::ZERO,
            processes: Vec::new(),
            last_metrics: StepMetrics::default(),
        }
    }

    /// Schedule a process from the harness.
    ///
    /// It may run from the current tick onward. Nothing about it is
    /// validated here; the process checks its own preconditions at
    /// first resumption.
    pub fn spawn(&mut self, process: Box<dyn Process>) {
        self.processes.push(Scheduled {
            process,
            first_tick: self.clock,
        });
    }

    /// Execute one tick.
    ///
    /// Resumes every due process once, in spawn order, then advances
    /// the clock.
    ///
    /// # Errors
    ///
    /// [`StepError::ProcessFailed`] if any resumption fails. The
    /// failing process is removed, its spawns are discarded, and the
    /// clock stays on the failed tick; processes resumed earlier in
    /// the step keep their effects.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        let step_start = Instant::now();
        let now = self.clock;
        let mut resumed = 0;
        let mut completed = 0;
        let mut spawned = 0;

        // 1. Resume every due process in spawn order. The length is
        //    re-read each iteration so processes appended mid-step
        //    are seen, then skipped until their first tick.
        let mut i = 0;
        while i < self.processes.len() {
            if self.processes[i].first_tick > now {
                i += 1;
                continue;
            }

            // 2. Disjoint borrows: the schedule entry and the world.
            let entry = &mut self.processes[i];
            let mut ctx = StepContext::new(now, &mut self.state);
            let outcome = entry.process.resume(&mut ctx);
            let fresh = ctx.into_spawned();
            resumed += 1;

            match outcome {
                Ok(Resumption::Suspend) => {
                    spawned += self.schedule_spawns(fresh, now);
                    i += 1;
                }
                Ok(Resumption::Complete) => {
                    completed += 1;
                    // Removal shifts the tail left, so the next
                    // unresumed process is now at `i`.
                    self.processes.remove(i);
                    spawned += self.schedule_spawns(fresh, now);
                }
                Err(reason) => {
                    // 3. Fatal: drop the process and anything it
                    //    tried to spawn, and leave the clock put.
                    let name = self.processes[i].process.name().to_string();
                    self.processes.remove(i);
                    return Err(StepError::ProcessFailed { name, reason });
                }
            }
        }

        // 4. The tick happened; advance the clock, publish metrics.
        self.clock = now.offset(1);
        let metrics = StepMetrics {
            tick: now,
            total_us: step_start.elapsed().as_micros() as u64,
            resumed,
            completed,
            spawned,
            live: self.processes.len(),
        };
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Step until the clock reaches `until`.
    ///
    /// A simulation already at or past `until` does nothing.
    ///
    /// # Errors
    ///
    /// The first [`StepError`] from any step; the clock stays on the
    /// failed tick.
    pub fn run_until(&mut self, until: Tick) -> Result<(), StepError> {
        while self.clock < until {
            self.step()?;
        }
        Ok(())
    }

    /// Step until no processes remain, returning the quiet tick.
    ///
    /// # Errors
    ///
    /// [`StepError::IdleLimit`] if the clock reaches `limit` with
    /// processes still scheduled, plus the [`step`](Self::step)
    /// errors.
    pub fn run_to_idle(&mut self, limit: Tick) -> Result<Tick, StepError> {
        while !self.processes.is_empty() {
            if self.clock >= limit {
                return Err(StepError::IdleLimit {
                    limit,
                    live: self.processes.len(),
                });
            }
            self.step()?;
        }
        Ok(self.clock)
    }

    fn schedule_spawns(&mut self, fresh: Vec<Box<dyn Process>>, now: Tick) -> usize {
        let n = fresh.len();
        for process in fresh {
            self.processes.push(Scheduled {
                process,
                first_tick: now.offset(1),
            });
        }
        n
    }

    // ── Accessors ────────────────────────────────────────────────

    /// The next tick to execute.
    pub fn now(&self) -> Tick {
        self.clock
    }

    /// Number of scheduled processes.
    pub fn live_processes(&self) -> usize {
        self.processes.len()
    }

    /// The world state.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// The world state, mutably. For harness use between steps.
    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("clock", &self.clock)
            .field("live_processes", &self.processes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weir_core::ProcessError;
    use weir_planner::Planner;

    /// Enqueues `name@tick` each resume, completing after `ticks`
    /// resumptions. The processing queue doubles as an ordered log.
    struct Mark {
        name: String,
        ticks: u64,
        elapsed: u64,
    }

    impl Mark {
        fn new(name: &str, ticks: u64) -> Box<Self> {
            Box::new(Self {
                name: name.to_string(),
                ticks,
                elapsed: 0,
            })
        }
    }

    impl Process for Mark {
        fn name(&self) -> &str {
            &self.name
        }
        fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
            let stamp = format!("{}@{}", self.name, ctx.now());
            ctx.buffer_mut()
                .observations_for_processing_mut()
                .enqueue(stamp);
            self.elapsed += 1;
            if self.elapsed >= self.ticks {
                Ok(Resumption::Complete)
            } else {
                Ok(Resumption::Suspend)
            }
        }
    }

    struct Forever;
    impl Process for Forever {
        fn name(&self) -> &str {
            "forever"
        }
        fn resume(&mut self, _ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
            Ok(Resumption::Suspend)
        }
    }

    struct FailNow(&'static str);
    impl Process for FailNow {
        fn name(&self) -> &str {
            self.0
        }
        fn resume(&mut self, _ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
            Err(ProcessError::UnknownObservation {
                observation: "ghost".to_string(),
            })
        }
    }

    /// Spawns a child on its first resume, then completes.
    struct SpawnOnce;
    impl Process for SpawnOnce {
        fn name(&self) -> &str {
            "spawn-once"
        }
        fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
            ctx.spawn(Mark::new("child", 1));
            Ok(Resumption::Complete)
        }
    }

    fn sim() -> Simulation {
        Simulation::new(SimState::new(
            weir_test_utils::standard_buffer(),
            weir_test_utils::cluster_of(1),
            Planner::default(),
        ))
    }

    fn log(sim: &Simulation) -> Vec<String> {
        sim.state()
            .buffer
            .observations_for_processing()
            .iter()
            .map(str::to_string)
            .collect()
    }

    // ── Clock and schedule ───────────────────────────────────────

    #[test]
    fn step_advances_the_clock() {
        let mut sim = sim();
        assert_eq!(sim.now(), Tick::ZERO);
        let metrics = sim.step().unwrap();
        assert_eq!(sim.now(), Tick(1));
        assert_eq!(metrics.tick, Tick::ZERO);
        assert_eq!(metrics.resumed, 0);
    }

    #[test]
    fn resumes_in_spawn_order() {
        let mut sim = sim();
        sim.spawn(Mark::new("a", 1));
        sim.spawn(Mark::new("b", 1));
        sim.spawn(Mark::new("c", 1));
        let metrics = sim.step().unwrap();
        assert_eq!(log(&sim), ["a@0", "b@0", "c@0"]);
        assert_eq!(metrics.resumed, 3);
        assert_eq!(metrics.completed, 3);
        assert_eq!(metrics.live, 0);
    }

    #[test]
    fn completed_processes_leave_the_schedule() {
        let mut sim = sim();
        sim.spawn(Mark::new("a", 2));
        sim.step().unwrap();
        assert_eq!(sim.live_processes(), 1);
        sim.step().unwrap();
        assert_eq!(sim.live_processes(), 0);
        assert_eq!(log(&sim), ["a@0", "a@1"]);
    }

    // ── Failure semantics ────────────────────────────────────────

    #[test]
    fn failure_freezes_clock_and_removes_the_process() {
        let mut sim = sim();
        sim.spawn(Mark::new("ok", 1));
        sim.spawn(Box::new(FailNow("bad")));
        match sim.step() {
            Err(StepError::ProcessFailed { name, reason }) => {
                assert_eq!(name, "bad");
                assert!(matches!(reason, ProcessError::UnknownObservation { .. }));
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
        // The earlier process ran and completed; the clock did not
        // move past the failed tick.
        assert_eq!(sim.now(), Tick::ZERO);
        assert_eq!(sim.live_processes(), 0);
        assert_eq!(log(&sim), ["ok@0"]);

        // The schedule is clean; stepping again succeeds.
        sim.step().unwrap();
        assert_eq!(sim.now(), Tick(1));
    }

    #[test]
    fn failing_resume_discards_its_spawns() {
        struct SpawnThenFail;
        impl Process for SpawnThenFail {
            fn name(&self) -> &str {
                "spawn-then-fail"
            }
            fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
                ctx.spawn(Mark::new("orphan", 1));
                Err(ProcessError::UnknownObservation {
                    observation: "ghost".to_string(),
                })
            }
        }
        let mut sim = sim();
        sim.spawn(Box::new(SpawnThenFail));
        assert!(sim.step().is_err());
        assert_eq!(sim.live_processes(), 0);
    }

    // ── Spawn timing ─────────────────────────────────────────────

    #[test]
    fn spawned_during_step_starts_next_tick() {
        let mut sim = sim();
        sim.spawn(Box::new(SpawnOnce));
        let metrics = sim.step().unwrap();
        assert_eq!(metrics.spawned, 1);
        assert_eq!(metrics.live, 1);
        // The child did not run at tick 0.
        assert!(log(&sim).is_empty());
        sim.step().unwrap();
        assert_eq!(log(&sim), ["child@1"]);
    }

    #[test]
    fn external_spawn_runs_on_the_current_tick() {
        let mut sim = sim();
        sim.run_until(Tick(3)).unwrap();
        sim.spawn(Mark::new("late", 1));
        sim.step().unwrap();
        assert_eq!(log(&sim), ["late@3"]);
    }

    // ── Run helpers ──────────────────────────────────────────────

    #[test]
    fn run_until_stops_exactly_at_the_target() {
        let mut sim = sim();
        sim.spawn(Mark::new("m", 3));
        sim.run_until(Tick(5)).unwrap();
        assert_eq!(sim.now(), Tick(5));
        assert_eq!(log(&sim), ["m@0", "m@1", "m@2"]);
        // Already there: no further ticks run.
        sim.run_until(Tick(5)).unwrap();
        assert_eq!(sim.now(), Tick(5));
    }

    #[test]
    fn run_to_idle_returns_the_quiet_tick() {
        let mut sim = sim();
        sim.spawn(Mark::new("short", 2));
        sim.spawn(Mark::new("long", 4));
        let idle = sim.run_to_idle(Tick(100)).unwrap();
        assert_eq!(idle, Tick(4));
        assert_eq!(sim.live_processes(), 0);
    }

    #[test]
    fn run_to_idle_reports_stuck_processes() {
        let mut sim = sim();
        sim.spawn(Box::new(Forever));
        match sim.run_to_idle(Tick(5)) {
            Err(StepError::IdleLimit { limit, live }) => {
                assert_eq!(limit, Tick(5));
                assert_eq!(live, 1);
            }
            other => panic!("expected IdleLimit, got {other:?}"),
        }
        assert_eq!(sim.now(), Tick(5));
    }

    // ── Metrics ──────────────────────────────────────────────────

    #[test]
    fn metrics_count_one_step() {
        let mut sim = sim();
        sim.spawn(Mark::new("a", 2));
        sim.spawn(Mark::new("b", 2));
        sim.spawn(Box::new(SpawnOnce));
        let metrics = sim.step().unwrap();
        assert_eq!(metrics.resumed, 3);
        assert_eq!(metrics.completed, 1);
        assert_eq!(metrics.spawned, 1);
        assert_eq!(metrics.live, 3);
        assert_eq!(sim.last_metrics().resumed, 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// With every process spawned at tick 0, the quiet tick
            /// is the longest duration among them.
            #[test]
            fn idle_tick_is_the_longest_duration(
                durations in prop::collection::vec(1u64..8, 1..12),
            ) {
                let mut sim = sim();
                for (i, &ticks) in durations.iter().enumerate() {
                    sim.spawn(Mark::new(&format!("p{i}"), ticks));
                }
                let idle = sim.run_to_idle(Tick(100)).unwrap();
                let longest = durations.iter().copied().max().unwrap_or(0);
                prop_assert_eq!(idle, Tick(longest));
                prop_assert_eq!(sim.live_processes(), 0);
            }
        }
    }
}
