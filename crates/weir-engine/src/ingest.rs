//! Live ingest from the telescope into the hot store.

use weir_core::{ProcessError, RunStatus};

use crate::context::StepContext;
use crate::process::{Process, Resumption};
use crate::transfer::TransferProcess;

/// Streams one observation's data into the hot store for the length
/// of the observation.
///
/// Each tick it reserves the observation's data rate from the hot
/// pool and records the arrival in the resident ledger, so the
/// observation is hot-resident from its first tick. A rate above the
/// hot pool's cap is a misconfigured request and fails the run.
///
/// On natural completion the process hands over to a
/// [`TransferProcess`] for the staged data, starting the drain to
/// cold on the following tick. Observations that staged nothing
/// (zero length or zero rate) complete without a handover.
pub struct IngestProcess {
    observation: String,
    name: String,
    started: bool,
    elapsed: u64,
}

impl IngestProcess {
    /// Ingest for the named observation.
    pub fn new(observation: impl Into<String>) -> Self {
        let observation = observation.into();
        let name = format!("ingest:{observation}");
        Self {
            observation,
            name,
            started: false,
            elapsed: 0,
        }
    }
}

impl Process for IngestProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, ctx: &mut StepContext<'_>) -> Result<Resumption, ProcessError> {
        let (status, duration, data_rate) = {
            let obs = ctx.observations().get(&self.observation).ok_or_else(|| {
                ProcessError::UnknownObservation {
                    observation: self.observation.clone(),
                }
            })?;
            (obs.status, obs.duration, obs.data_rate)
        };

        if !self.started {
            if status != RunStatus::Running {
                return Err(ProcessError::NotRunning {
                    observation: self.observation.clone(),
                    status,
                });
            }
            self.started = true;
        }

        if self.elapsed >= duration {
            // Zero-length observation: nothing ever staged.
            return Ok(Resumption::Complete);
        }

        let hot = ctx.buffer_mut().hot_mut();
        hot.reserve(data_rate)?;
        hot.track(&self.observation, data_rate);
        self.elapsed += 1;

        if self.elapsed >= duration {
            let staged = ctx.buffer().hot().staged(&self.observation).unwrap_or(0);
            if staged > 0 {
                ctx.spawn(Box::new(TransferProcess::new(self.observation.clone())));
            }
            return Ok(Resumption::Complete);
        }
        Ok(Resumption::Suspend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weir_buffer::Buffer;
    use weir_core::{Observation, PoolError, StepError, Tick};
    use weir_planner::Planner;
    use weir_test_utils::{buffer_with, running_observation, standard_buffer};

    use crate::sim::Simulation;
    use crate::state::SimState;

    fn sim_with(buffer: Buffer, observations: Vec<Observation>) -> Simulation {
        let mut state = SimState::new(buffer, weir_test_utils::cluster_of(1), Planner::default());
        for obs in observations {
            state.observations.insert(obs).unwrap();
        }
        Simulation::new(state)
    }

    #[test]
    fn reserves_at_the_observed_rate() {
        let mut sim = sim_with(standard_buffer(), vec![running_observation("emu", 5, 10)]);
        sim.spawn(Box::new(IngestProcess::new("emu")));

        sim.run_until(Tick(1)).unwrap();
        assert_eq!(sim.state().buffer.hot().current_capacity(), 495);

        sim.run_until(Tick(10)).unwrap();
        assert_eq!(sim.state().buffer.hot().current_capacity(), 450);
        assert_eq!(sim.state().buffer.hot().staged("emu"), Some(50));
    }

    #[test]
    fn tracks_residency_from_the_first_tick() {
        let mut sim = sim_with(standard_buffer(), vec![running_observation("emu", 5, 10)]);
        sim.spawn(Box::new(IngestProcess::new("emu")));
        sim.step().unwrap();
        assert!(sim.state().buffer.hot().contains("emu"));
        assert_eq!(sim.state().buffer.hot().staged("emu"), Some(5));
    }

    #[test]
    fn waiting_observation_fails_on_advance_not_creation() {
        let mut sim = sim_with(
            standard_buffer(),
            vec![weir_test_utils::observation("emu", 5, 10)],
        );
        // Creation only schedules; no validation yet.
        sim.spawn(Box::new(IngestProcess::new("emu")));
        assert_eq!(sim.live_processes(), 1);

        match sim.step() {
            Err(StepError::ProcessFailed { name, reason }) => {
                assert_eq!(name, "ingest:emu");
                match reason {
                    ProcessError::NotRunning {
                        observation,
                        status,
                    } => {
                        assert_eq!(observation, "emu");
                        assert_eq!(status, RunStatus::Waiting);
                    }
                    other => panic!("expected NotRunning, got {other:?}"),
                }
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
        assert_eq!(sim.now(), Tick::ZERO);
        assert_eq!(sim.state().buffer.hot().current_capacity(), 500);
    }

    #[test]
    fn unknown_observation_fails_on_advance() {
        let mut sim = sim_with(standard_buffer(), vec![]);
        sim.spawn(Box::new(IngestProcess::new("ghost")));
        match sim.step() {
            Err(StepError::ProcessFailed { reason, .. }) => {
                assert!(matches!(reason, ProcessError::UnknownObservation { .. }));
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
    }

    #[test]
    fn rate_over_cap_is_a_protocol_violation() {
        let mut sim = sim_with(standard_buffer(), vec![running_observation("emu", 6, 10)]);
        sim.spawn(Box::new(IngestProcess::new("emu")));
        match sim.step() {
            Err(StepError::ProcessFailed { reason, .. }) => match reason {
                ProcessError::Pool(PoolError::RateExceeded {
                    requested,
                    rate_cap,
                    ..
                }) => {
                    assert_eq!(requested, 6);
                    assert_eq!(rate_cap, 5);
                }
                other => panic!("expected RateExceeded, got {other:?}"),
            },
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
        assert_eq!(sim.state().buffer.hot().current_capacity(), 500);
    }

    #[test]
    fn exhausting_the_hot_store_is_fatal() {
        let mut sim = sim_with(
            buffer_with(4, 5, 250, 2),
            vec![running_observation("emu", 3, 2)],
        );
        sim.spawn(Box::new(IngestProcess::new("emu")));
        sim.step().unwrap();
        assert_eq!(sim.state().buffer.hot().current_capacity(), 1);

        match sim.step() {
            Err(StepError::ProcessFailed { reason, .. }) => {
                assert!(matches!(
                    reason,
                    ProcessError::Pool(PoolError::CapacityExhausted { .. })
                ));
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
        // The rejected reserve left the counter alone.
        assert_eq!(sim.state().buffer.hot().current_capacity(), 1);
    }

    #[test]
    fn zero_duration_completes_without_staging() {
        let mut sim = sim_with(standard_buffer(), vec![running_observation("emu", 5, 0)]);
        sim.spawn(Box::new(IngestProcess::new("emu")));
        sim.step().unwrap();
        assert_eq!(sim.live_processes(), 0);
        assert_eq!(sim.state().buffer.hot().current_capacity(), 500);
        assert!(!sim.state().buffer.hot().contains("emu"));
    }

    #[test]
    fn zero_rate_completes_without_handover() {
        let mut sim = sim_with(standard_buffer(), vec![running_observation("emu", 0, 2)]);
        sim.spawn(Box::new(IngestProcess::new("emu")));
        sim.run_until(Tick(2)).unwrap();
        // Resident with nothing staged; no transfer was spawned.
        assert_eq!(sim.state().buffer.hot().staged("emu"), Some(0));
        assert_eq!(sim.live_processes(), 0);
    }

    #[test]
    fn completion_hands_over_to_transfer() {
        let mut sim = sim_with(standard_buffer(), vec![running_observation("emu", 2, 3)]);
        sim.spawn(Box::new(IngestProcess::new("emu")));
        sim.run_until(Tick(3)).unwrap();
        // Ingest finished; the transfer is scheduled but has not run.
        assert_eq!(sim.live_processes(), 1);
        assert_eq!(sim.state().buffer.hot().staged("emu"), Some(6));
        assert_eq!(sim.state().buffer.cold().current_capacity(), 250);
    }

    #[test]
    fn concurrent_ingests_accumulate_additively() {
        let mut sim = sim_with(
            standard_buffer(),
            vec![
                running_observation("emu", 2, 4),
                running_observation("dingo", 3, 4),
            ],
        );
        sim.spawn(Box::new(IngestProcess::new("emu")));
        sim.spawn(Box::new(IngestProcess::new("dingo")));
        sim.run_until(Tick(4)).unwrap();

        // (2 + 3) units per tick for 4 ticks against one pool.
        assert_eq!(sim.state().buffer.hot().current_capacity(), 480);
        assert_eq!(sim.state().buffer.hot().staged("emu"), Some(8));
        assert_eq!(sim.state().buffer.hot().staged("dingo"), Some(12));
        let residents: Vec<&str> = sim.state().buffer.hot().observations().collect();
        assert_eq!(residents, ["emu", "dingo"]);
    }
}
