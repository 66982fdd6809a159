//! Determinism verification through recorded traces.
//!
//! Records a full staging run (ingest, transfer, planning, dispatch)
//! to an in-memory trace, then replays the scenario and checks the
//! trace pins down exactly where, if anywhere, two runs disagree.

use std::path::PathBuf;

use weir_core::Tick;
use weir_engine::{DispatchProcess, IngestProcess, Simulation, SimState};
use weir_planner::Planner;
use weir_trace::{verify_trace, TraceDivergence, TraceHeader, TraceReader, TraceRow, TraceWriter};

// ── Helpers ─────────────────────────────────────────────────────

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

/// The header matching [`weir_test_utils::standard_buffer`].
fn standard_header() -> TraceHeader {
    TraceHeader {
        hot_capacity: 500,
        hot_rate: 5,
        cold_capacity: 250,
        cold_rate: 2,
    }
}

/// One running observation staged through the whole pipeline.
fn pipeline_sim(data_rate: u64) -> Simulation {
    let mut obs = weir_test_utils::running_observation("emu", data_rate, 10);
    obs.workflow = fixture("workflow.json");

    let mut state = SimState::new(
        weir_test_utils::standard_buffer(),
        weir_test_utils::cluster_of(1),
        Planner::default(),
    );
    state.observations.insert(obs).unwrap();

    let mut sim = Simulation::new(state);
    sim.spawn(Box::new(IngestProcess::new("emu")));
    sim.spawn(Box::new(DispatchProcess::first_fit(1)));
    sim
}

/// Snapshot the pipeline after a step, as one trace row.
fn capture(sim: &Simulation, tick: Tick) -> TraceRow {
    let state = sim.state();
    TraceRow {
        tick,
        hot: state.buffer.hot().current_capacity(),
        cold: state.buffer.cold().current_capacity(),
        queued: state.buffer.observations_for_processing().len(),
        live: sim.live_processes(),
    }
}

/// Run the scenario to completion, recording one row per tick.
fn record_run(data_rate: u64) -> Vec<u8> {
    let mut sim = pipeline_sim(data_rate);
    let mut writer = TraceWriter::new(Vec::new(), &standard_header()).unwrap();
    while sim.live_processes() > 0 {
        let metrics = sim.step().unwrap();
        writer.write_row(&capture(&sim, metrics.tick)).unwrap();
    }
    writer.into_inner()
}

/// Replay a fresh run of the scenario against a recorded trace.
fn verify_against(buf: &[u8], data_rate: u64) -> Option<TraceDivergence> {
    let reader = TraceReader::open(buf).unwrap();
    let mut sim = pipeline_sim(data_rate);
    verify_trace(reader, &mut |_| {
        let metrics = sim.step().unwrap();
        Ok(capture(&sim, metrics.tick))
    })
    .unwrap()
}

// ═══ Identical runs ═════════════════════════════════════════════

/// Two runs of the same scenario must produce identical traces.
#[test]
fn identical_runs_verify_clean() {
    let buf = record_run(2);
    assert!(verify_against(&buf, 2).is_none());
}

/// The recorded run covers the whole pipeline: ingest through the
/// final dispatch, one row per tick.
#[test]
fn trace_length_matches_the_run() {
    let buf = record_run(2);
    let reader = TraceReader::open(buf.as_slice()).unwrap();
    assert_eq!(reader.header(), &standard_header());

    let rows: Vec<_> = reader.rows().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(rows.len(), 22);
    assert_eq!(rows[0].tick, Tick(0));
    assert_eq!(rows[0].hot, 498);
    // The final row: everything staged cold, queue drained, schedule
    // empty.
    let last = rows.last().unwrap();
    assert_eq!(last.tick, Tick(21));
    assert_eq!(last.hot, 500);
    assert_eq!(last.cold, 230);
    assert_eq!(last.queued, 0);
    assert_eq!(last.live, 0);
}

// ═══ Divergence detection ═══════════════════════════════════════

/// A run with a different data rate diverges at the very first tick.
#[test]
fn different_scenario_diverges_at_tick_zero() {
    let buf = record_run(2);
    let divergence = verify_against(&buf, 3).unwrap();
    assert_eq!(divergence.tick, Tick::ZERO);
    assert_eq!(divergence.recorded.hot, 498);
    assert_eq!(divergence.replayed.hot, 497);
}

/// A single tampered row is caught at exactly its tick.
#[test]
fn tampered_row_is_caught_at_its_tick() {
    let buf = record_run(2);
    let text = String::from_utf8(buf).unwrap();
    // Hot capacity reads 480 exactly once, at the last ingest tick;
    // every other even value appears again while transfer drains.
    assert_eq!(text.matches("\"hot\":480").count(), 1);
    let tampered = text.replace("\"hot\":480", "\"hot\":479");

    let divergence = verify_against(tampered.as_bytes(), 2).unwrap();
    assert_eq!(divergence.tick, Tick(9));
    assert_eq!(divergence.recorded.hot, 479);
    assert_eq!(divergence.replayed.hot, 480);
}
