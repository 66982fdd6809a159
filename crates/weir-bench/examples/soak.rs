//! End-to-end staging soak run.
//!
//! Demonstrates: seed → synthetic workload → staged simulation → run
//! to idle → read buffer state → next episode.

use weir_bench::{staged_sim, synthetic_observations};
use weir_core::Tick;

fn main() {
    println!("=== Weir staging soak ===\n");

    println!("10 episodes, 12 observations onto 6 machines each");
    for episode in 0..10u64 {
        let observations = synthetic_observations(12, 1_000 + episode);
        let volume: u64 = observations.iter().map(|o| o.data_rate * o.duration).sum();

        let mut sim = staged_sim(observations, 6);
        let idle = sim.run_to_idle(Tick(100_000)).unwrap();

        let state = sim.state();
        println!(
            "  episode {episode}: {volume:>4} units staged, idle at tick {:>3}, \
             {:>2} still queued, last step {:>4}us",
            idle.0,
            state.buffer.observations_for_processing().len(),
            sim.last_metrics().total_us,
        );
    }

    println!("\nDone.");
}
