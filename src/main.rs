// --- File: main.rs ---
// --- Headless driver ---
//
// Usage: physarum [seed] [pattern]
// Runs a random configuration for a fixed number of steps and logs the trail
// mass of every species. Set RUST_LOG=info (or debug/trace) to see output.

use physarum::constants::{
    DEMO_HEIGHT, DEMO_PARTICLES, DEMO_REPORT_INTERVAL, DEMO_STEPS, DEMO_WIDTH,
};
use physarum::{InitPattern, Simulation, SimulationConfig};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs(),
    };
    let mut config = SimulationConfig {
        width: DEMO_WIDTH,
        height: DEMO_HEIGHT,
        particles: DEMO_PARTICLES,
        ..SimulationConfig::random(seed)
    };
    if let Some(tag) = args.next() {
        config.pattern = tag.parse::<InitPattern>()?;
    }

    let mut simulation = Simulation::new(config)?;
    let started = Instant::now();
    let mut last_report = Instant::now();
    for step in 1..=DEMO_STEPS {
        simulation.step();
        if step % DEMO_REPORT_INTERVAL == 0 {
            let elapsed = last_report.elapsed().as_secs_f64();
            last_report = Instant::now();
            let masses: Vec<String> = simulation
                .grids()
                .iter()
                .map(|g| format!("{:.0}", g.total_mass()))
                .collect();
            log::info!(
                "step {:>5} | {:>7.1} steps/s | mass [{}]",
                simulation.iteration(),
                DEMO_REPORT_INTERVAL as f64 / elapsed,
                masses.join(", ")
            );
        }
    }
    log::info!(
        "Finished {} steps in {:.2?} (seed {}, pattern {})",
        DEMO_STEPS,
        started.elapsed(),
        simulation.seed(),
        simulation.pattern()
    );
    Ok(())
}
