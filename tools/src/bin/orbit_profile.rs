// cargo run --bin orbit-profile --release -- --body Earth --duration 730.5 --dt 1.0 /tmp/earth_track.txt

use clap::Parser;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use solarkit_lib::{
    propagator::{OrbitPropagator, SolverConfig},
    scenario,
    units::Time,
};

/// Print one body's track (angle, radius, plane position) over time
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The built-in nine-planet system is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Body name
    #[arg(short, long)]
    body: String,

    /// Duration in days
    #[arg(short = 'd', long)]
    duration: f64,

    /// Time step (dt) in days
    #[arg(short = 't', long)]
    dt: f64,

    /// Kepler solver tolerance in radians
    #[arg(long, default_value_t = 1e-8)]
    tolerance: f64,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let system = scenario::load(opts.scenario.as_ref())?;
    let body = system
        .body(&opts.body)
        .expect("Body with provided name doesn't exist in the scenario");

    let propagator = OrbitPropagator::new(SolverConfig {
        tolerance: opts.tolerance,
        ..SolverConfig::default()
    });

    let mut output = File::create(opts.output)?;

    let mut time = Time::zero();
    let dt = Time::from_days(opts.dt);

    loop {
        if time.as_days() >= opts.duration {
            break;
        }

        let state = propagator.state_at(body, time)?;
        let (x, y) = state.in_plane();

        writeln!(
            &mut output,
            "{} {} {} {} {}",
            time.as_days(),
            state.angle.as_radians(),
            state.radius.as_au(),
            x,
            y
        )?;

        time += dt;
    }

    Ok(())
}
