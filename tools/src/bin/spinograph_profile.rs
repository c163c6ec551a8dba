// cargo run --bin spinograph-profile --release -- --select "Venus|Earth" --samples 1234 /tmp/spiro.txt

use clap::Parser;
use regex::Regex;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use solarkit_lib::{scenario, spinograph::Spinograph, units::Time};

/// Print spinograph trace samples (time, relative angle, chord endpoints)
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The built-in nine-planet system is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Keep only bodies whose name matches this regular expression
    #[arg(short, long)]
    select: Option<String>,

    /// Number of samples to emit
    #[arg(short = 'n', long, default_value_t = 1234)]
    samples: usize,

    /// Time step in days (the classic forty-orbit sweep when omitted)
    #[arg(short = 't', long)]
    dt: Option<f64>,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let system = scenario::load(opts.scenario.as_ref())?;

    let selection: Vec<&str> = match opts.select.as_deref() {
        Some(pattern) => {
            let re = Regex::new(pattern)?;
            system
                .bodies()
                .iter()
                .map(|b| b.name())
                .filter(|name| re.is_match(name))
                .collect()
        }
        None => Vec::new(),
    };

    let mut trace = match opts.dt {
        Some(dt) => Spinograph::new(&system, &selection, Time::from_days(dt))?,
        None => Spinograph::standard(&system, &selection)?,
    };

    let mut output = File::create(opts.output)?;

    for sample in trace.take_samples(opts.samples)? {
        write!(
            &mut output,
            "{} {}",
            sample.time.as_days(),
            sample.relative_angle.as_radians()
        )?;
        for point in &sample.chord {
            write!(&mut output, " {} {}", point.x, point.y)?;
        }
        writeln!(&mut output)?;
    }

    Ok(())
}
