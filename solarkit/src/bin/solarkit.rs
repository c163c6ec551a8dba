use clap::Parser;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

use solarkit_lib::{
    animation::AnimationDriver,
    render::{Frame, Renderer, RendererConfig, Viewpoint},
    scenario,
    spinograph::Spinograph,
    system::System,
    units::Time,
    FrameSink,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file (a .csv extension selects the
    /// legacy planet-table importer).
    ///
    /// The built-in nine-planet system is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Keep only bodies whose name matches this regular expression
    #[arg(short, long)]
    select: Option<String>,

    /// What to produce (orbits, animate, spinograph)
    #[arg(short, long, default_value = "orbits")]
    mode: Mode,

    /// Center the view on this body instead of the star
    #[arg(long)]
    viewpoint: Option<String>,

    /// Project orbital inclination into the z axis
    #[arg(long)]
    spatial: bool,

    /// Simulation days advanced per animation tick
    #[arg(short = 't', long, default_value_t = 1.0)]
    dt: f64,

    /// Total simulated days for animate mode
    #[arg(short, long, default_value_t = 1461.0)]
    duration: f64,

    /// Wall-clock delay between animation ticks (e.g. 33ms)
    #[arg(long, default_value = "33ms")]
    tick_interval: humantime::Duration,

    /// Number of spinograph samples to emit
    #[arg(long, default_value_t = 1234)]
    samples: usize,

    /// Output file path for the JSON-lines geometry (stdout when omitted)
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Mode {
    Orbits,
    Animate,
    Spinograph,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "orbits" => Mode::Orbits,
            "animate" => Mode::Animate,
            "spinograph" => Mode::Spinograph,
            _ => return Err("Bad mode".to_string()),
        })
    }
}

/// Writes each frame as one JSON line; the display-side collaborator
/// turns these into plots or images.
struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn accept_frame(&mut self, frame: &Frame) {
        match serde_json::to_string(frame) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{line}") {
                    warn!(error = %e, "Failed to write frame");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode frame"),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let intr = interruptor::Interruptor::new();
    let intr_clone = intr.clone();
    ctrlc::set_handler(move || {
        if intr_clone.is_set() {
            std::process::exit(130);
        } else {
            intr_clone.set();
        }
    })?;

    let mut system = scenario::load(opts.scenario.as_ref())?;
    if let Some(pattern) = opts.select.as_deref() {
        let re = Regex::new(pattern)?;
        system = select_bodies(system, &re);
    }

    let renderer = Renderer::new(RendererConfig {
        spatial: opts.spatial,
        viewpoint: match opts.viewpoint.clone() {
            Some(name) => Viewpoint::Body(name),
            None => Viewpoint::Sun,
        },
        ..RendererConfig::default()
    });

    let writer: Box<dyn Write> = match opts.output.as_ref() {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = JsonLinesSink { writer };

    match opts.mode {
        Mode::Orbits => {
            for path in renderer.orbit_paths(&system) {
                let line = serde_json::to_string(&path)?;
                writeln!(sink.writer, "{line}")?;
            }
            let frame = renderer.render_frame(&system, Time::zero())?;
            sink.accept_frame(&frame);
        }
        Mode::Animate => {
            let mut driver = AnimationDriver::new(renderer);
            driver
                .start(system, Time::from_days(opts.dt))
                .expect("fresh driver can always start");

            let total_ticks = (opts.duration / opts.dt).ceil().max(0.0) as u64;
            for _ in 0..total_ticks {
                if intr.is_set() {
                    break;
                }
                driver.tick(&mut sink)?;
                std::thread::sleep(opts.tick_interval.into());
            }

            if let Some(sim) = driver.simulation() {
                eprintln!(
                    "Stopped after {} ticks at t = {:?}",
                    sim.ticks(),
                    sim.time()
                );
            }
            driver.stop();
        }
        Mode::Spinograph => {
            let mut trace = Spinograph::standard(&system, &[])?;
            for _ in 0..opts.samples {
                if intr.is_set() {
                    break;
                }
                let sample = trace.next_sample()?;
                let line = serde_json::to_string(&sample)?;
                writeln!(sink.writer, "{line}")?;
            }
        }
    }

    sink.writer.flush()?;
    Ok(())
}

fn select_bodies(system: System, pattern: &Regex) -> System {
    let mut filtered = System::with_creation_time(system.name().to_string(), system.created_at());
    for body in system.bodies() {
        if pattern.is_match(body.name()) {
            filtered
                .add_body(body.clone())
                .expect("selection preserves unique names");
        }
    }
    filtered
}

mod interruptor {
    use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    #[repr(transparent)]
    pub struct Interruptor(Arc<AtomicBool>);

    impl Interruptor {
        pub fn new() -> Self {
            Interruptor(Arc::new(AtomicBool::new(false)))
        }

        pub fn set(&self) {
            self.0.store(true, SeqCst);
        }

        pub fn is_set(&self) -> bool {
            self.0.load(SeqCst)
        }
    }
}
