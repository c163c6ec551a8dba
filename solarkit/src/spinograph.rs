//! Spinograph traces.
//!
//! A spinograph is the looping pattern drawn by the chord between two or
//! more orbiting bodies, sampled at a fixed time step over many orbits.
//! The trace is a lazy sequence: callers pull as many samples as they
//! want, later pulls continue where the previous ones stopped, and
//! rewinding is an explicit [`Spinograph::reset`].

use na::Point3;
use serde::Serialize;

use crate::body::Body;
use crate::propagator::{ConvergenceError, OrbitPropagator, SolverConfig};
use crate::render::project_state;
use crate::system::System;
use crate::units::{Angle, Time};

/// Full sweep length in orbits of the outermost selected body.
pub const TRACE_ORBITS: f64 = 40.0;

/// Sample count for a full sweep.
pub const TRACE_SAMPLES: usize = 1234;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpinographError {
    #[error("System '{system}' has no body named '{body}'")]
    UnknownBody { system: String, body: String },

    #[error("A spinograph needs at least two bodies, got {got}")]
    TooFewBodies { got: usize },

    #[error("Spinograph step must be non-zero")]
    ZeroStep,
}

/// One trace sample: the chord through the selected bodies' positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinographSample {
    pub time: Time,
    /// View-space positions of the selected bodies, in selection order.
    pub chord: Vec<Point3<f64>>,
    /// Angle of the first selected body minus the last, wrapped into
    /// [0, 2π).
    pub relative_angle: Angle,
}

#[derive(Debug, Clone)]
pub struct Spinograph {
    bodies: Vec<Body>,
    propagator: OrbitPropagator,
    spatial: bool,
    step: Time,
    next_index: u64,
}

impl Spinograph {
    /// Trace the bodies named in `selection` (all of `system` when empty),
    /// sampling every `step`. A negative step runs the pattern backwards.
    pub fn new(
        system: &System,
        selection: &[&str],
        step: Time,
    ) -> Result<Self, SpinographError> {
        Self::with_solver(system, selection, step, SolverConfig::default(), false)
    }

    pub fn with_solver(
        system: &System,
        selection: &[&str],
        step: Time,
        solver: SolverConfig,
        spatial: bool,
    ) -> Result<Self, SpinographError> {
        if step.as_days() == 0.0 {
            return Err(SpinographError::ZeroStep);
        }

        let bodies: Vec<Body> = if selection.is_empty() {
            system.bodies().to_vec()
        } else {
            selection
                .iter()
                .map(|&name| {
                    system.body(name).cloned().ok_or_else(|| {
                        SpinographError::UnknownBody {
                            system: system.name().to_string(),
                            body: name.to_string(),
                        }
                    })
                })
                .collect::<Result<_, _>>()?
        };

        if bodies.len() < 2 {
            return Err(SpinographError::TooFewBodies { got: bodies.len() });
        }

        Ok(Spinograph {
            bodies,
            propagator: OrbitPropagator::new(solver),
            spatial,
            step,
            next_index: 0,
        })
    }

    /// The classic sweep: forty orbits of the outermost selected body,
    /// split into [`TRACE_SAMPLES`] steps.
    pub fn standard(system: &System, selection: &[&str]) -> Result<Self, SpinographError> {
        // Probe with a placeholder step, then derive the real one from the
        // selected bodies.
        let mut trace = Self::new(system, selection, Time::from_days(1.0))?;
        let longest = trace
            .bodies
            .iter()
            .map(|b| b.orbital_period().as_days())
            .fold(0.0f64, f64::max);
        trace.step = Time::from_days(TRACE_ORBITS * longest / (TRACE_SAMPLES as f64));
        Ok(trace)
    }

    pub fn step(&self) -> Time {
        self.step
    }

    /// Number of samples already produced since the last reset.
    pub fn samples_taken(&self) -> u64 {
        self.next_index
    }

    /// Produce the next sample. A solver failure aborts the sample and
    /// leaves the cursor unchanged.
    pub fn next_sample(&mut self) -> Result<SpinographSample, ConvergenceError> {
        let t = self.step * (self.next_index as f64);

        let mut chord = Vec::with_capacity(self.bodies.len());
        let mut first_angle = Angle::zero();
        let mut last_angle = Angle::zero();
        for (i, body) in self.bodies.iter().enumerate() {
            let state = self.propagator.state_at(body, t)?;
            if i == 0 {
                first_angle = state.angle;
            }
            last_angle = state.angle;
            chord.push(project_state(body, &state, self.spatial));
        }

        self.next_index += 1;
        Ok(SpinographSample {
            time: t,
            chord,
            relative_angle: (first_angle - last_angle).normalized(),
        })
    }

    /// Pull `n` further samples, continuing after whatever was already
    /// produced.
    pub fn take_samples(&mut self, n: usize) -> Result<Vec<SpinographSample>, ConvergenceError> {
        let mut samples = Vec::with_capacity(n);
        for _ in 0..n {
            samples.push(self.next_sample()?);
        }
        Ok(samples)
    }

    /// Rewind the trace to t = 0.
    pub fn reset(&mut self) {
        self.next_index = 0;
    }
}

impl Iterator for Spinograph {
    type Item = Result<SpinographSample, ConvergenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::tests::body_with;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    fn pair() -> System {
        let mut sys = System::new("Pair");
        sys.add_body(body_with("Inner", 1.0, 0.0, 100.0)).unwrap();
        sys.add_body(body_with("Outer", 2.0, 0.0, 200.0)).unwrap();
        sys
    }

    #[test]
    fn relative_angle_of_a_circular_pair() {
        let mut trace = Spinograph::new(&pair(), &["Inner", "Outer"], Time::from_days(25.0)).unwrap();

        let s0 = trace.next_sample().unwrap();
        assert_relative_eq!(s0.time.as_days(), 0.0);
        assert_relative_eq!(s0.relative_angle.as_radians(), 0.0);

        // t=25: inner at π/2, outer at π/4.
        let s1 = trace.next_sample().unwrap();
        assert_relative_eq!(s1.relative_angle.as_radians(), FRAC_PI_4, epsilon = 1e-12);
        assert_eq!(s1.chord.len(), 2);
        assert_relative_eq!(s1.chord[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s1.chord[0].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(s1.chord[1].x, 2.0 * FRAC_PI_4.cos(), epsilon = 1e-12);
    }

    #[test]
    fn samples_resume_without_recomputation() {
        let step = Time::from_days(7.0);
        let mut split = Spinograph::new(&pair(), &[], step).unwrap();
        let mut straight = Spinograph::new(&pair(), &[], step).unwrap();

        let mut collected = split.take_samples(5).unwrap();
        collected.extend(split.take_samples(5).unwrap());
        let expected = straight.take_samples(10).unwrap();

        assert_eq!(collected, expected);
        assert_eq!(split.samples_taken(), 10);
    }

    #[test]
    fn reset_replays_the_trace_from_zero() {
        let mut trace = Spinograph::new(&pair(), &[], Time::from_days(3.0)).unwrap();
        let first_run = trace.take_samples(4).unwrap();

        trace.reset();
        assert_eq!(trace.samples_taken(), 0);
        assert_eq!(trace.take_samples(4).unwrap(), first_run);
    }

    #[test]
    fn empty_selection_uses_every_body() {
        let trace = Spinograph::new(&pair(), &[], Time::from_days(1.0)).unwrap();
        assert_eq!(trace.bodies.len(), 2);
    }

    #[test]
    fn unknown_selection_is_an_error() {
        let err = Spinograph::new(&pair(), &["Inner", "Vulcan"], Time::from_days(1.0)).unwrap_err();
        assert!(matches!(
            err,
            SpinographError::UnknownBody { ref body, .. } if body == "Vulcan"
        ));
    }

    #[test]
    fn fewer_than_two_bodies_is_an_error() {
        let err = Spinograph::new(&pair(), &["Inner"], Time::from_days(1.0)).unwrap_err();
        assert!(matches!(err, SpinographError::TooFewBodies { got: 1 }));
    }

    #[test]
    fn zero_step_is_an_error() {
        let err = Spinograph::new(&pair(), &[], Time::zero()).unwrap_err();
        assert!(matches!(err, SpinographError::ZeroStep));
    }

    #[test]
    fn standard_sweep_covers_forty_outer_orbits() {
        let trace = Spinograph::standard(&pair(), &[]).unwrap();
        assert_relative_eq!(
            trace.step().as_days(),
            40.0 * 200.0 / 1234.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn backwards_step_is_allowed() {
        let mut trace = Spinograph::new(&pair(), &[], Time::from_days(-25.0)).unwrap();
        trace.next_sample().unwrap();
        let s1 = trace.next_sample().unwrap();
        assert_relative_eq!(s1.time.as_days(), -25.0);
        // Inner body a quarter period before t=0 sits at 3π/2.
        assert_relative_eq!(
            s1.chord[0].y,
            -1.0,
            epsilon = 1e-12
        );
    }
}
