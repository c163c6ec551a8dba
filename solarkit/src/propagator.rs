//! Closed-form orbit propagation.
//!
//! Positions are a pure function of (body, time): the same inputs always
//! produce the same output, forwards or backwards in time. Circular orbits
//! take the direct path; eccentric orbits go through Kepler's equation
//! M = E - e·sin(E), solved by Newton's method against a configured
//! tolerance and iteration cap.

use serde::Serialize;

use crate::body::Body;
use crate::units::{Angle, Length, Time};

/// Kepler solver settings. The defaults are defaults, not requirements.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold on the Newton step, in radians.
    pub tolerance: f64,
    /// Hard cap on Newton iterations; exceeding it is an error, never a
    /// silently wrong position.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-8,
            max_iterations: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error(
    "Body '{body}': Kepler solver failed to converge within {iterations} iterations \
     (e={eccentricity}, M={mean_anomaly} rad, tolerance={tolerance})"
)]
pub struct ConvergenceError {
    pub body: String,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
    pub iterations: u32,
    pub tolerance: f64,
}

/// In-plane polar state of a body at some time.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct OrbitalState {
    /// Position angle in the orbital plane, measured from perihelion,
    /// wrapped into [0, 2π).
    pub angle: Angle,
    /// Distance from the focus.
    pub radius: Length,
}

impl OrbitalState {
    /// Cartesian position in the orbital plane, AU.
    pub fn in_plane(&self) -> (f64, f64) {
        let r = self.radius.as_au();
        (r * self.angle.cos(), r * self.angle.sin())
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OrbitPropagator {
    solver: SolverConfig,
}

impl OrbitPropagator {
    pub fn new(solver: SolverConfig) -> Self {
        OrbitPropagator { solver }
    }

    pub fn solver(&self) -> SolverConfig {
        self.solver
    }

    /// State of `body` at simulation time `t` (days, may be negative).
    pub fn state_at(&self, body: &Body, t: Time) -> Result<OrbitalState, ConvergenceError> {
        let mean_anomaly = (body.initial_phase() + body.mean_motion() * t).normalized();

        if body.is_circular() {
            return Ok(OrbitalState {
                angle: mean_anomaly,
                radius: body.semi_major_axis(),
            });
        }

        let e = body.eccentricity();
        let ea = self.eccentric_anomaly(body, mean_anomaly.as_radians())?;

        // True anomaly via the atan2 half-angle form, which stays finite at
        // E = π where tan(E/2) blows up.
        let nu = 2.0 * f64::atan2(
            (1.0 + e).sqrt() * (ea / 2.0).sin(),
            (1.0 - e).sqrt() * (ea / 2.0).cos(),
        );
        let radius = body.semi_major_axis() * (1.0 - e * ea.cos());

        Ok(OrbitalState {
            angle: Angle::from_radians(nu).normalized(),
            radius,
        })
    }

    /// Solve M = E - e·sin(E) for E by Newton's method.
    fn eccentric_anomaly(&self, body: &Body, mean_anomaly: f64) -> Result<f64, ConvergenceError> {
        let e = body.eccentricity();

        // The M seed diverges for near-radial orbits; π is a safe start there.
        let mut ea = if e < 0.8 {
            mean_anomaly
        } else {
            std::f64::consts::PI
        };

        for _ in 0..self.solver.max_iterations {
            let f = ea - e * ea.sin() - mean_anomaly;
            let fp = 1.0 - e * ea.cos();
            let delta = f / fp;
            ea -= delta;

            if delta.abs() < self.solver.tolerance {
                return Ok(ea);
            }
        }

        Err(ConvergenceError {
            body: body.name().to_string(),
            eccentricity: e,
            mean_anomaly,
            iterations: self.solver.max_iterations,
            tolerance: self.solver.tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::tests::{body_with, earth};
    use crate::body::{Body, BodyParams};
    use crate::units::Mass;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn repeat_calls_are_bit_identical() {
        let prop = OrbitPropagator::default();
        let b = body_with("Halley", 17.8, 0.967, 27_003.0);
        let t = Time::from_days(1234.5);

        let first = prop.state_at(&b, t).unwrap();
        let second = prop.state_at(&b, t).unwrap();
        assert_eq!(first.angle.as_radians(), second.angle.as_radians());
        assert_eq!(first.radius.as_au(), second.radius.as_au());
    }

    #[test]
    fn circular_orbit_reference_positions() {
        let prop = OrbitPropagator::default();
        let b = earth();

        let start = prop.state_at(&b, Time::zero()).unwrap();
        assert_relative_eq!(start.angle.as_radians(), 0.0);
        assert_relative_eq!(start.radius.as_au(), 1.0);

        let half = prop.state_at(&b, Time::from_days(182.625)).unwrap();
        assert_relative_eq!(half.angle.as_radians(), PI, epsilon = 1e-12);
        assert_relative_eq!(half.radius.as_au(), 1.0);
    }

    #[test]
    fn circular_orbit_is_periodic() {
        let prop = OrbitPropagator::default();
        let b = earth();

        for t_days in [0.0, 17.25, 100.0, 301.9] {
            let t = Time::from_days(t_days);
            let first = prop.state_at(&b, t).unwrap();
            let second = prop
                .state_at(&b, t + Time::from_days(365.25))
                .unwrap();
            // Compare as an angular distance so wrap-around at 0/2π
            // doesn't matter.
            let diff = (first.angle - second.angle).normalized().as_radians();
            let dist = diff.min(TAU - diff);
            assert!(dist < 1e-9, "t={t_days}: angular distance {dist}");
        }
    }

    #[test]
    fn negative_time_runs_the_orbit_backwards() {
        let prop = OrbitPropagator::default();
        let b = earth();

        // A quarter period before t=0 sits at 3π/2.
        let s = prop.state_at(&b, Time::from_days(-365.25 / 4.0)).unwrap();
        assert_relative_eq!(s.angle.as_radians(), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn initial_phase_offsets_the_start_angle() {
        let prop = OrbitPropagator::default();
        let b = Body::new(BodyParams {
            name: "Shifted".to_string(),
            mass: Mass::from_earth_masses(1.0),
            semi_major_axis: Length::from_au(1.0),
            eccentricity: 0.0,
            inclination: Angle::zero(),
            radius: 1.0,
            rotational_period: Time::from_days(1.0),
            orbital_period: Time::from_days(100.0),
            initial_phase: Angle::from_radians(FRAC_PI_2),
            color: None,
        })
        .unwrap();

        let s = prop.state_at(&b, Time::zero()).unwrap();
        assert_relative_eq!(s.angle.as_radians(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn eccentric_orbit_apsides() {
        let prop = OrbitPropagator::default();
        let b = body_with("Test", 1.0, 0.5, 365.25);

        // Perihelion: M=0 ⇒ E=0 ⇒ ν=0, r = a(1-e).
        let peri = prop.state_at(&b, Time::zero()).unwrap();
        assert_relative_eq!(peri.angle.as_radians(), 0.0, epsilon = 1e-8);
        assert_relative_eq!(peri.radius.as_au(), 0.5, epsilon = 1e-8);

        // Aphelion: M=π ⇒ E=π ⇒ ν=π, r = a(1+e).
        let apo = prop.state_at(&b, Time::from_days(365.25 / 2.0)).unwrap();
        assert_relative_eq!(apo.angle.as_radians(), PI, epsilon = 1e-8);
        assert_relative_eq!(apo.radius.as_au(), 1.5, epsilon = 1e-8);
    }

    #[test]
    fn kepler_equation_holds_for_solved_states() {
        let prop = OrbitPropagator::default();
        let b = body_with("Eccentric", 2.3, 0.72, 500.0);

        for t_days in [-250.0, 1.0, 77.7, 342.0] {
            let s = prop.state_at(&b, Time::from_days(t_days)).unwrap();
            // Invert ν back to E and check M = E - e·sin(E).
            let e = b.eccentricity();
            let nu = s.angle.as_radians();
            let ea = 2.0 * f64::atan2(
                (1.0 - e).sqrt() * (nu / 2.0).sin(),
                (1.0 + e).sqrt() * (nu / 2.0).cos(),
            );
            let m = ea - e * ea.sin();
            let expected = (b.initial_phase() + b.mean_motion() * Time::from_days(t_days))
                .normalized()
                .as_radians();
            let wrapped = Angle::from_radians(m).normalized().as_radians();
            let diff = (wrapped - expected).abs();
            assert!(diff < 1e-6 || (TAU - diff) < 1e-6, "t={t_days}: {wrapped} vs {expected}");
        }
    }

    #[test]
    fn near_parabolic_eccentricity_converges() {
        let prop = OrbitPropagator::default();
        let b = body_with("Sungrazer", 50.0, 0.999, 100_000.0);

        for t_days in [0.0, 12_500.0, 50_000.0, 90_000.0, -3_000.0] {
            assert!(prop.state_at(&b, Time::from_days(t_days)).is_ok(), "t={t_days}");
        }
    }

    #[test]
    fn iteration_cap_is_a_reported_error() {
        let prop = OrbitPropagator::new(SolverConfig {
            tolerance: 1e-8,
            max_iterations: 1,
        });
        let b = body_with("Stubborn", 1.0, 0.9, 365.25);

        let err = prop
            .state_at(&b, Time::from_days(100.0))
            .unwrap_err();
        assert_eq!(err.body, "Stubborn");
        assert_eq!(err.iterations, 1);
        assert!(err.to_string().contains("Stubborn"));
    }

    #[test]
    fn in_plane_cartesian_matches_polar() {
        let s = OrbitalState {
            angle: Angle::from_radians(FRAC_PI_2),
            radius: Length::from_au(2.0),
        };
        let (x, y) = s.in_plane();
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 2.0, epsilon = 1e-12);
    }
}
