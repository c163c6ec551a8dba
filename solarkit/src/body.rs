use serde::Serialize;

use crate::units::{Angle, AngularVelocity, Length, Mass, Time};

/// Construction parameters for a [`Body`].
///
/// `semi_major_axis` is heliocentric, in AU. `radius` is the body's own
/// mean radius in Earth radii, a display hint only. `rotational_period`
/// may be negative for retrograde rotators (e.g. Venus).
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParams {
    pub name: String,
    pub mass: Mass,
    pub semi_major_axis: Length,
    pub eccentricity: f64,
    pub inclination: Angle,
    pub radius: f64,
    pub rotational_period: Time,
    pub orbital_period: Time,
    pub initial_phase: Angle,
    pub color: Option<String>,
}

/// A celestial body's orbital elements and display hints.
///
/// Immutable once constructed; invariants are enforced by [`Body::new`]
/// and never silently clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    mass: Mass,
    semi_major_axis: Length,
    eccentricity: f64,
    inclination: Angle,
    radius: f64,
    rotational_period: Time,
    orbital_period: Time,
    initial_phase: Angle,
    color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum ValidationError {
    #[error("Body '{name}': semi-major axis must be strictly positive, got {value} au")]
    SemiMajorAxis { name: String, value: f64 },

    #[error("Body '{name}': orbital period must be strictly positive, got {value} days")]
    OrbitalPeriod { name: String, value: f64 },

    #[error("Body '{name}': eccentricity must be in [0, 1), got {value}")]
    Eccentricity { name: String, value: f64 },
}

impl Body {
    pub fn new(params: BodyParams) -> Result<Self, ValidationError> {
        let a = params.semi_major_axis.as_au();
        if !(a > 0.0) {
            return Err(ValidationError::SemiMajorAxis {
                name: params.name,
                value: a,
            });
        }

        let period = params.orbital_period.as_days();
        if !(period > 0.0) {
            return Err(ValidationError::OrbitalPeriod {
                name: params.name,
                value: period,
            });
        }

        let e = params.eccentricity;
        if !(0.0..1.0).contains(&e) {
            return Err(ValidationError::Eccentricity {
                name: params.name,
                value: e,
            });
        }

        Ok(Body {
            name: params.name,
            mass: params.mass,
            semi_major_axis: params.semi_major_axis,
            eccentricity: params.eccentricity,
            inclination: params.inclination,
            radius: params.radius,
            rotational_period: params.rotational_period,
            orbital_period: params.orbital_period,
            initial_phase: params.initial_phase,
            color: params.color,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn semi_major_axis(&self) -> Length {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> Angle {
        self.inclination
    }

    /// Mean radius in Earth radii (display hint).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn rotational_period(&self) -> Time {
        self.rotational_period
    }

    pub fn orbital_period(&self) -> Time {
        self.orbital_period
    }

    pub fn initial_phase(&self) -> Angle {
        self.initial_phase
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Mean motion n = 2π / P.
    pub fn mean_motion(&self) -> AngularVelocity {
        AngularVelocity::from_radians_per_day(
            std::f64::consts::TAU / self.orbital_period.as_days(),
        )
    }

    /// True when the orbit is treated as a perfect circle by the propagator.
    pub fn is_circular(&self) -> bool {
        self.eccentricity == 0.0
    }
}
