//! The built-in nine-planet system, used whenever no scenario file is
//! supplied. Elements are the usual JPL fact-sheet values: masses in
//! Earth masses, semi-major axes in AU, inclinations to the ecliptic,
//! rotation and orbital periods in days. All bodies start at their
//! perihelion (zero initial phase).

use crate::body::{Body, BodyParams};
use crate::system::System;
use crate::units::{Angle, Length, Mass, Time};

struct Row {
    name: &'static str,
    mass: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    radius: f64,
    rotational_period: f64,
    orbital_period: f64,
    color: &'static str,
}

const PLANETS: &[Row] = &[
    Row {
        name: "Mercury",
        mass: 0.0553,
        semi_major_axis: 0.387,
        eccentricity: 0.2056,
        inclination_deg: 7.005,
        radius: 0.383,
        rotational_period: 58.65,
        orbital_period: 87.97,
        color: "darkgray",
    },
    Row {
        name: "Venus",
        mass: 0.815,
        semi_major_axis: 0.723,
        eccentricity: 0.0068,
        inclination_deg: 3.395,
        radius: 0.949,
        rotational_period: -243.02,
        orbital_period: 224.70,
        color: "orange",
    },
    Row {
        name: "Earth",
        mass: 1.0,
        semi_major_axis: 1.0,
        eccentricity: 0.0167,
        inclination_deg: 0.0,
        radius: 1.0,
        rotational_period: 1.0,
        orbital_period: 365.25,
        color: "royalblue",
    },
    Row {
        name: "Mars",
        mass: 0.107,
        semi_major_axis: 1.524,
        eccentricity: 0.0934,
        inclination_deg: 1.850,
        radius: 0.532,
        rotational_period: 1.026,
        orbital_period: 686.98,
        color: "red",
    },
    Row {
        name: "Jupiter",
        mass: 317.8,
        semi_major_axis: 5.203,
        eccentricity: 0.0484,
        inclination_deg: 1.303,
        radius: 11.21,
        rotational_period: 0.414,
        orbital_period: 4332.59,
        color: "peru",
    },
    Row {
        name: "Saturn",
        mass: 95.2,
        semi_major_axis: 9.537,
        eccentricity: 0.0542,
        inclination_deg: 2.489,
        radius: 9.45,
        rotational_period: 0.444,
        orbital_period: 10759.22,
        color: "khaki",
    },
    Row {
        name: "Uranus",
        mass: 14.5,
        semi_major_axis: 19.19,
        eccentricity: 0.0472,
        inclination_deg: 0.773,
        radius: 4.01,
        rotational_period: -0.718,
        orbital_period: 30688.5,
        color: "turquoise",
    },
    Row {
        name: "Neptune",
        mass: 17.1,
        semi_major_axis: 30.07,
        eccentricity: 0.0086,
        inclination_deg: 1.770,
        radius: 3.88,
        rotational_period: 0.671,
        orbital_period: 60182.0,
        color: "steelblue",
    },
    Row {
        name: "Pluto",
        mass: 0.0022,
        semi_major_axis: 39.48,
        eccentricity: 0.2488,
        inclination_deg: 17.16,
        radius: 0.187,
        rotational_period: -6.387,
        orbital_period: 90560.0,
        color: "rosybrown",
    },
];

pub fn system() -> System {
    let mut system = System::new("Solar System");
    for row in PLANETS {
        let body = Body::new(BodyParams {
            name: row.name.to_string(),
            mass: Mass::from_earth_masses(row.mass),
            semi_major_axis: Length::from_au(row.semi_major_axis),
            eccentricity: row.eccentricity,
            inclination: Angle::from_degrees(row.inclination_deg),
            radius: row.radius,
            rotational_period: Time::from_days(row.rotational_period),
            orbital_period: Time::from_days(row.orbital_period),
            initial_phase: Angle::zero(),
            color: Some(row.color.to_string()),
        })
        .expect("nominal planet table is valid");
        system
            .add_body(body)
            .expect("nominal planet table has unique names");
    }
    system
}
