//! Projection of propagated body states into drawable geometry.
//!
//! The renderer owns no display backend: a [`Frame`] is plain geometry
//! (points for bodies, polylines for orbits) for an external plotting or
//! image-encoding collaborator to consume.

use na::Point3;
use serde::Serialize;

use crate::body::Body;
use crate::propagator::{ConvergenceError, OrbitPropagator, OrbitalState, SolverConfig};
use crate::system::System;
use crate::units::{Angle, Length, Time};

/// Number of samples along a full orbit polyline.
pub const DEFAULT_ORBIT_SAMPLES: usize = 1000;

/// Where the camera sits: on the central star, or riding a named body
/// (every position is re-centered on it).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Viewpoint {
    #[default]
    Sun,
    Body(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Project inclination into the z axis; otherwise everything is
    /// drawn flat in the ecliptic.
    pub spatial: bool,
    pub orbit_samples: usize,
    pub viewpoint: Viewpoint,
    pub solver: SolverConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            spatial: false,
            orbit_samples: DEFAULT_ORBIT_SAMPLES,
            viewpoint: Viewpoint::Sun,
            solver: SolverConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Viewpoint body '{name}' is not part of system '{system}'")]
    UnknownOrigin { system: String, name: String },

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}

/// One body's rendered state within a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBody {
    pub name: String,
    /// In-plane position angle, from perihelion.
    pub angle: Angle,
    /// Distance from the central star.
    pub radius: Length,
    /// View-space position, AU.
    pub position: Point3<f64>,
    pub color: Option<String>,
    /// Display size hint, Earth radii.
    pub size: f64,
}

/// One rendered snapshot of every body at a simulation time.
///
/// Frames are ephemeral: recomputed each tick and never persisted.
/// Body order matches the system's insertion (display) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: Time,
    /// The central star in view space (non-zero under a body viewpoint).
    pub star_position: Point3<f64>,
    pub bodies: Vec<RenderedBody>,
}

impl Frame {
    pub fn body(&self, name: &str) -> Option<&RenderedBody> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

/// A closed orbit polyline (first point == last point).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<Point3<f64>>,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
    propagator: OrbitPropagator,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        let propagator = OrbitPropagator::new(config.solver);
        Renderer { config, propagator }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn propagator(&self) -> &OrbitPropagator {
        &self.propagator
    }

    /// Render every body of `system` at time `t`.
    pub fn render_frame(&self, system: &System, t: Time) -> Result<Frame, RenderError> {
        let mut bodies = Vec::with_capacity(system.len());
        for body in system.bodies() {
            let state = self.propagator.state_at(body, t)?;
            bodies.push(RenderedBody {
                name: body.name().to_string(),
                angle: state.angle,
                radius: state.radius,
                position: self.project(body, &state),
                color: body.color().map(str::to_string),
                size: body.radius(),
            });
        }

        let origin = match &self.config.viewpoint {
            Viewpoint::Sun => Point3::origin(),
            Viewpoint::Body(name) => bodies
                .iter()
                .find(|b| &b.name == name)
                .map(|b| b.position)
                .ok_or_else(|| RenderError::UnknownOrigin {
                    system: system.name().to_string(),
                    name: name.clone(),
                })?,
        };

        for rendered in bodies.iter_mut() {
            rendered.position -= origin.coords;
        }

        Ok(Frame {
            time: t,
            star_position: Point3::origin() - origin.coords,
            bodies,
        })
    }

    /// Closed orbit polylines for every body, centered on the star.
    pub fn orbit_paths(&self, system: &System) -> Vec<OrbitPath> {
        system
            .bodies()
            .iter()
            .map(|body| self.orbit_path(body))
            .collect()
    }

    pub fn orbit_path(&self, body: &Body) -> OrbitPath {
        let samples = self.config.orbit_samples.max(3);
        let a = body.semi_major_axis().as_au();
        let e = body.eccentricity();
        let semi_latus = a * (1.0 - e * e);

        let points = (0..=samples)
            .map(|i| {
                let theta = std::f64::consts::TAU * (i as f64) / (samples as f64);
                let r = semi_latus / (1.0 + e * theta.cos());
                let state = OrbitalState {
                    angle: Angle::from_radians(theta),
                    radius: Length::from_au(r),
                };
                self.project(body, &state)
            })
            .collect();

        OrbitPath {
            name: body.name().to_string(),
            color: body.color().map(str::to_string),
            points,
        }
    }

    fn project(&self, body: &Body, state: &OrbitalState) -> Point3<f64> {
        project_state(body, state, self.config.spatial)
    }
}

/// In-plane polar state into view space, tilting the orbital plane by the
/// body's inclination when rendering spatially.
pub(crate) fn project_state(body: &Body, state: &OrbitalState, spatial: bool) -> Point3<f64> {
    let (x, y) = state.in_plane();
    if spatial {
        let beta = body.inclination();
        Point3::new(x * beta.cos(), y, x * beta.sin())
    } else {
        Point3::new(x, y, 0.0)
    }
}
