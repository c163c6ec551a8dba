//! TOML persistence for system configurations.
//!
//! The on-disk representation round-trips exactly: every numeric field is
//! stored in the same unit the in-memory model uses (angles in radians,
//! distances in AU, times in days), so save → load reproduces each body
//! bit for bit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::body::{Body, BodyParams, ValidationError};
use crate::system::{RegistryError, System};
use crate::units::{Angle, Length, Mass, Time};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize system configuration")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Body(#[from] ValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "body", default)]
    pub bodies: Vec<BodyConfig>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BodyConfig {
    pub name: String,
    /// Earth masses
    #[serde(default)]
    pub mass: f64,
    /// AU
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Radians
    #[serde(default)]
    pub inclination: f64,
    /// Earth radii
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Days; negative means retrograde rotation
    #[serde(default = "default_rotational_period")]
    pub rotational_period: f64,
    /// Days
    pub orbital_period: f64,
    /// Radians; mean anomaly at t = 0
    #[serde(default)]
    pub initial_phase: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_radius() -> f64 {
    1.0
}

fn default_rotational_period() -> f64 {
    1.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        let mut names = HashSet::new();
        for name in cfg.bodies.iter().map(|b| &b.name) {
            if !names.insert(name) {
                return Err(RegistryError::DuplicateName {
                    system: cfg.name.clone(),
                    body: name.clone(),
                }
                .into());
            }
        }

        Ok(cfg)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|source| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    pub fn from_system(system: &System) -> Self {
        Config {
            name: system.name().to_string(),
            created_at: system.created_at(),
            bodies: system.bodies().iter().map(BodyConfig::from_body).collect(),
        }
    }

    pub fn into_system(self) -> Result<System, ConfigError> {
        let mut system = System::with_creation_time(self.name, self.created_at);
        for body_cfg in self.bodies {
            system.add_body(body_cfg.into_body()?)?;
        }
        Ok(system)
    }
}

impl BodyConfig {
    pub fn from_body(body: &Body) -> Self {
        BodyConfig {
            name: body.name().to_string(),
            mass: body.mass().as_earth_masses(),
            semi_major_axis: body.semi_major_axis().as_au(),
            eccentricity: body.eccentricity(),
            inclination: body.inclination().as_radians(),
            radius: body.radius(),
            rotational_period: body.rotational_period().as_days(),
            orbital_period: body.orbital_period().as_days(),
            initial_phase: body.initial_phase().as_radians(),
            color: body.color().map(str::to_string),
        }
    }

    pub fn into_body(self) -> Result<Body, ValidationError> {
        Body::new(BodyParams {
            name: self.name,
            mass: Mass::from_earth_masses(self.mass),
            semi_major_axis: Length::from_au(self.semi_major_axis),
            eccentricity: self.eccentricity,
            inclination: Angle::from_radians(self.inclination),
            radius: self.radius,
            rotational_period: Time::from_days(self.rotational_period),
            orbital_period: Time::from_days(self.orbital_period),
            initial_phase: Angle::from_radians(self.initial_phase),
            color: self.color,
        })
    }
}

impl System {
    /// Persist this system to a TOML file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        Config::from_system(self).save(path)
    }

    /// Load a system from a TOML file at `path`, re-validating every body.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<System, ConfigError> {
        Config::load(path)?.into_system()
    }
}
