use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;

use crate::body::Body;

/// A named collection of bodies forming one solar-system configuration.
///
/// Body order is insertion order, which is also display/legend order.
/// Mutation happens only through [`System::add_body`] and
/// [`System::remove_body`].
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    name: String,
    bodies: Vec<Body>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("System '{system}' already contains a body named '{body}'")]
    DuplicateName { system: String, body: String },

    #[error("System '{system}' has no body named '{body}'")]
    NotFound { system: String, body: String },
}

impl System {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_creation_time(name, Utc::now())
    }

    /// Restore a system with a known creation timestamp (used when loading
    /// a persisted configuration).
    pub fn with_creation_time(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        System {
            name: name.into(),
            bodies: Vec::new(),
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.body(name).is_some()
    }

    /// The body with the longest orbital period, if any.
    pub fn outermost(&self) -> Option<&Body> {
        self.bodies
            .iter()
            .max_by_key(|b| OrderedFloat(b.orbital_period().as_days()))
    }

    pub fn add_body(&mut self, body: Body) -> Result<(), RegistryError> {
        if self.contains(body.name()) {
            return Err(RegistryError::DuplicateName {
                system: self.name.clone(),
                body: body.name().to_string(),
            });
        }
        self.bodies.push(body);
        Ok(())
    }

    pub fn remove_body(&mut self, name: &str) -> Result<Body, RegistryError> {
        match self.bodies.iter().position(|b| b.name() == name) {
            Some(idx) => Ok(self.bodies.remove(idx)),
            None => Err(RegistryError::NotFound {
                system: self.name.clone(),
                body: name.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.bodies.iter().map(|b| b.name()).collect();
        write!(f, "{}({})", self.name, names.join(", "))
    }
}
