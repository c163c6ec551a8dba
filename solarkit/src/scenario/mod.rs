use std::path::Path;
use tracing::info;

use crate::system::System;

pub mod config;
pub mod csv;
pub mod nominal;

pub use config::{Config, ConfigError};
pub use csv::CsvError;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Csv(#[from] CsvError),
}

/// Load a system configuration.
///
/// With no path the built-in nominal solar system is returned. A `.csv`
/// extension selects the legacy planet-table importer; anything else is
/// parsed as a scenario TOML file.
pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<System, ScenarioError> {
    let Some(path) = path else {
        return Ok(nominal::system());
    };
    let path = path.as_ref();

    info!(
        config = %path.display(),
        "Loading system from config file",
    );

    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(csv::load_system_csv(path)?)
    } else {
        Ok(System::load(path)?)
    }
}
