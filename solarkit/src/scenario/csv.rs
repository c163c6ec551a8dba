//! Import of the legacy planet-table CSV format.
//!
//! One header row naming the columns, one row per body:
//! `name,m,a,ecc,beta,R,trot,P,colour` with masses in Earth masses,
//! `a` in AU, `beta` in degrees, `R` in Earth radii, `trot` in days and
//! `P` in years. Rows with `a <= 0` describe the central star and carry
//! no orbit; they are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::body::{Body, BodyParams, ValidationError};
use crate::system::{RegistryError, System};
use crate::units::{Angle, Length, Mass, Time};

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("Failed to read planet table '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Planet table is missing a header row")]
    MissingHeader,

    #[error("Planet table header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Planet table row {row}: expected {expected} fields, got {got}")]
    FieldCount {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Planet table row {row}, column '{column}': invalid number '{value}'")]
    BadNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error(transparent)]
    Body(#[from] ValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Column accessors resolved from the header row. The name and colour
/// columns appeared under two spellings in the wild; both are accepted.
struct Columns {
    name: usize,
    mass: usize,
    semi_major_axis: usize,
    eccentricity: usize,
    inclination: usize,
    radius: usize,
    rotational_period: usize,
    orbital_period: usize,
    color: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, CsvError> {
        let fields: Vec<&str> = header.split(',').map(str::trim).collect();

        fn find(fields: &[&str], names: &[&str]) -> Option<usize> {
            fields.iter().position(|f| names.contains(f))
        }
        fn require(
            fields: &[&str],
            names: &[&str],
            label: &'static str,
        ) -> Result<usize, CsvError> {
            find(fields, names).ok_or(CsvError::MissingColumn(label))
        }

        Ok(Columns {
            name: require(&fields, &["name", "Body"], "name")?,
            mass: require(&fields, &["m"], "m")?,
            semi_major_axis: require(&fields, &["a"], "a")?,
            eccentricity: require(&fields, &["ecc"], "ecc")?,
            inclination: require(&fields, &["beta"], "beta")?,
            radius: require(&fields, &["R"], "R")?,
            rotational_period: require(&fields, &["trot"], "trot")?,
            orbital_period: require(&fields, &["P"], "P")?,
            color: find(&fields, &["colour", "color", "c"]),
            width: fields.len(),
        })
    }
}

/// Parse a planet table into a system named `name`.
pub fn system_from_csv_str(name: &str, content: &str) -> Result<System, CsvError> {
    let mut lines = content.lines().enumerate();
    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => break line,
            None => return Err(CsvError::MissingHeader),
        }
    };
    let columns = Columns::from_header(header)?;

    let mut system = System::new(name);
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let row = idx + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.width {
            return Err(CsvError::FieldCount {
                row,
                expected: columns.width,
                got: fields.len(),
            });
        }

        let number = |col: usize, label: &'static str| -> Result<f64, CsvError> {
            fields[col].parse().map_err(|_| CsvError::BadNumber {
                row,
                column: label,
                value: fields[col].to_string(),
            })
        };

        let body_name = fields[columns.name];
        let semi_major_axis = number(columns.semi_major_axis, "a")?;
        if semi_major_axis <= 0.0 {
            // The central star row; it has no orbit to propagate.
            debug!(body = body_name, "Skipping central-star row");
            continue;
        }

        let body = Body::new(BodyParams {
            name: body_name.to_string(),
            mass: Mass::from_earth_masses(number(columns.mass, "m")?),
            semi_major_axis: Length::from_au(semi_major_axis),
            eccentricity: number(columns.eccentricity, "ecc")?,
            inclination: Angle::from_degrees(number(columns.inclination, "beta")?),
            radius: number(columns.radius, "R")?,
            rotational_period: Time::from_days(number(columns.rotational_period, "trot")?),
            orbital_period: Time::from_years(number(columns.orbital_period, "P")?),
            initial_phase: Angle::zero(),
            color: columns
                .color
                .map(|c| fields[c].to_string())
                .filter(|c| !c.is_empty()),
        })?;
        system.add_body(body)?;
    }

    Ok(system)
}

/// Load a planet table from disk. The system is named after the file stem.
pub fn load_system_csv<P: AsRef<Path>>(path: P) -> Result<System, CsvError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CsvError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Solar System".to_string());
    system_from_csv_str(&name, &content)
}
