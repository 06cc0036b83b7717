//! Which forecast files to load, and in what order.
//!
//! A TOML file lists the parameters; command line flags can replace or add
//! entries by kind:
//!
//! ```toml
//! [[parameters]]
//! name = "Rainfall"
//! kind = "rainfall"
//! path = "data/RF_day2025040812_UTC.csv"
//! unit = "mm"
//! ```

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, table::ParameterKind};

pub const CONFIG_DIR_NAME: &str = "forecast-lookup";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parameters: Vec<ParameterSource>,
}

/// One forecast variable and the file that backs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSource {
    pub name: String,
    #[serde(default)]
    pub kind: ParameterKind,
    pub path: PathBuf,
    #[serde(default)]
    pub unit: Option<String>,
}

impl ParameterSource {
    /// A source with the default display name and unit for `kind`.
    pub fn for_kind(kind: ParameterKind, path: PathBuf) -> Self {
        let (name, unit) = match kind {
            ParameterKind::Rainfall => ("Rainfall", None),
            ParameterKind::Humidity => ("Humidity", Some("%")),
            ParameterKind::WindSpeed => ("Wind Speed", None),
            ParameterKind::Temperature => ("Temperature", None),
            ParameterKind::Other => ("Other", None),
        };

        ParameterSource {
            name: name.to_string(),
            kind,
            path,
            unit: unit.map(str::to_string),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;

        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// `<config dir>/forecast-lookup/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads `explicit` if given, else the default file if it exists, else an empty config.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path),
                None => Ok(Config::default()),
            },
        }
    }

    /// Replaces the first parameter of the same kind, or appends a new one.
    pub fn set_path(&mut self, kind: ParameterKind, path: PathBuf) {
        match self.parameters.iter_mut().find(|p| p.kind == kind) {
            Some(existing) => existing.path = path,
            None => self.parameters.push(ParameterSource::for_kind(kind, path)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parameters.is_empty() {
            return Err(ConfigError::NoParameters);
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.name.to_lowercase()) {
                return Err(ConfigError::DuplicateParameter(parameter.name.clone()));
            }
        }

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------
