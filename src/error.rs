//! Error types for loading data sources, reading configuration and validating queries.

use std::path::PathBuf;

use thiserror::Error;

/// A configured forecast file could not be turned into a table.
///
/// Never fatal on its own: the parameter is marked not initialized and the
/// remaining parameters carry on.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read '{0}'")]
    Unreadable(PathBuf, #[source] std::io::Error),

    #[error("failed to parse '{0}' as CSV")]
    Csv(PathBuf, #[source] csv::Error),

    #[error("'{0}' has no header row")]
    NoHeader(PathBuf),

    #[error("'{0}' has none of the VILLAGE, MANDAL or DISTRICT columns")]
    NoIdentityColumns(PathBuf),

    #[error("'{path}' row {row} has {found} fields, expected {expected}")]
    RowWidth {
        path: PathBuf,
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A user query rejected before it reaches the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please enter a location name.")]
    Empty,

    #[error(
        "Please enter only the location name (Village, Mandal, or District), not the full data row."
    )]
    LooksLikeDataRow { commas: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error(
        "no forecast parameters configured; pass --config or one of \
         --rainfall, --humidity, --wind-speed, --temperature"
    )]
    NoParameters,

    #[error("parameter '{0}' is configured more than once")]
    DuplicateParameter(String),
}
