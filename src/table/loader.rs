//! Reads one forecast CSV file into a [`ForecastTable`].

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use super::ForecastTable;
use crate::error::DataSourceError;

/// Loads the CSV at `path` as the table for `parameter`.
pub fn load_table(parameter: &str, path: &Path) -> Result<ForecastTable, DataSourceError> {
    if !path.exists() {
        return Err(DataSourceError::Missing(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| DataSourceError::Unreadable(path.to_path_buf(), e))?;
    let table = read_table(parameter, path, file)?;

    info!(
        "Loaded {} from {}: {} rows, {} date columns ({} to {})",
        parameter,
        path.display(),
        table.rows.len(),
        table.date_columns.len(),
        table.period().start_label(),
        table.period().end_label(),
    );

    Ok(table)
}

fn read_table<R: Read>(
    parameter: &str,
    path: &Path,
    reader: R,
) -> Result<ForecastTable, DataSourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataSourceError::Csv(path.to_path_buf(), e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataSourceError::NoHeader(path.to_path_buf()));
    }

    let mut rows: Vec<StringRecord> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataSourceError::Csv(path.to_path_buf(), e))?;
        if record.len() != headers.len() {
            return Err(DataSourceError::RowWidth {
                path: path.to_path_buf(),
                row: idx + 1,
                found: record.len(),
                expected: headers.len(),
            });
        }
        rows.push(record);
    }

    let table = ForecastTable::new(parameter, headers, rows);
    if table.identity_columns.is_empty() {
        return Err(DataSourceError::NoIdentityColumns(path.to_path_buf()));
    }
    debug!(
        "{} identity columns: {:?}",
        parameter, table.identity_columns
    );

    Ok(table)
}

// -- Tests -------------------------------------------------------------------
