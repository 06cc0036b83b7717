//! In-memory forecast tables keyed by administrative location names.

pub mod date_columns;
pub mod loader;

use std::fmt;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

pub use date_columns::{DateColumn, DateColumns, ForecastPeriod};
pub use loader::load_table;

/// A column naming an administrative unit. Headers match case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityColumn {
    Village,
    Mandal,
    District,
}

impl IdentityColumn {
    pub const ALL: [IdentityColumn; 3] = [
        IdentityColumn::Village,
        IdentityColumn::Mandal,
        IdentityColumn::District,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            IdentityColumn::Village => "VILLAGE",
            IdentityColumn::Mandal => "MANDAL",
            IdentityColumn::District => "DISTRICT",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        IdentityColumn::ALL
            .into_iter()
            .find(|c| c.header() == header.trim())
    }
}

impl fmt::Display for IdentityColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// What a parameter measures. Only affects how reports are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Rainfall,
    Humidity,
    WindSpeed,
    Temperature,
    #[default]
    Other,
}

/// One loaded dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct ForecastTable {
    pub parameter: String,
    pub headers: Vec<String>,
    /// Identity columns present in the file, with their field index, in header order.
    pub identity_columns: Vec<(IdentityColumn, usize)>,
    pub date_columns: DateColumns,
    pub rows: Vec<StringRecord>,
}

impl ForecastTable {
    /// Builds a table from a header record and its rows.
    ///
    /// Rows must already have the same width as the header.
    pub fn new(parameter: &str, headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        let identity_columns = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| IdentityColumn::from_header(h).map(|c| (c, idx)))
            .collect();
        let date_columns = DateColumns::from_headers(&headers);

        ForecastTable {
            parameter: parameter.to_string(),
            headers,
            identity_columns,
            date_columns,
            rows,
        }
    }

    pub fn period(&self) -> ForecastPeriod {
        self.date_columns.period()
    }

    /// Trimmed identity value of `row`; empty when the column is absent.
    pub fn identity(&self, row: &StringRecord, column: IdentityColumn) -> String {
        self.identity_columns
            .iter()
            .find(|(c, _)| *c == column)
            .and_then(|(_, idx)| row.get(*idx))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Numeric value of a date column; blank, non-numeric, NaN and infinite cells are `None`.
    pub fn value(&self, row: &StringRecord, column: &DateColumn) -> Option<f64> {
        row.get(column.index)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Raw cell text by header name, for columns outside the date set.
    pub fn cell<'a>(&self, row: &'a StringRecord, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .and_then(|idx| row.get(idx))
    }
}

// -- Tests -------------------------------------------------------------------
