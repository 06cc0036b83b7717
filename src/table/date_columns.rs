//! Recognises `DD-MM-YY` column headers and orders them by calendar date.

use chrono::NaiveDate;
use tracing::warn;

const DATE_FORMAT: &str = "%d-%m-%y";

/// A column whose header parsed as a forecast date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub header: String,
    pub date: NaiveDate,
    pub index: usize,
}

/// The recognised date columns of one table, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateColumns {
    columns: Vec<DateColumn>,
    skipped: Vec<String>,
}

impl DateColumns {
    /// Classifies `headers`, keeping those shaped like three dash-separated
    /// numbers that also parse as a day-month-year date.
    ///
    /// Date-shaped headers that fail to parse are dropped with a warning and
    /// kept in [`DateColumns::skipped`]. Ties keep header order.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut columns = Vec::new();
        let mut skipped = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let header = header.as_ref().trim();
            if !is_date_shaped(header) {
                continue;
            }

            match NaiveDate::parse_from_str(header, DATE_FORMAT) {
                Ok(date) => columns.push(DateColumn {
                    header: header.to_string(),
                    date,
                    index,
                }),
                Err(e) => {
                    warn!("Ignoring date-like column '{}': {}", header, e);
                    skipped.push(header.to_string());
                }
            }
        }

        // Stable sort
        columns.sort_by_key(|c| c.date);

        DateColumns { columns, skipped }
    }

    pub fn first(&self) -> Option<&DateColumn> {
        self.columns.first()
    }

    pub fn last(&self) -> Option<&DateColumn> {
        self.columns.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Date-shaped headers that did not parse.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn period(&self) -> ForecastPeriod {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => ForecastPeriod::Known {
                start: first.clone(),
                end: last.clone(),
            },
            _ => ForecastPeriod::Unknown,
        }
    }
}

/// First and last forecast dates, or the explicit unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ForecastPeriod {
    Known {
        start: DateColumn,
        end: DateColumn,
    },
    #[default]
    Unknown,
}

impl ForecastPeriod {
    pub fn is_known(&self) -> bool {
        matches!(self, ForecastPeriod::Known { .. })
    }

    pub fn start_label(&self) -> &str {
        match self {
            ForecastPeriod::Known { start, .. } => &start.header,
            ForecastPeriod::Unknown => "start date",
        }
    }

    pub fn end_label(&self) -> &str {
        match self {
            ForecastPeriod::Known { end, .. } => &end.header,
            ForecastPeriod::Unknown => "end date",
        }
    }
}

fn is_date_shaped(header: &str) -> bool {
    let parts: Vec<&str> = header.split('-').collect();

    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

// -- Tests -------------------------------------------------------------------
