//! Query validation and case-insensitive location matching.

use std::fmt;

use serde::Serialize;

use crate::{
    error::QueryError,
    table::{ForecastTable, IdentityColumn},
};

const MAX_COMMAS: usize = 2;

/// Trims a raw query and rejects input that is empty or looks like a pasted data row.
pub fn validate_query(raw: &str) -> Result<&str, QueryError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(QueryError::Empty);
    }

    let commas = query.matches(',').count();
    if commas > MAX_COMMAS {
        return Err(QueryError::LooksLikeDataRow { commas });
    }

    Ok(query)
}

/// (VILLAGE, MANDAL, DISTRICT) of a matched row, trimmed, absent columns empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationKey {
    pub village: String,
    pub mandal: String,
    pub district: String,
}

impl LocationKey {
    pub fn new(village: &str, mandal: &str, district: &str) -> Self {
        LocationKey {
            village: village.trim().to_string(),
            mandal: mandal.trim().to_string(),
            district: district.trim().to_string(),
        }
    }

    /// Join key across tables: exact match after trimming, ignoring case.
    pub fn join_key(&self) -> (String, String, String) {
        (
            self.village.to_lowercase(),
            self.mandal.to_lowercase(),
            self.district.to_lowercase(),
        )
    }
}

impl PartialEq for LocationKey {
    fn eq(&self, other: &Self) -> bool {
        self.join_key() == other.join_key()
    }
}

impl Eq for LocationKey {}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.village, &self.mandal, &self.district]
            .into_iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();

        write!(f, "{}", parts.join(", "))
    }
}

/// One forecast value, labelled by its original column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: Option<f64>,
}

/// A matched row: its location and its values in date order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch {
    pub key: LocationKey,
    pub series: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Found(Vec<LocationMatch>),
    NotFound,
}

/// Returns every row where any identity column contains `query`, ignoring case
/// and surrounding whitespace, in table order.
///
/// The test is an OR across columns, so a village query can hit a district
/// name. `query` must already have passed [`validate_query`].
pub fn match_location(table: &ForecastTable, query: &str) -> MatchResult {
    let needle = query.trim().to_lowercase();

    let matches: Vec<LocationMatch> = table
        .rows
        .iter()
        .filter(|row| {
            table.identity_columns.iter().any(|(_, idx)| {
                row.get(*idx)
                    .map(|v| v.trim().to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .map(|row| LocationMatch {
            key: LocationKey::new(
                &table.identity(row, IdentityColumn::Village),
                &table.identity(row, IdentityColumn::Mandal),
                &table.identity(row, IdentityColumn::District),
            ),
            series: table
                .date_columns
                .iter()
                .map(|column| SeriesPoint {
                    date: column.header.clone(),
                    value: table.value(row, column),
                })
                .collect(),
        })
        .collect();

    if matches.is_empty() {
        MatchResult::NotFound
    } else {
        MatchResult::Found(matches)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use csv::StringRecord;

    use super::*;

    fn table_fixture() -> ForecastTable {
        let headers = ["VILLAGE", "MANDAL", "DISTRICT", "10-04-25", "09-04-25"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = vec![
            StringRecord::from(vec!["Gudur", "X", "Y", "1.2", "0.0"]),
            StringRecord::from(vec!["Kota", "Gudur Rural", "Nellore", "0.3", "0.1"]),
            StringRecord::from(vec!["Naidupet", "Z", " gudurpet ", "", "2.0"]),
            StringRecord::from(vec!["Sullurpeta", "Z", "Nellore", "0.0", "0.0"]),
        ];

        ForecastTable::new("Rainfall", headers, rows)
    }

    fn villages(result: &MatchResult) -> Vec<String> {
        match result {
            MatchResult::Found(matches) => matches.iter().map(|m| m.key.village.clone()).collect(),
            MatchResult::NotFound => vec![],
        }
    }

    #[test]
    fn should_match_exact_row() {
        let table = table_fixture();
        let result = match_location(&table, "Sullurpeta");

        assert_eq!(villages(&result), vec!["Sullurpeta"]);
    }

    #[test]
    fn should_match_substring_in_any_column_in_table_order() {
        let table = table_fixture();
        let result = match_location(&table, "  GUDUR ");

        assert_eq!(villages(&result), vec!["Gudur", "Kota", "Naidupet"]);
    }

    #[test]
    fn should_return_series_in_date_order() {
        let table = table_fixture();
        let MatchResult::Found(matches) = match_location(&table, "gudur") else {
            panic!("expected a match");
        };

        assert_eq!(matches[0].key, LocationKey::new("Gudur", "X", "Y"));
        let series: Vec<(&str, Option<f64>)> = matches[0]
            .series
            .iter()
            .map(|p| (p.date.as_str(), p.value))
            .collect();
        assert_eq!(series, vec![("09-04-25", Some(0.0)), ("10-04-25", Some(1.2))]);
        assert_eq!(matches[2].series[1].value, None);
    }

    #[test]
    fn should_report_not_found() {
        let table = table_fixture();

        assert_eq!(match_location(&table, "Ongole"), MatchResult::NotFound);
    }

    #[test]
    fn should_not_match_non_identity_columns() {
        let table = table_fixture();

        assert_eq!(match_location(&table, "1.2"), MatchResult::NotFound);
    }

    #[test]
    fn should_be_idempotent() {
        let table = table_fixture();

        assert_eq!(match_location(&table, "nellore"), match_location(&table, "nellore"));
    }

    #[test]
    fn should_reject_more_than_two_commas() {
        assert_eq!(
            validate_query("A, B, C, D"),
            Err(QueryError::LooksLikeDataRow { commas: 3 })
        );
        assert_eq!(validate_query("A, B"), Ok("A, B"));
        assert_eq!(validate_query("A, B, C"), Ok("A, B, C"));
    }

    #[test]
    fn should_reject_blank_query() {
        assert_eq!(validate_query("   "), Err(QueryError::Empty));
        assert_eq!(validate_query(" Gudur\n"), Ok("Gudur"));
    }

    #[test]
    fn should_compare_keys_ignoring_case() {
        assert_eq!(LocationKey::new(" GUDUR", "x", "Y "), LocationKey::new("Gudur", "X", "y"));
        assert_ne!(LocationKey::new("Gudur", "X", ""), LocationKey::new("Gudur", "X", "Y"));
    }

    #[test]
    fn should_display_non_empty_parts() {
        assert_eq!(LocationKey::new("Gudur", "", "Y").to_string(), "Gudur, Y");
    }
}
