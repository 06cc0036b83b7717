//! Runs one query against every parameter table and joins the results by location.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    load::ForecastContext,
    matcher::{match_location, LocationKey, MatchResult, SeriesPoint},
};

/// What one parameter contributes to one location.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterForecast {
    Available(Vec<SeriesPoint>),
    /// The table loaded but has no row for this location.
    NoMatch,
    /// The table failed to load.
    NotInitialized,
}

/// Per-parameter forecasts for one location, in configured parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationForecast {
    pub key: LocationKey,
    pub parameters: Vec<(String, ParameterForecast)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedReport {
    /// Locations in first-discovered order.
    Found(Vec<LocationForecast>),
    /// No loaded table matched the query.
    LocationNotFound,
    /// No table loaded at all.
    NoDataAvailable,
}

/// Matches `query` against each loaded dataset and unions the locations found.
///
/// When one table holds several rows with the same location key, the first
/// row wins.
pub fn aggregate(context: &ForecastContext, query: &str) -> AggregatedReport {
    if context.is_empty() {
        return AggregatedReport::NoDataAvailable;
    }

    let mut keys: Vec<LocationKey> = Vec::new();
    let mut key_index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut per_parameter: Vec<(String, Option<HashMap<usize, Vec<SeriesPoint>>>)> = Vec::new();

    for dataset in &context.datasets {
        let Some(table) = dataset.table() else {
            per_parameter.push((dataset.name.clone(), None));
            continue;
        };

        let mut found = HashMap::new();
        match match_location(table, query) {
            MatchResult::Found(matches) => {
                for m in matches {
                    let idx = *key_index.entry(m.key.join_key()).or_insert_with(|| {
                        keys.push(m.key.clone());
                        keys.len() - 1
                    });
                    if found.contains_key(&idx) {
                        debug!("{}: duplicate row for {} ignored", dataset.name, m.key);
                        continue;
                    }
                    found.insert(idx, m.series);
                }
            }
            MatchResult::NotFound => debug!("{}: no match for '{}'", dataset.name, query),
        }
        per_parameter.push((dataset.name.clone(), Some(found)));
    }

    if keys.is_empty() {
        return AggregatedReport::LocationNotFound;
    }

    let locations = keys
        .into_iter()
        .enumerate()
        .map(|(idx, key)| LocationForecast {
            key,
            parameters: per_parameter
                .iter()
                .map(|(name, found)| {
                    let forecast = match found {
                        None => ParameterForecast::NotInitialized,
                        Some(found) => match found.get(&idx) {
                            Some(series) => ParameterForecast::Available(series.clone()),
                            None => ParameterForecast::NoMatch,
                        },
                    };
                    (name.clone(), forecast)
                })
                .collect(),
        })
        .collect();

    AggregatedReport::Found(locations)
}

// -- Tests -------------------------------------------------------------------
