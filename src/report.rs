//! Turns aggregated forecasts into structured reports, and renders them as text.

use serde::Serialize;

use crate::{
    aggregate::{LocationForecast, ParameterForecast},
    load::ForecastContext,
    matcher::{LocationKey, SeriesPoint},
    table::{ForecastPeriod, ParameterKind},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub query: String,
    pub location: LocationKey,
    pub period: PeriodLabels,
    pub parameters: Vec<ParameterSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodLabels {
    pub start: String,
    pub end: String,
}

impl From<&ForecastPeriod> for PeriodLabels {
    fn from(period: &ForecastPeriod) -> Self {
        PeriodLabels {
            start: period.start_label().to_string(),
            end: period.end_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStatus {
    Available,
    NoMatch,
    NotInitialized,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSummary {
    pub name: String,
    pub kind: ParameterKind,
    pub unit: Option<String>,
    pub status: ParameterStatus,
    pub values: Vec<SeriesPoint>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParameterSummary {
    fn known_values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .iter()
            .filter_map(|p| p.value.map(|v| (p.date.as_str(), v)))
    }
}

/// Builds the report for one location.
pub fn assemble(
    context: &ForecastContext,
    query: &str,
    forecast: &LocationForecast,
) -> ForecastReport {
    let parameters = forecast
        .parameters
        .iter()
        .map(|(name, parameter)| {
            let dataset = context.datasets.iter().find(|d| &d.name == name);
            let (status, values) = match parameter {
                ParameterForecast::Available(series) => {
                    (ParameterStatus::Available, series.clone())
                }
                ParameterForecast::NoMatch => (ParameterStatus::NoMatch, vec![]),
                ParameterForecast::NotInitialized => (ParameterStatus::NotInitialized, vec![]),
            };
            let known: Vec<f64> = values.iter().filter_map(|p| p.value).collect();

            ParameterSummary {
                name: name.clone(),
                kind: dataset.map(|d| d.kind).unwrap_or_default(),
                unit: dataset.and_then(|d| d.unit.clone()),
                status,
                min: known.iter().copied().reduce(f64::min),
                max: known.iter().copied().reduce(f64::max),
                values,
            }
        })
        .collect();

    ForecastReport {
        query: query.to_string(),
        location: forecast.key.clone(),
        period: PeriodLabels::from(&context.period),
        parameters,
    }
}

/// Plain-text rendering of one report.
pub fn render_text(report: &ForecastReport) -> String {
    let mut lines = vec![
        "Local Weather Forecast".to_string(),
        format!("Location: {}", report.location),
        format!("Outlook ({} - {}):", report.period.start, report.period.end),
    ];

    for parameter in &report.parameters {
        lines.push(format!("  {}: {}", parameter.name, describe(parameter)));
    }

    lines.join("\n")
}

/// Renders several reports separated by `---`.
pub fn render_all(reports: &[ForecastReport]) -> String {
    reports
        .iter()
        .map(render_text)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

pub fn not_found_message(query: &str) -> String {
    format!("Location '{}' not found in any available forecast dataset.", query)
}

fn describe(parameter: &ParameterSummary) -> String {
    match parameter.status {
        ParameterStatus::NoMatch => return "unavailable (no match)".to_string(),
        ParameterStatus::NotInitialized => return "unavailable (not initialized)".to_string(),
        ParameterStatus::Available => {}
    }

    if parameter.known_values().next().is_none() {
        return "no values reported".to_string();
    }

    match parameter.kind {
        ParameterKind::Rainfall => describe_rainfall(parameter),
        _ => describe_range(parameter),
    }
}

fn describe_rainfall(parameter: &ParameterSummary) -> String {
    let unit = unit_suffix(parameter);
    let mut rainy = Vec::new();
    let mut dry_runs: Vec<(&str, &str)> = Vec::new();
    let mut current_run: Option<(&str, &str)> = None;

    for (date, value) in parameter.known_values() {
        if value > 0.0 {
            rainy.push(format!("{}{} on {}", format_value(value), unit, date));
            if let Some(run) = current_run.take() {
                dry_runs.push(run);
            }
        } else {
            current_run = match current_run {
                Some((start, _)) => Some((start, date)),
                None => Some((date, date)),
            };
        }
    }
    if let Some(run) = current_run {
        dry_runs.push(run);
    }

    if rainy.is_empty() {
        return "No rainfall is anticipated.".to_string();
    }

    let mut text = format!("Rainfall is forecast: {}.", rainy.join(", "));
    let dry: Vec<String> = dry_runs
        .iter()
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{} through {}", start, end)
            }
        })
        .collect();
    if !dry.is_empty() {
        text.push_str(&format!(" Dry on {}.", dry.join(", ")));
    }

    text
}

fn describe_range(parameter: &ParameterSummary) -> String {
    let unit = unit_suffix(parameter);
    let (Some(min), Some(max)) = (parameter.min, parameter.max) else {
        return "no values reported".to_string();
    };

    let peak = parameter
        .known_values()
        .find(|(_, v)| *v == max)
        .map(|(date, _)| date)
        .unwrap_or_default();

    if min == max {
        format!("steady at {}{}.", format_value(min), unit)
    } else {
        format!(
            "between {}{} and {}{}, peaking on {}.",
            format_value(min),
            unit,
            format_value(max),
            unit,
            peak
        )
    }
}

fn unit_suffix(parameter: &ParameterSummary) -> String {
    match parameter.unit.as_deref() {
        Some("%") => "%".to_string(),
        Some(unit) => format!(" {}", unit),
        None => String::new(),
    }
}

fn format_value(value: f64) -> String {
    format!("{:.2}", value)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

// -- Tests -------------------------------------------------------------------
