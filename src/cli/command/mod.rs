pub mod chat;
pub mod datasets;
pub mod query;

use anyhow::{bail, Result};
use forecast_lookup::{
    aggregate::{aggregate, AggregatedReport},
    load::{load_context, ForecastContext},
    report::{assemble, not_found_message, render_all},
};

pub use chat::chat;
pub use datasets::datasets;
pub use query::query;

use super::DataArgs;

/// Loads the configured datasets, refusing to continue when none loaded.
pub async fn prepare(data: &DataArgs) -> Result<ForecastContext> {
    let config = data.config()?;
    let context = load_context(&config.parameters, true).await;

    if context.is_empty() {
        let reasons: Vec<String> = context
            .failures()
            .iter()
            .map(|(name, reason)| format!("  {}: {}", name, reason))
            .collect();
        bail!(
            "No forecast data available. Check the CSV file paths:\n{}",
            reasons.join("\n")
        );
    }

    Ok(context)
}

/// The text (or JSON) answer for an already validated query.
pub fn answer(context: &ForecastContext, query: &str, json: bool) -> Result<String> {
    match aggregate(context, query) {
        AggregatedReport::Found(locations) => {
            let reports: Vec<_> = locations
                .iter()
                .map(|location| assemble(context, query, location))
                .collect();

            if json {
                Ok(serde_json::to_string_pretty(&reports)?)
            } else {
                Ok(render_all(&reports))
            }
        }
        AggregatedReport::LocationNotFound => Ok(not_found_message(query)),
        AggregatedReport::NoDataAvailable => bail!("No forecast data available"),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use std::path::PathBuf;

    use csv::StringRecord;
    use forecast_lookup::{
        load::{Dataset, DatasetState},
        table::{ForecastTable, ParameterKind},
    };

    use super::*;

    pub(crate) fn context_fixture() -> ForecastContext {
        let headers = ["VILLAGE", "MANDAL", "DISTRICT", "10-04-25", "09-04-25"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = vec![StringRecord::from(vec!["Gudur", "X", "Y", "1.2", "0.0"])];

        ForecastContext::new(vec![Dataset {
            name: "Rainfall".to_string(),
            kind: ParameterKind::Rainfall,
            unit: None,
            path: PathBuf::from("rf.csv"),
            state: DatasetState::Loaded(ForecastTable::new("Rainfall", headers, rows)),
        }])
    }

    #[test]
    fn should_answer_with_text() {
        let text = answer(&context_fixture(), "gudur", false).unwrap();

        assert!(text.starts_with("Local Weather Forecast\nLocation: Gudur, X, Y\n"));
        assert!(text.contains("Outlook (09-04-25 - 10-04-25):"));
    }

    #[test]
    fn should_answer_with_json() {
        let json = answer(&context_fixture(), "gudur", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["location"]["village"], "Gudur");
        assert_eq!(value[0]["parameters"][0]["status"], "available");
        assert_eq!(value[0]["parameters"][0]["values"][1]["date"], "10-04-25");
        assert_eq!(value[0]["parameters"][0]["values"][1]["value"], 1.2);
    }

    #[test]
    fn should_answer_not_found() {
        let text = answer(&context_fixture(), "Ongole", false).unwrap();

        assert_eq!(
            text,
            "Location 'Ongole' not found in any available forecast dataset."
        );
    }
}
