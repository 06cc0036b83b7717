//! Lists each configured dataset with its load status.

use anyhow::Result;
use forecast_lookup::load::{load_context, DatasetState, ForecastContext};

use crate::cli::DataArgs;

pub async fn datasets(data: &DataArgs) -> Result<String> {
    let config = data.config()?;
    let context = load_context(&config.parameters, true).await;

    Ok(describe(&context))
}

fn describe(context: &ForecastContext) -> String {
    let mut lines = Vec::new();

    for dataset in &context.datasets {
        lines.push(format!("{} ({})", dataset.name, dataset.path.display()));
        match &dataset.state {
            DatasetState::Loaded(table) => {
                lines.push(format!(
                    "  loaded: {} rows, {} date columns, identity columns: {}",
                    table.rows.len(),
                    table.date_columns.len(),
                    table
                        .identity_columns
                        .iter()
                        .map(|(c, _)| c.header())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                if !table.date_columns.skipped().is_empty() {
                    lines.push(format!(
                        "  skipped date-like columns: {}",
                        table.date_columns.skipped().join(", ")
                    ));
                }
            }
            DatasetState::NotInitialized { reason } => {
                lines.push(format!("  not initialized: {}", reason));
            }
        }
    }

    if context.is_empty() {
        lines.push("No forecast data available.".to_string());
    } else {
        lines.push(format!(
            "Forecast period: {} to {}",
            context.period.start_label(),
            context.period.end_label()
        ));
    }

    lines.join("\n")
}

// -- Tests -------------------------------------------------------------------
