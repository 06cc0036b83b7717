//! One-shot location lookup.

use anyhow::Result;
use forecast_lookup::matcher::validate_query;

use super::{answer, prepare};
use crate::cli::DataArgs;

pub async fn query(data: &DataArgs, location: &str, json: bool) -> Result<String> {
    let query = validate_query(location)?;
    let context = prepare(data).await?;

    answer(&context, query, json)
}
