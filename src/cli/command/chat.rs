//! Interactive lookup loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use forecast_lookup::{load::ForecastContext, matcher::validate_query};
use tracing::error;

use super::{answer, prepare};
use crate::cli::DataArgs;

const PROMPT: &str = "\nEnter location name (or 'quit'): ";
const NOT_UTF8: &str = "Could not read that input as text. Please enter a location name.";

pub async fn chat(data: &DataArgs, json: bool) -> Result<()> {
    let context = prepare(data).await?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&context, stdin.lock(), stdout.lock(), json)
}

/// Reads queries line by line until `quit`, `exit` or end of input.
///
/// A bad query never ends the loop.
pub fn run<R: BufRead, W: Write>(
    context: &ForecastContext,
    mut input: R,
    mut output: W,
    json: bool,
) -> Result<()> {
    write_banner(context, &mut output)?;

    let mut buf = Vec::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(output)?;
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            writeln!(output, "{}", NOT_UTF8)?;
            continue;
        };

        if matches!(line.trim().to_lowercase().as_str(), "quit" | "exit") {
            writeln!(output, "Goodbye!")?;
            break;
        }

        let query = match validate_query(line) {
            Ok(query) => query,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        match answer(context, query, json) {
            Ok(text) => writeln!(output, "\n{}", text)?,
            Err(e) => {
                error!("Query '{}' failed: {:#}", query, e);
                writeln!(output, "Sorry, I encountered a problem. Please try again.")?;
            }
        }
    }

    Ok(())
}

fn write_banner<W: Write>(context: &ForecastContext, output: &mut W) -> Result<()> {
    let names: Vec<&str> = context.loaded().map(|d| d.name.as_str()).collect();

    writeln!(output, "--- Weather Forecast Lookup ---")?;
    writeln!(output, "Forecasts available for: {}.", names.join(", "))?;
    for (name, reason) in context.failures() {
        writeln!(output, "{} forecast unavailable: {}", name, reason)?;
    }
    if context.period.is_known() {
        writeln!(
            output,
            "Forecasts available from {} to {}.",
            context.period.start_label(),
            context.period.end_label()
        )?;
    } else {
        writeln!(output, "Warning: Forecast date range could not be determined.")?;
    }
    writeln!(output, ">>> Please enter only the Village, Mandal, or District name. <<<")?;
    writeln!(output, "Type 'quit' or 'exit' to end the chat.")?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
