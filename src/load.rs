//! Loads every configured parameter into an immutable [`ForecastContext`].

use std::path::PathBuf;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::{
    config::ParameterSource,
    table::{load_table, ForecastPeriod, ForecastTable, ParameterKind},
};

/// A configured parameter and whether its table could be loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub kind: ParameterKind,
    pub unit: Option<String>,
    pub path: PathBuf,
    pub state: DatasetState,
}

#[derive(Debug, Clone)]
pub enum DatasetState {
    Loaded(ForecastTable),
    NotInitialized { reason: String },
}

impl Dataset {
    pub fn table(&self) -> Option<&ForecastTable> {
        match &self.state {
            DatasetState::Loaded(table) => Some(table),
            DatasetState::NotInitialized { .. } => None,
        }
    }
}

/// The read-only set of datasets built at startup, in configured order.
#[derive(Debug, Clone, Default)]
pub struct ForecastContext {
    pub datasets: Vec<Dataset>,
    pub period: ForecastPeriod,
}

impl ForecastContext {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        let period = datasets
            .iter()
            .filter_map(Dataset::table)
            .map(ForecastTable::period)
            .find(ForecastPeriod::is_known)
            .unwrap_or_default();

        ForecastContext { datasets, period }
    }

    /// True when no parameter loaded. Queries cannot be answered at all.
    pub fn is_empty(&self) -> bool {
        self.loaded().next().is_none()
    }

    pub fn loaded(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter().filter(|d| d.table().is_some())
    }

    /// Reasons for every parameter that failed to load.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.datasets
            .iter()
            .filter_map(|d| match &d.state {
                DatasetState::NotInitialized { reason } => Some((d.name.as_str(), reason.as_str())),
                DatasetState::Loaded(_) => None,
            })
            .collect()
    }
}

/// Loads all sources concurrently. A source that fails is marked not initialized.
pub async fn load_context(sources: &[ParameterSource], show_progress: bool) -> ForecastContext {
    let progress_bar = if show_progress {
        ProgressBar::new(sources.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {msg}")
    {
        progress_bar.set_style(style.progress_chars("##-"));
    }
    progress_bar.set_message("Loading forecast data");

    let tasks: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = source.clone();
            let pb = progress_bar.clone();
            tokio::task::spawn_blocking(move || {
                let result = load_table(&source.name, &source.path);
                pb.inc(1);
                result
            })
        })
        .collect();

    let mut datasets = Vec::with_capacity(sources.len());
    for (source, result) in sources.iter().zip(join_all(tasks).await) {
        let state = match result {
            Ok(Ok(table)) => DatasetState::Loaded(table),
            Ok(Err(e)) => {
                warn!("{} marked not initialized: {}", source.name, error_chain(&e));
                DatasetState::NotInitialized {
                    reason: error_chain(&e),
                }
            }
            Err(e) => {
                warn!("{} loader task failed: {}", source.name, e);
                DatasetState::NotInitialized {
                    reason: e.to_string(),
                }
            }
        };

        datasets.push(Dataset {
            name: source.name.clone(),
            kind: source.kind,
            unit: source.unit.clone(),
            path: source.path.clone(),
            state,
        });
    }

    progress_bar.finish_with_message("Forecast data loaded");

    ForecastContext::new(datasets)
}

fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

// -- Tests -------------------------------------------------------------------
