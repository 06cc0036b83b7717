//! Command line interface.

pub mod command;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{command, Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use forecast_lookup::{config::Config, table::ParameterKind};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    /// Increase log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the forecast for one location
    Query {
        /// Village, mandal or district name
        location: String,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask for locations interactively
    Chat {
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the configured datasets and the forecast period
    Datasets {},
}

/// Where the forecast files come from.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// TOML file listing the parameters to load
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rainfall forecast CSV
    #[arg(long, global = true)]
    pub rainfall: Option<PathBuf>,

    /// Relative humidity forecast CSV
    #[arg(long, global = true)]
    pub humidity: Option<PathBuf>,

    /// Wind speed forecast CSV
    #[arg(long, global = true)]
    pub wind_speed: Option<PathBuf>,

    /// Temperature forecast CSV
    #[arg(long, global = true)]
    pub temperature: Option<PathBuf>,
}

impl DataArgs {
    /// Config file (explicit or default) with the path flags applied on top.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::discover(self.config.as_deref())?;

        let overrides = [
            (ParameterKind::Rainfall, &self.rainfall),
            (ParameterKind::Humidity, &self.humidity),
            (ParameterKind::WindSpeed, &self.wind_speed),
            (ParameterKind::Temperature, &self.temperature),
        ];
        for (kind, path) in overrides {
            if let Some(path) = path {
                config.set_path(kind, path.clone());
            }
        }

        config.validate().context("Invalid configuration")?;

        Ok(config)
    }
}

/// Logs to stderr. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// -- Tests -------------------------------------------------------------------
