mod cli;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, init_logging, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Query { location, json } => {
            println!("{}", command::query(&cli.data, location, *json).await?)
        }
        Commands::Chat { json } => command::chat(&cli.data, *json).await?,
        Commands::Datasets {} => println!("{}", command::datasets(&cli.data).await?),
    }

    Ok(())
}
