//! # Cluster DNS
//!
//! Parses and validates the resolver configuration from the command line

mod bootstrap;
mod cli;

use bootstrap::{init_logging, load_config};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let (cli, matches) = cli::parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    init_logging(&cli.log_level);

    let config = load_config(&matches)?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    info!("Configuration valid");
    Ok(())
}
