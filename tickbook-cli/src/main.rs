use clap::Parser;
use tickbook_cli::{DriverConfig, TickbookCli};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = DriverConfig::from(TickbookCli::parse());
    tickbook_cli::run(&config)?;
    Ok(())
}
