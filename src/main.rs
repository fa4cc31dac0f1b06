use std::io::IsTerminal;

use adledger::cli::Cli;
use adledger::config::Config;
use adledger::dispatcher::dispatch_command;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG, stderr so JSON output stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = Config::load()?;
    dispatch_command(cli.command, &config, cli.json).await
}
