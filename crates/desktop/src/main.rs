//! LedgerDesk command-line shell.

use anyhow::Context;
use clap::Parser;

use ledgerdesk_desktop::{AppState, Cli, shell};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ledgerdesk_observability::init();

    let state = AppState::from_env().context("failed to initialize application state")?;

    let output = shell::run(&state, cli.command).await?;
    println!("{output}");
    Ok(())
}
