mod bootstrap_helpers;
mod cli_args;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::{init_tracing, runtime_config_from_cli};
use crate::cli_args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    issuebot_bridge::run_issue_bridge(runtime_config_from_cli(&cli)).await
}
