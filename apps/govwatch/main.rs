use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use utils::tracing::run_with_tracing;

mod cli;
mod commands;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = cli::Cli::parse();
    let format = cli.log_format;

    run_with_tracing(format, || commands::run(cli)).await
}
