use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use sendr::config::{ChainConfig, RunConfig};
use sendr::connector::{ChainConnector, HttpConnector};
use sendr::engine::{RunSummary, TransferRunner};

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    // Fatal before anything else: no valid route, no run
    let chain = ChainConfig::load(cli.config.as_ref()).context("Failed to load chain config")?;

    match cli.command {
        Some(Commands::Check) => handle_check(&chain).await,
        Some(Commands::Run { amount, iterations }) => handle_run(&chain, amount, iterations).await,
        // Default: interactive run, prompting for both inputs
        None => handle_run(&chain, None, None).await,
    }
}

async fn handle_check(chain: &ChainConfig) -> Result<()> {
    info!("Checking chain config and signer credential");

    // Config was validated on load; this verifies the credential and sidecar
    let connector = HttpConnector::connect(chain)
        .await
        .context("Signer sidecar check failed")?;

    println!(
        "{} Chain config valid. Signer ready, sender: {}",
        "OK".green().bold(),
        connector.sender_address()
    );
    Ok(())
}

async fn handle_run(
    chain: &ChainConfig,
    amount: Option<Decimal>,
    iterations: Option<u32>,
) -> Result<()> {
    let amount = match amount {
        Some(amount) => amount,
        None => prompt_parsed("Token amount per transfer (e.g. 1.5): ")?,
    };
    let iterations = match iterations {
        Some(iterations) => iterations,
        None => prompt_parsed("Number of transfers to submit: ")?,
    };

    let config =
        RunConfig::new(amount, iterations, chain.clone()).context("Invalid run parameters")?;

    // Initialization faults end the run here, before any transaction exists
    let connector = HttpConnector::connect(chain)
        .await
        .context("Failed to initialize chain connector")?;

    print_banner(&config, connector.sender_address());

    let runner = TransferRunner::new(Arc::new(connector));
    let summary = runner.run(&config).await.context("Run aborted")?;

    print_summary(&summary);
    Ok(())
}

/// Prompt on stdout and parse one line from stdin, reprompting until the
/// input parses.
fn prompt_parsed<T>(prompt: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;

        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(e) => println!("{} {}", "Invalid input:".red(), e),
        }
    }
}

fn print_banner(config: &RunConfig, sender: &str) {
    let destination = config
        .chain
        .destination_chain_id
        .as_deref()
        .unwrap_or(&config.chain.channel_id);

    println!(
        "\n{}",
        "======================================================".cyan()
    );
    println!(
        "{} {}x transfer @ {} {}",
        "Run starting:".green().bold(),
        config.total_iterations,
        config.amount_token,
        config.chain.source_denom
    );
    println!("Sender:      {}", sender);
    println!("Recipient:   {}", config.chain.recipient_address);
    println!(
        "Destination: {} via {}",
        destination, config.chain.channel_id
    );
    println!(
        "{}",
        "======================================================".cyan()
    );
}

fn print_summary(summary: &RunSummary) {
    println!(
        "\n{}",
        "======================================================".cyan()
    );
    println!("{}", "All iterations finished.".green().bold());
    println!(
        "  Confirmed:          {}",
        summary.confirmed.to_string().green()
    );
    println!(
        "  On-chain failures:  {}",
        summary.on_chain_failures.to_string().red()
    );
    println!(
        "  Transport failures: {}",
        summary.transport_failures.to_string().red()
    );
    println!(
        "{}",
        "======================================================".cyan()
    );
}
