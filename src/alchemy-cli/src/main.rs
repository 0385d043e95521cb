use std::io::Write;

use alchemy_json_rpc_client::{AlchemyClient, Client, LogFilter};
use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::SetLoggerError;

use crate::config::{CliConfig, Command};

mod config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logger(&config.logger_filter)?;

    let client = AlchemyClient::from_config(config.client_config())
        .context("failed to build the Alchemy client")?;

    run(&client, config.command, &mut std::io::stdout().lock()).await
}

/// Initializes the logger
fn init_logger(logger_filter: &str) -> Result<(), SetLoggerError> {
    Builder::new().parse_filters(logger_filter).try_init()
}

/// Executes `command` and writes its output to `out`, one result per line.
async fn run<C: Client>(
    client: &AlchemyClient<C>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::BlockNumber => {
            let number = client
                .get_block_number()
                .await
                .context("failed to get the block number")?;
            writeln!(out, "{number}")?;
        }
        Command::Code { addresses } if addresses.len() == 1 => {
            let code = client
                .get_contract_code(&addresses[0], None)
                .await
                .with_context(|| format!("failed to get the code of {}", addresses[0]))?;
            writeln!(out, "{code}")?;
        }
        Command::Code { addresses } => {
            log::info!("fetching the code of {} addresses", addresses.len());
            let codes = client
                .get_contract_code_batch(&addresses, None)
                .await
                .context("failed to get contract codes")?;
            for code in codes {
                match code.error {
                    Some(err) => writeln!(out, "{} error: {err}", code.address)?,
                    None => writeln!(out, "{} {}", code.address, code.code)?,
                }
            }
        }
        Command::Balance { addresses } if addresses.len() == 1 => {
            let amount = client
                .get_balance(&addresses[0], None)
                .await
                .with_context(|| format!("failed to get the balance of {}", addresses[0]))?;
            writeln!(out, "{amount}")?;
        }
        Command::Balance { addresses } => {
            log::info!("fetching the balance of {} addresses", addresses.len());
            let balances = client
                .get_balance_batch(&addresses, None)
                .await
                .context("failed to get balances")?;
            for balance in balances {
                let address = balance.address.clone();
                match balance.into_result() {
                    Ok(amount) => writeln!(out, "{address} {amount}")?,
                    Err(err) => writeln!(out, "{address} error: {err}")?,
                }
            }
        }
        Command::Logs {
            addresses,
            from_block,
            to_block,
            topics,
        } => {
            let filter = LogFilter::new(addresses, from_block, to_block).with_topics(topics);
            let logs = client
                .get_logs(&filter)
                .await
                .context("failed to get logs")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&logs)?)?;
        }
    }

    Ok(())
}
