use std::time::Duration;

use alchemy_json_rpc_client::{BlockId, ClientConfig, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};

/// Reads Ethereum state through the Alchemy JSON-RPC gateway.
#[derive(Debug, Clone, Parser)]
pub struct CliConfig {
    /// Sets the logger filter.
    /// Valid values: trace, debug, info, warn, error
    /// Example of a valid filter: "warn,my_crate=info,my_crate::my_mod=debug".
    #[arg(long, default_value = "info")]
    pub logger_filter: String,

    /// Alchemy API key.
    #[arg(long, env = "ALCHEMY_API_KEY")]
    pub api_key: String,

    /// Gateway URL the API key is appended to.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Block the reads apply to: latest, pending, safe, finalized, earliest
    /// or a hex block number.
    #[arg(long, default_value = "latest")]
    pub block: BlockId,

    /// Timeout of a single HTTP call, in seconds.
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Prints the number of the most recent block.
    BlockNumber,
    /// Prints the code of the given addresses. Several addresses are
    /// fetched in a single batch.
    Code {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Prints the balance in wei of the given addresses. Several addresses
    /// are fetched in a single batch.
    Balance {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Prints the logs matching the filter as JSON.
    Logs {
        /// Contract address to filter logs for; may be repeated.
        #[arg(long = "address")]
        addresses: Vec<String>,
        #[arg(long, default_value = "earliest")]
        from_block: BlockId,
        #[arg(long, default_value = "latest")]
        to_block: BlockId,
        /// Topic to filter logs for; may be repeated.
        #[arg(long = "topic")]
        topics: Vec<String>,
    },
}

impl CliConfig {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_default_block(self.block);
        match self.timeout_seconds {
            Some(seconds) => config.with_request_timeout(Duration::from_secs(seconds)),
            None => config,
        }
    }
}
