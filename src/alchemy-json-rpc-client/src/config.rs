use std::time::Duration;

use crate::types::BlockId;

/// Alchemy Ethereum mainnet endpoint; the API key is appended to it.
pub const DEFAULT_BASE_URL: &str = "https://eth-mainnet.g.alchemy.com:443/v2/";

/// Settings of an [`AlchemyClient`](crate::AlchemyClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway URL the API key is appended to.
    pub base_url: String,
    /// Alchemy API key.
    pub api_key: String,
    /// Block used by reads that are not given one explicitly.
    /// Defaults to [`BlockId::Latest`].
    pub default_block: BlockId,
    /// Timeout of a whole HTTP call. A batch travels in a single call, so
    /// the timeout cancels all of its items together. No timeout by default.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            default_block: BlockId::default(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Config for the mainnet gateway with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_default_block(mut self, block: BlockId) -> Self {
        self.default_block = block;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// The full JSON-RPC endpoint URL.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, self.api_key)
    }
}
