use std::fmt;
use std::str::FromStr;

use num::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodingError, ItemError, JsonRpcError};

/// Selects the chain state a read applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockId {
    /// The most recent block.
    #[default]
    Latest,
    /// The pending state, including not yet mined transactions.
    Pending,
    /// The most recent block considered safe from reorgs.
    Safe,
    /// The most recent finalized block.
    Finalized,
    /// The genesis block.
    Earliest,
    /// An explicit block number.
    Number(u64),
}

impl BlockId {
    const LATEST: &'static str = "latest";
    const PENDING: &'static str = "pending";
    const SAFE: &'static str = "safe";
    const FINALIZED: &'static str = "finalized";
    const EARLIEST: &'static str = "earliest";
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Latest => f.write_str(Self::LATEST),
            BlockId::Pending => f.write_str(Self::PENDING),
            BlockId::Safe => f.write_str(Self::SAFE),
            BlockId::Finalized => f.write_str(Self::FINALIZED),
            BlockId::Earliest => f.write_str(Self::EARLIEST),
            BlockId::Number(number) => write!(f, "{number:#x}"),
        }
    }
}

impl FromStr for BlockId {
    type Err = JsonRpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::LATEST => Ok(BlockId::Latest),
            Self::PENDING => Ok(BlockId::Pending),
            Self::SAFE => Ok(BlockId::Safe),
            Self::FINALIZED => Ok(BlockId::Finalized),
            Self::EARLIEST => Ok(BlockId::Earliest),
            _ => s
                .strip_prefix("0x")
                .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|digits| u64::from_str_radix(digits, 16).ok())
                .map(BlockId::Number)
                .ok_or_else(|| JsonRpcError::InvalidBlockId(s.to_string())),
        }
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        BlockId::Number(number)
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parameters to `eth_getLogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    /// Addresses of contracts to filter logs for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    /// Start search logs from this block.
    pub from_block: BlockId,
    /// Finish search logs on this block.
    pub to_block: BlockId,
    /// Filter logs by topics, position by position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
}

impl LogFilter {
    pub fn new(address: Vec<String>, from_block: BlockId, to_block: BlockId) -> Self {
        Self {
            address,
            from_block,
            to_block,
            topics: Vec::new(),
        }
    }

    pub fn with_topics(mut self, topics: impl IntoIterator<Item = String>) -> Self {
        self.topics = topics.into_iter().collect();
        self
    }
}

/// A log entry returned by `eth_getLogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub address: String,
    pub block_hash: String,
    pub block_number: String,
    pub data: String,
    pub log_index: String,
    pub removed: bool,
    pub topics: Vec<String>,
    pub transaction_hash: String,
    pub transaction_index: String,
}

/// Contract code of one address of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCode {
    pub address: String,
    /// Hex encoded code, `"0x"` for accounts without code. Empty when
    /// `error` is set.
    pub code: String,
    pub error: Option<ItemError>,
}

impl ContractCode {
    /// Converts into the code or the per-address error.
    pub fn into_result(self) -> Result<String, ItemError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.code),
        }
    }
}

/// Balance of one address of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub address: String,
    /// Balance in wei. `None` when `error` is set.
    pub amount: Option<BigUint>,
    pub error: Option<ItemError>,
}

impl Balance {
    /// Converts into the amount or the per-address error. A balance with
    /// neither an amount nor an error is reported as a decoding error.
    pub fn into_result(self) -> Result<BigUint, ItemError> {
        match self.error {
            Some(err) => Err(err),
            None => self
                .amount
                .ok_or_else(|| DecodingError::new("balance", "null").into()),
        }
    }
}
