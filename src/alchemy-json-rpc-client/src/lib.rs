use std::future::Future;
use std::pin::Pin;

use itertools::Itertools;
pub use jsonrpc_core::{Call, Id, MethodCall, Output, Params, Request, Response, Version};
use num::BigUint;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub mod address;
pub mod batch;
pub mod config;
pub mod decode;
pub mod error;
pub mod types;

#[cfg(feature = "reqwest")]
pub mod reqwest;

pub use address::{is_valid_address, validate_addresses};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{DecodingError, ErrorKind, ItemError, JsonRpcError, JsonRpcResult};
pub use types::{Balance, BlockId, ContractCode, LogEntry, LogFilter};

pub const ETH_BLOCK_NUMBER_METHOD: &str = "eth_blockNumber";
pub const ETH_GET_CODE_METHOD: &str = "eth_getCode";
pub const ETH_GET_BALANCE_METHOD: &str = "eth_getBalance";
pub const ETH_GET_LOGS_METHOD: &str = "eth_getLogs";

macro_rules! make_params_array {
    ($($items:expr),*) => {
        Params::Array(vec![$(serde_json::to_value($items)?, )*])
    };
}

/// A client for reading Ethereum state through the Alchemy JSON-RPC gateway.
#[derive(Clone)]
pub struct AlchemyClient<C: Client> {
    client: C,
    config: ClientConfig,
}

#[cfg(feature = "reqwest")]
impl AlchemyClient<crate::reqwest::ReqwestClient> {
    /// Creates a client for the mainnet gateway with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> JsonRpcResult<Self> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Creates a client talking HTTP to the endpoint described by `config`.
    pub fn from_config(config: ClientConfig) -> JsonRpcResult<Self> {
        let client = crate::reqwest::ReqwestClient::from_config(&config)?;
        Ok(Self::new(client, config))
    }
}

impl<C: Client> AlchemyClient<C> {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `client` - The transport the JSON-RPC requests are sent through.
    /// * `config` - Client settings; only `default_block` is read here, the
    ///   endpoint settings belong to the transport.
    pub fn new(client: C, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn resolve_block(&self, block: Option<BlockId>) -> BlockId {
        block.unwrap_or(self.config.default_block)
    }

    /// Returns the number of the most recent block.
    pub async fn get_block_number(&self) -> JsonRpcResult<u64> {
        let value: Value = self
            .single_request(
                ETH_BLOCK_NUMBER_METHOD,
                make_params_array!(),
                Id::Str(ETH_BLOCK_NUMBER_METHOD.to_string()),
            )
            .await?;
        Ok(decode::decode_u64(&value)?)
    }

    /// Returns the hex encoded code of the given contract, `"0x"` for an
    /// account without code.
    pub async fn get_contract_code(
        &self,
        address: &str,
        block: Option<BlockId>,
    ) -> JsonRpcResult<String> {
        validate_addresses(&[address])?;
        let value: Value = self
            .single_request(
                ETH_GET_CODE_METHOD,
                make_params_array!(address, self.resolve_block(block)),
                Id::Str(ETH_GET_CODE_METHOD.to_string()),
            )
            .await?;
        Ok(decode::decode_hex_string(&value)?)
    }

    /// Returns the balance of the address in wei.
    pub async fn get_balance(
        &self,
        address: &str,
        block: Option<BlockId>,
    ) -> JsonRpcResult<BigUint> {
        validate_addresses(&[address])?;
        let value: Value = self
            .single_request(
                ETH_GET_BALANCE_METHOD,
                make_params_array!(address, self.resolve_block(block)),
                Id::Str(ETH_GET_BALANCE_METHOD.to_string()),
            )
            .await?;
        Ok(decode::decode_quantity(&value)?)
    }

    /// Get EVM logs according to the given filter.
    pub async fn get_logs(&self, filter: &LogFilter) -> JsonRpcResult<Vec<LogEntry>> {
        validate_addresses(&filter.address)?;
        self.single_request(
            ETH_GET_LOGS_METHOD,
            make_params_array!(filter),
            Id::Str(ETH_GET_LOGS_METHOD.to_string()),
        )
        .await
    }

    /// Returns the code of every address, in the order of `addresses`.
    ///
    /// All addresses are validated before anything is sent: a single
    /// malformed address fails the whole call. A remote or decoding failure
    /// of one address is reported in its [`ContractCode::error`] and does not
    /// affect the others.
    pub async fn get_contract_code_batch<S: AsRef<str> + Sync>(
        &self,
        addresses: &[S],
        block: Option<BlockId>,
    ) -> JsonRpcResult<Vec<ContractCode>> {
        let outputs = self
            .address_batch(ETH_GET_CODE_METHOD, addresses, block)
            .await?;

        Ok(addresses
            .iter()
            .zip(outputs)
            .map(|(address, output)| {
                let decoded = batch::output_value(output)
                    .and_then(|value| decode::decode_hex_string(&value).map_err(ItemError::from));
                let (code, error) = match decoded {
                    Ok(code) => (code, None),
                    Err(err) => (String::new(), Some(err)),
                };
                ContractCode {
                    address: address.as_ref().to_string(),
                    code,
                    error,
                }
            })
            .collect())
    }

    /// Returns the balance of every address, in the order of `addresses`.
    ///
    /// Validation and failure isolation work as in
    /// [`get_contract_code_batch`](Self::get_contract_code_batch).
    pub async fn get_balance_batch<S: AsRef<str> + Sync>(
        &self,
        addresses: &[S],
        block: Option<BlockId>,
    ) -> JsonRpcResult<Vec<Balance>> {
        let outputs = self
            .address_batch(ETH_GET_BALANCE_METHOD, addresses, block)
            .await?;

        Ok(addresses
            .iter()
            .zip(outputs)
            .map(|(address, output)| {
                let decoded = batch::output_value(output)
                    .and_then(|value| decode::decode_quantity(&value).map_err(ItemError::from));
                let (amount, error) = match decoded {
                    Ok(amount) => (Some(amount), None),
                    Err(err) => (None, Some(err)),
                };
                Balance {
                    address: address.as_ref().to_string(),
                    amount,
                    error,
                }
            })
            .collect())
    }

    /// Sends `method(address, block)` for every address in one batch and
    /// returns the outputs in the order of `addresses`.
    async fn address_batch<S: AsRef<str> + Sync>(
        &self,
        method: &str,
        addresses: &[S],
        block: Option<BlockId>,
    ) -> JsonRpcResult<Vec<Output>> {
        validate_addresses(addresses)?;
        let block = self.resolve_block(block);

        let params = addresses
            .iter()
            .map(|address| -> JsonRpcResult<Params> {
                Ok(make_params_array!(address.as_ref(), block))
            })
            .collect::<JsonRpcResult<Vec<_>>>()?;
        let calls = batch::build_calls(method, params);
        let ids = calls.iter().map(|call| call.id.clone()).collect::<Vec<_>>();

        let outputs = self.batch_request(calls).await?;
        batch::correlate(&ids, outputs)
    }

    /// Performs a request.
    pub async fn request(&self, request: Request) -> JsonRpcResult<Response> {
        self.client.send_rpc_request(request).await
    }

    /// Performs a single request and deserializes its result.
    pub async fn single_request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
        id: Id,
    ) -> JsonRpcResult<R> {
        let request = Request::Single(Call::MethodCall(MethodCall {
            jsonrpc: Some(Version::V2),
            method: method.to_owned(),
            params,
            id,
        }));

        let response = self.client.send_rpc_request(request).await?;

        match response {
            Response::Single(output) => {
                let value = batch::output_value(output)?;
                R::deserialize(&value).map_err(|_| {
                    DecodingError::new(std::any::type_name::<R>(), &value).into()
                })
            }
            Response::Batch(_) => Err(JsonRpcError::UnexpectedBatch),
        }
    }

    /// Sends all `calls` in a single batch request.
    ///
    /// Returns the outputs as delivered by the transport, which are not
    /// necessarily in the order of `calls`; see [`batch::correlate`]. A
    /// transport failure fails the whole batch and no output is returned.
    pub async fn batch_request(&self, calls: Vec<MethodCall>) -> JsonRpcResult<Vec<Output>> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(id) = calls.iter().map(|call| &call.id).duplicates().next() {
            return Err(JsonRpcError::DuplicateId(id.clone()));
        }

        let batch_size = calls.len();
        let first_id = calls[0].id.clone();
        log::debug!("sending batch of {batch_size} calls");

        let request = Request::Batch(calls.into_iter().map(Call::MethodCall).collect());
        let response = self.client.send_rpc_request(request).await?;

        match response {
            Response::Batch(outputs) => Ok(outputs),
            // some endpoints unwrap the response to a batch of one
            Response::Single(output) if batch_size == 1 && output.id() == &first_id => {
                Ok(vec![output])
            }
            Response::Single(Output::Failure(failure)) => {
                Err(JsonRpcError::BatchRejected(failure))
            }
            Response::Single(Output::Success(_)) => Err(JsonRpcError::UnexpectedSingle(batch_size)),
        }
    }
}

pub trait Client: Clone + Send + Sync {
    /// Send RPC request.
    fn send_rpc_request(
        &self,
        request: Request,
    ) -> Pin<Box<dyn Future<Output = JsonRpcResult<Response>> + Send>>;
}
