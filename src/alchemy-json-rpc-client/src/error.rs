//! Error types for the Alchemy JSON-RPC client.

use jsonrpc_core::{Failure, Id};
use thiserror::Error;

/// Result type for the Alchemy JSON-RPC client.
pub type JsonRpcResult<T> = std::result::Result<T, JsonRpcError>;

/// Broad classification of a [`JsonRpcError`], so callers can branch on the
/// failure class without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected before any network call was made.
    Validation,
    /// The network call failed or the endpoint answered with something that
    /// is not a well formed JSON-RPC response to the request.
    Transport,
    /// The endpoint returned a JSON-RPC error object for the call.
    Remote,
    /// The endpoint returned a result that could not be decoded.
    Decoding,
}

/// Error type for the Alchemy JSON-RPC client.
#[derive(Error, Debug)]
pub enum JsonRpcError {
    /// The address is not `0x` followed by 40 hex digits.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    /// The block identifier is neither a known tag nor a hex quantity.
    #[error("invalid block identifier: {0:?}")]
    InvalidBlockId(String),
    /// Two calls of the same batch share a correlation id.
    #[error("duplicated request id in batch: {0:?}")]
    DuplicateId(Id),
    /// Reqwest error.
    #[cfg(feature = "reqwest")]
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// HTTP error.
    #[cfg(feature = "reqwest")]
    #[error("HTTP error {code}: {text}")]
    Http {
        /// HTTP status code.
        code: reqwest::StatusCode,
        /// HTTP response text.
        text: String,
    },
    /// Error while encoding the request or parsing the JSON response.
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    /// The endpoint answered a batch with a single error object.
    #[error("batch rejected: {} (code {})", .0.error.message, .0.error.code.code())]
    BatchRejected(Failure),
    /// A single request was sent, but a batch response was received.
    #[error("unexpected batch response: expected single but got batch")]
    UnexpectedBatch,
    /// A batch request was sent, but a single success response was received.
    #[error("unexpected single response: expected batch of {0}")]
    UnexpectedSingle(usize),
    /// A batch request was sent, but the number of responses is not equal to the number of requests.
    #[error("unexpected response: expected {expected} but got {actual}")]
    UnexpectedResultsAmount { expected: usize, actual: usize },
    /// A response carries an id that does not belong to any pending request,
    /// or answers the same request twice.
    #[error("unexpected response id: {0:?}")]
    UnexpectedResponseId(Id),
    /// No response answers the request with this id.
    #[error("missing response for request id: {0:?}")]
    MissingResponse(Id),
    /// The endpoint returned an error object for a single call.
    #[error("remote error {}: {}", .0.code.code(), .0.message)]
    Remote(jsonrpc_core::Error),
    /// The endpoint returned a result of an unexpected shape.
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

impl JsonRpcError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JsonRpcError::InvalidAddress(_)
            | JsonRpcError::InvalidBlockId(_)
            | JsonRpcError::DuplicateId(_) => ErrorKind::Validation,
            JsonRpcError::Remote(_) => ErrorKind::Remote,
            JsonRpcError::Decoding(_) => ErrorKind::Decoding,
            _ => ErrorKind::Transport,
        }
    }
}

impl From<ItemError> for JsonRpcError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Remote(err) => JsonRpcError::Remote(err),
            ItemError::Decoding(err) => JsonRpcError::Decoding(err),
        }
    }
}

/// A successful result whose payload is not of the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to decode {value} as {expected}")]
pub struct DecodingError {
    /// What the payload was expected to be.
    pub expected: &'static str,
    /// The offending payload, as JSON text.
    pub value: String,
}

impl DecodingError {
    pub(crate) fn new(expected: &'static str, value: impl ToString) -> Self {
        Self {
            expected,
            value: value.to_string(),
        }
    }
}

/// Failure of one call inside a batch. It is recorded next to the call's
/// address and never aborts the sibling calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    /// The endpoint returned an error object for this call.
    #[error("remote error {}: {}", .0.code.code(), .0.message)]
    Remote(jsonrpc_core::Error),
    /// The endpoint returned a result that could not be decoded.
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

impl ItemError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::Remote(_) => ErrorKind::Remote,
            ItemError::Decoding(_) => ErrorKind::Decoding,
        }
    }
}
