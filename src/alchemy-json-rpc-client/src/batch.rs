//! Correlation of batched JSON-RPC calls with their responses.
//!
//! Every call of a batch carries a unique [`Id`]. The endpoint is free to
//! answer the calls of a batch in any order, so responses are matched back
//! to their calls by id and never by position.

use std::collections::HashMap;

use jsonrpc_core::{Id, MethodCall, Output, Params, Version};
use serde_json::Value;

use crate::error::{ItemError, JsonRpcError, JsonRpcResult};

/// Builds one call of `method` per parameter list. The position of each
/// call in the batch is used as its id.
pub fn build_calls(method: &str, params: impl IntoIterator<Item = Params>) -> Vec<MethodCall> {
    params
        .into_iter()
        .enumerate()
        .map(|(index, params)| MethodCall {
            jsonrpc: Some(Version::V2),
            method: method.to_owned(),
            params,
            id: Id::Num(index as u64),
        })
        .collect()
}

/// Orders `outputs` to match `ids`, the ids of the calls in submission order.
///
/// The response set must answer every call exactly once. Anything else means
/// the transport delivered a malformed response and the whole batch fails,
/// since results could otherwise be attached to the wrong input.
pub fn correlate(ids: &[Id], outputs: Vec<Output>) -> JsonRpcResult<Vec<Output>> {
    if ids.len() != outputs.len() {
        return Err(JsonRpcError::UnexpectedResultsAmount {
            expected: ids.len(),
            actual: outputs.len(),
        });
    }

    let mut by_id = HashMap::with_capacity(outputs.len());
    for output in outputs {
        let id = output.id().clone();
        if !ids.contains(&id) || by_id.contains_key(&id) {
            return Err(JsonRpcError::UnexpectedResponseId(id));
        }
        by_id.insert(id, output);
    }

    ids.iter()
        .map(|id| {
            by_id
                .remove(id)
                .ok_or_else(|| JsonRpcError::MissingResponse(id.clone()))
        })
        .collect()
}

/// Extracts the result of a call, or the error object the endpoint returned
/// for it.
pub fn output_value(output: Output) -> Result<Value, ItemError> {
    match output {
        Output::Success(success) => Ok(success.result),
        Output::Failure(failure) => {
            log::debug!("call {:?} failed: {:?}", failure.id, failure.error);
            Err(ItemError::Remote(failure.error))
        }
    }
}
