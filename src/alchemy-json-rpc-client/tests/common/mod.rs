#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use alchemy_json_rpc_client::{
    AlchemyClient, Call, Client, ClientConfig, Id, JsonRpcError, JsonRpcResult, MethodCall,
    Output, Params, Request, Response, Version,
};
use jsonrpc_core::{ErrorCode, Failure, Success};
use serde_json::{json, Value};

pub const EOA_ADDRESS: &str = "0x549c660ce2b988f588769d6ad87be801695b2be3";
pub const USDC_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const FAILING_ADDRESS: &str = "0x549c660ce2b988f588769d6ad87be801695b2be1";
pub const RICH_ADDRESS: &str = "0x558FA75074cc7cF045C764aEd47D37776Ea697d2";
pub const LOG_ADDRESS: &str = "0xb59f67a8bff5d8cd03f6ac17265c550ed8f33907";

pub const USDC_CODE: &str = "0x608060405260043610";
pub const EOA_CODE: &str = "0x";

pub const LOGS: &str = r#"[
    {
        "address": "0xb59f67a8bff5d8cd03f6ac17265c550ed8f33907",
        "blockHash": "0x8243343df08b9751f5ca0c5f8c9c0460d8a9b6351066fae0acbd4d3e776de8bb",
        "blockNumber": "0x429d3b",
        "data": "0x000000000000000000000000000000000000000000000000000000012a05f200",
        "logIndex": "0x56",
        "removed": false,
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x00000000000000000000000000b46c2526e227482e2ebb8f4c69e4674d262e75",
            "0x00000000000000000000000054a2d42a40f51259dedd1978f6c118a0f0eff078"
        ],
        "transactionHash": "0xab059a62e22e230fe0f56d8555340a29b2e9532360368f810595453f6fdd213b",
        "transactionIndex": "0xac"
    }
]"#;

type Handler = dyn Fn(&Request) -> JsonRpcResult<Response> + Send + Sync;

/// A transport that records every request and answers with `handler`.
#[derive(Clone)]
pub struct SpyClient {
    requests: Arc<Mutex<Vec<Request>>>,
    handler: Arc<Handler>,
}

impl SpyClient {
    pub fn new(
        handler: impl Fn(&Request) -> JsonRpcResult<Response> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Default::default(),
            handler: Arc::new(handler),
        }
    }

    /// Answers every call with [`mock_node`], keeping the request order.
    pub fn mock_node() -> Self {
        Self::answering_with(mock_node)
    }

    /// Answers every call with `answer`, keeping the request order.
    pub fn answering_with(answer: fn(&MethodCall) -> Output) -> Self {
        Self::new(move |request| Ok(answer_calls(request, answer)))
    }

    /// Answers every batch with the outputs in reverse order.
    pub fn reversed_mock_node() -> Self {
        Self::new(|request| {
            Ok(match answer_calls(request, mock_node) {
                Response::Batch(mut outputs) => {
                    outputs.reverse();
                    Response::Batch(outputs)
                }
                single => single,
            })
        })
    }

    /// Fails every request at the transport level.
    pub fn unreachable() -> Self {
        Self::new(|_| {
            let err = serde_json::from_str::<Value>("<html>bad gateway</html>").unwrap_err();
            Err(JsonRpcError::Json(err))
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Client for SpyClient {
    fn send_rpc_request(
        &self,
        request: Request,
    ) -> Pin<Box<dyn Future<Output = JsonRpcResult<Response>> + Send>> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        Box::pin(async move { response })
    }
}

pub fn client(spy: &SpyClient) -> AlchemyClient<SpyClient> {
    AlchemyClient::new(spy.clone(), ClientConfig::new("test-key"))
}

fn answer_calls(request: &Request, answer: fn(&MethodCall) -> Output) -> Response {
    let answer_call = |call: &Call| match call {
        Call::MethodCall(call) => answer(call),
        _ => failure(Id::Null, -32600, "Invalid Request"),
    };
    match request {
        Request::Single(call) => Response::Single(answer_call(call)),
        Request::Batch(calls) => Response::Batch(calls.iter().map(answer_call).collect()),
    }
}

pub fn success(id: Id, result: Value) -> Output {
    Output::Success(Success {
        jsonrpc: Some(Version::V2),
        result,
        id,
    })
}

pub fn failure(id: Id, code: i64, message: &str) -> Output {
    Output::Failure(Failure {
        jsonrpc: Some(Version::V2),
        error: jsonrpc_core::Error {
            code: ErrorCode::ServerError(code),
            message: message.to_string(),
            data: None,
        },
        id,
    })
}

/// Returns the positional parameter at `index` of `call`.
pub fn param(call: &MethodCall, index: usize) -> Value {
    match &call.params {
        Params::Array(params) => params.get(index).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// A fake Ethereum node with a handful of known accounts.
pub fn mock_node(call: &MethodCall) -> Output {
    let id = call.id.clone();
    match call.method.as_str() {
        "eth_blockNumber" => success(id, json!("0x1234")),
        "eth_getCode" => match param(call, 0).as_str().unwrap_or_default() {
            EOA_ADDRESS => success(id, json!(EOA_CODE)),
            USDC_ADDRESS => success(id, json!(USDC_CODE)),
            FAILING_ADDRESS => failure(id, -123, "wrong Response"),
            _ => success(id, json!("")),
        },
        "eth_getBalance" => match param(call, 0).as_str().unwrap_or_default() {
            EOA_ADDRESS => success(id, json!("0x474a58f10b7140")),
            RICH_ADDRESS => success(id, json!("0x19b225cec6808")),
            USDC_ADDRESS => success(id, json!("")),
            FAILING_ADDRESS => failure(id, -123, "wrong Response"),
            _ => success(id, json!("0x0")),
        },
        "eth_getLogs" => match param(call, 0)["toBlock"].as_str().unwrap_or_default() {
            "pending" => failure(id, -1234, "Test Error"),
            "latest" => success(id, serde_json::from_str(LOGS).unwrap()),
            _ => success(id, json!("0x474a58f10b7140")),
        },
        _ => failure(id, -32601, "Method not found"),
    }
}

/// Returns the method calls carried by `request`.
pub fn method_calls(request: &Request) -> Vec<MethodCall> {
    let calls = match request {
        Request::Single(call) => vec![call.clone()],
        Request::Batch(calls) => calls.clone(),
    };
    calls
        .into_iter()
        .filter_map(|call| match call {
            Call::MethodCall(call) => Some(call),
            _ => None,
        })
        .collect()
}
