#![allow(dead_code)]

use alloy::{
    hex,
    primitives::{Address, B256, address},
    providers::{Provider, ProviderBuilder},
    rpc::types::{Log, TransactionRequest},
    sol_types::SolEvent,
};
use mockito::{Mock, Server, ServerGuard};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub const GOVERNOR: Address = address!("0xf07DeD9dC292157749B6Fd268E37DF6EA38395B9");
pub const VOTER: Address = address!("0x1B686eE8E31c5959D9F5BBd8122a58682788eeaD");
pub const SENT_TX_HASH: B256 = B256::repeat_byte(0x33);
pub const DEPLOYED: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

#[derive(Default)]
struct NodeState {
    calls: HashMap<[u8; 4], Vec<u8>>,
    logs: Vec<Log>,
    log_filters: Vec<Value>,
    block_number: u64,
    sent: Vec<Value>,
    filter_changes: Vec<Log>,
}

/// Minimal JSON-RPC node backed by a mockito server. Answers `eth_call` by
/// selector, `eth_getLogs` with a fixed set of logs, accepts every
/// `eth_sendTransaction`, and serves one log filter for polling.
pub struct FakeNode {
    server: ServerGuard,
    state: Arc<Mutex<NodeState>>,
    _mock: Mock,
}

impl FakeNode {
    pub async fn start() -> Self {
        let mut server = Server::new_async().await;
        let state = Arc::new(Mutex::new(NodeState::default()));

        let handler_state = state.clone();
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |request| {
                let body: Value = serde_json::from_slice(request.body().expect("request body"))
                    .expect("json-rpc request");
                let response = handle(&handler_state, &body);
                serde_json::to_vec(&response).expect("json-rpc response")
            })
            .expect_at_least(1)
            .create_async()
            .await;

        Self {
            server,
            state,
            _mock: mock,
        }
    }

    pub fn provider(&self) -> impl Provider + Clone + use<> {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(self.server.url().parse().expect("mock server url"))
    }

    pub fn on_call(&self, selector: [u8; 4], output: Vec<u8>) {
        self.state.lock().unwrap().calls.insert(selector, output);
    }

    pub fn push_log<E: SolEvent>(&self, event: &E, block_number: u64, log_index: u64) {
        let log = governor_log(event, block_number, log_index);
        self.state.lock().unwrap().logs.push(log);
    }

    /// Queues a log for the next `eth_getFilterChanges` poll.
    pub fn push_filter_change<E: SolEvent>(&self, event: &E, block_number: u64, log_index: u64) {
        let log = governor_log(event, block_number, log_index);
        self.state.lock().unwrap().filter_changes.push(log);
    }

    pub fn set_block_number(&self, block_number: u64) {
        self.state.lock().unwrap().block_number = block_number;
    }

    pub fn log_filters(&self) -> Vec<Value> {
        self.state.lock().unwrap().log_filters.clone()
    }

    /// Transaction requests received through `eth_sendTransaction`.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state
            .lock()
            .unwrap()
            .sent
            .iter()
            .map(|tx| serde_json::from_value(tx.clone()).expect("transaction request"))
            .collect()
    }
}

fn governor_log<E: SolEvent>(event: &E, block_number: u64, log_index: u64) -> Log {
    Log {
        inner: alloy::primitives::Log {
            address: GOVERNOR,
            data: event.encode_log_data(),
        },
        block_hash: Some(B256::with_last_byte(block_number as u8)),
        block_number: Some(block_number),
        block_timestamp: None,
        transaction_hash: Some(B256::repeat_byte(0x22)),
        transaction_index: Some(0),
        log_index: Some(log_index),
        removed: false,
    }
}

fn handle(state: &Arc<Mutex<NodeState>>, request: &Value) -> Value {
    let id = request["id"].clone();
    let mut state = state.lock().unwrap();

    match request["method"].as_str().unwrap_or_default() {
        "eth_call" => {
            let tx = &request["params"][0];
            let input = tx["input"].as_str().or_else(|| tx["data"].as_str()).unwrap_or_default();
            let calldata = hex::decode(input).unwrap_or_default();
            let selector: Option<[u8; 4]> = calldata.get(..4).and_then(|s| s.try_into().ok());

            match selector.and_then(|s| state.calls.get(&s)) {
                Some(output) => json!({"jsonrpc": "2.0", "id": id, "result": hex::encode_prefixed(output)}),
                None => json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": 3, "message": "execution reverted"}
                }),
            }
        }
        "eth_getLogs" => {
            state.log_filters.push(request["params"][0].clone());
            json!({"jsonrpc": "2.0", "id": id, "result": state.logs})
        }
        "eth_sendTransaction" => {
            state.sent.push(request["params"][0].clone());
            json!({"jsonrpc": "2.0", "id": id, "result": SENT_TX_HASH})
        }
        "eth_getTransactionReceipt" => {
            let from = state.sent.last().map(|tx| tx["from"].clone()).unwrap_or(Value::Null);
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "type": "0x2",
                    "status": "0x1",
                    "cumulativeGasUsed": "0x5208",
                    "logs": [],
                    "logsBloom": format!("0x{}", "00".repeat(256)),
                    "transactionHash": SENT_TX_HASH,
                    "transactionIndex": "0x0",
                    "blockHash": B256::repeat_byte(0x44),
                    "blockNumber": "0x1",
                    "gasUsed": "0x5208",
                    "effectiveGasPrice": "0x1",
                    "from": from,
                    "to": null,
                    "contractAddress": DEPLOYED,
                }
            })
        }
        "eth_newFilter" => {
            state.log_filters.push(request["params"][0].clone());
            json!({"jsonrpc": "2.0", "id": id, "result": "0x1"})
        }
        "eth_getFilterChanges" => {
            let changes = std::mem::take(&mut state.filter_changes);
            json!({"jsonrpc": "2.0", "id": id, "result": changes})
        }
        "eth_uninstallFilter" => json!({"jsonrpc": "2.0", "id": id, "result": true}),
        "eth_blockNumber" => {
            json!({"jsonrpc": "2.0", "id": id, "result": format!("0x{:x}", state.block_number)})
        }
        "eth_chainId" => json!({"jsonrpc": "2.0", "id": id, "result": "0x1"}),
        other => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": format!("method {other} not found")}
        }),
    }
}
