use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Ledger, Transaction};
use crate::peers::PeerRegistry;

/// Shared application state: the ledger, the peer set, and the identity
/// this node mints rewards to. Built once at the composition root.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub peers: Mutex<PeerRegistry>,
    /// Serializes the mine→seal sequence against chain replacement. Held
    /// across awaits, so it is an async mutex; the two std mutexes above
    /// guard short critical sections only.
    pub write_guard: tokio::sync::Mutex<()>,
    pub node_id: String,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(node_id: String) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerRegistry::new()),
            write_guard: tokio::sync::Mutex::new(()),
            node_id,
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("build http client"),
        }
    }
}

/* ---------- Transaction API models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Chain / mining API models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- Node API models ---------- */

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
    pub length: usize,
}
