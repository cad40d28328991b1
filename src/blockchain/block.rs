use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A transfer record. Free-form: no signature, no balance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

/// A single block in the chain holding a batch of transactions and the
/// proof that mined it. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds, microsecond precision
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Compute the SHA-256 digest of this block over its canonical JSON
    /// rendering: object keys sorted at every level, no incidental
    /// whitespace. Two structurally identical blocks hash identically
    /// regardless of construction order. Returns 64 lowercase hex chars.
    pub fn compute_hash(&self) -> String {
        let canonical = serde_json::to_value(self).expect("serialize block");
        let preimage = serde_json::to_string(&canonical).expect("render canonical json");
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Current wall-clock time as fractional Unix seconds. Quantized to
/// microseconds so the f64 has a stable shortest-round-trip rendering.
fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
