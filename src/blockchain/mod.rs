pub mod block;
pub mod model;
pub mod pow;

pub use block::{Block, Transaction};
pub use model::Ledger;

/// Proof-of-Work difficulty: required count of leading hex zeros. Fixed
/// protocol constant, not configurable.
pub const DIFFICULTY: usize = 4;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel previous-hash of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender sentinel for the mining reward transaction.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to this node for each block it mines.
pub const REWARD_AMOUNT: f64 = 1.0;
