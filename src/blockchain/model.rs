use std::mem;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, Transaction};

/// In-memory append-only ledger: the chain plus the pool of transactions
/// waiting to be sealed into the next block. Owned by the composition
/// root and shared behind a mutex; nothing here locks.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Create a ledger with the genesis block already sealed. The genesis
    /// proof and previous-hash sentinel are fixed protocol constants, not
    /// products of mining.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.seal_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Queue a transaction for the next sealed block. Returns the index
    /// that block is expected to get; a concurrent seal can still move the
    /// transaction into a later block.
    pub fn submit_transaction(&mut self, sender: String, recipient: String, amount: f64) -> u64 {
        self.pending.push(Transaction {
            sender,
            recipient,
            amount,
        });
        self.last_block().index + 1
    }

    /// Seal the pending pool into a new block and append it. The pool is
    /// drained by move and left empty. `previous_hash` defaults to the hash
    /// of the current tip; passing it explicitly exists for genesis seeding.
    /// This is the only operation that grows the chain.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash =
            previous_hash.unwrap_or_else(|| self.last_block().compute_hash());
        let block = Block::new(
            self.chain.len() as u64 + 1,
            mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Swap the whole chain for a longer one adopted during consensus.
    /// The pending pool is untouched. Individual blocks are never mutated.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
