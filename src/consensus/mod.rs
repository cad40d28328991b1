use log::{debug, warn};
use serde::Deserialize;

use crate::blockchain::{Block, pow};

/// Wire shape of `GET /chain` — the same response this node serves, so
/// every node speaks the identical protocol to every other node.
#[derive(Deserialize)]
struct PeerChain {
    chain: Vec<Block>,
    length: usize,
}

/// Walk `chain` from the front and check every adjacent pair: the link
/// hash must match the predecessor's canonical hash and the proof must
/// solve the puzzle against the predecessor's proof. Chains of length 0
/// or 1 are vacuously valid.
pub fn valid_chain(chain: &[Block]) -> bool {
    for pair in chain.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);
        if block.previous_hash != prev.compute_hash() {
            debug!(
                "chain invalid at index {}: previous_hash does not match",
                block.index
            );
            return false;
        }
        if !pow::valid_proof(prev.proof, block.proof) {
            debug!("chain invalid at index {}: proof fails", block.index);
            return false;
        }
    }
    true
}

/// Pick the longest candidate that is strictly longer than `local_len`
/// and passes `valid_chain`. Candidates are scanned in order; on a length
/// tie the first one seen wins.
pub fn select_longest_valid(
    local_len: usize,
    candidates: impl IntoIterator<Item = Vec<Block>>,
) -> Option<Vec<Block>> {
    let mut best: Option<Vec<Block>> = None;
    let mut best_len = local_len;

    for candidate in candidates {
        if candidate.len() > best_len && valid_chain(&candidate) {
            best_len = candidate.len();
            best = Some(candidate);
        }
    }
    best
}

/// Fetch a peer's chain. Any failure — connection error, timeout,
/// non-success status, malformed body, or a reported length that
/// disagrees with the chain itself — excludes the peer from this
/// resolution round; nothing is retried.
pub async fn fetch_chain(client: &reqwest::Client, peer: &str) -> Option<Vec<Block>> {
    let url = format!("http://{peer}/chain");
    let response = match client.get(&url).send().await {
        Ok(resp) => resp,
        Err(err) => {
            warn!("peer {peer} unreachable: {err}");
            return None;
        }
    };
    if !response.status().is_success() {
        warn!("peer {peer} answered {}", response.status());
        return None;
    }
    match response.json::<PeerChain>().await {
        Ok(body) if body.length == body.chain.len() => Some(body.chain),
        Ok(body) => {
            warn!(
                "peer {peer} reported length {} for a chain of {} blocks",
                body.length,
                body.chain.len()
            );
            None
        }
        Err(err) => {
            warn!("peer {peer} returned a malformed chain: {err}");
            None
        }
    }
}

/// Query every peer and return the longest valid chain that beats
/// `local_len`, or None when the local chain is already authoritative.
/// Peers are visited in hash-set order; the resulting tie-break is
/// accepted nondeterminism.
pub async fn find_longer_chain<'a>(
    client: &reqwest::Client,
    peers: impl IntoIterator<Item = &'a str>,
    local_len: usize,
) -> Option<Vec<Block>> {
    let mut candidates = Vec::new();
    for peer in peers {
        if let Some(candidate) = fetch_chain(client, peer).await {
            debug!("peer {peer} offered a chain of {} blocks", candidate.len());
            candidates.push(candidate);
        }
    }
    select_longest_valid(local_len, candidates)
}
