use sha2::{Digest, Sha256};

use super::DIFFICULTY;

/// Check whether `proof` solves the puzzle for `last_proof`: the SHA-256
/// of the two proofs as concatenated decimal text must start with
/// `DIFFICULTY` hex zeros.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let mut hasher = Sha256::new();
    hasher.update(format!("{last_proof}{proof}").as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest.as_bytes()[..DIFFICULTY].iter().all(|&b| b == b'0')
}

/// Brute-force search for a proof valid against `last_proof`. Trials start
/// at 0 and increment by 1; the loop is CPU-bound and unbounded but
/// terminates in ~16^DIFFICULTY iterations on average.
pub fn proof_of_work(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

#[cfg(test)]
mod tests {
    use super::{proof_of_work, valid_proof};

    #[test]
    fn mined_proof_satisfies_predicate() {
        let proof = proof_of_work(100);
        assert!(valid_proof(100, proof));
    }

    #[test]
    fn search_returns_the_smallest_valid_proof() {
        // proof_of_work scans upward from 0, so every smaller trial must fail.
        let proof = proof_of_work(0);
        for trial in 0..proof {
            assert!(!valid_proof(0, trial));
        }
    }

    #[test]
    fn predicate_holds_for_any_last_proof() {
        for last_proof in [0, 1, 100, u64::MAX] {
            assert!(valid_proof(last_proof, proof_of_work(last_proof)));
        }
    }
}
