//! Deterministic choice of a bid's canonical timestamp.
//!
//! Every endorser fetches the same candidate list from the recorder and must
//! pick the same element, so the choice depends on nothing but the
//! transaction id and the list.

use {
    crate::error::{Error, Result},
    chrono::{DateTime, Utc},
    rand::{RngCore, SeedableRng},
    rand_chacha::ChaCha8Rng,
    sha2::{Digest, Sha256},
};

/// First eight bytes of SHA-256 of the transaction id, big endian.
pub fn seed(tx_id: &str) -> u64 {
    let digest = Sha256::digest(tx_id.as_bytes());
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Shuffles the candidates with a generator seeded from `tx_id` and returns
/// the first one.
///
/// The result must not depend on the `rand` release, so this is a plain
/// Fisher-Yates pass over the ChaCha8 stream.
pub fn select(tx_id: &str, mut candidates: Vec<String>) -> Result<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed(tx_id));
    for i in (1..candidates.len()).rev() {
        let j = rng.next_u64() % (i as u64 + 1);
        candidates.swap(i, j as usize);
    }
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoTimestamps(tx_id.to_string()))
}

/// Selects and parses the canonical timestamp of `tx_id`.
pub fn canonical_timestamp(tx_id: &str, candidates: Vec<String>) -> Result<DateTime<Utc>> {
    let selected = select(tx_id, candidates)?;
    model::time::parse_recorder_timestamp(&selected).map_err(Error::InvalidTimestamp)
}
