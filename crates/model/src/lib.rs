//! Contains the records a sealed-bid auction keeps on the public ledger and
//! in the per-organization private collections.

pub mod auction;
pub mod bid;
pub mod key;
pub mod time;

pub use {
    auction::{Auction, Status},
    bid::{Commitment, PlaintextBid, RevealedBid},
    key::BidKey,
};

use sha2::{Digest, Sha256};

/// Name of the implicit private data collection owned by `msp_id`.
pub fn implicit_collection(msp_id: &str) -> String {
    format!("_implicit_org_{msp_id}")
}

/// SHA-256 digest of the exact byte sequence, as the ledger computes it for
/// private data.
pub fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}
