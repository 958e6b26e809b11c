//! Bid records in their three shapes: the plaintext kept privately by the
//! bidder's organization, the hash commitment published while the auction is
//! open, and the revealed bid published after closing.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// A bid as supplied by the bidder through the transient channel. The bytes
/// of this document, not a re-serialization, are what gets stored and hashed.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlaintextBid {
    pub price: u64,
    pub org: String,
    pub bidder: String,
    #[serde(default)]
    pub valid: bool,
    /// Free form; replaced by the recorder's timestamp on reveal.
    #[serde(default)]
    pub timestamp: String,
}

impl PlaintextBid {
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Binds a bidder's organization to a bid it has not shown yet.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Commitment {
    pub org: String,
    /// Lowercase hex of the ledger's SHA-256 digest of the private bid.
    pub hash: String,
    #[serde(with = "crate::time")]
    pub timestamp: DateTime<Utc>,
}

impl Commitment {
    pub fn new(org: String, digest: &[u8], timestamp: DateTime<Utc>) -> Self {
        Self {
            org,
            hash: hex::encode(digest),
            timestamp,
        }
    }

    /// Whether `digest` is the hash this commitment was made with.
    pub fn matches(&self, digest: &[u8]) -> bool {
        self.hash == hex::encode(digest)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RevealedBid {
    pub price: u64,
    pub org: String,
    pub bidder: String,
    pub valid: bool,
    #[serde(with = "crate::time")]
    pub timestamp: DateTime<Utc>,
}

impl RevealedBid {
    /// Accepts a verified plaintext bid, stamping it with the recorder's
    /// timestamp.
    pub fn accept(bid: PlaintextBid, timestamp: DateTime<Utc>) -> Self {
        Self {
            price: bid.price,
            org: bid.org,
            bidder: bid.bidder,
            valid: true,
            timestamp,
        }
    }
}
