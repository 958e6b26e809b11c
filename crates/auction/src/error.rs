//! Errors returned to the invoking client. Any error aborts the transaction,
//! so none of them leave a partial write behind.

use {
    model::{BidKey, Status, key::InvalidKey},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} key not found in the transient map")]
    NoTransient(&'static str),
    #[error("invalid datetime format: {0}")]
    InvalidTimelimit(chrono::ParseError),
    #[error("failed to read submitter certificate: {0}")]
    InvalidCertificate(String),
    #[error(transparent)]
    InvalidKey(#[from] InvalidKey),
    #[error("failed to decode bid: {0}")]
    InvalidBid(serde_json::Error),
    #[error("unknown transaction {0:?}")]
    UnknownFunction(String),
    #[error("{function} expects {expected} arguments, got {actual}")]
    WrongArguments {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "cannot store bid on this peer, not a member of this org: client from {client}, peer \
         from {peer}"
    )]
    WrongPeer { client: String, peer: String },
    #[error("auction can only be {action} by seller")]
    NotSeller { action: &'static str },
    #[error("permission denied, client {client} is not the owner of the bid")]
    NotBidder { client: String },

    #[error("auction {0} does not exist")]
    AuctionNotFound(String),
    #[error("auction {0} already exists")]
    AuctionExists(String),
    #[error("auction is {actual}, expected it to be {expected}")]
    InvalidStatus { expected: Status, actual: Status },
    #[error("bid hash does not exist: {0}")]
    NoPrivateBid(BidKey),
    #[error("bid {0} has not been submitted to the auction")]
    NoCommitment(BidKey),
    #[error("no bids have been revealed, cannot end auction")]
    NoRevealedBids,
    #[error("cannot end auction, {} bids have not been revealed", .0.len())]
    UnrevealedBids(Vec<BidKey>),
    #[error("cannot end auction, unrevealed bid {0} has a higher price")]
    HigherBidPending(BidKey),

    #[error("hash {computed} of revealed bid does not match hash in private collection: {ledger}")]
    HashMismatchLedger { computed: String, ledger: String },
    #[error(
        "hash {computed} of revealed bid does not match hash in auction: {auction}, bidder must \
         have changed bid"
    )]
    HashMismatchAuction { computed: String, auction: String },
    #[error("bid names org {bid} but was committed by {committed}")]
    OrgMismatch { bid: String, committed: String },

    #[error("time recorder returned no timestamps for transaction {0}")]
    NoTimestamps(String),
    #[error("failed to parse timestamp: {0}")]
    InvalidTimestamp(chrono::ParseError),
    #[error("time recorder call failed: {0:#}")]
    Recorder(anyhow::Error),

    #[error("ledger call failed: {0:#}")]
    Ledger(anyhow::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Kind {
    /// Malformed arguments or transient data.
    Input,
    /// Wrong peer, seller or bidder.
    Authorization,
    /// The auction is not in a state that allows the transaction.
    State,
    /// A revealed bid does not match its commitment.
    Integrity,
    /// The time recorder failed or misbehaved.
    External,
    /// The ledger runtime failed.
    Runtime,
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Self::NoTransient(_)
            | Self::InvalidTimelimit(_)
            | Self::InvalidCertificate(_)
            | Self::InvalidKey(_)
            | Self::InvalidBid(_)
            | Self::UnknownFunction(_)
            | Self::WrongArguments { .. } => Kind::Input,
            Self::WrongPeer { .. } | Self::NotSeller { .. } | Self::NotBidder { .. } => {
                Kind::Authorization
            }
            Self::AuctionNotFound(_)
            | Self::AuctionExists(_)
            | Self::InvalidStatus { .. }
            | Self::NoPrivateBid(_)
            | Self::NoCommitment(_)
            | Self::NoRevealedBids
            | Self::UnrevealedBids(_)
            | Self::HigherBidPending(_) => Kind::State,
            Self::HashMismatchLedger { .. }
            | Self::HashMismatchAuction { .. }
            | Self::OrgMismatch { .. } => Kind::Integrity,
            Self::NoTimestamps(_) | Self::InvalidTimestamp(_) | Self::Recorder(_) => {
                Kind::External
            }
            Self::Ledger(_) | Self::Serialization(_) => Kind::Runtime,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
