//! The auction record: one per auction, stored on the public ledger under
//! the auction id.

use {
    crate::{
        bid::{Commitment, RevealedBid},
        key::BidKey,
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

pub const OBJECT_TYPE: &str = "auction";

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Open,
    Closed,
    Ended,
}

/// Both bid mappings are `BTreeMap`s so that the serialized record is the
/// same on every endorsing peer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub object_type: String,
    pub item: String,
    pub seller: String,
    /// Participating organizations in order of joining. Never shrinks.
    pub organizations: Vec<String>,
    pub private_bids: BTreeMap<BidKey, Commitment>,
    pub revealed_bids: BTreeMap<BidKey, RevealedBid>,
    pub winner: String,
    pub price: u64,
    pub status: Status,
    #[serde(with = "crate::time")]
    pub timelimit: DateTime<Utc>,
}

impl Auction {
    pub fn new(item: String, seller: String, seller_org: String, timelimit: DateTime<Utc>) -> Self {
        Self {
            object_type: OBJECT_TYPE.to_string(),
            item,
            seller,
            organizations: vec![seller_org],
            private_bids: Default::default(),
            revealed_bids: Default::default(),
            winner: String::new(),
            price: 0,
            status: Status::Open,
            timelimit,
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn has_org(&self, org: &str) -> bool {
        self.organizations.iter().any(|known| known == org)
    }

    /// Adds `org` to the participants. Returns `false` if it already was one.
    pub fn add_org(&mut self, org: &str) -> bool {
        if self.has_org(org) {
            return false;
        }
        self.organizations.push(org.to_string());
        true
    }

    /// Commitments that have not been revealed yet, in key order.
    pub fn unrevealed(&self) -> impl Iterator<Item = (&BidKey, &Commitment)> {
        self.private_bids
            .iter()
            .filter(|(key, _)| !self.revealed_bids.contains_key(*key))
    }
}
