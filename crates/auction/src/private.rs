//! Plaintext bids in the caller organization's implicit collection.

use {
    crate::{
        error::{Error, Result},
        ledger::Stub,
    },
    model::BidKey,
};

/// Private bid storage of a single organization.
pub struct PrivateBids<'a> {
    stub: &'a dyn Stub,
    collection: String,
}

impl<'a> PrivateBids<'a> {
    pub fn new(stub: &'a dyn Stub, org: &str) -> Self {
        Self {
            stub,
            collection: model::implicit_collection(org),
        }
    }

    /// Stores the plaintext exactly as received so that the ledger hash
    /// matches the bytes the bidder will later reveal.
    pub async fn put(&self, key: &BidKey, plaintext: Vec<u8>) -> Result<()> {
        self.stub
            .put_private_data(&self.collection, key.as_str(), plaintext)
            .await
            .map_err(Error::Ledger)
    }

    /// Ledger digest of the stored plaintext.
    pub async fn hash(&self, key: &BidKey) -> Result<Vec<u8>> {
        self.stub
            .get_private_data_hash(&self.collection, key.as_str())
            .await
            .map_err(Error::Ledger)?
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| Error::NoPrivateBid(key.clone()))
    }

    pub async fn get(&self, key: &BidKey) -> Result<Vec<u8>> {
        self.stub
            .get_private_data(&self.collection, key.as_str())
            .await
            .map_err(Error::Ledger)?
            .ok_or_else(|| Error::NoPrivateBid(key.clone()))
    }
}
