//! The commit-reveal protocol.
//!
//! A bid travels through three transactions. `Bid` stores the plaintext in
//! the bidder organization's implicit collection, `SubmitBid` publishes the
//! ledger's hash of it on the auction record, and `RevealBid` publishes the
//! plaintext once bidding has closed, after checking it against both hashes.

use {
    super::{Contract, ensure_status, load, store, transient_bid},
    crate::{
        endorsement,
        error::{Error, Result},
        identity,
        ledger::Stub,
        private::PrivateBids,
        shuffle,
    },
    model::{BidKey, Commitment, PlaintextBid, RevealedBid, Status},
    tracing::instrument,
};

impl Contract {
    /// Stores the transient plaintext bid privately and returns the id of
    /// this transaction, the handle of the bid from now on.
    ///
    /// Must be endorsed by a peer of the bidder's own organization. The
    /// auction record is not read or written.
    #[instrument(skip(self, stub))]
    pub async fn bid(&self, stub: &dyn Stub, auction_id: &str) -> Result<String> {
        let plaintext = transient_bid(stub)?;
        let org = identity::submitter_org(stub)?;
        identity::verify_client_org_matches_peer_org(stub)?;

        let tx_id = stub.tx_id();
        let key = BidKey::new(auction_id, &tx_id)?;

        self.recorder
            .new_bid(&tx_id, &org)
            .await
            .map_err(Error::Recorder)?;
        PrivateBids::new(stub, &org).put(&key, plaintext).await?;

        tracing::debug!(%tx_id, %org, "bid stored in private collection");
        Ok(tx_id)
    }

    /// Commits to a stored bid by adding its hash to the open auction. The
    /// first bid of an organization adds it to the auction's endorsement
    /// policy, so this transaction needs endorsements from the organizations
    /// already taking part plus the bidder's.
    #[instrument(skip(self, stub))]
    pub async fn submit_bid(&self, stub: &dyn Stub, auction_id: &str, tx_id: &str) -> Result<()> {
        let endorser = identity::endorser_common_name(stub)?;
        let org = identity::submitter_org(stub)?;
        let key = BidKey::new(auction_id, tx_id)?;

        let mut auction = load(stub, auction_id).await?;
        ensure_status(&auction, Status::Open)?;

        let hash = PrivateBids::new(stub, &org).hash(&key).await?;
        if let Some(existing) = auction.private_bids.get(&key) {
            if !existing.matches(&hash) {
                return Err(Error::HashMismatchAuction {
                    computed: hex::encode(&hash),
                    auction: existing.hash.clone(),
                });
            }
            tracing::debug!(bid_key = %key, "bid already submitted");
            return Ok(());
        }

        let timestamp = stub.tx_timestamp().map_err(Error::Ledger)?;
        auction
            .private_bids
            .insert(key.clone(), Commitment::new(org.clone(), &hash, timestamp));
        if auction.add_org(&org) {
            endorsement::add_org(stub, auction_id, &org).await?;
        }

        self.recorder
            .new_time(auction_id, &org, &endorser, tx_id)
            .await
            .map_err(Error::Recorder)?;
        store(stub, auction_id, &auction).await?;

        tracing::info!(bid_key = %key, %org, "bid submitted");
        Ok(())
    }

    /// Publishes a committed bid. The transient plaintext must hash to both
    /// the ledger's digest of the private bid and the auction's commitment,
    /// and only the bidder named in it may reveal it.
    #[instrument(skip(self, stub))]
    pub async fn reveal_bid(&self, stub: &dyn Stub, auction_id: &str, tx_id: &str) -> Result<()> {
        let plaintext = transient_bid(stub)?;
        let key = BidKey::new(auction_id, tx_id)?;

        let mut auction = load(stub, auction_id).await?;
        ensure_status(&auction, Status::Closed)?;
        let commitment = auction
            .private_bids
            .get(&key)
            .ok_or_else(|| Error::NoCommitment(key.clone()))?;

        let computed = model::digest(&plaintext);
        let ledger = PrivateBids::new(stub, &commitment.org).hash(&key).await?;
        if computed[..] != ledger[..] {
            return Err(Error::HashMismatchLedger {
                computed: hex::encode(computed),
                ledger: hex::encode(ledger),
            });
        }
        if !commitment.matches(&computed) {
            return Err(Error::HashMismatchAuction {
                computed: hex::encode(computed),
                auction: commitment.hash.clone(),
            });
        }

        let bid = PlaintextBid::decode(&plaintext).map_err(Error::InvalidBid)?;
        if bid.org != commitment.org {
            return Err(Error::OrgMismatch {
                bid: bid.org,
                committed: commitment.org.clone(),
            });
        }
        let client = identity::submitter_identity(stub)?;
        if bid.bidder != client {
            return Err(Error::NotBidder { client });
        }

        let candidates = self
            .recorder
            .timestamps(tx_id)
            .await
            .map_err(Error::Recorder)?;
        let timestamp = shuffle::canonical_timestamp(tx_id, candidates)?;

        auction
            .revealed_bids
            .insert(key.clone(), RevealedBid::accept(bid, timestamp));
        store(stub, auction_id, &auction).await?;

        tracing::info!(bid_key = %key, %timestamp, "bid revealed");
        Ok(())
    }

    /// Returns the caller's own stored bid as it was supplied.
    #[instrument(skip(self, stub))]
    pub async fn query_bid(&self, stub: &dyn Stub, auction_id: &str, tx_id: &str) -> Result<Vec<u8>> {
        identity::verify_client_org_matches_peer_org(stub)?;
        let org = identity::submitter_org(stub)?;
        let key = BidKey::new(auction_id, tx_id)?;

        let plaintext = PrivateBids::new(stub, &org).get(&key).await?;
        let bid = PlaintextBid::decode(&plaintext).map_err(Error::InvalidBid)?;
        let client = identity::submitter_identity(stub)?;
        if bid.bidder != client {
            return Err(Error::NotBidder { client });
        }
        Ok(plaintext)
    }
}
