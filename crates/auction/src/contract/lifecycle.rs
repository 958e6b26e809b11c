//! Creating, closing and ending auctions. Only the seller moves an auction
//! through its statuses.

use {
    super::{Contract, ensure_seller, ensure_status, load, store},
    crate::{
        endorsement,
        error::{Error, Result},
        identity,
        ledger::Stub,
        private::PrivateBids,
    },
    model::{Auction, BidKey, PlaintextBid, Status},
    tracing::instrument,
};

impl Contract {
    /// Opens a new auction with the submitter as seller. The auction record
    /// may from now on only be written with the seller organization's
    /// endorsement.
    #[instrument(skip(self, stub))]
    pub async fn create_auction(
        &self,
        stub: &dyn Stub,
        auction_id: &str,
        item: &str,
        timelimit: &str,
    ) -> Result<()> {
        let timelimit =
            model::time::parse_rfc3339_nano(timelimit).map_err(Error::InvalidTimelimit)?;
        let seller = identity::submitter_identity(stub)?;
        let org = identity::submitter_org(stub)?;

        if stub
            .get_state(auction_id)
            .await
            .map_err(Error::Ledger)?
            .is_some()
        {
            return Err(Error::AuctionExists(auction_id.to_string()));
        }

        let auction = Auction::new(item.to_string(), seller, org.clone(), timelimit);
        store(stub, auction_id, &auction).await?;
        endorsement::set_initial_policy(stub, auction_id, &org).await?;

        tracing::info!(%org, "auction created");
        Ok(())
    }

    /// Stops accepting new bids.
    #[instrument(skip(self, stub))]
    pub async fn close_auction(&self, stub: &dyn Stub, auction_id: &str) -> Result<()> {
        let mut auction = load(stub, auction_id).await?;
        let client = identity::submitter_identity(stub)?;
        ensure_seller(&auction, &client, "closed")?;
        ensure_status(&auction, Status::Open)?;

        auction.status = Status::Closed;
        store(stub, auction_id, &auction).await?;

        tracing::info!(commitments = auction.private_bids.len(), "auction closed");
        Ok(())
    }

    /// Settles the auction on its highest revealed bid.
    ///
    /// Refuses while any commitment is unrevealed, since the hash gives no
    /// bound on the price behind it. When the unrevealed bid belongs to this
    /// peer's organization its plaintext is inspected to report whether it
    /// would have won.
    #[instrument(skip(self, stub))]
    pub async fn end_auction(&self, stub: &dyn Stub, auction_id: &str) -> Result<()> {
        let mut auction = load(stub, auction_id).await?;
        let client = identity::submitter_identity(stub)?;
        ensure_seller(&auction, &client, "ended")?;
        ensure_status(&auction, Status::Closed)?;

        let ranking = winner_selection::rank(&auction).map_err(|err| match err {
            winner_selection::Error::NoRevealedBids => Error::NoRevealedBids,
        })?;
        if !ranking.is_final() {
            let pending: Vec<_> = ranking
                .pending
                .iter()
                .map(|(key, commitment)| ((*key).clone(), commitment.org.clone()))
                .collect();
            return Err(check_for_higher_bid(stub, ranking.winner.price, pending).await);
        }

        let winner = ranking.winner;
        auction.winner = winner.bidder;
        auction.price = winner.price;
        auction.status = Status::Ended;
        store(stub, auction_id, &auction).await?;

        tracing::info!(price = auction.price, bid_key = %winner.bid_key, "auction ended");
        Ok(())
    }

    #[instrument(skip(self, stub))]
    pub async fn query_auction(&self, stub: &dyn Stub, auction_id: &str) -> Result<Auction> {
        load(stub, auction_id).await
    }
}

/// Explains why unrevealed commitments block the auction from ending.
async fn check_for_higher_bid(
    stub: &dyn Stub,
    price: u64,
    pending: Vec<(BidKey, String)>,
) -> Error {
    let peer = match stub.peer_msp_id() {
        Ok(peer) => peer,
        Err(err) => return Error::Ledger(err),
    };
    let bids = PrivateBids::new(stub, &peer);
    for (key, _) in pending.iter().filter(|(_, org)| *org == peer) {
        let bid = match bids.get(key).await {
            Ok(bytes) => bytes,
            Err(Error::NoPrivateBid(_)) => continue,
            Err(err) => return err,
        };
        match PlaintextBid::decode(&bid) {
            Ok(bid) if bid.price > price => {
                tracing::warn!(bid_key = %key, "unrevealed bid of own organization is higher");
                return Error::HigherBidPending(key.clone());
            }
            Ok(_) => (),
            Err(err) => return Error::InvalidBid(err),
        }
    }
    tracing::debug!(pending = pending.len(), "auction has unrevealed bids");
    Error::UnrevealedBids(pending.into_iter().map(|(key, _)| key).collect())
}
