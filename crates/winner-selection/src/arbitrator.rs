//! Picks the highest revealed bid and collects the commitments that could
//! still outbid it.

use {
    model::{Auction, BidKey, Commitment, RevealedBid},
    thiserror::Error,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no bids have been revealed")]
    NoRevealedBids,
}

/// The highest revealed bid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Winner {
    pub bid_key: BidKey,
    pub bidder: String,
    pub price: u64,
}

/// Outcome of ranking an auction's bids.
#[derive(Debug)]
pub struct Ranking<'a> {
    pub winner: Winner,
    /// Commitments without a matching reveal. A hash says nothing about the
    /// price behind it, so any of these may beat `winner`.
    pub pending: Vec<(&'a BidKey, &'a Commitment)>,
}

impl Ranking<'_> {
    /// A ranking is final once nothing is left unrevealed.
    pub fn is_final(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Ranks the revealed bids of `auction`.
///
/// Bids are visited in bid key order and only a strictly higher price
/// replaces the current leader, so the first of several equal bids wins.
pub fn rank(auction: &Auction) -> Result<Ranking<'_>, Error> {
    let winner = auction
        .revealed_bids
        .iter()
        .fold(None, |leader: Option<(&BidKey, &RevealedBid)>, (key, bid)| {
            match leader {
                Some((_, best)) if best.price >= bid.price => leader,
                _ => Some((key, bid)),
            }
        })
        .map(|(key, bid)| Winner {
            bid_key: key.clone(),
            bidder: bid.bidder.clone(),
            price: bid.price,
        })
        .ok_or(Error::NoRevealedBids)?;

    let pending: Vec<_> = auction.unrevealed().collect();
    if !pending.is_empty() {
        tracing::debug!(
            winner = %winner.bid_key,
            pending = pending.len(),
            "revealed bids ranked with commitments outstanding"
        );
    }

    Ok(Ranking { winner, pending })
}
