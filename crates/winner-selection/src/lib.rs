//! Winner selection for sealed-bid auctions.
//!
//! Kept free of any ledger access so that every endorsing peer computes the
//! same result from the same auction record.

pub mod arbitrator;

pub use arbitrator::{Error, Ranking, Winner, rank};
