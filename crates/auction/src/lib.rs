//! Sealed-bid auction chaincode.
//!
//! Bidders keep their plaintext bids in their organization's implicit private
//! collection and publish only a hash on the auction record. Once the seller
//! closes bidding, bids are revealed and checked against those hashes, and
//! the seller ends the auction with the highest revealed price.

pub mod config;
pub mod contract;
pub mod endorsement;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod private;
pub mod recorder;
pub mod shuffle;
mod util;

pub use {
    contract::Contract,
    error::{Error, Kind},
    ledger::Stub,
};

/// Initializes logging from `config` and builds the contract against the
/// configured time recorder.
pub fn start(config: &config::Config) -> anyhow::Result<Contract> {
    observe::tracing::initialize(&config.log);
    tracing::info!(recorder = %config.recorder.url, "starting auction chaincode");
    Contract::from_config(config)
}
