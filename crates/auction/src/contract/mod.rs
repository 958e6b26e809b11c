//! Transaction handlers of the auction chaincode.

use {
    crate::{
        config::Config,
        error::{Error, Result},
        ledger::Stub,
        recorder::{HttpRecorder, Recorder},
    },
    model::{Auction, Status},
    std::sync::Arc,
};

mod bidding;
mod lifecycle;

/// Key of the plaintext bid in the transient map.
pub const TRANSIENT_BID: &str = "bid";

/// Transactions the chaincode answers to, named as clients invoke them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
pub enum Function {
    CreateAuction,
    Bid,
    SubmitBid,
    RevealBid,
    CloseAuction,
    EndAuction,
    QueryAuction,
    QueryBid,
}

/// The auction chaincode. Holds no state between transactions; everything
/// lives on the ledger.
#[derive(Clone)]
pub struct Contract {
    recorder: Arc<dyn Recorder>,
}

impl Contract {
    pub fn new(recorder: Arc<dyn Recorder>) -> Self {
        Self { recorder }
    }

    /// Builds a contract talking to the HTTP time recorder in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(HttpRecorder::new(&config.recorder)?)))
    }

    /// Dispatches a transaction by name and returns its payload: the
    /// transaction id for `Bid`, JSON for the queries and nothing otherwise.
    pub async fn invoke(&self, stub: &dyn Stub, function: &str, args: &[String]) -> Result<Vec<u8>> {
        let function: Function = function
            .parse()
            .map_err(|_| Error::UnknownFunction(function.to_string()))?;
        tracing::debug!(?function, tx_id = %stub.tx_id(), "invoking");

        match function {
            Function::CreateAuction => {
                let [auction_id, item, timelimit] = arguments(function, args)?;
                self.create_auction(stub, auction_id, item, timelimit).await?;
                Ok(Vec::new())
            }
            Function::Bid => {
                let [auction_id] = arguments(function, args)?;
                Ok(self.bid(stub, auction_id).await?.into_bytes())
            }
            Function::SubmitBid => {
                let [auction_id, tx_id] = arguments(function, args)?;
                self.submit_bid(stub, auction_id, tx_id).await?;
                Ok(Vec::new())
            }
            Function::RevealBid => {
                let [auction_id, tx_id] = arguments(function, args)?;
                self.reveal_bid(stub, auction_id, tx_id).await?;
                Ok(Vec::new())
            }
            Function::CloseAuction => {
                let [auction_id] = arguments(function, args)?;
                self.close_auction(stub, auction_id).await?;
                Ok(Vec::new())
            }
            Function::EndAuction => {
                let [auction_id] = arguments(function, args)?;
                self.end_auction(stub, auction_id).await?;
                Ok(Vec::new())
            }
            Function::QueryAuction => {
                let [auction_id] = arguments(function, args)?;
                Ok(self.query_auction(stub, auction_id).await?.to_json()?)
            }
            Function::QueryBid => {
                let [auction_id, tx_id] = arguments(function, args)?;
                self.query_bid(stub, auction_id, tx_id).await
            }
        }
    }
}

fn arguments<const N: usize>(function: Function, args: &[String]) -> Result<[&str; N]> {
    if args.len() != N {
        return Err(Error::WrongArguments {
            function: function.into(),
            expected: N,
            actual: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

async fn load(stub: &dyn Stub, auction_id: &str) -> Result<Auction> {
    let bytes = stub
        .get_state(auction_id)
        .await
        .map_err(Error::Ledger)?
        .ok_or_else(|| Error::AuctionNotFound(auction_id.to_string()))?;
    Ok(Auction::from_json(&bytes)?)
}

async fn store(stub: &dyn Stub, auction_id: &str, auction: &Auction) -> Result<()> {
    stub.put_state(auction_id, auction.to_json()?)
        .await
        .map_err(Error::Ledger)
}

fn transient_bid(stub: &dyn Stub) -> Result<Vec<u8>> {
    stub.transient()
        .map_err(Error::Ledger)?
        .remove(TRANSIENT_BID)
        .ok_or(Error::NoTransient(TRANSIENT_BID))
}

fn ensure_status(auction: &Auction, expected: Status) -> Result<()> {
    if auction.status != expected {
        return Err(Error::InvalidStatus {
            expected,
            actual: auction.status,
        });
    }
    Ok(())
}

fn ensure_seller(auction: &Auction, client: &str, action: &'static str) -> Result<()> {
    if auction.seller != client {
        return Err(Error::NotSeller { action });
    }
    Ok(())
}
