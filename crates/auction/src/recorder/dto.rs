//! Bodies of the time recorder API.

use serde::Serialize;

/// Announces a freshly stored private bid.
#[derive(Debug, Serialize)]
pub struct NewBid<'a> {
    #[serde(rename = "txID")]
    pub tx_id: &'a str,
    #[serde(rename = "Org")]
    pub org: &'a str,
}

/// Asks the recorder to take a timestamp for a committed bid.
#[derive(Debug, Serialize)]
pub struct NewTime<'a> {
    #[serde(rename = "auctionID")]
    pub auction_id: &'a str,
    pub org: &'a str,
    pub endorser: &'a str,
    #[serde(rename = "txID")]
    pub tx_id: &'a str,
}

/// Timestamps recorded for a transaction, formatted `%Y-%m-%d %H:%M:%S`.
pub type Timestamps = Vec<String>;
