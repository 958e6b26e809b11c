//! Client of the out-of-process time recorder.
//!
//! The recorder keeps a log of stored bids and, for every committed bid, the
//! time at which each endorser saw it. During reveal one of those times
//! becomes the bid's canonical timestamp.

use {
    crate::{
        config::RecorderConfig,
        util::{self, http::roundtrip},
    },
    anyhow::{Context, Result},
    reqwest::{Client, ClientBuilder, Url},
    serde::de::IgnoredAny,
};

pub mod dto;

const USER_AGENT: &str = "auction-chaincode/0.1.0";

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Recorder: Send + Sync {
    /// Reports a plaintext bid stored by transaction `tx_id`.
    async fn new_bid(&self, tx_id: &str, org: &str) -> Result<()>;

    /// Asks for a timestamp to be recorded for the committed bid `tx_id`.
    async fn new_time(&self, auction_id: &str, org: &str, endorser: &str, tx_id: &str)
    -> Result<()>;

    /// Every timestamp recorded for `tx_id`, in recording order.
    async fn timestamps(&self, tx_id: &str) -> Result<dto::Timestamps>;
}

/// Recorder reached over HTTP.
pub struct HttpRecorder {
    client: Client,
    url: Url,
}

impl HttpRecorder {
    pub fn new(config: &RecorderConfig) -> Result<Self> {
        anyhow::ensure!(
            !config.url.cannot_be_a_base(),
            "recorder url {} cannot be a base",
            config.url
        );
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("building recorder HTTP client")?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Recorder for HttpRecorder {
    async fn new_bid(&self, tx_id: &str, org: &str) -> Result<()> {
        roundtrip!(<IgnoredAny>;
            self.client
                .post(util::url::join(&self.url, &["bids", "new_bid"]))
                .json(&dto::NewBid { tx_id, org })
        )
        .await
        .context("recording new bid")?;
        Ok(())
    }

    async fn new_time(
        &self,
        auction_id: &str,
        org: &str,
        endorser: &str,
        tx_id: &str,
    ) -> Result<()> {
        roundtrip!(<IgnoredAny>;
            self.client
                .post(util::url::join(&self.url, &["bids", "new_time"]))
                .json(&dto::NewTime {
                    auction_id,
                    org,
                    endorser,
                    tx_id,
                })
        )
        .await
        .context("recording bid time")?;
        Ok(())
    }

    async fn timestamps(&self, tx_id: &str) -> Result<dto::Timestamps> {
        let timestamps = roundtrip!(<dto::Timestamps>;
            self.client.get(util::url::join(&self.url, &["bids", tx_id]))
        )
        .await
        .with_context(|| format!("fetching timestamps of {tx_id}"))?;
        Ok(timestamps)
    }
}
