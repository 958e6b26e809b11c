//! Fake time recorder keeping every call in memory.

use {
    anyhow::{Result, bail},
    auction::recorder::{Recorder, dto},
    chrono::{Duration, NaiveDate},
    std::{
        collections::BTreeMap,
        sync::{Mutex, MutexGuard, PoisonError},
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBid {
    pub tx_id: String,
    pub org: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTime {
    pub auction_id: String,
    pub org: String,
    pub endorser: String,
    pub tx_id: String,
}

#[derive(Default)]
struct State {
    bids: Vec<NewBid>,
    times: Vec<NewTime>,
    timestamps: BTreeMap<String, dto::Timestamps>,
    clock: i64,
    unavailable: bool,
}

/// Records one timestamp per `new_time` call, one second apart.
#[derive(Default)]
pub struct FakeRecorder {
    state: Mutex<State>,
}

impl FakeRecorder {
    /// Makes every following call fail like an unreachable server.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Replaces the timestamps recorded for `tx_id`.
    pub fn set_timestamps(&self, tx_id: &str, timestamps: &[&str]) {
        self.lock().timestamps.insert(
            tx_id.to_string(),
            timestamps.iter().map(ToString::to_string).collect(),
        );
    }

    pub fn bids(&self) -> Vec<NewBid> {
        self.lock().bids.clone()
    }

    pub fn times(&self) -> Vec<NewTime> {
        self.lock().times.clone()
    }

    pub fn timestamps_of(&self, tx_id: &str) -> dto::Timestamps {
        self.lock()
            .timestamps
            .get(tx_id)
            .cloned()
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl Recorder for FakeRecorder {
    async fn new_bid(&self, tx_id: &str, org: &str) -> Result<()> {
        let mut state = self.lock();
        if state.unavailable {
            bail!("HTTP 503 Service Unavailable");
        }
        state.bids.push(NewBid {
            tx_id: tx_id.to_string(),
            org: org.to_string(),
        });
        Ok(())
    }

    async fn new_time(
        &self,
        auction_id: &str,
        org: &str,
        endorser: &str,
        tx_id: &str,
    ) -> Result<()> {
        let mut state = self.lock();
        if state.unavailable {
            bail!("HTTP 503 Service Unavailable");
        }
        state.times.push(NewTime {
            auction_id: auction_id.to_string(),
            org: org.to_string(),
            endorser: endorser.to_string(),
            tx_id: tx_id.to_string(),
        });
        let time = epoch() + Duration::seconds(state.clock);
        state.clock += 1;
        state
            .timestamps
            .entry(tx_id.to_string())
            .or_default()
            .push(time.format(model::time::RECORDER_FORMAT).to_string());
        Ok(())
    }

    async fn timestamps(&self, tx_id: &str) -> Result<dto::Timestamps> {
        let state = self.lock();
        if state.unavailable {
            bail!("HTTP 503 Service Unavailable");
        }
        Ok(state.timestamps.get(tx_id).cloned().unwrap_or_default())
    }
}

fn epoch() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .expect("valid date")
}
