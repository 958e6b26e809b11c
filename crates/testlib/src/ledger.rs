//! In-memory ledger runtime.
//!
//! Chaincode runs against a [`Tx`] which reads committed world state and
//! buffers its writes. [`Ledger::commit`] then validates the transaction the
//! way a committing peer does: every key read during simulation must still
//! have the version it was read at, and every written key must be endorsed by
//! all organizations its key-level endorsement policy names.

use {
    crate::{ORGS, certs},
    anyhow::{Context, Result, anyhow},
    auction::{
        Contract,
        endorsement::KeyEndorsementPolicy,
        identity::Certificate,
        ledger::Stub,
    },
    chrono::{DateTime, Duration, TimeZone, Utc},
    model::{Auction, PlaintextBid},
    std::{
        collections::{BTreeMap, BTreeSet, HashMap},
        sync::{Arc, Mutex, MutexGuard, PoisonError},
    },
};

/// A user of the test network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Client {
    pub name: &'static str,
    pub msp_id: &'static str,
    pub pem: &'static str,
}

impl Client {
    pub const SELLER: Self = Self {
        name: "seller",
        msp_id: "Org1MSP",
        pem: certs::SELLER,
    };
    pub const UA: Self = Self {
        name: "uA",
        msp_id: "Org1MSP",
        pem: certs::UA,
    };
    pub const UB: Self = Self {
        name: "uB",
        msp_id: "Org2MSP",
        pem: certs::UB,
    };
    pub const UC: Self = Self {
        name: "uC",
        msp_id: "Org3MSP",
        pem: certs::UC,
    };

    pub fn creator(&self) -> Vec<u8> {
        certs::creator(self.msp_id, self.pem)
    }

    /// The identity chaincode sees for this client.
    pub fn identity(&self) -> String {
        Certificate::from_creator(self.pem.as_bytes())
            .expect("test certificate is valid")
            .id
    }

    /// Serialized plaintext bid of this client.
    pub fn bid(&self, price: u64) -> Vec<u8> {
        serde_json::to_vec(&PlaintextBid {
            price,
            org: self.msp_id.to_string(),
            bidder: self.identity(),
            valid: false,
            timestamp: String::new(),
        })
        .expect("bid serializes")
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("MVCC read conflict on {0}")]
    MvccConflict(String),
    #[error("endorsement policy failure on {key}: missing endorsement of {org}")]
    EndorsementPolicy { key: String, org: String },
}

/// Why a submitted transaction did not make it into the ledger.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("chaincode error: {0}")]
    Chaincode(auction::Error),
    #[error("invalid transaction: {0}")]
    Commit(CommitError),
}

#[derive(Default)]
struct World {
    height: u64,
    transactions: i64,
    state: BTreeMap<String, Vec<u8>>,
    policies: BTreeMap<String, Vec<u8>>,
    versions: BTreeMap<String, u64>,
    private: BTreeMap<(String, String), Vec<u8>>,
    private_versions: BTreeMap<(String, String), u64>,
}

#[derive(Default)]
struct RwSet {
    reads: BTreeMap<String, Option<u64>>,
    private_reads: BTreeMap<(String, String), Option<u64>>,
    writes: BTreeMap<String, Vec<u8>>,
    policy_writes: BTreeMap<String, Vec<u8>>,
    private_writes: BTreeMap<(String, String), Vec<u8>>,
}

#[derive(Clone, Default)]
pub struct Ledger {
    world: Arc<Mutex<World>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a transaction proposal from `client`, executed on a peer of the
    /// client's organization and endorsed by every organization.
    pub fn tx(&self, client: Client) -> Tx {
        let n = {
            let mut world = lock(&self.world);
            world.transactions += 1;
            world.transactions
        };
        Tx {
            world: self.world.clone(),
            id: format!("tx{n}"),
            timestamp: genesis() + Duration::seconds(n),
            client,
            peer: client.msp_id.to_string(),
            endorsers: ORGS.iter().map(ToString::to_string).collect(),
            transient: HashMap::new(),
            rwset: Default::default(),
        }
    }

    /// Runs `function` against `tx` without committing it.
    pub async fn simulate(
        &self,
        contract: &Contract,
        tx: &Tx,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, auction::Error> {
        let args: Vec<_> = args.iter().map(ToString::to_string).collect();
        contract.invoke(tx, function, &args).await
    }

    /// Simulates and commits in one go.
    pub async fn submit(
        &self,
        contract: &Contract,
        tx: Tx,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, Failure> {
        let payload = self
            .simulate(contract, &tx, function, args)
            .await
            .map_err(Failure::Chaincode)?;
        self.commit(tx).map_err(Failure::Commit)?;
        Ok(payload)
    }

    /// Validates `tx` against the current world state and applies its writes.
    pub fn commit(&self, tx: Tx) -> Result<(), CommitError> {
        let rwset = tx.rwset.into_inner().unwrap_or_else(PoisonError::into_inner);
        let mut world = lock(&self.world);

        for (key, version) in &rwset.reads {
            if world.versions.get(key) != version.as_ref() {
                return Err(CommitError::MvccConflict(key.clone()));
            }
        }
        for ((collection, key), version) in &rwset.private_reads {
            let current = world.private_versions.get(&(collection.clone(), key.clone()));
            if current != version.as_ref() {
                return Err(CommitError::MvccConflict(format!("{collection}/{key}")));
            }
        }
        for key in rwset.writes.keys().chain(rwset.policy_writes.keys()) {
            let Some(policy) = world.policies.get(key) else {
                continue;
            };
            let policy = KeyEndorsementPolicy::from_bytes(policy)
                .expect("stored endorsement policy is valid");
            if let Some(org) = policy.orgs.iter().find(|org| !tx.endorsers.contains(*org)) {
                return Err(CommitError::EndorsementPolicy {
                    key: key.clone(),
                    org: org.clone(),
                });
            }
        }

        world.height += 1;
        let version = world.height;
        for (key, value) in rwset.writes {
            world.versions.insert(key.clone(), version);
            world.state.insert(key, value);
        }
        for (key, policy) in rwset.policy_writes {
            world.versions.insert(key.clone(), version);
            world.policies.insert(key, policy);
        }
        for (key, value) in rwset.private_writes {
            world.private_versions.insert(key.clone(), version);
            world.private.insert(key, value);
        }
        tracing::debug!(tx_id = %tx.id, height = version, "transaction committed");
        Ok(())
    }

    /// Number of committed transactions.
    pub fn height(&self) -> u64 {
        lock(&self.world).height
    }

    pub fn auction(&self, auction_id: &str) -> Option<Auction> {
        lock(&self.world)
            .state
            .get(auction_id)
            .map(|bytes| Auction::from_json(bytes).expect("auction record is valid"))
    }

    /// Raw bytes of a public key, for comparing records byte for byte.
    pub fn state(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.world).state.get(key).cloned()
    }

    pub fn policy(&self, key: &str) -> Option<KeyEndorsementPolicy> {
        lock(&self.world).policies.get(key).map(|bytes| {
            KeyEndorsementPolicy::from_bytes(bytes).expect("stored endorsement policy is valid")
        })
    }

    pub fn private(&self, collection: &str, key: &str) -> Option<Vec<u8>> {
        lock(&self.world)
            .private
            .get(&(collection.to_string(), key.to_string()))
            .cloned()
    }
}

/// A transaction proposal being simulated.
pub struct Tx {
    world: Arc<Mutex<World>>,
    id: String,
    timestamp: DateTime<Utc>,
    client: Client,
    peer: String,
    endorsers: BTreeSet<String>,
    transient: HashMap<String, Vec<u8>>,
    rwset: Mutex<RwSet>,
}

impl Tx {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Passes `plaintext` in the transient map under `"bid"`.
    pub fn with_bid(mut self, plaintext: Vec<u8>) -> Self {
        self.transient
            .insert(auction::contract::TRANSIENT_BID.to_string(), plaintext);
        self
    }

    /// Executes the proposal on a peer of `msp_id` instead of the client's.
    pub fn on_peer(mut self, msp_id: &str) -> Self {
        self.peer = msp_id.to_string();
        self
    }

    /// Collects endorsements from `orgs` only.
    pub fn endorsed_by(mut self, orgs: &[&str]) -> Self {
        self.endorsers = orgs.iter().map(ToString::to_string).collect();
        self
    }

    /// Whether simulation produced any write.
    pub fn has_writes(&self) -> bool {
        let rwset = lock(&self.rwset);
        !(rwset.writes.is_empty() && rwset.policy_writes.is_empty() && rwset.private_writes.is_empty())
    }
}

#[async_trait::async_trait]
impl Stub for Tx {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let world = lock(&self.world);
        lock(&self.rwset)
            .reads
            .entry(key.to_string())
            .or_insert_with(|| world.versions.get(key).copied());
        Ok(world.state.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()> {
        anyhow::ensure!(!key.is_empty(), "key must not be empty");
        lock(&self.rwset).writes.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_private_data(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>> {
        if collection != model::implicit_collection(&self.peer) {
            return Err(anyhow!(
                "peer of {} is not a member of collection {collection}",
                self.peer
            ));
        }
        let world = lock(&self.world);
        let id = (collection.to_string(), key.to_string());
        lock(&self.rwset)
            .private_reads
            .entry(id.clone())
            .or_insert_with(|| world.private_versions.get(&id).copied());
        Ok(world.private.get(&id).cloned())
    }

    async fn put_private_data(&self, collection: &str, key: &str, value: Vec<u8>) -> Result<()> {
        anyhow::ensure!(!key.is_empty(), "key must not be empty");
        lock(&self.rwset)
            .private_writes
            .insert((collection.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn get_private_data_hash(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>> {
        let world = lock(&self.world);
        let id = (collection.to_string(), key.to_string());
        lock(&self.rwset)
            .private_reads
            .entry(id.clone())
            .or_insert_with(|| world.private_versions.get(&id).copied());
        Ok(world
            .private
            .get(&id)
            .map(|value| model::digest(value).to_vec()))
    }

    async fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let world = lock(&self.world);
        lock(&self.rwset)
            .reads
            .entry(key.to_string())
            .or_insert_with(|| world.versions.get(key).copied());
        Ok(world.policies.get(key).cloned())
    }

    async fn set_state_validation_parameter(&self, key: &str, policy: Vec<u8>) -> Result<()> {
        KeyEndorsementPolicy::from_bytes(&policy).context("invalid endorsement policy")?;
        lock(&self.rwset)
            .policy_writes
            .insert(key.to_string(), policy);
        Ok(())
    }

    fn transient(&self) -> Result<HashMap<String, Vec<u8>>> {
        Ok(self.transient.clone())
    }

    fn tx_id(&self) -> String {
        self.id.clone()
    }

    fn tx_timestamp(&self) -> Result<DateTime<Utc>> {
        Ok(self.timestamp)
    }

    fn creator(&self) -> Result<Vec<u8>> {
        Ok(self.client.creator())
    }

    fn client_msp_id(&self) -> Result<String> {
        Ok(self.client.msp_id.to_string())
    }

    fn peer_msp_id(&self) -> Result<String> {
        Ok(self.peer.clone())
    }
}

fn genesis() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
