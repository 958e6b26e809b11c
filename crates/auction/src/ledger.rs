//! The ledger runtime as seen from inside a transaction.
//!
//! Reads observe the world state as of the start of simulation. Writes are
//! collected into the transaction's write set and only reach the world state
//! if the transaction is endorsed, ordered and passes validation.

use {
    anyhow::Result,
    chrono::{DateTime, Utc},
    std::collections::HashMap,
};

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Stub: Send + Sync {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<()>;

    async fn get_private_data(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>>;

    async fn put_private_data(&self, collection: &str, key: &str, value: Vec<u8>) -> Result<()>;

    /// SHA-256 of the private value as stored. Available on every peer of the
    /// channel, including peers of organizations that are not members of the
    /// collection.
    async fn get_private_data_hash(&self, collection: &str, key: &str)
    -> Result<Option<Vec<u8>>>;

    /// Returns the key-level endorsement policy of `key`, if one was set.
    async fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set_state_validation_parameter(&self, key: &str, policy: Vec<u8>) -> Result<()>;

    /// Data passed to the proposal that is never written to the ledger.
    fn transient(&self) -> Result<HashMap<String, Vec<u8>>>;

    fn tx_id(&self) -> String;

    fn tx_timestamp(&self) -> Result<DateTime<Utc>>;

    /// The serialized identity of the submitting client, containing its PEM
    /// encoded certificate.
    fn creator(&self) -> Result<Vec<u8>>;

    /// MSP of the submitting client.
    fn client_msp_id(&self) -> Result<String>;

    /// MSP of the peer executing the transaction.
    fn peer_msp_id(&self) -> Result<String>;
}
