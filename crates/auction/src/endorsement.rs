//! State-based endorsement on the auction record.
//!
//! Every write to an auction must be endorsed by a peer of each organization
//! that has taken part in it. The set of organizations only ever grows.

use {
    crate::{
        error::{Error, Result},
        ledger::Stub,
    },
    serde::{Deserialize, Serialize},
    std::collections::BTreeSet,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Peer,
}

/// Key-level endorsement policy requiring one endorsement of `role` from
/// each of `orgs`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEndorsementPolicy {
    pub orgs: BTreeSet<String>,
    pub role: Role,
}

impl KeyEndorsementPolicy {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Replaces the policy of `auction_id` with one requiring only the seller's
/// organization.
pub async fn set_initial_policy(stub: &dyn Stub, auction_id: &str, seller_org: &str) -> Result<()> {
    let policy = KeyEndorsementPolicy {
        orgs: BTreeSet::from([seller_org.to_string()]),
        role: Role::Peer,
    };
    stub.set_state_validation_parameter(auction_id, policy.to_bytes()?)
        .await
        .map_err(Error::Ledger)
}

/// Adds `org` to the policy of `auction_id`. Does not write anything if the
/// organization is already required.
pub async fn add_org(stub: &dyn Stub, auction_id: &str, org: &str) -> Result<()> {
    let mut policy = match stub
        .get_state_validation_parameter(auction_id)
        .await
        .map_err(Error::Ledger)?
    {
        Some(bytes) => KeyEndorsementPolicy::from_bytes(&bytes)?,
        None => KeyEndorsementPolicy::default(),
    };
    if !policy.orgs.insert(org.to_string()) {
        return Ok(());
    }
    tracing::debug!(auction_id, org, orgs = ?policy.orgs, "extending endorsement policy");
    stub.set_state_validation_parameter(auction_id, policy.to_bytes()?)
        .await
        .map_err(Error::Ledger)
}
