//! Composite keys in the ledger's encoding.

use {
    serde::{Deserialize, Serialize},
    std::fmt::{self, Display, Formatter},
    thiserror::Error,
};

/// Object type of the composite key identifying a bid.
pub const BID_KEY_TYPE: &str = "bid";

const COMPOSITE_KEY_NAMESPACE: char = '\u{0}';
const MIN_UNICODE_RUNE: char = '\u{0}';
const MAX_UNICODE_RUNE: char = '\u{10ffff}';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidKey {
    #[error("composite key object type must not be empty")]
    EmptyType,
    #[error("composite key part {0:?} contains a reserved character")]
    ReservedCharacter(String),
}

/// Builds a composite key the way the ledger runtime does: a namespace
/// marker followed by the object type and every attribute, each terminated by
/// U+0000.
pub fn composite_key(object_type: &str, attributes: &[&str]) -> Result<String, InvalidKey> {
    if object_type.is_empty() {
        return Err(InvalidKey::EmptyType);
    }
    let mut key = String::from(COMPOSITE_KEY_NAMESPACE);
    for part in std::iter::once(object_type).chain(attributes.iter().copied()) {
        if part.contains([MIN_UNICODE_RUNE, MAX_UNICODE_RUNE]) {
            return Err(InvalidKey::ReservedCharacter(part.to_string()));
        }
        key.push_str(part);
        key.push(MIN_UNICODE_RUNE);
    }
    Ok(key)
}

/// Splits a composite key into its object type and attributes. Returns
/// `None` for keys that are not composite.
pub fn split_composite_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let rest = key.strip_prefix(COMPOSITE_KEY_NAMESPACE)?;
    let rest = rest.strip_suffix(MIN_UNICODE_RUNE)?;
    let mut parts = rest.split(MIN_UNICODE_RUNE);
    let object_type = parts.next()?;
    Some((object_type, parts.collect()))
}

/// Handle of a single bid across the bid, commit and reveal transactions:
/// the composite `("bid", auctionID, txID)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BidKey(String);

impl BidKey {
    pub fn new(auction_id: &str, tx_id: &str) -> Result<Self, InvalidKey> {
        composite_key(BID_KEY_TYPE, &[auction_id, tx_id]).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id of the transaction that stored the plaintext bid.
    pub fn tx_id(&self) -> Option<&str> {
        split_composite_key(&self.0).and_then(|(_, parts)| parts.last().copied())
    }
}

impl Display for BidKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // U+0000 separators are unreadable in logs.
        match split_composite_key(&self.0) {
            Some((object_type, parts)) => write!(f, "{object_type}:{}", parts.join(":")),
            None => f.write_str(&self.0),
        }
    }
}

impl AsRef<str> for BidKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
