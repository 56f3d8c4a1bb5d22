//! Snapshot types exchanged with transaction callbacks
//!
//! A [`Value`] is the presence/absence state of one key at one instant. It is
//! only ever produced by lookups and transactions and is never stored
//! directly: the store keeps raw bytes, and a `Value` is an owned copy of
//! them, so holding one never aliases the store's internal map.

use std::collections::HashMap;

/// Snapshots keyed by store key, as seen and returned by mutual transactions.
pub type ValueMap = HashMap<String, Value>;

/// State of a single key at one instant.
///
/// When `exists()` is false the data is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Value {
    data: Vec<u8>,
    exists: bool,
}

impl Value {
    /// A key that is present with the given bytes.
    pub fn present(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            exists: true,
        }
    }

    /// A key that is absent.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Whether the key was present.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Stored bytes; empty when the key is absent.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Stored bytes if present.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.exists.then_some(self.data.as_slice())
    }

    /// Consume the snapshot, returning the bytes if present.
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.exists.then_some(self.data)
    }
}

impl From<Option<Vec<u8>>> for Value {
    fn from(data: Option<Vec<u8>>) -> Self {
        match data {
            Some(data) => Value::present(data),
            None => Value::absent(),
        }
    }
}

/// What a single-key transaction writes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Store these bytes under the key
    Set(Vec<u8>),
    /// Remove the key (no-op when absent)
    Delete,
}

impl Mutation {
    /// Convenience constructor for [`Mutation::Set`].
    pub fn set(data: impl Into<Vec<u8>>) -> Self {
        Mutation::Set(data.into())
    }

    /// Check if this mutation removes the key.
    pub fn is_deletion(&self) -> bool {
        matches!(self, Mutation::Delete)
    }
}

/// Result of a successful mutual transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutualOutcome {
    /// Snapshots taken before the callback ran, one per distinct key
    pub old: ValueMap,
    /// Snapshots the callback returned and the store applied
    pub new: ValueMap,
}
