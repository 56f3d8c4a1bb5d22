//! The backend-agnostic key-value trait.
//!
//! Every backend (the in-memory `Memstore`, disk-backed stores) implements
//! [`KeyValue`]. Code should depend on this trait, not on a specific backend,
//! so backends can be swapped without touching callers.
//!
//! [`KeyValue`] is object safe so a store can be held as
//! `Arc<dyn KeyValue>`: backends implement the raw byte operations and the
//! two transaction primitives, taking callbacks as boxed closures. The
//! closure-generic transaction methods and the typed accessors live on
//! [`KeyValueExt`], which every `KeyValue` (trait objects included) gets
//! for free.
//!
//! # Transaction callbacks
//!
//! Callbacks passed to [`KeyValueExt::transaction`] and
//! [`KeyValueExt::mutual_transaction`] run while the backend holds its lock.
//! A callback must not call back into the same store and must not block
//! for an unbounded time; either stalls every other caller.

use serde::{de::DeserializeOwned, Serialize};

use crate::codec::{Marshaler, Unmarshaler};
use crate::error::{BoxError, Error, Result};
use crate::value::{Mutation, MutualOutcome, Value, ValueMap};

/// Boxed single-key transaction callback.
pub type TransactionFn<'a> =
    Box<dyn FnOnce(&Value) -> std::result::Result<Mutation, BoxError> + 'a>;

/// Boxed multi-key transaction callback.
pub type MutualTransactionFn<'a> =
    Box<dyn FnOnce(&ValueMap) -> std::result::Result<ValueMap, BoxError> + 'a>;

/// Key-value storage capability shared by all backends.
pub trait KeyValue: Send + Sync {
    /// Store `data` under `key`, replacing any previous value.
    fn set_bytes(&self, key: &str, data: Vec<u8>) -> Result<()>;

    /// Read the bytes stored under `key`.
    ///
    /// Returns [`Error::NotFound`] if the key is absent. The returned vector
    /// is an independent copy.
    fn get_bytes(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove `key`. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Check whether `key` is present.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Atomic read-modify-write of one key.
    ///
    /// `op` sees the current snapshot and decides what to write. If it
    /// fails, nothing is written and [`Error::Transaction`] carries its
    /// error together with that snapshot. On success the snapshot taken
    /// *before* the write is returned.
    fn apply_transaction(&self, key: &str, op: TransactionFn<'_>) -> Result<Value>;

    /// Atomic read-modify-write across a set of keys.
    ///
    /// `op` receives one snapshot per distinct key in `keys` and returns
    /// the snapshots to apply: present values are stored, absent ones are
    /// deleted. The result may name keys outside `keys`. If `op` fails,
    /// nothing is written and [`Error::MutualTransaction`] carries its
    /// error together with the snapshots it was shown.
    fn apply_mutual_transaction(
        &self,
        keys: &[&str],
        op: MutualTransactionFn<'_>,
    ) -> Result<MutualOutcome>;
}

/// Closure-generic and typed access on top of any [`KeyValue`].
pub trait KeyValueExt: KeyValue {
    /// [`KeyValue::apply_transaction`] with an unboxed callback.
    fn transaction<F>(&self, key: &str, op: F) -> Result<Value>
    where
        F: FnOnce(&Value) -> std::result::Result<Mutation, BoxError>,
    {
        self.apply_transaction(key, Box::new(op))
    }

    /// [`KeyValue::apply_mutual_transaction`] with an unboxed callback and
    /// any string-like keys.
    fn mutual_transaction<K, F>(&self, keys: &[K], op: F) -> Result<MutualOutcome>
    where
        K: AsRef<str>,
        F: FnOnce(&ValueMap) -> std::result::Result<ValueMap, BoxError>,
    {
        let keys: Vec<&str> = keys.iter().map(|k| k.as_ref()).collect();
        self.apply_mutual_transaction(&keys, Box::new(op))
    }

    /// Store an object using its [`Marshaler`] encoding.
    fn set<M>(&self, key: &str, object: &M) -> Result<()>
    where
        M: Marshaler + ?Sized,
    {
        self.set_bytes(key, object.marshal())
    }

    /// Load the object under `key` into `target` via its [`Unmarshaler`].
    ///
    /// On [`Error::Decode`] the target may be partially updated, depending
    /// on the implementation.
    fn get<U>(&self, key: &str, target: &mut U) -> Result<()>
    where
        U: Unmarshaler + ?Sized,
    {
        let data = self.get_bytes(key)?;
        target
            .unmarshal(&data)
            .map_err(|source| Error::decode(key, source))
    }

    /// Load a fresh `T` from `key` via its [`Unmarshaler`].
    fn get_as<T>(&self, key: &str) -> Result<T>
    where
        T: Unmarshaler + Default,
    {
        let mut target = T::default();
        self.get(key, &mut target)?;
        Ok(target)
    }

    /// Store an object encoded as JSON.
    fn set_json<T>(&self, key: &str, object: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(object).map_err(|e| Error::encode(key, e))?;
        self.set_bytes(key, data)
    }

    /// Load and decode a JSON object from `key`.
    fn get_json<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let data = self.get_bytes(key)?;
        serde_json::from_slice(&data).map_err(|e| Error::decode(key, e))
    }
}

impl<S: KeyValue + ?Sized> KeyValueExt for S {}
