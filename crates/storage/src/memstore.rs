//! In-memory key-value store.
//!
//! This backend is NOT durable - data is lost when the store is dropped.
//!
//! # Design
//!
//! - One `parking_lot::Mutex` guards an `FxHashMap<String, Vec<u8>>`
//! - Reads, writes and both transaction primitives all take the same lock
//! - Transaction callbacks run with the lock held, so every operation on the
//!   store is totally ordered by a single critical section
//!
//! Values handed out are copies; nothing outside the lock can reach the map.
//!
//! # Callback contract
//!
//! A transaction callback must not call back into the store that invoked it
//! (the lock is not reentrant) and must not block unboundedly. Callbacks
//! slower than the configured threshold are logged at `warn` level.
//!
//! A callback that panics unwinds with the lock released and the map
//! untouched: writes are only applied after the callback returns `Ok`.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use memkv_core::{
    Error, KeyValue, Mutation, MutualOutcome, MutualTransactionFn, Result, TransactionFn, Value,
    ValueMap,
};

use crate::config::{MemstoreBuilder, MemstoreConfig};
use crate::metrics::{Counters, StoreMetrics};

/// Thread-safe in-memory implementation of [`KeyValue`].
///
/// Share it between threads with `Arc<Memstore>`, or as `Arc<dyn KeyValue>`
/// when the backend should be swappable.
///
/// # Example
///
/// ```ignore
/// use memkv_core::{KeyValue, KeyValueExt, Mutation};
/// use memkv_storage::Memstore;
///
/// let store = Memstore::new();
/// store.set_bytes("counter", vec![1])?;
///
/// let old = store.transaction("counter", |old| {
///     let n = old.data().first().copied().unwrap_or(0);
///     Ok(Mutation::set(vec![n + 1]))
/// })?;
/// assert_eq!(old.data(), &[1]);
/// ```
pub struct Memstore {
    data: Mutex<FxHashMap<String, Vec<u8>>>,
    config: MemstoreConfig,
    counters: Counters,
}

impl Memstore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::with_config(MemstoreConfig::default())
    }

    /// Create an empty store from an explicit configuration.
    pub fn with_config(config: MemstoreConfig) -> Self {
        let map = FxHashMap::with_capacity_and_hasher(config.initial_capacity, Default::default());
        Self {
            data: Mutex::new(map),
            config,
            counters: Counters::default(),
        }
    }

    /// Create a builder for store configuration.
    pub fn builder() -> MemstoreBuilder {
        MemstoreBuilder::new()
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &MemstoreConfig {
        &self.config
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// Remove every key in one critical section.
    pub fn clear(&self) {
        self.data.lock().clear();
    }

    /// Snapshot of the transaction counters.
    pub fn metrics(&self) -> StoreMetrics {
        self.counters.snapshot()
    }

    fn snapshot(data: &FxHashMap<String, Vec<u8>>, key: &str) -> Value {
        match data.get(key) {
            Some(bytes) => Value::present(bytes.clone()),
            None => Value::absent(),
        }
    }

    /// Count a callback that ran past the slow threshold; true if it did.
    fn record_callback_time(&self, elapsed: Duration) -> bool {
        match self.config.slow_callback_threshold {
            Some(threshold) if elapsed > threshold => {
                self.counters.record_slow_callback();
                true
            }
            _ => false,
        }
    }
}

impl Default for Memstore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memstore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memstore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl KeyValue for Memstore {
    fn set_bytes(&self, key: &str, data: Vec<u8>) -> Result<()> {
        self.data.lock().insert(key.to_owned(), data);
        Ok(())
    }

    fn get_bytes(&self, key: &str) -> Result<Vec<u8>> {
        self.data
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_owned()))
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.data.lock().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.data.lock().contains_key(key))
    }

    fn apply_transaction(&self, key: &str, op: TransactionFn<'_>) -> Result<Value> {
        let mut data = self.data.lock();
        let old = Self::snapshot(&data, key);

        let started = Instant::now();
        let outcome = op(&old);
        let elapsed = started.elapsed();
        if self.record_callback_time(elapsed) {
            warn!(key, elapsed_us = elapsed.as_micros() as u64, "slow transaction callback");
        }

        let mutation = match outcome {
            Ok(mutation) => mutation,
            Err(source) => {
                self.counters.record_abort();
                debug!(key, existed = old.exists(), error = %source, "transaction aborted");
                return Err(Error::Transaction {
                    key: key.to_owned(),
                    old,
                    source,
                });
            }
        };

        match mutation {
            Mutation::Set(bytes) => {
                data.insert(key.to_owned(), bytes);
            }
            Mutation::Delete => {
                data.remove(key);
            }
        }
        self.counters.record_commit();
        trace!(key, existed = old.exists(), "transaction committed");

        Ok(old)
    }

    fn apply_mutual_transaction(
        &self,
        keys: &[&str],
        op: MutualTransactionFn<'_>,
    ) -> Result<MutualOutcome> {
        let mut data = self.data.lock();

        let mut old = ValueMap::with_capacity(keys.len());
        for &key in keys {
            if !old.contains_key(key) {
                old.insert(key.to_owned(), Self::snapshot(&data, key));
            }
        }

        let started = Instant::now();
        let outcome = op(&old);
        let elapsed = started.elapsed();
        if self.record_callback_time(elapsed) {
            warn!(
                keys = old.len(),
                elapsed_us = elapsed.as_micros() as u64,
                "slow mutual transaction callback"
            );
        }

        let new = match outcome {
            Ok(new) => new,
            Err(source) => {
                self.counters.record_mutual_abort();
                let keys: Vec<String> = keys.iter().map(|k| (*k).to_owned()).collect();
                debug!(?keys, error = %source, "mutual transaction aborted");
                return Err(Error::MutualTransaction { keys, old, source });
            }
        };

        for (key, value) in &new {
            match value.as_bytes() {
                Some(bytes) => {
                    data.insert(key.clone(), bytes.to_vec());
                }
                None => {
                    data.remove(key.as_str());
                }
            }
        }
        self.counters.record_mutual_commit();
        trace!(read = old.len(), written = new.len(), "mutual transaction committed");

        Ok(MutualOutcome { old, new })
    }
}
