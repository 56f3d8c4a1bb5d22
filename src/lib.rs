//! # memkv
//!
//! In-memory, thread-safe key-value store with atomic read-modify-write.
//!
//! Values are raw bytes keyed by string. Typed access goes through the
//! [`Marshaler`]/[`Unmarshaler`] capabilities or through JSON, and every
//! operation is serialized by one exclusive lock, which makes the two
//! transaction primitives atomic across the whole store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use memkv::prelude::*;
//!
//! let store = Memstore::new();
//!
//! // Raw bytes
//! store.set_bytes("greeting", b"hello".to_vec())?;
//! assert_eq!(store.get_bytes("greeting")?, b"hello");
//!
//! // JSON
//! store.set_json("profile", &json!({"name": "Alice"}))?;
//!
//! // Missing keys are an ordinary outcome
//! assert!(store.get_bytes("nope").unwrap_err().is_not_found());
//! ```
//!
//! ## Transactions
//!
//! ```ignore
//! use memkv::prelude::*;
//!
//! let store = Memstore::new();
//! store.set_json("alice", &100u64)?;
//! store.set_json("bob", &0u64)?;
//!
//! // Move 30 from alice to bob, or nothing at all
//! store.mutual_transaction(&["alice", "bob"], |old| {
//!     let alice: u64 = serde_json::from_slice(old["alice"].data())?;
//!     let bob: u64 = serde_json::from_slice(old["bob"].data())?;
//!     if alice < 30 {
//!         return Err("insufficient funds".into());
//!     }
//!     let mut new = ValueMap::new();
//!     new.insert("alice".into(), Value::present(serde_json::to_vec(&(alice - 30))?));
//!     new.insert("bob".into(), Value::present(serde_json::to_vec(&(bob + 30))?));
//!     Ok(new)
//! })?;
//! ```
//!
//! ## Backends
//!
//! Callers should program against [`KeyValue`], which is object safe, so a
//! backend can be chosen at runtime and held as `Arc<dyn KeyValue>`. Import
//! [`KeyValueExt`] (or the prelude) for closure transactions and typed
//! access. [`Memstore`] is the in-memory implementation; it is not durable.

#![warn(missing_docs)]

pub mod prelude;

pub use memkv_core::{
    BoxError, Error, KeyValue, KeyValueExt, Marshaler, Mutation, MutualOutcome,
    MutualTransactionFn, Result, TransactionFn, Unmarshaler, Value, ValueMap,
};
pub use memkv_storage::{
    Memstore, MemstoreBuilder, MemstoreConfig, StoreMetrics, DEFAULT_SLOW_CALLBACK_THRESHOLD,
};
