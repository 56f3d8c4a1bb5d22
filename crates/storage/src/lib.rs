//! Storage layer for memkv
//!
//! This crate implements the in-memory backend:
//! - Memstore: FxHashMap behind a single parking_lot Mutex
//! - MemstoreBuilder / MemstoreConfig: construction and tuning
//! - StoreMetrics: transaction commit/abort counters

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod memstore;
pub mod metrics;

pub use config::{MemstoreBuilder, MemstoreConfig, DEFAULT_SLOW_CALLBACK_THRESHOLD};
pub use memstore::Memstore;
pub use metrics::StoreMetrics;
