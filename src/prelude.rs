//! Convenient imports for memkv.
//!
//! ```ignore
//! use memkv::prelude::*;
//!
//! let store = Memstore::new();
//! store.set_bytes("key", b"value".to_vec())?;
//! ```

// Store
pub use crate::{Memstore, MemstoreBuilder, MemstoreConfig, StoreMetrics};

// Backend trait and capabilities
pub use crate::{KeyValue, KeyValueExt, Marshaler, Unmarshaler};

// Snapshots and errors
pub use crate::{BoxError, Error, Mutation, MutualOutcome, Result, Value, ValueMap};

// Re-export serde_json for convenience
pub use serde_json::json;
