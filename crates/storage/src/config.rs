//! Store configuration and builder.
//!
//! ```ignore
//! use std::time::Duration;
//! use memkv_storage::Memstore;
//!
//! let store = Memstore::builder()
//!     .initial_capacity(1024)
//!     .slow_callback_threshold(Duration::from_millis(20))
//!     .build();
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::memstore::Memstore;

/// Default lock hold time after which a transaction callback is reported.
pub const DEFAULT_SLOW_CALLBACK_THRESHOLD: Duration = Duration::from_millis(100);

/// Tunables for a [`Memstore`].
///
/// Derives serde so it can sit inside a host application's config file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemstoreConfig {
    /// Number of keys to pre-allocate room for
    pub initial_capacity: usize,

    /// Transaction callbacks holding the lock longer than this emit a
    /// `warn!` event and bump `slow_callbacks`. `None` disables the check.
    pub slow_callback_threshold: Option<Duration>,
}

impl Default for MemstoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            slow_callback_threshold: Some(DEFAULT_SLOW_CALLBACK_THRESHOLD),
        }
    }
}

/// Builder for [`Memstore`].
#[derive(Debug, Clone, Default)]
pub struct MemstoreBuilder {
    config: MemstoreConfig,
}

impl MemstoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the map for `capacity` keys.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Report transaction callbacks that hold the lock longer than `threshold`.
    pub fn slow_callback_threshold(mut self, threshold: Duration) -> Self {
        self.config.slow_callback_threshold = Some(threshold);
        self
    }

    /// Never report slow transaction callbacks.
    pub fn no_slow_callback_check(mut self) -> Self {
        self.config.slow_callback_threshold = None;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &MemstoreConfig {
        &self.config
    }

    /// Create the store.
    pub fn build(self) -> Memstore {
        Memstore::with_config(self.config)
    }
}
