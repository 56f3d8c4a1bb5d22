//! Error types for memkv
//!
//! Every fallible store operation returns [`Result`]. A missing key is an
//! ordinary outcome, reported as [`Error::NotFound`] so callers can branch on
//! it; nothing inside a store terminates the process.
//!
//! ## Error Kinds
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | NotFound | A read targets a key that is not stored |
//! | Encode | JSON encoding of an object fails before storage |
//! | Decode | Stored bytes are rejected by JSON decoding or an `Unmarshaler` |
//! | Transaction | A single-key transaction callback reports failure |
//! | MutualTransaction | A multi-key transaction callback reports failure |

use thiserror::Error;

use crate::value::{Value, ValueMap};

/// Boxed error produced by caller-supplied capabilities.
///
/// Transaction callbacks and `Unmarshaler` implementations report failure
/// through this type; the store keeps it as the `source` of the error it
/// returns.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All memkv errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The key is not present in the store
    #[error("object not found: key {0}")]
    NotFound(String),

    /// Structured encoding failed before anything was stored
    #[error("encode error for key {key}: {source}")]
    Encode {
        /// Key the object was destined for
        key: String,
        /// Encoder failure
        #[source]
        source: BoxError,
    },

    /// Stored bytes could not be decoded into the requested type
    #[error("decode error for key {key}: {source}")]
    Decode {
        /// Key whose bytes were rejected
        key: String,
        /// Decoder failure
        #[source]
        source: BoxError,
    },

    /// A single-key transaction callback failed; nothing was written
    #[error("transaction aborted for key {key}: {source}")]
    Transaction {
        /// Key the transaction ran against
        key: String,
        /// Snapshot the callback was shown, still current in the store
        old: Value,
        /// Error returned by the callback
        #[source]
        source: BoxError,
    },

    /// A multi-key transaction callback failed; nothing was written
    #[error("mutual transaction aborted for keys {keys:?}: {source}")]
    MutualTransaction {
        /// Keys the transaction was shown, in request order
        keys: Vec<String>,
        /// Snapshots the callback was shown, one per distinct key
        old: ValueMap,
        /// Error returned by the callback
        #[source]
        source: BoxError,
    },
}

/// Result type for memkv operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if a transaction callback rejected the operation.
    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            Error::Transaction { .. } | Error::MutualTransaction { .. }
        )
    }

    /// The single key this error refers to, if any.
    ///
    /// Returns `None` for [`Error::MutualTransaction`], which names a key set.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::NotFound(key)
            | Error::Encode { key, .. }
            | Error::Decode { key, .. }
            | Error::Transaction { key, .. } => Some(key),
            Error::MutualTransaction { .. } => None,
        }
    }

    /// Every key this error refers to.
    ///
    /// One element for the single-key variants; the requested key list for
    /// [`Error::MutualTransaction`].
    pub fn keys(&self) -> &[String] {
        match self {
            Error::NotFound(key)
            | Error::Encode { key, .. }
            | Error::Decode { key, .. }
            | Error::Transaction { key, .. } => std::slice::from_ref(key),
            Error::MutualTransaction { keys, .. } => keys,
        }
    }

    /// Pre-call snapshot of an aborted single-key transaction.
    pub fn old_value(&self) -> Option<&Value> {
        match self {
            Error::Transaction { old, .. } => Some(old),
            _ => None,
        }
    }

    /// Pre-call snapshots of an aborted mutual transaction.
    pub fn old_values(&self) -> Option<&ValueMap> {
        match self {
            Error::MutualTransaction { old, .. } => Some(old),
            _ => None,
        }
    }

    pub(crate) fn encode(key: &str, source: impl Into<BoxError>) -> Self {
        Error::Encode {
            key: key.to_owned(),
            source: source.into(),
        }
    }

    pub(crate) fn decode(key: &str, source: impl Into<BoxError>) -> Self {
        Error::Decode {
            key: key.to_owned(),
            source: source.into(),
        }
    }
}
