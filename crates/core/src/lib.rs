//! Core types for memkv
//!
//! This crate defines the pieces shared by every key-value backend:
//! - Error: the error enum and `Result` alias
//! - Value / Mutation: snapshots exchanged with transaction callbacks
//! - Marshaler / Unmarshaler: byte serialization capabilities
//! - KeyValue: the object-safe backend trait
//! - KeyValueExt: closure-generic transactions and typed access for any backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod traits;
pub mod value;

pub use codec::{Marshaler, Unmarshaler};
pub use error::{BoxError, Error, Result};
pub use traits::{KeyValue, KeyValueExt, MutualTransactionFn, TransactionFn};
pub use value::{Mutation, MutualOutcome, Value, ValueMap};
