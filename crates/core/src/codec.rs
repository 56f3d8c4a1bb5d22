//! Serialization capabilities used by typed store access
//!
//! Stores never inspect values: [`Marshaler`] turns an object into opaque
//! bytes and [`Unmarshaler`] populates an object from them. Types that
//! already speak serde can skip these traits and use the JSON methods on
//! [`KeyValue`](crate::KeyValue) instead.

use crate::error::BoxError;

/// Serialize an object to bytes.
///
/// Marshalling is total: every value of the implementing type has a byte
/// form.
pub trait Marshaler {
    /// Encode `self` into a fresh byte vector.
    fn marshal(&self) -> Vec<u8>;
}

/// Populate an object from bytes.
pub trait Unmarshaler {
    /// Overwrite `self` with the object encoded in `data`.
    ///
    /// Implementations must reject malformed input with an error rather
    /// than panic.
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), BoxError>;
}

impl Marshaler for Vec<u8> {
    fn marshal(&self) -> Vec<u8> {
        self.clone()
    }
}

impl Marshaler for [u8] {
    fn marshal(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl Unmarshaler for Vec<u8> {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), BoxError> {
        self.clear();
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Marshaler for String {
    fn marshal(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Marshaler for str {
    fn marshal(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Unmarshaler for String {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), BoxError> {
        *self = std::str::from_utf8(data)?.to_owned();
        Ok(())
    }
}
