//! # Domain Errors
//!
//! Storage-level errors. Everything that leaves a component is converted to
//! [`OrbiterError`].

use shared_types::OrbiterError;
use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError {
        /// Backend message.
        message: String,
    },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError {
        /// Backend message.
        message: String,
    },

    /// Stored bytes could not be decoded.
    #[error("KV store decode error for key {key}: {message}")]
    DecodeError {
        /// Hex of the offending key.
        key: String,
        /// Decoder message.
        message: String,
    },
}

impl From<KVStoreError> for OrbiterError {
    fn from(err: KVStoreError) -> Self {
        OrbiterError::Storage(err.to_string())
    }
}
