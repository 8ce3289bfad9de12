//! # Pending Payloads
//!
//! A payload recorded ahead of the cross-chain transfer that will execute
//! it. Identified by a sequence-salted content hash.

use crate::domain::errors::KVStoreError;
use crate::domain::keys::encode;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{Payload, PayloadHash, Timestamp};

/// Default time-to-live of a pending payload (24 hours).
pub const DEFAULT_PENDING_TTL_SECS: u64 = 24 * 3600;

/// Default maximum number of entries removed by one sweep.
pub const DEFAULT_SWEEP_LIMIT: usize = 200;

/// Stored pending payload. Never mutated after submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayload {
    /// Value of the submission counter when recorded.
    pub sequence: u64,
    /// Payload to execute later.
    pub payload: Payload,
    /// Submission time.
    pub timestamp: Timestamp,
}

impl PendingPayload {
    /// New pending entry.
    pub fn new(sequence: u64, payload: Payload, timestamp: Timestamp) -> Self {
        Self {
            sequence,
            payload,
            timestamp,
        }
    }

    /// SHA-256 over the encoded `{sequence, payload, timestamp}`.
    ///
    /// The sequence makes byte-identical payloads submitted at different
    /// times hash differently.
    pub fn hash(&self) -> Result<PayloadHash, KVStoreError> {
        let bytes = encode(self)?;
        let digest = Sha256::digest(&bytes);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        Ok(PayloadHash(hash))
    }

    /// True if submitted strictly before `cutoff`.
    pub fn is_expired(&self, cutoff: Timestamp) -> bool {
        self.timestamp < cutoff
    }
}
