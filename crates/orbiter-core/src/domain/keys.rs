//! # Store Key Layout
//!
//! One prefix byte per collection. Composite keys append the bincode
//! encoding of their parts, which is length-prefixed and therefore
//! unambiguous and prefix-scannable.
//!
//! | Prefix | Collection | Key suffix | Value |
//! |--------|------------|------------|-------|
//! | `0x01` | params | - | `Params` |
//! | `0x10` | paused actions | `ActionId` | empty |
//! | `0x20` | paused protocols | `ProtocolId` | empty |
//! | `0x21` | paused counterparties | `(ProtocolId, String)` | empty |
//! | `0x30` | pending sequence | - | `u64` |
//! | `0x31` | pending payloads | `hash` | `PendingPayload` |
//! | `0x32` | pending by time | `timestamp_be ++ hash` | empty |
//! | `0x40` | dispatched amounts | `(source, destination, denom)` | `DispatchedAmount` |
//! | `0x41` | dispatched counts | `(source, destination)` | `u64` |

use crate::domain::errors::KVStoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{ActionId, CrossChainId, PayloadHash, ProtocolId, Timestamp};

pub const PARAMS_KEY: &[u8] = &[0x01];
pub const PAUSED_ACTION_PREFIX: u8 = 0x10;
pub const PAUSED_PROTOCOL_PREFIX: u8 = 0x20;
pub const PAUSED_COUNTERPARTY_PREFIX: u8 = 0x21;
pub const PENDING_SEQUENCE_KEY: &[u8] = &[0x30];
pub const PENDING_PAYLOAD_PREFIX: u8 = 0x31;
pub const PENDING_BY_TIME_PREFIX: u8 = 0x32;
pub const DISPATCHED_AMOUNT_PREFIX: u8 = 0x40;
pub const DISPATCHED_COUNT_PREFIX: u8 = 0x41;

/// Encode a value with the store codec.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, KVStoreError> {
    bincode::serialize(value).map_err(|e| KVStoreError::IOError {
        message: format!("encode failed: {}", e),
    })
}

/// Decode a value stored under `key`.
pub fn decode<T: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> Result<T, KVStoreError> {
    bincode::deserialize(bytes).map_err(|e| KVStoreError::DecodeError {
        key: hex::encode(key),
        message: e.to_string(),
    })
}

fn prefixed<T: Serialize>(prefix: u8, suffix: &T) -> Result<Vec<u8>, KVStoreError> {
    let mut key = vec![prefix];
    key.extend(encode(suffix)?);
    Ok(key)
}

pub fn paused_action_key(id: ActionId) -> Result<Vec<u8>, KVStoreError> {
    prefixed(PAUSED_ACTION_PREFIX, &id)
}

pub fn paused_protocol_key(id: ProtocolId) -> Result<Vec<u8>, KVStoreError> {
    prefixed(PAUSED_PROTOCOL_PREFIX, &id)
}

pub fn paused_counterparty_key(
    protocol: ProtocolId,
    counterparty: &str,
) -> Result<Vec<u8>, KVStoreError> {
    prefixed(PAUSED_COUNTERPARTY_PREFIX, &(protocol, counterparty))
}

/// Prefix covering every paused counterparty of `protocol`.
pub fn paused_counterparty_prefix(protocol: ProtocolId) -> Result<Vec<u8>, KVStoreError> {
    prefixed(PAUSED_COUNTERPARTY_PREFIX, &protocol)
}

pub fn pending_payload_key(hash: &PayloadHash) -> Vec<u8> {
    let mut key = Vec::with_capacity(33);
    key.push(PENDING_PAYLOAD_PREFIX);
    key.extend_from_slice(hash.as_bytes());
    key
}

/// Time index key. Big-endian timestamp keeps byte order equal to time order.
pub fn pending_by_time_key(timestamp: Timestamp, hash: &PayloadHash) -> Vec<u8> {
    let mut key = Vec::with_capacity(41);
    key.push(PENDING_BY_TIME_PREFIX);
    key.extend_from_slice(&timestamp.to_be_bytes());
    key.extend_from_slice(hash.as_bytes());
    key
}

/// Exclusive upper bound of the time index for entries strictly before
/// `cutoff`.
pub fn pending_by_time_bound(cutoff: Timestamp) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PENDING_BY_TIME_PREFIX);
    key.extend_from_slice(&cutoff.to_be_bytes());
    key
}

/// Split a time index key into its parts.
pub fn parse_pending_by_time_key(key: &[u8]) -> Result<(Timestamp, PayloadHash), KVStoreError> {
    if key.len() != 41 || key[0] != PENDING_BY_TIME_PREFIX {
        return Err(KVStoreError::CorruptionError {
            message: format!("malformed pending time index key {}", hex::encode(key)),
        });
    }
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&key[1..9]);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&key[9..41]);
    Ok((Timestamp::from_be_bytes(ts), PayloadHash(hash)))
}

/// Dispatched-amount key. Source is stored as protocol plus counterparty.
pub fn dispatched_amount_key(
    source: &CrossChainId,
    destination: &CrossChainId,
    denom: &str,
) -> Result<Vec<u8>, KVStoreError> {
    prefixed(
        DISPATCHED_AMOUNT_PREFIX,
        &(
            source.protocol_id(),
            source.counterparty_id(),
            destination,
            denom,
        ),
    )
}

/// Prefix covering every denom dispatched over one route.
pub fn dispatched_amount_route_prefix(
    source: &CrossChainId,
    destination: &CrossChainId,
) -> Result<Vec<u8>, KVStoreError> {
    prefixed(
        DISPATCHED_AMOUNT_PREFIX,
        &(source.protocol_id(), source.counterparty_id(), destination),
    )
}

pub fn dispatched_count_key(
    source: &CrossChainId,
    destination: &CrossChainId,
) -> Result<Vec<u8>, KVStoreError> {
    prefixed(DISPATCHED_COUNT_PREFIX, &(source, destination))
}

/// Smallest key strictly greater than every key starting with `prefix`.
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}
