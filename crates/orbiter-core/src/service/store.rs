//! Typed access to the shared store.
//!
//! Every read-modify-write here takes the write lock once, so the check and
//! the write are a single step for other users of the store.

use crate::domain::errors::KVStoreError;
use crate::domain::keys::{self, decode, encode};
use crate::domain::params::Params;
use crate::domain::pending::PendingPayload;
use crate::domain::stats::DispatchedAmount;
use crate::ports::outbound::SharedStore;
use serde::de::DeserializeOwned;
use shared_types::{ActionId, CrossChainId, OrbiterError, PayloadHash, ProtocolId};

/// Decode the value under `key`, if any.
pub fn read<T: DeserializeOwned>(
    store: &SharedStore,
    key: &[u8],
) -> Result<Option<T>, OrbiterError> {
    let bytes = store.read().get(key)?;
    match bytes {
        Some(bytes) => Ok(Some(decode(key, &bytes)?)),
        None => Ok(None),
    }
}

/// Stored parameters, or the defaults before genesis.
pub fn load_params(store: &SharedStore) -> Result<Params, OrbiterError> {
    Ok(read(store, keys::PARAMS_KEY)?.unwrap_or_default())
}

pub fn save_params(store: &SharedStore, params: &Params) -> Result<(), OrbiterError> {
    let value = encode(params)?;
    store.write().put(keys::PARAMS_KEY, &value)?;
    Ok(())
}

/// True if the flag key is present.
pub fn has_flag(store: &SharedStore, key: &[u8]) -> Result<bool, OrbiterError> {
    Ok(store.read().exists(key)?)
}

/// Set or clear a flag key. Returns whether the state changed.
pub fn set_flag(store: &SharedStore, key: &[u8], on: bool) -> Result<bool, OrbiterError> {
    let mut guard = store.write();
    let present = guard.exists(key)?;
    match (present, on) {
        (false, true) => guard.put(key, &[])?,
        (true, false) => guard.delete(key)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Decode the identifier suffix of each key under `prefix`.
fn scan_suffixes<T: DeserializeOwned>(
    store: &SharedStore,
    prefix: &[u8],
) -> Result<Vec<T>, OrbiterError> {
    let entries = store.read().prefix_scan(prefix)?;
    entries
        .iter()
        .map(|(key, _)| decode::<T>(key, &key[1..]).map_err(OrbiterError::from))
        .collect()
}

pub fn paused_actions(store: &SharedStore) -> Result<Vec<ActionId>, OrbiterError> {
    scan_suffixes(store, &[keys::PAUSED_ACTION_PREFIX])
}

pub fn paused_protocols(store: &SharedStore) -> Result<Vec<ProtocolId>, OrbiterError> {
    scan_suffixes(store, &[keys::PAUSED_PROTOCOL_PREFIX])
}

/// Paused routes of one protocol, or of every protocol when `None`.
pub fn paused_counterparties(
    store: &SharedStore,
    protocol: Option<ProtocolId>,
) -> Result<Vec<CrossChainId>, OrbiterError> {
    let prefix = match protocol {
        Some(protocol) => keys::paused_counterparty_prefix(protocol)?,
        None => vec![keys::PAUSED_COUNTERPARTY_PREFIX],
    };
    let pairs: Vec<(ProtocolId, String)> = scan_suffixes(store, &prefix)?;
    pairs
        .into_iter()
        .map(|(protocol, counterparty)| CrossChainId::new(protocol, counterparty))
        .collect()
}

pub fn pending_payload(
    store: &SharedStore,
    hash: &PayloadHash,
) -> Result<Option<PendingPayload>, OrbiterError> {
    read(store, &keys::pending_payload_key(hash))
}

pub fn pending_payload_count(store: &SharedStore) -> Result<usize, OrbiterError> {
    Ok(store
        .read()
        .prefix_scan(&[keys::PENDING_PAYLOAD_PREFIX])?
        .len())
}

/// Cumulative amount of `denom` over a route, zero if never dispatched.
pub fn dispatched_amount(
    store: &SharedStore,
    source: &CrossChainId,
    destination: &CrossChainId,
    denom: &str,
) -> Result<DispatchedAmount, OrbiterError> {
    let key = keys::dispatched_amount_key(source, destination, denom)?;
    Ok(read(store, &key)?.unwrap_or_default())
}

/// Every denom dispatched over a route, sorted by key.
pub fn dispatched_amounts(
    store: &SharedStore,
    source: &CrossChainId,
    destination: &CrossChainId,
) -> Result<Vec<(String, DispatchedAmount)>, OrbiterError> {
    let prefix = keys::dispatched_amount_route_prefix(source, destination)?;
    let entries = store.read().prefix_scan(&prefix)?;
    entries
        .iter()
        .map(|(key, value)| {
            let (_, _, _, denom): (ProtocolId, String, CrossChainId, String) =
                decode(key, &key[1..])?;
            let amount: DispatchedAmount = decode(key, value)?;
            Ok::<_, KVStoreError>((denom, amount))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(OrbiterError::from)
}

/// Number of dispatches over a route.
pub fn dispatched_count(
    store: &SharedStore,
    source: &CrossChainId,
    destination: &CrossChainId,
) -> Result<u64, OrbiterError> {
    let key = keys::dispatched_count_key(source, destination)?;
    Ok(read(store, &key)?.unwrap_or(0))
}
