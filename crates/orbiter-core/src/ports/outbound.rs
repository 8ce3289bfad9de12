//! # Outbound Ports
//!
//! Everything the dispatch core needs from its host: an ordered key-value
//! store, a balance ledger, an authority check, a clock, an event sink, and
//! the per-protocol and per-action controllers.

use crate::domain::errors::KVStoreError;
use crate::domain::events::OrbiterEvent;
use crate::domain::router::Controller;
use parking_lot::RwLock;
use primitive_types::U256;
use shared_types::{
    ActionId, ActionPacket, Coin, ForwardingPacket, OrbiterError, ParsedPacket, ProtocolId,
    Timestamp,
};
use std::sync::Arc;

/// Key-value pairs returned by scans, in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Ordered key-value store.
///
/// Production: host chain state store.
/// Testing: `InMemoryKVStore`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Apply all operations or none.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// All entries whose key starts with `prefix`, ascending.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;

    /// Entries with `start <= key < end`, ascending, at most `limit`.
    fn range_scan(&self, start: &[u8], end: &[u8], limit: usize)
        -> Result<ScanResult, KVStoreError>;
}

/// Store handle shared by the components.
pub type SharedStore = Arc<RwLock<dyn KeyValueStore>>;

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Balance ledger.
pub trait BankKeeper: Send + Sync {
    /// Balance of one denom, zero if absent.
    fn get_balance(&self, account: &str, denom: &str) -> Result<U256, OrbiterError>;

    /// All non-zero balances of an account, sorted by denom.
    fn get_all_balances(&self, account: &str) -> Result<Vec<Coin>, OrbiterError>;

    /// Move coins between accounts. All or nothing.
    fn send_coins(&self, from: &str, to: &str, coins: &[Coin]) -> Result<(), OrbiterError>;
}

/// Administrative authority check.
pub trait AuthorityChecker: Send + Sync {
    /// Fails with `Unauthorized` unless `signer` is the authority.
    fn require_authority(&self, signer: &str) -> Result<(), OrbiterError>;

    /// Configured authority.
    fn authority(&self) -> &str;
}

/// Block time source.
pub trait TimeSource: Send + Sync {
    /// Current block time in seconds.
    fn now(&self) -> Timestamp;
}

/// Event sink.
pub trait EventEmitter: Send + Sync {
    /// Record one event.
    fn emit(&self, event: OrbiterEvent);
}

/// Parses a protocol's raw inbound packet into a coin and routing payload.
pub trait PacketParser: Controller<ProtocolId> {
    /// Decode `raw`.
    fn parse_packet(&self, raw: &[u8]) -> Result<ParsedPacket, OrbiterError>;
}

/// Executes one pre-action kind. May mutate the transfer attributes.
pub trait ActionController: Controller<ActionId> {
    /// Run the action.
    fn handle_packet(&self, packet: &mut ActionPacket) -> Result<(), OrbiterError>;
}

/// Sends the transfer out over one protocol.
pub trait ForwardingController: Controller<ProtocolId> {
    /// Perform the outbound send.
    fn handle_packet(&self, packet: &ForwardingPacket) -> Result<(), OrbiterError>;
}
