//! # Payload Lifecycle
//!
//! Payloads recorded ahead of the transfer that will execute them.
//!
//! Each entry is keyed by its hash and indexed by submission time. The
//! sequence counter, the entry and its index key are written in one batch.

use crate::config::PendingPayloadConfig;
use crate::domain::events::OrbiterEvent;
use crate::domain::invariants::invariant_passthrough_size;
use crate::domain::keys::{self, decode, encode};
use crate::domain::pending::PendingPayload;
use crate::ports::inbound::PayloadLifecycleApi;
use crate::ports::outbound::{BatchOperation, EventEmitter, SharedStore, TimeSource};
use crate::service::store;
use shared_types::{OrbiterError, Payload, PayloadHash, Timestamp};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pending payload store.
pub struct PayloadLifecycle {
    store: SharedStore,
    clock: Arc<dyn TimeSource>,
    events: Arc<dyn EventEmitter>,
    ttl_secs: u64,
    sweep_limit: usize,
}

impl PayloadLifecycle {
    pub fn new(
        store: SharedStore,
        clock: Arc<dyn TimeSource>,
        events: Arc<dyn EventEmitter>,
        config: &PendingPayloadConfig,
    ) -> Self {
        Self {
            store,
            clock,
            events,
            ttl_secs: config.ttl_secs,
            sweep_limit: config.sweep_limit,
        }
    }

    /// Number of stored entries.
    pub fn count(&self) -> Result<usize, OrbiterError> {
        store::pending_payload_count(&self.store)
    }

    /// Next sequence number to be handed out.
    pub fn next_sequence(&self) -> Result<u64, OrbiterError> {
        Ok(store::read(&self.store, keys::PENDING_SEQUENCE_KEY)?.unwrap_or(0))
    }

    /// Per-block hook: sweep entries older than the TTL.
    pub fn end_block(&self, now: Timestamp) -> Result<Vec<PayloadHash>, OrbiterError> {
        self.sweep_expired(now.saturating_sub(self.ttl_secs))
    }

    fn take(&self, hash: &PayloadHash) -> Result<PendingPayload, OrbiterError> {
        let key = keys::pending_payload_key(hash);
        let entry = {
            let mut guard = self.store.write();
            let bytes = guard
                .get(&key)?
                .ok_or_else(|| OrbiterError::not_found(format!("pending payload {}", hash)))?;
            let entry: PendingPayload = decode(&key, &bytes)?;
            guard.atomic_batch_write(vec![
                BatchOperation::delete(key),
                BatchOperation::delete(keys::pending_by_time_key(entry.timestamp, hash)),
            ])?;
            entry
        };
        debug!("[orbiter:pending] Removed payload {}", hash);
        self.events
            .emit(OrbiterEvent::PendingPayloadRemoved { hash: *hash });
        Ok(entry)
    }
}

impl PayloadLifecycleApi for PayloadLifecycle {
    fn submit(&self, payload: Payload) -> Result<PayloadHash, OrbiterError> {
        payload.validate()?;
        let params = store::load_params(&self.store)?;
        invariant_passthrough_size(
            payload.forwarding.passthrough_payload().len(),
            params.max_passthrough_payload_size,
        )?;

        let now = self.clock.now();
        let (hash, sequence) = {
            let mut guard = self.store.write();
            let sequence: u64 = match guard.get(keys::PENDING_SEQUENCE_KEY)? {
                Some(bytes) => decode(keys::PENDING_SEQUENCE_KEY, &bytes)?,
                None => 0,
            };
            let next = sequence
                .checked_add(1)
                .ok_or_else(|| OrbiterError::Overflow("pending payload sequence".into()))?;

            let entry = PendingPayload::new(sequence, payload, now);
            let hash = entry.hash()?;
            let key = keys::pending_payload_key(&hash);
            if guard.exists(&key)? {
                return Err(OrbiterError::AlreadyExists(format!(
                    "pending payload {}",
                    hash
                )));
            }

            guard.atomic_batch_write(vec![
                BatchOperation::put(keys::PENDING_SEQUENCE_KEY.to_vec(), encode(&next)?),
                BatchOperation::put(key, encode(&entry)?),
                BatchOperation::put(keys::pending_by_time_key(now, &hash), Vec::new()),
            ])?;
            (hash, sequence)
        };

        info!(
            "[orbiter:pending] Submitted payload {} (sequence {})",
            hash, sequence
        );
        self.events
            .emit(OrbiterEvent::PendingPayloadSubmitted { hash, sequence });
        Ok(hash)
    }

    fn complete(&self, hash: &PayloadHash) -> Result<PendingPayload, OrbiterError> {
        self.take(hash)
    }

    fn remove(&self, hash: &PayloadHash) -> Result<(), OrbiterError> {
        self.take(hash).map(|_| ())
    }

    fn get(&self, hash: &PayloadHash) -> Result<Option<PendingPayload>, OrbiterError> {
        store::pending_payload(&self.store, hash)
    }

    fn sweep_expired(&self, cutoff: Timestamp) -> Result<Vec<PayloadHash>, OrbiterError> {
        let expired = {
            let mut guard = self.store.write();
            let index = guard.range_scan(
                &[keys::PENDING_BY_TIME_PREFIX],
                &keys::pending_by_time_bound(cutoff),
                self.sweep_limit,
            )?;
            if index.is_empty() {
                return Ok(Vec::new());
            }

            let mut ops = Vec::with_capacity(index.len() * 2);
            let mut expired = Vec::with_capacity(index.len());
            for (index_key, _) in index {
                let (_, hash) = keys::parse_pending_by_time_key(&index_key)?;
                ops.push(BatchOperation::delete(index_key));
                ops.push(BatchOperation::delete(keys::pending_payload_key(&hash)));
                expired.push(hash);
            }
            guard.atomic_batch_write(ops)?;
            expired
        };

        if expired.len() == self.sweep_limit {
            warn!(
                "[orbiter:pending] Sweep hit its limit of {}, more entries may remain before {}",
                self.sweep_limit, cutoff
            );
        } else {
            debug!(
                "[orbiter:pending] Swept {} expired payload(s) before {}",
                expired.len(),
                cutoff
            );
        }
        for hash in &expired {
            self.events
                .emit(OrbiterEvent::PendingPayloadExpired { hash: *hash });
        }
        Ok(expired)
    }
}
