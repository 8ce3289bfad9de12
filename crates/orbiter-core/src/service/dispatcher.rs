//! # Dispatcher
//!
//! Runs a payload's pre-actions in order, then its forwarding, then records
//! traffic statistics.
//!
//! ## Failure policy
//!
//! | Stage | On failure |
//! |-------|------------|
//! | Validation | abort, `Validation` |
//! | Pre-action `i` | abort, wrapped in `ActionFailed` |
//! | Forwarding | abort, wrapped in `ForwardingFailed` |
//! | Statistics | logged at `error`, dispatch still succeeds |

use crate::domain::keys::{self, encode};
use crate::domain::stats::{amount_deltas, increment_count, DispatchedAmount};
use crate::ports::inbound::{DispatcherApi, ExecutorApi, ForwarderApi};
use crate::ports::outbound::{BatchOperation, SharedStore};
use crate::service::store;
use shared_types::{
    ActionPacket, CrossChainId, ForwardingPacket, OrbiterError, Payload, TransferAttributes,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Payload dispatcher.
pub struct Dispatcher {
    executor: Arc<dyn ExecutorApi>,
    forwarder: Arc<dyn ForwarderApi>,
    store: SharedStore,
}

impl Dispatcher {
    pub fn new(
        executor: Arc<dyn ExecutorApi>,
        forwarder: Arc<dyn ForwarderApi>,
        store: SharedStore,
    ) -> Self {
        Self {
            executor,
            forwarder,
            store,
        }
    }

    /// Cumulative amount of `denom` over a route.
    pub fn dispatched_amount(
        &self,
        source: &CrossChainId,
        destination: &CrossChainId,
        denom: &str,
    ) -> Result<DispatchedAmount, OrbiterError> {
        store::dispatched_amount(&self.store, source, destination, denom)
    }

    /// Every denom dispatched over a route.
    pub fn dispatched_amounts(
        &self,
        source: &CrossChainId,
        destination: &CrossChainId,
    ) -> Result<Vec<(String, DispatchedAmount)>, OrbiterError> {
        store::dispatched_amounts(&self.store, source, destination)
    }

    /// Number of dispatches over a route.
    pub fn dispatched_count(
        &self,
        source: &CrossChainId,
        destination: &CrossChainId,
    ) -> Result<u64, OrbiterError> {
        store::dispatched_count(&self.store, source, destination)
    }

    /// Add one dispatch to the route counters, in a single batch.
    fn update_stats(
        &self,
        attr: &TransferAttributes,
        destination: &CrossChainId,
    ) -> Result<(), OrbiterError> {
        let source = attr.source_cross_chain_id()?;
        let mut guard = self.store.write();
        let mut ops = Vec::new();

        for (denom, delta) in amount_deltas(attr) {
            let key = keys::dispatched_amount_key(&source, destination, &denom)?;
            let current: DispatchedAmount = match guard.get(&key)? {
                Some(bytes) => keys::decode(&key, &bytes)?,
                None => DispatchedAmount::default(),
            };
            ops.push(BatchOperation::put(key, encode(&current.checked_add(&delta)?)?));
        }

        let count_key = keys::dispatched_count_key(&source, destination)?;
        let count: u64 = match guard.get(&count_key)? {
            Some(bytes) => keys::decode(&count_key, &bytes)?,
            None => 0,
        };
        ops.push(BatchOperation::put(count_key, encode(&increment_count(count)?)?));

        guard.atomic_batch_write(ops)?;
        Ok(())
    }
}

impl DispatcherApi for Dispatcher {
    fn dispatch_payload(
        &self,
        transfer_attributes: &mut TransferAttributes,
        payload: &Payload,
    ) -> Result<(), OrbiterError> {
        transfer_attributes.validate()?;
        payload.validate()?;
        let destination = payload.forwarding.destination()?;

        for action in &payload.pre_actions {
            let id = action.id();
            let mut packet = ActionPacket::new(transfer_attributes.clone(), action.clone());
            self.executor
                .handle_packet(&mut packet)
                .map_err(|e| e.in_action(id))?;
            *transfer_attributes = packet.transfer_attributes;
            debug!(
                "[orbiter:dispatcher] Pre-action {} done, destination now {}",
                id.name(),
                transfer_attributes.destination_coin()
            );
        }

        let protocol = payload.forwarding.protocol_id();
        let packet = ForwardingPacket::new(transfer_attributes.clone(), payload.forwarding.clone());
        self.forwarder
            .handle_packet(&packet)
            .map_err(|e| e.in_forwarding(protocol))?;

        info!(
            "[orbiter:dispatcher] Dispatched {}:{} -> {} ({} pre-actions)",
            transfer_attributes.source_protocol_id(),
            transfer_attributes.source_counterparty_id(),
            destination,
            payload.pre_actions.len()
        );

        // The forward has committed; statistics must not undo it.
        if let Err(err) = self.update_stats(transfer_attributes, &destination) {
            error!(
                error = %err,
                "[orbiter:dispatcher] Failed to update statistics for route to {}",
                destination
            );
        }
        Ok(())
    }
}
