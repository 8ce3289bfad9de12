//! # Forwarder
//!
//! Sends the transfer out over the destination protocol. Two circuit
//! breakers guard it: one per protocol and one per (protocol, counterparty)
//! route. Before any send the holding account must hold exactly the coin
//! being forwarded.

use crate::domain::events::OrbiterEvent;
use crate::domain::invariants::invariant_initial_condition;
use crate::domain::keys;
use crate::domain::router::{Controller, Router};
use crate::ports::inbound::ForwarderApi;
use crate::ports::outbound::{
    BankKeeper, BatchOperation, EventEmitter, ForwardingController, SharedStore,
};
use crate::service::store;
use shared_types::{CrossChainId, ForwardingPacket, OrbiterError, ProtocolId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outbound forwarder.
pub struct Forwarder {
    router: Router<ProtocolId, dyn ForwardingController>,
    store: SharedStore,
    bank: Arc<dyn BankKeeper>,
    holding_account: String,
    events: Arc<dyn EventEmitter>,
}

impl Forwarder {
    /// Forwarder with an empty, unsealed router.
    pub fn new(
        store: SharedStore,
        bank: Arc<dyn BankKeeper>,
        holding_account: impl Into<String>,
        events: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            router: Router::new(),
            store,
            bank,
            holding_account: holding_account.into(),
            events,
        }
    }

    /// Register a controller under the protocol it reports.
    pub fn add_controller(
        &mut self,
        controller: Arc<dyn ForwardingController>,
    ) -> Result<(), OrbiterError> {
        self.router.add_route(controller)
    }

    /// Freeze the set of routed protocols.
    pub fn seal(&mut self) {
        self.router.seal();
    }

    pub fn router(&self) -> &Router<ProtocolId, dyn ForwardingController> {
        &self.router
    }

    pub fn paused_protocols(&self) -> Result<Vec<ProtocolId>, OrbiterError> {
        store::paused_protocols(&self.store)
    }

    pub fn paused_counterparties(
        &self,
        protocol: ProtocolId,
    ) -> Result<Vec<CrossChainId>, OrbiterError> {
        store::paused_counterparties(&self.store, Some(protocol))
    }

    fn set_protocol_paused(&self, protocol: ProtocolId, paused: bool) -> Result<(), OrbiterError> {
        let key = keys::paused_protocol_key(protocol)?;
        if !store::set_flag(&self.store, &key, paused)? {
            return Ok(());
        }
        info!(
            "[orbiter:forwarder] Protocol {} {}",
            protocol.name(),
            if paused { "paused" } else { "unpaused" }
        );
        self.events.emit(if paused {
            OrbiterEvent::ProtocolPaused { protocol }
        } else {
            OrbiterEvent::ProtocolUnpaused { protocol }
        });
        Ok(())
    }

    /// Pause or unpause each listed route in one batch.
    ///
    /// Every pair is validated first; an invalid one fails the whole call,
    /// naming the pair, and nothing is written.
    fn set_counterparties_paused(
        &self,
        protocol: ProtocolId,
        counterparties: &[String],
        paused: bool,
    ) -> Result<(), OrbiterError> {
        let mut pairs: Vec<(CrossChainId, Vec<u8>)> = Vec::with_capacity(counterparties.len());
        for counterparty in counterparties {
            let id = CrossChainId::new(protocol, counterparty.clone()).map_err(|e| {
                OrbiterError::validation(format!(
                    "invalid route {}:{}: {}",
                    protocol, counterparty, e
                ))
            })?;
            if pairs.iter().any(|(seen, _)| *seen == id) {
                continue;
            }
            let key = keys::paused_counterparty_key(protocol, counterparty)?;
            pairs.push((id, key));
        }

        let changed = {
            let mut guard = self.store.write();
            let mut changed = Vec::new();
            let mut ops = Vec::new();
            for (id, key) in pairs {
                let present = guard.exists(&key)?;
                match (present, paused) {
                    (false, true) => ops.push(BatchOperation::put(key, Vec::new())),
                    (true, false) => ops.push(BatchOperation::delete(key)),
                    _ => continue,
                }
                changed.push(id);
            }
            if !ops.is_empty() {
                guard.atomic_batch_write(ops)?;
            }
            changed
        };

        for id in changed {
            info!(
                "[orbiter:forwarder] Route {} {}",
                id,
                if paused { "paused" } else { "unpaused" }
            );
            let counterparty = id.counterparty_id().to_string();
            self.events.emit(if paused {
                OrbiterEvent::CounterpartyPaused {
                    protocol,
                    counterparty,
                }
            } else {
                OrbiterEvent::CounterpartyUnpaused {
                    protocol,
                    counterparty,
                }
            });
        }
        Ok(())
    }

    fn set_paused(
        &self,
        protocol: ProtocolId,
        counterparties: &[String],
        paused: bool,
    ) -> Result<(), OrbiterError> {
        protocol.validate()?;
        if counterparties.is_empty() {
            self.set_protocol_paused(protocol, paused)
        } else {
            self.set_counterparties_paused(protocol, counterparties, paused)
        }
    }
}

impl ForwarderApi for Forwarder {
    fn pause(&self, protocol: ProtocolId, counterparties: &[String]) -> Result<(), OrbiterError> {
        self.set_paused(protocol, counterparties, true)
    }

    fn unpause(
        &self,
        protocol: ProtocolId,
        counterparties: &[String],
    ) -> Result<(), OrbiterError> {
        self.set_paused(protocol, counterparties, false)
    }

    fn is_protocol_paused(&self, protocol: ProtocolId) -> Result<bool, OrbiterError> {
        store::has_flag(&self.store, &keys::paused_protocol_key(protocol)?)
    }

    fn is_counterparty_paused(
        &self,
        protocol: ProtocolId,
        counterparty: &str,
    ) -> Result<bool, OrbiterError> {
        store::has_flag(
            &self.store,
            &keys::paused_counterparty_key(protocol, counterparty)?,
        )
    }

    fn handle_packet(&self, packet: &ForwardingPacket) -> Result<(), OrbiterError> {
        packet.validate()?;
        let protocol = packet.forwarding.protocol_id();
        let destination = packet.forwarding.destination()?;

        if self.is_protocol_paused(protocol)? {
            return Err(OrbiterError::Paused(format!(
                "protocol {} is paused",
                protocol.name()
            )));
        }
        if self.is_counterparty_paused(protocol, destination.counterparty_id())? {
            return Err(OrbiterError::Paused(format!("route {} is paused", destination)));
        }

        let expected = packet.transfer_attributes.destination_coin();
        let balances = self.bank.get_all_balances(&self.holding_account)?;
        if let Err(err) = invariant_initial_condition(&balances, &expected) {
            warn!(
                "[orbiter:forwarder] Initial condition failed for {}: {}",
                destination, err
            );
            return Err(err);
        }

        let controller = self.router.require_route(protocol)?;
        debug!(
            "[orbiter:forwarder] Forwarding {} to {} via {}",
            expected,
            destination,
            controller.name()
        );
        controller.handle_packet(packet)
    }
}
