//! # Adapter
//!
//! Entry point for inbound protocol packets. Parses the raw packet with the
//! protocol's parser, prepares the holding account, and hands the canonical
//! packet to the dispatcher.
//!
//! ## Inbound Flow
//!
//! ```text
//! raw ──parse──→ OrbiterPacket ──before hook──→ funds land ──after hook──→ dispatch
//!                    ↑                                                       │
//!          pending payload looked up                    pending payload completed
//! ```
//!
//! A pending payload stays in the store until the packet carrying its hash
//! has been fully handled, so a rejected packet can be retried.

use crate::config::AccountsConfig;
use crate::domain::events::OrbiterEvent;
use crate::domain::invariants::invariant_passthrough_size;
use crate::domain::router::{Controller, Router};
use crate::ports::inbound::{AdapterApi, DispatcherApi, PayloadLifecycleApi};
use crate::ports::outbound::{BankKeeper, EventEmitter, PacketParser, SharedStore};
use crate::service::store;
use shared_types::{
    Coin, CrossChainId, OrbiterError, OrbiterPacket, PacketPayload, PayloadHash, ProtocolId,
    TransferAttributes,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Inbound packet adapter.
pub struct Adapter {
    router: Router<ProtocolId, dyn PacketParser>,
    dispatcher: Arc<dyn DispatcherApi>,
    lifecycle: Arc<dyn PayloadLifecycleApi>,
    bank: Arc<dyn BankKeeper>,
    store: SharedStore,
    events: Arc<dyn EventEmitter>,
    accounts: AccountsConfig,
}

impl Adapter {
    pub fn new(
        dispatcher: Arc<dyn DispatcherApi>,
        lifecycle: Arc<dyn PayloadLifecycleApi>,
        bank: Arc<dyn BankKeeper>,
        store: SharedStore,
        events: Arc<dyn EventEmitter>,
        accounts: AccountsConfig,
    ) -> Self {
        Self {
            router: Router::new(),
            dispatcher,
            lifecycle,
            bank,
            store,
            events,
            accounts,
        }
    }

    /// Register a parser under the protocol it reports.
    pub fn add_parser(&mut self, parser: Arc<dyn PacketParser>) -> Result<(), OrbiterError> {
        self.router.add_route(parser)
    }

    /// Freeze the set of accepted protocols.
    pub fn seal(&mut self) {
        self.router.seal();
    }

    pub fn router(&self) -> &Router<ProtocolId, dyn PacketParser> {
        &self.router
    }

    pub fn accounts(&self) -> &AccountsConfig {
        &self.accounts
    }

    /// Full inbound path for one packet.
    ///
    /// `receive` moves the inbound funds into the holding account; it runs
    /// between the two transfer hooks.
    pub fn handle_packet<F>(
        &self,
        source: &CrossChainId,
        raw: &[u8],
        receive: F,
    ) -> Result<OrbiterPacket, OrbiterError>
    where
        F: FnOnce(&OrbiterPacket) -> Result<(), OrbiterError>,
    {
        let (mut packet, pending) = self.resolve_packet(source, raw)?;
        self.before_transfer_hook(&packet)?;
        receive(&packet)?;
        self.after_transfer_hook(&packet)?;
        self.process_payload(&mut packet)?;
        if let Some(hash) = pending {
            self.lifecycle.complete(&hash)?;
        }
        Ok(packet)
    }

    /// Parse and validate an inbound packet without consuming any pending
    /// payload it references. Returns the hash of that payload, if any.
    fn resolve_packet(
        &self,
        source: &CrossChainId,
        raw: &[u8],
    ) -> Result<(OrbiterPacket, Option<PayloadHash>), OrbiterError> {
        source.validate()?;
        let parser = self.router.require_route(source.protocol_id())?;
        let parsed = parser.parse_packet(raw)?;

        let (payload, pending) = match parsed.payload {
            PacketPayload::Inline(payload) => (payload, None),
            PacketPayload::Pending(hash) => {
                debug!("[orbiter:adapter] Resolving pending payload {}", hash);
                let entry = self
                    .lifecycle
                    .get(&hash)?
                    .ok_or_else(|| OrbiterError::not_found(format!("pending payload {}", hash)))?;
                (entry.payload, Some(hash))
            }
        };

        let packet = OrbiterPacket {
            transfer_attributes: TransferAttributes::new(source, &parsed.coin)?,
            payload,
        };
        packet.validate()?;
        debug!(
            "[orbiter:adapter] Adapted {} packet from {} carrying {}",
            parser.name(),
            source,
            parsed.coin
        );
        Ok((packet, pending))
    }
}

impl AdapterApi for Adapter {
    fn adapt_packet(
        &self,
        source: &CrossChainId,
        raw: &[u8],
    ) -> Result<OrbiterPacket, OrbiterError> {
        let (packet, pending) = self.resolve_packet(source, raw)?;
        if let Some(hash) = pending {
            self.lifecycle.complete(&hash)?;
        }
        Ok(packet)
    }

    fn before_transfer_hook(&self, packet: &OrbiterPacket) -> Result<(), OrbiterError> {
        let params = store::load_params(&self.store)?;
        invariant_passthrough_size(
            packet.payload.forwarding.passthrough_payload().len(),
            params.max_passthrough_payload_size,
        )?;

        let denom = packet.transfer_attributes.destination_denom();
        let leftover = self.bank.get_balance(&self.accounts.holding, denom)?;
        if !leftover.is_zero() {
            let coin = Coin::new(denom, leftover);
            self.bank.send_coins(
                &self.accounts.holding,
                &self.accounts.dust,
                std::slice::from_ref(&coin),
            )?;
            info!(
                "[orbiter:adapter] Cleared {} from holding account to {}",
                coin, self.accounts.dust
            );
            self.events.emit(OrbiterEvent::DustCleared { coin });
        }
        Ok(())
    }

    fn after_transfer_hook(&self, packet: &OrbiterPacket) -> Result<(), OrbiterError> {
        let attr = &packet.transfer_attributes;
        let held = self
            .bank
            .get_balance(&self.accounts.holding, attr.source_denom())?;
        if held < attr.source_amount() {
            return Err(OrbiterError::InsufficientFunds {
                account: self.accounts.holding.clone(),
                required: Coin::new(attr.source_denom(), attr.source_amount()).to_string(),
                available: Coin::new(attr.source_denom(), held).to_string(),
            });
        }
        Ok(())
    }

    fn process_payload(&self, packet: &mut OrbiterPacket) -> Result<(), OrbiterError> {
        let incoming = Coin::new(
            packet.transfer_attributes.source_denom(),
            packet.transfer_attributes.source_amount(),
        );
        self.dispatcher
            .dispatch_payload(&mut packet.transfer_attributes, &packet.payload)?;

        let source = packet.transfer_attributes.source_cross_chain_id()?;
        let destination = packet.payload.forwarding.destination()?;
        let outgoing = packet.transfer_attributes.destination_coin();
        info!(
            "[orbiter:adapter] Processed {} from {} as {} to {}",
            incoming, source, outgoing, destination
        );
        self.events.emit(OrbiterEvent::PayloadProcessed {
            source,
            destination,
            incoming,
            outgoing,
        });
        Ok(())
    }
}
