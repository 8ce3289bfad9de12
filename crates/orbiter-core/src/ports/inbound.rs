//! # Inbound Ports
//!
//! API traits defining what each dispatch component can do. The service
//! layer implements them; components depend on each other only through
//! these traits.

use crate::domain::pending::PendingPayload;
use shared_types::{
    ActionId, ActionPacket, CrossChainId, ForwardingPacket, OrbiterError, OrbiterPacket, Payload,
    PayloadHash, ProtocolId, Timestamp, TransferAttributes,
};

/// Pre-action execution with a per-action circuit breaker.
pub trait ExecutorApi: Send + Sync {
    /// Pause an action. No-op if already paused.
    fn pause(&self, action: ActionId) -> Result<(), OrbiterError>;

    /// Unpause an action. No-op if not paused.
    fn unpause(&self, action: ActionId) -> Result<(), OrbiterError>;

    /// True if the action is paused.
    fn is_paused(&self, action: ActionId) -> Result<bool, OrbiterError>;

    /// Validate, check the breaker, route and run the action.
    fn handle_packet(&self, packet: &mut ActionPacket) -> Result<(), OrbiterError>;
}

/// Forwarding with per-protocol and per-route circuit breakers.
pub trait ForwarderApi: Send + Sync {
    /// Pause the whole protocol (empty list) or each listed route.
    fn pause(&self, protocol: ProtocolId, counterparties: &[String]) -> Result<(), OrbiterError>;

    /// Unpause the whole protocol (empty list) or each listed route.
    fn unpause(&self, protocol: ProtocolId, counterparties: &[String])
        -> Result<(), OrbiterError>;

    /// True if the whole protocol is paused.
    fn is_protocol_paused(&self, protocol: ProtocolId) -> Result<bool, OrbiterError>;

    /// True if the route is paused.
    fn is_counterparty_paused(
        &self,
        protocol: ProtocolId,
        counterparty: &str,
    ) -> Result<bool, OrbiterError>;

    /// Validate, check breakers and initial condition, route and send.
    fn handle_packet(&self, packet: &ForwardingPacket) -> Result<(), OrbiterError>;
}

/// Sequences pre-actions then forwarding, then records statistics.
pub trait DispatcherApi: Send + Sync {
    /// Run `payload` against `transfer_attributes`, mutating them in place.
    fn dispatch_payload(
        &self,
        transfer_attributes: &mut TransferAttributes,
        payload: &Payload,
    ) -> Result<(), OrbiterError>;
}

/// Inbound entry point for protocol packets.
pub trait AdapterApi: Send + Sync {
    /// Normalize a raw packet received from `source`.
    fn adapt_packet(&self, source: &CrossChainId, raw: &[u8])
        -> Result<OrbiterPacket, OrbiterError>;

    /// Size check and dust clearing before the inbound funds land.
    fn before_transfer_hook(&self, packet: &OrbiterPacket) -> Result<(), OrbiterError>;

    /// Confirm the inbound funds landed in the holding account.
    fn after_transfer_hook(&self, packet: &OrbiterPacket) -> Result<(), OrbiterError>;

    /// Dispatch and notify.
    fn process_payload(&self, packet: &mut OrbiterPacket) -> Result<(), OrbiterError>;
}

/// Deferred payloads.
pub trait PayloadLifecycleApi: Send + Sync {
    /// Record a payload. Returns its identifier.
    fn submit(&self, payload: Payload) -> Result<PayloadHash, OrbiterError>;

    /// Remove and return a payload that is about to execute.
    fn complete(&self, hash: &PayloadHash) -> Result<PendingPayload, OrbiterError>;

    /// Remove a payload without executing it.
    fn remove(&self, hash: &PayloadHash) -> Result<(), OrbiterError>;

    /// Look up a payload.
    fn get(&self, hash: &PayloadHash) -> Result<Option<PendingPayload>, OrbiterError>;

    /// Drop entries submitted strictly before `cutoff`, bounded per call.
    fn sweep_expired(&self, cutoff: Timestamp) -> Result<Vec<PayloadHash>, OrbiterError>;
}
