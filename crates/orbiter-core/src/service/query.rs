//! Read-only views over router state.

use crate::domain::keys;
use crate::domain::params::Params;
use crate::domain::pending::PendingPayload;
use crate::domain::stats::DispatchedAmount;
use crate::ports::outbound::SharedStore;
use crate::service::store;
use shared_types::{ActionId, CrossChainId, OrbiterError, PayloadHash, ProtocolId};

/// Query service.
#[derive(Clone)]
pub struct QueryService {
    store: SharedStore,
}

impl QueryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn params(&self) -> Result<Params, OrbiterError> {
        store::load_params(&self.store)
    }

    pub fn is_action_paused(&self, action: ActionId) -> Result<bool, OrbiterError> {
        store::has_flag(&self.store, &keys::paused_action_key(action)?)
    }

    pub fn paused_actions(&self) -> Result<Vec<ActionId>, OrbiterError> {
        store::paused_actions(&self.store)
    }

    pub fn is_protocol_paused(&self, protocol: ProtocolId) -> Result<bool, OrbiterError> {
        store::has_flag(&self.store, &keys::paused_protocol_key(protocol)?)
    }

    pub fn paused_protocols(&self) -> Result<Vec<ProtocolId>, OrbiterError> {
        store::paused_protocols(&self.store)
    }

    pub fn is_counterparty_paused(
        &self,
        protocol: ProtocolId,
        counterparty: &str,
    ) -> Result<bool, OrbiterError> {
        store::has_flag(
            &self.store,
            &keys::paused_counterparty_key(protocol, counterparty)?,
        )
    }

    /// Paused routes of `protocol`.
    pub fn paused_counterparties(
        &self,
        protocol: ProtocolId,
    ) -> Result<Vec<CrossChainId>, OrbiterError> {
        store::paused_counterparties(&self.store, Some(protocol))
    }

    pub fn dispatched_amount(
        &self,
        source: &CrossChainId,
        destination: &CrossChainId,
        denom: &str,
    ) -> Result<DispatchedAmount, OrbiterError> {
        store::dispatched_amount(&self.store, source, destination, denom)
    }

    /// Per-denom totals over a route.
    pub fn dispatched_amounts(
        &self,
        source: &CrossChainId,
        destination: &CrossChainId,
    ) -> Result<Vec<(String, DispatchedAmount)>, OrbiterError> {
        store::dispatched_amounts(&self.store, source, destination)
    }

    pub fn dispatched_count(
        &self,
        source: &CrossChainId,
        destination: &CrossChainId,
    ) -> Result<u64, OrbiterError> {
        store::dispatched_count(&self.store, source, destination)
    }

    pub fn pending_payload(
        &self,
        hash: &PayloadHash,
    ) -> Result<Option<PendingPayload>, OrbiterError> {
        store::pending_payload(&self.store, hash)
    }

    pub fn pending_payload_count(&self) -> Result<usize, OrbiterError> {
        store::pending_payload_count(&self.store)
    }
}
