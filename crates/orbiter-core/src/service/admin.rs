//! # Administrative Surface
//!
//! Every state-changing operation except payload submission is gated on the
//! configured authority, checked before anything is touched.

use crate::domain::events::OrbiterEvent;
use crate::domain::params::Params;
use crate::ports::inbound::{ExecutorApi, ForwarderApi, PayloadLifecycleApi};
use crate::ports::outbound::{AuthorityChecker, EventEmitter, SharedStore};
use crate::service::store;
use shared_types::{ActionId, OrbiterError, Payload, PayloadHash, ProtocolId};
use std::sync::Arc;
use tracing::info;

/// Authority-gated administration.
pub struct AdminService {
    authority: Arc<dyn AuthorityChecker>,
    executor: Arc<dyn ExecutorApi>,
    forwarder: Arc<dyn ForwarderApi>,
    lifecycle: Arc<dyn PayloadLifecycleApi>,
    store: SharedStore,
    events: Arc<dyn EventEmitter>,
}

impl AdminService {
    pub fn new(
        authority: Arc<dyn AuthorityChecker>,
        executor: Arc<dyn ExecutorApi>,
        forwarder: Arc<dyn ForwarderApi>,
        lifecycle: Arc<dyn PayloadLifecycleApi>,
        store: SharedStore,
        events: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            authority,
            executor,
            forwarder,
            lifecycle,
            store,
            events,
        }
    }

    pub fn pause_action(&self, signer: &str, action: ActionId) -> Result<(), OrbiterError> {
        self.authority.require_authority(signer)?;
        self.executor.pause(action)
    }

    pub fn unpause_action(&self, signer: &str, action: ActionId) -> Result<(), OrbiterError> {
        self.authority.require_authority(signer)?;
        self.executor.unpause(action)
    }

    /// Pause a whole protocol, or only the listed counterparties.
    pub fn pause_protocol(
        &self,
        signer: &str,
        protocol: ProtocolId,
        counterparties: &[String],
    ) -> Result<(), OrbiterError> {
        self.authority.require_authority(signer)?;
        self.forwarder.pause(protocol, counterparties)
    }

    /// Unpause a whole protocol, or only the listed counterparties.
    pub fn unpause_protocol(
        &self,
        signer: &str,
        protocol: ProtocolId,
        counterparties: &[String],
    ) -> Result<(), OrbiterError> {
        self.authority.require_authority(signer)?;
        self.forwarder.unpause(protocol, counterparties)
    }

    /// Replace the parameters.
    pub fn update_params(&self, signer: &str, params: Params) -> Result<(), OrbiterError> {
        self.authority.require_authority(signer)?;
        params.validate()?;
        store::save_params(&self.store, &params)?;
        info!(
            "[orbiter:admin] Params updated, max passthrough payload {} bytes",
            params.max_passthrough_payload_size
        );
        self.events.emit(OrbiterEvent::ParamsUpdated { params });
        Ok(())
    }

    /// Record a payload for later execution. Open to any signer.
    pub fn submit_payload(
        &self,
        signer: &str,
        payload: Payload,
    ) -> Result<PayloadHash, OrbiterError> {
        let hash = self.lifecycle.submit(payload)?;
        info!("[orbiter:admin] {} submitted pending payload {}", signer, hash);
        Ok(hash)
    }

    /// Drop a pending payload without executing it.
    pub fn remove_pending(&self, signer: &str, hash: &PayloadHash) -> Result<(), OrbiterError> {
        self.authority.require_authority(signer)?;
        self.lifecycle.remove(hash)
    }
}
