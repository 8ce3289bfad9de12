//! # Executor
//!
//! Runs pre-actions through the action router, guarded by a per-action
//! circuit breaker.

use crate::domain::events::OrbiterEvent;
use crate::domain::keys;
use crate::domain::router::{Controller, Router};
use crate::ports::inbound::ExecutorApi;
use crate::ports::outbound::{ActionController, EventEmitter, SharedStore};
use crate::service::store;
use shared_types::{ActionId, ActionPacket, OrbiterError};
use std::sync::Arc;
use tracing::{debug, info};

/// Pre-action executor.
pub struct Executor {
    router: Router<ActionId, dyn ActionController>,
    store: SharedStore,
    events: Arc<dyn EventEmitter>,
}

impl Executor {
    /// Executor with an empty, unsealed router.
    pub fn new(store: SharedStore, events: Arc<dyn EventEmitter>) -> Self {
        Self {
            router: Router::new(),
            store,
            events,
        }
    }

    /// Register a controller under the action it reports.
    pub fn add_controller(
        &mut self,
        controller: Arc<dyn ActionController>,
    ) -> Result<(), OrbiterError> {
        self.router.add_route(controller)
    }

    /// Freeze the set of routed actions.
    pub fn seal(&mut self) {
        self.router.seal();
    }

    pub fn router(&self) -> &Router<ActionId, dyn ActionController> {
        &self.router
    }

    /// Currently paused actions.
    pub fn paused_actions(&self) -> Result<Vec<ActionId>, OrbiterError> {
        store::paused_actions(&self.store)
    }

    fn set_paused(&self, action: ActionId, paused: bool) -> Result<bool, OrbiterError> {
        action.validate()?;
        let key = keys::paused_action_key(action)?;
        store::set_flag(&self.store, &key, paused)
    }
}

impl ExecutorApi for Executor {
    fn pause(&self, action: ActionId) -> Result<(), OrbiterError> {
        if self.set_paused(action, true)? {
            info!("[orbiter:executor] Action {} paused", action.name());
            self.events.emit(OrbiterEvent::ActionPaused { action });
        }
        Ok(())
    }

    fn unpause(&self, action: ActionId) -> Result<(), OrbiterError> {
        if self.set_paused(action, false)? {
            info!("[orbiter:executor] Action {} unpaused", action.name());
            self.events.emit(OrbiterEvent::ActionUnpaused { action });
        }
        Ok(())
    }

    fn is_paused(&self, action: ActionId) -> Result<bool, OrbiterError> {
        store::has_flag(&self.store, &keys::paused_action_key(action)?)
    }

    fn handle_packet(&self, packet: &mut ActionPacket) -> Result<(), OrbiterError> {
        packet.validate()?;
        let action = packet.action.id();
        if self.is_paused(action)? {
            return Err(OrbiterError::Paused(format!(
                "action {} is paused",
                action.name()
            )));
        }
        let controller = self.router.require_route(action)?;
        debug!(
            "[orbiter:executor] Running {} via {}",
            action.name(),
            controller.name()
        );
        controller.handle_packet(packet)
    }
}
