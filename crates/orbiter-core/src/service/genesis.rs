//! # Genesis
//!
//! Import and export of the router's configuration state: parameters and the
//! three pause sets. Pending payloads and statistics are not part of it.

use crate::domain::keys::{self, encode};
use crate::domain::params::Params;
use crate::ports::outbound::{BatchOperation, SharedStore};
use crate::service::store;
use serde::{Deserialize, Serialize};
use shared_types::{ActionId, CrossChainId, OrbiterError, ProtocolId};
use std::collections::HashSet;
use tracing::info;

/// Exported router state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Router parameters.
    pub params: Params,
    /// Paused pre-actions.
    pub paused_actions: Vec<ActionId>,
    /// Protocols paused as a whole.
    pub paused_protocols: Vec<ProtocolId>,
    /// Individually paused routes.
    pub paused_counterparties: Vec<CrossChainId>,
}

impl GenesisState {
    /// Valid params, supported identifiers, no duplicates.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.params.validate()?;

        let mut actions = HashSet::new();
        for action in &self.paused_actions {
            action.validate()?;
            if !actions.insert(action) {
                return Err(OrbiterError::validation(format!(
                    "duplicate paused action {}",
                    action
                )));
            }
        }

        let mut protocols = HashSet::new();
        for protocol in &self.paused_protocols {
            protocol.validate()?;
            if !protocols.insert(protocol) {
                return Err(OrbiterError::validation(format!(
                    "duplicate paused protocol {}",
                    protocol
                )));
            }
        }

        let mut routes = HashSet::new();
        for route in &self.paused_counterparties {
            route.validate()?;
            if !routes.insert(route) {
                return Err(OrbiterError::validation(format!(
                    "duplicate paused route {}",
                    route
                )));
            }
        }
        Ok(())
    }
}

/// Write `genesis` into the store in one batch.
pub fn init_genesis(store: &SharedStore, genesis: &GenesisState) -> Result<(), OrbiterError> {
    genesis.validate()?;

    let mut ops = vec![BatchOperation::put(
        keys::PARAMS_KEY.to_vec(),
        encode(&genesis.params)?,
    )];
    for action in &genesis.paused_actions {
        ops.push(BatchOperation::put(keys::paused_action_key(*action)?, Vec::new()));
    }
    for protocol in &genesis.paused_protocols {
        ops.push(BatchOperation::put(keys::paused_protocol_key(*protocol)?, Vec::new()));
    }
    for route in &genesis.paused_counterparties {
        ops.push(BatchOperation::put(
            keys::paused_counterparty_key(route.protocol_id(), route.counterparty_id())?,
            Vec::new(),
        ));
    }
    store.write().atomic_batch_write(ops)?;

    info!(
        "[orbiter:genesis] Initialized with {} paused action(s), {} protocol(s), {} route(s)",
        genesis.paused_actions.len(),
        genesis.paused_protocols.len(),
        genesis.paused_counterparties.len()
    );
    Ok(())
}

/// Read the current state back out.
pub fn export_genesis(store: &SharedStore) -> Result<GenesisState, OrbiterError> {
    Ok(GenesisState {
        params: store::load_params(store)?,
        paused_actions: store::paused_actions(store)?,
        paused_protocols: store::paused_protocols(store)?,
        paused_counterparties: store::paused_counterparties(store, None)?,
    })
}
