//! # Events
//!
//! Notifications emitted by the router. Pause events fire only on an actual
//! state change.

use crate::domain::params::Params;
use serde::{Deserialize, Serialize};
use shared_types::{ActionId, Coin, CrossChainId, PayloadHash, ProtocolId};

/// Router event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbiterEvent {
    /// A packet went through pre-actions and forwarding.
    PayloadProcessed {
        /// Where the transfer came from.
        source: CrossChainId,
        /// Where it was forwarded.
        destination: CrossChainId,
        /// Coin received.
        incoming: Coin,
        /// Coin forwarded.
        outgoing: Coin,
    },
    /// Residual balance moved out of the holding account.
    DustCleared {
        /// Coin moved to the dust account.
        coin: Coin,
    },
    /// Fee pre-action charged a recipient.
    FeeCharged {
        /// Fee recipient.
        recipient: String,
        /// Coin charged.
        coin: Coin,
    },
    /// Action paused.
    ActionPaused {
        /// Action.
        action: ActionId,
    },
    /// Action unpaused.
    ActionUnpaused {
        /// Action.
        action: ActionId,
    },
    /// Whole protocol paused.
    ProtocolPaused {
        /// Protocol.
        protocol: ProtocolId,
    },
    /// Whole protocol unpaused.
    ProtocolUnpaused {
        /// Protocol.
        protocol: ProtocolId,
    },
    /// One route paused.
    CounterpartyPaused {
        /// Protocol.
        protocol: ProtocolId,
        /// Counterparty.
        counterparty: String,
    },
    /// One route unpaused.
    CounterpartyUnpaused {
        /// Protocol.
        protocol: ProtocolId,
        /// Counterparty.
        counterparty: String,
    },
    /// Payload recorded for deferred execution.
    PendingPayloadSubmitted {
        /// Identifier.
        hash: PayloadHash,
        /// Submission counter value.
        sequence: u64,
    },
    /// Pending payload completed or removed.
    PendingPayloadRemoved {
        /// Identifier.
        hash: PayloadHash,
    },
    /// Pending payload dropped by the expiry sweep.
    PendingPayloadExpired {
        /// Identifier.
        hash: PayloadHash,
    },
    /// Parameters replaced.
    ParamsUpdated {
        /// New parameters.
        params: Params,
    },
}

impl OrbiterEvent {
    /// Short event name.
    pub fn name(&self) -> &'static str {
        match self {
            OrbiterEvent::PayloadProcessed { .. } => "payload_processed",
            OrbiterEvent::DustCleared { .. } => "dust_cleared",
            OrbiterEvent::FeeCharged { .. } => "fee_charged",
            OrbiterEvent::ActionPaused { .. } => "action_paused",
            OrbiterEvent::ActionUnpaused { .. } => "action_unpaused",
            OrbiterEvent::ProtocolPaused { .. } => "protocol_paused",
            OrbiterEvent::ProtocolUnpaused { .. } => "protocol_unpaused",
            OrbiterEvent::CounterpartyPaused { .. } => "counterparty_paused",
            OrbiterEvent::CounterpartyUnpaused { .. } => "counterparty_unpaused",
            OrbiterEvent::PendingPayloadSubmitted { .. } => "pending_payload_submitted",
            OrbiterEvent::PendingPayloadRemoved { .. } => "pending_payload_removed",
            OrbiterEvent::PendingPayloadExpired { .. } => "pending_payload_expired",
            OrbiterEvent::ParamsUpdated { .. } => "params_updated",
        }
    }
}
