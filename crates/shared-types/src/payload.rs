//! # Payload
//!
//! What to do with a transfer: ordered pre-actions, then one forwarding.

use crate::attributes::{ActionAttributes, ForwardingAttributes};
use crate::errors::OrbiterError;
use crate::identifiers::{ActionId, CrossChainId, ProtocolId};
use serde::{Deserialize, Serialize};

/// A pre-action applied to the transferred value before forwarding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    id: ActionId,
    attributes: ActionAttributes,
}

impl Action {
    /// Action whose id is taken from the attribute variant.
    pub fn new(attributes: ActionAttributes) -> Self {
        Self {
            id: attributes.action_id(),
            attributes,
        }
    }

    /// Action with an explicit id. `validate()` rejects a mismatch.
    pub fn with_id(id: ActionId, attributes: ActionAttributes) -> Self {
        Self { id, attributes }
    }

    /// Action identifier.
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// Action attributes.
    pub fn attributes(&self) -> &ActionAttributes {
        &self.attributes
    }

    /// Supported id, attributes of the matching variant and valid.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.id.validate()?;
        if self.attributes.action_id() != self.id {
            return Err(OrbiterError::validation(format!(
                "action {} carries attributes of action {}",
                self.id,
                self.attributes.action_id()
            )));
        }
        self.attributes.validate()
    }
}

/// The outbound leg: target protocol, its attributes and opaque bytes handed
/// through to the destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forwarding {
    protocol_id: ProtocolId,
    attributes: ForwardingAttributes,
    passthrough_payload: Vec<u8>,
}

impl Forwarding {
    /// Forwarding whose protocol is taken from the attribute variant.
    pub fn new(attributes: ForwardingAttributes, passthrough_payload: Vec<u8>) -> Self {
        Self {
            protocol_id: attributes.protocol_id(),
            attributes,
            passthrough_payload,
        }
    }

    /// Forwarding with an explicit protocol. `validate()` rejects a mismatch.
    pub fn with_protocol(
        protocol_id: ProtocolId,
        attributes: ForwardingAttributes,
        passthrough_payload: Vec<u8>,
    ) -> Self {
        Self {
            protocol_id,
            attributes,
            passthrough_payload,
        }
    }

    /// Target protocol.
    pub fn protocol_id(&self) -> ProtocolId {
        self.protocol_id
    }

    /// Protocol attributes.
    pub fn attributes(&self) -> &ForwardingAttributes {
        &self.attributes
    }

    /// Bytes passed through to the destination.
    pub fn passthrough_payload(&self) -> &[u8] {
        &self.passthrough_payload
    }

    /// Destination endpoint of this forwarding.
    pub fn destination(&self) -> Result<CrossChainId, OrbiterError> {
        CrossChainId::new(self.protocol_id, self.attributes.counterparty_id())
    }

    /// Supported protocol, attributes of the matching variant and valid.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.protocol_id.validate()?;
        if self.attributes.protocol_id() != self.protocol_id {
            return Err(OrbiterError::validation(format!(
                "forwarding to protocol {} carries attributes of protocol {}",
                self.protocol_id,
                self.attributes.protocol_id()
            )));
        }
        self.attributes.validate()
    }
}

/// Pre-actions plus forwarding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Executed strictly in order.
    pub pre_actions: Vec<Action>,
    /// Outbound leg.
    pub forwarding: Forwarding,
}

impl Payload {
    /// Payload with the given pre-actions.
    pub fn new(pre_actions: Vec<Action>, forwarding: Forwarding) -> Self {
        Self {
            pre_actions,
            forwarding,
        }
    }

    /// Payload that only forwards.
    pub fn forward_only(forwarding: Forwarding) -> Self {
        Self::new(Vec::new(), forwarding)
    }

    /// Validate forwarding and every pre-action.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.forwarding.validate()?;
        for (index, action) in self.pre_actions.iter().enumerate() {
            action.validate().map_err(|e| {
                OrbiterError::validation(format!("pre-action {} invalid: {}", index, e))
            })?;
        }
        Ok(())
    }
}
