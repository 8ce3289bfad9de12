//! # Domain Entities
//!
//! Coins, transfer attributes and the packets handed between router stages.

use crate::errors::OrbiterError;
use crate::identifiers::{CrossChainId, ProtocolId};
use crate::payload::{Action, Forwarding, Payload};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch (block time).
pub type Timestamp = u64;

/// Ledger account address. Opaque to the router.
pub type AccountId = String;

/// 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Identifier of a pending payload.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PayloadHash(pub Hash);

impl PayloadHash {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the hex form.
    pub fn from_hex(s: &str) -> Result<Self, OrbiterError> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| OrbiterError::validation(format!("invalid payload hash: {}", e)))?;
        let hash: Hash = bytes
            .try_into()
            .map_err(|_| OrbiterError::validation("payload hash must be 32 bytes"))?;
        Ok(Self(hash))
    }
}

impl fmt::Display for PayloadHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PayloadHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PayloadHash({})", self.to_hex())
    }
}

/// Amount of one denom.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination.
    pub denom: String,
    /// Amount in base units.
    pub amount: U256,
}

impl Coin {
    /// New coin.
    pub fn new(denom: impl Into<String>, amount: impl Into<U256>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Denom must be set.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        if self.denom.is_empty() {
            return Err(OrbiterError::validation("coin denom is empty"));
        }
        Ok(())
    }

    /// True when the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Canonical description of an inbound transfer.
///
/// Destination denom and amount start equal to the source and are mutated by
/// pre-actions (a fee lowers the amount, a swap changes the denom).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAttributes {
    source_protocol_id: ProtocolId,
    source_counterparty_id: String,
    source_denom: String,
    source_amount: U256,
    destination_denom: String,
    destination_amount: U256,
}

impl TransferAttributes {
    /// Build attributes for a transfer that arrived from `source` with `coin`.
    pub fn new(source: &CrossChainId, coin: &Coin) -> Result<Self, OrbiterError> {
        source.validate()?;
        coin.validate()?;
        Ok(Self {
            source_protocol_id: source.protocol_id(),
            source_counterparty_id: source.counterparty_id().to_string(),
            source_denom: coin.denom.clone(),
            source_amount: coin.amount,
            destination_denom: coin.denom.clone(),
            destination_amount: coin.amount,
        })
    }

    /// Source protocol.
    pub fn source_protocol_id(&self) -> ProtocolId {
        self.source_protocol_id
    }

    /// Source counterparty.
    pub fn source_counterparty_id(&self) -> &str {
        &self.source_counterparty_id
    }

    /// Source endpoint.
    pub fn source_cross_chain_id(&self) -> Result<CrossChainId, OrbiterError> {
        CrossChainId::new(self.source_protocol_id, self.source_counterparty_id.clone())
    }

    /// Inbound denom.
    pub fn source_denom(&self) -> &str {
        &self.source_denom
    }

    /// Inbound amount.
    pub fn source_amount(&self) -> U256 {
        self.source_amount
    }

    /// Denom that will be forwarded.
    pub fn destination_denom(&self) -> &str {
        &self.destination_denom
    }

    /// Amount that will be forwarded.
    pub fn destination_amount(&self) -> U256 {
        self.destination_amount
    }

    /// Destination coin.
    pub fn destination_coin(&self) -> Coin {
        Coin::new(self.destination_denom.clone(), self.destination_amount)
    }

    /// Replace the destination denom.
    pub fn set_destination_denom(&mut self, denom: impl Into<String>) -> Result<(), OrbiterError> {
        let denom = denom.into();
        if denom.is_empty() {
            return Err(OrbiterError::validation("destination denom is empty"));
        }
        self.destination_denom = denom;
        Ok(())
    }

    /// Replace the destination amount.
    pub fn set_destination_amount(&mut self, amount: U256) {
        self.destination_amount = amount;
    }

    /// Structural check.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.source_protocol_id.validate()?;
        if self.source_counterparty_id.is_empty() {
            return Err(OrbiterError::validation("source counterparty id is empty"));
        }
        if self.source_denom.is_empty() {
            return Err(OrbiterError::validation("source denom is empty"));
        }
        if self.destination_denom.is_empty() {
            return Err(OrbiterError::validation("destination denom is empty"));
        }
        Ok(())
    }
}

/// Canonical unit produced by the adapter and consumed by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbiterPacket {
    /// Transfer being routed.
    pub transfer_attributes: TransferAttributes,
    /// What to do with it.
    pub payload: Payload,
}

impl OrbiterPacket {
    /// Validate both halves.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.transfer_attributes.validate()?;
        self.payload.validate()
    }
}

/// Packet handed to an action controller. The controller may mutate the
/// transfer attributes in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPacket {
    /// Transfer being routed.
    pub transfer_attributes: TransferAttributes,
    /// Action to execute.
    pub action: Action,
}

impl ActionPacket {
    /// New action packet.
    pub fn new(transfer_attributes: TransferAttributes, action: Action) -> Self {
        Self {
            transfer_attributes,
            action,
        }
    }

    /// Structural check.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.transfer_attributes.validate()?;
        self.action.validate()
    }
}

/// Packet handed to a forwarding controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardingPacket {
    /// Transfer being routed.
    pub transfer_attributes: TransferAttributes,
    /// Outbound leg.
    pub forwarding: Forwarding,
}

impl ForwardingPacket {
    /// New forwarding packet.
    pub fn new(transfer_attributes: TransferAttributes, forwarding: Forwarding) -> Self {
        Self {
            transfer_attributes,
            forwarding,
        }
    }

    /// Structural check.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.transfer_attributes.validate()?;
        self.forwarding.validate()
    }
}

/// Payload carried by a raw inbound packet: either inline, or a reference to
/// a payload recorded earlier in the pending store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketPayload {
    /// Payload travelled with the transfer.
    Inline(Payload),
    /// Payload was submitted ahead of the transfer.
    Pending(PayloadHash),
}

/// Output of a protocol parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPacket {
    /// Coin that arrived.
    pub coin: Coin,
    /// Routing instructions.
    pub payload: PacketPayload,
}

impl ParsedPacket {
    /// Parsed packet with an inline payload.
    pub fn inline(coin: Coin, payload: Payload) -> Self {
        Self {
            coin,
            payload: PacketPayload::Inline(payload),
        }
    }
}
