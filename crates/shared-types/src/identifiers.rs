//! # Identifiers
//!
//! Protocol and action identifiers, and the cross-chain endpoint id built
//! from them.

use crate::errors::OrbiterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bridging protocol identifier.
///
/// `Unsupported` (0) is reserved and never a valid route target.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum ProtocolId {
    /// Reserved.
    #[default]
    Unsupported = 0,
    /// IBC transfer.
    Ibc = 1,
    /// Circle CCTP.
    Cctp = 2,
    /// Hyperlane warp route.
    Hyperlane = 3,
}

impl ProtocolId {
    /// All routable protocols.
    pub const SUPPORTED: [ProtocolId; 3] = [ProtocolId::Ibc, ProtocolId::Cctp, ProtocolId::Hyperlane];

    /// Numeric value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Fails for the reserved value.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        match self {
            ProtocolId::Unsupported => Err(OrbiterError::validation("protocol id is unsupported")),
            _ => Ok(()),
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ProtocolId::Unsupported => "unsupported",
            ProtocolId::Ibc => "ibc",
            ProtocolId::Cctp => "cctp",
            ProtocolId::Hyperlane => "hyperlane",
        }
    }
}

impl TryFrom<u32> for ProtocolId {
    type Error = OrbiterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProtocolId::Unsupported),
            1 => Ok(ProtocolId::Ibc),
            2 => Ok(ProtocolId::Cctp),
            3 => Ok(ProtocolId::Hyperlane),
            other => Err(OrbiterError::validation(format!("unknown protocol id {}", other))),
        }
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Pre-action identifier.
///
/// `Unsupported` (0) is reserved.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum ActionId {
    /// Reserved.
    #[default]
    Unsupported = 0,
    /// Fee deduction.
    Fee = 1,
    /// Denom swap.
    Swap = 2,
}

impl ActionId {
    /// All routable actions.
    pub const SUPPORTED: [ActionId; 2] = [ActionId::Fee, ActionId::Swap];

    /// Numeric value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Fails for the reserved value.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        match self {
            ActionId::Unsupported => Err(OrbiterError::validation("action id is unsupported")),
            _ => Ok(()),
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ActionId::Unsupported => "unsupported",
            ActionId::Fee => "fee",
            ActionId::Swap => "swap",
        }
    }
}

impl TryFrom<u32> for ActionId {
    type Error = OrbiterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActionId::Unsupported),
            1 => Ok(ActionId::Fee),
            2 => Ok(ActionId::Swap),
            other => Err(OrbiterError::validation(format!("unknown action id {}", other))),
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// One endpoint of a route: a protocol plus a counterparty identifier that is
/// only meaningful to that protocol (channel id, destination domain, ...).
///
/// String form is `"<protocol>:<counterparty>"`. Parsing splits on the first
/// colon only, so the counterparty may itself contain colons. Decoding runs
/// the same validation as [`CrossChainId::new`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCrossChainId")]
pub struct CrossChainId {
    protocol_id: ProtocolId,
    counterparty_id: String,
}

/// Unchecked wire form of [`CrossChainId`].
#[derive(Deserialize)]
struct RawCrossChainId {
    protocol_id: ProtocolId,
    counterparty_id: String,
}

impl TryFrom<RawCrossChainId> for CrossChainId {
    type Error = OrbiterError;

    fn try_from(raw: RawCrossChainId) -> Result<Self, Self::Error> {
        CrossChainId::new(raw.protocol_id, raw.counterparty_id)
    }
}

impl CrossChainId {
    /// Build a validated id.
    pub fn new(
        protocol_id: ProtocolId,
        counterparty_id: impl Into<String>,
    ) -> Result<Self, OrbiterError> {
        let id = Self {
            protocol_id,
            counterparty_id: counterparty_id.into(),
        };
        id.validate()?;
        Ok(id)
    }

    /// Protocol of this endpoint.
    pub fn protocol_id(&self) -> ProtocolId {
        self.protocol_id
    }

    /// Protocol-specific counterparty.
    pub fn counterparty_id(&self) -> &str {
        &self.counterparty_id
    }

    /// Protocol must be supported and the counterparty non-empty.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        self.protocol_id.validate()?;
        if self.counterparty_id.is_empty() {
            return Err(OrbiterError::validation("counterparty id is empty"));
        }
        Ok(())
    }
}

impl fmt::Display for CrossChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.protocol_id, self.counterparty_id)
    }
}

impl FromStr for CrossChainId {
    type Err = OrbiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, counterparty) = s.split_once(':').ok_or_else(|| {
            OrbiterError::validation(format!("invalid cross-chain id {:?}: missing ':'", s))
        })?;
        let raw: u32 = protocol.parse().map_err(|_| {
            OrbiterError::validation(format!("invalid protocol id {:?}", protocol))
        })?;
        CrossChainId::new(ProtocolId::try_from(raw)?, counterparty)
    }
}
