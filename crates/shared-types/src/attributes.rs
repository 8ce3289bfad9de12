//! # Attribute Variants
//!
//! Per-action and per-protocol attributes carried by a payload. The set of
//! variants is closed; each variant belongs to exactly one identifier.

use crate::errors::OrbiterError;
use crate::identifiers::{ActionId, ProtocolId};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Basis points denominator (100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// One fee recipient and its share of the transferred amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeInfo {
    /// Account receiving the fee.
    pub recipient: String,
    /// Share in basis points.
    pub basis_points: u32,
}

/// Attributes of the fee pre-action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAttributes {
    /// Recipients, charged in order.
    pub fees: Vec<FeeInfo>,
}

impl FeeAttributes {
    /// Sum of all basis points.
    pub fn total_basis_points(&self) -> u64 {
        self.fees.iter().map(|f| u64::from(f.basis_points)).sum()
    }

    /// Non-empty, every share in `1..=10_000`, total at most 100%.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        if self.fees.is_empty() {
            return Err(OrbiterError::validation("fee attributes carry no fees"));
        }
        for fee in &self.fees {
            if fee.recipient.is_empty() {
                return Err(OrbiterError::validation("fee recipient is empty"));
            }
            if fee.basis_points == 0 || fee.basis_points > BPS_DENOMINATOR {
                return Err(OrbiterError::validation(format!(
                    "fee basis points {} out of range 1..={}",
                    fee.basis_points, BPS_DENOMINATOR
                )));
            }
        }
        if self.total_basis_points() > u64::from(BPS_DENOMINATOR) {
            return Err(OrbiterError::validation(format!(
                "total fee basis points {} exceed {}",
                self.total_basis_points(),
                BPS_DENOMINATOR
            )));
        }
        Ok(())
    }
}

/// Attributes of the swap pre-action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAttributes {
    /// Denom the destination amount is swapped into.
    pub output_denom: String,
    /// Slippage floor.
    pub min_output_amount: U256,
    /// Optional account receiving the output instead of continuing the route.
    pub recipient: Option<String>,
}

impl SwapAttributes {
    /// Output denom set and minimum non-zero.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        if self.output_denom.is_empty() {
            return Err(OrbiterError::validation("swap output denom is empty"));
        }
        if self.min_output_amount.is_zero() {
            return Err(OrbiterError::validation("swap minimum output is zero"));
        }
        Ok(())
    }
}

/// Attributes of a pre-action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionAttributes {
    /// Fee deduction.
    Fee(FeeAttributes),
    /// Denom swap.
    Swap(SwapAttributes),
}

impl ActionAttributes {
    /// Action this variant belongs to.
    pub fn action_id(&self) -> ActionId {
        match self {
            ActionAttributes::Fee(_) => ActionId::Fee,
            ActionAttributes::Swap(_) => ActionId::Swap,
        }
    }

    /// Validate the inner variant.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        match self {
            ActionAttributes::Fee(attr) => attr.validate(),
            ActionAttributes::Swap(attr) => attr.validate(),
        }
    }
}

/// IBC forwarding attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcAttributes {
    /// Source channel on this chain.
    pub channel_id: String,
    /// Receiver on the counterparty chain.
    pub recipient: String,
    /// Absolute timeout in nanoseconds, 0 for none.
    pub timeout_timestamp: u64,
}

/// CCTP forwarding attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CctpAttributes {
    /// Circle destination domain.
    pub destination_domain: u32,
    /// 32-byte mint recipient.
    pub mint_recipient: Vec<u8>,
    /// 32-byte destination caller, empty for any caller.
    pub destination_caller: Vec<u8>,
}

/// Hyperlane forwarding attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperlaneAttributes {
    /// Warp route token id.
    pub token_id: Vec<u8>,
    /// Hyperlane destination domain.
    pub destination_domain: u32,
    /// 32-byte recipient.
    pub recipient: Vec<u8>,
    /// Optional post-dispatch hook.
    pub custom_hook_id: Option<Vec<u8>>,
    /// Gas limit for the destination handler.
    pub gas_limit: U256,
    /// Maximum interchain gas fee.
    pub max_fee: U256,
}

/// Attributes of the forwarding leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardingAttributes {
    /// IBC transfer.
    Ibc(IbcAttributes),
    /// CCTP burn.
    Cctp(CctpAttributes),
    /// Hyperlane warp transfer.
    Hyperlane(HyperlaneAttributes),
}

fn validate_bytes32(field: &str, bytes: &[u8]) -> Result<(), OrbiterError> {
    if bytes.len() != 32 {
        return Err(OrbiterError::validation(format!(
            "{} must be 32 bytes, got {}",
            field,
            bytes.len()
        )));
    }
    if bytes.iter().all(|b| *b == 0) {
        return Err(OrbiterError::validation(format!("{} is zero", field)));
    }
    Ok(())
}

impl ForwardingAttributes {
    /// Protocol this variant belongs to.
    pub fn protocol_id(&self) -> ProtocolId {
        match self {
            ForwardingAttributes::Ibc(_) => ProtocolId::Ibc,
            ForwardingAttributes::Cctp(_) => ProtocolId::Cctp,
            ForwardingAttributes::Hyperlane(_) => ProtocolId::Hyperlane,
        }
    }

    /// Counterparty the forwarding targets, in the protocol's own terms.
    pub fn counterparty_id(&self) -> String {
        match self {
            ForwardingAttributes::Ibc(attr) => attr.channel_id.clone(),
            ForwardingAttributes::Cctp(attr) => attr.destination_domain.to_string(),
            ForwardingAttributes::Hyperlane(attr) => attr.destination_domain.to_string(),
        }
    }

    /// Validate the inner variant.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        match self {
            ForwardingAttributes::Ibc(attr) => {
                if attr.channel_id.is_empty() {
                    return Err(OrbiterError::validation("ibc channel id is empty"));
                }
                if attr.recipient.is_empty() {
                    return Err(OrbiterError::validation("ibc recipient is empty"));
                }
                Ok(())
            }
            ForwardingAttributes::Cctp(attr) => {
                validate_bytes32("cctp mint recipient", &attr.mint_recipient)?;
                if !attr.destination_caller.is_empty() && attr.destination_caller.len() != 32 {
                    return Err(OrbiterError::validation(
                        "cctp destination caller must be empty or 32 bytes",
                    ));
                }
                Ok(())
            }
            ForwardingAttributes::Hyperlane(attr) => {
                if attr.token_id.is_empty() {
                    return Err(OrbiterError::validation("hyperlane token id is empty"));
                }
                validate_bytes32("hyperlane recipient", &attr.recipient)
            }
        }
    }
}
