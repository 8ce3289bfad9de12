//! # Fee Pre-Action
//!
//! Charges each recipient a share of the destination amount, in basis
//! points, and lowers the destination amount by the total charged.
//!
//! `fee = destination_amount * basis_points / 10_000`, rounded down. Every
//! share is computed against the amount before any fee was taken.

use crate::domain::events::OrbiterEvent;
use crate::domain::router::Controller;
use crate::ports::outbound::{ActionController, BankKeeper, EventEmitter};
use primitive_types::U256;
use shared_types::{
    ActionAttributes, ActionId, ActionPacket, Coin, FeeAttributes, OrbiterError, BPS_DENOMINATOR,
};
use std::sync::Arc;
use tracing::debug;

/// Fee controller routed under [`ActionId::Fee`].
pub struct FeeController {
    bank: Arc<dyn BankKeeper>,
    holding_account: String,
    events: Arc<dyn EventEmitter>,
}

impl FeeController {
    pub fn new(
        bank: Arc<dyn BankKeeper>,
        holding_account: impl Into<String>,
        events: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            bank,
            holding_account: holding_account.into(),
            events,
        }
    }
}

/// Per-recipient fees for `amount`. Zero fees are dropped.
pub fn compute_fees(
    attributes: &FeeAttributes,
    amount: U256,
) -> Result<Vec<(String, U256)>, OrbiterError> {
    let mut fees = Vec::with_capacity(attributes.fees.len());
    for info in &attributes.fees {
        let fee = amount
            .checked_mul(U256::from(info.basis_points))
            .ok_or_else(|| OrbiterError::Overflow("fee amount".into()))?
            / U256::from(BPS_DENOMINATOR);
        if !fee.is_zero() {
            fees.push((info.recipient.clone(), fee));
        }
    }
    Ok(fees)
}

impl Controller<ActionId> for FeeController {
    fn id(&self) -> ActionId {
        ActionId::Fee
    }

    fn name(&self) -> &str {
        "fee"
    }
}

impl ActionController for FeeController {
    fn handle_packet(&self, packet: &mut ActionPacket) -> Result<(), OrbiterError> {
        let attributes = match packet.action.attributes() {
            ActionAttributes::Fee(attributes) => attributes,
            other => {
                return Err(OrbiterError::validation(format!(
                    "fee controller received attributes of action {}",
                    other.action_id()
                )))
            }
        };
        attributes.validate()?;

        let attr = &mut packet.transfer_attributes;
        let denom = attr.destination_denom().to_string();
        let fees = compute_fees(attributes, attr.destination_amount())?;

        let mut total = U256::zero();
        for (recipient, amount) in &fees {
            let coin = Coin::new(denom.clone(), *amount);
            self.bank
                .send_coins(&self.holding_account, recipient, std::slice::from_ref(&coin))?;
            total = total
                .checked_add(*amount)
                .ok_or_else(|| OrbiterError::Overflow("total fee".into()))?;
            debug!("[orbiter:fee] Charged {} to {}", coin, recipient);
            self.events.emit(OrbiterEvent::FeeCharged {
                recipient: recipient.clone(),
                coin,
            });
        }

        let remaining = attr
            .destination_amount()
            .checked_sub(total)
            .ok_or_else(|| OrbiterError::Overflow("fees exceed transfer amount".into()))?;
        attr.set_destination_amount(remaining);
        Ok(())
    }
}
