//! # Traffic Statistics
//!
//! Cumulative amounts per route and denom, and dispatch counts per route.
//! Both only ever grow.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{OrbiterError, TransferAttributes};

/// Amount of one denom that entered and left over one route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchedAmount {
    /// Received from the source.
    pub incoming: U256,
    /// Sent to the destination.
    pub outgoing: U256,
}

impl DispatchedAmount {
    /// New amount pair.
    pub fn new(incoming: U256, outgoing: U256) -> Self {
        Self { incoming, outgoing }
    }

    /// Add `delta` component-wise.
    pub fn checked_add(&self, delta: &DispatchedAmount) -> Result<Self, OrbiterError> {
        let incoming = self
            .incoming
            .checked_add(delta.incoming)
            .ok_or_else(|| OrbiterError::Overflow("dispatched incoming amount".into()))?;
        let outgoing = self
            .outgoing
            .checked_add(delta.outgoing)
            .ok_or_else(|| OrbiterError::Overflow("dispatched outgoing amount".into()))?;
        Ok(Self { incoming, outgoing })
    }
}

/// Per-denom increments produced by one dispatch.
///
/// Same denom in and out yields one entry carrying both amounts. Otherwise
/// the source denom gets the incoming amount and the destination denom the
/// outgoing amount.
pub fn amount_deltas(attr: &TransferAttributes) -> Vec<(String, DispatchedAmount)> {
    if attr.source_denom() == attr.destination_denom() {
        vec![(
            attr.source_denom().to_string(),
            DispatchedAmount::new(attr.source_amount(), attr.destination_amount()),
        )]
    } else {
        vec![
            (
                attr.source_denom().to_string(),
                DispatchedAmount::new(attr.source_amount(), U256::zero()),
            ),
            (
                attr.destination_denom().to_string(),
                DispatchedAmount::new(U256::zero(), attr.destination_amount()),
            ),
        ]
    }
}

/// Increment a dispatch counter.
pub fn increment_count(count: u64) -> Result<u64, OrbiterError> {
    count
        .checked_add(1)
        .ok_or_else(|| OrbiterError::Overflow("dispatched count".into()))
}
