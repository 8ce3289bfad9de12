//! # Domain Invariants
//!
//! Checks applied before funds or state move.

use shared_types::{Coin, OrbiterError};

/// Invariant: passthrough payload fits the configured limit.
pub fn invariant_passthrough_size(len: usize, max: u32) -> Result<(), OrbiterError> {
    if len > max as usize {
        return Err(OrbiterError::validation(format!(
            "passthrough payload is {} bytes, max is {}",
            len, max
        )));
    }
    Ok(())
}

/// Invariant: forwarding initial condition.
///
/// The holding account must carry exactly one balance entry, equal to the
/// coin about to be forwarded. Anything else means an earlier stage left the
/// books inconsistent.
pub fn invariant_initial_condition(balances: &[Coin], expected: &Coin) -> Result<(), OrbiterError> {
    let non_zero: Vec<&Coin> = balances.iter().filter(|c| !c.is_zero()).collect();
    match non_zero.as_slice() {
        [only] if only.denom == expected.denom && only.amount == expected.amount => Ok(()),
        [only] => Err(OrbiterError::validation(format!(
            "holding account balance {} does not match forwarded coin {}",
            only, expected
        ))),
        [] => Err(OrbiterError::validation(format!(
            "holding account is empty, expected {}",
            expected
        ))),
        many => Err(OrbiterError::validation(format!(
            "holding account carries {} balances, expected exactly {}",
            many.len(),
            expected
        ))),
    }
}

/// Invariant: signer is the configured authority.
pub fn invariant_authority(signer: &str, authority: &str) -> Result<(), OrbiterError> {
    if signer != authority {
        return Err(OrbiterError::Unauthorized {
            expected: authority.to_string(),
            signer: signer.to_string(),
        });
    }
    Ok(())
}
