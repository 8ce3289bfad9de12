//! # Params
//!
//! Governance-controlled parameters, persisted in the store.

use serde::{Deserialize, Serialize};
use shared_types::OrbiterError;

/// Default maximum passthrough payload size (32 KiB).
pub const DEFAULT_MAX_PASSTHROUGH_PAYLOAD_SIZE: u32 = 32 * 1024;

/// Router parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Largest passthrough payload a forwarding may carry, in bytes.
    pub max_passthrough_payload_size: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_passthrough_payload_size: DEFAULT_MAX_PASSTHROUGH_PAYLOAD_SIZE,
        }
    }
}

impl Params {
    /// Size limit must be non-zero.
    pub fn validate(&self) -> Result<(), OrbiterError> {
        if self.max_passthrough_payload_size == 0 {
            return Err(OrbiterError::validation(
                "max passthrough payload size must be positive",
            ));
        }
        Ok(())
    }
}
