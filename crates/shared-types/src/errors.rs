//! # Error Types
//!
//! The error taxonomy shared by every router component and controller.

use crate::identifiers::{ActionId, ProtocolId};
use thiserror::Error;

/// Coarse error category, used by callers that branch on the failure kind
/// rather than on the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed payload, attributes or parameters.
    Validation,
    /// Unrouted protocol/action or missing stored entry.
    NotFound,
    /// Signer is not the configured authority.
    Unauthorized,
    /// A circuit breaker is open.
    Paused,
    /// Counter or amount arithmetic overflowed.
    Overflow,
    /// An entry with the same key is already stored.
    AlreadyExists,
    /// Ledger balance does not cover the requested movement.
    InsufficientFunds,
    /// Opaque failure inside an external collaborator.
    Controller,
    /// Storage or encoding failure.
    Internal,
}

/// Router error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrbiterError {
    /// Malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unrouted key or missing entry.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Signer mismatch.
    #[error("Unauthorized: expected {expected}, got {signer}")]
    Unauthorized {
        /// Configured authority.
        expected: String,
        /// Signer of the rejected request.
        signer: String,
    },

    /// Action, protocol or route is paused.
    #[error("Paused: {0}")]
    Paused(String),

    /// Arithmetic overflow.
    #[error("Overflow: {0}")]
    Overflow(String),

    /// Duplicate entry.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Not enough balance to move funds.
    #[error("Insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        /// Account being debited.
        account: String,
        /// Requested amount with denom.
        required: String,
        /// Available amount with denom.
        available: String,
    },

    /// A pre-action failed; dispatch aborted.
    #[error("Action {action} failed: {source}")]
    ActionFailed {
        /// Offending action.
        action: ActionId,
        /// Underlying failure.
        source: Box<OrbiterError>,
    },

    /// Forwarding failed; dispatch aborted.
    #[error("Forwarding to protocol {protocol} failed: {source}")]
    ForwardingFailed {
        /// Target protocol.
        protocol: ProtocolId,
        /// Underlying failure.
        source: Box<OrbiterError>,
    },

    /// Opaque collaborator failure.
    #[error("Controller error: {0}")]
    Controller(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Encoding or decoding failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrbiterError {
    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Category of this error. Wrapped stage failures report the category of
    /// the underlying cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Paused(_) => ErrorKind::Paused,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::ActionFailed { source, .. } | Self::ForwardingFailed { source, .. } => {
                source.kind()
            }
            Self::Controller(_) => ErrorKind::Controller,
            Self::Storage(_) | Self::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Wrap as a pre-action failure.
    pub fn in_action(self, action: ActionId) -> Self {
        Self::ActionFailed {
            action,
            source: Box::new(self),
        }
    }

    /// Wrap as a forwarding failure.
    pub fn in_forwarding(self, protocol: ProtocolId) -> Self {
        Self::ForwardingFailed {
            protocol,
            source: Box::new(self),
        }
    }
}

/// Result alias used across the router.
pub type OrbiterResult<T> = Result<T, OrbiterError>;
