//! # Shared Types Crate
//!
//! Canonical packet model for the Orbiter router.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers, coins, transfer attributes,
//!   payloads and stage packets are defined here and nowhere else.
//! - **Closed attribute sets**: per-action and per-protocol attributes are
//!   sum types; adding a variant is a build-time change.
//! - **Validate before acting**: every inbound structure exposes `validate()`
//!   returning an [`OrbiterError::Validation`].

pub mod attributes;
pub mod entities;
pub mod errors;
pub mod identifiers;
pub mod payload;

pub use attributes::*;
pub use entities::*;
pub use errors::*;
pub use identifiers::*;
pub use payload::*;
