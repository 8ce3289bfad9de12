//! # Domain Module
//!
//! Core domain types for the dispatch core: routing table, statistics,
//! pending payloads, parameters, store key layout and invariants.

pub mod errors;
pub mod events;
pub mod invariants;
pub mod keys;
pub mod params;
pub mod pending;
pub mod router;
pub mod stats;

pub use errors::*;
pub use events::*;
pub use invariants::*;
pub use params::*;
pub use pending::*;
pub use router::{Controller, RouteKey, Router};
pub use stats::*;
