//! # Ports Layer (Hexagonal Architecture)
//!
//! - Inbound: what the dispatch components offer
//! - Outbound: what they require from the host

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
