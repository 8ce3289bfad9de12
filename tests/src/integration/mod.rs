//! # Integration Flows
//!
//! Each module drives a [`Harness`](crate::fixtures::Harness) end to end.

pub mod circuit_breakers;
pub mod flows;
pub mod pending;
