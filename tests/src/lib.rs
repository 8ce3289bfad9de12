//! # Orbiter Test Suite
//!
//! Cross-component flows run against a fully wired [`orbiter_core::Orbiter`]
//! with in-memory host ports.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Harness, packet parser and controller doubles
//! └── integration/
//!     ├── flows.rs            # Inbound packet → pre-actions → forwarding
//!     ├── circuit_breakers.rs # Action, protocol and route pauses
//!     └── pending.rs          # Pending payload submit/resolve/expiry
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p orbiter-tests
//! cargo test -p orbiter-tests integration::circuit_breakers::
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
