//! # Orbiter Dispatch Core
//!
//! Accepts an inbound cross-chain transfer, normalizes it, runs pre-actions on
//! the transferred value and forwards the result to a destination protocol.
//!
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Pipeline
//!
//! ```text
//! raw packet ──→ Adapter ──→ Dispatcher ──→ Executor (per action) ──→ Forwarder
//!                  │                                                    │
//!            PayloadLifecycle                                   UpdateStats
//! ```
//!
//! ## Circuit Breakers
//!
//! | Level | Key | Checked by |
//! |-------|-----|------------|
//! | Action | `ActionId` | Executor |
//! | Protocol | `ProtocolId` | Forwarder |
//! | Route | `(ProtocolId, counterparty)` | Forwarder |
//!
//! ## Module Structure
//!
//! ```text
//! orbiter-core/
//! ├── domain/       # Router, keys, stats, pending entries, params, invariants
//! ├── ports/        # Inbound component APIs, outbound host collaborators
//! ├── adapters/     # In-memory store, bank, clock, authority, event sinks
//! ├── service/      # Adapter, Dispatcher, Executor, Forwarder, lifecycle, admin
//! ├── controllers/  # Built-in fee pre-action
//! └── container.rs  # Wiring and sealing
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod container;
pub mod controllers;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use config::{AccountsConfig, ConfigError, OrbiterConfig, PendingPayloadConfig};
pub use container::{Orbiter, OrbiterBuilder};
pub use controllers::FeeController;
pub use domain::{
    Controller, DispatchedAmount, KVStoreError, OrbiterEvent, Params, PendingPayload, RouteKey,
    Router,
};
pub use ports::{
    ActionController, AdapterApi, AuthorityChecker, BankKeeper, DispatcherApi, EventEmitter,
    ExecutorApi, ForwarderApi, ForwardingController, KeyValueStore, PacketParser,
    PayloadLifecycleApi, SharedStore, TimeSource,
};
pub use service::{
    Adapter, AdminService, Dispatcher, Executor, Forwarder, GenesisState, PayloadLifecycle,
    QueryService,
};
pub use shared_types::{ErrorKind, OrbiterError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
