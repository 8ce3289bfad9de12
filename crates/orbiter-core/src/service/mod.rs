//! # Service Layer
//!
//! The dispatch components, each implementing its inbound port:
//!
//! | Component | Port |
//! |-----------|------|
//! | [`Adapter`] | [`AdapterApi`](crate::ports::AdapterApi) |
//! | [`Dispatcher`] | [`DispatcherApi`](crate::ports::DispatcherApi) |
//! | [`Executor`] | [`ExecutorApi`](crate::ports::ExecutorApi) |
//! | [`Forwarder`] | [`ForwarderApi`](crate::ports::ForwarderApi) |
//! | [`PayloadLifecycle`] | [`PayloadLifecycleApi`](crate::ports::PayloadLifecycleApi) |
//!
//! plus the authority-gated [`AdminService`], read-only [`QueryService`] and
//! genesis import/export.

pub mod adapter;
pub mod admin;
pub mod dispatcher;
pub mod executor;
pub mod forwarder;
pub mod genesis;
pub mod payload_store;
pub mod query;
pub mod store;

pub use adapter::Adapter;
pub use admin::AdminService;
pub use dispatcher::Dispatcher;
pub use executor::Executor;
pub use forwarder::Forwarder;
pub use genesis::{export_genesis, init_genesis, GenesisState};
pub use payload_store::PayloadLifecycle;
pub use query::QueryService;
