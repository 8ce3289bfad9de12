//! # Adapters
//!
//! In-process implementations of the outbound ports. Used by tests and by
//! hosts that keep router state in memory.

pub mod authority;
pub mod bank;
pub mod clock;
pub mod events;
pub mod memory_store;

pub use authority::StaticAuthority;
pub use bank::InMemoryBank;
pub use clock::{FixedClock, SystemTimeSource};
pub use events::{EventRecorder, TracingEventEmitter};
pub use memory_store::InMemoryKVStore;
