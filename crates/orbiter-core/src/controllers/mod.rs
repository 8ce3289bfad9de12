//! Built-in action controllers.

pub mod fee;

pub use fee::FeeController;
