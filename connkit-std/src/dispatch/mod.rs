//! Runtime dispatch tables.
//!
//! Both tables are filled through a builder during start-up and frozen
//! before the first invocation:
//!
//! - [`CommandRegistry`] maps each standard command to its handler.
//! - [`HookChain`] maps `(phase, command)` keys to customizer hooks.

pub mod chain;
pub mod registry;

pub use chain::{HookChain, HookChainBuilder};
pub use registry::{CommandRegistry, RegistryBuilder};
