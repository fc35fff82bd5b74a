//! # connkit-std
//!
//! Standard implementations for connkit connectors.
//!
//! This crate provides:
//! - **Dispatch**: [`CommandRegistry`] (connector) and [`HookChain`] (customizer)
//! - **Runtime**: [`Runtime`] sequencing before hook, handler and after hook
//! - **Configuration**: [`Config`] decoded once from `CONNECTOR_CONFIG`
//! - **Output**: [`NdjsonSink`] for the runtime's line framing
//! - **Backend seam**: [`AccountStore`] and the template [`AccountClient`]
//! - **Templates**: a starter connector and customizer
//! - **Standard hooks**: Logging

#![deny(clippy::wildcard_imports)]

// Re-export core traits
pub use connkit_core;

// Modules
pub mod client;
pub mod config;
pub mod dispatch;
pub mod hooks;
pub mod runtime;
pub mod sink;
pub mod template;
pub mod testing;

pub use client::{Account, AccountClient, AccountStore, MockAccountStore};
pub use config::{CONFIG_ENV, Config};
pub use dispatch::{CommandRegistry, HookChain, HookChainBuilder, RegistryBuilder};
pub use runtime::{InvokeRequest, Runtime};
pub use sink::NdjsonSink;
