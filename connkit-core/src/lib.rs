//! # connkit-core
//!
//! Core traits and wire types for identity connectors built with connkit.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! connector code that only needs to implement handlers and hooks, without
//! pulling in the registry and runtime from `connkit-std`.
//!
//! # Building Blocks
//!
//! ## Commands ([`Command`], [`StdCommand`])
//!
//! The runtime defines a closed set of standard commands such as
//! `std:test-connection` and `std:account:read`. [`StdCommand`] binds each
//! of them to its typed input and output records in [`models`].
//!
//! ## Handlers ([`CommandHandler`])
//!
//! The terminal point of an invocation. A handler receives the input record
//! and streams zero or more output records through a [`Response`].
//!
//! ## Hooks ([`CustomizerHook`])
//!
//! Before hooks rewrite the input of a command, after hooks rewrite each
//! output record. A hook always hands back the record to pass on.
//!
//! ## Context ([`Context`])
//!
//! Opaque per-invocation capabilities supplied by the runtime and forwarded
//! to every handler and hook.
//!
//! ## Sinks ([`OutputSink`])
//!
//! Ordered destinations for the [`RawResponse`] envelopes an invocation
//! produces.
//!
//! # Error Types
//!
//! - [`ConnectorError`] - every failure the dispatch layer surfaces
//! - [`BoxError`] - failures raised by user-supplied handlers and hooks

#![deny(clippy::wildcard_imports)]

mod command;
mod context;
mod error;
mod handler;
mod hook;
pub mod models;
mod response;
mod sink;

// Re-exports
pub use command::{Command, HookKey, Phase, StdCommand, commands};
pub use context::{AssumeRoleRequest, Context, ContextRef, Credentials, EmptyContext};
pub use error::{BoxError, ConnectorError};
pub use handler::{CommandHandler, DynCommandHandler, TypedHandler};
pub use hook::{CustomizerHook, DynCustomizerHook, TypedHook};
pub use response::{RawResponse, Response, ResponseType};
pub use sink::OutputSink;
