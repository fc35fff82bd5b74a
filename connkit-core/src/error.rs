//! Error types for connkit.
//!
//! A single [`ConnectorError`] enum covers everything the dispatch layer can
//! surface:
//!
//! - configuration problems detected while building collaborators
//! - dispatch of a command nobody registered
//! - failures raised inside user-supplied handlers and hooks
//! - sink and codec failures on the output path
//!
//! User code returns [`BoxError`] so that any error type can cross the
//! handler and hook seams; the dispatch layer wraps it with the command (and
//! phase) it was running.

use crate::command::{Command, Phase};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all connector operations.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// A required configuration value is missing or invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No handler is registered for the command.
    #[error("no handler registered for command {0}")]
    UnregisteredOperation(Command),

    /// The command name is not part of the standard command set.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command handler failed.
    #[error("handler for {command} failed")]
    HandlerExecution {
        /// The command whose handler failed.
        command: Command,
        /// The failure raised by the handler.
        #[source]
        source: BoxError,
    },

    /// A customizer hook failed.
    #[error("{phase} hook for {command} failed")]
    HookExecution {
        /// The phase of the failing hook.
        phase: Phase,
        /// The command the hook is attached to.
        command: Command,
        /// The failure raised by the hook.
        #[source]
        source: BoxError,
    },

    /// The backing system has no account with this identity.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The backing system failed.
    #[error("backend error")]
    Backend(#[source] BoxError),

    /// The output sink rejected a record.
    #[error("output sink error")]
    Sink(#[source] BoxError),

    /// A record could not be converted to or from JSON.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The context does not provide the requested capability.
    #[error("context does not support {0}")]
    Unsupported(&'static str),
}

impl ConnectorError {
    /// Shorthand for a [`ConnectorError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        ConnectorError::Configuration(message.into())
    }

    /// Recover a `ConnectorError` that was boxed on its way through a sink,
    /// or wrap a foreign error as [`ConnectorError::Sink`].
    pub fn from_sink(err: BoxError) -> Self {
        match err.downcast::<ConnectorError>() {
            Ok(err) => *err,
            Err(err) => ConnectorError::Sink(err),
        }
    }
}
