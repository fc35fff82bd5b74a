//! Command registry: one handler per standard command.

use connkit_core::{
    Command, CommandHandler, ConnectorError, ContextRef, DynCommandHandler, OutputSink, Response,
    StdCommand, TypedHandler, commands,
};
use futures::{StreamExt, channel::mpsc, future};
use serde_json::Value;
use std::{collections::HashMap, future::Future};

/// A frozen table of command handlers.
///
/// Built with [`RegistryBuilder`]; immutable and `Send + Sync` afterwards.
pub struct CommandRegistry {
    handlers: HashMap<Command, Box<dyn DynCommandHandler>>,
}

impl CommandRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns true if a handler is registered for `command`.
    pub fn contains(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    /// The registered commands, in wire-contract order.
    pub fn commands(&self) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|command| self.contains(*command))
            .collect()
    }

    /// Run the handler for `command`, streaming its records into `sink`.
    ///
    /// Records reach the sink in the order the handler sends them, while the
    /// handler is still running. Every record sent before the handler
    /// returns is delivered, including when it returns an error. Fails with
    /// [`ConnectorError::UnregisteredOperation`] before any handler runs if
    /// nothing is registered for `command`.
    ///
    /// A sink failure closes the stream; later sends in the handler fail and
    /// the sink error is returned.
    pub async fn invoke<S: OutputSink>(
        &self,
        command: Command,
        context: ContextRef,
        input: Value,
        sink: &mut S,
    ) -> Result<(), ConnectorError> {
        let handler = self
            .handlers
            .get(&command)
            .ok_or(ConnectorError::UnregisteredOperation(command))?;

        tracing::debug!(%command, "dispatching command");

        let (tx, mut rx) = mpsc::unbounded();
        // The sender lives in the handler's future, so the stream ends once
        // the handler returns.
        let run = handler.call_dyn(context, input, Response::new(tx));
        let drain = async {
            let mut sent = 0usize;
            while let Some(record) = rx.next().await {
                if let Err(err) = sink.send(record).await {
                    rx.close();
                    return Err(ConnectorError::from_sink(err));
                }
                sent += 1;
            }
            Ok(sent)
        };

        let (result, drained) = future::join(run, drain).await;
        let sent = drained?;
        tracing::debug!(%command, sent, ok = result.is_ok(), "command finished");
        result.map_err(|source| ConnectorError::HandlerExecution { command, source })
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands())
            .finish()
    }
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`CommandRegistry`].
///
/// Registering a command twice keeps the last handler.
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .std_test_connection(|_ctx, _input, res| async move { res.send(StdTestConnectionOutput::default()) })
///     .register(Command::AccountList, my_raw_handler)
///     .build();
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<Command, Box<dyn DynCommandHandler>>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler over raw JSON records.
    pub fn register<H: CommandHandler>(mut self, command: Command, handler: H) -> Self {
        self.register_mut(command, handler);
        self
    }

    /// Register a handler over raw JSON records (mutable version).
    pub fn register_mut<H: CommandHandler>(&mut self, command: Command, handler: H) {
        if self.handlers.insert(command, Box::new(handler)).is_some() {
            tracing::debug!(%command, "replacing command handler");
        }
    }

    /// Register a handler over the typed records of `C`.
    pub fn command<C, F, Fut, E>(self, f: F) -> Self
    where
        C: StdCommand,
        F: Fn(ContextRef, C::Input, Response<C::Output>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Into<connkit_core::BoxError>,
    {
        self.register(C::COMMAND, TypedHandler::<C, F>::new(f))
    }

    /// Register the `std:test-connection` handler.
    pub fn std_test_connection<F, Fut, E>(self, f: F) -> Self
    where
        F: Fn(
                ContextRef,
                <commands::TestConnection as StdCommand>::Input,
                Response<<commands::TestConnection as StdCommand>::Output>,
            ) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Into<connkit_core::BoxError>,
    {
        self.command::<commands::TestConnection, _, _, _>(f)
    }

    /// Register the `std:account:list` handler.
    pub fn std_account_list<F, Fut, E>(self, f: F) -> Self
    where
        F: Fn(
                ContextRef,
                <commands::AccountList as StdCommand>::Input,
                Response<<commands::AccountList as StdCommand>::Output>,
            ) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Into<connkit_core::BoxError>,
    {
        self.command::<commands::AccountList, _, _, _>(f)
    }

    /// Register the `std:account:read` handler.
    pub fn std_account_read<F, Fut, E>(self, f: F) -> Self
    where
        F: Fn(
                ContextRef,
                <commands::AccountRead as StdCommand>::Input,
                Response<<commands::AccountRead as StdCommand>::Output>,
            ) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Into<connkit_core::BoxError>,
    {
        self.command::<commands::AccountRead, _, _, _>(f)
    }

    /// Build the registry.
    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            handlers: self.handlers,
        }
    }
}
