//! Invocation runtime.
//!
//! Sequences one invocation through the customizer and the connector:
//!
//! ```text
//! START -> before hook -> command handler -> after hook (per record) -> END
//! ```
//!
//! Missing hooks pass records through. A failure at any stage ends the
//! invocation and is returned to the caller.

use crate::dispatch::{CommandRegistry, HookChain};
use connkit_core::{
    BoxError, Command, ConnectorError, ContextRef, OutputSink, Phase, RawResponse, ResponseType,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::Instrument;

/// A command invocation as the connector runtime sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// Wire name of the command, e.g. `std:account:read`.
    #[serde(rename = "type")]
    pub command: String,
    /// Command input; absent means `{}`.
    #[serde(default = "empty_input")]
    pub input: Value,
}

fn empty_input() -> Value {
    Value::Object(Map::new())
}

impl InvokeRequest {
    /// Build a request for a known command.
    pub fn new(command: Command, input: Value) -> Self {
        Self {
            command: command.as_str().to_string(),
            input,
        }
    }
}

/// A connector plus its optional customizer.
#[derive(Debug)]
pub struct Runtime {
    registry: CommandRegistry,
    customizer: HookChain,
}

impl Runtime {
    /// Create a runtime without customizer hooks.
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            customizer: HookChain::empty(),
        }
    }

    /// Attach a customizer.
    pub fn with_customizer(mut self, customizer: HookChain) -> Self {
        self.customizer = customizer;
        self
    }

    /// The connector's command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The customizer's hook chain.
    pub fn customizer(&self) -> &HookChain {
        &self.customizer
    }

    /// Run `command` through before hook, handler and after hook.
    ///
    /// Output records pass through the after hook one by one as the handler
    /// emits them; state records go to the sink untouched.
    pub async fn invoke<S: OutputSink>(
        &self,
        command: Command,
        context: ContextRef,
        input: Value,
        sink: &mut S,
    ) -> Result<(), ConnectorError> {
        let span = tracing::info_span!("invoke", %command);
        async move {
            if !self.registry.contains(command) {
                return Err(ConnectorError::UnregisteredOperation(command));
            }

            let input = self
                .customizer
                .invoke(Phase::Before, command, context.clone(), input)
                .await?;

            let mut sink = AfterHookSink {
                customizer: &self.customizer,
                command,
                context: context.clone(),
                inner: sink,
            };
            self.registry.invoke(command, context, input, &mut sink).await
        }
        .instrument(span)
        .await
    }

    /// Decode the command name of `request` and run it.
    pub async fn invoke_request<S: OutputSink>(
        &self,
        request: InvokeRequest,
        context: ContextRef,
        sink: &mut S,
    ) -> Result<(), ConnectorError> {
        let command = request.command.parse::<Command>()?;
        self.invoke(command, context, request.input, sink).await
    }
}

/// Applies the after hook to each output record on its way to the sink.
struct AfterHookSink<'a, S> {
    customizer: &'a HookChain,
    command: Command,
    context: ContextRef,
    inner: &'a mut S,
}

impl<S: OutputSink> OutputSink for AfterHookSink<'_, S> {
    async fn send(&mut self, response: RawResponse) -> Result<(), BoxError> {
        let response = match response.kind {
            ResponseType::Output => RawResponse::output(
                self.customizer
                    .invoke(Phase::After, self.command, self.context.clone(), response.data)
                    .await?,
            ),
            ResponseType::State => response,
        };
        self.inner.send(response).await
    }
}
