//! Customizer hook chain: one hook per `(phase, command)` key.

use connkit_core::{
    BoxError, Command, ConnectorError, ContextRef, CustomizerHook, DynCustomizerHook, HookKey,
    Phase, StdCommand, TypedHook, commands,
};
use serde_json::Value;
use std::{collections::HashMap, future::Future};

/// A frozen table of customizer hooks.
///
/// Keys without a hook pass their payload through unchanged.
#[derive(Default)]
pub struct HookChain {
    hooks: HashMap<HookKey, Box<dyn DynCustomizerHook>>,
}

impl HookChain {
    /// Start building a hook chain.
    pub fn builder() -> HookChainBuilder {
        HookChainBuilder::new()
    }

    /// A chain without hooks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if a hook is registered for `(phase, command)`.
    pub fn is_registered(&self, phase: Phase, command: Command) -> bool {
        self.hooks.contains_key(&HookKey::new(phase, command))
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the hook registered for `(phase, command)` on `payload`.
    ///
    /// Returns `payload` untouched when no hook is registered, and the
    /// hook's result as-is otherwise.
    pub async fn invoke(
        &self,
        phase: Phase,
        command: Command,
        context: ContextRef,
        payload: Value,
    ) -> Result<Value, ConnectorError> {
        let Some(hook) = self.hooks.get(&HookKey::new(phase, command)) else {
            return Ok(payload);
        };

        tracing::debug!(%phase, %command, "running customizer hook");
        hook.call_dyn(context, payload)
            .await
            .map_err(|source| ConnectorError::HookExecution {
                phase,
                command,
                source,
            })
    }
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self.hooks.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("HookChain").field("hooks", &keys).finish()
    }
}

/// Builder for constructing a [`HookChain`].
///
/// Registering the same key twice keeps the last hook.
#[derive(Default)]
pub struct HookChainBuilder {
    hooks: HashMap<HookKey, Box<dyn DynCustomizerHook>>,
}

impl HookChainBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook over raw JSON records.
    pub fn register<H: CustomizerHook>(mut self, phase: Phase, command: Command, hook: H) -> Self {
        self.register_mut(phase, command, hook);
        self
    }

    /// Register a hook over raw JSON records (mutable version).
    pub fn register_mut<H: CustomizerHook>(&mut self, phase: Phase, command: Command, hook: H) {
        let key = HookKey::new(phase, command);
        if self.hooks.insert(key, Box::new(hook)).is_some() {
            tracing::debug!(%key, "replacing customizer hook");
        }
    }

    /// Register a before hook over the typed input of `C`.
    pub fn before<C, F, Fut, E>(self, f: F) -> Self
    where
        C: StdCommand,
        F: Fn(ContextRef, C::Input) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C::Input, E>> + Send,
        E: Into<BoxError>,
    {
        self.register(Phase::Before, C::COMMAND, TypedHook::<C::Input, F>::new(f))
    }

    /// Register an after hook over the typed output of `C`.
    pub fn after<C, F, Fut, E>(self, f: F) -> Self
    where
        C: StdCommand,
        F: Fn(ContextRef, C::Output) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C::Output, E>> + Send,
        E: Into<BoxError>,
    {
        self.register(Phase::After, C::COMMAND, TypedHook::<C::Output, F>::new(f))
    }

    /// Register the after hook of `std:test-connection`.
    pub fn after_std_test_connection<F, Fut, E>(self, f: F) -> Self
    where
        F: Fn(ContextRef, <commands::TestConnection as StdCommand>::Output) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<<commands::TestConnection as StdCommand>::Output, E>> + Send,
        E: Into<BoxError>,
    {
        self.after::<commands::TestConnection, _, _, _>(f)
    }

    /// Register the before hook of `std:account:read`.
    pub fn before_std_account_read<F, Fut, E>(self, f: F) -> Self
    where
        F: Fn(ContextRef, <commands::AccountRead as StdCommand>::Input) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<<commands::AccountRead as StdCommand>::Input, E>> + Send,
        E: Into<BoxError>,
    {
        self.before::<commands::AccountRead, _, _, _>(f)
    }

    /// Register the after hook of `std:account:read`.
    pub fn after_std_account_read<F, Fut, E>(self, f: F) -> Self
    where
        F: Fn(ContextRef, <commands::AccountRead as StdCommand>::Output) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<<commands::AccountRead as StdCommand>::Output, E>> + Send,
        E: Into<BoxError>,
    {
        self.after::<commands::AccountRead, _, _, _>(f)
    }

    /// Build the hook chain.
    pub fn build(self) -> HookChain {
        HookChain { hooks: self.hooks }
    }
}
