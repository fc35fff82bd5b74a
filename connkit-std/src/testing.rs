//! Testing utilities for connkit.
//!
//! This module provides utilities to make testing handlers, hooks and
//! invocations easier.
//!
//! # Features
//!
//! - [`MockContext`]: A context that records reloads and hands out fixed credentials
//! - [`RecordingSink`]: A clonable sink that records every record it receives
//! - [`RecordingHook`]: A pass-through hook that records every payload
//! - [`FailingHook`]: A hook that always fails
//! - [`CountingHandler`]: A handler that counts invocations and emits nothing

use async_trait::async_trait;
use connkit_core::{
    AssumeRoleRequest, BoxError, CommandHandler, ConnectorError, Context, ContextRef, Credentials,
    CustomizerHook, OutputSink, RawResponse, Response,
};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Mock Context
// ============================================================================

/// A context for tests.
///
/// Counts `reload_config` calls and records every role request. Role
/// requests succeed only if credentials were supplied with
/// [`MockContext::with_credentials`].
///
/// # Example
///
/// ```rust,ignore
/// let ctx = MockContext::new();
/// runtime.invoke(Command::TestConnection, ctx.shared(), json!({}), &mut sink).await?;
/// assert_eq!(ctx.reload_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockContext {
    reloads: Arc<AtomicUsize>,
    role_requests: Arc<Mutex<Vec<AssumeRoleRequest>>>,
    credentials: Option<Credentials>,
}

impl MockContext {
    /// Create a context without role credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that answers role requests with `credentials`.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }

    /// A shared handle to this context; clones share their counters.
    pub fn shared(&self) -> ContextRef {
        Arc::new(self.clone())
    }

    /// Number of `reload_config` calls so far.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Role requests received so far.
    pub fn role_requests(&self) -> Vec<AssumeRoleRequest> {
        self.role_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Context for MockContext {
    async fn reload_config(&self) -> Result<(), BoxError> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn assume_role(&self, request: AssumeRoleRequest) -> Result<Credentials, BoxError> {
        self.role_requests.lock().unwrap().push(request);
        self.credentials
            .clone()
            .ok_or_else(|| Box::new(ConnectorError::Unsupported("assume_role")) as BoxError)
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// A sink that records every record it receives.
///
/// Clones share the same storage, so a clone can be inspected after the
/// original was handed to an invocation.
#[derive(Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<RawResponse>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded records.
    pub fn records(&self) -> Vec<RawResponse> {
        self.records.lock().unwrap().clone()
    }

    /// The `data` of every recorded output record, in order.
    pub fn outputs(&self) -> Vec<Value> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.is_output())
            .map(|record| record.data.clone())
            .collect()
    }

    /// Get the number of recorded records.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl OutputSink for RecordingSink {
    async fn send(&mut self, response: RawResponse) -> Result<(), BoxError> {
        self.records.lock().unwrap().push(response);
        Ok(())
    }
}

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records every payload and returns it unchanged.
#[derive(Clone, Default)]
pub struct RecordingHook {
    payloads: Arc<Mutex<Vec<Value>>>,
}

impl RecordingHook {
    /// Create a new recording hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded payloads.
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

impl CustomizerHook for RecordingHook {
    async fn call(&self, _context: ContextRef, payload: Value) -> Result<Value, BoxError> {
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(payload)
    }
}

// ============================================================================
// Failing Hook
// ============================================================================

/// A hook that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingHook {
    message: String,
}

impl FailingHook {
    /// Create a failing hook.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl CustomizerHook for FailingHook {
    async fn call(&self, _context: ContextRef, _payload: Value) -> Result<Value, BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and emits no records.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let registry = RegistryBuilder::new()
///     .register(Command::AccountList, counter.clone())
///     .build();
///
/// registry.invoke(Command::AccountList, ctx, json!({}), &mut sink).await?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl CommandHandler for CountingHandler {
    async fn call(&self, _context: ContextRef, _input: Value, _response: Response) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
