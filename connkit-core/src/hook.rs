//! # Customizer hooks
//!
//! A [`CustomizerHook`] transforms one record: the command input for a
//! before hook, or one output record for an after hook. Hooks receive the
//! record by value and return the record to pass on, so they may mutate it,
//! replace it, or hand it back untouched.

use crate::{context::ContextRef, error::BoxError};
use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{future::Future, marker::PhantomData};

/// Transforms the input or an output record of a command.
///
/// This trait uses native `async fn` for static dispatch. Hook chains store
/// hooks as [`DynCustomizerHook`] trait objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a customizer hook",
    label = "missing `CustomizerHook` implementation",
    note = "Hooks take `(ContextRef, Value)` and return `Result<Value, E>`."
)]
pub trait CustomizerHook: Send + Sync + 'static {
    /// Transform the payload.
    fn call(
        &self,
        context: ContextRef,
        payload: Value,
    ) -> impl Future<Output = Result<Value, BoxError>> + Send;
}

/// Object-safe version of [`CustomizerHook`].
pub trait DynCustomizerHook: Send + Sync + 'static {
    /// Transform the payload (dynamic dispatch version).
    fn call_dyn(&self, context: ContextRef, payload: Value) -> BoxFuture<'_, Result<Value, BoxError>>;
}

impl<T: CustomizerHook> DynCustomizerHook for T {
    fn call_dyn(&self, context: ContextRef, payload: Value) -> BoxFuture<'_, Result<Value, BoxError>> {
        Box::pin(self.call(context, payload))
    }
}

// Blanket impl for closures over raw records
impl<F, Fut, E> CustomizerHook for F
where
    F: Fn(ContextRef, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, E>> + Send,
    E: Into<BoxError>,
{
    async fn call(&self, context: ContextRef, payload: Value) -> Result<Value, BoxError> {
        (self)(context, payload).await.map_err(Into::into)
    }
}

/// Adapts a closure over a typed record `T` into a [`CustomizerHook`].
///
/// The payload is decoded into `T` before the closure runs and the returned
/// `T` is encoded back.
pub struct TypedHook<T, F> {
    f: F,
    _record: PhantomData<fn() -> T>,
}

impl<T, F> TypedHook<T, F> {
    /// Wrap a typed closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _record: PhantomData,
        }
    }
}

impl<T, F, Fut, E> CustomizerHook for TypedHook<T, F>
where
    T: Serialize + DeserializeOwned + Send + 'static,
    F: Fn(ContextRef, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send,
    E: Into<BoxError>,
{
    async fn call(&self, context: ContextRef, payload: Value) -> Result<Value, BoxError> {
        let record: T = serde_json::from_value(crate::handler::absent_as_empty(payload))?;
        let record = (self.f)(context, record)
            .await
            .map_err(Into::<BoxError>::into)?;
        Ok(serde_json::to_value(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::EmptyContext, error::ConnectorError, models::StdAccountOutput};
    use serde_json::json;

    #[tokio::test]
    async fn raw_closure_is_a_hook() {
        let hook = |_ctx: ContextRef, mut payload: Value| async move {
            payload["seen"] = json!(true);
            Ok::<_, ConnectorError>(payload)
        };
        let out = hook
            .call_dyn(EmptyContext::shared(), json!({ "identity": "john.doe" }))
            .await
            .unwrap();
        assert_eq!(out, json!({ "identity": "john.doe", "seen": true }));
    }

    #[tokio::test]
    async fn typed_hook_round_trips_record() {
        let hook = TypedHook::<StdAccountOutput, _>::new(|_ctx: ContextRef, mut account: StdAccountOutput| async move {
            account.disabled = Some(true);
            Ok::<_, ConnectorError>(account)
        });
        let out = hook
            .call(EmptyContext::shared(), json!({ "identity": "jane.doe", "attributes": {} }))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!({ "identity": "jane.doe", "disabled": true, "attributes": {} })
        );
    }

    #[tokio::test]
    async fn typed_hook_keeps_unmodelled_fields() {
        let hook = TypedHook::<StdAccountOutput, _>::new(|_ctx: ContextRef, account: StdAccountOutput| async move {
            Ok::<_, ConnectorError>(account)
        });
        let record = json!({
            "identity": "john.doe",
            "deleted": true,
            "incomplete": true,
            "permissions": [{ "target": "db", "rights": ["read"] }],
        });
        let out = hook.call(EmptyContext::shared(), record.clone()).await.unwrap();
        assert_eq!(out, record);
    }

    #[tokio::test]
    async fn typed_hook_propagates_closure_error() {
        let hook = TypedHook::<StdAccountOutput, _>::new(|_ctx: ContextRef, _account: StdAccountOutput| async move {
            Err::<StdAccountOutput, _>(ConnectorError::AccountNotFound("ghost".into()))
        });
        let err = hook
            .call(EmptyContext::shared(), json!({ "identity": "ghost" }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "account not found: ghost");
    }
}
