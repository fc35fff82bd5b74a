//! # Command handlers
//!
//! A [`CommandHandler`] is the terminal point of an invocation: it receives
//! the (possibly customized) input record and emits zero or more output
//! records through a [`Response`].
//!
//! # Usage Patterns
//!
//! 1. **Raw closure**: `|ctx, input: Value, res: Response| async move { ... }`
//! 2. **Struct implementation**: `impl CommandHandler for MyHandler`
//! 3. **Typed closure**: [`TypedHandler`] converts records of a
//!    [`StdCommand`] at the seam, so the closure sees
//!    `StdAccountReadInput` and sends `StdAccountOutput`.

use crate::{
    command::StdCommand,
    context::ContextRef,
    error::BoxError,
    response::Response,
};
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::{future::Future, marker::PhantomData};

/// Handles one standard command.
///
/// This trait uses native `async fn` for static dispatch. Registries store
/// handlers as [`DynCommandHandler`] trait objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle connector commands",
    label = "missing `CommandHandler` implementation",
    note = "Handlers take `(ContextRef, Value, Response)` and return `Result<(), E>`."
)]
pub trait CommandHandler: Send + Sync + 'static {
    /// Run the command.
    fn call(
        &self,
        context: ContextRef,
        input: Value,
        response: Response,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Object-safe version of [`CommandHandler`].
pub trait DynCommandHandler: Send + Sync + 'static {
    /// Run the command (dynamic dispatch version).
    fn call_dyn(
        &self,
        context: ContextRef,
        input: Value,
        response: Response,
    ) -> BoxFuture<'_, Result<(), BoxError>>;
}

impl<T: CommandHandler> DynCommandHandler for T {
    fn call_dyn(
        &self,
        context: ContextRef,
        input: Value,
        response: Response,
    ) -> BoxFuture<'_, Result<(), BoxError>> {
        Box::pin(self.call(context, input, response))
    }
}

// Blanket impl for closures over raw records
impl<F, Fut, E> CommandHandler for F
where
    F: Fn(ContextRef, Value, Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Into<BoxError>,
{
    async fn call(&self, context: ContextRef, input: Value, response: Response) -> Result<(), BoxError> {
        (self)(context, input, response).await.map_err(Into::into)
    }
}

/// Adapts a closure over the typed records of `C` into a [`CommandHandler`].
pub struct TypedHandler<C, F> {
    f: F,
    _command: PhantomData<fn() -> C>,
}

impl<C, F> TypedHandler<C, F> {
    /// Wrap a typed closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _command: PhantomData,
        }
    }
}

impl<C, F, Fut, E> CommandHandler for TypedHandler<C, F>
where
    C: StdCommand,
    F: Fn(ContextRef, C::Input, Response<C::Output>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Into<BoxError>,
{
    async fn call(&self, context: ContextRef, input: Value, response: Response) -> Result<(), BoxError> {
        let input: C::Input = serde_json::from_value(absent_as_empty(input))?;
        (self.f)(context, input, response.typed()).await.map_err(Into::into)
    }
}

/// The runtime omits the input of commands that take none.
pub(crate) fn absent_as_empty(input: Value) -> Value {
    if input.is_null() {
        Value::Object(Map::new())
    } else {
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands,
        context::EmptyContext,
        error::ConnectorError,
        models::{StdAccountOutput, StdAccountReadInput},
        response::RawResponse,
    };
    use futures::{StreamExt, channel::mpsc};
    use serde_json::json;

    #[tokio::test]
    async fn raw_closure_is_a_handler() {
        let handler = |_ctx: ContextRef, input: Value, res: Response| async move {
            res.send(input)?;
            Ok::<_, ConnectorError>(())
        };
        let (tx, rx) = mpsc::unbounded();
        handler
            .call_dyn(EmptyContext::shared(), json!({ "a": 1 }), Response::new(tx))
            .await
            .unwrap();

        let records: Vec<_> = rx.collect().await;
        assert_eq!(records, vec![RawResponse::output(json!({ "a": 1 }))]);
    }

    #[tokio::test]
    async fn typed_handler_decodes_input() {
        let handler = TypedHandler::<commands::AccountRead, _>::new(
            |_ctx: ContextRef, input: StdAccountReadInput, res: Response<StdAccountOutput>| async move {
                res.send(StdAccountOutput {
                    identity: input.identity,
                    ..Default::default()
                })
            },
        );
        let (tx, rx) = mpsc::unbounded();
        handler
            .call(EmptyContext::shared(), json!({ "identity": "jane.doe" }), Response::new(tx))
            .await
            .unwrap();

        let records: Vec<_> = rx.collect().await;
        assert_eq!(
            records,
            vec![RawResponse::output(json!({ "identity": "jane.doe" }))]
        );
    }

    #[tokio::test]
    async fn typed_handler_rejects_malformed_input() {
        let handler = TypedHandler::<commands::AccountRead, _>::new(
            |_ctx: ContextRef, _input: StdAccountReadInput, _res: Response<StdAccountOutput>| async move {
                Ok::<_, ConnectorError>(())
            },
        );
        let (tx, _rx) = mpsc::unbounded();
        let result = handler
            .call(EmptyContext::shared(), json!({ "identity": 42 }), Response::new(tx))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn null_input_becomes_empty_object() {
        assert_eq!(absent_as_empty(Value::Null), json!({}));
        assert_eq!(absent_as_empty(json!({ "x": 1 })), json!({ "x": 1 }));
    }
}
