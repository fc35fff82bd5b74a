//! Output envelopes and the handle handlers emit them through.

use crate::error::ConnectorError;
use futures::channel::mpsc::UnboundedSender;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, marker::PhantomData};

/// Kind of record carried by a [`RawResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// A command output record.
    Output,
    /// Opaque aggregation state saved by a stateful handler.
    State,
}

/// A record as it is written to an output sink.
///
/// Serializes as `{"type": "output", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Whether this is an output record or saved state.
    #[serde(rename = "type")]
    pub kind: ResponseType,
    /// The record itself.
    pub data: Value,
}

impl RawResponse {
    /// Wrap an output record.
    pub fn output(data: Value) -> Self {
        Self {
            kind: ResponseType::Output,
            data,
        }
    }

    /// Wrap a state record.
    pub fn state(data: Value) -> Self {
        Self {
            kind: ResponseType::State,
            data,
        }
    }

    /// Returns true for output records.
    pub fn is_output(&self) -> bool {
        self.kind == ResponseType::Output
    }
}

/// Handle a command handler emits its records through.
///
/// Records are delivered to the invocation's sink in the order they are
/// sent. The handle is dropped when the handler's future completes, which
/// ends the output stream.
pub struct Response<O = Value> {
    tx: UnboundedSender<RawResponse>,
    _output: PhantomData<fn(O)>,
}

impl<O> Response<O> {
    /// Create a handle feeding the given channel.
    pub fn new(tx: UnboundedSender<RawResponse>) -> Self {
        Self {
            tx,
            _output: PhantomData,
        }
    }

    /// Reinterpret the handle for another output record type.
    pub fn typed<T>(self) -> Response<T> {
        Response {
            tx: self.tx,
            _output: PhantomData,
        }
    }

    fn push(&self, response: RawResponse) -> Result<(), ConnectorError> {
        self.tx
            .unbounded_send(response)
            .map_err(|err| ConnectorError::Sink(Box::new(err.into_send_error())))
    }
}

impl<O: Serialize> Response<O> {
    /// Emit one output record.
    pub fn send(&self, output: O) -> Result<(), ConnectorError> {
        self.push(RawResponse::output(serde_json::to_value(output)?))
    }

    /// Save aggregation state for a stateful command.
    pub fn save_state(&self, state: impl Serialize) -> Result<(), ConnectorError> {
        self.push(RawResponse::state(serde_json::to_value(state)?))
    }
}

impl<O> fmt::Debug for Response<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt, channel::mpsc};
    use serde_json::json;

    #[test]
    fn envelope_wire_format() {
        let response = RawResponse::output(json!({ "identity": "john.doe" }));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "type": "output", "data": { "identity": "john.doe" } })
        );
    }

    #[tokio::test]
    async fn send_preserves_order() {
        let (tx, rx) = mpsc::unbounded();
        let response: Response<Value> = Response::new(tx);
        response.send(json!(1)).unwrap();
        response.save_state(json!({ "page": 2 })).unwrap();
        response.send(json!(3)).unwrap();
        drop(response);

        let records: Vec<RawResponse> = rx.collect().await;
        assert_eq!(
            records,
            vec![
                RawResponse::output(json!(1)),
                RawResponse::state(json!({ "page": 2 })),
                RawResponse::output(json!(3)),
            ]
        );
    }

    #[test]
    fn send_after_receiver_dropped_fails() {
        let (tx, rx) = mpsc::unbounded();
        drop(rx);
        let response: Response<Value> = Response::new(tx);
        assert!(matches!(
            response.send(json!({})),
            Err(ConnectorError::Sink(_))
        ));
    }
}
