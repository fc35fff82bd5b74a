//! Ordered destinations for output records.

use crate::{error::BoxError, response::RawResponse};
use futures::channel::mpsc::UnboundedSender;
use std::future::Future;

/// Destination of the records an invocation emits.
///
/// Records are handed over one at a time, in emission order. The sink does
/// not own the invocation; opening and closing it is the caller's business.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an output sink",
    label = "missing `OutputSink` implementation",
    note = "Implement `OutputSink::send` to receive invocation output."
)]
pub trait OutputSink: Send {
    /// Accept the next record.
    fn send(&mut self, response: RawResponse) -> impl Future<Output = Result<(), BoxError>> + Send;
}

impl OutputSink for Vec<RawResponse> {
    async fn send(&mut self, response: RawResponse) -> Result<(), BoxError> {
        self.push(response);
        Ok(())
    }
}

impl OutputSink for UnboundedSender<RawResponse> {
    async fn send(&mut self, response: RawResponse) -> Result<(), BoxError> {
        self.unbounded_send(response)
            .map_err(|err| Box::new(err.into_send_error()) as BoxError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt, channel::mpsc};
    use serde_json::json;

    #[tokio::test]
    async fn channel_sink_forwards_records() {
        let (mut tx, rx) = mpsc::unbounded();
        tx.send(RawResponse::output(json!({}))).await.unwrap();
        drop(tx);

        let records: Vec<_> = rx.collect().await;
        assert_eq!(records, vec![RawResponse::output(json!({}))]);
    }

    #[tokio::test]
    async fn channel_sink_reports_closed_receiver() {
        let (mut tx, rx) = mpsc::unbounded::<RawResponse>();
        drop(rx);
        assert!(tx.send(RawResponse::output(json!({}))).await.is_err());
    }
}
