//! Newline-delimited JSON output.

use connkit_core::{BoxError, OutputSink, RawResponse};
use std::io::Write;

/// Writes each record as one `{"type": ..., "data": ...}` line.
///
/// This is the framing the platform tooling reads back from a connector
/// process.
#[derive(Debug)]
pub struct NdjsonSink<W> {
    writer: W,
}

impl<W: Write + Send> NdjsonSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl NdjsonSink<std::io::Stdout> {
    /// A sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> OutputSink for NdjsonSink<W> {
    async fn send(&mut self, response: RawResponse) -> Result<(), BoxError> {
        serde_json::to_writer(&mut self.writer, &response)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn writes_one_envelope_per_line() {
        let mut sink = NdjsonSink::new(Vec::new());
        sink.send(RawResponse::output(json!({ "identity": "john.doe" })))
            .await
            .unwrap();
        sink.send(RawResponse::state(json!({ "page": 1 }))).await.unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "{\"type\":\"output\",\"data\":{\"identity\":\"john.doe\"}}\n{\"type\":\"state\",\"data\":{\"page\":1}}\n"
        );
    }
}
