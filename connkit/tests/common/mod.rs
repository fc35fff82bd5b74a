//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use connkit::{
    BoxError, Command, CommandRegistry, Config, ConnectorError, ContextRef, Response,
    testing::RecordingSink,
};
use serde_json::{Value, json};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration accepted by the template connector.
pub fn config() -> Config {
    Config::from_value(json!({ "token": "xxx123" })).unwrap()
}

// ============================================================================
// Handlers
// ============================================================================

/// A registry whose `std:account:list` handler emits `records` in order.
pub fn emitting_registry(records: Vec<Value>) -> CommandRegistry {
    CommandRegistry::builder()
        .register(
            Command::AccountList,
            move |_ctx: ContextRef, _input: Value, res: Response| {
                let records = records.clone();
                async move {
                    for record in records {
                        res.send(record)?;
                    }
                    Ok::<_, ConnectorError>(())
                }
            },
        )
        .build()
}

/// A registry whose `std:account:list` handler always fails.
pub fn failing_registry(message: &'static str) -> CommandRegistry {
    CommandRegistry::builder()
        .register(
            Command::AccountList,
            move |_ctx: ContextRef, _input: Value, _res: Response| async move {
                Err::<(), BoxError>(message.into())
            },
        )
        .build()
}

/// Identities of every output record in `sink`, in order.
pub fn identities(sink: &RecordingSink) -> Vec<Value> {
    sink.outputs()
        .into_iter()
        .map(|record| record["identity"].clone())
        .collect()
}
