//! Connector dispatch: registration, invocation and streaming.

use connkit::{
    Command, CommandRegistry, ConnectorError, EmptyContext, RawResponse, models::StdTestConnectionOutput,
    template, testing::RecordingSink,
};
use serde_json::json;
use std::error::Error as _;

mod common;
use common::{config, emitting_registry, failing_registry, identities};

#[tokio::test]
async fn test_connection_emits_one_empty_record() {
    let registry = CommandRegistry::builder()
        .std_test_connection(|_ctx, _input, res| async move { res.send(StdTestConnectionOutput::default()) })
        .build();
    let mut sink = RecordingSink::new();

    registry
        .invoke(Command::TestConnection, EmptyContext::shared(), json!({}), &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.records(), vec![RawResponse::output(json!({}))]);
}

#[tokio::test]
async fn records_reach_the_sink_in_emission_order() {
    let registry = emitting_registry(vec![
        json!({ "identity": "r1" }),
        json!({ "identity": "r2" }),
        json!({ "identity": "r3" }),
    ]);
    let mut sink = RecordingSink::new();

    registry
        .invoke(Command::AccountList, EmptyContext::shared(), json!({}), &mut sink)
        .await
        .unwrap();

    assert_eq!(identities(&sink), vec![json!("r1"), json!("r2"), json!("r3")]);
}

#[tokio::test]
async fn unregistered_command_is_rejected() {
    let registry = emitting_registry(vec![json!({ "identity": "r1" })]);
    let mut sink = RecordingSink::new();

    let err = registry
        .invoke(Command::AccountDelete, EmptyContext::shared(), json!({}), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::UnregisteredOperation(Command::AccountDelete)));
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn handler_failure_is_surfaced_with_its_cause() {
    let registry = failing_registry("backend unavailable");
    let mut sink = RecordingSink::new();

    let err = registry
        .invoke(Command::AccountList, EmptyContext::shared(), json!({}), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::HandlerExecution { command: Command::AccountList, .. }));
    assert_eq!(err.source().unwrap().to_string(), "backend unavailable");
}

#[test]
fn template_without_token_is_a_configuration_error() {
    let err = template::connector(&connkit::Config::default()).unwrap_err();
    assert!(matches!(err, ConnectorError::Configuration(_)));
    assert!(err.to_string().contains("token"));
}

#[tokio::test]
async fn template_reads_one_account() {
    let registry = template::connector(&config()).unwrap();
    let mut sink = RecordingSink::new();

    registry
        .invoke(Command::AccountRead, EmptyContext::shared(), json!({ "identity": "john.doe" }), &mut sink)
        .await
        .unwrap();

    assert_eq!(identities(&sink), vec![json!("john.doe")]);
}

#[tokio::test]
async fn template_read_of_unknown_account_fails() {
    let registry = template::connector(&config()).unwrap();
    let mut sink = RecordingSink::new();

    let err = registry
        .invoke(Command::AccountRead, EmptyContext::shared(), json!({ "identity": "nobody" }), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::HandlerExecution { .. }));
    assert_eq!(sink.count(), 0);
}
