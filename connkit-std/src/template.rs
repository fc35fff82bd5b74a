//! Starter connector and customizer.
//!
//! A working connector over [`AccountClient`] and a customizer that adds a
//! `location` attribute to account reads. New connectors start by copying
//! these and replacing the client calls.

use crate::{
    client::{Account, AccountClient},
    config::Config,
    dispatch::{CommandRegistry, HookChain, RegistryBuilder},
};
use connkit_core::{BoxError, Command, ConnectorError, ContextRef, Phase, models::StdAccountOutput};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Build the template connector.
///
/// Fails with [`ConnectorError::Configuration`] if `config` has no `token`.
pub fn connector(config: &Config) -> Result<CommandRegistry, ConnectorError> {
    let client = Arc::new(AccountClient::with_mock_store(config)?);
    Ok(connector_with_client(client))
}

/// Build the template connector over an existing client.
pub fn connector_with_client(client: Arc<AccountClient>) -> CommandRegistry {
    let test_client = Arc::clone(&client);
    let list_client = Arc::clone(&client);
    let read_client = client;

    RegistryBuilder::new()
        .std_test_connection(move |_ctx, _input, res| {
            let client = Arc::clone(&test_client);
            async move {
                tracing::info!("Running test connection");
                res.send(client.test_connection().await?)
            }
        })
        .std_account_list(move |_ctx, _input, res| {
            let client = Arc::clone(&list_client);
            async move {
                let accounts = client.get_all_accounts().await?;
                for account in &accounts {
                    res.send(account_output(account))?;
                }
                tracing::info!(count = accounts.len(), "stdAccountList sent accounts");
                Ok::<_, ConnectorError>(())
            }
        })
        .std_account_read(move |_ctx, input, res| {
            let client = Arc::clone(&read_client);
            async move {
                let account = client.get_account(&input.identity).await?;
                res.send(account_output(&account))?;
                tracing::info!(identity = %input.identity, "stdAccountRead read account");
                Ok::<_, ConnectorError>(())
            }
        })
        .build()
}

/// Build the template customizer.
///
/// The hooks work on the raw record, so keys the standard models do not
/// know about pass through untouched.
pub fn customizer() -> HookChain {
    HookChain::builder()
        .register(Phase::After, Command::TestConnection, |_ctx: ContextRef, output: Value| async move {
            tracing::info!("Running after test connection");
            Ok::<_, BoxError>(output)
        })
        .register(Phase::Before, Command::AccountRead, |_ctx: ContextRef, input: Value| async move {
            tracing::info!(identity = ?input.get("identity"), "Running before account read");
            Ok::<_, BoxError>(input)
        })
        .register(Phase::After, Command::AccountRead, |_ctx: ContextRef, mut output: Value| async move {
            tracing::info!("Running after account read to add custom attribute \"location\"");
            let attributes = output
                .as_object_mut()
                .ok_or("account record is not a JSON object")?
                .entry("attributes")
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or("account attributes are not a JSON object")?;
            attributes.insert("location".to_string(), Value::from("Austin"));
            Ok::<_, BoxError>(output)
        })
        .build()
}

fn account_output(account: &Account) -> StdAccountOutput {
    let mut attributes = Map::new();
    attributes.insert("firstName".to_string(), Value::from(account.first_name.clone()));
    attributes.insert("lastName".to_string(), Value::from(account.last_name.clone()));
    attributes.insert("email".to_string(), Value::from(account.email.clone()));

    StdAccountOutput {
        identity: account.username.clone(),
        uuid: Some(account.id.clone()),
        attributes: Some(attributes),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connkit_core::{EmptyContext, RawResponse};
    use serde_json::json;

    fn config() -> Config {
        Config::from_value(json!({ "token": "xxx123" })).unwrap()
    }

    #[test]
    fn registers_three_commands() {
        let registry = connector(&config()).unwrap();
        assert_eq!(
            registry.commands(),
            vec![Command::TestConnection, Command::AccountList, Command::AccountRead]
        );
    }

    #[tokio::test]
    async fn account_list_streams_every_account() {
        let registry = connector(&config()).unwrap();
        let mut sink = Vec::new();
        registry
            .invoke(Command::AccountList, EmptyContext::shared(), json!({}), &mut sink)
            .await
            .unwrap();

        let identities: Vec<_> = sink.iter().map(|r| r.data["identity"].clone()).collect();
        assert_eq!(identities, vec![json!("john.doe"), json!("jane.doe")]);
    }

    #[tokio::test]
    async fn account_read_shapes_record() {
        let registry = connector(&config()).unwrap();
        let mut sink = Vec::new();
        registry
            .invoke(Command::AccountRead, EmptyContext::shared(), json!({ "identity": "jane.doe" }), &mut sink)
            .await
            .unwrap();

        assert_eq!(
            sink,
            vec![RawResponse::output(json!({
                "identity": "jane.doe",
                "uuid": "2",
                "attributes": {
                    "firstName": "jane",
                    "lastName": "doe",
                    "email": "jane.doe@example.com",
                }
            }))]
        );
    }

    #[test]
    fn customizer_registers_three_hooks() {
        assert_eq!(customizer().len(), 3);
    }
}
