//! Backend client used by the template connector.
//!
//! [`AccountClient`] is where calls to the SaaS application's API belong.
//! The data itself comes from an [`AccountStore`], so a real backend can
//! replace [`MockAccountStore`] without touching the connector.

use crate::config::Config;
use async_trait::async_trait;
use connkit_core::{BoxError, ConnectorError, models::StdTestConnectionOutput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An account as the backing system stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Source of account data.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Every account.
    async fn all_accounts(&self) -> Result<Vec<Account>, BoxError>;

    /// The account with the given username, if any.
    async fn account(&self, identity: &str) -> Result<Option<Account>, BoxError>;
}

/// In-memory store with two fixed accounts.
#[derive(Debug, Clone)]
pub struct MockAccountStore {
    accounts: Vec<Account>,
}

impl MockAccountStore {
    /// Create the store holding `john.doe` and `jane.doe`.
    pub fn new() -> Self {
        let account = |id: &str, first: &str, last: &str| {
            let username = format!("{first}.{last}");
            Account {
                id: id.to_string(),
                email: format!("{username}@example.com"),
                username,
                first_name: first.to_string(),
                last_name: last.to_string(),
            }
        };
        Self {
            accounts: vec![account("1", "john", "doe"), account("2", "jane", "doe")],
        }
    }
}

impl Default for MockAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    async fn all_accounts(&self) -> Result<Vec<Account>, BoxError> {
        Ok(self.accounts.clone())
    }

    async fn account(&self, identity: &str) -> Result<Option<Account>, BoxError> {
        Ok(self
            .accounts
            .iter()
            .find(|account| account.username == identity)
            .cloned())
    }
}

/// Client for the backing SaaS application.
#[derive(Clone)]
pub struct AccountClient {
    token: String,
    store: Arc<dyn AccountStore>,
}

impl AccountClient {
    /// Create a client; the config must carry a `token` string.
    pub fn new(config: &Config, store: Arc<dyn AccountStore>) -> Result<Self, ConnectorError> {
        let token = config.require_str("token")?.to_string();
        Ok(Self { token, store })
    }

    /// Create a client backed by [`MockAccountStore`].
    pub fn with_mock_store(config: &Config) -> Result<Self, ConnectorError> {
        Self::new(config, Arc::new(MockAccountStore::new()))
    }

    /// The API token read from the config.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Every account on the source.
    pub async fn get_all_accounts(&self) -> Result<Vec<Account>, ConnectorError> {
        self.store.all_accounts().await.map_err(ConnectorError::Backend)
    }

    /// The account with the given username.
    pub async fn get_account(&self, identity: &str) -> Result<Account, ConnectorError> {
        self.store
            .account(identity)
            .await
            .map_err(ConnectorError::Backend)?
            .ok_or_else(|| ConnectorError::AccountNotFound(identity.to_string()))
    }

    /// Check that the source is reachable.
    pub async fn test_connection(&self) -> Result<StdTestConnectionOutput, ConnectorError> {
        Ok(StdTestConnectionOutput::default())
    }
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> Config {
        Config::from_value(json!({ "token": "xxx123" })).unwrap()
    }

    #[tokio::test]
    async fn lists_both_accounts() {
        let client = AccountClient::with_mock_store(&config()).unwrap();
        let accounts = client.get_all_accounts().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].username, "john.doe");
        assert_eq!(accounts[1].email, "jane.doe@example.com");
    }

    #[tokio::test]
    async fn reads_one_account() {
        let client = AccountClient::with_mock_store(&config()).unwrap();
        let account = client.get_account("john.doe").await.unwrap();
        assert_eq!(account.id, "1");
        assert_eq!(account.first_name, "john");
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let client = AccountClient::with_mock_store(&config()).unwrap();
        let err = client.get_account("nobody").await.unwrap_err();
        assert!(matches!(err, ConnectorError::AccountNotFound(id) if id == "nobody"));
    }

    #[tokio::test]
    async fn test_connection_returns_empty_record() {
        let client = AccountClient::with_mock_store(&config()).unwrap();
        assert_eq!(client.test_connection().await.unwrap(), StdTestConnectionOutput::default());
    }

    #[test]
    fn missing_token_is_a_configuration_error() {
        let err = AccountClient::with_mock_store(&Config::default()).unwrap_err();
        assert!(matches!(err, ConnectorError::Configuration(_)));
    }

    #[test]
    fn debug_hides_token() {
        let client = AccountClient::with_mock_store(&config()).unwrap();
        assert!(!format!("{client:?}").contains("xxx123"));
    }
}
