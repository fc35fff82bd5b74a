//! Per-invocation capabilities handed to handlers and hooks.
//!
//! The runtime supplies a [`Context`] for each invocation. The dispatch layer
//! never inspects it; it only forwards the same [`ContextRef`] to the before
//! hook, the handler and the after hook.

use crate::error::{BoxError, ConnectorError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to the invocation context.
pub type ContextRef = Arc<dyn Context>;

/// Request to assume a cloud role on behalf of the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumeRoleRequest {
    /// ARN of the role to assume.
    pub role_arn: String,
    /// Name recorded for the assumed-role session.
    pub role_session_name: String,
    /// External id the role's trust policy requires, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Temporary credentials returned by [`Context::assume_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Temporary access key id.
    pub access_key_id: String,
    /// Temporary secret access key.
    pub secret_access_key: String,
    /// Session token to send with the key pair.
    pub session_token: String,
    /// When the credentials expire, as the runtime reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

/// Capability object supplied by the runtime for one invocation.
#[async_trait]
pub trait Context: Send + Sync {
    /// Ask the runtime to reload the source configuration.
    async fn reload_config(&self) -> Result<(), BoxError>;

    /// Assume a role and return temporary credentials.
    ///
    /// Contexts without this capability keep the default, which fails with
    /// [`ConnectorError::Unsupported`].
    async fn assume_role(&self, request: AssumeRoleRequest) -> Result<Credentials, BoxError> {
        let _ = request;
        Err(Box::new(ConnectorError::Unsupported("assume_role")))
    }
}

/// A context with no capabilities beyond a no-op reload.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl EmptyContext {
    /// Wrap a fresh `EmptyContext` in a [`ContextRef`].
    pub fn shared() -> ContextRef {
        Arc::new(EmptyContext)
    }
}

#[async_trait]
impl Context for EmptyContext {
    async fn reload_config(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_context_reloads_and_refuses_roles() {
        let ctx = EmptyContext::shared();
        ctx.reload_config().await.unwrap();

        let err = ctx
            .assume_role(AssumeRoleRequest {
                role_arn: "arn:aws:iam::123456789012:role/connector".into(),
                role_session_name: "session".into(),
                external_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "context does not support assume_role");
    }
}
