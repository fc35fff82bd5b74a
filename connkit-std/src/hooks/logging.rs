//! Logging hook - observability for customizer chains.

use connkit_core::{BoxError, ContextRef, CustomizerHook};
use serde_json::Value;

/// A customizer hook that logs the payload and passes it on unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let customizer = HookChain::builder()
///     .register(Phase::Before, Command::AccountRead, LoggingHook::named("account_read_input"))
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` with a default name.
    pub fn new() -> Self {
        Self { name: "payload" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name identifies the hook in log messages.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomizerHook for LoggingHook {
    async fn call(&self, _context: ContextRef, payload: Value) -> Result<Value, BoxError> {
        tracing::debug!(hook = %self.name, %payload, "customizer payload");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connkit_core::EmptyContext;
    use serde_json::json;

    #[tokio::test]
    async fn test_logging_hook_passes_payload_through() {
        let hook = LoggingHook::new();
        let payload = json!({ "identity": "john.doe" });

        let result = hook.call(EmptyContext::shared(), payload.clone()).await.unwrap();
        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_logging_hook_named() {
        let hook = LoggingHook::named("account_read");
        let result = hook.call(EmptyContext::shared(), json!(null)).await.unwrap();
        assert_eq!(result, json!(null));
    }
}
