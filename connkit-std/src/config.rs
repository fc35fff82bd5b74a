//! Connector source configuration.
//!
//! The runtime hands the configuration to the process as base64-encoded JSON
//! in the `CONNECTOR_CONFIG` environment variable. It is decoded once at
//! start-up into an immutable [`Config`] that is passed by reference to
//! every collaborator that needs it.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use connkit_core::ConnectorError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Environment variable carrying the encoded configuration.
pub const CONFIG_ENV: &str = "CONNECTOR_CONFIG";

/// Immutable source configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    values: Map<String, Value>,
}

impl Config {
    /// Decode the configuration from [`CONFIG_ENV`].
    pub fn from_env() -> Result<Self, ConnectorError> {
        let encoded = std::env::var(CONFIG_ENV)
            .map_err(|_| ConnectorError::configuration(format!("{CONFIG_ENV} is not set")))?;
        Self::decode(&encoded)
    }

    /// Decode base64-encoded JSON.
    pub fn decode(encoded: &str) -> Result<Self, ConnectorError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ConnectorError::configuration(format!("config is not valid base64: {e}")))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ConnectorError::configuration(format!("config is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Build a configuration from a decoded JSON object.
    pub fn from_value(value: Value) -> Result<Self, ConnectorError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ConnectorError::configuration(format!(
                "config must be a JSON object, got {other}"
            ))),
        }
    }

    /// Encode in the form [`Config::decode`] reads.
    pub fn encode(&self) -> String {
        STANDARD.encode(Value::Object(self.values.clone()).to_string())
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String value of `key`, failing if it is missing or not a string.
    pub fn require_str(&self, key: &str) -> Result<&str, ConnectorError> {
        self.get_str(key)
            .ok_or_else(|| ConnectorError::configuration(format!("{key} must be provided from config")))
    }

    /// Decode `key` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConnectorError> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| ConnectorError::configuration(format!("{key}: {e}")))
            })
            .transpose()
    }

    /// Decode the whole configuration into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConnectorError> {
        serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(|e| ConnectorError::configuration(e.to_string()))
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn decodes_base64_json() {
        let encoded = STANDARD.encode(r#"{"token":"xxx123","pageSize":50}"#);
        let config = Config::decode(&encoded).unwrap();
        assert_eq!(config.get_str("token"), Some("xxx123"));
        assert_eq!(config.get_as::<u32>("pageSize").unwrap(), Some(50));
        assert_eq!(config.get_as::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn encode_round_trips() {
        let config = Config::from_value(json!({ "token": "abc" })).unwrap();
        assert_eq!(Config::decode(&config.encode()).unwrap(), config);
    }

    #[test]
    fn rejects_bad_base64() {
        let err = Config::decode("not base64!").unwrap_err();
        assert!(matches!(err, ConnectorError::Configuration(_)));
    }

    #[test]
    fn rejects_non_object() {
        let err = Config::decode(&STANDARD.encode("[1,2]")).unwrap_err();
        assert!(matches!(err, ConnectorError::Configuration(_)));
    }

    #[test]
    fn require_str_names_the_key() {
        let config = Config::from_value(json!({ "token": 7 })).unwrap();
        let err = config.require_str("token").unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: token must be provided from config");
    }

    #[test]
    fn deserializes_typed_config() {
        #[derive(Deserialize)]
        struct SourceConfig {
            token: String,
        }

        let config = Config::from_value(json!({ "token": "t", "extra": true })).unwrap();
        let typed: SourceConfig = config.deserialize().unwrap();
        assert_eq!(typed.token, "t");
    }
}
