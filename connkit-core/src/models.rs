//! Input and output records of the standard commands.
//!
//! Field names follow the runtime's camelCase JSON contract. Optional fields
//! are skipped when absent, and keys a record does not model are collected in
//! its `extra` map, so a record survives a decode/encode pass unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form attribute map of an account or entitlement.
pub type Attributes = Map<String, Value>;

/// Identifies an object on the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// A single identifier.
    Simple {
        /// The object identifier.
        id: String,
    },
    /// A lookup identifier paired with an immutable unique identifier.
    #[serde(rename_all = "camelCase")]
    Compound {
        /// The identifier used for lookups.
        lookup_id: String,
        /// The immutable identifier.
        unique_id: String,
    },
}

impl Key {
    /// Create a simple key.
    pub fn simple(id: impl Into<String>) -> Self {
        Key::Simple { id: id.into() }
    }

    /// Create a compound key.
    pub fn compound(lookup_id: impl Into<String>, unique_id: impl Into<String>) -> Self {
        Key::Compound {
            lookup_id: lookup_id.into(),
            unique_id: unique_id.into(),
        }
    }

    /// The identifier used to look the object up.
    pub fn id(&self) -> &str {
        match self {
            Key::Simple { id } => id,
            Key::Compound { lookup_id, .. } => lookup_id,
        }
    }
}

/// Input of `std:test-connection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdTestConnectionInput {
    /// Fields this record does not model, kept as received.
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Output of `std:test-connection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdTestConnectionOutput {
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:account:list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountListInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stateful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:account:read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountReadInput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// An account record, emitted by list, read, create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountOutput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Fields this record does not model, kept as received.
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Output of `std:account:list`.
pub type StdAccountListOutput = StdAccountOutput;
/// Output of `std:account:read`.
pub type StdAccountReadOutput = StdAccountOutput;

/// Input of `std:account:create`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountCreateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Operation of a single attribute change in `std:account:update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeChangeOp {
    Add,
    Set,
    Remove,
}

/// A single attribute change in `std:account:update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub op: AttributeChangeOp,
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:account:update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountUpdateInput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(default)]
    pub changes: Vec<AttributeChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:account:delete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountDeleteInput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Output of `std:account:delete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdAccountDeleteOutput {
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:account:discover-schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdAccountDiscoverSchemaInput {
    #[serde(flatten)]
    pub extra: Attributes,
}

/// One attribute of a discovered account schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub multi: bool,
    #[serde(default)]
    pub entitlement: bool,
    #[serde(default)]
    pub managed: bool,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Output of `std:account:discover-schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdAccountSchema {
    pub display_attribute: String,
    pub identity_attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_attribute: Option<String>,
    #[serde(default)]
    pub attributes: Vec<SchemaAttribute>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:entitlement:list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdEntitlementListInput {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stateful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:entitlement:read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdEntitlementReadInput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// An entitlement record, emitted by list and read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdEntitlementOutput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:change-password`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdChangePasswordInput {
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    pub password: String,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Output of `std:change-password`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdChangePasswordOutput {
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:source-data:discover`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdSourceDataDiscoverInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_input: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:source-data:read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdSourceDataReadInput {
    pub source_data_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_input: Option<Value>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// A source-data entry, emitted by discover and read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceData {
    pub key: String,
    pub label: String,
    #[serde(rename = "sublabel", default, skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Input of `std:spec:read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdSpecReadInput {
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Output of `std:spec:read`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdSpecReadOutput {
    pub specification: Value,
    #[serde(flatten)]
    pub extra: Attributes,
}
